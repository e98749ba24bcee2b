//! Risk flag model and normalization of model-emitted flag lists.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::sections::lenient_string;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
}

impl Severity {
    /// Case-insensitive exact parse; anything unrecognised, including padded values, is `Low`.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            _ => Self::Low,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    #[must_use]
    pub fn weight(self) -> u32 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One potential problem in the contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskFlag {
    pub flag: String,
    pub severity: Severity,
    /// Section name the flag refers to.
    #[serde(rename = "where")]
    pub location: String,
    pub quote: String,
    pub why: String,
    pub suggested_fix: String,
}

impl RiskFlag {
    fn from_element(value: &Value) -> Self {
        let Value::Object(map) = value else {
            return Self::default();
        };
        let field = |key: &str| map.get(key).map(lenient_string).unwrap_or_default();
        let severity = map
            .get("severity")
            .map(|v| Severity::parse_lenient(&lenient_string(v)))
            .unwrap_or_default();

        Self {
            flag: field("flag"),
            severity,
            location: field("where"),
            quote: field("quote"),
            why: field("why"),
            suggested_fix: field("suggested_fix"),
        }
    }

    /// Whether the quote can be found in `document_text`, ignoring case and
    /// whitespace differences. An empty quote counts as found.
    #[must_use]
    pub fn quote_in(&self, document_text: &str) -> bool {
        let quote = squash_whitespace(&self.quote);
        if quote.is_empty() {
            return true;
        }
        squash_whitespace(document_text).contains(&quote)
    }
}

fn squash_whitespace(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Accepted shapes of the risk-flag response.
#[derive(Debug, Clone, PartialEq)]
pub enum RawFlags {
    List(Vec<Value>),
    /// An object carrying the list under `flags`.
    Wrapped { flags: Value },
    Unparseable,
}

impl RawFlags {
    #[must_use]
    pub fn classify(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::List(items),
            Value::Object(mut map) => match map.remove("flags") {
                Some(flags) => Self::Wrapped { flags },
                None => Self::Unparseable,
            },
            _ => Self::Unparseable,
        }
    }

    /// Unwrap at most once; anything that is not a list afterwards is empty.
    #[must_use]
    pub fn into_items(self) -> Vec<Value> {
        match self {
            Self::List(items) | Self::Wrapped {
                flags: Value::Array(items),
            } => items,
            Self::Wrapped { .. } | Self::Unparseable => Vec::new(),
        }
    }
}

/// Normalize a coerced risk-flag response into typed flags, preserving order.
#[must_use]
pub fn normalize_flags(value: Value) -> Vec<RiskFlag> {
    RawFlags::classify(value)
        .into_items()
        .iter()
        .map(RiskFlag::from_element)
        .collect()
}

/// Per-severity counts of a flag list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityCounts {
    #[must_use]
    pub fn from_flags(flags: &[RiskFlag]) -> Self {
        flags.iter().fold(Self::default(), |mut acc, f| {
            match f.severity {
                Severity::High => acc.high += 1,
                Severity::Medium => acc.medium += 1,
                Severity::Low => acc.low += 1,
            }
            acc
        })
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::risk_axes::RiskAxisScores;

    #[test]
    fn severity_domain_is_closed() {
        let flags = normalize_flags(json!([
            {"flag": "a", "severity": "URGENT"},
            {"flag": "b", "severity": "Medium"},
            {"flag": "c"},
            {"flag": "d", "severity": null},
            {"flag": "e", "severity": 3},
        ]));
        let sev: Vec<_> = flags.iter().map(|f| f.severity).collect();
        assert_eq!(
            sev,
            vec![
                Severity::Low,
                Severity::Medium,
                Severity::Low,
                Severity::Low,
                Severity::Low
            ]
        );
    }

    #[test]
    fn padded_severity_is_not_recognised() {
        let flags = normalize_flags(json!([
            {"severity": " high "},
            {"severity": "medium\n"},
            {"severity": "High"},
        ]));
        let sev: Vec<_> = flags.iter().map(|f| f.severity).collect();
        assert_eq!(sev, vec![Severity::Low, Severity::Low, Severity::High]);
        assert_eq!(RiskAxisScores::aggregate(&flags).other, 5);
    }

    #[test]
    fn wrapped_object_is_unwrapped() {
        let flags = normalize_flags(json!({"flags": [{"severity": "HIGH"}]}));
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].severity, Severity::High);
    }

    #[test]
    fn wrapped_non_list_is_empty() {
        assert!(normalize_flags(json!({"flags": "none"})).is_empty());
        assert!(normalize_flags(json!({"flags": {"flags": []}})).is_empty());
    }

    #[test]
    fn unparseable_shapes_are_empty() {
        assert!(normalize_flags(json!({"_raw": "I could not find risks"})).is_empty());
        assert!(normalize_flags(json!("text")).is_empty());
        assert!(normalize_flags(json!(null)).is_empty());
        assert!(normalize_flags(json!({"other": []})).is_empty());
    }

    #[test]
    fn fields_and_order_preserved() {
        let flags = normalize_flags(json!([
            {"flag": "Late fee", "severity": "high", "where": "payment",
             "quote": "₹1,000/day", "why": "excessive", "suggested_fix": "cap it"},
            "not an object",
            {"flag": 7, "where": ["termination"]},
        ]));
        assert_eq!(flags.len(), 3);
        assert_eq!(flags[0].flag, "Late fee");
        assert_eq!(flags[0].location, "payment");
        assert_eq!(flags[0].suggested_fix, "cap it");
        assert_eq!(flags[1], RiskFlag::default());
        assert_eq!(flags[2].flag, "7");
        assert_eq!(flags[2].location, r#"["termination"]"#);
    }

    #[test]
    fn serializes_location_as_where() {
        let flag = RiskFlag {
            location: "payment".into(),
            ..RiskFlag::default()
        };
        let v = serde_json::to_value(&flag).unwrap();
        assert_eq!(v["where"], json!("payment"));
        assert_eq!(v["severity"], json!("low"));
    }

    #[test]
    fn quote_verification_is_lenient_about_spacing() {
        let doc = "The Tenant shall bear ALL repairs,\n  including structural.";
        let found = RiskFlag {
            quote: "shall bear all repairs, including structural".into(),
            ..RiskFlag::default()
        };
        let missing = RiskFlag {
            quote: "landlord pays repairs".into(),
            ..RiskFlag::default()
        };
        assert!(found.quote_in(doc));
        assert!(!missing.quote_in(doc));
        assert!(RiskFlag::default().quote_in(doc));
    }

    #[test]
    fn severity_counts() {
        let flags = normalize_flags(json!([
            {"severity": "high"}, {"severity": "high"}, {"severity": "low"}
        ]));
        let counts = SeverityCounts::from_flags(&flags);
        assert_eq!(
            counts,
            SeverityCounts {
                high: 2,
                medium: 0,
                low: 1
            }
        );
        assert_eq!(counts.total(), 3);
    }
}

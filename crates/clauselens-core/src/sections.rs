use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured breakdown of a contract.
///
/// Every field is always present; missing information is an empty string or an
/// empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionSet {
    pub parties: String,
    pub term: String,
    pub payment: String,
    pub termination: String,
    pub liability: String,
    pub ip: String,
    pub confidentiality: String,
    pub dispute_resolution: String,
    pub governing_law: String,
    pub other_key_clauses: Vec<String>,
}

impl SectionSet {
    /// Build from a coerced model value, tolerating any shape.
    ///
    /// Non-objects yield an empty set. Scalars are stringified, `null` becomes `""`,
    /// and a single string in `other_key_clauses` becomes a one-element list.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let Value::Object(map) = value else {
            return Self::default();
        };
        let field = |key: &str| map.get(key).map(lenient_string).unwrap_or_default();

        let other_key_clauses = match map.get("other_key_clauses") {
            Some(Value::Array(items)) => items
                .iter()
                .map(lenient_string)
                .filter(|s| !s.is_empty())
                .collect(),
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                let s = lenient_string(other);
                if s.is_empty() { Vec::new() } else { vec![s] }
            }
        };

        Self {
            parties: field("parties"),
            term: field("term"),
            payment: field("payment"),
            termination: field("termination"),
            liability: field("liability"),
            ip: field("ip"),
            confidentiality: field("confidentiality"),
            dispute_resolution: field("dispute_resolution"),
            governing_law: field("governing_law"),
            other_key_clauses,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Serialize with non-ASCII characters preserved, for prompt payloads.
    #[must_use]
    pub fn to_prompt_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_owned())
    }

    /// Labelled, non-empty fields in display order.
    #[must_use]
    pub fn labelled_fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("Parties", self.parties.as_str()),
            ("Term", self.term.as_str()),
            ("Payment", self.payment.as_str()),
            ("Termination", self.termination.as_str()),
            ("Liability", self.liability.as_str()),
            ("IP", self.ip.as_str()),
            ("Confidentiality", self.confidentiality.as_str()),
            ("Dispute resolution", self.dispute_resolution.as_str()),
            ("Governing law", self.governing_law.as_str()),
        ]
        .into_iter()
        .filter(|(_, v)| !v.trim().is_empty())
        .collect()
    }
}

/// Strings as-is, `null` as empty, anything else as compact JSON text.
pub(crate) fn lenient_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

use std::fmt;

use serde::Serialize;

use crate::flags::RiskFlag;

/// Risk category a flag is bucketed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskAxis {
    Payment,
    Termination,
    Liability,
    Dispute,
    Other,
}

impl RiskAxis {
    pub const ALL: [Self; 5] = [
        Self::Payment,
        Self::Termination,
        Self::Liability,
        Self::Dispute,
        Self::Other,
    ];

    /// Categorize by case-insensitive substring of the flag's `where`. First match wins.
    #[must_use]
    pub fn classify(location: &str) -> Self {
        let loc = location.to_lowercase();
        if loc.contains("payment") {
            Self::Payment
        } else if loc.contains("termination") {
            Self::Termination
        } else if loc.contains("liability") || loc.contains("indemn") {
            Self::Liability
        } else if loc.contains("dispute") {
            Self::Dispute
        } else {
            Self::Other
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Termination => "termination",
            Self::Liability => "liability",
            Self::Dispute => "dispute",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for RiskAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity-weighted totals per risk category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiskAxisScores {
    pub payment: u32,
    pub termination: u32,
    pub liability: u32,
    pub dispute: u32,
    pub other: u32,
}

impl RiskAxisScores {
    #[must_use]
    pub fn aggregate(flags: &[RiskFlag]) -> Self {
        let mut scores = Self::default();
        for flag in flags {
            *scores.slot_mut(RiskAxis::classify(&flag.location)) += flag.severity.weight();
        }
        scores
    }

    #[must_use]
    pub fn get(&self, axis: RiskAxis) -> u32 {
        match axis {
            RiskAxis::Payment => self.payment,
            RiskAxis::Termination => self.termination,
            RiskAxis::Liability => self.liability,
            RiskAxis::Dispute => self.dispute,
            RiskAxis::Other => self.other,
        }
    }

    fn slot_mut(&mut self, axis: RiskAxis) -> &mut u32 {
        match axis {
            RiskAxis::Payment => &mut self.payment,
            RiskAxis::Termination => &mut self.termination,
            RiskAxis::Liability => &mut self.liability,
            RiskAxis::Dispute => &mut self.dispute,
            RiskAxis::Other => &mut self.other,
        }
    }

    /// `(axis, score)` pairs in fixed category order.
    pub fn iter(&self) -> impl Iterator<Item = (RiskAxis, u32)> + '_ {
        RiskAxis::ALL.into_iter().map(|a| (a, self.get(a)))
    }

    #[must_use]
    pub fn max(&self) -> u32 {
        self.iter().map(|(_, v)| v).max().unwrap_or(0)
    }
}

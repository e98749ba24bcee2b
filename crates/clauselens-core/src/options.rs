use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Audience the analysis is written for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Persona {
    #[default]
    StudentTenant,
    Freelancer,
    SmallBusinessOwner,
}

impl Persona {
    pub const ALL: [Self; 3] = [Self::StudentTenant, Self::Freelancer, Self::SmallBusinessOwner];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StudentTenant => "Student Tenant",
            Self::Freelancer => "Freelancer",
            Self::SmallBusinessOwner => "Small Business Owner",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Persona {
    type Err = String;

    /// Accepts the display name or a slug, case-insensitively
    /// (`"Student Tenant"`, `"student-tenant"`, `"freelancer"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(s);
        Self::ALL
            .into_iter()
            .find(|p| normalize_key(p.as_str()) == key)
            .or(match key.as_str() {
                "student" | "tenant" => Some(Self::StudentTenant),
                "business" | "smallbusiness" | "sme" => Some(Self::SmallBusinessOwner),
                _ => None,
            })
            .ok_or_else(|| format!("unknown persona: {s}"))
    }
}

impl TryFrom<String> for Persona {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Persona> for String {
    fn from(p: Persona) -> Self {
        p.as_str().to_owned()
    }
}

/// Output language of the plain-language summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    #[default]
    English,
    Hinglish,
    Tamil,
    Hindi,
}

impl Language {
    pub const ALL: [Self; 4] = [Self::English, Self::Hinglish, Self::Tamil, Self::Hindi];

    /// Label interpolated into the summary prompt and stored with saved analyses.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hinglish => "Hinglish",
            Self::Tamil => "Tamil (தமிழ்)",
            Self::Hindi => "Hindi (हिंदी)",
        }
    }

    fn slug(self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Hinglish => "hinglish",
            Self::Tamil => "tamil",
            Self::Hindi => "hindi",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Language {
    type Err = String;

    /// Accepts the full label, the English name, or the native script name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let key = normalize_key(trimmed);
        Self::ALL
            .into_iter()
            .find(|l| {
                l.slug() == key
                    || l.label() == trimmed
                    || matches!((l, trimmed), (Self::Tamil, "தமிழ்") | (Self::Hindi, "हिंदी"))
            })
            .ok_or_else(|| format!("unknown language: {s}"))
    }
}

impl TryFrom<String> for Language {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Language> for String {
    fn from(l: Language) -> Self {
        l.label().to_owned()
    }
}

fn normalize_key(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// User choices for one analysis run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    pub persona: Persona,
    pub language: Language,
    pub casual_tone: bool,
}

impl AnalysisOptions {
    /// Persona text sent with the summary prompt; casual tone appends `" (casual)"`.
    #[must_use]
    pub fn summary_persona(&self) -> String {
        if self.casual_tone {
            format!("{} (casual)", self.persona)
        } else {
            self.persona.to_string()
        }
    }
}

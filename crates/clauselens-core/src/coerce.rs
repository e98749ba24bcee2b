//! Best-effort extraction of JSON from free-form model output.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Greedy span from the first `{` (or `[`) to the last `}` (or `]`).
static JSON_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}|\[.*\]").expect("json span regex is valid"));

/// Key used for the raw-text fallback object.
pub const RAW_KEY: &str = "_raw";

/// Model output after coercion, tagged by how it was interpreted.
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    Object(serde_json::Map<String, Value>),
    Array(Vec<Value>),
    /// A bare JSON scalar (string, number, bool or null).
    Scalar(Value),
    /// Nothing parsed; the original text is kept verbatim.
    Raw(String),
}

impl Coerced {
    /// Interpret `raw` in three tiers: the embedded JSON span, the whole text, then the
    /// raw-text fallback. Never fails.
    #[must_use]
    pub fn from_text(raw: &str) -> Self {
        let parsed = JSON_SPAN
            .find(raw)
            .and_then(|m| serde_json::from_str::<Value>(m.as_str()).ok())
            .or_else(|| serde_json::from_str::<Value>(raw).ok());

        match parsed {
            Some(Value::Object(map)) => Self::Object(map),
            Some(Value::Array(items)) => Self::Array(items),
            Some(scalar) => Self::Scalar(scalar),
            None => Self::Raw(raw.to_owned()),
        }
    }

    #[must_use]
    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }

    /// Convert to a plain JSON value; the fallback becomes `{"_raw": text}`.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Object(map) => Value::Object(map),
            Self::Array(items) => Value::Array(items),
            Self::Scalar(v) => v,
            Self::Raw(text) => {
                let mut map = serde_json::Map::new();
                map.insert(RAW_KEY.to_owned(), Value::String(text));
                Value::Object(map)
            }
        }
    }
}

/// Coerce model output into a JSON value. See [`Coerced::from_text`].
#[must_use]
pub fn coerce(raw: &str) -> Value {
    Coerced::from_text(raw).into_value()
}

use serde::{Deserialize, Serialize};

/// Strongly typed wrapper for saved analysis row IDs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct AnalysisId(pub i64);

impl std::fmt::Display for AnalysisId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Values for a new `analyses` row. `id` and `created_at` are assigned on insert.
#[derive(Debug, Clone)]
pub struct NewAnalysis<'a> {
    pub doc_sig: &'a str,
    pub file_name: &'a str,
    pub persona: &'a str,
    pub lang: &'a str,
    pub sections_json: String,
    pub flags_json: String,
    pub summary: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SavedAnalysisRecord {
    pub id: AnalysisId,
    /// Unix epoch seconds.
    pub created_at: i64,
    pub doc_sig: String,
    pub file_name: String,
    pub persona: String,
    pub lang: String,
    pub sections_json: String,
    pub flags_json: String,
    pub summary: String,
}

/// Projection returned by the "most recent N" listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AnalysisSummaryRow {
    pub id: AnalysisId,
    pub created_at: i64,
    pub file_name: String,
    pub persona: String,
    pub lang: String,
}

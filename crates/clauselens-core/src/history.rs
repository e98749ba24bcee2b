//! Saving analyses to, and reading them back from, the local store.

use clauselens_memory::document::Document;
use clauselens_memory::{AnalysisId, NewAnalysis, SavedAnalysisRecord, SqliteStore};

use crate::analysis::AnalysisResult;
use crate::error::CoreError;
use crate::flags::{RiskFlag, normalize_flags};
use crate::options::AnalysisOptions;
use crate::sections::SectionSet;

/// Append one analysis record.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub async fn save_analysis(
    store: &SqliteStore,
    document: &Document,
    options: &AnalysisOptions,
    result: &AnalysisResult,
) -> Result<AnalysisId, CoreError> {
    let record = NewAnalysis {
        doc_sig: document.signature(),
        file_name: document.file_name(),
        persona: options.persona.as_str(),
        lang: options.language.label(),
        sections_json: serde_json::to_string(&result.sections)?,
        flags_json: serde_json::to_string(&result.flags)?,
        summary: &result.summary,
    };
    Ok(store.save_analysis(record).await?)
}

/// A saved record with its JSON columns decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedAnalysis {
    pub record: SavedAnalysisRecord,
    pub sections: SectionSet,
    pub flags: Vec<RiskFlag>,
}

impl SavedAnalysis {
    /// Decode leniently: unreadable JSON columns become empty sections or flags.
    #[must_use]
    pub fn from_record(record: SavedAnalysisRecord) -> Self {
        let sections = serde_json::from_str::<serde_json::Value>(&record.sections_json)
            .map(|v| SectionSet::from_value(&v))
            .unwrap_or_default();
        let flags = serde_json::from_str::<serde_json::Value>(&record.flags_json)
            .map(normalize_flags)
            .unwrap_or_default();
        Self {
            record,
            sections,
            flags,
        }
    }
}

/// Load one saved analysis by ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn load_analysis(
    store: &SqliteStore,
    id: AnalysisId,
) -> Result<Option<SavedAnalysis>, CoreError> {
    Ok(store
        .load_analysis(id)
        .await?
        .map(SavedAnalysis::from_record))
}

//! SQLite-backed persistence of saved analyses and contract document ingestion.

pub mod document;
pub mod error;
pub mod sqlite;
pub mod types;

pub use error::MemoryError;
pub use sqlite::SqliteStore;
pub use types::{AnalysisId, AnalysisSummaryRow, NewAnalysis, SavedAnalysisRecord};

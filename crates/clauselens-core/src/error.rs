use clauselens_llm::LlmError;
use clauselens_memory::MemoryError;
use clauselens_memory::document::DocumentError;

use crate::analysis::AnalysisError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("clause text is empty")]
    EmptyClause,

    #[error("no document loaded")]
    NoDocument,

    #[error("no text could be extracted from {0}")]
    EmptyDocument(String),

    #[error("{0} is an image; OCR is not available, upload a PDF, DOCX or TXT instead")]
    UnsupportedDocument(String),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Memory(#[from] MemoryError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub mod error;
pub mod ingest;
pub mod loader;
pub mod splitter;
pub mod types;

pub use error::DocumentError;
pub use ingest::{ingest, ingest_path};
pub use loader::TextLoader;
pub use splitter::{DEFAULT_CHUNK_MAX_CHARS, chunk_text};
pub use types::{Document, SourceKind, file_signature};

#[cfg(feature = "docx")]
pub use loader::DocxLoader;
#[cfg(feature = "pdf")]
pub use loader::PdfLoader;

/// Default maximum file size: 50 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Format-specific text extractor.
pub trait DocumentLoader: Send + Sync {
    /// Extract plain text from the raw file bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid document of this format.
    fn extract(&self, bytes: &[u8]) -> Result<String, DocumentError>;

    fn source_kind(&self) -> SourceKind;
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a document's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    Pdf,
    Docx,
    Txt,
    Raw,
    /// An image upload. No text is produced because OCR is not available.
    ImageUnsupported,
}

impl SourceKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Txt => "txt",
            Self::Raw => "raw",
            Self::ImageUnsupported => "image-unsupported",
        }
    }

    #[must_use]
    pub fn is_supported(self) -> bool {
        !matches!(self, Self::ImageUnsupported)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extracted contract text. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    text: String,
    signature: String,
    file_name: String,
    source: SourceKind,
}

impl Document {
    #[must_use]
    pub fn new(text: String, signature: String, file_name: String, source: SourceKind) -> Self {
        Self {
            text,
            signature,
            file_name,
            source,
        }
    }

    /// Build a document from pasted text. Surrounding whitespace is trimmed and the
    /// signature is computed over the trimmed UTF-8 bytes.
    #[must_use]
    pub fn from_pasted(text: &str) -> Self {
        let text = text.trim().to_owned();
        let signature = file_signature(text.as_bytes());
        Self {
            text,
            signature,
            file_name: "pasted_text.txt".into(),
            source: SourceKind::Raw,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn source(&self) -> SourceKind {
        self.source
    }

    #[must_use]
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Short content hash used for dedup and display: the first 16 hex chars of BLAKE3.
#[must_use]
pub fn file_signature(bytes: &[u8]) -> String {
    let hash = blake3::hash(bytes);
    hash.to_hex()[..16].to_owned()
}

use super::super::{DocumentError, DocumentLoader, SourceKind};

/// Plain-text extraction. Invalid UTF-8 sequences are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextLoader;

impl DocumentLoader for TextLoader {
    fn extract(&self, bytes: &[u8]) -> Result<String, DocumentError> {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        let text = String::from_utf8_lossy(bytes);
        Ok(text.chars().filter(|c| *c != char::REPLACEMENT_CHARACTER).collect())
    }

    fn source_kind(&self) -> SourceKind {
        SourceKind::Txt
    }
}

use super::super::{DocumentError, DocumentLoader, SourceKind};

#[derive(Debug, Default, Clone, Copy)]
pub struct PdfLoader;

impl DocumentLoader for PdfLoader {
    /// Blocking: run inside `spawn_blocking` when called from async code.
    fn extract(&self, bytes: &[u8]) -> Result<String, DocumentError> {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| DocumentError::Pdf(e.to_string()))
    }

    fn source_kind(&self) -> SourceKind {
        SourceKind::Pdf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_a_pdf_error() {
        let err = PdfLoader.extract(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, DocumentError::Pdf(_)));
    }
}

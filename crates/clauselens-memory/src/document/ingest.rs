use std::path::Path;

use super::{
    DEFAULT_MAX_FILE_SIZE, Document, DocumentError, DocumentLoader, SourceKind, TextLoader,
    file_signature,
};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp", "tif", "tiff"];

/// Turn an uploaded file into a [`Document`].
///
/// The format is chosen by the lowercase file extension: `pdf`, `docx`, `txt`. Image
/// uploads (by extension or magic bytes) yield an empty [`SourceKind::ImageUnsupported`]
/// document. Anything else is decoded as text with source kind `raw`.
///
/// The signature is computed over the original file bytes. PDF extraction is blocking.
///
/// # Errors
///
/// Returns an error if the file exceeds [`DEFAULT_MAX_FILE_SIZE`], if the format support
/// was not compiled in, or if the document is malformed.
pub fn ingest(file_name: &str, bytes: &[u8]) -> Result<Document, DocumentError> {
    let len = bytes.len() as u64;
    if len > DEFAULT_MAX_FILE_SIZE {
        return Err(DocumentError::FileTooLarge(len));
    }

    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let (text, source) = match ext.as_str() {
        "pdf" => extract_pdf(bytes)?,
        "docx" => extract_docx(bytes)?,
        "txt" => (TextLoader.extract(bytes)?, SourceKind::Txt),
        e if IMAGE_EXTENSIONS.contains(&e) || looks_like_image(bytes) => {
            tracing::info!(file_name, "image upload, OCR not available");
            (String::new(), SourceKind::ImageUnsupported)
        }
        _ => (TextLoader.extract(bytes)?, SourceKind::Raw),
    };

    tracing::debug!(file_name, source = %source, chars = text.len(), "ingested document");
    Ok(Document::new(
        text,
        file_signature(bytes),
        file_name.to_owned(),
        source,
    ))
}

/// Read a file from disk and [`ingest`] it.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is too large, or cannot be extracted.
pub async fn ingest_path(path: &Path) -> Result<Document, DocumentError> {
    let meta = tokio::fs::metadata(path).await?;
    if meta.len() > DEFAULT_MAX_FILE_SIZE {
        return Err(DocumentError::FileTooLarge(meta.len()));
    }

    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document")
        .to_owned();

    tokio::task::spawn_blocking(move || ingest(&file_name, &bytes))
        .await
        .map_err(|e| DocumentError::Io(std::io::Error::other(e)))?
}

#[cfg(feature = "pdf")]
fn extract_pdf(bytes: &[u8]) -> Result<(String, SourceKind), DocumentError> {
    let loader = super::PdfLoader;
    Ok((loader.extract(bytes)?, loader.source_kind()))
}

#[cfg(not(feature = "pdf"))]
fn extract_pdf(_bytes: &[u8]) -> Result<(String, SourceKind), DocumentError> {
    Err(DocumentError::UnsupportedFormat(
        "pdf support not enabled (build with feature `pdf`)".into(),
    ))
}

#[cfg(feature = "docx")]
fn extract_docx(bytes: &[u8]) -> Result<(String, SourceKind), DocumentError> {
    let loader = super::DocxLoader;
    Ok((loader.extract(bytes)?, loader.source_kind()))
}

#[cfg(not(feature = "docx"))]
fn extract_docx(_bytes: &[u8]) -> Result<(String, SourceKind), DocumentError> {
    Err(DocumentError::UnsupportedFormat(
        "docx support not enabled (build with feature `docx`)".into(),
    ))
}

fn looks_like_image(bytes: &[u8]) -> bool {
    bytes.starts_with(b"\x89PNG\r\n\x1a\n")
        || bytes.starts_with(b"\xFF\xD8\xFF")
        || bytes.starts_with(b"GIF87a")
        || bytes.starts_with(b"GIF89a")
        || (bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP")
        || bytes.starts_with(b"II*\0")
        || bytes.starts_with(b"MM\0*")
}

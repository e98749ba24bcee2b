mod text;
pub use text::TextLoader;

#[cfg(feature = "pdf")]
mod pdf;
#[cfg(feature = "pdf")]
pub use pdf::PdfLoader;

#[cfg(feature = "docx")]
mod docx;
#[cfg(feature = "docx")]
pub use docx::DocxLoader;

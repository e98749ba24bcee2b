use std::io::{Cursor, Read};
use std::sync::LazyLock;

use regex::Regex;

use super::super::{DocumentError, DocumentLoader, SourceKind};

static RUN_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>|<w:tab/>|<w:br/>")
        .expect("docx run regex is valid")
});

/// Word document extraction: one line per paragraph of `word/document.xml`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxLoader;

impl DocumentLoader for DocxLoader {
    fn extract(&self, bytes: &[u8]) -> Result<String, DocumentError> {
        let mut archive =
            zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| DocumentError::Docx(e.to_string()))?;
        let mut entry = archive
            .by_name("word/document.xml")
            .map_err(|e| DocumentError::Docx(e.to_string()))?;
        let mut xml = String::new();
        entry.read_to_string(&mut xml)?;
        Ok(paragraphs_text(&xml))
    }

    fn source_kind(&self) -> SourceKind {
        SourceKind::Docx
    }
}

fn paragraphs_text(xml: &str) -> String {
    let mut lines = Vec::new();
    for para in xml.split("</w:p>") {
        let mut line = String::new();
        for cap in RUN_TEXT.captures_iter(para) {
            match cap.get(1) {
                Some(text) => line.push_str(&unescape_xml(text.as_str())),
                None if cap[0].starts_with("<w:tab") => line.push('\t'),
                None => line.push('\n'),
            }
        }
        if para.contains("<w:p") {
            lines.push(line);
        }
    }
    lines.join("\n")
}

fn unescape_xml(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Default chunk size in characters.
pub const DEFAULT_CHUNK_MAX_CHARS: usize = 4000;

/// Split text into paragraph-aligned chunks of roughly `max_chars` characters.
///
/// Paragraphs are separated by blank lines and greedily packed, joined by `"\n\n"`.
/// A single paragraph longer than `max_chars` becomes its own oversized chunk.
/// If no paragraph is found, the text is cut into fixed windows instead.
#[must_use]
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut cur = String::new();
    let mut cur_len = 0usize;

    for para in paragraphs(text.trim()) {
        let para_len = para.chars().count();
        if cur_len + para_len + 2 <= max_chars {
            if !cur.is_empty() {
                cur.push_str("\n\n");
                cur_len += 2;
            }
            cur.push_str(&para);
            cur_len += para_len;
        } else {
            if !cur.is_empty() {
                chunks.push(std::mem::take(&mut cur));
            }
            cur = para;
            cur_len = para_len;
        }
    }
    if !cur.is_empty() {
        chunks.push(cur);
    }

    if chunks.is_empty() {
        let chars: Vec<char> = text.chars().collect();
        chunks = chars
            .chunks(max_chars)
            .map(|w| w.iter().collect())
            .collect();
    }
    chunks
}

fn paragraphs(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut lines: Vec<&str> = Vec::new();
    for line in text.split('\n') {
        if line.trim().is_empty() {
            if !lines.is_empty() {
                out.push(lines.join("\n"));
                lines.clear();
            }
        } else {
            lines.push(line);
        }
    }
    if !lines.is_empty() {
        out.push(lines.join("\n"));
    }
    out
}

use regex::RegexBuilder;

/// Escape text for inclusion in HTML element content or attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap every case-insensitive occurrence of `query` in a highlight span.
///
/// The query is matched literally. A blank query returns the text unchanged.
#[must_use]
pub fn highlight_terms(text: &str, query: &str) -> String {
    if query.trim().is_empty() {
        return text.to_owned();
    }
    let Ok(re) = RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    else {
        return text.to_owned();
    };
    re.replace_all(text, "<span class='highlight'>${0}</span>")
        .into_owned()
}

/// Terminal variant of [`highlight_terms`]: matches are wrapped in ANSI reverse video.
#[must_use]
pub fn highlight_terms_ansi(text: &str, query: &str) -> String {
    if query.trim().is_empty() {
        return text.to_owned();
    }
    let Ok(re) = RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    else {
        return text.to_owned();
    };
    re.replace_all(text, "\x1b[7m${0}\x1b[0m").into_owned()
}

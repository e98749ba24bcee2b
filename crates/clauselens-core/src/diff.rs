//! Word-level inline diff between an original clause and its rewrite.

use similar::{ChangeTag, TextDiff};

use crate::text::escape_html;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffSegment {
    Equal(String),
    Insert(String),
    Delete(String),
}

/// Diff two texts word by word. Consecutive words with the same tag are merged into
/// one segment; a replacement shows up as a delete followed by an insert.
#[must_use]
pub fn inline_diff(old: &str, new: &str) -> Vec<DiffSegment> {
    let old_words: Vec<&str> = old.split_whitespace().collect();
    let new_words: Vec<&str> = new.split_whitespace().collect();
    let diff = TextDiff::from_slices(&old_words, &new_words);

    let mut segments: Vec<DiffSegment> = Vec::new();
    for change in diff.iter_all_changes() {
        let word = change.value();
        if let Some(last) = segments.last_mut()
            && last.tag() == change.tag()
        {
            last.push_word(word);
        } else {
            segments.push(DiffSegment::new(change.tag(), word));
        }
    }
    segments
}

impl DiffSegment {
    fn new(tag: ChangeTag, word: &str) -> Self {
        match tag {
            ChangeTag::Equal => Self::Equal(word.to_owned()),
            ChangeTag::Insert => Self::Insert(word.to_owned()),
            ChangeTag::Delete => Self::Delete(word.to_owned()),
        }
    }

    fn tag(&self) -> ChangeTag {
        match self {
            Self::Equal(_) => ChangeTag::Equal,
            Self::Insert(_) => ChangeTag::Insert,
            Self::Delete(_) => ChangeTag::Delete,
        }
    }

    fn push_word(&mut self, word: &str) {
        let (Self::Equal(s) | Self::Insert(s) | Self::Delete(s)) = self;
        s.push(' ');
        s.push_str(word);
    }

    #[must_use]
    pub fn text(&self) -> &str {
        let (Self::Equal(s) | Self::Insert(s) | Self::Delete(s)) = self;
        s
    }
}

/// Render segments as escaped HTML with `<ins>` and `<del>` markup.
#[must_use]
pub fn render_inline_diff_html(segments: &[DiffSegment]) -> String {
    segments
        .iter()
        .map(|seg| match seg {
            DiffSegment::Equal(s) => escape_html(s),
            DiffSegment::Insert(s) => format!("<ins>{}</ins>", escape_html(s)),
            DiffSegment::Delete(s) => format!("<del>{}</del>", escape_html(s)),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Plain-text rendering: `[-removed-]` and `{+added+}`.
#[must_use]
pub fn render_inline_diff_text(segments: &[DiffSegment]) -> String {
    segments
        .iter()
        .map(|seg| match seg {
            DiffSegment::Equal(s) => s.clone(),
            DiffSegment::Insert(s) => format!("{{+{s}+}}"),
            DiffSegment::Delete(s) => format!("[-{s}-]"),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

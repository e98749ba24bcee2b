//! Plain-text rendering of analyses and rewrites for the terminal.

use std::fmt::Write as _;

use chrono::{DateTime, Local};
use clauselens_core::assistant::RewriteOutcome;
use clauselens_core::diff::render_inline_diff_text;
use clauselens_core::history::SavedAnalysis;
use clauselens_core::text::highlight_terms_ansi;
use clauselens_core::{AnalysisResult, RiskFlag, SectionSet, SeverityCounts};
use clauselens_memory::AnalysisSummaryRow;
use clauselens_memory::document::{Document, chunk_text};

const BAR_WIDTH: u32 = 20;

pub(crate) fn format_timestamp(epoch_secs: i64) -> String {
    DateTime::from_timestamp(epoch_secs, 0).map_or_else(
        || epoch_secs.to_string(),
        |dt| {
            dt.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        },
    )
}

/// Document text in parts of at most `max_chars`, optionally highlighting `term`.
pub(crate) fn document_text(document: &Document, max_chars: usize, term: Option<&str>) -> String {
    let chunks = chunk_text(document.text(), max_chars);
    let total = chunks.len();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({}, {} chars, sig {})",
        document.file_name(),
        document.source(),
        document.char_count(),
        document.signature()
    );
    for (i, chunk) in chunks.iter().enumerate() {
        let _ = writeln!(out, "--- part {}/{total} ---", i + 1);
        match term {
            Some(t) => out.push_str(&highlight_terms_ansi(chunk, t)),
            None => out.push_str(chunk),
        }
        out.push('\n');
    }
    out
}

fn sections(out: &mut String, sections: &SectionSet) {
    out.push_str("== Sections ==\n");
    if sections.is_empty() {
        out.push_str("(none)\n");
        return;
    }
    for (label, value) in sections.labelled_fields() {
        let _ = writeln!(out, "{label}: {value}");
    }
    for clause in &sections.other_key_clauses {
        let _ = writeln!(out, "- {clause}");
    }
}

fn flags(out: &mut String, flags: &[RiskFlag], document_text: Option<&str>) {
    let counts = SeverityCounts::from_flags(flags);
    let _ = writeln!(
        out,
        "== Risk flags == High: {}  Medium: {}  Low: {}",
        counts.high, counts.medium, counts.low
    );
    if flags.is_empty() {
        out.push_str("No major red flags found.\n");
        return;
    }
    for flag in flags {
        let _ = writeln!(
            out,
            "[{}] {} ({})",
            flag.severity.as_str().to_uppercase(),
            flag.flag,
            flag.location
        );
        if !flag.quote.is_empty() {
            let _ = write!(out, "    quote: \"{}\"", flag.quote);
            if document_text.is_some_and(|text| !flag.quote_in(text)) {
                out.push_str(" (quote not found in document)");
            }
            out.push('\n');
        }
        if !flag.why.is_empty() {
            let _ = writeln!(out, "    why: {}", flag.why);
        }
        if !flag.suggested_fix.is_empty() {
            let _ = writeln!(out, "    fix: {}", flag.suggested_fix);
        }
    }
}

fn axes(out: &mut String, result: &AnalysisResult) {
    let scores = result.risk_axes();
    let max = scores.max().max(1);
    out.push_str("== Risk axes ==\n");
    for (axis, score) in scores.iter() {
        let filled = score * BAR_WIDTH / max;
        let bar: String = (0..BAR_WIDTH)
            .map(|i| if i < filled { '#' } else { '.' })
            .collect();
        let _ = writeln!(out, "{:<12} {bar} {score}", axis.as_str());
    }
}

/// Full text view of an analysis. Quotes are checked when `document_text` is given.
pub(crate) fn analysis(result: &AnalysisResult, document_text: Option<&str>) -> String {
    let mut out = String::new();
    sections(&mut out, &result.sections);
    out.push('\n');
    flags(&mut out, &result.flags, document_text);
    out.push('\n');
    axes(&mut out, result);
    out.push_str("\n== Summary ==\n");
    out.push_str(if result.summary.is_empty() {
        "(none)"
    } else {
        &result.summary
    });
    out.push('\n');
    if !result.graph.is_empty() {
        out.push_str("\n== Relationship graph (DOT) ==\n");
        out.push_str(&result.graph);
        out.push('\n');
    }
    out
}

pub(crate) fn rewrite(outcome: &RewriteOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== Original ==\n{}\n", outcome.original);
    let _ = writeln!(out, "== Safer rewrite ==\n{}", outcome.rewrite.improved_clause);
    if !outcome.rewrite.one_line_rationale.is_empty() {
        let _ = writeln!(out, "Why: {}", outcome.rewrite.one_line_rationale);
    }
    let _ = writeln!(out, "\n== Changes ==\n{}", render_inline_diff_text(&outcome.diff));
    let _ = writeln!(out, "\n== Negotiation script ==\n{}", outcome.negotiation_script);
    out
}

pub(crate) fn history(rows: &[AnalysisSummaryRow]) -> String {
    if rows.is_empty() {
        return "No saved analyses.\n".into();
    }
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(
            out,
            "#{:<5} {}  {}  [{} / {}]",
            row.id,
            format_timestamp(row.created_at),
            row.file_name,
            row.persona,
            row.lang
        );
    }
    out
}

pub(crate) fn saved(saved: &SavedAnalysis) -> String {
    let record = &saved.record;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "#{} {}  {}  [{} / {}]  sig {}\n",
        record.id,
        format_timestamp(record.created_at),
        record.file_name,
        record.persona,
        record.lang,
        record.doc_sig
    );
    sections(&mut out, &saved.sections);
    out.push('\n');
    flags(&mut out, &saved.flags, None);
    out.push_str("\n== Summary ==\n");
    out.push_str(&record.summary);
    out.push('\n');
    out
}

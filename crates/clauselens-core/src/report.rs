//! Self-contained HTML export of an analysis.

use std::fmt::Write as _;

use crate::analysis::AnalysisResult;
use crate::text::escape_html;

const STYLE: &str = "body{background:#000;color:#fff;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,Helvetica,Arial,sans-serif;padding:20px}\
.codebox{background:#0b0b0b;border:1px solid rgba(255,255,255,0.08);padding:12px;border-radius:14px;white-space:pre-wrap}\
.chip{display:inline-block;margin:4px 6px;padding:4px 8px;border-radius:999px;border:1px solid rgba(255,255,255,0.12)}\
.chip.high{border-color:#ff4d4f}.chip.medium{border-color:#faad14}.chip.low{border-color:#52c41a}\
.badges{display:flex;gap:.5rem;flex-wrap:wrap;margin:.25rem 0 1rem}\
.badge{border:1px solid rgba(255,255,255,.12);border-radius:999px;padding:.35rem .7rem;background:#0c0c0c;font-weight:600}\
table.axes td{padding:2px 12px 2px 0}.unverified{color:#faad14;font-size:.9em}.footer{color:#a1a1a1}";

/// File name of the exported report for a given document.
#[must_use]
pub fn report_file_name(file_name: &str) -> String {
    format!("{file_name}_clauselens_report.html")
}

/// Render `result` as a standalone HTML page.
///
/// Returns `None` when there is nothing to export (no sections and no summary). When
/// `document_text` is given, flag quotes that cannot be found in it are marked.
#[must_use]
pub fn render_report(
    file_name: &str,
    result: &AnalysisResult,
    document_text: Option<&str>,
) -> Option<String> {
    if result.sections.is_empty() && result.summary.trim().is_empty() {
        return None;
    }

    let mut html = String::with_capacity(4096);
    let _ = write!(
        html,
        "<!DOCTYPE html><html><head><meta charset='utf-8'><title>ClauseLens Report</title><style>{STYLE}</style></head><body>"
    );
    let _ = write!(
        html,
        "<h1>ClauseLens Report \u{2014} {}</h1>",
        escape_html(file_name)
    );

    if !result.flags.is_empty() {
        let counts = result.severity_counts();
        let _ = write!(
            html,
            "<div class='badges'><span class='badge'>High: {}</span><span class='badge'>Med: {}</span><span class='badge'>Low: {}</span></div>",
            counts.high, counts.medium, counts.low
        );
    }

    if !result.summary.trim().is_empty() {
        html.push_str("<h2>Plain-Language Summary</h2>");
        let _ = write!(
            html,
            "<div class='codebox'>{}</div>",
            escape_html(&result.summary)
        );
    }

    if !result.flags.is_empty() {
        html.push_str("<h2>Risk Flags</h2><div>");
        for flag in &result.flags {
            let _ = write!(
                html,
                "<div class='chip {sev}'>{} \u{2014} {sev}</div>",
                escape_html(&flag.flag),
                sev = flag.severity
            );
        }
        html.push_str("</div>");

        html.push_str("<h2>Risk Axes</h2><table class='axes'>");
        for (axis, score) in result.risk_axes().iter() {
            let _ = write!(html, "<tr><td>{axis}</td><td>{score}</td></tr>");
        }
        html.push_str("</table>");

        for flag in &result.flags {
            html.push_str("<hr/>");
            let title = if flag.flag.is_empty() {
                "(flag)"
            } else {
                flag.flag.as_str()
            };
            let _ = write!(html, "<h3>{}</h3>", escape_html(title));
            let _ = write!(
                html,
                "<p><b>Where:</b> {}</p>",
                escape_html(&flag.location)
            );
            let _ = write!(html, "<p><b>Why:</b> {}</p>", escape_html(&flag.why));
            if !flag.quote.is_empty() {
                let _ = write!(
                    html,
                    "<div class='codebox'>{}</div>",
                    escape_html(&flag.quote)
                );
                if document_text.is_some_and(|text| !flag.quote_in(text)) {
                    html.push_str("<p class='unverified'>(quote not found in document)</p>");
                }
            }
            if !flag.suggested_fix.is_empty() {
                let _ = write!(
                    html,
                    "<p><b>Suggested Fix:</b> {}</p>",
                    escape_html(&flag.suggested_fix)
                );
            }
        }
    }

    if !result.sections.is_empty() {
        html.push_str("<h2>Extracted Sections (JSON)</h2>");
        let pretty = serde_json::to_string_pretty(&result.sections).unwrap_or_default();
        let _ = write!(
            html,
            "<div class='codebox'><pre>{}</pre></div>",
            escape_html(&pretty)
        );
    }

    html.push_str(
        "<p class='footer'>Generated by ClauseLens. Informational only, not legal advice.</p></body></html>",
    );
    Some(html)
}

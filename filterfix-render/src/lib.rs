//! Rendering helpers for lint reports.

use anyhow::Context;
use filterfix_types::{LintMessage, LintReport, LintResult};

/// ESLint "stylish" style listing: one block per file with messages, then a summary.
///
/// Clean reports render as an empty string.
pub fn render_stylish(report: &LintReport) -> String {
    let mut out = String::new();
    for result in report.iter().filter(|r| !r.messages.is_empty()) {
        render_file(&mut out, result);
    }
    if let Some(summary) = render_summary(report) {
        out.push_str(&summary);
    }
    out
}

fn render_file(out: &mut String, result: &LintResult) {
    out.push_str(&format!("{}\n", result.file_path));

    let rows: Vec<[String; 4]> = result.messages.iter().map(row).collect();
    let width = |i: usize| rows.iter().map(|r| r[i].chars().count()).max().unwrap_or(0);
    let (loc_w, sev_w, msg_w) = (width(0), width(1), width(2));

    for [loc, sev, msg, rule] in &rows {
        let line = format!("  {loc:>loc_w$}  {sev:<sev_w$}  {msg:<msg_w$}  {rule}");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out.push('\n');
}

fn row(m: &LintMessage) -> [String; 4] {
    let loc = format!("{}:{}", m.line.unwrap_or(0), m.column.unwrap_or(0));
    [
        loc,
        m.severity.label().to_string(),
        m.message.strip_suffix('.').unwrap_or(&m.message).to_string(),
        m.rule().unwrap_or("").to_string(),
    ]
}

/// Totals block, `None` when the report has no problems.
pub fn render_summary(report: &LintReport) -> Option<String> {
    let errors = report.error_count();
    let warnings = report.warning_count();
    let total = errors + warnings;
    if total == 0 {
        return None;
    }

    let mut out = format!(
        "\u{2716} {} ({}, {})\n",
        plural(total, "problem"),
        plural(errors, "error"),
        plural(warnings, "warning"),
    );

    let fixable_errors = report.fixable_error_count();
    let fixable_warnings = report.fixable_warning_count();
    if fixable_errors + fixable_warnings > 0 {
        out.push_str(&format!(
            "  {} and {} potentially fixable with filterfix.\n",
            plural(fixable_errors, "error"),
            plural(fixable_warnings, "warning"),
        ));
    }
    Some(out)
}

/// The report as ESLint-shaped JSON, pretty printed.
pub fn render_json(report: &LintReport) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(report).context("serialize lint report")?;
    json.push('\n');
    Ok(json)
}

fn plural(n: u64, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

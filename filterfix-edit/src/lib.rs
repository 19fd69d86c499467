//! Fix application for filterfix.
//!
//! Responsibilities:
//! - Apply the engine-proposed fixes a [`FixDecision`] allows to the text they were computed for.
//! - Skip fixes that overlap an already applied fix, leaving their messages in place.
//! - Translate the engine's UTF-16 ranges into byte offsets.
//!
//! Writing the result to disk is not done here; see `filterfix-core`.

mod error;

pub use error::{EditError, EditResult};

use filterfix_domain::FixDecision;
use filterfix_types::{Fix, LintMessage, LintResult};
use tracing::debug;

const BOM: &str = "\u{feff}";

/// Outcome of [`apply_fixes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    /// New text, `None` when no applied fix changed anything.
    pub output: Option<String>,
    /// Messages whose fix was not applied (including unfixable ones), in input order.
    pub remaining: Vec<LintMessage>,
    /// Number of fixes applied.
    pub applied: usize,
}

impl FixOutcome {
    pub fn changed(&self) -> bool {
        self.output.is_some()
    }
}

/// Apply every allowed fix in `messages` to `source`.
///
/// Fixes are taken in range order. A fix whose start does not lie strictly after the end of the
/// previously applied fix, or whose range is reversed, is skipped and its message kept. Offsets
/// are UTF-16 code units measured after a leading byte order mark, which is preserved unless a
/// fix addresses it: a range starting below zero and ending at or after zero drops the mark, and
/// a fix at offset zero whose text starts with the mark sets it.
pub fn apply_fixes(
    source: &str,
    messages: &[LintMessage],
    decision: &FixDecision,
) -> EditResult<FixOutcome> {
    let (mut bom, text) = match source.strip_prefix(BOM) {
        Some(rest) => (BOM, rest),
        None => ("", source),
    };

    let mut candidates: Vec<(usize, &Fix)> = messages
        .iter()
        .enumerate()
        .filter(|(_, m)| decision.allows(m))
        .filter_map(|(i, m)| m.fix.as_ref().map(|f| (i, f)))
        .collect();
    // Stable: ties keep message order.
    candidates.sort_by_key(|(_, f)| (f.start(), f.end()));

    let len = utf16_len(text);
    let mut applied = vec![false; messages.len()];
    let mut out = String::with_capacity(text.len());
    let mut cursor = OffsetCursor::new(text);
    let mut copied_to = 0usize;
    let mut last_end: Option<i64> = None;

    for (idx, fix) in candidates {
        let (start, end) = (fix.start(), fix.end());
        if start > end || last_end.is_some_and(|last| last >= start) {
            debug!(
                rule = messages[idx].rule().unwrap_or("-"),
                start, end, "skipping overlapping fix"
            );
            continue;
        }
        if end > len as i64 {
            return Err(EditError::OutOfBounds { start, end, len });
        }

        let mut replacement = fix.text.as_str();
        if start < 0 && end >= 0 {
            bom = "";
        } else if start == 0
            && let Some(rest) = replacement.strip_prefix(BOM)
        {
            bom = BOM;
            replacement = rest;
        }

        let start_byte = cursor.seek(start.max(0) as usize)?;
        let end_byte = cursor.seek(end.max(0) as usize)?;
        out.push_str(&text[copied_to..start_byte]);
        out.push_str(replacement);
        copied_to = end_byte;
        last_end = Some(end);
        applied[idx] = true;
    }
    out.push_str(&text[copied_to..]);

    let applied_count = applied.iter().filter(|a| **a).count();
    let remaining = messages
        .iter()
        .zip(&applied)
        .filter(|(_, a)| !**a)
        .map(|(m, _)| m.clone())
        .collect();

    let fixed = format!("{bom}{out}");
    let output = if applied_count > 0 && fixed != source {
        Some(fixed)
    } else {
        None
    };

    Ok(FixOutcome {
        output,
        remaining,
        applied: applied_count,
    })
}

/// Apply allowed fixes to `result`, whose messages were computed for `source`.
///
/// On success `result` holds the fixed text in `output` (when changed), keeps only the messages
/// that were not fixed, and has its counts recomputed. Returns the number of applied fixes.
///
/// An `output` from an earlier round is kept when this round's fixes leave `source` unchanged.
pub fn apply_to_result(
    result: &mut LintResult,
    source: &str,
    decision: &FixDecision,
) -> EditResult<usize> {
    let outcome = apply_fixes(source, &result.messages, decision)?;
    if outcome.applied == 0 {
        return Ok(0);
    }
    result.messages = outcome.remaining;
    if let Some(output) = outcome.output {
        result.output = Some(output);
    }
    result.source = None;
    result.recount();
    Ok(outcome.applied)
}

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Forward-only UTF-16 to byte offset translation.
struct OffsetCursor<'a> {
    text: &'a str,
    byte: usize,
    unit: usize,
}

impl<'a> OffsetCursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            byte: 0,
            unit: 0,
        }
    }

    fn seek(&mut self, target: usize) -> EditResult<usize> {
        let text = self.text;
        let mut chars = text[self.byte..].chars();
        while self.unit < target {
            let Some(c) = chars.next() else {
                return Err(EditError::OutOfBounds {
                    start: target as i64,
                    end: target as i64,
                    len: self.unit,
                });
            };
            if self.unit + c.len_utf16() > target {
                return Err(EditError::SplitsCharacter { offset: target });
            }
            self.unit += c.len_utf16();
            self.byte += c.len_utf8();
        }
        Ok(self.byte)
    }
}

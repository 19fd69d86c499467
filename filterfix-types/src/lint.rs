use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Identifier of the rule that produced a message, e.g. `"semi"`.
///
/// The rule registry belongs to the lint engine and is open-ended, so this is
/// an opaque string. Clones share the same allocation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct RuleId(Arc<str>);

impl RuleId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RuleId {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

impl From<&str> for RuleId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<RuleId> for String {
    fn from(id: RuleId) -> Self {
        id.0.to_string()
    }
}

impl Borrow<str> for RuleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RuleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Message severity. Serialized as ESLint's numeric levels (1 = warning, 2 = error).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    pub fn is_error(self) -> bool {
        matches!(self, Severity::Error)
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl TryFrom<u8> for Severity {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, String> {
        match level {
            1 => Ok(Severity::Warning),
            2 => Ok(Severity::Error),
            other => Err(format!("invalid severity level {other} (expected 1 or 2)")),
        }
    }
}

impl From<Severity> for u8 {
    fn from(s: Severity) -> Self {
        match s {
            Severity::Warning => 1,
            Severity::Error => 2,
        }
    }
}

/// An engine-proposed text edit.
///
/// `range` is a half-open `[start, end)` interval in UTF-16 code units of the
/// file text (without a leading byte order mark), matching what ESLint emits.
/// A negative start addresses the byte order mark itself: `[-1, 0]` removes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fix {
    pub range: [i64; 2],
    pub text: String,
}

impl Fix {
    pub fn new(start: i64, end: i64, text: impl Into<String>) -> Self {
        Self {
            range: [start, end],
            text: text.into(),
        }
    }

    /// Pure insertion at `offset`.
    pub fn insert(offset: i64, text: impl Into<String>) -> Self {
        Self::new(offset, offset, text)
    }

    /// The `unicode-bom` "never" fix.
    pub fn remove_bom() -> Self {
        Self::new(-1, 0, "")
    }

    pub fn start(&self) -> i64 {
        self.range[0]
    }

    pub fn end(&self) -> i64 {
        self.range[1]
    }
}

/// One reported issue for one location in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintMessage {
    /// Absent for parse errors and other fatal engine failures.
    #[serde(default)]
    pub rule_id: Option<RuleId>,

    pub severity: Severity,

    #[serde(default)]
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_column: Option<u32>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fatal: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,
}

impl LintMessage {
    pub fn new(rule_id: impl Into<RuleId>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            rule_id: Some(rule_id.into()),
            severity,
            message: message.into(),
            line: None,
            column: None,
            end_line: None,
            end_column: None,
            fatal: false,
            fix: None,
        }
    }

    /// A fatal (parse-error style) message: error severity, no rule id.
    pub fn fatal(message: impl Into<String>) -> Self {
        Self {
            rule_id: None,
            severity: Severity::Error,
            message: message.into(),
            line: None,
            column: None,
            end_line: None,
            end_column: None,
            fatal: true,
            fix: None,
        }
    }

    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fix = Some(fix);
        self
    }

    pub fn rule(&self) -> Option<&str> {
        self.rule_id.as_ref().map(RuleId::as_str)
    }

    pub fn is_fixable(&self) -> bool {
        self.fix.is_some()
    }
}

/// Lint outcome for a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintResult {
    pub file_path: Utf8PathBuf,

    #[serde(default)]
    pub messages: Vec<LintMessage>,

    #[serde(default)]
    pub error_count: u64,

    #[serde(default)]
    pub fatal_error_count: u64,

    #[serde(default)]
    pub warning_count: u64,

    #[serde(default)]
    pub fixable_error_count: u64,

    #[serde(default)]
    pub fixable_warning_count: u64,

    /// Fixed file text, present only when at least one fix changed the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Original file text, as some engines include it for files with messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl LintResult {
    /// Build a result and derive its counts from `messages`.
    pub fn new(file_path: impl Into<Utf8PathBuf>, messages: Vec<LintMessage>) -> Self {
        let mut result = Self {
            file_path: file_path.into(),
            messages,
            error_count: 0,
            fatal_error_count: 0,
            warning_count: 0,
            fixable_error_count: 0,
            fixable_warning_count: 0,
            output: None,
            source: None,
        };
        result.recount();
        result
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn path(&self) -> &Utf8Path {
        &self.file_path
    }

    /// Recompute every counter from `messages`.
    pub fn recount(&mut self) {
        self.error_count = 0;
        self.fatal_error_count = 0;
        self.warning_count = 0;
        self.fixable_error_count = 0;
        self.fixable_warning_count = 0;

        for m in &self.messages {
            match m.severity {
                Severity::Error => {
                    self.error_count += 1;
                    if m.fatal {
                        self.fatal_error_count += 1;
                    }
                    if m.is_fixable() {
                        self.fixable_error_count += 1;
                    }
                }
                Severity::Warning => {
                    self.warning_count += 1;
                    if m.is_fixable() {
                        self.fixable_warning_count += 1;
                    }
                }
            }
        }
    }

    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }
}

/// Ordered per-file results of one lint pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LintReport {
    pub results: Vec<LintResult>,
}

impl LintReport {
    pub fn new(results: Vec<LintResult>) -> Self {
        Self { results }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LintResult> {
        self.results.iter()
    }

    pub fn error_count(&self) -> u64 {
        self.results.iter().map(|r| r.error_count).sum()
    }

    pub fn fatal_error_count(&self) -> u64 {
        self.results.iter().map(|r| r.fatal_error_count).sum()
    }

    pub fn warning_count(&self) -> u64 {
        self.results.iter().map(|r| r.warning_count).sum()
    }

    pub fn fixable_error_count(&self) -> u64 {
        self.results.iter().map(|r| r.fixable_error_count).sum()
    }

    pub fn fixable_warning_count(&self) -> u64 {
        self.results.iter().map(|r| r.fixable_warning_count).sum()
    }

    /// Results carrying fixed output, in report order.
    pub fn fixed(&self) -> impl Iterator<Item = &LintResult> {
        self.results.iter().filter(|r| r.has_output())
    }

    pub fn find(&self, path: &Utf8Path) -> Option<&LintResult> {
        self.results.iter().find(|r| r.file_path == path)
    }
}

impl FromIterator<LintResult> for LintReport {
    fn from_iter<I: IntoIterator<Item = LintResult>>(iter: I) -> Self {
        Self {
            results: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for LintReport {
    type Item = LintResult;
    type IntoIter = std::vec::IntoIter<LintResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a> IntoIterator for &'a LintReport {
    type Item = &'a LintResult;
    type IntoIter = std::slice::Iter<'a, LintResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

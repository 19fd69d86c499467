use filterfix_types::RuleId;
use serde::{Deserialize, Serialize};

/// Restricts which fixes may be written.
///
/// An empty `rules` list places no restriction by rule. `allow_warning_fixes = false` limits
/// fixing to error-severity messages regardless of rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixFilter {
    pub rules: Vec<RuleId>,

    #[serde(alias = "warnings")]
    pub allow_warning_fixes: bool,
}

impl Default for FixFilter {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            allow_warning_fixes: true,
        }
    }
}

impl FixFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only fix messages produced by these rules.
    pub fn rules<I, R>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RuleId>,
    {
        self.rules = rules.into_iter().map(Into::into).collect();
        self
    }

    pub fn allow_warning_fixes(mut self, allow: bool) -> Self {
        self.allow_warning_fixes = allow;
        self
    }

    /// Shorthand for `allow_warning_fixes(false)`.
    pub fn errors_only(self) -> Self {
        self.allow_warning_fixes(false)
    }
}

/// What the caller asked to fix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixSelector {
    /// Write every fix the engine proposes.
    AllowAll,
    /// Write nothing; the run only reports.
    AllowNone,
    Filtered(FixFilter),
}

impl From<bool> for FixSelector {
    fn from(fix_all: bool) -> Self {
        if fix_all {
            FixSelector::AllowAll
        } else {
            FixSelector::AllowNone
        }
    }
}

impl From<FixFilter> for FixSelector {
    fn from(filter: FixFilter) -> Self {
        FixSelector::Filtered(filter)
    }
}

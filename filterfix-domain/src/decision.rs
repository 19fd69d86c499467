use crate::selector::{FixFilter, FixSelector};
use filterfix_types::{LintMessage, RuleId};
use std::collections::BTreeSet;
use tracing::debug;

/// Compiled fix predicate handed to the lint engine.
///
/// Immutable once built, so one value can be consulted for every message of every file in a run,
/// from any thread.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FixDecision {
    /// Every fix is allowed.
    Always,
    /// No fix is allowed. This is the engine's own default.
    #[default]
    Never,
    /// Allowed iff the rule matches (when `rules` is set) and the severity passes.
    Filter {
        rules: Option<BTreeSet<RuleId>>,
        errors_only: bool,
    },
}

impl FixDecision {
    /// May the fix attached to `msg` be written?
    pub fn allows(&self, msg: &LintMessage) -> bool {
        match self {
            FixDecision::Always => true,
            FixDecision::Never => false,
            FixDecision::Filter { rules, errors_only } => {
                rule_allows(rules.as_ref(), msg) && warning_allows(*errors_only, msg)
            }
        }
    }

    /// False only for the constant-false decision; engines may skip fix computation then.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, FixDecision::Never)
    }
}

fn rule_allows(rules: Option<&BTreeSet<RuleId>>, msg: &LintMessage) -> bool {
    let Some(rules) = rules else {
        return true;
    };
    match msg.rule() {
        Some(id) => rules.contains(id),
        None => false,
    }
}

fn warning_allows(errors_only: bool, msg: &LintMessage) -> bool {
    !errors_only || msg.severity.is_error()
}

/// Turn the caller's selection into a decision. `None` means "fix everything".
pub fn build_fix_decision(selector: Option<&FixSelector>) -> FixDecision {
    let decision = match selector {
        None | Some(FixSelector::AllowAll) => FixDecision::Always,
        Some(FixSelector::AllowNone) => FixDecision::Never,
        Some(FixSelector::Filtered(filter)) => compile_filter(filter),
    };
    debug!(?decision, "built fix decision");
    decision
}

fn compile_filter(filter: &FixFilter) -> FixDecision {
    let rules = if filter.rules.is_empty() {
        None
    } else {
        Some(filter.rules.iter().cloned().collect())
    };
    FixDecision::Filter {
        rules,
        errors_only: !filter.allow_warning_fixes,
    }
}

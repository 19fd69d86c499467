#![no_main]

use arbitrary::Arbitrary;
use filterfix_domain::{FixDecision, FixFilter, FixSelector, build_fix_decision};
use filterfix_edit::apply_fixes;
use filterfix_types::{Fix, LintMessage, Severity};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    source: String,
    fixes: Vec<(u8, i16, i16, String, bool)>,
    errors_only: bool,
    only_first_rule: bool,
}

const RULES: [&str; 4] = ["semi", "eqeqeq", "quotes", "no-extra-parens"];

fuzz_target!(|input: Input| {
    let messages: Vec<LintMessage> = input
        .fixes
        .iter()
        .map(|(rule, start, end, text, warning)| {
            let severity = if *warning { Severity::Warning } else { Severity::Error };
            LintMessage::new(RULES[*rule as usize % RULES.len()], severity, "fuzz")
                .with_fix(Fix::new(i64::from(*start), i64::from(*end), text.clone()))
        })
        .collect();

    let mut filter = FixFilter::new().allow_warning_fixes(!input.errors_only);
    if input.only_first_rule {
        filter = filter.rules([RULES[0]]);
    }
    let decision: FixDecision = build_fix_decision(Some(&FixSelector::Filtered(filter)));

    // Errors are fine (out of range, split surrogate); panics are not.
    if let Ok(outcome) = apply_fixes(&input.source, &messages, &decision) {
        assert_eq!(outcome.applied + outcome.remaining.len(), messages.len());
        if outcome.applied == 0 {
            assert!(outcome.output.is_none());
        }
    }
});

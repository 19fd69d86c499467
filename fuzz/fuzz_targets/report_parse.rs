#![no_main]

use filterfix_types::LintReport;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(report) = serde_json::from_slice::<LintReport>(data) else { return };

    // Whatever parses must serialize and parse back to the same report.
    let json = serde_json::to_string(&report).expect("serialize parsed report");
    let again: LintReport = serde_json::from_str(&json).expect("reparse serialized report");
    assert_eq!(report, again);
});

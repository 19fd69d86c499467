//! Port traits abstracting the lint engine and file writes away from the pipeline.

use crate::settings::EngineConfig;
use camino::{Utf8Path, Utf8PathBuf};
use filterfix_types::LintReport;
use std::fmt;

/// What a lint pass is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintPass {
    /// Compute diagnostics and, when the fix decision allows any, in-memory fixed output.
    Fix,
    /// Compute diagnostics only; never produces output.
    Report,
}

impl fmt::Display for LintPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LintPass::Fix => "fix",
            LintPass::Report => "report",
        })
    }
}

/// Builds engine handles. Fails when the configuration is unusable.
pub trait EngineFactory {
    fn create(&self, config: &EngineConfig) -> anyhow::Result<Box<dyn LintEngine>>;
}

/// A configured lint engine.
///
/// Per-file problems (unreadable file, syntax errors) belong in the report as fatal messages,
/// not in the `Err` branch.
pub trait LintEngine {
    fn lint_files(&self, paths: &[Utf8PathBuf], pass: LintPass) -> anyhow::Result<LintReport>;
}

/// File-system write operations.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
}

//! The selective fix pipeline: lint with fixes, persist them, re-lint and report.
//!
//! Exactly two engine passes run per call. Fixes revealed by the second pass are reported, not
//! applied.

use crate::ports::{EngineFactory, LintPass, WritePort};
use crate::settings::{EngineConfig, LintTargets};
use filterfix_domain::{FixSelector, build_fix_decision};
use filterfix_types::LintReport;
use tracing::{debug, info};

/// Error type for pipeline results. Every variant is a tool error; lint findings never are.
#[derive(Debug, thiserror::Error)]
pub enum FixError {
    #[error("create lint engine: {0:#}")]
    EngineConstruction(anyhow::Error),

    #[error("{pass} pass: {source:#}")]
    Lint {
        pass: LintPass,
        source: anyhow::Error,
    },

    #[error("write fixes: {0:#}")]
    Persist(anyhow::Error),
}

impl FixError {
    /// Process exit status for this failure. Remaining lint findings never fail a run.
    pub fn exit_code(&self) -> u8 {
        match self {
            FixError::EngineConstruction(_) | FixError::Lint { .. } | FixError::Persist(_) => 1,
        }
    }
}

/// Run the selective fix protocol over `paths`.
///
/// 1. Build the fix decision from `selector` (`None` fixes everything).
/// 2. Merge it into `engine_config` (default when `None`), overriding the caller's `fix`.
/// 3. Create a fresh engine handle.
/// 4. Lint with fixes, write every computed output, then lint again with the same handle.
///
/// The returned report is the second pass, so its counts describe what is left on disk. Files
/// written before a failure keep their fixes.
pub fn run_fix(
    paths: impl Into<LintTargets>,
    selector: Option<&FixSelector>,
    engine_config: Option<EngineConfig>,
    factory: &dyn EngineFactory,
    writer: &dyn WritePort,
) -> Result<LintReport, FixError> {
    let targets = paths.into();
    let config = EngineConfig {
        fix: build_fix_decision(selector),
        ..engine_config.unwrap_or_default()
    };

    let engine = factory
        .create(&config)
        .map_err(FixError::EngineConstruction)?;

    let computed = engine
        .lint_files(targets.as_slice(), LintPass::Fix)
        .map_err(|source| FixError::Lint {
            pass: LintPass::Fix,
            source,
        })?;
    debug!(
        results = computed.len(),
        errors = computed.error_count(),
        warnings = computed.warning_count(),
        "fix pass complete"
    );

    let written = output_fixes(&computed, writer).map_err(FixError::Persist)?;
    info!(targets = targets.len(), files_fixed = written, "wrote fixes");

    let report = engine
        .lint_files(targets.as_slice(), LintPass::Report)
        .map_err(|source| FixError::Lint {
            pass: LintPass::Report,
            source,
        })?;
    debug!(
        results = report.len(),
        errors = report.error_count(),
        warnings = report.warning_count(),
        "report pass complete"
    );

    Ok(report)
}

/// Write each result's fixed output to its file. Returns the number of files written.
///
/// Stops at the first failed write; earlier writes stay on disk.
pub fn output_fixes(report: &LintReport, writer: &dyn WritePort) -> anyhow::Result<usize> {
    let mut written = 0;
    for result in report.fixed() {
        if let Some(output) = &result.output {
            debug!(path = %result.file_path, bytes = output.len(), "writing fixed output");
            writer.write_file(&result.file_path, output.as_bytes())?;
            written += 1;
        }
    }
    Ok(written)
}

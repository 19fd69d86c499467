//! Default port implementations: an ESLint process engine and file writers.

use crate::ports::{EngineFactory, LintEngine, LintPass, WritePort};
use crate::settings::EngineConfig;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use filterfix_types::{LintMessage, LintReport, LintResult};
use fs_err as fs;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::process::{Command, Output, Stdio};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Creates [`EslintEngine`] handles after validating the configuration.
#[derive(Debug, Clone, Default)]
pub struct EslintFactory;

impl EngineFactory for EslintFactory {
    fn create(&self, config: &EngineConfig) -> anyhow::Result<Box<dyn LintEngine>> {
        config.validate().context("invalid engine configuration")?;
        debug!(
            command = %config.command,
            extensions = ?config.extensions,
            cwd = %config.cwd,
            "created eslint engine"
        );
        Ok(Box::new(EslintEngine {
            config: config.clone(),
        }))
    }
}

/// Runs the `eslint` executable and reads its JSON report.
///
/// ESLint evaluates the fix predicate in-process, which an external process cannot share. The
/// adapter therefore asks ESLint for diagnostics only (its JSON output carries every proposed
/// fix) and applies the allowed ones itself with `filterfix-edit`. Like `eslint --fix`, a file
/// whose fixes changed it is linted again over stdin and the newly proposed fixes applied, for
/// at most [`MAX_FIX_ROUNDS`] rounds.
#[derive(Debug, Clone)]
pub struct EslintEngine {
    config: EngineConfig,
}

/// Fix rounds per file on the fix pass, matching ESLint's own limit.
pub const MAX_FIX_ROUNDS: usize = 10;

impl EslintEngine {
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn command(&self, paths: &[Utf8PathBuf]) -> Command {
        let mut cmd = Command::new(&self.config.command);
        cmd.args(&self.config.args)
            .args(["--format", "json", "--no-color"])
            .arg("--ext")
            .arg(self.config.extensions.join(","))
            .arg("--")
            .args(paths.iter().map(|p| p.as_str()))
            .current_dir(&self.config.cwd);
        cmd
    }

    /// Lints `text` as if it were the contents of `path`.
    fn stdin_command(&self, path: &Utf8Path) -> Command {
        let mut cmd = Command::new(&self.config.command);
        cmd.args(&self.config.args)
            .args(["--format", "json", "--no-color", "--stdin", "--stdin-filename"])
            .arg(path.as_str())
            .current_dir(&self.config.cwd)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    /// Checks the exit status and parses the JSON report.
    fn read_report(&self, output: Output) -> anyhow::Result<LintReport> {
        // 0: no errors, 1: lint errors found, anything else: ESLint itself failed.
        match output.status.code() {
            Some(0) | Some(1) => {}
            code => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                anyhow::bail!(
                    "{} exited with status {}: {}",
                    self.config.command,
                    code.map_or_else(|| "signal".to_string(), |c| c.to_string()),
                    stderr.trim()
                );
            }
        }

        let stdout = String::from_utf8(output.stdout).context("eslint output is not UTF-8")?;
        serde_json::from_str(&stdout).context("parse eslint JSON output")
    }

    fn lint_text(&self, path: &Utf8Path, text: &str) -> anyhow::Result<Vec<LintMessage>> {
        let mut child = self
            .stdin_command(path)
            .spawn()
            .with_context(|| format!("run {}", self.config.command))?;
        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(text.as_bytes()) {
                // The engine may answer without reading its input.
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
                other => other.with_context(|| format!("send {} to eslint", path))?,
            }
        }
        let output = child
            .wait_with_output()
            .with_context(|| format!("wait for {}", self.config.command))?;
        let report = self.read_report(output)?;
        Ok(report
            .into_iter()
            .next()
            .map(|result| result.messages)
            .unwrap_or_default())
    }

    fn fix_result(&self, result: &mut LintResult) -> anyhow::Result<()> {
        if !result.messages.iter().any(LintMessage::is_fixable) {
            return Ok(());
        }
        let mut text = match result.source.clone() {
            Some(s) => s,
            None => {
                let path = self.config.resolve(&result.file_path);
                fs::read_to_string(&path).with_context(|| format!("read {}", path))?
            }
        };

        for round in 1..=MAX_FIX_ROUNDS {
            let applied = filterfix_edit::apply_to_result(result, &text, &self.config.fix)
                .with_context(|| format!("apply fixes to {}", result.file_path))?;
            let Some(output) = result.output.as_ref().filter(|out| applied > 0 && **out != text)
            else {
                break;
            };
            text = output.clone();
            debug!(path = %result.file_path, round, applied, "applied fix round");

            result.messages = self
                .lint_text(&result.file_path, &text)
                .with_context(|| format!("re-lint {} after fix round {}", result.file_path, round))?;
            result.recount();
        }
        Ok(())
    }
}

impl LintEngine for EslintEngine {
    fn lint_files(&self, paths: &[Utf8PathBuf], pass: LintPass) -> anyhow::Result<LintReport> {
        let mut cmd = self.command(paths);
        debug!(?cmd, %pass, "running eslint");

        let output = cmd
            .output()
            .with_context(|| format!("run {}", self.config.command))?;
        let mut report = self.read_report(output)?;

        if pass == LintPass::Fix && self.config.fix.is_enabled() {
            for result in &mut report.results {
                self.fix_result(result)?;
            }
        }

        if report.is_empty() {
            warn!(paths = paths.len(), "eslint reported no files");
        }
        Ok(report)
    }
}

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir for {}", path))?;
        }
        fs::write(path, contents).with_context(|| format!("write {}", path))
    }
}

/// Records writes in memory, for embedding and testing.
#[derive(Debug, Default)]
pub struct InMemoryWritePort {
    files: Mutex<BTreeMap<Utf8PathBuf, Vec<u8>>>,
}

impl InMemoryWritePort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far, by path.
    pub fn files(&self) -> BTreeMap<Utf8PathBuf, Vec<u8>> {
        self.files
            .lock()
            .map(|f| f.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl WritePort for InMemoryWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        let mut files = self
            .files
            .lock()
            .map_err(|_| anyhow::anyhow!("in-memory writer lock poisoned"))?;
        files.insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }
}

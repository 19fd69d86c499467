//! A scripted, line-oriented lint engine used by the integration tests.
//!
//! Rules:
//! - `semi` (error): a `var` line without a trailing `;`. Fix inserts `;`.
//! - `eqeqeq` (error): ` == ` anywhere in a line. No fix.
//! - `newline-after-var` (error): a `var` line directly followed by a non-blank, non-`var` line.
//!   Fix inserts a blank line.
//! - `no-extra-parens` (warning): `= (expr)` at the end of a statement. Fix drops the parens.
//!
//! A file containing `@@` does not parse and yields a single fatal message.

#![allow(dead_code)]

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use filterfix_core::adapters::InMemoryWritePort;
use filterfix_core::ports::{EngineFactory, LintEngine, LintPass};
use filterfix_core::settings::EngineConfig;
use filterfix_edit::{apply_to_result, utf16_len};
use filterfix_types::{Fix, LintMessage, LintReport, LintResult, Severity};
use fs_err as fs;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

#[derive(Debug, Clone, Default)]
pub struct ScriptedFactory {
    configs: Arc<Mutex<Vec<EngineConfig>>>,
}

impl ScriptedFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every configuration an engine was created with, in order.
    pub fn configs(&self) -> Vec<EngineConfig> {
        self.configs.lock().unwrap().clone()
    }
}

impl EngineFactory for ScriptedFactory {
    fn create(&self, config: &EngineConfig) -> anyhow::Result<Box<dyn LintEngine>> {
        config.validate()?;
        self.configs.lock().unwrap().push(config.clone());
        Ok(Box::new(ScriptedEngine {
            config: config.clone(),
        }))
    }
}

pub struct ScriptedEngine {
    config: EngineConfig,
}

impl ScriptedEngine {
    fn expand(&self, paths: &[Utf8PathBuf]) -> anyhow::Result<Vec<Utf8PathBuf>> {
        let mut files = Vec::new();
        for path in paths {
            let abs = self.config.resolve(path);
            if abs.is_dir() {
                let mut found = Vec::new();
                self.walk(&abs, &mut found)?;
                found.sort();
                files.extend(found);
            } else if abs.is_file() {
                files.push(abs);
            } else {
                anyhow::bail!("No files matching the pattern \"{path}\" were found.");
            }
        }
        Ok(files)
    }

    fn walk(&self, dir: &Utf8Path, out: &mut Vec<Utf8PathBuf>) -> anyhow::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = Utf8PathBuf::from_path_buf(entry?.path())
                .map_err(|p| anyhow::anyhow!("non UTF-8 path {}", p.display()))?;
            if path.is_dir() {
                self.walk(&path, out)?;
            } else if self.config.matches_extension(&path) {
                out.push(path);
            }
        }
        Ok(())
    }
}

impl LintEngine for ScriptedEngine {
    fn lint_files(&self, paths: &[Utf8PathBuf], pass: LintPass) -> anyhow::Result<LintReport> {
        let mut results = Vec::new();
        for file in self.expand(paths)? {
            let source = fs::read_to_string(&file)?;
            let mut result = LintResult::new(file.clone(), lint_source(&source));
            if pass == LintPass::Fix && self.config.fix.is_enabled() {
                apply_to_result(&mut result, &source, &self.config.fix)
                    .with_context(|| format!("apply fixes to {file}"))?;
            }
            results.push(result);
        }
        Ok(LintReport::new(results))
    }
}

/// Diagnostics for one file, in line order.
pub fn lint_source(source: &str) -> Vec<LintMessage> {
    if source.contains("@@") {
        return vec![LintMessage::fatal("Parsing error: Unexpected token @").at(1, 1)];
    }

    let lines: Vec<&str> = source.split_inclusive('\n').collect();
    let mut starts = Vec::with_capacity(lines.len() + 1);
    let mut offset = 0;
    for line in &lines {
        starts.push(offset);
        offset += utf16_len(line);
    }
    starts.push(offset);

    let mut messages = Vec::new();
    for (i, raw) in lines.iter().enumerate() {
        let line_no = i as u32 + 1;
        let content = raw.trim_end_matches(['\n', '\r']);
        let code = content.trim_end();
        let is_var = code.starts_with("var ");

        if is_var && !code.ends_with(';') {
            let at = starts[i] + utf16_len(code);
            messages.push(
                LintMessage::new("semi", Severity::Error, "Missing semicolon.")
                    .at(line_no, utf16_len(code) as u32 + 1)
                    .with_fix(Fix::insert(at as i64, ";")),
            );
        }

        if let Some(idx) = content.find(" == ") {
            messages.push(
                LintMessage::new("eqeqeq", Severity::Error, "Expected '===' and instead saw '=='.")
                    .at(line_no, utf16_len(&content[..idx]) as u32 + 2),
            );
        }

        if is_var
            && let Some(next) = lines.get(i + 1)
        {
            let next = next.trim();
            if !next.is_empty() && !next.starts_with("var ") {
                messages.push(
                    LintMessage::new(
                        "newline-after-var",
                        Severity::Error,
                        "Expected blank line after variable declarations.",
                    )
                    .at(line_no, 1)
                    .with_fix(Fix::insert(starts[i + 1] as i64, "\n")),
                );
            }
        }

        if let Some(msg) = extra_parens(content, starts[i], line_no) {
            messages.push(msg);
        }
    }
    messages
}

fn extra_parens(content: &str, line_start: usize, line_no: u32) -> Option<LintMessage> {
    let open = content.find("= (")? + 2;
    let rest = content[open..].trim_end();
    let rest = rest.strip_suffix(';').unwrap_or(rest);
    let inner = rest.strip_prefix('(')?.strip_suffix(')')?;
    if inner.contains(['(', ')']) {
        return None;
    }
    let start = line_start + utf16_len(&content[..open]);
    let end = start + utf16_len(inner) + 2;
    Some(
        LintMessage::new("no-extra-parens", Severity::Warning, "Unnecessary parentheses around expression.")
            .at(line_no, utf16_len(&content[..open]) as u32 + 1)
            .with_fix(Fix::new(start as i64, end as i64, inner)),
    )
}

/// A scratch directory with UTF-8 path.
pub struct Workspace {
    _temp: TempDir,
    pub root: Utf8PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8 temp path");
        Self { _temp: temp, root }
    }

    pub fn write(&self, rel: &str, contents: &str) -> Utf8PathBuf {
        let path = self.root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create dir");
        }
        std::fs::write(&path, contents).expect("write fixture");
        path
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.root.join(rel)).expect("read fixture")
    }

    /// Engine configuration rooted at this workspace.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            cwd: self.root.clone(),
            ..Default::default()
        }
    }
}

/// Paths written through an in-memory port, relative to `root`.
pub fn written_paths(port: &InMemoryWritePort, root: &Utf8Path) -> Vec<String> {
    port.files()
        .keys()
        .map(|p| p.strip_prefix(root).unwrap_or(p).to_string())
        .collect()
}

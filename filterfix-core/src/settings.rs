//! Clap-free settings for the fix pipeline.

use camino::{Utf8Path, Utf8PathBuf};
use filterfix_domain::FixDecision;
use thiserror::Error;

pub const DEFAULT_EXTENSION: &str = ".js";
pub const DEFAULT_ENGINE_COMMAND: &str = "eslint";

/// Options handed to the lint engine factory.
///
/// `fix` is always replaced by the pipeline with the decision built from the caller's selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// File extensions considered when a directory is linted, each with a leading `.`.
    pub extensions: Vec<String>,

    /// Working directory for the engine; relative report paths resolve against it.
    pub cwd: Utf8PathBuf,

    /// Engine executable.
    pub command: String,

    /// Extra arguments placed before the ones the adapter adds.
    pub args: Vec<String>,

    pub fix: FixDecision,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            extensions: vec![DEFAULT_EXTENSION.to_string()],
            cwd: Utf8PathBuf::from("."),
            command: DEFAULT_ENGINE_COMMAND.to_string(),
            args: Vec::new(),
            fix: FixDecision::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), EngineConfigError> {
        if self.extensions.is_empty() {
            return Err(EngineConfigError::NoExtensions);
        }
        if let Some(bad) = self
            .extensions
            .iter()
            .find(|ext| !ext.starts_with('.') || ext.len() < 2 || ext.contains(['/', '\\', ',']))
        {
            return Err(EngineConfigError::InvalidExtension(bad.clone()));
        }
        if self.command.trim().is_empty() {
            return Err(EngineConfigError::EmptyCommand);
        }
        Ok(())
    }

    /// Does `path` carry one of the configured extensions?
    pub fn matches_extension(&self, path: &Utf8Path) -> bool {
        path.extension()
            .is_some_and(|ext| self.extensions.iter().any(|e| e.strip_prefix('.') == Some(ext)))
    }

    /// `path` made absolute against `cwd`.
    pub fn resolve(&self, path: &Utf8Path) -> Utf8PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

/// Reasons an engine configuration is rejected at construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineConfigError {
    #[error("no file extensions configured")]
    NoExtensions,

    #[error("invalid extension '{0}': expected a leading '.' followed by a name")]
    InvalidExtension(String),

    #[error("engine command is empty")]
    EmptyCommand,
}

/// Paths to lint: a single path or an ordered sequence of paths.
///
/// Order is preserved; directory expansion is left to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintTargets(Vec<Utf8PathBuf>);

impl LintTargets {
    pub fn as_slice(&self) -> &[Utf8PathBuf] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Utf8PathBuf> for LintTargets {
    fn from(path: Utf8PathBuf) -> Self {
        Self(vec![path])
    }
}

impl From<&Utf8Path> for LintTargets {
    fn from(path: &Utf8Path) -> Self {
        Self(vec![path.to_path_buf()])
    }
}

impl From<&str> for LintTargets {
    fn from(path: &str) -> Self {
        Self(vec![Utf8PathBuf::from(path)])
    }
}

impl From<String> for LintTargets {
    fn from(path: String) -> Self {
        Self(vec![Utf8PathBuf::from(path)])
    }
}

impl From<Vec<Utf8PathBuf>> for LintTargets {
    fn from(paths: Vec<Utf8PathBuf>) -> Self {
        Self(paths)
    }
}

impl From<&[Utf8PathBuf]> for LintTargets {
    fn from(paths: &[Utf8PathBuf]) -> Self {
        Self(paths.to_vec())
    }
}

impl<P: Into<Utf8PathBuf>> FromIterator<P> for LintTargets {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

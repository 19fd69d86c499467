//! Configuration file loading for filterfix.
//!
//! Discovers and loads `filterfix.toml` from the working directory.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use filterfix_core::settings::{DEFAULT_ENGINE_COMMAND, DEFAULT_EXTENSION, EngineConfig};
use filterfix_core::{FixFilter, FixSelector};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "filterfix.toml";

/// Top-level configuration from filterfix.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterfixConfig {
    /// Which fixes to write.
    pub fix: FixConfig,

    /// How to run the lint engine.
    pub engine: EngineSection,
}

/// `[fix]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FixConfig {
    /// Rules whose fixes may be written. Empty allows every rule.
    pub rules: Vec<String>,

    /// Write fixes for warning-severity messages too.
    pub warnings: bool,
}

impl Default for FixConfig {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            warnings: true,
        }
    }
}

/// `[engine]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSection {
    /// Extensions linted inside directories, e.g. `.js`.
    pub extensions: Vec<String>,

    /// Engine executable (default: `eslint`).
    pub command: Option<String>,

    /// Extra engine arguments.
    pub args: Vec<String>,
}

/// Discover the filterfix.toml config file in `dir`.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a filterfix.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<FilterfixConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<FilterfixConfig> {
    let config: FilterfixConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `dir`, or return default if not found.
pub fn load_or_default(dir: &Utf8Path) -> anyhow::Result<FilterfixConfig> {
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(FilterfixConfig::default()),
    }
}

/// Merged configuration combining config file and CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedConfig {
    /// Allowed rules (from config file, extended by CLI).
    pub rules: Vec<String>,

    /// Whether warning fixes are written.
    pub warnings: bool,

    /// Extensions (from config file, extended by CLI; `.js` when both are empty).
    pub extensions: Vec<String>,

    pub command: Option<String>,

    pub args: Vec<String>,
}

impl MergedConfig {
    /// The fix selector for this run. CLI runs always filter, even with no rules listed.
    pub fn selector(&self) -> FixSelector {
        FixSelector::Filtered(
            FixFilter::new()
                .rules(self.rules.iter().map(String::as_str))
                .allow_warning_fixes(self.warnings),
        )
    }

    /// Engine options rooted at `cwd`.
    pub fn engine_config(&self, cwd: Utf8PathBuf) -> EngineConfig {
        EngineConfig {
            extensions: self.extensions.clone(),
            cwd,
            command: self
                .command
                .clone()
                .unwrap_or_else(|| DEFAULT_ENGINE_COMMAND.to_string()),
            args: self.args.clone(),
            ..EngineConfig::default()
        }
    }
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: FilterfixConfig,
}

impl ConfigMerger {
    pub fn new(config: FilterfixConfig) -> Self {
        Self { config }
    }

    /// Merge with CLI arguments.
    ///
    /// CLI `rules` and `extensions` extend the config file lists. `warnings` and `command`
    /// override the config file when given.
    pub fn merge_cli_args(
        self,
        cli_rules: &[String],
        cli_extensions: &[String],
        warnings: Option<bool>,
        command: Option<&str>,
    ) -> MergedConfig {
        let FilterfixConfig { fix, engine } = self.config;

        let mut extensions = extend_unique(engine.extensions, cli_extensions);
        if extensions.is_empty() {
            extensions.push(DEFAULT_EXTENSION.to_string());
        }

        MergedConfig {
            rules: extend_unique(fix.rules, cli_rules),
            warnings: warnings.unwrap_or(fix.warnings),
            extensions,
            command: command.map(str::to_string).or(engine.command),
            args: engine.args,
        }
    }
}

fn extend_unique(mut base: Vec<String>, extra: &[String]) -> Vec<String> {
    for item in extra {
        if !base.contains(item) {
            base.push(item.clone());
        }
    }
    base
}

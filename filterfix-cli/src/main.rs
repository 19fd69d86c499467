mod config;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::error::ErrorKind;
use clap::{Arg, ArgAction, CommandFactory, FromArgMatches, Parser};
use config::ConfigMerger;
use filterfix_core::adapters::{EslintFactory, FsWritePort};
use filterfix_core::pipeline::{FixError, run_fix};
use filterfix_render::{render_json, render_stylish};
use std::io::Write;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "filterfix",
    version,
    disable_version_flag = true,
    about = "Apply only the ESLint fixes you select, then report what is left."
)]
struct Cli {
    /// Files or directories to lint.
    #[arg(value_name = "PATH")]
    paths: Vec<Utf8PathBuf>,

    /// File extension to lint inside directories (repeatable, default: .js).
    #[arg(long = "ext", value_name = "EXT", value_delimiter = ',')]
    extensions: Vec<String>,

    /// Only write fixes for this rule (repeatable, default: every rule).
    #[arg(short = 'r', long = "rule", value_name = "RULE")]
    rules: Vec<String>,

    /// Write fixes for warnings as well as errors (default).
    #[arg(short = 'w', long, overrides_with = "no_warnings")]
    warnings: bool,

    /// Only write fixes for errors.
    #[arg(long, overrides_with = "warnings")]
    no_warnings: bool,

    /// Output format for the final report.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Config file (default: <cwd>/filterfix.toml when present).
    #[arg(long, value_name = "FILE")]
    config: Option<Utf8PathBuf>,

    /// ESLint executable.
    #[arg(long, value_name = "COMMAND")]
    eslint: Option<String>,

    /// Working directory for the engine and config discovery.
    #[arg(long, default_value = ".")]
    cwd: Utf8PathBuf,
}

impl Cli {
    fn warnings(&self) -> Option<bool> {
        if self.no_warnings {
            Some(false)
        } else if self.warnings {
            Some(true)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// The derived command plus a `-v` / `--version` flag.
fn command() -> clap::Command {
    Cli::command().arg(
        Arg::new("version")
            .short('v')
            .long("version")
            .action(ArgAction::Version)
            .help("Print version"),
    )
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut cmd = command();
    let cli = match cmd
        .try_get_matches_from_mut(std::env::args_os())
        .and_then(|matches| Cli::from_arg_matches(&matches))
    {
        Ok(cli) => cli,
        Err(e) => return parse_failure(e),
    };

    if cli.paths.is_empty() {
        let help = cmd.render_help();
        print!("{help}");
        return ExitCode::SUCCESS;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("{:?}", e);
            eprintln!("filterfix: {e:#}");
            ExitCode::from(e.downcast_ref::<FixError>().map_or(1, FixError::exit_code))
        }
    }
}

/// Help and version requests succeed; every other parse error exits 1.
fn parse_failure(e: clap::Error) -> ExitCode {
    let _ = e.print();
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
        _ => ExitCode::from(1),
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let file_config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::load_or_default(&cli.cwd).context("load filterfix.toml config")?,
    };
    let merged = ConfigMerger::new(file_config).merge_cli_args(
        &cli.rules,
        &cli.extensions,
        cli.warnings(),
        cli.eslint.as_deref(),
    );
    debug!(
        "merged config: rules={:?}, warnings={}, extensions={:?}, command={:?}",
        merged.rules, merged.warnings, merged.extensions, merged.command
    );

    let selector = merged.selector();
    let engine_config = merged.engine_config(cli.cwd.clone());

    let report = run_fix(
        cli.paths,
        Some(&selector),
        Some(engine_config),
        &EslintFactory,
        &FsWritePort,
    )?;
    info!(
        files = report.len(),
        errors = report.error_count(),
        warnings = report.warning_count(),
        "lint complete"
    );

    let rendered = match cli.format {
        OutputFormat::Text => render_stylish(&report),
        OutputFormat::Json => render_json(&report)?,
    };
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .and_then(|()| stdout.flush())
        .context("write report to stdout")?;
    Ok(())
}

//! Embeddable core library for filterfix.
//!
//! Provides a clap-free, I/O-abstracted entry point that applies only the lint fixes a caller
//! selected, then reports what is left.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`EngineFactory`](ports::EngineFactory) / [`LintEngine`](ports::LintEngine): the external
//!   lint engine
//! - [`WritePort`](ports::WritePort): write fixed files
//!
//! The [`adapters`] module provides an ESLint process adapter and filesystem/in-memory writers.
//!
//! # Entry points
//!
//! - [`run_fix`](pipeline::run_fix): lint with fixes, persist them, re-lint and report
//! - [`output_fixes`](pipeline::output_fixes): persist the fixed output of a report

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod settings;

// Re-export the selection types so callers don't need filterfix-domain directly.
pub use filterfix_domain::{FixDecision, FixFilter, FixSelector, build_fix_decision};

// Re-export report types so embedders don't need filterfix-types directly.
pub use filterfix_types::{LintMessage, LintReport, LintResult, RuleId, Severity};

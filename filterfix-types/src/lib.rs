//! Shared DTOs for the filterfix workspace.
//!
//! # Design constraints
//! - The wire shape follows ESLint's JSON formatter output (`camelCase` keys,
//!   numeric severities), so reports produced by the engine deserialize as-is.
//! - Unknown fields are ignored when reading.
//! - Prefer adding optional fields over changing semantics.

pub mod lint;

pub use lint::{Fix, LintMessage, LintReport, LintResult, RuleId, Severity};

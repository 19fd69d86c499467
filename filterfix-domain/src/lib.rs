//! Domain logic: decide which engine-proposed fixes may be written.
//!
//! This crate owns *which* fixes are allowed. It does not own *how* fixes are applied; that's the
//! `filterfix-edit` crate, driven by the lint engine adapter.

mod decision;
mod selector;

pub use decision::{FixDecision, build_fix_decision};
pub use selector::{FixFilter, FixSelector};

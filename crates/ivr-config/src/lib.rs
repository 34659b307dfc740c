#![deny(unsafe_code)]

//! Manufacturer configuration registry.
//!
//! Loads JSON mapping configurations from disk once, then serves
//! immutable lookups for the lifetime of the process. Also hosts the
//! load-time expression linter.

pub mod lint;
pub mod registry;

pub use lint::{LintFinding, lint_config};
pub use registry::ConfigRegistry;

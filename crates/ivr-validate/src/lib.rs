#![deny(unsafe_code)]

//! Validation and completeness scoring.
//!
//! Both run over the same resolved map, independently of each other. The
//! validator is intentionally permissive: only a missing critical required
//! field fails a run, everything else degrades to warnings so partial data
//! still reaches human review.

pub mod completeness;
pub mod validator;

pub use completeness::score;
pub use validator::Validator;

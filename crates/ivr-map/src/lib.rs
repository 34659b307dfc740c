#![deny(unsafe_code)]

//! Field resolution engine.
//!
//! Turns `(source record, mapping config)` into a resolved map of target
//! field values. Resolution is deterministic and side-effect-free: path
//! lookups never raise, expressions evaluate by ordered textual pattern
//! detection, and any individual field failure yields a null value rather
//! than an error.

pub mod expr;
pub mod fuzzy;
pub mod path;
pub mod resolver;

pub use expr::ExpressionEvaluator;
pub use fuzzy::{FuzzyMatcher, JaroWinklerMatcher};
pub use resolver::FieldResolver;

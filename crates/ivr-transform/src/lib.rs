#![deny(unsafe_code)]

//! Value transforms and named computations.
//!
//! The mapping engine treats transformation as a collaborator behind the
//! [`TransformAdapter`] trait; [`BuiltinTransforms`] is the default
//! implementation covering date, phone, boolean, number, and text
//! formatting plus record-level named computations such as
//! `format_duration`.

pub mod builtin;
pub mod context;
mod datetime;
mod duration;

use ivr_model::TransformSpec;
use serde_json::Value;

pub use builtin::BuiltinTransforms;
pub use context::{ActorContext, MappingContext};

/// Applies named value transforms and record-level named computations.
///
/// Implementations must be side-effect-free: the same inputs always yield
/// the same output. Transform failures return the value unchanged rather
/// than erroring, so a bad transform never loses resolved data.
pub trait TransformAdapter: Send + Sync {
    /// Apply a `"kind:arg"` transform to a resolved value.
    fn transform(&self, value: &Value, spec: &TransformSpec) -> Value;

    /// Evaluate a named computation (e.g. `format_duration`) against the
    /// whole source record. Returns `None` when the computation cannot
    /// produce a value.
    fn named(&self, name: &str, record: &Value, ctx: &MappingContext) -> Option<Value>;

    /// True if `name` is a known named computation. The expression
    /// evaluator uses this for strategy detection.
    fn knows_named(&self, name: &str) -> bool;
}

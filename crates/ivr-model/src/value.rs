//! Value helpers and the engine's emptiness predicates.
//!
//! Three distinct emptiness tests exist in the system and must stay
//! separate (unifying them changes mapping behavior):
//!
//! - [`is_missing`] — strict test used by plain fallback chains,
//! - [`is_falsy`] — broad test used inside expression evaluation,
//! - [`is_filled`] — fill test used by validation and completeness.

use serde_json::Value;

/// Strict emptiness: only `null` and `""` are missing. Used when walking a
/// plain `" || "` fallback chain of bare paths.
pub fn is_missing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Broad falsiness used inside expressions: `null`, `""`, `false`, `0`,
/// `"0"`, and empty arrays all count as empty. This is the test applied by
/// the expression-level `" || "` fallback and by concatenation filtering,
/// and it is intentionally looser than [`is_missing`].
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(_) => false,
    }
}

/// Fill test for validation and completeness: a value is filled unless it
/// is `null` or `""`. Boolean `false`, numeric `0`, and the string `"0"`
/// all count as filled.
pub fn is_filled(value: &Value) -> bool {
    !is_missing(value)
}

/// Render a value the way it appears in a concatenation or comparison:
/// strings verbatim, scalars via their display form, `null` as empty.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Numeric coercion for arithmetic: numbers directly, numeric strings
/// parsed, booleans as 0/1, everything else `None`.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

//! The computation expression DSL.
//!
//! Expressions are recognized by ordered textual pattern detection, not a
//! grammar. The priority below is a compatibility invariant: existing
//! manufacturer configs depend on it, so an expression containing several
//! operator substrings resolves by the first matching rule, never by
//! operator precedence.
//!
//! 1. named computation (exact match, e.g. `format_duration`)
//! 2. `" + "` concatenation
//! 3. `" * "` multiplication
//! 4. `" || "` fallback (broad falsiness)
//! 5. `" / "` division
//! 6. `" ? "`/`" : "` ternary conditional
//! 7. plain path lookup

use serde_json::Value;
use tracing::trace;

use ivr_model::value::{coerce_f64, display_string, is_falsy};
use ivr_transform::{MappingContext, TransformAdapter};

use crate::path;

/// Comparison operators in detection order. Two-character operators come
/// first so `>=`/`<=` are never truncated to `>`/`<`.
const COMPARISON_OPERATORS: [&str; 6] = ["==", "!=", ">=", "<=", ">", "<"];

/// Evaluates computation expressions against a source record.
pub struct ExpressionEvaluator<'a> {
    transforms: &'a dyn TransformAdapter,
    ctx: &'a MappingContext,
}

impl<'a> ExpressionEvaluator<'a> {
    pub fn new(transforms: &'a dyn TransformAdapter, ctx: &'a MappingContext) -> Self {
        Self { transforms, ctx }
    }

    /// Evaluate an expression. `None` means the expression resolved to no
    /// value; it never errors.
    pub fn evaluate(&self, expression: &str, record: &Value) -> Option<Value> {
        let expression = expression.trim();
        trace!(expression, "evaluating expression");

        if self.transforms.knows_named(expression) {
            return self.transforms.named(expression, record, self.ctx);
        }
        if expression.contains(" + ") {
            return Some(self.concat(expression, record));
        }
        if expression.contains(" * ") {
            return Some(self.multiply(expression, record));
        }
        if expression.contains(" || ") {
            return self.first_truthy(expression, record);
        }
        if expression.contains(" / ") {
            if let Some(value) = self.divide(expression, record) {
                return Some(value);
            }
            // Not a two-part division: fall through to the remaining rules.
        }
        if expression.contains(" ? ") && expression.contains(" : ") {
            return self.ternary(expression, record);
        }
        path::resolve(record, expression).cloned()
    }

    /// String concatenation: resolve each part as a path and join the
    /// non-empty results with a single space.
    fn concat(&self, expression: &str, record: &Value) -> Value {
        let joined = expression
            .split(" + ")
            .map(str::trim)
            .filter_map(|part| path::resolve(record, part))
            .filter(|value| !is_falsy(value))
            .map(display_string)
            .collect::<Vec<_>>()
            .join(" ");
        Value::from(joined)
    }

    /// Left-to-right product with missing operands coerced to zero.
    fn multiply(&self, expression: &str, record: &Value) -> Value {
        let product = expression
            .split(" * ")
            .map(str::trim)
            .map(|part| {
                path::resolve(record, part)
                    .and_then(coerce_f64)
                    .unwrap_or(0.0)
            })
            .fold(1.0, |acc, operand| acc * operand);
        Value::from(product)
    }

    /// Expression-level fallback: first part whose value is not falsy.
    /// Note this uses the broad falsiness test (`0` and `"0"` fall
    /// through), unlike the strict test in plain fallback chains.
    fn first_truthy(&self, expression: &str, record: &Value) -> Option<Value> {
        expression
            .split(" || ")
            .map(str::trim)
            .filter_map(|part| path::resolve(record, part))
            .find(|value| !is_falsy(value))
            .cloned()
    }

    /// Two-part float division. A missing numerator counts as 0, a
    /// missing divisor as 1, and division by zero yields 0 rather than an
    /// error. `None` when the expression does not have exactly two parts.
    fn divide(&self, expression: &str, record: &Value) -> Option<Value> {
        let parts: Vec<&str> = expression.split(" / ").map(str::trim).collect();
        if parts.len() != 2 {
            return None;
        }
        let numerator = path::resolve(record, parts[0])
            .and_then(coerce_f64)
            .unwrap_or(0.0);
        let divisor = path::resolve(record, parts[1])
            .and_then(coerce_f64)
            .unwrap_or(1.0);
        let quotient = if divisor == 0.0 {
            0.0
        } else {
            numerator / divisor
        };
        Some(Value::from(quotient))
    }

    /// `condition ? true_branch : false_branch`. The condition is the text
    /// before the first `" ? "`; the branch split is the first `" : "`
    /// after it. Quoted branch literals are returned verbatim; unquoted
    /// branches resolve as paths.
    fn ternary(&self, expression: &str, record: &Value) -> Option<Value> {
        let question = expression.find(" ? ")?;
        let rest = &expression[question + 3..];
        let colon = rest.find(" : ")?;

        let condition = expression[..question].trim();
        let chosen = if self.condition(condition, record) {
            rest[..colon].trim()
        } else {
            rest[colon + 3..].trim()
        };

        match strip_quotes(chosen) {
            Some(literal) => Some(Value::from(literal)),
            None => path::resolve(record, chosen).cloned(),
        }
    }

    /// Recursive condition evaluation: `" || "` before `" && "`, then the
    /// comparison operators, else a bare truthiness check.
    fn condition(&self, condition: &str, record: &Value) -> bool {
        if condition.contains(" || ") {
            return condition
                .split(" || ")
                .any(|part| self.condition(part.trim(), record));
        }
        if condition.contains(" && ") {
            return condition
                .split(" && ")
                .all(|part| self.condition(part.trim(), record));
        }

        for operator in COMPARISON_OPERATORS {
            let needle = format!(" {operator} ");
            if let Some(position) = condition.find(&needle) {
                let left = condition[..position].trim();
                let right = condition[position + needle.len()..].trim();

                let left_value = path::resolve(record, left).cloned().unwrap_or(Value::Null);
                let right_value = match strip_quotes(right) {
                    Some(literal) => Value::from(literal),
                    None => match path::resolve(record, right) {
                        Some(value) => value.clone(),
                        None => Value::from(right),
                    },
                };
                return compare(operator, &left_value, &right_value);
            }
        }

        path::resolve(record, condition).is_some_and(|value| !is_falsy(value))
    }
}

fn compare(operator: &str, left: &Value, right: &Value) -> bool {
    match operator {
        "==" => loose_equal(left, right),
        "!=" => !loose_equal(left, right),
        ordered => {
            let left = coerce_f64(left).unwrap_or(0.0);
            let right = coerce_f64(right).unwrap_or(0.0);
            match ordered {
                ">" => left > right,
                "<" => left < right,
                ">=" => left >= right,
                "<=" => left <= right,
                _ => false,
            }
        }
    }
}

/// Loose equality: numeric when both sides coerce, string otherwise.
fn loose_equal(left: &Value, right: &Value) -> bool {
    if let (Some(l), Some(r)) = (coerce_f64(left), coerce_f64(right)) {
        return l == r;
    }
    display_string(left) == display_string(right)
}

/// Strip a matched pair of single or double quotes, if present.
fn strip_quotes(raw: &str) -> Option<&str> {
    if raw.len() >= 2 {
        for quote in ['"', '\''] {
            if let Some(inner) = raw
                .strip_prefix(quote)
                .and_then(|r| r.strip_suffix(quote))
            {
                return Some(inner);
            }
        }
    }
    None
}

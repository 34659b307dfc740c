//! Built-in transform implementation.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::warn;

use ivr_model::TransformSpec;
use ivr_model::value::display_string;

use crate::context::MappingContext;
use crate::datetime::{parse_date, render_date};
use crate::duration::format_duration;
use crate::TransformAdapter;

type NamedFn = fn(&Value, &MappingContext) -> Option<Value>;

/// Default [`TransformAdapter`]: date, phone, boolean, number, and text
/// transforms plus a registry of named computations built once at
/// construction.
pub struct BuiltinTransforms {
    named: BTreeMap<&'static str, NamedFn>,
}

impl BuiltinTransforms {
    pub fn new() -> Self {
        let mut named: BTreeMap<&'static str, NamedFn> = BTreeMap::new();
        named.insert("format_duration", |record, _ctx| {
            format_duration(record).map(Value::from)
        });
        named.insert("current_date", |_record, ctx| {
            Some(Value::from(ctx.now.format("%m/%d/%Y").to_string()))
        });
        named.insert("requesting_provider", |_record, ctx| {
            ctx.actor.as_ref().map(|actor| Value::from(actor.name.clone()))
        });
        Self { named }
    }
}

impl Default for BuiltinTransforms {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformAdapter for BuiltinTransforms {
    fn transform(&self, value: &Value, spec: &TransformSpec) -> Value {
        let arg = spec.arg.as_deref().unwrap_or("");
        let result = match spec.kind.as_str() {
            "date" => transform_date(value, arg),
            "phone" => transform_phone(value, arg),
            "boolean" => transform_boolean(value, arg),
            "number" => transform_number(value, arg),
            "text" => transform_text(value, arg),
            other => {
                warn!(kind = other, "unknown transform kind, passing value through");
                None
            }
        };
        result.unwrap_or_else(|| value.clone())
    }

    fn named(&self, name: &str, record: &Value, ctx: &MappingContext) -> Option<Value> {
        self.named.get(name).and_then(|f| f(record, ctx))
    }

    fn knows_named(&self, name: &str) -> bool {
        self.named.contains_key(name)
    }
}

fn transform_date(value: &Value, style: &str) -> Option<Value> {
    let date = parse_date(&display_string(value))?;
    render_date(date, style).map(Value::from)
}

fn transform_phone(value: &Value, style: &str) -> Option<Value> {
    let digits: String = display_string(value)
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    // US numbers sometimes arrive with a leading country code.
    let digits = match digits.len() {
        11 if digits.starts_with('1') => &digits[1..],
        _ => digits.as_str(),
    };
    if digits.len() != 10 {
        return None;
    }
    let formatted = match style {
        "E164" => format!("+1{digits}"),
        // Default presentation format used by the IVR templates.
        _ => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    };
    Some(Value::from(formatted))
}

fn transform_boolean(value: &Value, style: &str) -> Option<Value> {
    let truthy = parse_boolean(value)?;
    let rendered = match style {
        "yes_no" => {
            if truthy {
                "Yes"
            } else {
                "No"
            }
        }
        "1_0" => {
            if truthy {
                "1"
            } else {
                "0"
            }
        }
        // "true_false" and "checkbox" both render the checkbox literals.
        _ => {
            if truthy {
                "true"
            } else {
                "false"
            }
        }
    };
    Some(Value::from(rendered))
}

fn parse_boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "true" | "1" => Some(true),
            "no" | "n" | "false" | "0" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn transform_number(value: &Value, precision: &str) -> Option<Value> {
    let number = ivr_model::value::coerce_f64(value)?;
    let rendered = match precision {
        "0" => format!("{}", number.round() as i64),
        _ => format!("{number:.2}"),
    };
    Some(Value::from(rendered))
}

fn transform_text(value: &Value, style: &str) -> Option<Value> {
    let text = display_string(value);
    let rendered = match style {
        "upper" => text.to_uppercase(),
        "lower" => text.to_lowercase(),
        "title" => title_case(&text),
        _ => return None,
    };
    Some(Value::from(rendered))
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

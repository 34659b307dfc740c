//! Load-time expression linting.
//!
//! Expressions are detected by ordered substring matching at resolution
//! time, so a config that mixes operator families or nests ternaries will
//! quietly resolve by the first matching rule. The linter surfaces those
//! shapes when configs are loaded instead of leaving them to be guessed at
//! from mapping output. Findings never reject a config.

use std::fmt;

use ivr_model::{FieldMappingConfig, FieldSpec};

const KNOWN_TRANSFORM_KINDS: [&str; 5] = ["date", "phone", "boolean", "number", "text"];

/// A suspicious construct in one field of a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintFinding {
    pub manufacturer: String,
    pub field: String,
    pub message: String,
}

impl fmt::Display for LintFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}: {}", self.manufacturer, self.field, self.message)
    }
}

/// Lint every field of a configuration.
pub fn lint_config(config: &FieldMappingConfig) -> Vec<LintFinding> {
    let mut findings = Vec::new();
    for (field, spec) in &config.fields {
        for message in lint_spec(spec) {
            findings.push(LintFinding {
                manufacturer: config.name.clone(),
                field: field.clone(),
                message,
            });
        }
    }
    findings
}

fn lint_spec(spec: &FieldSpec) -> Vec<String> {
    let mut messages = Vec::new();

    let expression = if spec.source.trim() == "computed" {
        spec.computation.as_deref()
    } else {
        Some(spec.source.as_str())
    };
    match expression {
        Some(expression) => lint_expression(expression, &mut messages),
        None => messages.push("computed field has no computation".to_string()),
    }

    if let Some(transform) = &spec.transform {
        if !KNOWN_TRANSFORM_KINDS.contains(&transform.kind.as_str()) {
            messages.push(format!("unknown transform kind '{}'", transform.kind));
        }
    }

    messages
}

fn lint_expression(expression: &str, messages: &mut Vec<String>) {
    if expression.matches(" ? ").count() > 1 {
        messages.push("nested ternary resolves by first-match only".to_string());
    }

    let families = [
        expression.contains(" + "),
        expression.contains(" * "),
        expression.contains(" / "),
        expression.contains(" || "),
        expression.contains(" ? ") && expression.contains(" : "),
    ];
    if families.iter().filter(|present| **present).count() > 1 {
        messages.push(
            "mixes operator families, only the first detected one applies".to_string(),
        );
    }

    if expression.contains(" || ")
        && expression.split(" || ").any(|part| part.trim().is_empty())
    {
        messages.push("fallback chain contains an empty part".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(fields: serde_json::Value) -> FieldMappingConfig {
        serde_json::from_value(json!({"name": "ACZ", "fields": fields})).unwrap()
    }

    #[test]
    fn clean_config_has_no_findings() {
        let config = config(json!({
            "patient_name": {"source": "first + last"},
            "dob": {"source": "patient_dob", "transform": "date:m/d/Y"},
            "status": {"source": "weeks > 4 ? 'chronic' : 'acute'"}
        }));
        assert!(lint_config(&config).is_empty());
    }

    #[test]
    fn nested_ternary_is_flagged() {
        let config = config(json!({
            "tier": {"source": "a > 1 ? 'x' : b > 2 ? 'y' : 'z'"}
        }));
        let findings = lint_config(&config);
        assert!(findings.iter().any(|f| f.message.contains("nested ternary")));
    }

    #[test]
    fn mixed_operator_families_are_flagged() {
        let config = config(json!({
            "area": {"source": "length * width + depth"}
        }));
        let findings = lint_config(&config);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("operator families"));
    }

    #[test]
    fn empty_fallback_part_is_flagged() {
        let config = config(json!({
            "phone": {"source": "cell_phone ||  || office_phone"}
        }));
        let findings = lint_config(&config);
        assert!(findings.iter().any(|f| f.message.contains("empty part")));
    }

    #[test]
    fn unknown_transform_kind_is_flagged() {
        let config = config(json!({
            "name": {"source": "patient_name", "transform": "titlecase"}
        }));
        let findings = lint_config(&config);
        assert!(findings.iter().any(|f| f.message.contains("titlecase")));
    }

    #[test]
    fn computed_without_computation_is_flagged() {
        let config = config(json!({
            "request_date": {"source": "computed"}
        }));
        let findings = lint_config(&config);
        assert_eq!(findings.len(), 1);
    }
}

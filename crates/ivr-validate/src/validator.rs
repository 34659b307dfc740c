//! Two-tier requiredness and format validation.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde_json::Value;
use tracing::{info, warn};

use ivr_model::value::{coerce_f64, display_string, is_filled};
use ivr_model::{FieldImportance, FieldMappingConfig, FieldType, ResolvedMap, ValidationReport};

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| compiled(r"^\d{10}$"));
static NPI_RE: LazyLock<Regex> = LazyLock::new(|| compiled(r"^\d{10}$"));
static ZIP_RE: LazyLock<Regex> = LazyLock::new(|| compiled(r"^\d{5}(-\d{4})?$"));
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| compiled(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));

fn compiled(pattern: &str) -> Regex {
    // Patterns are literals; a failure here is a programming error.
    Regex::new(pattern).expect("static pattern compiles")
}

/// How many missing optional fields the summary warning names.
const OPTIONAL_SUMMARY_LIMIT: usize = 5;

/// Validates a resolved map against its configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator;

impl Validator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Validate `data` against the config's field specs. `record` is the
    /// original source record, consulted for manufacturer acceptance rules
    /// that look at inputs rather than resolved values.
    pub fn validate(
        &self,
        data: &ResolvedMap,
        config: &FieldMappingConfig,
        record: &Value,
    ) -> ValidationReport {
        let mut warnings = Vec::new();
        let mut critical_errors = Vec::new();
        let mut missing_optional_fields = Vec::new();

        for (field, spec) in &config.fields {
            let value = data.get(field).unwrap_or(&Value::Null);
            let empty = !is_filled(value);

            if spec.required && empty {
                if spec.importance == FieldImportance::Critical {
                    critical_errors
                        .push(format!("Critical field '{field}' is missing or empty"));
                } else {
                    warnings.push(format!(
                        "Required field '{field}' is missing or empty (some IVR forms may not need this)"
                    ));
                }
            } else if !spec.required && empty {
                missing_optional_fields.push(field.clone());
            }

            if !empty
                && let Some(field_type) = spec.field_type
                && !check_type(value, field_type)
            {
                warnings.push(format!(
                    "Field '{field}' format may be invalid for type '{}'",
                    type_name(field_type)
                ));
            }
        }

        self.apply_duration_requirement(config, record, &mut warnings);

        if !missing_optional_fields.is_empty() {
            let preview = missing_optional_fields
                .iter()
                .take(OPTIONAL_SUMMARY_LIMIT)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ");
            warnings.push(format!(
                "Consider adding optional fields for better form completion: {preview}"
            ));
        }

        let valid = critical_errors.is_empty();
        info!(
            config = %config.name,
            valid,
            critical_errors = critical_errors.len(),
            warnings = warnings.len(),
            missing_optional = missing_optional_fields.len(),
            "validation completed"
        );

        ValidationReport {
            valid,
            errors: critical_errors.clone(),
            warnings,
            critical_errors,
            missing_optional_fields,
        }
    }

    fn apply_duration_requirement(
        &self,
        config: &FieldMappingConfig,
        record: &Value,
        warnings: &mut Vec<String>,
    ) {
        if config.duration_requirement.as_deref() != Some("greater_than_4_weeks") {
            return;
        }
        let weeks = record
            .get("wound_duration_weeks")
            .and_then(coerce_f64)
            .unwrap_or(0.0);
        if weeks <= 4.0 {
            warn!(
                config = %config.name,
                weeks,
                "wound duration below manufacturer requirement"
            );
            warnings.push(
                "Wound duration does not meet manufacturer requirement of > 4 weeks".to_string(),
            );
        }
    }
}

/// Format check for a non-empty value. Mismatches are warnings upstream,
/// never errors.
fn check_type(value: &Value, field_type: FieldType) -> bool {
    let text = display_string(value);
    match field_type {
        FieldType::String => value.is_string() || value.is_number(),
        FieldType::Number => coerce_f64(value).is_some(),
        FieldType::Boolean => {
            value.is_boolean()
                || matches!(text.as_str(), "Yes" | "No" | "true" | "false" | "1" | "0")
        }
        FieldType::Date => parse_date_lenient(&text),
        FieldType::Email => EMAIL_RE.is_match(&text),
        FieldType::Phone => PHONE_RE.is_match(&digits_of(&text)),
        FieldType::Npi => NPI_RE.is_match(&digits_of(&text)),
        FieldType::Zip => ZIP_RE.is_match(&text),
    }
}

fn parse_date_lenient(text: &str) -> bool {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
        || NaiveDate::parse_from_str(text, "%m/%d/%Y").is_ok()
}

fn digits_of(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

fn type_name(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::String => "string",
        FieldType::Number => "number",
        FieldType::Boolean => "boolean",
        FieldType::Date => "date",
        FieldType::Email => "email",
        FieldType::Phone => "phone",
        FieldType::Npi => "npi",
        FieldType::Zip => "zip",
    }
}

//! Result types for a mapping run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Target field name -> resolved value. `Null` and `""` denote "not
/// filled"; boolean `false` and numeric `0` are filled values.
pub type ResolvedMap = BTreeMap<String, Value>;

/// Validation outcome for a resolved map.
///
/// `valid` is false only when critical errors are present; required fields
/// at lower importance tiers degrade to warnings so that partial data can
/// still be submitted for human review.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    /// Critical errors first, then any other hard errors.
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub critical_errors: Vec<String>,
    pub missing_optional_fields: Vec<String>,
}

impl ValidationReport {
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

/// Fill state of a single configured field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldStatus {
    pub filled: bool,
    pub required: bool,
    pub value: Value,
}

/// Fill percentages over all configured fields and over required fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Completeness {
    /// Percentage of all configured fields that resolved to a filled value,
    /// rounded to two decimals.
    pub percentage: f64,
    /// Percentage of required fields filled; 0 when none are required.
    pub required_percentage: f64,
    pub filled: usize,
    pub total: usize,
    pub required_filled: usize,
    pub required_total: usize,
    pub field_status: BTreeMap<String, FieldStatus>,
}

/// Everything a mapping run produces: the resolved data plus validation
/// and completeness computed independently over it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingResult {
    pub data: ResolvedMap,
    pub validation: ValidationReport,
    pub completeness: Completeness,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_counts() {
        let report = ValidationReport {
            valid: false,
            errors: vec!["Critical field 'patient_name' is missing or empty".to_string()],
            warnings: vec!["Field 'patient_phone' format may be invalid".to_string()],
            critical_errors: vec!["Critical field 'patient_name' is missing or empty".to_string()],
            missing_optional_fields: vec!["patient_email".to_string()],
        };
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn result_serializes() {
        let mut data = ResolvedMap::new();
        data.insert("patient_name".to_string(), Value::from("Jane Doe"));
        let result = MappingResult {
            data,
            validation: ValidationReport {
                valid: true,
                ..ValidationReport::default()
            },
            completeness: Completeness::default(),
        };
        let json = serde_json::to_string(&result).expect("serialize result");
        let round: MappingResult = serde_json::from_str(&json).expect("deserialize result");
        assert!(round.validation.valid);
        assert_eq!(round.data["patient_name"], Value::from("Jane Doe"));
    }
}

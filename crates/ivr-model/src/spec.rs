//! Per-field mapping specifications.

use serde::{Deserialize, Serialize};

/// How a single target field is resolved, validated, and transformed.
///
/// `source` is one of:
/// - a plain path into the source record (`"insurance.primary.member_id"`),
/// - a `" || "`-joined fallback chain of paths,
/// - the literal `"fuzzy"` (best-match against source field names),
/// - the literal `"computed"` (expression carried in `computation`),
/// - an inline expression (`"patient_first_name + patient_last_name"`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    pub source: String,
    /// Expression evaluated when `source == "computed"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computation: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub importance: FieldImportance,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<TransformSpec>,
}

impl FieldSpec {
    /// A plain path spec with no validation or transformation.
    pub fn path(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            computation: None,
            required: false,
            importance: FieldImportance::default(),
            field_type: None,
            transform: None,
        }
    }
}

/// Validation severity tier for a required field.
///
/// A missing `Critical` required field fails validation; missing required
/// fields at lower tiers only warn, because destination templates vary in
/// which fields they truly need.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldImportance {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

/// Expected value format, checked by the validator (warnings only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Date,
    Email,
    Phone,
    Npi,
    Zip,
}

/// A named value transform, written `"kind:arg"` in configuration files
/// (e.g. `"date:m/d/Y"`, `"phone:US"`, `"boolean:yes_no"`, `"number:2"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TransformSpec {
    pub kind: String,
    pub arg: Option<String>,
}

impl TransformSpec {
    pub fn new(kind: impl Into<String>, arg: Option<&str>) -> Self {
        Self {
            kind: kind.into(),
            arg: arg.map(str::to_string),
        }
    }
}

impl TryFrom<String> for TransformSpec {
    type Error = String;

    fn try_from(raw: String) -> std::result::Result<Self, Self::Error> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err("transform must not be empty".to_string());
        }
        match trimmed.split_once(':') {
            Some((kind, arg)) => Ok(Self::new(kind, Some(arg))),
            None => Ok(Self::new(trimmed, None)),
        }
    }
}

impl From<TransformSpec> for String {
    fn from(spec: TransformSpec) -> Self {
        match spec.arg {
            Some(arg) => format!("{}:{arg}", spec.kind),
            None => spec.kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_spec_parses_kind_and_arg() {
        let spec: TransformSpec = serde_json::from_str("\"date:m/d/Y\"").unwrap();
        assert_eq!(spec.kind, "date");
        assert_eq!(spec.arg.as_deref(), Some("m/d/Y"));
    }

    #[test]
    fn transform_spec_without_arg() {
        let spec: TransformSpec = serde_json::from_str("\"trim\"").unwrap();
        assert_eq!(spec.kind, "trim");
        assert!(spec.arg.is_none());
    }

    #[test]
    fn field_spec_defaults() {
        let spec: FieldSpec = serde_json::from_str(r#"{"source": "patient_city"}"#).unwrap();
        assert!(!spec.required);
        assert_eq!(spec.importance, FieldImportance::Medium);
        assert!(spec.field_type.is_none());
        assert!(spec.transform.is_none());
    }

    #[test]
    fn field_spec_full_round_trip() {
        let json = r#"{
            "source": "patient_phone",
            "required": true,
            "importance": "critical",
            "type": "phone",
            "transform": "phone:US"
        }"#;
        let spec: FieldSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.importance, FieldImportance::Critical);
        assert_eq!(spec.field_type, Some(FieldType::Phone));
        let round: FieldSpec =
            serde_json::from_str(&serde_json::to_string(&spec).unwrap()).unwrap();
        assert_eq!(round.transform, Some(TransformSpec::new("phone", Some("US"))));
    }
}

//! Manufacturer mapping configurations.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::spec::FieldSpec;

/// The kind of document a configuration targets. IVR and order-form
/// templates use different destination field name tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    #[default]
    Ivr,
    OrderForm,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ivr => "IVR",
            Self::OrderForm => "OrderForm",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Destination name(s) a canonical field maps to.
///
/// Most fields map to a single template field. A list means multi-target
/// expansion: each destination receives a boolean derived from whether the
/// resolved value equals that destination's option (e.g. a gender field
/// split into Male/Female checkboxes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DestinationTarget {
    One(String),
    Many(Vec<String>),
}

/// Complete mapping configuration for one manufacturer.
///
/// `signature_required` and `has_order_form` are optional in the file so
/// that `reference_config` merging can tell "explicitly set" apart from
/// "absent"; use the accessor methods for the defaulted values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldMappingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_order_form: Option<bool>,
    /// Manufacturer acceptance rule, e.g. `"greater_than_4_weeks"` for
    /// wound duration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_requirement: Option<String>,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldSpec>,
    /// Canonical field name -> destination template field name(s). Fields
    /// absent from this table are silently dropped at output.
    #[serde(default)]
    pub destination_field_names: BTreeMap<String, DestinationTarget>,
    /// Overrides `destination_field_names` for order-form documents.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub order_form_field_names: BTreeMap<String, DestinationTarget>,
    /// Name of another configuration in the same bundle used as a base
    /// (one level of indirection only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_config: Option<String>,
}

impl FieldMappingConfig {
    pub fn signature_required(&self) -> bool {
        self.signature_required.unwrap_or(true)
    }

    pub fn has_order_form(&self) -> bool {
        self.has_order_form.unwrap_or(false)
    }

    pub fn required_field_count(&self) -> usize {
        self.fields.values().filter(|f| f.required).count()
    }

    /// Destination name table for the given document type. Order forms fall
    /// back to the IVR table when no dedicated table is configured.
    pub fn destination_names(&self, document_type: DocumentType) -> &BTreeMap<String, DestinationTarget> {
        match document_type {
            DocumentType::OrderForm if !self.order_form_field_names.is_empty() => {
                &self.order_form_field_names
            }
            _ => &self.destination_field_names,
        }
    }
}

/// Listing entry for a loaded manufacturer configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ManufacturerSummary {
    pub id: Option<u32>,
    pub name: String,
    pub template_id: Option<String>,
    pub signature_required: bool,
    pub has_order_form: bool,
    pub fields_count: usize,
    pub required_fields_count: usize,
}

impl From<&FieldMappingConfig> for ManufacturerSummary {
    fn from(config: &FieldMappingConfig) -> Self {
        Self {
            id: config.id,
            name: config.name.clone(),
            template_id: config.template_id.clone(),
            signature_required: config.signature_required(),
            has_order_form: config.has_order_form(),
            fields_count: config.fields.len(),
            required_fields_count: config.required_field_count(),
        }
    }
}

#![deny(unsafe_code)]

//! Conversion of a resolved map into destination template fields.
//!
//! The destination service rejects submissions that name fields absent
//! from the template, so canonical fields with no destination mapping are
//! dropped here rather than passed through.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use ivr_model::value::display_string;
use ivr_model::{DestinationTarget, DocumentType, FieldMappingConfig, ResolvedMap};

/// Canonical name prefixes whose array values are expanded by per-index
/// field specs (`icd10_code_1`, `cpt_code_2`, ...) instead of being
/// joined here.
const INDEXED_CODE_FAMILIES: [&str; 3] = ["icd10_code_", "cpt_code_", "hcpcs_code_"];

/// One field of the outgoing document submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestinationField {
    pub name: String,
    pub default_value: String,
}

/// Convert a resolved map into the ordered destination field list.
///
/// Fields are emitted in canonical name order. Nulls, empty strings, and
/// unmapped canonical fields are skipped; boolean-like values are
/// normalized to the strings `"true"`/`"false"`.
pub fn to_destination_fields(
    resolved: &ResolvedMap,
    config: &FieldMappingConfig,
    document_type: DocumentType,
) -> Vec<DestinationField> {
    let mapping = config.destination_names(document_type);
    let mut fields = Vec::new();
    let mut skipped = 0usize;

    for (canonical, value) in resolved {
        if value.is_null() || (value.as_str() == Some("")) {
            continue;
        }
        let Some(target) = mapping.get(canonical) else {
            debug!(field = %canonical, "no destination mapping, dropping field");
            skipped += 1;
            continue;
        };

        match target {
            DestinationTarget::Many(names) => {
                expand_multi_target(value, names, &mut fields);
            }
            DestinationTarget::One(name) => {
                if let Some(rendered) = render_value(canonical, value) {
                    fields.push(DestinationField {
                        name: name.clone(),
                        default_value: rendered,
                    });
                }
            }
        }
    }

    info!(
        config = %config.name,
        document_type = %document_type,
        emitted = fields.len(),
        skipped,
        "destination field conversion complete"
    );
    fields
}

/// Multi-target expansion: every destination name gets a checkbox value,
/// `"true"` for the one equal to the resolved value (case-insensitive),
/// `"false"` for the rest. A gender field mapped to `["Male", "Female"]`
/// becomes two checkbox fields.
fn expand_multi_target(value: &Value, names: &[String], fields: &mut Vec<DestinationField>) {
    let selected = display_string(value);
    for name in names {
        let checked = name.eq_ignore_ascii_case(&selected);
        fields.push(DestinationField {
            name: name.clone(),
            default_value: if checked { "true" } else { "false" }.to_string(),
        });
    }
}

fn render_value(canonical: &str, value: &Value) -> Option<String> {
    if let Some(flag) = as_boolean_like(value) {
        return Some(if flag { "true" } else { "false" }.to_string());
    }
    if let Some(items) = value.as_array() {
        if INDEXED_CODE_FAMILIES
            .iter()
            .any(|family| canonical.contains(family))
        {
            // Covered by per-index specs, never joined.
            return None;
        }
        return Some(
            items
                .iter()
                .map(display_string)
                .collect::<Vec<_>>()
                .join(", "),
        );
    }
    Some(display_string(value))
}

/// Checkbox-style values: real booleans plus their common string forms.
fn as_boolean_like(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::String(text) => match text.as_str() {
            "true" | "Yes" | "1" => Some(true),
            "false" | "No" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

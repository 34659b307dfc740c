//! Loading and resolving manufacturer configurations.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

use ivr_model::{
    DocumentType, FieldMappingConfig, ManufacturerSummary, MappingError, Result,
};

/// A document-type bundle file: keyed manufacturer configs plus product
/// code routing.
#[derive(Debug, Default, Deserialize)]
struct Bundle {
    #[serde(default)]
    manufacturers: BTreeMap<String, FieldMappingConfig>,
    #[serde(default)]
    product_mappings: BTreeMap<String, String>,
}

/// All loaded manufacturer configurations.
///
/// Built once by [`ConfigRegistry::load_dir`] and immutable afterwards, so
/// it can be shared freely across concurrent mapping runs.
#[derive(Debug, Default)]
pub struct ConfigRegistry {
    /// Per-manufacturer files under `manufacturers/`, keyed by file slug.
    dedicated: BTreeMap<String, FieldMappingConfig>,
    ivr: Bundle,
    order_form: Bundle,
    product_mappings: BTreeMap<String, String>,
}

impl ConfigRegistry {
    /// Load every configuration under `dir`.
    ///
    /// Expected layout: `manufacturers/*.json` for dedicated files, plus
    /// optional `ivr.json` and `order_form.json` bundles. A missing bundle
    /// file is an empty bundle; unreadable or malformed files are errors.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut registry = Self {
            ivr: load_bundle(&dir.join("ivr.json"))?,
            order_form: load_bundle(&dir.join("order_form.json"))?,
            ..Self::default()
        };

        let manufacturers_dir = dir.join("manufacturers");
        if manufacturers_dir.is_dir() {
            let entries = fs::read_dir(&manufacturers_dir)
                .map_err(|e| MappingError::io(&manufacturers_dir, e))?;
            for entry in entries {
                let entry = entry.map_err(|e| MappingError::io(&manufacturers_dir, e))?;
                let path = entry.path();
                if path.extension().is_none_or(|ext| ext != "json") {
                    continue;
                }
                let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                let config = load_config(&path)?;
                debug!(slug, fields = config.fields.len(), "loaded manufacturer file");
                registry.dedicated.insert(slug.to_string(), config);
            }
        }

        registry.product_mappings = registry.order_form.product_mappings.clone();
        registry
            .product_mappings
            .extend(registry.ivr.product_mappings.clone());

        info!(
            dedicated = registry.dedicated.len(),
            bundled = registry.ivr.manufacturers.len(),
            products = registry.product_mappings.len(),
            "configuration registry loaded"
        );
        Ok(registry)
    }

    /// Resolve a manufacturer's configuration for a document type.
    ///
    /// Lookup order: dedicated file by slugified name, exact bundle key,
    /// case-insensitive bundle key, then the config's own `name` (equal or
    /// containing the query, case-insensitive). The returned config has
    /// its `reference_config` indirection already merged away.
    pub fn resolve(
        &self,
        name: &str,
        document_type: DocumentType,
    ) -> Result<FieldMappingConfig> {
        if let Some(config) = self.dedicated.get(&slugify(name)) {
            return Ok(config.clone());
        }

        let bundle = match document_type {
            DocumentType::Ivr => &self.ivr,
            DocumentType::OrderForm => &self.order_form,
        };

        if let Some(config) = bundle.manufacturers.get(name) {
            return Ok(merge_reference(config.clone(), bundle));
        }
        if let Some(config) = bundle
            .manufacturers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, config)| config)
        {
            return Ok(merge_reference(config.clone(), bundle));
        }
        let query = name.to_lowercase();
        if let Some(config) = bundle.manufacturers.values().find(|config| {
            let candidate = config.name.to_lowercase();
            candidate == query || candidate.contains(&query)
        }) {
            return Ok(merge_reference(config.clone(), bundle));
        }

        Err(MappingError::ConfigurationNotFound {
            manufacturer: name.to_string(),
            document_type: document_type.to_string(),
        })
    }

    /// The manufacturer responsible for a product code, if routed.
    pub fn manufacturer_for_product(&self, product_code: &str) -> Option<&str> {
        self.product_mappings.get(product_code).map(String::as_str)
    }

    /// Summaries of every known manufacturer: dedicated files first, then
    /// bundled configs not shadowed by a dedicated file of the same name.
    pub fn list_manufacturers(&self) -> Vec<ManufacturerSummary> {
        let mut summaries: Vec<ManufacturerSummary> =
            self.dedicated.values().map(ManufacturerSummary::from).collect();
        for config in self.ivr.manufacturers.values() {
            if summaries.iter().any(|s| s.name == config.name) {
                continue;
            }
            let merged = merge_reference(config.clone(), &self.ivr);
            summaries.push(ManufacturerSummary::from(&merged));
        }
        summaries
    }

    /// Every loaded configuration, for linting. Bundle configs are
    /// reference-merged before being handed out.
    pub fn all_configs(&self) -> Vec<(String, FieldMappingConfig)> {
        let mut configs: Vec<(String, FieldMappingConfig)> = self
            .dedicated
            .iter()
            .map(|(slug, config)| (slug.clone(), config.clone()))
            .collect();
        for (bundle, label) in [(&self.ivr, "ivr"), (&self.order_form, "order_form")] {
            for (key, config) in &bundle.manufacturers {
                configs.push((format!("{label}:{key}"), merge_reference(config.clone(), bundle)));
            }
        }
        configs
    }
}

fn load_bundle(path: &Path) -> Result<Bundle> {
    if !path.exists() {
        return Ok(Bundle::default());
    }
    let raw = fs::read_to_string(path).map_err(|e| MappingError::io(path, e))?;
    serde_json::from_str(&raw).map_err(|e| MappingError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}

fn load_config(path: &Path) -> Result<FieldMappingConfig> {
    let raw = fs::read_to_string(path).map_err(|e| MappingError::io(path, e))?;
    serde_json::from_str(&raw).map_err(|e| MappingError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Flatten one level of `reference_config` indirection. The referenced
/// config is the base (fields and destination tables); the referencing
/// config's explicitly set scalar keys override it. Deeper chains are not
/// followed.
fn merge_reference(config: FieldMappingConfig, bundle: &Bundle) -> FieldMappingConfig {
    let Some(reference) = config.reference_config.as_deref() else {
        return config;
    };
    let Some(base) = bundle.manufacturers.get(reference) else {
        warn!(
            config = %config.name,
            reference,
            "reference_config target not found, using config as-is"
        );
        return config;
    };

    let mut merged = base.clone();
    merged.name = config.name;
    if config.id.is_some() {
        merged.id = config.id;
    }
    if config.template_id.is_some() {
        merged.template_id = config.template_id;
    }
    if config.signature_required.is_some() {
        merged.signature_required = config.signature_required;
    }
    if config.has_order_form.is_some() {
        merged.has_order_form = config.has_order_form;
    }
    merged.reference_config = None;
    merged
}

/// Lowercase a manufacturer name into its config file slug:
/// `"ACZ Distribution"` becomes `"acz-distribution"`.
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_fixture(dir: &Path) {
        fs::create_dir_all(dir.join("manufacturers")).unwrap();
        fs::write(
            dir.join("manufacturers/acz-distribution.json"),
            json!({
                "id": 1,
                "name": "ACZ Distribution",
                "template_id": "tpl_acz",
                "fields": {
                    "patient_name": {"source": "first + last", "required": true, "importance": "critical"}
                },
                "destination_field_names": {"patient_name": "Patient Name"}
            })
            .to_string(),
        )
        .unwrap();
        fs::write(
            dir.join("ivr.json"),
            json!({
                "manufacturers": {
                    "MedLife": {
                        "id": 2,
                        "name": "MedLife Solutions",
                        "template_id": "tpl_medlife",
                        "fields": {"member_id": {"source": "insurance.member_id"}},
                        "destination_field_names": {"member_id": "Member ID"}
                    },
                    "MedLife OEM": {
                        "name": "MedLife OEM",
                        "signature_required": false,
                        "reference_config": "MedLife"
                    }
                },
                "product_mappings": {"MDL001": "MedLife"}
            })
            .to_string(),
        )
        .unwrap();
    }

    fn registry() -> ConfigRegistry {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path());
        ConfigRegistry::load_dir(dir.path()).unwrap()
    }

    #[test]
    fn dedicated_file_resolves_by_slug() {
        let registry = registry();
        let config = registry
            .resolve("ACZ Distribution", DocumentType::Ivr)
            .unwrap();
        assert_eq!(config.template_id.as_deref(), Some("tpl_acz"));
    }

    #[test]
    fn bundle_exact_and_case_insensitive_keys() {
        let registry = registry();
        assert!(registry.resolve("MedLife", DocumentType::Ivr).is_ok());
        let config = registry.resolve("medlife", DocumentType::Ivr).unwrap();
        assert_eq!(config.name, "MedLife Solutions");
    }

    #[test]
    fn lookup_by_config_name_substring() {
        let registry = registry();
        let config = registry.resolve("Solutions", DocumentType::Ivr).unwrap();
        assert_eq!(config.name, "MedLife Solutions");
    }

    #[test]
    fn unknown_manufacturer_is_an_error() {
        let registry = registry();
        let err = registry
            .resolve("Nope Medical", DocumentType::Ivr)
            .unwrap_err();
        assert!(matches!(err, MappingError::ConfigurationNotFound { .. }));
    }

    #[test]
    fn reference_config_merges_one_level() {
        let registry = registry();
        let config = registry.resolve("MedLife OEM", DocumentType::Ivr).unwrap();
        // Base fields come from the referenced config.
        assert!(config.fields.contains_key("member_id"));
        assert_eq!(config.template_id.as_deref(), Some("tpl_medlife"));
        // Scalar overrides come from the referencing config.
        assert_eq!(config.name, "MedLife OEM");
        assert!(!config.signature_required());
        assert!(config.reference_config.is_none());
    }

    #[test]
    fn product_routing() {
        let registry = registry();
        assert_eq!(registry.manufacturer_for_product("MDL001"), Some("MedLife"));
        assert_eq!(registry.manufacturer_for_product("XXX"), None);
    }

    #[test]
    fn listing_covers_dedicated_and_bundled() {
        let registry = registry();
        let names: Vec<String> = registry
            .list_manufacturers()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert!(names.contains(&"ACZ Distribution".to_string()));
        assert!(names.contains(&"MedLife Solutions".to_string()));
        assert!(names.contains(&"MedLife OEM".to_string()));
    }

    #[test]
    fn slugify_examples() {
        assert_eq!(slugify("ACZ Distribution"), "acz-distribution");
        assert_eq!(slugify("BioWerX"), "biowerx");
        assert_eq!(slugify("Advanced Health & Co."), "advanced-health-co");
    }

    #[test]
    fn missing_bundles_load_empty() {
        let dir = tempfile::tempdir().unwrap();
        let registry = ConfigRegistry::load_dir(dir.path()).unwrap();
        assert!(registry.list_manufacturers().is_empty());
    }
}

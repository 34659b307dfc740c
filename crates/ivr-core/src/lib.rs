#![deny(unsafe_code)]

//! The end-to-end mapping pipeline.
//!
//! Wires the registry, resolver, validator, scorer, and output adapter
//! into one call: `(record, manufacturer, document type) -> outcome`. The
//! pipeline itself is stateless apart from the loaded registry and can be
//! shared across concurrent runs.

use serde_json::Value;
use tracing::info_span;

use ivr_config::ConfigRegistry;
use ivr_map::{FieldResolver, FuzzyMatcher, JaroWinklerMatcher};
use ivr_model::{DocumentType, FieldMappingConfig, MappingResult, Result};
use ivr_output::DestinationField;
use ivr_transform::{BuiltinTransforms, MappingContext, TransformAdapter};
use ivr_validate::Validator;

/// Everything one mapping run produces.
#[derive(Debug)]
pub struct MappingOutcome {
    /// The resolved configuration the run used, reference merge applied.
    pub config: FieldMappingConfig,
    pub document_type: DocumentType,
    pub result: MappingResult,
    pub destination_fields: Vec<DestinationField>,
}

/// Orchestrates a full mapping run.
///
/// The fuzzy matcher and transform adapter are swappable collaborators;
/// the defaults cover the built-in alias/similarity matching and the
/// standard transform set.
pub struct MappingPipeline {
    registry: ConfigRegistry,
    matcher: Box<dyn FuzzyMatcher>,
    transforms: Box<dyn TransformAdapter>,
    validator: Validator,
}

impl MappingPipeline {
    #[must_use]
    pub fn new(registry: ConfigRegistry) -> Self {
        Self {
            registry,
            matcher: Box::new(JaroWinklerMatcher::new()),
            transforms: Box::new(BuiltinTransforms::new()),
            validator: Validator::new(),
        }
    }

    #[must_use]
    pub fn with_matcher(mut self, matcher: Box<dyn FuzzyMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    #[must_use]
    pub fn with_transforms(mut self, transforms: Box<dyn TransformAdapter>) -> Self {
        self.transforms = transforms;
        self
    }

    pub fn registry(&self) -> &ConfigRegistry {
        &self.registry
    }

    /// Run the full pipeline for one record.
    ///
    /// Fails only when no configuration matches the manufacturer; every
    /// per-field problem lands in the result as a null value, warning, or
    /// error instead.
    pub fn map(
        &self,
        record: &Value,
        manufacturer: &str,
        document_type: DocumentType,
        ctx: &MappingContext,
    ) -> Result<MappingOutcome> {
        let span = info_span!("mapping_run", manufacturer, %document_type);
        let _guard = span.enter();

        let config = self.registry.resolve(manufacturer, document_type)?;
        let resolver = FieldResolver::new(&*self.matcher, &*self.transforms, ctx);
        let data = resolver.resolve_all(record, &config);

        let validation = self.validator.validate(&data, &config, record);
        let completeness = ivr_validate::score(&data, &config);
        let destination_fields = ivr_output::to_destination_fields(&data, &config, document_type);

        Ok(MappingOutcome {
            config,
            document_type,
            result: MappingResult {
                data,
                validation,
                completeness,
            },
            destination_fields,
        })
    }
}

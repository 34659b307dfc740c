#![deny(unsafe_code)]

//! Data model for manufacturer IVR field mapping.
//!
//! Defines the declarative mapping configuration (how each target field is
//! derived from a source record), the result types produced by a mapping
//! run, and the emptiness predicates shared across the engine.

pub mod config;
pub mod error;
pub mod result;
pub mod spec;
pub mod value;

pub use config::{
    DestinationTarget, DocumentType, FieldMappingConfig, ManufacturerSummary,
};
pub use error::{MappingError, Result};
pub use result::{Completeness, FieldStatus, MappingResult, ResolvedMap, ValidationReport};
pub use spec::{FieldImportance, FieldSpec, FieldType, TransformSpec};

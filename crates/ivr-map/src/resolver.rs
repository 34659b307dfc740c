//! Per-field strategy selection and whole-config resolution.

use serde_json::Value;
use tracing::{debug, info};

use ivr_model::value::is_missing;
use ivr_model::{FieldMappingConfig, FieldSpec, ResolvedMap};
use ivr_transform::{MappingContext, TransformAdapter};

use crate::expr::ExpressionEvaluator;
use crate::fuzzy::FuzzyMatcher;
use crate::path;

/// Resolves every configured target field against a source record.
///
/// A field that cannot be resolved maps to `null`; resolution as a whole
/// never fails. Fields are processed in configuration key order, so two
/// runs over the same inputs produce the same map.
pub struct FieldResolver<'a> {
    matcher: &'a dyn FuzzyMatcher,
    transforms: &'a dyn TransformAdapter,
    ctx: &'a MappingContext,
}

impl<'a> FieldResolver<'a> {
    pub fn new(
        matcher: &'a dyn FuzzyMatcher,
        transforms: &'a dyn TransformAdapter,
        ctx: &'a MappingContext,
    ) -> Self {
        Self {
            matcher,
            transforms,
            ctx,
        }
    }

    /// Resolve all fields of `config` against `record`.
    pub fn resolve_all(&self, record: &Value, config: &FieldMappingConfig) -> ResolvedMap {
        let mut resolved = ResolvedMap::new();
        for (target, spec) in &config.fields {
            let value = self.resolve_field(target, spec, record);
            debug!(field = %target, filled = !value.is_null(), "resolved field");
            resolved.insert(target.clone(), value);
        }
        let filled = resolved.values().filter(|v| !v.is_null()).count();
        info!(
            config = %config.name,
            fields = resolved.len(),
            filled,
            "field resolution complete"
        );
        resolved
    }

    /// Resolve one field by its spec's strategy.
    pub fn resolve_field(&self, target: &str, spec: &FieldSpec, record: &Value) -> Value {
        let value = self.resolve_source(target, spec, record);
        match (&spec.transform, value) {
            (Some(transform), Some(value)) if !value.is_null() => {
                self.transforms.transform(&value, transform)
            }
            (_, value) => value.unwrap_or(Value::Null),
        }
    }

    fn resolve_source(&self, target: &str, spec: &FieldSpec, record: &Value) -> Option<Value> {
        let source = spec.source.trim();

        if source == "computed" {
            let expression = spec.computation.as_deref()?;
            return self.evaluator().evaluate(expression, record);
        }
        if self.is_expression(source) {
            return self.evaluator().evaluate(source, record);
        }
        if source == "fuzzy" {
            return self.fuzzy_lookup(target, record);
        }
        if source.contains(" || ") {
            // Plain fallback chain. Unlike the expression-level fallback,
            // this keeps false, 0, and "0": only null and "" fall through.
            return source
                .split(" || ")
                .map(str::trim)
                .filter_map(|part| path::resolve(record, part))
                .find(|value| !is_missing(value))
                .cloned();
        }
        path::resolve(record, source).cloned()
    }

    /// An inline expression is a named computation or contains one of the
    /// arithmetic/ternary operator tokens. A bare `" || "` chain is not an
    /// expression; it resolves as a plain fallback chain above.
    fn is_expression(&self, source: &str) -> bool {
        self.transforms.knows_named(source)
            || source.contains(" + ")
            || source.contains(" * ")
            || source.contains(" / ")
            || (source.contains(" ? ") && source.contains(" : "))
    }

    fn fuzzy_lookup(&self, target: &str, record: &Value) -> Option<Value> {
        let candidates: Vec<String> = record.as_object()?.keys().cloned().collect();
        let matched = self.matcher.find_best_match(target, &candidates, record)?;
        path::resolve(record, &matched).cloned()
    }

    fn evaluator(&self) -> ExpressionEvaluator<'_> {
        ExpressionEvaluator::new(self.transforms, self.ctx)
    }
}

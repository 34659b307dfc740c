use std::fs;

use anyhow::{Context, Result, bail};
use chrono::Local;
use serde_json::Value;
use tracing::info;

use ivr_config::{ConfigRegistry, LintFinding, lint_config};
use ivr_core::{MappingOutcome, MappingPipeline};
use ivr_model::ManufacturerSummary;
use ivr_transform::{ActorContext, MappingContext};

use crate::cli::{ConfigDirArgs, MapArgs};

pub fn run_map(args: &MapArgs) -> Result<MappingOutcome> {
    let raw = fs::read_to_string(&args.record)
        .with_context(|| format!("read record {}", args.record.display()))?;
    let record: Value = serde_json::from_str(&raw)
        .with_context(|| format!("parse record {}", args.record.display()))?;
    if !record.is_object() {
        bail!("record {} must be a JSON object", args.record.display());
    }

    let registry = ConfigRegistry::load_dir(&args.config_dir)
        .with_context(|| format!("load configurations from {}", args.config_dir.display()))?;
    let pipeline = MappingPipeline::new(registry);

    let mut ctx = MappingContext::new(args.as_of.unwrap_or_else(|| Local::now().date_naive()));
    if let Some(provider) = &args.provider {
        ctx = ctx.with_actor(ActorContext {
            name: provider.clone(),
            email: None,
            npi: None,
        });
    }

    let outcome = pipeline.map(
        &record,
        &args.manufacturer,
        args.document_type.into(),
        &ctx,
    )?;
    info!(
        manufacturer = %outcome.config.name,
        valid = outcome.result.validation.valid,
        completeness = outcome.result.completeness.percentage,
        "mapping run finished"
    );
    Ok(outcome)
}

pub fn run_manufacturers(args: &ConfigDirArgs) -> Result<Vec<ManufacturerSummary>> {
    let registry = ConfigRegistry::load_dir(&args.config_dir)
        .with_context(|| format!("load configurations from {}", args.config_dir.display()))?;
    Ok(registry.list_manufacturers())
}

pub fn run_lint(args: &ConfigDirArgs) -> Result<Vec<LintFinding>> {
    let registry = ConfigRegistry::load_dir(&args.config_dir)
        .with_context(|| format!("load configurations from {}", args.config_dir.display()))?;
    let mut findings = Vec::new();
    for (_, config) in registry.all_configs() {
        findings.extend(lint_config(&config));
    }
    Ok(findings)
}

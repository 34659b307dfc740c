//! Human-readable result tables.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ivr_config::LintFinding;
use ivr_core::MappingOutcome;
use ivr_model::ManufacturerSummary;
use ivr_model::value::display_string;

use crate::logging::redact_value;

pub fn print_map_summary(outcome: &MappingOutcome) {
    let validation = &outcome.result.validation;
    let completeness = &outcome.result.completeness;

    println!("Manufacturer: {}", outcome.config.name);
    if let Some(template_id) = &outcome.config.template_id {
        println!("Template: {template_id}");
    }
    println!("Document type: {}", outcome.document_type);
    println!(
        "Valid: {}   Completeness: {:.2}% overall, {:.2}% required",
        if validation.valid { "yes" } else { "NO" },
        completeness.percentage,
        completeness.required_percentage
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Filled"),
        header_cell("Required"),
        header_cell("Value"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Center);
    for (field, status) in &completeness.field_status {
        let value = display_string(&status.value);
        table.add_row(vec![
            Cell::new(field),
            flag_cell(status.filled),
            if status.required {
                Cell::new("yes")
            } else {
                dim_cell("-")
            },
            Cell::new(redact_value(&value)),
        ]);
    }
    println!("{table}");

    print_issue_list("Critical errors", &validation.critical_errors);
    print_issue_list("Warnings", &validation.warnings);
    println!(
        "Destination fields: {} emitted",
        outcome.destination_fields.len()
    );
}

pub fn print_manufacturers(summaries: &[ManufacturerSummary]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Name"),
        header_cell("Template"),
        header_cell("Signature"),
        header_cell("Order Form"),
        header_cell("Fields"),
        header_cell("Required"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for summary in summaries {
        table.add_row(vec![
            Cell::new(&summary.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            match &summary.template_id {
                Some(template_id) => Cell::new(template_id),
                None => dim_cell("-"),
            },
            flag_cell(summary.signature_required),
            flag_cell(summary.has_order_form),
            Cell::new(summary.fields_count),
            Cell::new(summary.required_fields_count),
        ]);
    }
    println!("{table}");
}

pub fn print_lint_findings(findings: &[LintFinding]) {
    if findings.is_empty() {
        println!("No lint findings.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Manufacturer"),
        header_cell("Field"),
        header_cell("Finding"),
    ]);
    apply_table_style(&mut table);
    for finding in findings {
        table.add_row(vec![
            Cell::new(&finding.manufacturer),
            Cell::new(&finding.field),
            Cell::new(&finding.message).fg(Color::Yellow),
        ]);
    }
    println!("{table}");
}

fn print_issue_list(label: &str, issues: &[String]) {
    if issues.is_empty() {
        return;
    }
    println!("{label}:");
    for issue in issues {
        println!("- {issue}");
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn flag_cell(set: bool) -> Cell {
    if set {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

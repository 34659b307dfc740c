//! End-to-end pipeline tests over a realistic manufacturer fixture.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use ivr_config::ConfigRegistry;
use ivr_core::MappingPipeline;
use ivr_model::{DocumentType, MappingError};
use ivr_transform::MappingContext;
use serde_json::{Value, json};

fn write_fixture(dir: &Path) {
    fs::create_dir_all(dir.join("manufacturers")).unwrap();
    fs::write(
        dir.join("manufacturers/centurion.json"),
        json!({
            "id": 7,
            "name": "Centurion",
            "template_id": "tpl_centurion",
            "duration_requirement": "greater_than_4_weeks",
            "fields": {
                "patient_name": {
                    "source": "patient_first_name + patient_last_name",
                    "required": true,
                    "importance": "critical"
                },
                "patient_dob": {
                    "source": "patient_dob",
                    "required": true,
                    "importance": "high",
                    "type": "date",
                    "transform": "date:m/d/Y"
                },
                "patient_phone": {
                    "source": "cell_phone || office_phone",
                    "type": "phone",
                    "transform": "phone:US"
                },
                "patient_gender": {"source": "patient_gender"},
                "patient_email": {"source": "fuzzy", "type": "email"},
                "member_id": {
                    "source": "insurance.primary.member_id",
                    "required": true,
                    "importance": "critical"
                },
                "wound_size": {"source": "wound_length * wound_width"},
                "wound_status": {
                    "source": "wound_duration_weeks > 4 ? \"chronic\" : \"acute\""
                },
                "wound_duration": {"source": "format_duration"},
                "request_date": {"source": "computed", "computation": "current_date"}
            },
            "destination_field_names": {
                "patient_name": "Patient Name",
                "patient_dob": "Date of Birth",
                "patient_phone": "Phone",
                "patient_gender": ["Male", "Female"],
                "patient_email": "Email",
                "member_id": "Member ID",
                "wound_size": "Wound Size (sq cm)",
                "wound_status": "Wound Status",
                "wound_duration": "Wound Duration",
                "request_date": "Request Date"
            }
        })
        .to_string(),
    )
    .unwrap();
}

fn pipeline(dir: &Path) -> MappingPipeline {
    write_fixture(dir);
    MappingPipeline::new(ConfigRegistry::load_dir(dir).unwrap())
}

fn ctx() -> MappingContext {
    MappingContext::new(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
}

fn full_record() -> Value {
    json!({
        "patient_first_name": "Jane",
        "patient_last_name": "Doe",
        "patient_dob": "1985-03-10",
        "patient_gender": "Female",
        "cell_phone": "",
        "office_phone": "5551234567",
        "contact_email": "jane@example.com",
        "insurance": {"primary": {"member_id": "M123"}},
        "wound_length": 2,
        "wound_width": 3,
        "wound_duration_weeks": 6
    })
}

#[test]
fn full_run_resolves_every_strategy() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline(dir.path());

    let outcome = pipeline
        .map(&full_record(), "Centurion", DocumentType::Ivr, &ctx())
        .unwrap();
    let data = &outcome.result.data;

    assert_eq!(data["patient_name"], json!("Jane Doe"));
    assert_eq!(data["patient_dob"], json!("03/10/1985"));
    assert_eq!(data["patient_phone"], json!("(555) 123-4567"));
    assert_eq!(data["patient_email"], json!("jane@example.com"));
    assert_eq!(data["member_id"], json!("M123"));
    assert_eq!(data["wound_size"], json!(6.0));
    assert_eq!(data["wound_status"], json!("chronic"));
    assert_eq!(data["wound_duration"], json!("6 weeks"));
    assert_eq!(data["request_date"], json!("06/01/2025"));

    assert!(outcome.result.validation.valid);
    assert_eq!(outcome.result.completeness.percentage, 100.0);
    assert_eq!(outcome.result.completeness.required_percentage, 100.0);
}

#[test]
fn destination_fields_expand_and_skip() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline(dir.path());

    let outcome = pipeline
        .map(&full_record(), "Centurion", DocumentType::Ivr, &ctx())
        .unwrap();

    let find = |name: &str| {
        outcome
            .destination_fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.default_value.as_str())
    };
    assert_eq!(find("Patient Name"), Some("Jane Doe"));
    assert_eq!(find("Male"), Some("false"));
    assert_eq!(find("Female"), Some("true"));
    assert_eq!(find("Wound Status"), Some("chronic"));
    // No output field ever carries a null or empty value.
    assert!(outcome.destination_fields.iter().all(|f| !f.default_value.is_empty()));
}

#[test]
fn mapping_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline(dir.path());
    let record = full_record();

    let first = pipeline
        .map(&record, "Centurion", DocumentType::Ivr, &ctx())
        .unwrap();
    let second = pipeline
        .map(&record, "Centurion", DocumentType::Ivr, &ctx())
        .unwrap();

    assert_eq!(
        serde_json::to_value(&first.result).unwrap(),
        serde_json::to_value(&second.result).unwrap()
    );
    assert_eq!(first.destination_fields, second.destination_fields);
}

#[test]
fn partial_record_degrades_not_fails() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline(dir.path());

    let record = json!({
        "patient_first_name": "Jane",
        "patient_last_name": "Doe",
        "wound_duration_weeks": 2
    });
    let outcome = pipeline
        .map(&record, "Centurion", DocumentType::Ivr, &ctx())
        .unwrap();

    // Missing critical member_id fails validation but still yields data.
    assert!(!outcome.result.validation.valid);
    assert!(
        outcome.result.validation.critical_errors[0].contains("member_id")
    );
    // Missing high-importance dob only warns.
    assert!(
        outcome
            .result
            .validation
            .warnings
            .iter()
            .any(|w| w.contains("patient_dob"))
    );
    // Duration requirement not met at 2 weeks.
    assert!(
        outcome
            .result
            .validation
            .warnings
            .iter()
            .any(|w| w.contains("> 4 weeks"))
    );
    assert_eq!(outcome.result.data["patient_name"], json!("Jane Doe"));
    assert_eq!(outcome.result.data["wound_status"], json!("acute"));
}

#[test]
fn unknown_manufacturer_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let pipeline = pipeline(dir.path());

    let err = pipeline
        .map(&json!({}), "Nobody Medical", DocumentType::Ivr, &ctx())
        .unwrap_err();
    assert!(matches!(err, MappingError::ConfigurationNotFound { .. }));
}

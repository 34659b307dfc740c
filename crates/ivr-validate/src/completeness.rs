//! Fill-percentage scoring over a resolved map.

use serde_json::Value;

use ivr_model::value::is_filled;
use ivr_model::{Completeness, FieldMappingConfig, FieldStatus, ResolvedMap};

/// Score how completely the resolved map fills the configured fields.
///
/// Percentages are rounded to two decimals and default to 0 when the
/// denominator is 0. Boolean `false`, numeric `0`, and `"0"` are filled
/// values here; only `null` and `""` count as unfilled.
pub fn score(data: &ResolvedMap, config: &FieldMappingConfig) -> Completeness {
    let mut completeness = Completeness {
        total: config.fields.len(),
        ..Completeness::default()
    };

    for (field, spec) in &config.fields {
        let value = data.get(field).cloned().unwrap_or(Value::Null);
        let filled = is_filled(&value);

        if filled {
            completeness.filled += 1;
        }
        if spec.required {
            completeness.required_total += 1;
            if filled {
                completeness.required_filled += 1;
            }
        }

        completeness.field_status.insert(
            field.clone(),
            FieldStatus {
                filled,
                required: spec.required,
                value,
            },
        );
    }

    completeness.percentage = percentage(completeness.filled, completeness.total);
    completeness.required_percentage =
        percentage(completeness.required_filled, completeness.required_total);
    completeness
}

fn percentage(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    let raw = numerator as f64 / denominator as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config_with(total: usize, required: usize) -> FieldMappingConfig {
        let mut fields = serde_json::Map::new();
        for i in 0..total {
            fields.insert(
                format!("field_{i:02}"),
                json!({"source": "x", "required": i < required}),
            );
        }
        serde_json::from_value(json!({"name": "ACZ", "fields": fields})).unwrap()
    }

    #[test]
    fn percentages_round_to_two_decimals() {
        // 10 fields, 3 required; 7 filled overall, 2 of the required ones.
        let config = config_with(10, 3);
        let mut data = ResolvedMap::new();
        for i in 0..2 {
            data.insert(format!("field_{i:02}"), json!("v"));
        }
        for i in 3..8 {
            data.insert(format!("field_{i:02}"), json!("v"));
        }

        let completeness = score(&data, &config);
        assert_eq!(completeness.filled, 7);
        assert_eq!(completeness.total, 10);
        assert_eq!(completeness.required_filled, 2);
        assert_eq!(completeness.required_total, 3);
        assert_eq!(completeness.percentage, 70.0);
        assert_eq!(completeness.required_percentage, 66.67);
    }

    #[test]
    fn empty_config_scores_zero() {
        let config = config_with(0, 0);
        let completeness = score(&ResolvedMap::new(), &config);
        assert_eq!(completeness.percentage, 0.0);
        assert_eq!(completeness.required_percentage, 0.0);
    }

    #[test]
    fn false_zero_and_zero_string_are_filled() {
        let config = config_with(4, 0);
        let mut data = ResolvedMap::new();
        data.insert("field_00".to_string(), json!(false));
        data.insert("field_01".to_string(), json!(0));
        data.insert("field_02".to_string(), json!("0"));
        data.insert("field_03".to_string(), json!(""));

        let completeness = score(&data, &config);
        assert_eq!(completeness.filled, 3);
        assert!(completeness.field_status["field_00"].filled);
        assert!(!completeness.field_status["field_03"].filled);
    }

    #[test]
    fn field_status_tracks_requiredness_and_value() {
        let config = config_with(2, 1);
        let mut data = ResolvedMap::new();
        data.insert("field_00".to_string(), json!("Jane"));

        let completeness = score(&data, &config);
        let status = &completeness.field_status["field_00"];
        assert!(status.filled && status.required);
        assert_eq!(status.value, json!("Jane"));
        assert_eq!(completeness.field_status["field_01"].value, Value::Null);
    }
}

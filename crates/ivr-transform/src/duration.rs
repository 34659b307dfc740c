//! Wound duration rendering for the `format_duration` computation.
//!
//! Source extraction precomputes `wound_duration_years` / `_months` /
//! `_weeks` / `_days` from the wound start date; this module renders the
//! largest non-zero unit as human-readable text ("6 weeks", "1 year").

use serde_json::Value;

const UNITS: &[(&str, &str)] = &[
    ("wound_duration_years", "year"),
    ("wound_duration_months", "month"),
    ("wound_duration_weeks", "week"),
    ("wound_duration_days", "day"),
];

/// Render the wound duration carried in a source record, or `None` when no
/// duration component is present or all are zero.
pub fn format_duration(record: &Value) -> Option<String> {
    let object = record.as_object()?;
    for (key, unit) in UNITS {
        let Some(raw) = object.get(*key) else {
            continue;
        };
        let count = match raw {
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => s.trim().parse().ok()?,
            _ => continue,
        };
        if count >= 1.0 {
            let count = count.floor() as i64;
            let plural = if count == 1 { "" } else { "s" };
            return Some(format!("{count} {unit}{plural}"));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prefers_largest_unit() {
        let record = json!({
            "wound_duration_years": 1,
            "wound_duration_months": 14,
            "wound_duration_weeks": 60,
        });
        assert_eq!(format_duration(&record).as_deref(), Some("1 year"));
    }

    #[test]
    fn skips_zero_units() {
        let record = json!({
            "wound_duration_years": 0,
            "wound_duration_months": 0,
            "wound_duration_weeks": 6,
            "wound_duration_days": 42,
        });
        assert_eq!(format_duration(&record).as_deref(), Some("6 weeks"));
    }

    #[test]
    fn accepts_numeric_strings() {
        let record = json!({"wound_duration_days": "10"});
        assert_eq!(format_duration(&record).as_deref(), Some("10 days"));
    }

    #[test]
    fn none_when_absent() {
        assert_eq!(format_duration(&json!({})), None);
        assert_eq!(format_duration(&json!({"wound_duration_days": 0})), None);
    }
}

//! Date parsing and rendering for the `date:` transform family.

use chrono::NaiveDate;

/// Input formats accepted when parsing a date value, tried in order.
const INPUT_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%m-%d-%Y"];

/// Parse a date from any supported input format. Datetime strings are
/// truncated to their date part first.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    // ISO datetimes: keep the date portion only.
    let date_part = trimmed.split(['T', ' ']).next().unwrap_or(trimmed);
    for format in INPUT_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(date_part, format) {
            return Some(date);
        }
    }
    None
}

/// Render a date in one of the configured output styles (`m/d/Y`,
/// `Y-m-d`, `d/m/Y`). Unknown styles return `None`.
pub fn render_date(date: NaiveDate, style: &str) -> Option<String> {
    let format = match style {
        "m/d/Y" => "%m/%d/%Y",
        "Y-m-d" => "%Y-%m-%d",
        "d/m/Y" => "%d/%m/%Y",
        _ => return None,
    };
    Some(date.format(format).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_and_us_dates() {
        let expected = NaiveDate::from_ymd_opt(1961, 4, 12).unwrap();
        assert_eq!(parse_date("1961-04-12"), Some(expected));
        assert_eq!(parse_date("04/12/1961"), Some(expected));
        assert_eq!(parse_date("1961-04-12T08:00:00Z"), Some(expected));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn renders_styles() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(render_date(date, "m/d/Y").as_deref(), Some("01/05/2024"));
        assert_eq!(render_date(date, "Y-m-d").as_deref(), Some("2024-01-05"));
        assert_eq!(render_date(date, "d/m/Y").as_deref(), Some("05/01/2024"));
        assert_eq!(render_date(date, "bogus"), None);
    }
}

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const INVALID: &str = "Invalid Date";
const DISPLAY: &str = "%a, %-d %b %Y";

/// Formats a backend-supplied timestamp for display, e.g. "Fri, 26 Jan 2024".
/// Accepts RFC 3339, naive ISO datetimes (Python `isoformat()`) and bare
/// dates. Fails closed: missing or unparsable input yields "Invalid Date".
pub fn format_date(input: Option<&str>) -> String {
    let Some(raw) = input else {
        return INVALID.to_string();
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return INVALID.to_string();
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return datetime.format(DISPLAY).to_string();
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return datetime.format(DISPLAY).to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format(DISPLAY).to_string();
    }

    INVALID.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_garbage_inputs_fail_closed() {
        assert_eq!(format_date(None), "Invalid Date");
        assert_eq!(format_date(Some("")), "Invalid Date");
        assert_eq!(format_date(Some("   ")), "Invalid Date");
        assert_eq!(format_date(Some("not-a-date")), "Invalid Date");
        assert_eq!(format_date(Some("2024-13-40")), "Invalid Date");
    }

    #[test]
    fn bare_date_renders_with_weekday() {
        assert_eq!(format_date(Some("2024-01-26")), "Fri, 26 Jan 2024");
    }

    #[test]
    fn naive_isoformat_timestamp_is_accepted() {
        // The backend writes datetime.now().isoformat().
        assert_eq!(
            format_date(Some("2025-09-05T14:30:00.123456")),
            "Fri, 5 Sep 2025"
        );
    }

    #[test]
    fn rfc3339_timestamp_is_accepted() {
        assert_eq!(
            format_date(Some("2025-01-26T10:00:00+05:30")),
            "Sun, 26 Jan 2025"
        );
    }
}

use chrono::{DateTime, NaiveDateTime};

const DISPLAY_FORMAT: &str = "%B %-d, %Y %H:%M";

/// Long form of a backend timestamp, e.g. `March 4, 2024 09:30`.
///
/// Accepts RFC 3339 and naive `YYYY-MM-DDTHH:MM:SS`; anything else is shown as sent.
#[must_use]
pub fn format_timestamp(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
        return value.format(DISPLAY_FORMAT).to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(value) = NaiveDateTime::parse_from_str(raw, pattern) {
            return value.format(DISPLAY_FORMAT).to_string();
        }
    }
    raw.to_owned()
}

#[cfg(test)]
mod tests {
    use super::format_timestamp;

    #[test]
    fn formats_known_shapes() {
        assert_eq!(format_timestamp("2024-03-04T09:30:00Z"), "March 4, 2024 09:30");
        assert_eq!(format_timestamp("2024-03-04T09:30:12.5"), "March 4, 2024 09:30");
        assert_eq!(format_timestamp("2024-12-25 18:05:00"), "December 25, 2024 18:05");
    }

    #[test]
    fn leaves_unknown_text_alone() {
        assert_eq!(format_timestamp("next week"), "next week");
        assert_eq!(format_timestamp(""), "");
    }
}

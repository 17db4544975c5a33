//! Time and timestamp helpers.

use chrono::{DateTime, SecondsFormat, Utc};

/// UTC timestamp used for `created_at` and `updated_at`.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Format a timestamp as fixed-width RFC 3339 (nanoseconds, `Z` suffix).
///
/// Every output has the same length, so lexicographic order of the strings
/// matches chronological order.
#[must_use]
pub fn to_sortable_string(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        let after = Utc::now();
        assert!(ts >= before);
        assert!(ts <= after);
    }

    #[test]
    fn should_format_with_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let fractional = whole + chrono::Duration::nanoseconds(1_500);
        let a = to_sortable_string(whole);
        let b = to_sortable_string(fractional);
        assert_eq!(a, "2024-05-01T12:00:00.000000000Z");
        assert_eq!(a.len(), b.len());
        assert!(a < b);
    }

    #[test]
    fn should_parse_back_losslessly() {
        let ts = now();
        let text = to_sortable_string(ts);
        let parsed = DateTime::parse_from_rfc3339(&text).unwrap();
        assert_eq!(parsed.with_timezone(&Utc), ts);
    }
}

//! Expiry arithmetic for uploaded objects.
//!
//! The expiry timestamp returned to callers must match the lifecycle rule the
//! storage backend applies, so both the addition and the wire format live in
//! one place.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// Compute the expiry instant for an upload accepted at `now`.
pub fn expires_at(now: DateTime<Utc>, ttl_days: u32) -> DateTime<Utc> {
    now + Duration::days(i64::from(ttl_days))
}

/// Format an expiry as RFC 3339 with second precision and a literal `Z`.
///
/// Fractional seconds are dropped so the value is stable regardless of the
/// clock resolution it was computed from.
pub fn format_expiry(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_expiry() {
        let d = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_expiry(d), "2020-01-01T00:00:00Z");
    }

    #[test]
    fn test_format_expiry_strips_fractional_seconds() {
        let d = Utc
            .timestamp_opt(1_577_836_800, 123_456_789)
            .single()
            .unwrap();
        assert_eq!(format_expiry(d), "2020-01-01T00:00:00Z");
    }

    #[test]
    fn test_expires_at_adds_days() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 30, 45).unwrap();
        let at = expires_at(now, 7);
        assert_eq!(format_expiry(at), "2024-03-17T12:30:45Z");
    }
}

//! Timestamp parsing and formatting for radar product identifiers.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};

/// Compact timestamp layout used in product file names (`202601240000`).
pub const COMPACT_FORMAT: &str = "%Y%m%d%H%M";

const COMPACT_LEN: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeParseError {
    #[error("Invalid time format: {0}")]
    InvalidFormat(String),
}

/// Parse a compact `YYYYMMDDHHMM` timestamp.
///
/// A trailing `Z` or `±HHMM` offset is honoured. Without one the value is
/// taken to be UTC, which is what the radar network publishes.
pub fn parse_compact(token: &str) -> Result<DateTime<Utc>, TimeParseError> {
    let invalid = || TimeParseError::InvalidFormat(token.to_string());

    let digits = token.get(..COMPACT_LEN).ok_or_else(invalid)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    match &token[COMPACT_LEN..] {
        "" | "Z" => {
            let naive =
                NaiveDateTime::parse_from_str(digits, COMPACT_FORMAT).map_err(|_| invalid())?;
            Ok(Utc.from_utc_datetime(&naive))
        }
        offset if offset.starts_with('+') || offset.starts_with('-') => {
            DateTime::parse_from_str(token, "%Y%m%d%H%M%z")
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|_| invalid())
        }
        _ => Err(invalid()),
    }
}

/// Parse an ISO 8601 timestamp as found in WMS/WFS documents.
///
/// Values without an offset are read as UTC.
pub fn parse_iso8601(s: &str) -> Result<DateTime<Utc>, TimeParseError> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for layout in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, layout) {
            return Ok(Utc.from_utc_datetime(&ndt));
        }
    }

    Err(TimeParseError::InvalidFormat(s.to_string()))
}

/// ISO 8601 in UTC with a `Z` suffix, never `+00:00`.
pub fn format_iso8601(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Render back to the compact file-name layout.
pub fn format_compact(dt: &DateTime<Utc>) -> String {
    dt.format(COMPACT_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_compact_assumes_utc() {
        let dt = parse_compact("202601240000").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 1, 24, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_compact_with_offset() {
        let dt = parse_compact("202601241200+0200").unwrap();
        assert_eq!(dt.hour(), 10);

        let zulu = parse_compact("202601241200Z").unwrap();
        assert_eq!(zulu.hour(), 12);
    }

    #[test]
    fn test_parse_compact_rejects_garbage() {
        assert!(parse_compact("2026012400").is_err());
        assert!(parse_compact("+20260124000").is_err());
        assert!(parse_compact("202613240000").is_err());
        assert!(parse_compact("202601240000x").is_err());
        assert!(parse_compact("fikau").is_err());
    }

    #[test]
    fn test_parse_iso8601_variants() {
        let expected = Utc.with_ymd_and_hms(2026, 1, 24, 0, 5, 0).unwrap();
        assert_eq!(parse_iso8601("2026-01-24T00:05:00Z").unwrap(), expected);
        assert_eq!(parse_iso8601("2026-01-24T02:05:00+02:00").unwrap(), expected);
        assert_eq!(parse_iso8601("2026-01-24T00:05:00").unwrap(), expected);
        assert_eq!(parse_iso8601("2026-01-24T00:05").unwrap(), expected);
        assert!(parse_iso8601("yesterday").is_err());
    }

    #[test]
    fn test_format_iso8601_uses_zulu() {
        let dt = Utc.with_ymd_and_hms(2026, 1, 24, 0, 5, 0).unwrap();
        assert_eq!(format_iso8601(&dt), "2026-01-24T00:05:00Z");
        assert_eq!(format_compact(&dt), "202601240005");
    }
}

//! Filesystem-safe timestamp convention
//!
//! Backup filenames and registry quarantine side-files embed the current
//! instant as ISO-8601 with `:` and `.` replaced by `-`, e.g.
//! `2026-08-25T14-03-11-042Z`. Replacing the separators keeps the names
//! portable across filesystems while staying lexically sortable.

use chrono::{DateTime, Utc};

/// Length of a formatted timestamp: `YYYY-MM-DDTHH-mm-ss-sssZ`
pub const TIMESTAMP_LEN: usize = 24;

/// Format the current instant for embedding in a filename
pub fn file_timestamp() -> String {
    format_file_timestamp(Utc::now())
}

/// Format a given instant for embedding in a filename
pub fn format_file_timestamp(instant: DateTime<Utc>) -> String {
    instant
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
        .replace([':', '.'], "-")
}

/// Parse the timestamp embedded at the end of a filename stem
///
/// Expects the stem to end with the fixed-format pattern
/// `...YYYY-MM-DDTHH-mm-ss-sssZ`. Returns `None` when the suffix does not
/// parse; callers sort such entries last rather than excluding them.
pub fn parse_file_timestamp(stem: &str) -> Option<DateTime<Utc>> {
    let bytes = stem.as_bytes();
    if bytes.len() < TIMESTAMP_LEN {
        return None;
    }

    // Restore the separators the filename variant replaced: positions 13
    // and 16 are the time colons, 19 is the fractional-second dot.
    let mut iso: Vec<u8> = bytes[bytes.len() - TIMESTAMP_LEN..].to_vec();
    if iso[13] != b'-' || iso[16] != b'-' || iso[19] != b'-' {
        return None;
    }
    iso[13] = b':';
    iso[16] = b':';
    iso[19] = b'.';

    let iso = String::from_utf8(iso).ok()?;
    DateTime::parse_from_rfc3339(&iso)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_replaces_separators() {
        let instant = Utc.with_ymd_and_hms(2026, 8, 25, 14, 3, 11).unwrap();
        let formatted = format_file_timestamp(instant);
        assert_eq!(formatted, "2026-08-25T14-03-11-000Z");
        assert_eq!(formatted.len(), TIMESTAMP_LEN);
        assert!(!formatted.contains(':'));
        assert!(!formatted.contains('.'));
    }

    #[test]
    fn test_round_trip() {
        let now = Utc::now();
        let parsed = parse_file_timestamp(&format_file_timestamp(now)).unwrap();
        // Formatting truncates to millisecond precision
        assert_eq!(parsed.timestamp_millis(), now.timestamp_millis());
    }

    #[test]
    fn test_parse_with_prefix() {
        let parsed = parse_file_timestamp("pre-switch-to-work-2026-08-25T14-03-11-042Z");
        assert!(parsed.is_some());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_file_timestamp("").is_none());
        assert!(parse_file_timestamp("short").is_none());
        assert!(parse_file_timestamp("backup-not-a-real-timestamp-here").is_none());
        assert!(parse_file_timestamp("backup-2026-13-99T99-99-99-999Z").is_none());
    }
}

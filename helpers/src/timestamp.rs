use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Format used by the timing feed if no UTC offset is attached to a timestamp.
const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// parse_timestamp converts an ISO 8601 timestamp as delivered by the timing feed into a UTC date
/// time. Timestamps with an offset (RFC 3339) are converted to UTC, timestamps without an offset
/// are interpreted as UTC. None is returned if the string cannot be parsed.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(s, NAIVE_FORMAT)
        .ok()
        .map(|t| Utc.from_utc_datetime(&t))
}

/// format_timestamp is the inverse of parse_timestamp (always with offset and microseconds).
pub fn format_timestamp(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(chrono::SecondsFormat::Micros, false)
}

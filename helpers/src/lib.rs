pub mod general;
pub mod timestamp;


#[cfg(test)]
mod timestamp_tests {
    use crate::timestamp::{format_timestamp, parse_timestamp};
    use chrono::{TimeZone, Timelike, Utc};

    #[test]
    fn test_parse_timestamp_rfc3339() {
        let t = parse_timestamp("2023-09-16T13:03:35.292000+00:00").unwrap();
        let t_exp = Utc.with_ymd_and_hms(2023, 9, 16, 13, 3, 35).unwrap()
            + chrono::Duration::milliseconds(292);
        assert_eq!(t, t_exp);
    }
    #[test]
    fn test_parse_timestamp_offset() {
        let t = parse_timestamp("2023-09-16T15:03:35+02:00").unwrap();
        assert_eq!(t.hour(), 13);
    }
    #[test]
    fn test_parse_timestamp_naive() {
        let t = parse_timestamp("2023-09-16T13:03:35.5").unwrap();
        assert_eq!(t.second(), 35);
        assert_eq!(t.nanosecond(), 500_000_000);
    }
    #[test]
    fn test_parse_timestamp_malformed() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2023-13-40T99:00:00Z").is_none());
    }
    #[test]
    fn test_format_timestamp_roundtrip() {
        let t = parse_timestamp("2023-09-16T13:03:35.292000+00:00").unwrap();
        assert_eq!(format_timestamp(&t), "2023-09-16T13:03:35.292000+00:00");
    }
}

use chrono::{DateTime, Utc};

/// Timestamp format used in work friendly names and "last run" log lines.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Formats a timestamp the way it appears in run announcements,
/// e.g. "2024-01-15 09:30:00". Always UTC.
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Converts a duration to fractional days, the unit the connector's
/// scheduling messages are reported in.
pub fn duration_as_days(duration: chrono::Duration) -> f64 {
    duration.num_seconds() as f64 / (60.0 * 60.0 * 24.0)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    #[test]
    fn formats_timestamps_in_utc() {
        let time = Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap();

        assert_eq!(format_timestamp(time), "2024-01-15 09:30:00");
    }

    #[test]
    fn converts_durations_to_fractional_days() {
        assert_eq!(duration_as_days(Duration::days(2)), 2.0);
        assert_eq!(duration_as_days(Duration::hours(12)), 0.5);
        assert_eq!(duration_as_days(Duration::days(-1)), -1.0);
    }
}

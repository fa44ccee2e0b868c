use chrono::{DateTime, Datelike, NaiveDate, Utc};

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;
    pub const MS_IN_D: i64 = Self::MS_IN_H * 24;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";

    /// Parses a `YYYY-MM-DD` CLI argument.
    pub fn parse_date(text: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(text, Self::STANDARD_TIME_FORMAT).ok()
    }
}

// Time Helper functions

/// Midnight UTC of `date`, in seconds since the epoch (the chart API works in seconds).
pub fn date_to_epoch_sec(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or(0)
}

pub fn epoch_ms_to_utc(epoch_ms: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(epoch_ms)
}

/// Calendar month (1..=12) of a millisecond timestamp, in UTC.
pub fn month_of_epoch_ms(epoch_ms: i64) -> Option<u32> {
    epoch_ms_to_utc(epoch_ms).map(|dt| dt.month())
}

pub fn epoch_ms_to_date_string(epoch_ms: i64) -> String {
    // Used for display purposes
    epoch_ms_to_utc(epoch_ms)
        .map(|dt| dt.format(TimeUtils::STANDARD_TIME_FORMAT).to_string())
        .unwrap_or_else(|| "invalid".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_is_taken_in_utc() {
        // 2024-03-31T23:00:00Z
        assert_eq!(month_of_epoch_ms(1_711_926_000_000), Some(3));
        // 2024-04-01T00:00:00Z
        assert_eq!(month_of_epoch_ms(1_711_929_600_000), Some(4));
    }

    #[test]
    fn date_round_trips_through_epoch() {
        let date = TimeUtils::parse_date("2010-01-01").unwrap();
        let secs = date_to_epoch_sec(date);
        assert_eq!(secs, 1_262_304_000);
        assert_eq!(epoch_ms_to_date_string(secs * TimeUtils::MS_IN_S), "2010-01-01");
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(TimeUtils::parse_date("2010-13-01").is_none());
        assert!(TimeUtils::parse_date("yesterday").is_none());
    }
}

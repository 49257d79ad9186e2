use chrono::{DateTime, Utc};

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const MS_IN_MIN: i64 = Self::MS_IN_S * 60;
    pub const MS_IN_H: i64 = Self::MS_IN_MIN * 60;
    pub const MS_IN_D: i64 = Self::MS_IN_H * 24;
    pub const MS_IN_W: i64 = Self::MS_IN_D * 7;
    pub const MS_IN_1_M: i64 = Self::MS_IN_D * 30;
    pub const MS_IN_Y: i64 = Self::MS_IN_D * 365;

    pub const CLOCK_TIME_FORMAT: &str = "%H:%M:%S";
    pub const CALENDAR_DATE_FORMAT: &str = "%b %d";
    pub const TOOLTIP_DATE_FORMAT: &str = "%m/%d/%Y";
}

fn to_utc(epoch_ms: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(epoch_ms)
}

fn format_epoch_ms(epoch_ms: i64, fmt: &str) -> String {
    // Out-of-range timestamps render as an empty label rather than panicking
    to_utc(epoch_ms)
        .map(|dt| dt.format(fmt).to_string())
        .unwrap_or_default()
}

/// "14:03:27"
pub fn format_clock_time(epoch_ms: i64) -> String {
    format_epoch_ms(epoch_ms, TimeUtils::CLOCK_TIME_FORMAT)
}

/// "Nov 14"
pub fn format_calendar_date(epoch_ms: i64) -> String {
    format_epoch_ms(epoch_ms, TimeUtils::CALENDAR_DATE_FORMAT)
}

/// "11/14/2023"
pub fn format_tooltip_date(epoch_ms: i64) -> String {
    format_epoch_ms(epoch_ms, TimeUtils::TOOLTIP_DATE_FORMAT)
}

pub fn now_timestamp_ms() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn how_many_seconds_ago(past_timestamp_ms: i64) -> i64 {
    (now_timestamp_ms() - past_timestamp_ms) / 1000
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2023-11-14T22:13:20Z
    const T: i64 = 1_700_000_000_000;

    #[test]
    fn test_clock_time() {
        assert_eq!(format_clock_time(T), "22:13:20");
    }

    #[test]
    fn test_calendar_date() {
        assert_eq!(format_calendar_date(T), "Nov 14");
    }

    #[test]
    fn test_tooltip_date() {
        assert_eq!(format_tooltip_date(T), "11/14/2023");
    }

    #[test]
    fn test_out_of_range_is_empty() {
        assert_eq!(format_clock_time(i64::MAX), "");
    }
}

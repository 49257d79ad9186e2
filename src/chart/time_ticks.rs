//! Calendar-aware tick positions for time axes (UTC).
//!
//! Picks the candidate interval (1s, 5s, ... 3 months, years) whose spacing is
//! closest to `span / count`, then emits the interval boundaries in range.

use chrono::{DateTime, Datelike, NaiveDate, Weekday};

use crate::utils::TimeUtils;
use crate::utils::maths_utils;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

// (unit, step, approximate duration in ms) ascending by duration
const TICK_INTERVALS: [(TimeUnit, i64, i64); 18] = [
    (TimeUnit::Second, 1, TimeUtils::MS_IN_S),
    (TimeUnit::Second, 5, 5 * TimeUtils::MS_IN_S),
    (TimeUnit::Second, 15, 15 * TimeUtils::MS_IN_S),
    (TimeUnit::Second, 30, 30 * TimeUtils::MS_IN_S),
    (TimeUnit::Minute, 1, TimeUtils::MS_IN_MIN),
    (TimeUnit::Minute, 5, 5 * TimeUtils::MS_IN_MIN),
    (TimeUnit::Minute, 15, 15 * TimeUtils::MS_IN_MIN),
    (TimeUnit::Minute, 30, 30 * TimeUtils::MS_IN_MIN),
    (TimeUnit::Hour, 1, TimeUtils::MS_IN_H),
    (TimeUnit::Hour, 3, 3 * TimeUtils::MS_IN_H),
    (TimeUnit::Hour, 6, 6 * TimeUtils::MS_IN_H),
    (TimeUnit::Hour, 12, 12 * TimeUtils::MS_IN_H),
    (TimeUnit::Day, 1, TimeUtils::MS_IN_D),
    (TimeUnit::Day, 2, 2 * TimeUtils::MS_IN_D),
    (TimeUnit::Week, 1, TimeUtils::MS_IN_W),
    (TimeUnit::Month, 1, TimeUtils::MS_IN_1_M),
    (TimeUnit::Month, 3, 3 * TimeUtils::MS_IN_1_M),
    (TimeUnit::Year, 1, TimeUtils::MS_IN_Y),
];

// Hard stop for pathological domains
const MAX_TICKS: usize = 10_000;

enum Interval {
    /// Sub-second spans: plain numeric ticks on the millisecond axis
    Millis,
    Calendar(TimeUnit, i64),
}

fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let inc = maths_utils::tick_increment(start, stop, count as f64);
    if inc < 0.0 { 1.0 / -inc } else { inc }
}

fn choose_interval(start: i64, stop: i64, count: usize) -> Interval {
    let target = (stop - start) as f64 / count as f64;
    let i = TICK_INTERVALS.partition_point(|&(_, _, duration)| (duration as f64) <= target);

    if i == TICK_INTERVALS.len() {
        let yr = TimeUtils::MS_IN_Y as f64;
        let step = tick_step(start as f64 / yr, stop as f64 / yr, count).round().max(1.0);
        return Interval::Calendar(TimeUnit::Year, step as i64);
    }
    if i == 0 {
        return Interval::Millis;
    }

    let (_, _, below) = TICK_INTERVALS[i - 1];
    let (_, _, above) = TICK_INTERVALS[i];
    let pick = if target / (below as f64) < (above as f64) / target {
        i - 1
    } else {
        i
    };
    let (unit, step, _) = TICK_INTERVALS[pick];
    Interval::Calendar(unit, step)
}

pub fn time_ticks(start: i64, stop: i64, count: usize) -> Vec<i64> {
    if count == 0 {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    match choose_interval(start, stop, count) {
        Interval::Millis => {
            let mut ticks: Vec<i64> = maths_utils::ticks(start as f64, stop as f64, count)
                .into_iter()
                .map(|t| t.round() as i64)
                .collect();
            ticks.dedup();
            ticks
        }
        Interval::Calendar(unit, step) => match unit {
            TimeUnit::Second => fixed_ticks(start, stop, step * TimeUtils::MS_IN_S),
            TimeUnit::Minute => fixed_ticks(start, stop, step * TimeUtils::MS_IN_MIN),
            TimeUnit::Hour => fixed_ticks(start, stop, step * TimeUtils::MS_IN_H),
            _ => calendar_ticks(start, stop, unit, step),
        },
    }
}

/// Multiples of `period` since the epoch within `[start, stop]`
fn fixed_ticks(start: i64, stop: i64, period: i64) -> Vec<i64> {
    let first = start.div_euclid(period) * period;
    let first = if first < start { first + period } else { first };
    (0..)
        .map(|k| first + k * period)
        .take_while(|&t| t <= stop)
        .take(MAX_TICKS)
        .collect()
}

fn midnight_ms(date: NaiveDate) -> Option<i64> {
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}

fn first_of_next_month(date: NaiveDate) -> Option<NaiveDate> {
    if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    }
}

fn advance(date: NaiveDate, unit: TimeUnit) -> Option<NaiveDate> {
    match unit {
        TimeUnit::Day | TimeUnit::Week => date.succ_opt(),
        TimeUnit::Month => first_of_next_month(date),
        TimeUnit::Year => NaiveDate::from_ymd_opt(date.year() + 1, 1, 1),
        _ => None,
    }
}

/// Calendar filter for stepped intervals: Sundays for weeks, otherwise the field must be a multiple of `step`
fn keeps(date: NaiveDate, unit: TimeUnit, step: i64) -> bool {
    match unit {
        TimeUnit::Day => (date.day0() as i64) % step == 0,
        TimeUnit::Week => date.weekday() == Weekday::Sun,
        TimeUnit::Month => (date.month0() as i64) % step == 0,
        TimeUnit::Year => (date.year() as i64) % step == 0,
        _ => true,
    }
}

fn calendar_ticks(start: i64, stop: i64, unit: TimeUnit, step: i64) -> Vec<i64> {
    let mut out = Vec::new();
    let Some(start_dt) = DateTime::from_timestamp_millis(start) else {
        return out;
    };

    let day = start_dt.date_naive();
    let floor = match unit {
        TimeUnit::Month => NaiveDate::from_ymd_opt(day.year(), day.month(), 1),
        TimeUnit::Year => NaiveDate::from_ymd_opt(day.year(), 1, 1),
        _ => Some(day),
    };
    let Some(mut date) = floor else {
        return out;
    };

    while out.len() < MAX_TICKS {
        let Some(t) = midnight_ms(date) else { break };
        if t > stop {
            break;
        }
        if t >= start && keeps(date, unit, step) {
            out.push(t);
        }
        match advance(date, unit) {
            Some(next) => date = next,
            None => break,
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2023-11-14T22:13:20Z
    const T: i64 = 1_700_000_000_000;

    #[test]
    fn test_one_minute_span_uses_15s_ticks() {
        let ticks = time_ticks(T, T + 60_000, 5);
        // 60s / 5 = 12s target -> 15s interval
        assert!(ticks.iter().all(|t| t % 15_000 == 0));
        assert!(ticks.iter().all(|&t| t >= T && t <= T + 60_000));
        assert_eq!(ticks.len(), 4);
    }

    #[test]
    fn test_thirty_day_span_uses_week_ticks() {
        let ticks = time_ticks(T, T + 30 * TimeUtils::MS_IN_D, 5);
        assert!(!ticks.is_empty());
        for t in &ticks {
            let date = DateTime::from_timestamp_millis(*t).unwrap().date_naive();
            assert_eq!(date.weekday(), Weekday::Sun);
            assert_eq!(t % TimeUtils::MS_IN_D, 0);
        }
    }

    #[test]
    fn test_one_day_span_uses_day_boundary() {
        // 24h / 5 = 4.8h target -> 6h interval
        let ticks = time_ticks(T, T + TimeUtils::MS_IN_D, 5);
        assert!(ticks.iter().all(|t| t % (6 * TimeUtils::MS_IN_H) == 0));
    }

    #[test]
    fn test_sub_second_span() {
        let ticks = time_ticks(0, 1, 5);
        assert_eq!(ticks.first(), Some(&0));
        assert_eq!(ticks.last(), Some(&1));
    }

    #[test]
    fn test_equal_bounds() {
        assert_eq!(time_ticks(T, T, 5), vec![T]);
    }
}

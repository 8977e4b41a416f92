// Copyright © SixtyFPS GmbH <info@slint.dev>
// SPDX-License-Identifier: MIT

//! Unit and timestamp conversions applied to raw sensor payloads.

use chrono::{DateTime, NaiveTime, TimeZone};

/// Fixed offset used for chart labels: Eastern Standard Time, UTC-5, without
/// daylight saving.
pub const EST_OFFSET_MS: i64 = -5 * 60 * 60 * 1000;

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Converts a reading in millidegrees Celsius to degrees Fahrenheit.
pub fn millidegrees_to_fahrenheit(millidegrees: f64) -> f64 {
    let celsius = millidegrees * 0.001;
    (celsius * 9.0 / 5.0) + 32.0
}

/// Formats a Unix timestamp in milliseconds as `H:MM:SS` in EST.
///
/// Minutes and seconds are zero padded, hours are not (`3:00:00`, never
/// `03:00:00`).
pub fn format_est_time(epoch_ms: i64) -> String {
    // Widened so that the offset can never overflow at the ends of the i64 range.
    let shifted = i128::from(epoch_ms) + i128::from(EST_OFFSET_MS);
    let ms_of_day = shifted.rem_euclid(i128::from(MS_PER_DAY)) as i64;
    let seconds = (ms_of_day / 1000) as u32;

    NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
        .unwrap_or_default()
        .format("%-H:%M:%S")
        .to_string()
}

/// Formats a wall-clock reading the way the live status panel shows it, e.g. `3:04:05 PM`.
pub fn format_clock_time<Tz: TimeZone>(time: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format("%-I:%M:%S %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    #[test]
    fn fahrenheit_reference_points() {
        assert_close(millidegrees_to_fahrenheit(0.0), 32.0);
        assert_close(millidegrees_to_fahrenheit(100_000.0), 212.0);
        assert_close(millidegrees_to_fahrenheit(-40_000.0), -40.0);
        assert!((millidegrees_to_fahrenheit(23_000.0) - 73.4).abs() < 0.01);
    }

    #[test]
    fn fahrenheit_is_monotonic() {
        let readings = [-273_150.0, -1_000.0, -1.0, 0.0, 0.5, 1.0, 21_500.0, 1_000_000.0];
        for pair in readings.windows(2) {
            assert!(millidegrees_to_fahrenheit(pair[0]) < millidegrees_to_fahrenheit(pair[1]));
        }
    }

    #[test]
    fn est_time_does_not_pad_hours() {
        // 1970-01-01T08:00:00Z
        assert_eq!(format_est_time(8 * 60 * 60 * 1000), "3:00:00");
        // 2023-11-14T22:13:20Z
        assert_eq!(format_est_time(1_700_000_000_000), "17:13:20");
        // 1970-01-01T05:01:02Z is midnight plus a bit in EST
        assert_eq!(format_est_time(18_062_000), "0:01:02");
    }

    #[test]
    fn est_time_wraps_before_the_epoch() {
        assert_eq!(format_est_time(0), "19:00:00");
        assert_eq!(format_est_time(-1), "18:59:59");
        assert_eq!(format_est_time(-1_000), "18:59:59");
    }

    #[test]
    fn est_time_is_total() {
        for ms in [i64::MIN, i64::MIN + 1, -86_400_001, 999, i64::MAX] {
            let formatted = format_est_time(ms);
            let segments: Vec<&str> = formatted.split(':').collect();
            assert_eq!(segments.len(), 3, "{formatted}");
        }
    }

    #[test]
    fn est_time_pads_minutes_and_seconds() {
        let mut ms = 1_699_990_000_123;
        while ms < 1_700_000_000_000 {
            let formatted = format_est_time(ms);
            let segments: Vec<&str> = formatted.split(':').collect();
            assert_eq!(segments[1].len(), 2, "{formatted}");
            assert_eq!(segments[2].len(), 2, "{formatted}");
            assert!(!segments[0].is_empty() && segments[0].len() <= 2);
            ms += 7_919_000;
        }
    }

    #[test]
    fn clock_time_uses_twelve_hour_format() {
        let afternoon = Utc.with_ymd_and_hms(2024, 3, 5, 15, 4, 5).unwrap();
        assert_eq!(format_clock_time(&afternoon), "3:04:05 PM");

        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let morning = offset.with_ymd_and_hms(2024, 3, 5, 0, 0, 9).unwrap();
        assert_eq!(format_clock_time(&morning), "12:00:09 AM");
    }
}

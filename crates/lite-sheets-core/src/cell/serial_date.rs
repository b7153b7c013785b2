//! Serial date numbers
//!
//! Spreadsheets store instants as a floating-point day count since
//! 1899-12-30, with the time of day as the fractional part. Instants before
//! the epoch use a sign-magnitude encoding: the whole-day part is negative
//! while the fraction still counts forward from midnight, so
//! 1899-12-29 06:00 is `-1.25`.

use chrono::{DateTime, NaiveDateTime};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Days between 1899-12-30 and 1970-01-01
const UNIX_EPOCH_SERIAL: i64 = 25_569;

/// Encode an instant as a serial date number (1900 date system).
///
/// Precision is truncated to whole milliseconds.
pub fn to_serial(instant: NaiveDateTime) -> f64 {
    let mut millis = instant.and_utc().timestamp_millis() + UNIX_EPOCH_SERIAL * MILLIS_PER_DAY;

    if millis < 0 {
        let frac = millis % MILLIS_PER_DAY;
        if frac != 0 {
            millis -= (MILLIS_PER_DAY + frac) * 2;
        }
    }

    millis as f64 / MILLIS_PER_DAY as f64
}

/// Decode a serial date number back into an instant.
///
/// Returns `None` when the serial lies outside the representable range.
pub fn from_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }

    let scaled = serial * MILLIS_PER_DAY as f64;
    let rounded = if serial >= 0.0 { scaled + 0.5 } else { scaled - 0.5 };
    if rounded.abs() >= i64::MAX as f64 {
        return None;
    }

    let mut millis = rounded as i64;
    if millis < 0 {
        millis -= (millis % MILLIS_PER_DAY) * 2;
    }

    let unix_millis = millis.checked_sub(UNIX_EPOCH_SERIAL * MILLIS_PER_DAY)?;
    DateTime::from_timestamp_millis(unix_millis).map(|dt| dt.naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_known_serials() {
        assert_eq!(to_serial(at(1899, 12, 30, 0, 0, 0)), 0.0);
        assert_eq!(to_serial(at(1900, 1, 1, 0, 0, 0)), 2.0);
        assert_eq!(to_serial(at(1900, 3, 1, 0, 0, 0)), 61.0);
        assert_eq!(to_serial(at(2024, 1, 1, 0, 0, 0)), 45292.0);
        assert_eq!(to_serial(at(2024, 1, 1, 12, 0, 0)), 45292.5);
        assert_eq!(to_serial(at(2024, 1, 1, 18, 0, 0)), 45292.75);
    }

    #[test]
    fn test_before_epoch_uses_sign_magnitude() {
        assert_eq!(to_serial(at(1899, 12, 29, 6, 0, 0)), -1.25);
        assert_eq!(to_serial(at(1899, 12, 29, 0, 0, 0)), -1.0);
        assert_eq!(from_serial(-1.25), Some(at(1899, 12, 29, 6, 0, 0)));
    }

    #[test]
    fn test_from_serial() {
        assert_eq!(from_serial(45292.5), Some(at(2024, 1, 1, 12, 0, 0)));
        assert_eq!(from_serial(f64::NAN), None);
        assert_eq!(from_serial(f64::INFINITY), None);
    }

    proptest! {
        #[test]
        fn serial_round_trips_across_years(
            days in 0i64..(365 * 200),
            seconds in 0i64..86_400,
        ) {
            let instant = at(1900, 3, 1, 0, 0, 0)
                + Duration::days(days)
                + Duration::seconds(seconds);
            prop_assert_eq!(from_serial(to_serial(instant)), Some(instant));
        }
    }
}

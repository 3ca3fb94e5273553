// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Proleptic Gregorian calendar arithmetic on a linear tick axis.
//!
//! Tick `0` is `0001-01-01 00:00:00`; one tick is 100 ns. Everything here
//! is pure integer math: no host calendar or clock is consulted.
//!
//! # Cycle decomposition
//!
//! | Block | Days |
//! |-------|------|
//! | 400 years | 146 097 |
//! | 100 years | 36 524 |
//! | 4 years | 1 461 |
//! | 1 year | 365 |
//!
//! A day count is split into these blocks from the largest down. The last
//! 100-year block of a 400-year cycle and the last year of a 4-year cycle
//! carry one extra day, so both indices are capped at 3.

use crate::error::{TimeError, TimeResult};

// ---------------------------------------------------------------------------
// Tick constants
// ---------------------------------------------------------------------------

pub const TICKS_PER_SECOND: i64 = 10_000_000;
pub const TICKS_PER_MINUTE: i64 = TICKS_PER_SECOND * 60;
pub const TICKS_PER_HOUR: i64 = TICKS_PER_MINUTE * 60;
pub const TICKS_PER_DAY: i64 = TICKS_PER_HOUR * 24;

pub const SECONDS_PER_DAY: i64 = 86_400;

const DAYS_PER_YEAR: i64 = 365;
const DAYS_PER_4_YEARS: i64 = DAYS_PER_YEAR * 4 + 1;
const DAYS_PER_100_YEARS: i64 = DAYS_PER_4_YEARS * 25 - 1;
const DAYS_PER_400_YEARS: i64 = DAYS_PER_100_YEARS * 4 + 1;

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// Days from 0001-01-01 to 10000-01-01.
const DAYS_TO_10000: i64 = DAYS_PER_400_YEARS * 25 - 366;

/// Largest valid tick count: `9999-12-31 23:59:59.9999999`.
pub const MAX_TICKS: i64 = DAYS_TO_10000 * TICKS_PER_DAY - 1;

/// Days from 0001-01-01 to 1970-01-01.
const DAYS_TO_1970: i64 =
    DAYS_PER_400_YEARS * 4 + DAYS_PER_100_YEARS * 3 + DAYS_PER_4_YEARS * 17 + DAYS_PER_YEAR;

/// Tick count of the Unix epoch, `1970-01-01 00:00:00`.
pub const UNIX_EPOCH_TICKS: i64 = DAYS_TO_1970 * TICKS_PER_DAY;

// ---------------------------------------------------------------------------
// Cumulative day tables
// ---------------------------------------------------------------------------

const DAYS_TO_MONTH_365: [i64; 13] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365];
const DAYS_TO_MONTH_366: [i64; 13] = [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335, 366];

#[inline]
fn days_to_month(leap: bool) -> &'static [i64; 13] {
    if leap {
        &DAYS_TO_MONTH_366
    } else {
        &DAYS_TO_MONTH_365
    }
}

// ---------------------------------------------------------------------------
// Public helpers
// ---------------------------------------------------------------------------

/// Gregorian leap-year rule: divisible by 4, and not by 100 unless also by 400.
#[inline]
pub const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` of `year`.
pub fn days_in_month(year: i32, month: u8) -> TimeResult<u8> {
    check_year(year)?;
    check_month(month)?;
    let table = days_to_month(is_leap_year(year));
    let m = month as usize;
    Ok((table[m] - table[m - 1]) as u8)
}

/// The civil date part of a tick count.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CivilDate {
    pub year: i32,
    /// 1-based ordinal day within the year.
    pub day_of_year: u16,
    pub month: u8,
    pub day: u8,
}

/// Ticks at midnight of the given date.
pub fn date_to_ticks(year: i32, month: u8, day: u8) -> TimeResult<i64> {
    let dim = days_in_month(year, month)?;
    if day < 1 || day > dim {
        return Err(TimeError::out_of_range("day", day));
    }
    let y = (year - 1) as i64;
    let days = y * DAYS_PER_YEAR + y / 4 - y / 100 + y / 400
        + days_to_month(is_leap_year(year))[(month - 1) as usize]
        + day as i64
        - 1;
    Ok(days * TICKS_PER_DAY)
}

/// Ticks elapsed since midnight for the given clock reading.
pub fn time_to_ticks(hour: u8, minute: u8, second: u8) -> TimeResult<i64> {
    if hour >= 24 {
        return Err(TimeError::out_of_range("hour", hour));
    }
    if minute >= 60 {
        return Err(TimeError::out_of_range("minute", minute));
    }
    if second >= 60 {
        return Err(TimeError::out_of_range("second", second));
    }
    Ok(hour as i64 * TICKS_PER_HOUR + minute as i64 * TICKS_PER_MINUTE + second as i64 * TICKS_PER_SECOND)
}

/// Splits a non-negative tick count into its civil date.
///
/// The caller guarantees `0 <= ticks <= MAX_TICKS`.
pub fn ticks_to_components(ticks: i64) -> CivilDate {
    debug_assert!((0..=MAX_TICKS).contains(&ticks));
    let mut n = ticks / TICKS_PER_DAY;

    let y400 = n / DAYS_PER_400_YEARS;
    n -= y400 * DAYS_PER_400_YEARS;

    let y100 = (n / DAYS_PER_100_YEARS).min(3);
    n -= y100 * DAYS_PER_100_YEARS;

    let y4 = n / DAYS_PER_4_YEARS;
    n -= y4 * DAYS_PER_4_YEARS;

    let y1 = (n / DAYS_PER_YEAR).min(3);
    n -= y1 * DAYS_PER_YEAR;

    let year = (400 * y400 + 100 * y100 + 4 * y4 + y1 + 1) as i32;

    // Only the fourth year of a 4-year block can be a leap year. The 25th
    // block of a century is short (its last year is a century year), unless
    // the century is the fourth one of the 400-year cycle.
    let leap = y1 == 3 && (y4 != 24 || y100 == 3);
    let table = days_to_month(leap);

    // `n` is the zero-based day of the year. Months are at least 28 days
    // long, so `n >> 5` never overshoots the answer.
    let mut m = ((n >> 5) + 1) as usize;
    while n >= table[m] {
        m += 1;
    }

    CivilDate {
        year,
        day_of_year: (n + 1) as u16,
        month: m as u8,
        day: (n - table[m - 1] + 1) as u8,
    }
}

/// Clock reading `(hour, minute, second)` of a non-negative tick count.
#[inline]
pub fn ticks_to_time(ticks: i64) -> (u8, u8, u8) {
    let secs = (ticks / TICKS_PER_SECOND) % SECONDS_PER_DAY;
    ((secs / 3600) as u8, ((secs / 60) % 60) as u8, (secs % 60) as u8)
}

/// ISO weekday (1 = Monday … 7 = Sunday) of a day count since 0001-01-01.
#[inline]
pub fn days_to_weekday(days: i64) -> u8 {
    // 0001-01-01 is a Monday in the proleptic Gregorian calendar.
    (days.rem_euclid(7) + 1) as u8
}

/// Fails unless `ticks` lies within years 1..=9999.
#[inline]
pub(crate) fn check_ticks(ticks: i128) -> TimeResult<i64> {
    if (0..=MAX_TICKS as i128).contains(&ticks) {
        Ok(ticks as i64)
    } else {
        Err(TimeError::out_of_range("ticks", ticks))
    }
}

#[inline]
fn check_year(year: i32) -> TimeResult<()> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(TimeError::out_of_range("year", year))
    }
}

#[inline]
fn check_month(month: u8) -> TimeResult<()> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(TimeError::out_of_range("month", month))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    /// Civil date of a day count since 0001-01-01, computed through the
    /// March-based era algorithm. Shares no code or tables with
    /// `ticks_to_components`.
    fn civil_from_days(days: i64) -> (i32, u8, u8) {
        // Shift so that day 0 is 0000-03-01.
        let z = days + 306;
        let era = z.div_euclid(146_097);
        let doe = z - era * 146_097;
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
        let month = if mp < 10 { mp + 3 } else { mp - 9 } as u8;
        let year = (yoe + era * 400) as i32 + (month <= 2) as i32;
        (year, month, day)
    }

    #[test]
    fn leap_year_rule() {
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2023));
        assert!(is_leap_year(400));
        assert!(!is_leap_year(100));
        assert!(is_leap_year(4));
        assert!(!is_leap_year(1));
    }

    #[test]
    fn constants_match_known_values() {
        assert_eq!(UNIX_EPOCH_TICKS, 621_355_968_000_000_000);
        assert_eq!(MAX_TICKS, 3_155_378_975_999_999_999);
        assert_eq!(date_to_ticks(1970, 1, 1).unwrap(), UNIX_EPOCH_TICKS);
        assert_eq!(date_to_ticks(9999, 12, 31).unwrap() + TICKS_PER_DAY - 1, MAX_TICKS);
    }

    #[test]
    fn every_day_matches_independent_algorithm() {
        let last_day = MAX_TICKS / TICKS_PER_DAY;
        let mut expected_doy = 0u16;
        let mut prev_year = 0;
        for days in 0..=last_day {
            let parts = ticks_to_components(days * TICKS_PER_DAY);
            let (year, month, day) = civil_from_days(days);
            assert_eq!(
                (parts.year, parts.month, parts.day),
                (year, month, day),
                "day count {days}"
            );

            if parts.year != prev_year {
                prev_year = parts.year;
                expected_doy = 0;
            }
            expected_doy += 1;
            assert_eq!(parts.day_of_year, expected_doy, "day count {days}");

            assert_eq!(date_to_ticks(year, month, day).unwrap(), days * TICKS_PER_DAY);
        }
    }

    #[test]
    fn century_boundaries() {
        for (y, m, d) in [
            (1600, 2, 29),
            (1600, 12, 31),
            (1700, 2, 28),
            (1700, 3, 1),
            (1700, 12, 31),
            (2000, 2, 29),
            (2000, 12, 31),
            (2100, 3, 1),
            (400, 12, 31),
            (401, 1, 1),
            (9999, 12, 31),
        ] {
            let parts = ticks_to_components(date_to_ticks(y, m, d).unwrap());
            assert_eq!((parts.year, parts.month, parts.day), (y, m, d));
        }
        assert_eq!(ticks_to_components(date_to_ticks(2000, 12, 31).unwrap()).day_of_year, 366);
        assert_eq!(ticks_to_components(date_to_ticks(1900, 12, 31).unwrap()).day_of_year, 365);
    }

    #[test]
    fn date_validation() {
        assert!(matches!(
            date_to_ticks(0, 1, 1),
            Err(TimeError::OutOfRange { what: "year", .. })
        ));
        assert!(matches!(
            date_to_ticks(10_000, 1, 1),
            Err(TimeError::OutOfRange { what: "year", .. })
        ));
        assert!(matches!(
            date_to_ticks(2024, 13, 1),
            Err(TimeError::OutOfRange { what: "month", .. })
        ));
        assert!(matches!(
            date_to_ticks(2024, 2, 30),
            Err(TimeError::OutOfRange { what: "day", .. })
        ));
        assert!(date_to_ticks(2023, 2, 29).is_err());
        assert!(date_to_ticks(2024, 2, 29).is_ok());
        assert!(date_to_ticks(2024, 4, 0).is_err());
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(2023, 2).unwrap(), 28);
        assert_eq!(days_in_month(1900, 2).unwrap(), 28);
        assert_eq!(days_in_month(2023, 4).unwrap(), 30);
        assert_eq!(days_in_month(2023, 12).unwrap(), 31);
        assert!(days_in_month(2023, 0).is_err());
    }

    #[test]
    fn clock_conversion() {
        assert_eq!(time_to_ticks(0, 0, 0).unwrap(), 0);
        let t = time_to_ticks(23, 59, 59).unwrap();
        assert_eq!(t, TICKS_PER_DAY - TICKS_PER_SECOND);
        assert_eq!(ticks_to_time(t), (23, 59, 59));
        assert_eq!(ticks_to_time(5 * TICKS_PER_DAY + t), (23, 59, 59));
        assert!(time_to_ticks(24, 0, 0).is_err());
        assert!(time_to_ticks(0, 60, 0).is_err());
        assert!(time_to_ticks(0, 0, 60).is_err());
    }

    #[test]
    fn weekdays() {
        assert_eq!(days_to_weekday(0), 1);
        // 1970-01-01 was a Thursday.
        assert_eq!(days_to_weekday(UNIX_EPOCH_TICKS / TICKS_PER_DAY), 4);
        // 2024-03-10 was a Sunday.
        assert_eq!(days_to_weekday(date_to_ticks(2024, 3, 10).unwrap() / TICKS_PER_DAY), 7);
    }

    #[test]
    fn range_check() {
        assert_eq!(check_ticks(0).unwrap(), 0);
        assert_eq!(check_ticks(MAX_TICKS as i128).unwrap(), MAX_TICKS);
        assert!(check_ticks(-1).is_err());
        assert!(check_ticks(MAX_TICKS as i128 + 1).is_err());
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Wall-clock times with no date and no timezone.
//!
//! A [`TimeOfDay`] lives inside a single day: arithmetic wraps at
//! midnight and the date part is dropped. Useful for opening hours and
//! similar recurring daily fields.

use crate::calendar::{self, SECONDS_PER_DAY, TICKS_PER_DAY, TICKS_PER_SECOND};
use crate::duration::Duration;
use crate::error::{TimeError, TimeResult};
use crate::instant::Instant;
use crate::timezone::Timezone;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A time of day with one-second resolution, stored as seconds since
/// midnight.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    seconds: u32,
}

impl TimeOfDay {
    pub const MIDNIGHT: Self = Self { seconds: 0 };

    /// Build from a 24-hour clock reading.
    pub fn from_hms(hour: u8, minute: u8, second: u8) -> TimeResult<Self> {
        let ticks = calendar::time_to_ticks(hour, minute, second)?;
        Ok(Self {
            seconds: (ticks / TICKS_PER_SECOND) as u32,
        })
    }

    /// Parse one of `H:MM`, `H:MM:SS`, `H:MM AM`, `H:MM:SS PM`.
    ///
    /// The hour has one or two digits; minutes and seconds have exactly
    /// two. A 12-hour reading needs at least one space before the
    /// meridiem, which is case-insensitive. Anything else is rejected.
    pub fn parse(text: &str) -> TimeResult<Self> {
        let err = || TimeError::parse(text, "time of day");

        let (clock, meridiem) = split_meridiem(text);
        let mut fields = clock.split(':');
        let hour = fields.next().and_then(|f| digits(f, 1..=2)).ok_or_else(err)?;
        let minute = fields.next().and_then(|f| digits(f, 2..=2)).ok_or_else(err)?;
        let second = match fields.next() {
            Some(f) => digits(f, 2..=2).ok_or_else(err)?,
            None => 0,
        };
        if fields.next().is_some() || minute > 59 || second > 59 {
            return Err(err());
        }

        let hour = match meridiem {
            None if hour <= 23 => hour,
            Some(pm) if (1..=12).contains(&hour) => hour % 12 + if pm { 12 } else { 0 },
            _ => return Err(err()),
        };
        Ok(Self {
            seconds: hour * 3600 + minute * 60 + second,
        })
    }

    /// The current wall-clock time in `timezone`.
    pub fn now(timezone: Timezone) -> TimeResult<Self> {
        Instant::now(timezone).map(|now| Self::from_instant(&now))
    }

    /// Clock reading of an instant, truncated to the second.
    pub fn from_instant(instant: &Instant) -> Self {
        Self {
            seconds: ((instant.ticks() % TICKS_PER_DAY) / TICKS_PER_SECOND) as u32,
        }
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn hour(&self) -> u8 {
        (self.seconds / 3600) as u8
    }

    #[inline]
    pub const fn minute(&self) -> u8 {
        ((self.seconds / 60) % 60) as u8
    }

    #[inline]
    pub const fn second(&self) -> u8 {
        (self.seconds % 60) as u8
    }

    #[inline]
    pub const fn seconds_since_midnight(&self) -> u32 {
        self.seconds
    }

    /// Time elapsed since midnight.
    pub fn since_midnight(&self) -> Duration {
        Duration::from_ticks(self.seconds as i64 * TICKS_PER_SECOND)
    }

    // ── arithmetic (mod 24 h) ─────────────────────────────────────────

    pub fn add_hours(&self, hours: i64) -> Self {
        self.shifted(hours.rem_euclid(24) * 3600)
    }

    pub fn add_minutes(&self, minutes: i64) -> Self {
        self.shifted(minutes.rem_euclid(24 * 60) * 60)
    }

    pub fn add_seconds(&self, seconds: i64) -> Self {
        self.shifted(seconds.rem_euclid(SECONDS_PER_DAY))
    }

    fn shifted(&self, seconds: i64) -> Self {
        Self {
            seconds: (self.seconds as i64 + seconds).rem_euclid(SECONDS_PER_DAY) as u32,
        }
    }

    /// `self - other` in seconds, assuming both fall on the same day.
    ///
    /// `00:30` minus `23:30` is `-82_800`, not `3_600`.
    pub fn diff_seconds(&self, other: &TimeOfDay) -> i64 {
        self.seconds as i64 - other.seconds as i64
    }

    #[inline]
    pub fn compare(&self, other: &TimeOfDay) -> std::cmp::Ordering {
        self.cmp(other)
    }

    #[inline]
    pub fn equals(&self, other: &TimeOfDay) -> bool {
        self == other
    }

    /// `HH:MM:SS`
    pub fn to_sql_time(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hour(), self.minute(), self.second())
    }

    /// A stored time string means "no time" only when it is empty.
    pub fn is_db_null(text: &str) -> bool {
        text.is_empty()
    }
}

/// Splits a trailing ` AM`/` PM` off `text`; `Some(true)` means PM.
fn split_meridiem(text: &str) -> (&str, Option<bool>) {
    let n = text.len();
    if n < 3 || !text.is_char_boundary(n - 2) {
        return (text, None);
    }
    let (clock, suffix) = text.split_at(n - 2);
    let pm = if suffix.eq_ignore_ascii_case("am") {
        false
    } else if suffix.eq_ignore_ascii_case("pm") {
        true
    } else {
        return (text, None);
    };
    match clock.trim_end_matches([' ', '\t']) {
        trimmed if trimmed.len() < clock.len() => (trimmed, Some(pm)),
        // no separating whitespace: leave it to the digit check to reject
        _ => (text, None),
    }
}

/// An unsigned decimal with a digit count in `width`.
fn digits(field: &str, width: std::ops::RangeInclusive<usize>) -> Option<u32> {
    if !width.contains(&field.len()) || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql_time())
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeError;

    fn from_str(s: &str) -> TimeResult<Self> {
        Self::parse(s)
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for TimeOfDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_sql_time())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        TimeOfDay::parse(&text).map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn t(text: &str) -> TimeOfDay {
        TimeOfDay::parse(text).unwrap()
    }

    #[test]
    fn accepted_patterns() {
        assert_eq!(t("13:05").to_sql_time(), "13:05:00");
        assert_eq!(t("13:05:09").to_sql_time(), "13:05:09");
        assert_eq!(t("1:05 PM").to_sql_time(), "13:05:00");
        assert_eq!(t("1:05:09 am").to_sql_time(), "01:05:09");
        assert_eq!(t("9:00").to_sql_time(), "09:00:00");
        assert_eq!(t("09:00").to_sql_time(), "09:00:00");
        assert_eq!(t("0:00").to_sql_time(), "00:00:00");
        assert_eq!(t("23:59:59").to_sql_time(), "23:59:59");
        assert_eq!(t("12:00 AM").to_sql_time(), "00:00:00");
        assert_eq!(t("12:30 pm").to_sql_time(), "12:30:00");
        assert_eq!(t("11:59:59 Pm").to_sql_time(), "23:59:59");
        assert_eq!(t("7:15  AM").to_sql_time(), "07:15:00");
    }

    #[test]
    fn rejected_inputs() {
        for text in [
            "", "25:00", "24:00", "13:60", "13:05:60", "13", "13:5", "13:005", "123:00",
            "1:05PM", "0:30 AM", "13:00 PM", "1:05 XM", "1:05:09:01", " 9:00", "9:00 ",
            "a:bc", "+1:00", "1:-5", "12:00 AMX", "½:00",
        ] {
            assert!(
                matches!(TimeOfDay::parse(text), Err(TimeError::Parse { .. })),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn ordering_is_chronological() {
        assert!(t("09:00") < t("17:30"));
        assert!(t("9:00 PM") > t("17:30"));
        assert_eq!(t("17:30").compare(&t("5:30 PM")), std::cmp::Ordering::Equal);
        assert!(t("17:30").equals(&t("5:30:00 pm")));
    }

    #[test]
    fn components() {
        let x = t("13:05:09");
        assert_eq!((x.hour(), x.minute(), x.second()), (13, 5, 9));
        assert_eq!(x.seconds_since_midnight(), 13 * 3600 + 5 * 60 + 9);
        assert_eq!(x.since_midnight().total_seconds(), 47_109.0);
        assert_eq!(TimeOfDay::from_hms(13, 5, 9).unwrap(), x);
        assert!(matches!(
            TimeOfDay::from_hms(24, 0, 0),
            Err(TimeError::OutOfRange { .. })
        ));
    }

    #[test]
    fn arithmetic_wraps_at_midnight() {
        let late = t("23:30");
        assert_eq!(late.add_hours(1).to_sql_time(), "00:30:00");
        assert_eq!(late.add_minutes(45).to_sql_time(), "00:15:00");
        assert_eq!(late.add_seconds(-86_400).to_sql_time(), "23:30:00");
        assert_eq!(t("00:10").add_minutes(-20).to_sql_time(), "23:50:00");
        assert_eq!(t("00:00").add_hours(-25).to_sql_time(), "23:00:00");
        assert!(t("12:00").add_seconds(i64::MIN).seconds_since_midnight() < 86_400);
        assert_eq!(t("12:00").add_minutes(i64::MAX), t("12:00").add_minutes(i64::MAX % 1440));
    }

    #[test]
    fn diff_is_same_day_only() {
        assert_eq!(t("17:30").diff_seconds(&t("09:00")), 8 * 3600 + 1800);
        assert_eq!(t("09:00").diff_seconds(&t("17:30")), -(8 * 3600 + 1800));
        assert_eq!(t("00:30").diff_seconds(&t("23:30")), -82_800);
    }

    #[test]
    fn from_instant() {
        let i = Instant::from_components(2024, 5, 6, 7, 8, 9, Timezone::Utc).unwrap();
        assert_eq!(TimeOfDay::from_instant(&i).to_sql_time(), "07:08:09");
        assert_eq!(TimeOfDay::from_instant(&i.start_of_day()), TimeOfDay::MIDNIGHT);
        assert!(TimeOfDay::now(Timezone::Utc).is_ok());
    }

    #[test]
    fn db_null_is_empty_only() {
        assert!(TimeOfDay::is_db_null(""));
        assert!(!TimeOfDay::is_db_null("00:00:00"));
        assert!(!TimeOfDay::is_db_null("0000-00-00"));
    }

    #[test]
    fn display_and_from_str() {
        let x: TimeOfDay = "4:05:06 pm".parse().unwrap();
        assert_eq!(x.to_string(), "16:05:06");
    }

    proptest! {
        #[test]
        fn sql_time_reparses(secs in 0u32..86_400) {
            let x = TimeOfDay::MIDNIGHT.add_seconds(secs as i64);
            prop_assert_eq!(TimeOfDay::parse(&x.to_sql_time()).unwrap(), x);
        }

        #[test]
        fn wrapping_is_consistent(secs in 0u32..86_400, n in any::<i32>()) {
            let x = TimeOfDay::MIDNIGHT.add_seconds(secs as i64);
            let n = n as i64;
            prop_assert_eq!(x.add_minutes(n), x.add_seconds(n * 60));
            prop_assert_eq!(x.add_hours(n), x.add_seconds(n * 3600));
            prop_assert_eq!(x.add_seconds(n).add_seconds(-n), x);
        }
    }
}

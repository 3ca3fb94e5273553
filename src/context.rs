// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Explicit configuration for callers that work in a default timezone.
//!
//! Nothing in this crate reads a process-wide default zone. Code that
//! wants one holds a [`TimeContext`] and builds values through it, so two
//! callers configured for different zones never affect each other.

use crate::error::TimeResult;
use crate::format::{UNIVERSAL_DATE, UNIVERSAL_DATETIME};
use crate::instant::Instant;
use crate::time_of_day::TimeOfDay;
use crate::timezone::Timezone;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A default timezone applied to every value built through it.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeContext {
    pub default_timezone: Timezone,
}

impl TimeContext {
    pub const fn new(default_timezone: Timezone) -> Self {
        Self { default_timezone }
    }

    pub const fn utc() -> Self {
        Self::new(Timezone::Utc)
    }

    /// Context for a timezone identifier such as `Europe/Madrid` or `+02:00`.
    pub fn from_timezone_name(name: &str) -> TimeResult<Self> {
        Timezone::parse(name).map(Self::new)
    }

    #[inline]
    pub const fn timezone(&self) -> Timezone {
        self.default_timezone
    }

    pub fn now(&self) -> TimeResult<Instant> {
        Instant::now(self.default_timezone)
    }

    pub fn time_now(&self) -> TimeResult<TimeOfDay> {
        TimeOfDay::now(self.default_timezone)
    }

    pub fn date(&self, year: i32, month: u8, day: u8) -> TimeResult<Instant> {
        Instant::from_date(year, month, day, self.default_timezone)
    }

    pub fn datetime(
        &self,
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> TimeResult<Instant> {
        Instant::from_components(year, month, day, hour, minute, second, self.default_timezone)
    }

    /// The given Unix time, shown on this context's wall clocks.
    pub fn at_epoch_seconds(&self, unix_seconds: i64) -> TimeResult<Instant> {
        Instant::from_epoch_seconds(unix_seconds)?.with_timezone(self.default_timezone)
    }

    /// Rebase `instant` onto this context's timezone.
    pub fn localize(&self, instant: &Instant) -> TimeResult<Instant> {
        instant.with_timezone(self.default_timezone)
    }

    pub fn parse(&self, text: &str, pattern: &str) -> TimeResult<Instant> {
        Instant::parse(text, pattern, self.default_timezone)
    }

    /// Parse `YYYY-MM-DD`.
    pub fn parse_sql_date(&self, text: &str) -> TimeResult<Instant> {
        self.parse(text, UNIVERSAL_DATE)
    }

    /// Parse `YYYY-MM-DD HH:MM:SS`.
    pub fn parse_sql_datetime(&self, text: &str) -> TimeResult<Instant> {
        self.parse(text, UNIVERSAL_DATETIME)
    }
}

impl From<Timezone> for TimeContext {
    fn from(default_timezone: Timezone) -> Self {
        Self::new(default_timezone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimeError;

    #[test]
    fn default_is_utc() {
        assert_eq!(TimeContext::default(), TimeContext::utc());
        assert_eq!(TimeContext::default().timezone(), Timezone::Utc);
    }

    #[test]
    fn values_carry_the_context_zone() {
        let ctx = TimeContext::from_timezone_name("Europe/Madrid").unwrap();
        let zone = ctx.timezone();
        assert_eq!(ctx.date(2024, 5, 1).unwrap().timezone(), zone);
        assert_eq!(ctx.datetime(2024, 5, 1, 9, 0, 0).unwrap().hour(), 9);
        assert_eq!(ctx.parse_sql_date("2024-05-01").unwrap().timezone(), zone);
        assert_eq!(ctx.now().unwrap().timezone(), zone);
        assert!(ctx.time_now().is_ok());
    }

    #[test]
    fn epoch_seconds_are_localized() {
        let ctx = TimeContext::new(Timezone::fixed(3 * 3600).unwrap());
        let t = ctx.at_epoch_seconds(0).unwrap();
        assert_eq!(t.to_sql_datetime(), "1970-01-01 03:00:00");
        assert_eq!(t.epoch_seconds().unwrap(), 0);
    }

    #[test]
    fn contexts_do_not_interfere() {
        let tokyo = TimeContext::from_timezone_name("Asia/Tokyo").unwrap();
        let lima = TimeContext::from_timezone_name("America/Lima").unwrap();
        let utc = TimeContext::utc().parse_sql_datetime("2024-01-01 12:00:00").unwrap();
        assert_eq!(tokyo.localize(&utc).unwrap().hour(), 21);
        assert_eq!(lima.localize(&utc).unwrap().hour(), 7);
    }

    #[test]
    fn bad_zone_name() {
        assert!(matches!(
            TimeContext::from_timezone_name("Nowhere/Special"),
            Err(TimeError::InvalidTimezone(_))
        ));
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Absolute points in time carrying their own timezone.
//!
//! An [`Instant`] stores a tick count together with a [`Timezone`]. The
//! ticks are the wall-clock reading *as observed in that timezone*, not a
//! UTC count, so two instants in different zones are only comparable after
//! one has been rebased onto the other's zone with
//! [`Instant::with_timezone`].
//!
//! # Changing the timezone
//!
//! | Method | Ticks | Absolute moment |
//! |--------|-------|-----------------|
//! | [`Instant::with_timezone`] | shifted by the offset delta | preserved |
//! | [`Instant::reinterpret_timezone`] | unchanged | changes |
//!
//! # Comparison
//!
//! [`Instant::compare`], [`Instant::equals`] and the `Eq`/`Ord`/`Hash`
//! impls look at raw ticks only and ignore the timezone label.

use crate::calendar::{
    self, check_ticks, CivilDate, TICKS_PER_DAY, TICKS_PER_HOUR, TICKS_PER_MINUTE,
    TICKS_PER_SECOND, UNIX_EPOCH_TICKS,
};
use crate::duration::Duration;
use crate::error::{TimeError, TimeResult};
use crate::format::{Formatter, StrftimeFormatter};
use crate::timezone::Timezone;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Sub;

#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer};

/// Largest month count accepted by [`Instant::add_months`].
pub const MAX_MONTH_SHIFT: i64 = 120_000;

/// A point in time with 100 ns resolution, tied to a timezone.
#[derive(Debug, Copy, Clone)]
pub struct Instant {
    ticks: i64,
    timezone: Timezone,
}

impl Instant {
    // ── constructors ──────────────────────────────────────────────────

    /// Internal constructor; `ticks` must already be in range.
    #[inline]
    const fn from_raw(ticks: i64, timezone: Timezone) -> Self {
        Self { ticks, timezone }
    }

    /// Build from a wall-clock tick count in `timezone`.
    pub fn from_ticks(ticks: i64, timezone: Timezone) -> TimeResult<Self> {
        Ok(Self::from_raw(check_ticks(ticks as i128)?, timezone))
    }

    /// The current time as seen on the wall clocks of `timezone`.
    pub fn now(timezone: Timezone) -> TimeResult<Self> {
        Self::from_utc(Utc::now())?.with_timezone(timezone)
    }

    /// Build from calendar and clock components.
    pub fn from_components(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        timezone: Timezone,
    ) -> TimeResult<Self> {
        let ticks = calendar::date_to_ticks(year, month, day)? + calendar::time_to_ticks(hour, minute, second)?;
        Ok(Self::from_raw(ticks, timezone))
    }

    /// Midnight at the start of the given date.
    pub fn from_date(year: i32, month: u8, day: u8, timezone: Timezone) -> TimeResult<Self> {
        Ok(Self::from_raw(calendar::date_to_ticks(year, month, day)?, timezone))
    }

    /// Build a UTC instant from seconds since `1970-01-01 00:00:00 UTC`.
    pub fn from_epoch_seconds(unix_seconds: i64) -> TimeResult<Self> {
        let ticks = UNIX_EPOCH_TICKS as i128 + unix_seconds as i128 * TICKS_PER_SECOND as i128;
        Ok(Self::from_raw(check_ticks(ticks)?, Timezone::Utc))
    }

    /// Build a UTC instant from a `chrono::DateTime<Utc>`.
    pub fn from_utc(datetime: DateTime<Utc>) -> TimeResult<Self> {
        let ticks = UNIX_EPOCH_TICKS as i128
            + datetime.timestamp() as i128 * TICKS_PER_SECOND as i128
            + (datetime.timestamp_subsec_nanos() as i128 / 100).min(TICKS_PER_SECOND as i128 - 1);
        Ok(Self::from_raw(check_ticks(ticks)?, Timezone::Utc))
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// Wall-clock ticks since `0001-01-01 00:00:00` in [`Instant::timezone`].
    #[inline]
    pub const fn ticks(&self) -> i64 {
        self.ticks
    }

    #[inline]
    pub const fn timezone(&self) -> Timezone {
        self.timezone
    }

    #[inline]
    fn civil(&self) -> CivilDate {
        calendar::ticks_to_components(self.ticks)
    }

    pub fn year(&self) -> i32 {
        self.civil().year
    }

    pub fn month(&self) -> u8 {
        self.civil().month
    }

    pub fn day(&self) -> u8 {
        self.civil().day
    }

    /// 1-based ordinal day of the year.
    pub fn day_of_year(&self) -> u16 {
        self.civil().day_of_year
    }

    /// ISO weekday: 1 = Monday … 7 = Sunday.
    pub fn day_of_week(&self) -> u8 {
        calendar::days_to_weekday(self.ticks / TICKS_PER_DAY)
    }

    pub fn hour(&self) -> u8 {
        calendar::ticks_to_time(self.ticks).0
    }

    pub fn minute(&self) -> u8 {
        calendar::ticks_to_time(self.ticks).1
    }

    pub fn second(&self) -> u8 {
        calendar::ticks_to_time(self.ticks).2
    }

    /// Ticks past the last whole second.
    #[inline]
    pub const fn subsec_ticks(&self) -> i64 {
        self.ticks % TICKS_PER_SECOND
    }

    /// Ticks on the UTC axis for the moment this instant denotes.
    fn utc_ticks(&self) -> TimeResult<i64> {
        let offset = self.timezone.offset_from_local(self.ticks)?;
        Ok(self.ticks - offset as i64 * TICKS_PER_SECOND)
    }

    /// Whole seconds since `1970-01-01 00:00:00 UTC` of the absolute moment.
    pub fn epoch_seconds(&self) -> TimeResult<i64> {
        Ok((self.utc_ticks()? - UNIX_EPOCH_TICKS).div_euclid(TICKS_PER_SECOND))
    }

    /// Convert to a `chrono::DateTime<Utc>`.
    ///
    /// Returns `None` if the timezone offset cannot be resolved.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        let rel = self.utc_ticks().ok()? - UNIX_EPOCH_TICKS;
        let secs = rel.div_euclid(TICKS_PER_SECOND);
        let nanos = (rel.rem_euclid(TICKS_PER_SECOND) * 100) as u32;
        DateTime::<Utc>::from_timestamp(secs, nanos)
    }

    // ── calendar arithmetic ───────────────────────────────────────────

    /// Shift by whole months, clamping the day to the target month's length.
    ///
    /// `2024-01-31 + 1 month` is `2024-02-29`; `2023-01-31 + 1 month` is
    /// `2023-02-28`. The clock reading is kept.
    pub fn add_months(&self, months: i64) -> TimeResult<Self> {
        if months.unsigned_abs() > MAX_MONTH_SHIFT as u64 {
            return Err(TimeError::out_of_range("months", months));
        }
        let civil = self.civil();
        let index = civil.year as i64 * 12 + (civil.month as i64 - 1) + months;
        let year = i32::try_from(index.div_euclid(12)).map_err(|_| TimeError::out_of_range("year", index / 12))?;
        let month = (index.rem_euclid(12) + 1) as u8;
        let day = civil.day.min(calendar::days_in_month(year, month)?);
        let ticks = calendar::date_to_ticks(year, month, day)? + self.ticks % TICKS_PER_DAY;
        Ok(Self::from_raw(ticks, self.timezone))
    }

    /// Shift by whole years; same clamping as [`Instant::add_months`]
    /// (`2024-02-29 + 1 year` is `2025-02-28`).
    pub fn add_years(&self, years: i64) -> TimeResult<Self> {
        let months = years
            .checked_mul(12)
            .ok_or_else(|| TimeError::out_of_range("years", years))?;
        self.add_months(months)
    }

    // ── tick arithmetic ───────────────────────────────────────────────

    fn add_ticks(&self, delta: i128) -> TimeResult<Self> {
        Ok(Self::from_raw(check_ticks(self.ticks as i128 + delta)?, self.timezone))
    }

    pub fn add_days(&self, days: i64) -> TimeResult<Self> {
        self.add_ticks(days as i128 * TICKS_PER_DAY as i128)
    }

    pub fn add_hours(&self, hours: i64) -> TimeResult<Self> {
        self.add_ticks(hours as i128 * TICKS_PER_HOUR as i128)
    }

    pub fn add_minutes(&self, minutes: i64) -> TimeResult<Self> {
        self.add_ticks(minutes as i128 * TICKS_PER_MINUTE as i128)
    }

    pub fn add_seconds(&self, seconds: i64) -> TimeResult<Self> {
        self.add_ticks(seconds as i128 * TICKS_PER_SECOND as i128)
    }

    /// Tick-exact addition of a duration.
    pub fn add_interval(&self, interval: Duration) -> TimeResult<Self> {
        self.add_ticks(interval.ticks() as i128)
    }

    /// Tick-exact subtraction of a duration.
    pub fn sub_interval(&self, interval: Duration) -> TimeResult<Self> {
        self.add_ticks(-(interval.ticks() as i128))
    }

    /// Elapsed time from `other` to `self` as raw tick difference.
    ///
    /// Both operands must share a timezone; rebase one of them with
    /// [`Instant::with_timezone`] first otherwise. The difference of two
    /// in-range instants always fits in a [`Duration`].
    pub fn subtract(&self, other: &Instant) -> Duration {
        Duration::from_ticks(self.ticks - other.ticks)
    }

    /// Midnight of the same wall-clock date.
    pub fn start_of_day(&self) -> Self {
        Self::from_raw(self.ticks - self.ticks % TICKS_PER_DAY, self.timezone)
    }

    // ── timezones ─────────────────────────────────────────────────────

    /// Rebase onto `timezone`, keeping the absolute moment.
    ///
    /// The wall-clock ticks move by the difference between the two zones'
    /// offsets at this moment.
    pub fn with_timezone(&self, timezone: Timezone) -> TimeResult<Self> {
        let delta = self.timezone.offset_at(self)? as i64 - timezone.offset_at(self)? as i64;
        Ok(Self::from_raw(
            check_ticks(self.ticks as i128 - delta as i128 * TICKS_PER_SECOND as i128)?,
            timezone,
        ))
    }

    /// Relabel with `timezone`, keeping the wall-clock ticks.
    ///
    /// The result denotes a different absolute moment whenever the two
    /// zones' offsets differ.
    #[inline]
    pub const fn reinterpret_timezone(&self, timezone: Timezone) -> Self {
        Self::from_raw(self.ticks, timezone)
    }

    /// Rebase onto GMT.
    pub fn to_gmt(&self) -> TimeResult<Self> {
        self.with_timezone(Timezone::GMT)
    }

    // ── comparison ────────────────────────────────────────────────────

    /// Raw tick comparison; the timezone label is ignored.
    #[inline]
    pub fn compare(&self, other: &Instant) -> Ordering {
        self.ticks.cmp(&other.ticks)
    }

    /// Raw tick equality; the timezone label is ignored.
    #[inline]
    pub fn equals(&self, other: &Instant) -> bool {
        self.ticks == other.ticks
    }

    // ── text ──────────────────────────────────────────────────────────

    /// `YYYY-MM-DD`
    pub fn to_sql_date(&self) -> String {
        let civil = self.civil();
        format!("{:04}-{:02}-{:02}", civil.year, civil.month, civil.day)
    }

    /// `YYYY-MM-DD HH:MM:SS`
    pub fn to_sql_datetime(&self) -> String {
        let (h, m, s) = calendar::ticks_to_time(self.ticks);
        format!("{} {h:02}:{m:02}:{s:02}", self.to_sql_date())
    }

    /// Render with a strftime-style pattern.
    pub fn format(&self, pattern: &str) -> TimeResult<String> {
        self.format_with(&StrftimeFormatter, pattern)
    }

    pub fn format_with<F: Formatter + ?Sized>(&self, formatter: &F, pattern: &str) -> TimeResult<String> {
        formatter.format(self, pattern)
    }

    /// Parse `text` laid out per a strftime-style pattern, as a wall-clock
    /// reading in `timezone`.
    pub fn parse(text: &str, pattern: &str, timezone: Timezone) -> TimeResult<Self> {
        Self::parse_with(&StrftimeFormatter, text, pattern, timezone)
    }

    pub fn parse_with<F: Formatter + ?Sized>(
        formatter: &F,
        text: &str,
        pattern: &str,
        timezone: Timezone,
    ) -> TimeResult<Self> {
        formatter.parse(text, pattern, timezone)
    }
}

/// Whether a stored date string means "no date": empty, or the MySQL
/// zero date `0000-00-00` with or without a time part.
pub fn is_db_null(text: &str) -> bool {
    text.is_empty() || text.starts_with("0000-00-00")
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait implementations
// ═══════════════════════════════════════════════════════════════════════════

impl PartialEq for Instant {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for Instant {}

impl PartialOrd for Instant {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Instant {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl Hash for Instant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ticks.hash(state);
    }
}

impl Sub for Instant {
    type Output = Duration;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.subtract(&rhs)
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.to_sql_datetime(), self.timezone)
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for Instant {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let subsec = self.subsec_ticks();
        let mut s = serializer.serialize_struct("Instant", if subsec == 0 { 2 } else { 3 })?;
        s.serialize_field("datetime", &self.to_sql_datetime())?;
        s.serialize_field("timezone", &self.timezone)?;
        if subsec != 0 {
            s.serialize_field("subsec_ticks", &subsec)?;
        }
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Instant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        #[derive(Deserialize)]
        struct Raw {
            datetime: String,
            timezone: Timezone,
            #[serde(default)]
            subsec_ticks: i64,
        }

        let raw = Raw::deserialize(deserializer)?;
        if !(0..TICKS_PER_SECOND).contains(&raw.subsec_ticks) {
            return Err(D::Error::custom(TimeError::out_of_range(
                "subsec_ticks",
                raw.subsec_ticks,
            )));
        }
        let whole = Instant::parse(&raw.datetime, crate::format::UNIVERSAL_DATETIME, raw.timezone)
            .map_err(D::Error::custom)?;
        Ok(Instant::from_raw(whole.ticks + raw.subsec_ticks, raw.timezone))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

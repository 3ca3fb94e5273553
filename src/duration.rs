// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Signed spans of time measured in ticks.
//!
//! A [`Duration`] is an absolute quantity: two durations compare by their
//! tick counts alone, with no calendar involved. Arithmetic is checked and
//! reports [`TimeError::OutOfRange`] instead of wrapping.

use crate::calendar::{TICKS_PER_DAY, TICKS_PER_HOUR, TICKS_PER_MINUTE, TICKS_PER_SECOND};
use crate::error::{TimeError, TimeResult};
use qtty::{Day, Days, Second, Seconds};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A signed span of time with 100 ns resolution.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    ticks: i64,
}

impl Duration {
    /// Largest magnitude, in whole seconds, accepted by the component
    /// constructors: `i64::MAX / TICKS_PER_SECOND`.
    pub const MAX_SECONDS: i64 = i64::MAX / TICKS_PER_SECOND;

    pub const ZERO: Self = Self { ticks: 0 };
    pub const MAX: Self = Self { ticks: i64::MAX };
    pub const MIN: Self = Self { ticks: i64::MIN };

    // ── constructors ──────────────────────────────────────────────────

    /// Wrap a raw tick count.
    #[inline]
    pub const fn from_ticks(ticks: i64) -> Self {
        Self { ticks }
    }

    /// Build a duration from day/hour/minute/second parts.
    ///
    /// Parts may have any sign and need not be normalised
    /// (`from_components(0, 0, 90, 0)` is an hour and a half). Fails if the
    /// total exceeds [`Duration::MAX_SECONDS`] in magnitude.
    pub fn from_components(days: i64, hours: i64, minutes: i64, seconds: i64) -> TimeResult<Self> {
        let total = days as i128 * 86_400 + hours as i128 * 3_600 + minutes as i128 * 60 + seconds as i128;
        Self::from_total_seconds(total)
    }

    /// A duration of whole seconds.
    pub fn from_seconds(seconds: i64) -> TimeResult<Self> {
        Self::from_total_seconds(seconds as i128)
    }

    fn from_total_seconds(total: i128) -> TimeResult<Self> {
        if total.abs() > Self::MAX_SECONDS as i128 {
            return Err(TimeError::out_of_range("duration seconds", total));
        }
        Ok(Self::from_ticks(total as i64 * TICKS_PER_SECOND))
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn ticks(&self) -> i64 {
        self.ticks
    }

    /// Whole days, truncated toward zero.
    #[inline]
    pub const fn days(&self) -> i64 {
        self.ticks / TICKS_PER_DAY
    }

    /// Hours component in `-23..=23`, with the sign of the duration.
    #[inline]
    pub const fn hours(&self) -> i64 {
        (self.ticks / TICKS_PER_HOUR) % 24
    }

    /// Minutes component in `-59..=59`, with the sign of the duration.
    #[inline]
    pub const fn minutes(&self) -> i64 {
        (self.ticks / TICKS_PER_MINUTE) % 60
    }

    /// Seconds component in `-59..=59`, with the sign of the duration.
    #[inline]
    pub const fn seconds(&self) -> i64 {
        (self.ticks / TICKS_PER_SECOND) % 60
    }

    /// Sub-second remainder in ticks, with the sign of the duration.
    #[inline]
    pub const fn subsec_ticks(&self) -> i64 {
        self.ticks % TICKS_PER_SECOND
    }

    #[inline]
    pub fn total_days(&self) -> f64 {
        self.ticks as f64 / TICKS_PER_DAY as f64
    }

    #[inline]
    pub fn total_hours(&self) -> f64 {
        self.ticks as f64 / TICKS_PER_HOUR as f64
    }

    #[inline]
    pub fn total_minutes(&self) -> f64 {
        self.ticks as f64 / TICKS_PER_MINUTE as f64
    }

    #[inline]
    pub fn total_seconds(&self) -> f64 {
        self.ticks as f64 / TICKS_PER_SECOND as f64
    }

    /// The span as a typed [`Seconds`] quantity.
    #[inline]
    pub fn to_seconds_quantity(&self) -> Seconds {
        Seconds::new(self.total_seconds())
    }

    /// The span as a typed [`Days`] quantity.
    #[inline]
    pub fn to_days_quantity(&self) -> Days {
        self.to_seconds_quantity().to::<Day>()
    }

    // ── arithmetic ────────────────────────────────────────────────────

    /// Sum of two durations.
    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, other: Duration) -> TimeResult<Self> {
        self.ticks
            .checked_add(other.ticks)
            .map(Self::from_ticks)
            .ok_or_else(|| TimeError::out_of_range("duration ticks", self.ticks as i128 + other.ticks as i128))
    }

    /// Difference `self - other`.
    pub fn subtract(&self, other: Duration) -> TimeResult<Self> {
        self.ticks
            .checked_sub(other.ticks)
            .map(Self::from_ticks)
            .ok_or_else(|| TimeError::out_of_range("duration ticks", self.ticks as i128 - other.ticks as i128))
    }

    /// Absolute value. [`Duration::MIN`] saturates to [`Duration::MAX`].
    #[inline]
    pub const fn length(&self) -> Self {
        Self::from_ticks(self.ticks.saturating_abs())
    }

    /// Same magnitude, opposite sign. [`Duration::MIN`] saturates to
    /// [`Duration::MAX`].
    #[inline]
    pub const fn negate(&self) -> Self {
        Self::from_ticks(self.ticks.saturating_neg())
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.ticks < 0
    }

    // ── comparison ────────────────────────────────────────────────────

    #[inline]
    pub fn compare(&self, other: &Duration) -> Ordering {
        self.ticks.cmp(&other.ticks)
    }

    #[inline]
    pub fn equals(&self, other: &Duration) -> bool {
        self.ticks == other.ticks
    }

    // ── text ──────────────────────────────────────────────────────────

    /// Rough English description of the magnitude, e.g. `"about 3 hours"`.
    pub fn to_human_string(&self) -> String {
        let ticks = self.length().ticks;
        if ticks < TICKS_PER_MINUTE {
            "less than a minute".to_owned()
        } else if ticks < TICKS_PER_HOUR {
            let n = ticks / TICKS_PER_MINUTE;
            format!("about {n} {}", pluralize(n, "minute"))
        } else if ticks < TICKS_PER_DAY {
            let n = ticks / TICKS_PER_HOUR;
            format!("about {n} {}", pluralize(n, "hour"))
        } else {
            let n = ticks / TICKS_PER_DAY;
            format!("{n} {}", pluralize(n, "day"))
        }
    }
}

/// English plural of a regular noun for `count` items.
pub(crate) fn pluralize(count: i64, singular: &str) -> String {
    if count == 1 {
        singular.to_owned()
    } else {
        format!("{singular}s")
    }
}

// ── Display ───────────────────────────────────────────────────────────────

/// `[-][D.]HH:MM:SS[.fffffff]`
impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.ticks.unsigned_abs();
        let ticks_per_second = TICKS_PER_SECOND as u64;
        let secs = magnitude / ticks_per_second;
        let frac = magnitude % ticks_per_second;
        let days = secs / 86_400;

        if self.ticks < 0 {
            f.write_str("-")?;
        }
        if days > 0 {
            write!(f, "{days}.")?;
        }
        write!(f, "{:02}:{:02}:{:02}", (secs / 3600) % 24, (secs / 60) % 60, secs % 60)?;
        if frac > 0 {
            write!(f, ".{frac:07}")?;
        }
        Ok(())
    }
}

// ── Neg ───────────────────────────────────────────────────────────────────

impl Neg for Duration {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self::Output {
        self.negate()
    }
}

// ── qtty interop ──────────────────────────────────────────────────────────

impl TryFrom<Seconds> for Duration {
    type Error = TimeError;

    fn try_from(seconds: Seconds) -> TimeResult<Self> {
        let ticks = (seconds.value() * TICKS_PER_SECOND as f64).round();
        if !ticks.is_finite() || ticks < i64::MIN as f64 || ticks >= i64::MAX as f64 {
            return Err(TimeError::out_of_range(
                "duration seconds",
                seconds.value() as i128,
            ));
        }
        Ok(Self::from_ticks(ticks as i64))
    }
}

impl TryFrom<Days> for Duration {
    type Error = TimeError;

    fn try_from(days: Days) -> TimeResult<Self> {
        Self::try_from(days.to::<Second>())
    }
}

impl From<Duration> for Seconds {
    #[inline]
    fn from(duration: Duration) -> Self {
        duration.to_seconds_quantity()
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for Duration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.ticks)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ticks = i64::deserialize(deserializer)?;
        Ok(Self::from_ticks(ticks))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Offset-producing timezones.
//!
//! | Variant | Identifier | Offset |
//! |---------|------------|--------|
//! | [`Timezone::Utc`] | `UTC`, `GMT`, `Z` | always zero |
//! | [`Timezone::Fixed`] | `+05:30`, `-0800`, `UTC+2` | constant |
//! | [`Timezone::Named`] | `Europe/Paris` | IANA rules (`chrono-tz`) |
//!
//! Offsets are in seconds, east of UTC positive. Rule lookups for named
//! zones go through `chrono`/`chrono-tz`; the tick axis is only translated
//! to a `NaiveDateTime` at that boundary.

use crate::calendar::{TICKS_PER_DAY, TICKS_PER_SECOND, UNIX_EPOCH_TICKS};
use crate::error::{TimeError, TimeResult};
use crate::instant::Instant;
use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const GAP_SEARCH_STEP: i64 = 15 * 60 * TICKS_PER_SECOND;
const GAP_SEARCH_STEPS: i64 = TICKS_PER_DAY / GAP_SEARCH_STEP;

/// A timezone: something that can report its UTC offset at any moment.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum Timezone {
    #[default]
    Utc,
    Fixed(FixedOffset),
    Named(Tz),
}

impl Timezone {
    /// Greenwich; an alias of [`Timezone::Utc`].
    pub const GMT: Self = Timezone::Utc;

    /// A constant offset of `seconds` east of UTC.
    pub fn fixed(seconds: i32) -> TimeResult<Self> {
        FixedOffset::east_opt(seconds)
            .map(Timezone::Fixed)
            .ok_or_else(|| TimeError::InvalidTimezone(format!("offset of {seconds} seconds")))
    }

    /// Resolve a timezone identifier.
    ///
    /// Accepts `UTC`/`GMT`/`Z` (any case), signed offsets such as `+05:30`,
    /// `-0800`, `+02` or `GMT-3`, and IANA names such as `America/New_York`.
    pub fn parse(id: &str) -> TimeResult<Self> {
        let trimmed = id.trim();
        let upper = trimmed.to_ascii_uppercase();
        if matches!(upper.as_str(), "UTC" | "GMT" | "Z") {
            return Ok(Timezone::Utc);
        }

        let offset_text = if let Some(rest) = upper.strip_prefix("UTC").or_else(|| upper.strip_prefix("GMT")) {
            Some(rest)
        } else if trimmed.starts_with(['+', '-']) {
            Some(trimmed)
        } else {
            None
        };
        // A prefixed id that is not an offset (`GMT0`) may still be an
        // IANA name.
        if let Some(seconds) = offset_text.and_then(parse_offset) {
            trace!("resolved timezone {trimmed:?} to fixed offset {seconds}s");
            return Self::fixed(seconds);
        }

        let tz = trimmed
            .parse::<Tz>()
            .map_err(|_| TimeError::InvalidTimezone(trimmed.to_owned()))?;
        trace!("resolved timezone {trimmed:?} to IANA zone {}", tz.name());
        Ok(Timezone::Named(tz))
    }

    /// Identifier that [`Timezone::parse`] maps back to this zone.
    pub fn name(&self) -> String {
        match self {
            Timezone::Utc => "UTC".to_owned(),
            Timezone::Fixed(offset) => format_offset(offset.local_minus_utc()),
            Timezone::Named(tz) => tz.name().to_owned(),
        }
    }

    // ── offset queries ────────────────────────────────────────────────

    /// Offset in effect at the absolute moment `utc_ticks` (ticks on the
    /// UTC axis).
    pub fn offset_from_utc(&self, utc_ticks: i64) -> TimeResult<i32> {
        match self {
            Timezone::Utc => Ok(0),
            Timezone::Fixed(offset) => Ok(offset.local_minus_utc()),
            Timezone::Named(tz) => {
                let naive = naive_from_ticks(utc_ticks)?;
                Ok(tz.offset_from_utc_datetime(&naive).fix().local_minus_utc())
            }
        }
    }

    /// Offset in effect when this zone's clocks read `local_ticks`.
    ///
    /// A wall time repeated by a backward transition maps to its earliest
    /// occurrence. A wall time skipped by a forward transition uses the
    /// offset in effect just before the transition.
    pub fn offset_from_local(&self, local_ticks: i64) -> TimeResult<i32> {
        match self {
            Timezone::Utc => Ok(0),
            Timezone::Fixed(offset) => Ok(offset.local_minus_utc()),
            Timezone::Named(tz) => {
                let naive = naive_from_ticks(local_ticks)?;
                let mapped = tz.offset_from_local_datetime(&naive);
                if let Some(offset) = mapped.earliest() {
                    return Ok(offset.fix().local_minus_utc());
                }
                debug!("{naive} does not exist in {}; using the offset before the transition", tz.name());
                // Walk back to the last wall time before the gap. Gaps are
                // whole quarter hours in practice; a day of steps bounds it.
                let before = (1..=GAP_SEARCH_STEPS)
                    .map(|step| local_ticks - step * GAP_SEARCH_STEP)
                    .filter(|&ticks| ticks >= 0)
                    .find_map(|ticks| {
                        let naive = naive_from_ticks(ticks).ok()?;
                        tz.offset_from_local_datetime(&naive).latest()
                    });
                match before {
                    Some(offset) => Ok(offset.fix().local_minus_utc()),
                    None => Err(TimeError::out_of_range("local ticks", local_ticks)),
                }
            }
        }
    }

    /// Offset of this zone at the absolute moment `instant` denotes.
    pub fn offset_at(&self, instant: &Instant) -> TimeResult<i32> {
        if let Timezone::Utc | Timezone::Fixed(_) = self {
            return self.offset_from_utc(0);
        }
        let own = instant.timezone().offset_from_local(instant.ticks())?;
        self.offset_from_utc(instant.ticks() - own as i64 * TICKS_PER_SECOND)
    }
}

/// Translate a tick count to a `chrono` timestamp with no zone attached.
pub(crate) fn naive_from_ticks(ticks: i64) -> TimeResult<NaiveDateTime> {
    let rel = ticks as i128 - UNIX_EPOCH_TICKS as i128;
    let secs = rel.div_euclid(TICKS_PER_SECOND as i128);
    let nanos = (rel.rem_euclid(TICKS_PER_SECOND as i128) * 100) as u32;
    i64::try_from(secs)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, nanos))
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| TimeError::out_of_range("ticks", ticks))
}

/// Parses `[+-]H[H][[:]MM[[:]SS]]` into signed seconds.
fn parse_offset(text: &str) -> Option<i32> {
    let (sign, rest) = match text.as_bytes().first()? {
        b'+' => (1, &text[1..]),
        b'-' => (-1, &text[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // A lone one- or two-digit group is the hour; longer runs are split
    // from the right into minutes and seconds.
    let (h, m, s) = match digits.len() {
        1 | 2 => (&digits[..], "0", "0"),
        3 | 4 => (&digits[..digits.len() - 2], &digits[digits.len() - 2..], "0"),
        6 => (&digits[..2], &digits[2..4], &digits[4..]),
        _ => return None,
    };
    if rest.contains(':') && digits.len() > 2 && !rest.split(':').skip(1).all(|g| g.len() == 2) {
        return None;
    }
    let (h, m, s): (i32, i32, i32) = (h.parse().ok()?, m.parse().ok()?, s.parse().ok()?);
    if h > 23 || m > 59 || s > 59 {
        return None;
    }
    Some(sign * (h * 3600 + m * 60 + s))
}

fn format_offset(seconds: i32) -> String {
    let sign = if seconds < 0 { '-' } else { '+' };
    let abs = seconds.unsigned_abs();
    let (h, m, s) = (abs / 3600, (abs / 60) % 60, abs % 60);
    if s == 0 {
        format!("{sign}{h:02}:{m:02}")
    } else {
        format!("{sign}{h:02}:{m:02}:{s:02}")
    }
}

// ── Display / FromStr ─────────────────────────────────────────────────────

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Timezone {
    type Err = TimeError;

    fn from_str(s: &str) -> TimeResult<Self> {
        Self::parse(s)
    }
}

impl From<Tz> for Timezone {
    #[inline]
    fn from(tz: Tz) -> Self {
        Timezone::Named(tz)
    }
}

impl From<FixedOffset> for Timezone {
    #[inline]
    fn from(offset: FixedOffset) -> Self {
        Timezone::Fixed(offset)
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.name())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id = String::deserialize(deserializer)?;
        Timezone::parse(&id).map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

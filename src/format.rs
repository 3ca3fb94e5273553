// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Pattern-driven rendering and parsing of [`Instant`]s.
//!
//! The calendar core does not interpret pattern strings itself; it talks
//! to a [`Formatter`]. [`StrftimeFormatter`] hands the pattern to
//! `chrono`'s strftime engine. Only the three canonical patterns below are
//! guaranteed to round-trip; every other pattern letter follows `chrono`.

use crate::calendar::TICKS_PER_SECOND;
use crate::error::{TimeError, TimeResult};
use crate::instant::Instant;
use crate::timezone::{naive_from_ticks, Timezone};
use chrono::format::ParseErrorKind;
use chrono::{Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};
use std::fmt::Write;

/// `YYYY-MM-DD`
pub const UNIVERSAL_DATE: &str = "%Y-%m-%d";
/// `HH:MM:SS`
pub const UNIVERSAL_TIME: &str = "%H:%M:%S";
/// `YYYY-MM-DD HH:MM:SS`
pub const UNIVERSAL_DATETIME: &str = "%Y-%m-%d %H:%M:%S";

/// Renders instants to text and reads them back according to a pattern.
pub trait Formatter {
    /// Render `instant`'s wall-clock reading with `pattern`.
    fn format(&self, instant: &Instant, pattern: &str) -> TimeResult<String>;

    /// Read `text` laid out per `pattern` as a wall-clock reading in
    /// `timezone`.
    fn parse(&self, text: &str, pattern: &str, timezone: Timezone) -> TimeResult<Instant>;
}

/// [`Formatter`] backed by `chrono`'s strftime implementation.
///
/// Offset specifiers (`%z`, `%:z`) render the instant's own UTC offset.
/// When parsing, patterns without a time part yield midnight.
#[derive(Debug, Copy, Clone, Default)]
pub struct StrftimeFormatter;

impl Formatter for StrftimeFormatter {
    fn format(&self, instant: &Instant, pattern: &str) -> TimeResult<String> {
        let naive = naive_from_ticks(instant.ticks())?;
        let seconds = instant.timezone().offset_from_local(instant.ticks())?;
        let offset = FixedOffset::east_opt(seconds)
            .ok_or_else(|| TimeError::InvalidTimezone(instant.timezone().name()))?;
        let local = offset
            .from_local_datetime(&naive)
            .single()
            .ok_or_else(|| TimeError::out_of_range("ticks", instant.ticks()))?;

        let mut out = String::new();
        write!(out, "{}", local.format(pattern)).map_err(|_| TimeError::parse(pattern, "strftime pattern"))?;
        Ok(out)
    }

    fn parse(&self, text: &str, pattern: &str, timezone: Timezone) -> TimeResult<Instant> {
        let naive = match NaiveDateTime::parse_from_str(text, pattern) {
            Ok(naive) => naive,
            Err(err) if err.kind() == ParseErrorKind::NotEnough => {
                trace!("pattern {pattern:?} has no time part; parsing {text:?} as a date");
                NaiveDate::parse_from_str(text, pattern)
                    .map(|date| date.and_time(NaiveTime::MIN))
                    .map_err(|_| TimeError::parse(text, "date/time pattern"))?
            }
            Err(_) => return Err(TimeError::parse(text, "date/time pattern")),
        };
        instant_from_naive(&naive, timezone)
    }
}

fn instant_from_naive(naive: &NaiveDateTime, timezone: Timezone) -> TimeResult<Instant> {
    let whole = Instant::from_components(
        naive.year(),
        naive.month() as u8,
        naive.day() as u8,
        naive.hour() as u8,
        naive.minute() as u8,
        naive.second() as u8,
        timezone,
    )?;
    // chrono encodes a leap second as nanoseconds past 1e9; clamp into the
    // last tick of the second.
    let subsec = (naive.nanosecond() as i64 / 100).min(TICKS_PER_SECOND - 1);
    Instant::from_ticks(whole.ticks() + subsec, timezone)
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

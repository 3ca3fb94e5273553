// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Civil time on a linear tick axis.
//!
//! All values count **ticks** of 100 ns from `0001-01-01 00:00:00` in the
//! proleptic Gregorian calendar. Calendar math is done in this crate on
//! plain integers; `chrono`/`chrono-tz` are only consulted for the system
//! clock, IANA timezone rules, and strftime pattern handling.
//!
//! # Core types
//!
//! - [`Instant`] — a point in time plus the [`Timezone`] its wall-clock
//!   ticks are expressed in. Years 1 through 9999.
//! - [`Duration`] — a signed span of ticks.
//! - [`TimeOfDay`] — a wall-clock time within a single day.
//! - [`Interval`] — a half-open span between two instants.
//! - [`TimeContext`] — an explicit default timezone for building values.
//!
//! # Canonical text
//!
//! | Constant | Pattern |
//! |----------|---------|
//! | [`UNIVERSAL_DATE`] | `%Y-%m-%d` |
//! | [`UNIVERSAL_TIME`] | `%H:%M:%S` |
//! | [`UNIVERSAL_DATETIME`] | `%Y-%m-%d %H:%M:%S` |
//!
//! Other patterns go through a [`Formatter`]; [`StrftimeFormatter`] is the
//! default.
//!
//! ```
//! use civiltick::{Instant, Timezone};
//!
//! let t = Instant::from_components(2024, 1, 31, 9, 0, 0, Timezone::Utc)?;
//! assert_eq!(t.add_months(1)?.to_sql_date(), "2024-02-29");
//!
//! let paris = t.with_timezone(Timezone::parse("Europe/Paris")?)?;
//! assert_eq!(paris.hour(), 10);
//! # Ok::<(), civiltick::TimeError>(())
//! ```
//!
//! # Features
//!
//! - `serde` — serialization for every public value type.
//! - `logging` — `trace`/`debug` output through the `log` facade.

#[macro_use]
mod logging;

pub mod calendar;
mod context;
mod duration;
mod error;
mod format;
mod instant;
mod interval;
mod time_of_day;
mod timezone;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use context::TimeContext;
pub use duration::Duration;
pub use error::{TimeError, TimeResult};
pub use format::{Formatter, StrftimeFormatter, UNIVERSAL_DATE, UNIVERSAL_DATETIME, UNIVERSAL_TIME};
pub use instant::{is_db_null, Instant, MAX_MONTH_SHIFT};
pub use interval::{complement_within, intersect_intervals, Interval};
pub use time_of_day::TimeOfDay;
pub use timezone::Timezone;

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types shared by every fallible operation in the crate.

use thiserror::Error;

/// Errors produced while building or transforming time values.
///
/// Values are immutable, so a failed operation never leaves anything
/// half-constructed: the caller either gets a new value or one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// A calendar or clock component is outside its valid domain, or an
    /// arithmetic result left the representable tick range.
    #[error("{what} out of range: {value}")]
    OutOfRange { what: &'static str, value: i128 },

    /// Input text does not match any accepted pattern.
    #[error("cannot parse {input:?} as {expected}")]
    Parse {
        input: String,
        expected: &'static str,
    },

    /// A timezone identifier or offset could not be resolved.
    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),
}

impl TimeError {
    pub(crate) fn out_of_range(what: &'static str, value: impl Into<i128>) -> Self {
        TimeError::OutOfRange {
            what,
            value: value.into(),
        }
    }

    pub(crate) fn parse(input: &str, expected: &'static str) -> Self {
        TimeError::Parse {
            input: input.to_owned(),
            expected,
        }
    }
}

/// Result type for civiltick operations.
pub type TimeResult<T> = Result<T, TimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = TimeError::out_of_range("month", 13);
        assert_eq!(err.to_string(), "month out of range: 13");

        let err = TimeError::parse("25:00", "time of day");
        assert_eq!(err.to_string(), "cannot parse \"25:00\" as time of day");

        let err = TimeError::InvalidTimezone("Mars/Olympus".into());
        assert_eq!(err.to_string(), "invalid timezone: Mars/Olympus");
    }
}

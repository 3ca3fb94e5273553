// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Half-open spans between two instants.
//!
//! An [`Interval`] covers `[start, end)`. Both endpoints share one
//! timezone: [`Interval::new`] rebases `end` onto `start`'s zone, so the
//! raw-tick comparisons used below are meaningful.

use crate::duration::Duration;
use crate::error::{TimeError, TimeResult};
use crate::instant::Instant;
use std::fmt;

/// A span `[start, end)` with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    start: Instant,
    end: Instant,
}

impl Interval {
    /// Creates an interval, rebasing `end` onto `start`'s timezone.
    ///
    /// Fails if `end` comes before `start`.
    pub fn new(start: Instant, end: Instant) -> TimeResult<Self> {
        let end = end.with_timezone(start.timezone())?;
        if end < start {
            return Err(TimeError::out_of_range(
                "interval length",
                end.subtract(&start).ticks(),
            ));
        }
        Ok(Self { start, end })
    }

    /// Interval of `length` beginning at `start`.
    pub fn starting_at(start: Instant, length: Duration) -> TimeResult<Self> {
        Self::new(start, start.add_interval(length)?)
    }

    #[inline]
    pub const fn start(&self) -> Instant {
        self.start
    }

    #[inline]
    pub const fn end(&self) -> Instant {
        self.end
    }

    /// `end - start`.
    pub fn duration(&self) -> Duration {
        self.end.subtract(&self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `instant` lies in `[start, end)`.
    ///
    /// `instant` must already be expressed in this interval's timezone.
    pub fn contains(&self, instant: &Instant) -> bool {
        self.start <= *instant && *instant < self.end
    }

    /// Returns the overlapping sub-interval between `self` and `other`.
    ///
    /// If one interval ends exactly when the other starts the intersection
    /// is empty and `None` is returned.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start < end {
            Some(Self { start, end })
        } else {
            None
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Returns the gaps of `intervals` within the bounding `outer` interval.
///
/// `intervals` must be sorted and non-overlapping. Single pass, O(n).
pub fn complement_within(outer: Interval, intervals: &[Interval]) -> Vec<Interval> {
    let mut gaps = Vec::new();
    let mut cursor = outer.start;
    for iv in intervals {
        if iv.start > cursor {
            gaps.push(Interval {
                start: cursor,
                end: iv.start.min(outer.end),
            });
        }
        if iv.end > cursor {
            cursor = iv.end;
        }
        if cursor >= outer.end {
            break;
        }
    }
    if cursor < outer.end {
        gaps.push(Interval {
            start: cursor,
            end: outer.end,
        });
    }
    gaps.retain(|gap| !gap.is_empty());
    gaps
}

/// Returns the intersection of two sorted, non-overlapping interval lists.
///
/// O(n+m) merge.
pub fn intersect_intervals(a: &[Interval], b: &[Interval]) -> Vec<Interval> {
    let mut result = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if let Some(overlap) = a[i].intersection(&b[j]) {
            result.push(overlap);
        }
        if a[i].end <= b[j].end {
            i += 1;
        } else {
            j += 1;
        }
    }
    result
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timezone::Timezone;

    fn at(hour: u8) -> Instant {
        Instant::from_components(2024, 6, 1, hour, 0, 0, Timezone::Utc).unwrap()
    }

    fn span(a: u8, b: u8) -> Interval {
        Interval::new(at(a), at(b)).unwrap()
    }

    #[test]
    fn creation_and_duration() {
        let iv = span(9, 17);
        assert_eq!(iv.start(), at(9));
        assert_eq!(iv.end(), at(17));
        assert_eq!(iv.duration(), Duration::from_components(0, 8, 0, 0).unwrap());
        assert!(!iv.is_empty());
        assert!(span(9, 9).is_empty());
    }

    #[test]
    fn rejects_reversed_endpoints() {
        assert!(matches!(
            Interval::new(at(17), at(9)),
            Err(TimeError::OutOfRange { .. })
        ));
    }

    #[test]
    fn end_is_rebased_onto_start_zone() {
        let start = at(9);
        let end = at(17)
            .with_timezone(Timezone::Named(chrono_tz::Asia::Tokyo))
            .unwrap();
        let iv = Interval::new(start, end).unwrap();
        assert_eq!(iv.end().timezone(), Timezone::Utc);
        assert_eq!(iv.duration().total_hours(), 8.0);
    }

    #[test]
    fn starting_at() {
        let iv = Interval::starting_at(at(9), Duration::from_components(0, 2, 30, 0).unwrap()).unwrap();
        assert_eq!(iv.end().to_sql_datetime(), "2024-06-01 11:30:00");
    }

    #[test]
    fn half_open_membership() {
        let iv = span(9, 17);
        assert!(iv.contains(&at(9)));
        assert!(iv.contains(&at(16)));
        assert!(!iv.contains(&at(17)));
        assert!(!iv.contains(&at(8)));
    }

    #[test]
    fn intersections() {
        assert_eq!(span(0, 5).intersection(&span(3, 8)), Some(span(3, 5)));
        assert_eq!(span(0, 3).intersection(&span(5, 8)), None);
        assert_eq!(span(0, 3).intersection(&span(3, 8)), None);
    }

    #[test]
    fn display() {
        assert_eq!(
            span(9, 10).to_string(),
            "2024-06-01 09:00:00 UTC to 2024-06-01 10:00:00 UTC"
        );
    }

    #[test]
    fn complement_gaps() {
        let gaps = complement_within(span(0, 10), &[span(2, 4), span(6, 8)]);
        assert_eq!(gaps, vec![span(0, 2), span(4, 6), span(8, 10)]);

        assert_eq!(complement_within(span(0, 10), &[]), vec![span(0, 10)]);
        assert!(complement_within(span(0, 10), &[span(0, 10)]).is_empty());
        assert_eq!(complement_within(span(2, 6), &[span(4, 9)]), vec![span(2, 4)]);
    }

    #[test]
    fn business_hours_between_bookings() {
        // open: [1,3), [5,9); booked: [2,4), [7,8)
        // free while open: [1,2), [5,7), [8,9)
        let open = vec![span(1, 3), span(5, 9)];
        let booked = vec![span(2, 4), span(7, 8)];
        let free = intersect_intervals(&open, &complement_within(span(0, 10), &booked));
        assert_eq!(free, vec![span(1, 2), span(5, 7), span(8, 9)]);
    }

    #[test]
    fn intersect_lists_without_overlap() {
        assert!(intersect_intervals(&[span(0, 3)], &[span(5, 8)]).is_empty());
        assert_eq!(intersect_intervals(&[span(0, 5)], &[span(3, 8)]), vec![span(3, 5)]);
    }
}

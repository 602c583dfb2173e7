// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Partitioning of a person's timeline into half-open intervals.
//!
//! Cut dates mark every date on which the set of active engagements could
//! change. Consecutive pairs of cut dates form `[start, end)` intervals. The
//! sentinel [`OPEN_ENDED`] marks the end of an interval with no upper bound.

use crate::error::DomainError;
use crate::types::{Engagement, Validity};
use time::Date;
use time::macros::date;

/// Terminal cut date standing in for "no end".
pub const OPEN_ENDED: Date = date!(9999 - 12 - 30);

/// A half-open interval `[start, end)` between two consecutive cut dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    start: Date,
    end: Date,
}

impl Interval {
    /// Creates an interval. The caller guarantees `start < end`.
    #[must_use]
    pub const fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Returns whether this interval runs until the open-ended sentinel.
    #[must_use]
    pub fn is_open_ended(&self) -> bool {
        self.end == OPEN_ENDED
    }

    /// The validity an edit covering this interval must carry.
    ///
    /// # Errors
    ///
    /// See [`compute_validity`].
    pub fn validity(&self) -> Result<Validity, DomainError> {
        compute_validity(self.start, self.end)
    }
}

/// An interval together with the engagements active during it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalSnapshot {
    /// The interval.
    pub interval: Interval,
    /// Engagements active on the interval's start date.
    pub engagements: Vec<Engagement>,
}

/// Turns an ordered list of cut dates into consecutive half-open intervals.
///
/// For cut dates `[d0, d1, d2]` the result is `[(d0, d1), (d1, d2)]`. Fewer
/// than two dates yield no intervals.
///
/// # Errors
///
/// Returns `InvalidCutDateSequence` if the dates are not strictly increasing.
pub fn resolve(cut_dates: &[Date]) -> Result<Vec<Interval>, DomainError> {
    cut_dates
        .windows(2)
        .map(|pair| {
            let (start, end) = (pair[0], pair[1]);
            if start >= end {
                return Err(DomainError::InvalidCutDateSequence {
                    previous: start,
                    next: end,
                });
            }
            Ok(Interval::new(start, end))
        })
        .collect()
}

/// Computes the inclusive validity covering `[start, end)`.
///
/// The last day is the day before `end`, except for the open-ended sentinel
/// which maps to no upper bound.
///
/// # Errors
///
/// Returns `DateArithmeticOverflow` if `end` has no previous day.
pub fn compute_validity(start: Date, end: Date) -> Result<Validity, DomainError> {
    if end == OPEN_ENDED {
        return Ok(Validity::new(start, None));
    }

    let to: Date = end
        .previous_day()
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("computing the day before {end}"),
        })?;
    Ok(Validity::new(start, Some(to)))
}

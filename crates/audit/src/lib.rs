// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

//! Check-mode findings.
//!
//! Checking never edits anything. For every cut date of a person the number
//! of engagements, primaries, and ordinary (non-special) primaries is
//! counted, and each count triple is classified into at most one finding.
//!
//! ## Classification
//!
//! Counts saturate: engagements at 1, primaries and filtered primaries at 2.
//!
//! | engagements | primaries | filtered | finding |
//! |---|---|---|---|
//! | 0 | - | - | none |
//! | 1+ | 0 | - | "No primary" (reported) |
//! | 1+ | 1 | - | none |
//! | 1+ | 2+ | 0 | "All primaries are special" (info) |
//! | 1+ | 2+ | 1 | "Only one non-special primary" (info) |
//! | 1+ | 2+ | 2+ | "Too many primaries" (reported) |

use calc_primary_domain::PersonId;
use std::collections::BTreeMap;
use time::Date;

#[cfg(test)]
mod tests;

/// How a finding should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Logged only.
    Info,
    /// Shown to the operator.
    Reported,
}

impl Severity {
    /// Converts this severity to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Reported => "reported",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What was found at one cut date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindingKind {
    /// Engagements exist but none is primary.
    NoPrimary,
    /// Several primaries, none of them ordinary.
    AllPrimariesSpecial,
    /// Several primaries, exactly one of them ordinary.
    OnlyOneNonSpecialPrimary,
    /// Several ordinary primaries.
    TooManyPrimaries,
}

impl FindingKind {
    /// The message text of this finding.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::NoPrimary => "No primary",
            Self::AllPrimariesSpecial => "All primaries are special",
            Self::OnlyOneNonSpecialPrimary => "Only one non-special primary",
            Self::TooManyPrimaries => "Too many primaries",
        }
    }

    /// The severity this finding is surfaced with.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::NoPrimary | Self::TooManyPrimaries => Severity::Reported,
            Self::AllPrimariesSpecial | Self::OnlyOneNonSpecialPrimary => Severity::Info,
        }
    }
}

/// Engagement and primary counts at one cut date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrimaryCounts {
    /// Engagements active at the date.
    pub engagements: usize,
    /// Engagements whose primary type is primary-like.
    pub primaries: usize,
    /// Primaries that are not special.
    pub filtered_primaries: usize,
}

impl PrimaryCounts {
    /// Creates a new count triple.
    #[must_use]
    pub const fn new(engagements: usize, primaries: usize, filtered_primaries: usize) -> Self {
        Self {
            engagements,
            primaries,
            filtered_primaries,
        }
    }
}

/// A classified finding for one person at one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Finding {
    /// The person checked.
    pub person: PersonId,
    /// The cut date the counts were taken at.
    pub date: Date,
    /// What was found.
    pub kind: FindingKind,
}

impl Finding {
    /// The severity of this finding.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} for {} at {}",
            self.kind.message(),
            self.person,
            self.date
        )
    }
}

/// Classifies one count triple.
///
/// The engagement count only matters as zero or non-zero.
#[must_use]
pub fn classify(counts: PrimaryCounts) -> Option<FindingKind> {
    let engagements: usize = counts.engagements.min(1);
    let primaries: usize = counts.primaries.min(2);
    let filtered_primaries: usize = counts.filtered_primaries.min(2);

    match (engagements, primaries, filtered_primaries) {
        (0, _, _) | (_, 1, _) => None,
        (_, 0, _) => Some(FindingKind::NoPrimary),
        (_, _, 0) => Some(FindingKind::AllPrimariesSpecial),
        (_, _, 1) => Some(FindingKind::OnlyOneNonSpecialPrimary),
        _ => Some(FindingKind::TooManyPrimaries),
    }
}

/// Lazily turns per-date counts into findings, in date order.
pub fn audit(
    person: PersonId,
    results: BTreeMap<Date, PrimaryCounts>,
) -> impl Iterator<Item = Finding> {
    results.into_iter().filter_map(move |(date, counts)| {
        classify(counts).map(|kind| Finding { person, date, kind })
    })
}

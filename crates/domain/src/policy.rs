// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tie-break policies for choosing a primary engagement.
//!
//! A policy is consulted only when an interval has no fixed primary. Each
//! integration selects one policy at start-up; the policy also builds the
//! [`PrimaryTypeCatalog`], decides which primaries count in check mode and
//! which engagements take part in recalculation.
//!
//! ## Provided policies
//!
//! - [`OccupationRatePolicy`]: highest occupation rate, then lowest user key
//! - [`EarliestStartPolicy`]: earliest engagement start, then lowest user key
//! - [`EngagementTypeOrderPolicy`]: configured engagement type order, then
//!   highest occupation rate, then earliest start

use crate::catalog::{FIXED_PRIMARY_KEY, NON_PRIMARY_KEY, PRIMARY_KEY, PrimaryTypeCatalog};
use crate::error::DomainError;
use crate::types::{Engagement, EngagementId, EngagementTypeId, PrimaryClass};
use std::cmp::{Ordering, Reverse};

/// Integration-specific rules for primary engagement calculation.
pub trait TieBreakPolicy: std::fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Builds the primary type catalog from the registry's primary classes.
    ///
    /// # Errors
    ///
    /// Returns an error if a required class is missing or the catalog is
    /// inconsistent.
    fn classify_types(&self, classes: &[PrimaryClass]) -> Result<PrimaryTypeCatalog, DomainError> {
        PrimaryTypeCatalog::from_classes(classes, FIXED_PRIMARY_KEY, PRIMARY_KEY, NON_PRIMARY_KEY)
    }

    /// Picks the primary among engagements that have no fixed primary.
    ///
    /// `candidates` is never empty. `Ok(None)` means the policy abstains.
    ///
    /// # Errors
    ///
    /// Returns an error if the candidates lack data the policy requires.
    fn pick_primary(&self, candidates: &[Engagement]) -> Result<Option<EngagementId>, DomainError>;

    /// Whether a primary-like engagement counts as an ordinary primary in
    /// check mode. Engagements failing this are "special".
    fn counts_in_check(&self, catalog: &PrimaryTypeCatalog, engagement: &Engagement) -> bool {
        !catalog.is_fixed_primary(engagement.primary_type)
    }

    /// Whether an engagement takes part in recalculation at all.
    ///
    /// Excluded engagements are neither candidates nor edited.
    /// `include_past` is the recalculation's own setting.
    fn include_in_recalculation(&self, _engagement: &Engagement, _include_past: bool) -> bool {
        true
    }
}

/// Compares two engagements by user key.
///
/// Keys are compared numerically when both are integers and lexically
/// otherwise.
///
/// # Errors
///
/// Returns `EngagementMissingUserKey` if either engagement has no user key.
pub fn compare_user_keys(a: &Engagement, b: &Engagement) -> Result<Ordering, DomainError> {
    let a_key: &str = a
        .user_key
        .as_deref()
        .ok_or(DomainError::EngagementMissingUserKey(a.id))?;
    let b_key: &str = b
        .user_key
        .as_deref()
        .ok_or(DomainError::EngagementMissingUserKey(b.id))?;

    match (a_key.trim().parse::<u64>(), b_key.trim().parse::<u64>()) {
        (Ok(a_num), Ok(b_num)) => Ok(a_num.cmp(&b_num)),
        _ => Ok(a_key.cmp(b_key)),
    }
}

/// Picks the engagement with the lowest user key among tied engagements.
fn lowest_user_key<'a>(tied: &[&'a Engagement]) -> Result<Option<&'a Engagement>, DomainError> {
    let Some((first, rest)) = tied.split_first() else {
        return Ok(None);
    };

    let mut best: &Engagement = first;
    for candidate in rest {
        if compare_user_keys(candidate, best)? == Ordering::Less {
            best = candidate;
        }
    }
    Ok(Some(best))
}

/// The engagement with the highest occupation rate is primary.
///
/// Engagements without an occupation rate, or with a zero rate, are not
/// eligible. Ties are broken by the lowest user key.
#[derive(Debug, Clone, Copy, Default)]
pub struct OccupationRatePolicy;

impl TieBreakPolicy for OccupationRatePolicy {
    fn name(&self) -> &'static str {
        "occupation-rate"
    }

    fn pick_primary(&self, candidates: &[Engagement]) -> Result<Option<EngagementId>, DomainError> {
        let eligible: Vec<&Engagement> = candidates
            .iter()
            .filter(|engagement| engagement.fraction.is_some_and(|fraction| fraction > 0))
            .collect();

        let Some(highest) = eligible.iter().filter_map(|engagement| engagement.fraction).max()
        else {
            return Ok(None);
        };

        let tied: Vec<&Engagement> = eligible
            .into_iter()
            .filter(|engagement| engagement.fraction == Some(highest))
            .collect();

        Ok(lowest_user_key(&tied)?.map(|engagement| engagement.id))
    }
}

/// The engagement that started first is primary.
///
/// Ties are broken by the lowest user key.
#[derive(Debug, Clone, Copy, Default)]
pub struct EarliestStartPolicy;

impl TieBreakPolicy for EarliestStartPolicy {
    fn name(&self) -> &'static str {
        "earliest-start"
    }

    fn pick_primary(&self, candidates: &[Engagement]) -> Result<Option<EngagementId>, DomainError> {
        let Some(earliest) = candidates
            .iter()
            .map(|engagement| engagement.validity.from)
            .min()
        else {
            return Ok(None);
        };

        let tied: Vec<&Engagement> = candidates
            .iter()
            .filter(|engagement| engagement.validity.from == earliest)
            .collect();

        Ok(lowest_user_key(&tied)?.map(|engagement| engagement.id))
    }
}

/// Engagement types are ranked by a configured order; the best ranked
/// engagement is primary.
///
/// Types missing from the order rank after every listed type. Ties are
/// broken by highest occupation rate, then earliest start, then engagement
/// id, so the policy always picks a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngagementTypeOrderPolicy {
    order: Vec<EngagementTypeId>,
}

impl EngagementTypeOrderPolicy {
    /// Creates the policy from the engagement types, most preferred first.
    #[must_use]
    pub const fn new(order: Vec<EngagementTypeId>) -> Self {
        Self { order }
    }

    fn rank(&self, engagement: &Engagement) -> usize {
        engagement
            .engagement_type
            .and_then(|engagement_type| {
                self.order
                    .iter()
                    .position(|ranked| *ranked == engagement_type)
            })
            .unwrap_or(self.order.len())
    }
}

impl TieBreakPolicy for EngagementTypeOrderPolicy {
    fn name(&self) -> &'static str {
        "engagement-type-order"
    }

    fn pick_primary(&self, candidates: &[Engagement]) -> Result<Option<EngagementId>, DomainError> {
        Ok(candidates
            .iter()
            .min_by_key(|engagement| {
                (
                    self.rank(engagement),
                    Reverse(engagement.fraction.unwrap_or(0)),
                    engagement.validity.from,
                    engagement.id,
                )
            })
            .map(|engagement| engagement.id))
    }
}

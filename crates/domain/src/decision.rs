// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Choosing the primary engagement of one interval.
//!
//! ## Rules
//!
//! 1. An engagement explicitly marked `fixed_primary` always wins.
//! 2. Two or more fixed primaries in one interval are a data integrity
//!    violation; nothing is guessed.
//! 3. Without a fixed primary the tie-break policy decides.
//! 4. A policy that abstains leaves the interval without a primary, which is
//!    an error.
//!
//! An interval without engagements has nothing to decide.

use crate::catalog::PrimaryTypeCatalog;
use crate::error::DomainError;
use crate::interval::{Interval, IntervalSnapshot};
use crate::policy::TieBreakPolicy;
use crate::types::{Engagement, EngagementId, PrimaryKind};

/// The winning engagement of an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// The interval the decision applies to.
    pub interval: Interval,
    /// The engagement chosen as primary.
    pub primary_id: EngagementId,
    /// Whether the choice came from a fixed primary or from the policy.
    pub kind: PrimaryKind,
}

/// Gives every engagement without a primary type the `non_primary` type.
///
/// Engagements are never dropped.
#[must_use]
pub fn normalize_engagements(
    engagements: Vec<Engagement>,
    catalog: &PrimaryTypeCatalog,
) -> Vec<Engagement> {
    engagements
        .into_iter()
        .map(|mut engagement| {
            if engagement.primary_type.is_none() {
                engagement.primary_type = Some(catalog.non_primary());
            }
            engagement
        })
        .collect()
}

/// Decides the primary engagement of an interval.
///
/// # Returns
///
/// * `Ok(None)` if the interval has no engagements
/// * `Ok(Some(Decision))` otherwise
///
/// # Errors
///
/// Returns an error if:
/// - More than one engagement carries the fixed primary type
/// - There is no fixed primary and the policy picks nothing
/// - The policy itself fails
pub fn decide_primary(
    snapshot: &IntervalSnapshot,
    catalog: &PrimaryTypeCatalog,
    policy: &dyn TieBreakPolicy,
) -> Result<Option<Decision>, DomainError> {
    if snapshot.engagements.is_empty() {
        return Ok(None);
    }

    let fixed: Vec<EngagementId> = snapshot
        .engagements
        .iter()
        .filter(|engagement| catalog.is_fixed_primary(engagement.primary_type))
        .map(|engagement| engagement.id)
        .collect();

    match fixed.as_slice() {
        [primary_id] => {
            return Ok(Some(Decision {
                interval: snapshot.interval,
                primary_id: *primary_id,
                kind: PrimaryKind::FixedPrimary,
            }));
        }
        [] => {}
        _ => {
            return Err(DomainError::MultipleFixedPrimaries {
                date: snapshot.interval.start(),
                engagements: fixed,
            });
        }
    }

    match policy.pick_primary(&snapshot.engagements)? {
        Some(primary_id) => Ok(Some(Decision {
            interval: snapshot.interval,
            primary_id,
            kind: PrimaryKind::Primary,
        })),
        None => Err(DomainError::NoPrimaryFound {
            date: snapshot.interval.start(),
        }),
    }
}

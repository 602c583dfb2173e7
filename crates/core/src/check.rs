// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use calc_primary_audit::PrimaryCounts;
use calc_primary_domain::{Engagement, PrimaryTypeCatalog, TieBreakPolicy};

/// Counts engagements, primaries and ordinary primaries.
///
/// An engagement without a primary type is not a primary. A primary is
/// ordinary when the policy's check filter accepts it.
#[must_use]
pub fn count_primary_engagements(
    policy: &dyn TieBreakPolicy,
    catalog: &PrimaryTypeCatalog,
    engagements: &[Engagement],
) -> PrimaryCounts {
    let primaries: Vec<&Engagement> = engagements
        .iter()
        .filter(|engagement| catalog.is_primary_like(engagement.primary_type))
        .collect();

    let filtered_primaries: usize = primaries
        .iter()
        .filter(|engagement| policy.counts_in_check(catalog, engagement))
        .count();

    PrimaryCounts::new(engagements.len(), primaries.len(), filtered_primaries)
}

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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod catalog;
mod decision;
mod error;
mod interval;
mod policy;
mod types;

#[cfg(test)]
mod tests;

pub use catalog::{FIXED_PRIMARY_KEY, NON_PRIMARY_KEY, PRIMARY_KEY, PrimaryTypeCatalog};
pub use decision::{Decision, decide_primary, normalize_engagements};
pub use error::DomainError;
pub use interval::{Interval, IntervalSnapshot, OPEN_ENDED, compute_validity, resolve};
pub use policy::{
    EarliestStartPolicy, EngagementTypeOrderPolicy, OccupationRatePolicy, TieBreakPolicy,
    compare_user_keys,
};
pub use types::{
    Engagement, EngagementId, EngagementTypeId, PersonId, PrimaryClass, PrimaryKind,
    PrimaryTypeId, Validity,
};

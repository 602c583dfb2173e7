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

//! Primary engagement resolution and reconciliation.
//!
//! For each person the timeline is split into intervals at the cut dates
//! reported by the [`Registry`]. In every interval exactly one engagement is
//! chosen as primary and all others become non-primary. Only engagements
//! whose current primary type differs from the target receive an
//! [`EditCommand`].
//!
//! Two modes exist:
//! - **check**: count primaries per cut date and classify the counts into
//!   findings; nothing is edited
//! - **recalculate**: decide and reconcile every interval, dispatching edits
//!   unless running dry

mod check;
mod command;
mod error;
mod reconcile;
mod registry;
mod state;
mod updater;

#[cfg(test)]
mod tests;

pub use check::count_primary_engagements;
pub use command::{DispatchOutcome, EditCommand};
pub use error::CoreError;
pub use reconcile::reconcile;
pub use registry::{Registry, RegistryError};
pub use state::{BatchSummary, CheckSummary, RecalculationResult};
pub use updater::{PrimaryEngagementUpdater, fetch_and_enrich};

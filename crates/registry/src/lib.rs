// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory registry of persons and engagements.
//!
//! This crate provides a [`Registry`](calc_primary::Registry) backed by a
//! JSON snapshot file. It is used by the command-line tool and by tests; a
//! networked registry client would implement the same trait.
//!
//! ## Data Model
//!
//! Each engagement is stored as a list of segments. A segment is a stretch of
//! the engagement's validity over which its primary type is constant.
//!
//! - Cut dates are the segment boundaries of all of a person's engagements
//! - An edit splits the segments it touches at the edit boundaries
//! - Adjacent segments with the same primary type are merged again
//!
//! ## Snapshot Format
//!
//! ```text
//! {
//!   "primary_classes": [{ "id": "<uuid>", "user_key": "primary" }, ...],
//!   "persons": [{
//!     "id": "<uuid>",
//!     "name": "Jane Doe",
//!     "engagements": [{
//!       "id": "<uuid>",
//!       "user_key": "00120",
//!       "engagement_type": "<uuid>",
//!       "fraction": 1000,
//!       "segments": [{ "from": "2024-01-01", "to": null, "primary_type": "<uuid>" }]
//!     }]
//!   }]
//! }
//! ```

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
#![allow(clippy::multiple_crate_versions)]

mod error;
mod memory;
mod snapshot;
mod timeline;

#[cfg(test)]
mod tests;

pub use error::SnapshotError;
pub use memory::InMemoryRegistry;
pub use snapshot::{EngagementRecord, PersonRecord, RegistrySnapshot, SegmentRecord};
pub use timeline::{apply_primary_edit, cut_dates, cut_dates_from};

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::EngagementId;
use time::Date;

/// Errors that can occur while resolving intervals or deciding primaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Cut dates were not strictly increasing.
    InvalidCutDateSequence {
        /// The earlier position in the sequence.
        previous: Date,
        /// The date following it, which is not later.
        next: Date,
    },
    /// More than one engagement is explicitly marked as primary in one interval.
    MultipleFixedPrimaries {
        /// Start of the interval.
        date: Date,
        /// The engagements carrying the fixed primary type.
        engagements: Vec<EngagementId>,
    },
    /// No engagement qualified as primary and the tie-break policy abstained.
    NoPrimaryFound {
        /// Start of the interval.
        date: Date,
    },
    /// An engagement needed for a user key tie-break has no user key.
    EngagementMissingUserKey(EngagementId),
    /// A primary class with the given user key does not exist.
    PrimaryClassNotFound(String),
    /// The primary type catalog is inconsistent.
    InvalidPrimaryTypeCatalog(String),
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCutDateSequence { previous, next } => {
                write!(
                    f,
                    "Cut dates must be strictly increasing, but {next} follows {previous}"
                )
            }
            Self::MultipleFixedPrimaries { date, engagements } => {
                let ids: Vec<String> = engagements.iter().map(ToString::to_string).collect();
                write!(
                    f,
                    "Multiple fixed primaries at {date}: {}",
                    ids.join(", ")
                )
            }
            Self::NoPrimaryFound { date } => write!(f, "No primary found at {date}"),
            Self::EngagementMissingUserKey(id) => {
                write!(f, "Engagement {id} is missing its user key")
            }
            Self::PrimaryClassNotFound(user_key) => {
                write!(f, "Primary class '{user_key}' not found")
            }
            Self::InvalidPrimaryTypeCatalog(msg) => {
                write!(f, "Invalid primary type catalog: {msg}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Wraps a raw UUID.
            #[must_use]
            pub const fn new(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the raw UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(
    /// Identifies a person in the registry.
    PersonId
);
uuid_id!(
    /// Identifies an engagement in the registry.
    EngagementId
);
uuid_id!(
    /// Identifies a primary-type class (`fixed_primary`, `primary`, `non_primary`, ...).
    PrimaryTypeId
);
uuid_id!(
    /// Identifies an engagement type class.
    EngagementTypeId
);

/// The kind of primary chosen for an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryKind {
    /// Explicitly chosen by an operator; overrides any heuristic.
    FixedPrimary,
    /// Chosen by the tie-break policy.
    Primary,
}

impl PrimaryKind {
    /// Converts this kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FixedPrimary => "fixed_primary",
            Self::Primary => "primary",
        }
    }
}

impl std::fmt::Display for PrimaryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A closed validity range; `to` is inclusive and `None` means open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Validity {
    /// First day of validity.
    pub from: Date,
    /// Last day of validity, or `None` when open-ended.
    pub to: Option<Date>,
}

impl Validity {
    /// Creates a new validity range.
    #[must_use]
    pub const fn new(from: Date, to: Option<Date>) -> Self {
        Self { from, to }
    }

    /// Returns whether `date` falls inside this range.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        date >= self.from && self.to.is_none_or(|to| date <= to)
    }
}

impl std::fmt::Display for Validity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to {
            Some(to) => write!(f, "{}..={to}", self.from),
            None => write!(f, "{}..", self.from),
        }
    }
}

/// A primary-type class as stored in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryClass {
    /// The class identifier.
    pub id: PrimaryTypeId,
    /// The class user key (e.g. "primary", "non-primary").
    pub user_key: String,
}

impl PrimaryClass {
    /// Creates a new primary class.
    #[must_use]
    pub fn new(id: PrimaryTypeId, user_key: &str) -> Self {
        Self {
            id,
            user_key: user_key.to_string(),
        }
    }
}

/// One employment relationship of a person, as seen on a single date.
///
/// The core only ever holds transient copies of engagements for the duration
/// of one pass; the registry owns them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Engagement {
    /// The engagement identifier.
    pub id: EngagementId,
    /// The engagement user key, used by some tie-breaks.
    pub user_key: Option<String>,
    /// The engagement type class.
    pub engagement_type: Option<EngagementTypeId>,
    /// Occupation rate in per-mille.
    pub fraction: Option<u32>,
    /// Current primary type; `None` when the registry has no value.
    pub primary_type: Option<PrimaryTypeId>,
    /// The overall validity of the engagement.
    pub validity: Validity,
}

impl Engagement {
    /// Creates an engagement with only the required fields set.
    #[must_use]
    pub const fn new(id: EngagementId, validity: Validity) -> Self {
        Self {
            id,
            user_key: None,
            engagement_type: None,
            fraction: None,
            primary_type: None,
            validity,
        }
    }

    /// Sets the user key.
    #[must_use]
    pub fn with_user_key(mut self, user_key: &str) -> Self {
        self.user_key = Some(user_key.to_string());
        self
    }

    /// Sets the engagement type.
    #[must_use]
    pub const fn with_engagement_type(mut self, engagement_type: EngagementTypeId) -> Self {
        self.engagement_type = Some(engagement_type);
        self
    }

    /// Sets the occupation rate.
    #[must_use]
    pub const fn with_fraction(mut self, fraction: u32) -> Self {
        self.fraction = Some(fraction);
        self
    }

    /// Sets the current primary type.
    #[must_use]
    pub const fn with_primary_type(mut self, primary_type: PrimaryTypeId) -> Self {
        self.primary_type = Some(primary_type);
        self
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{PrimaryClass, PrimaryKind, PrimaryTypeId};
use std::collections::BTreeSet;

/// User key of the class marking an operator-chosen primary.
pub const FIXED_PRIMARY_KEY: &str = "explicitly-primary";
/// User key of the class marking a computed primary.
pub const PRIMARY_KEY: &str = "primary";
/// User key of the class marking a non-primary engagement.
pub const NON_PRIMARY_KEY: &str = "non-primary";

/// The primary-type classification used for one run.
///
/// Immutable after construction. `primary_set` always contains
/// `fixed_primary` and `primary` and never contains `non_primary`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryTypeCatalog {
    fixed_primary: PrimaryTypeId,
    primary: PrimaryTypeId,
    non_primary: PrimaryTypeId,
    primary_set: BTreeSet<PrimaryTypeId>,
}

impl PrimaryTypeCatalog {
    /// Creates a catalog from the three primary types plus any additional
    /// types that should count as primary-like.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The three primary types are not distinct
    /// - `non_primary` is listed among the extra primary-like types
    pub fn new(
        fixed_primary: PrimaryTypeId,
        primary: PrimaryTypeId,
        non_primary: PrimaryTypeId,
        extra_primary: impl IntoIterator<Item = PrimaryTypeId>,
    ) -> Result<Self, DomainError> {
        if fixed_primary == primary || fixed_primary == non_primary || primary == non_primary {
            return Err(DomainError::InvalidPrimaryTypeCatalog(String::from(
                "fixed_primary, primary and non_primary must be distinct",
            )));
        }

        let mut primary_set: BTreeSet<PrimaryTypeId> = extra_primary.into_iter().collect();
        if primary_set.contains(&non_primary) {
            return Err(DomainError::InvalidPrimaryTypeCatalog(String::from(
                "non_primary cannot be primary-like",
            )));
        }
        primary_set.insert(fixed_primary);
        primary_set.insert(primary);

        Ok(Self {
            fixed_primary,
            primary,
            non_primary,
            primary_set,
        })
    }

    /// Builds a catalog by looking up classes by user key.
    ///
    /// # Errors
    ///
    /// Returns `PrimaryClassNotFound` if any of the three keys has no class,
    /// or the errors of [`PrimaryTypeCatalog::new`].
    pub fn from_classes(
        classes: &[PrimaryClass],
        fixed_primary_key: &str,
        primary_key: &str,
        non_primary_key: &str,
    ) -> Result<Self, DomainError> {
        let lookup = |user_key: &str| -> Result<PrimaryTypeId, DomainError> {
            classes
                .iter()
                .find(|class| class.user_key == user_key)
                .map(|class| class.id)
                .ok_or_else(|| DomainError::PrimaryClassNotFound(user_key.to_string()))
        };

        Self::new(
            lookup(fixed_primary_key)?,
            lookup(primary_key)?,
            lookup(non_primary_key)?,
            std::iter::empty(),
        )
    }

    /// The operator-chosen primary type.
    #[must_use]
    pub const fn fixed_primary(&self) -> PrimaryTypeId {
        self.fixed_primary
    }

    /// The computed primary type.
    #[must_use]
    pub const fn primary(&self) -> PrimaryTypeId {
        self.primary
    }

    /// The non-primary type.
    #[must_use]
    pub const fn non_primary(&self) -> PrimaryTypeId {
        self.non_primary
    }

    /// All types considered primary-like.
    #[must_use]
    pub const fn primary_set(&self) -> &BTreeSet<PrimaryTypeId> {
        &self.primary_set
    }

    /// The type an engagement receives when chosen with the given kind.
    #[must_use]
    pub const fn type_for(&self, kind: PrimaryKind) -> PrimaryTypeId {
        match kind {
            PrimaryKind::FixedPrimary => self.fixed_primary,
            PrimaryKind::Primary => self.primary,
        }
    }

    #[must_use]
    pub fn is_primary_like(&self, primary_type: Option<PrimaryTypeId>) -> bool {
        primary_type.is_some_and(|id| self.primary_set.contains(&id))
    }

    #[must_use]
    pub fn is_fixed_primary(&self, primary_type: Option<PrimaryTypeId>) -> bool {
        primary_type == Some(self.fixed_primary)
    }
}

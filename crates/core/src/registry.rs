// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{DispatchOutcome, EditCommand};
use calc_primary_domain::{Engagement, EngagementId, PersonId, PrimaryClass, Validity};
use thiserror::Error;
use time::Date;

/// Errors reported by a registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Person not found: {0}")]
    PersonNotFound(PersonId),

    #[error("Engagement not found: {0}")]
    EngagementNotFound(EngagementId),

    #[error("Edit of engagement {engagement} outside its validity: {validity}")]
    EditOutsideValidity {
        engagement: EngagementId,
        validity: Validity,
    },

    #[error("Edit rejected: {0}")]
    Rejected(String),

    #[error("Registry unavailable: {0}")]
    Unavailable(String),
}

/// The organisational registry holding persons and engagements.
///
/// Implementations own transport concerns such as retries; the engine treats
/// every answer as final.
pub trait Registry {
    /// All persons to process in bulk operations.
    ///
    /// # Errors
    ///
    /// Returns an error if the population cannot be listed.
    fn list_all_person_ids(&self) -> Result<Vec<PersonId>, RegistryError>;

    /// The primary-type classes known to the registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the classes cannot be read.
    fn fetch_primary_classes(&self) -> Result<Vec<PrimaryClass>, RegistryError>;

    /// Ordered dates at which the person's active engagements may change.
    ///
    /// With `include_past` false only dates from today onwards are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the person does not exist.
    fn fetch_cut_dates(&self, person: PersonId, include_past: bool)
    -> Result<Vec<Date>, RegistryError>;

    /// The engagements of a person active at `at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the person does not exist.
    fn fetch_engagements(&self, person: PersonId, at: Date)
    -> Result<Vec<Engagement>, RegistryError>;

    /// Applies one edit.
    ///
    /// # Errors
    ///
    /// Returns an error for anything other than an applied edit or an edit
    /// that changes nothing.
    fn dispatch_edit(&mut self, command: &EditCommand) -> Result<DispatchOutcome, RegistryError>;
}

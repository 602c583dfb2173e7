// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use calc_primary_domain::PersonId;
use std::collections::BTreeMap;

/// The outcome of recalculating one person.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecalculationResult {
    /// The person recalculated.
    pub person: PersonId,
    /// Number of edits computed (and dispatched, unless dry run).
    pub edits: usize,
}

/// The outcome of recalculating the whole population.
///
/// A failing person never stops the batch; failures are collected here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Edit count per successfully processed person.
    pub edits: BTreeMap<PersonId, usize>,
    /// Persons whose processing failed.
    pub failures: Vec<(PersonId, CoreError)>,
}

impl BatchSummary {
    /// Total number of edits over all persons.
    #[must_use]
    pub fn total_edits(&self) -> usize {
        self.edits.values().sum()
    }
}

/// The outcome of checking the whole population.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckSummary {
    /// Number of persons checked successfully.
    pub persons_checked: usize,
    /// Number of findings emitted.
    pub findings: usize,
    /// Persons whose check failed.
    pub failures: Vec<(PersonId, CoreError)>,
}

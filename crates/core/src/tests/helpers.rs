// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DispatchOutcome, EditCommand, Registry, RegistryError};
use calc_primary_domain::{
    DomainError, Engagement, EngagementId, PersonId, PrimaryClass, PrimaryTypeCatalog,
    PrimaryTypeId, TieBreakPolicy, Validity,
};
use std::collections::BTreeMap;
use time::Date;
use time::macros::date;
use uuid::Uuid;

pub const FIXED_PRIMARY: PrimaryTypeId = PrimaryTypeId::new(Uuid::from_u128(0xf1));
pub const PRIMARY: PrimaryTypeId = PrimaryTypeId::new(Uuid::from_u128(0xf2));
pub const NON_PRIMARY: PrimaryTypeId = PrimaryTypeId::new(Uuid::from_u128(0xf3));

pub const fn person_id(n: u128) -> PersonId {
    PersonId::new(Uuid::from_u128(0x1000 + n))
}

pub const fn engagement_id(n: u128) -> EngagementId {
    EngagementId::new(Uuid::from_u128(n))
}

pub fn create_test_classes() -> Vec<PrimaryClass> {
    vec![
        PrimaryClass::new(FIXED_PRIMARY, "explicitly-primary"),
        PrimaryClass::new(PRIMARY, "primary"),
        PrimaryClass::new(NON_PRIMARY, "non-primary"),
    ]
}

pub fn create_test_catalog() -> PrimaryTypeCatalog {
    PrimaryTypeCatalog::new(FIXED_PRIMARY, PRIMARY, NON_PRIMARY, std::iter::empty()).unwrap()
}

pub fn create_test_engagement(n: u128, primary_type: Option<PrimaryTypeId>) -> Engagement {
    let engagement: Engagement = Engagement::new(
        engagement_id(n),
        Validity::new(date!(2024 - 01 - 01), Some(date!(2024 - 05 - 31))),
    );
    match primary_type {
        Some(primary_type) => engagement.with_primary_type(primary_type),
        None => engagement,
    }
}

/// Picks the preferred engagement when it is a candidate, otherwise abstains.
#[derive(Debug, Clone, Copy)]
pub struct PreferPolicy(pub EngagementId);

impl TieBreakPolicy for PreferPolicy {
    fn name(&self) -> &'static str {
        "prefer"
    }

    fn pick_primary(&self, candidates: &[Engagement]) -> Result<Option<EngagementId>, DomainError> {
        Ok(candidates
            .iter()
            .find(|engagement| engagement.id == self.0)
            .map(|engagement| engagement.id))
    }
}

/// Leaves one engagement out of recalculation and picks the first remaining
/// candidate.
#[derive(Debug, Clone, Copy)]
pub struct ExcludingPolicy {
    pub excluded: EngagementId,
}

impl TieBreakPolicy for ExcludingPolicy {
    fn name(&self) -> &'static str {
        "excluding"
    }

    fn pick_primary(&self, candidates: &[Engagement]) -> Result<Option<EngagementId>, DomainError> {
        Ok(candidates.first().map(|engagement| engagement.id))
    }

    fn include_in_recalculation(&self, engagement: &Engagement, _include_past: bool) -> bool {
        engagement.id != self.excluded
    }
}

/// A person as served by the fake registry: cut dates and the engagements
/// active at each cut date.
#[derive(Debug, Clone, Default)]
pub struct FakePerson {
    pub cut_dates: Vec<Date>,
    pub engagements: BTreeMap<Date, Vec<Engagement>>,
}

/// Registry double that applies edits to its per-date engagement lists.
#[derive(Debug, Clone)]
pub struct FakeRegistry {
    pub classes: Vec<PrimaryClass>,
    pub persons: BTreeMap<PersonId, FakePerson>,
    pub dispatched: Vec<EditCommand>,
    pub rejected_engagement: Option<EngagementId>,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self {
            classes: create_test_classes(),
            persons: BTreeMap::new(),
            dispatched: Vec::new(),
            rejected_engagement: None,
        }
    }

    /// Adds a person whose engagements are the same at every cut date but the last.
    pub fn with_person(
        mut self,
        person: PersonId,
        cut_dates: Vec<Date>,
        engagements: &[Engagement],
    ) -> Self {
        let mut fake: FakePerson = FakePerson {
            cut_dates: cut_dates.clone(),
            engagements: BTreeMap::new(),
        };
        if let Some((_, starts)) = cut_dates.split_last() {
            for start in starts {
                fake.engagements.insert(*start, engagements.to_vec());
            }
        }
        self.persons.insert(person, fake);
        self
    }

    pub fn person(&self, person: PersonId) -> Result<&FakePerson, RegistryError> {
        self.persons
            .get(&person)
            .ok_or(RegistryError::PersonNotFound(person))
    }
}

impl Default for FakeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry for FakeRegistry {
    fn list_all_person_ids(&self) -> Result<Vec<PersonId>, RegistryError> {
        Ok(self.persons.keys().copied().collect())
    }

    fn fetch_primary_classes(&self) -> Result<Vec<PrimaryClass>, RegistryError> {
        Ok(self.classes.clone())
    }

    fn fetch_cut_dates(
        &self,
        person: PersonId,
        _include_past: bool,
    ) -> Result<Vec<Date>, RegistryError> {
        Ok(self.person(person)?.cut_dates.clone())
    }

    fn fetch_engagements(
        &self,
        person: PersonId,
        at: Date,
    ) -> Result<Vec<Engagement>, RegistryError> {
        Ok(self
            .person(person)?
            .engagements
            .get(&at)
            .cloned()
            .unwrap_or_default())
    }

    fn dispatch_edit(&mut self, command: &EditCommand) -> Result<DispatchOutcome, RegistryError> {
        if self.rejected_engagement == Some(command.engagement_id) {
            return Err(RegistryError::Rejected(String::from("locked")));
        }
        self.dispatched.push(*command);

        let mut changed: bool = false;
        for person in self.persons.values_mut() {
            for (date, engagements) in &mut person.engagements {
                if !command.validity.contains(*date) {
                    continue;
                }
                for engagement in engagements.iter_mut() {
                    if engagement.id == command.engagement_id
                        && engagement.primary_type != Some(command.new_primary_type)
                    {
                        engagement.primary_type = Some(command.new_primary_type);
                        changed = true;
                    }
                }
            }
        }

        if changed {
            Ok(DispatchOutcome::Applied)
        } else {
            Ok(DispatchOutcome::NoChangeNeeded)
        }
    }
}

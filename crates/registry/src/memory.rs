// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::SnapshotError;
use crate::snapshot::{EngagementRecord, PersonRecord, RegistrySnapshot, SegmentRecord};
use crate::timeline::{apply_primary_edit, cut_dates, cut_dates_from};
use calc_primary::{DispatchOutcome, EditCommand, Registry, RegistryError};
use calc_primary_domain::{Engagement, PersonId, PrimaryClass, Validity};
use std::path::Path;
use time::Date;
use tracing::{debug, info};

/// A registry held entirely in memory, loaded from and saved to a snapshot.
///
/// `today` is fixed at construction so that runs are reproducible.
#[derive(Debug, Clone)]
pub struct InMemoryRegistry {
    snapshot: RegistrySnapshot,
    today: Date,
}

impl InMemoryRegistry {
    /// Creates a registry over a snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot is invalid.
    pub fn new(snapshot: RegistrySnapshot, today: Date) -> Result<Self, SnapshotError> {
        snapshot.validate()?;
        Ok(Self { snapshot, today })
    }

    /// Loads a registry from a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid snapshot.
    pub fn from_file(path: &Path, today: Date) -> Result<Self, SnapshotError> {
        let snapshot: RegistrySnapshot = RegistrySnapshot::load(path)?;
        info!(
            path = %path.display(),
            persons = snapshot.persons.len(),
            classes = snapshot.primary_classes.len(),
            "Registry snapshot loaded"
        );
        Ok(Self { snapshot, today })
    }

    /// Writes the current registry contents to a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    pub fn save_to_file(&self, path: &Path) -> Result<(), SnapshotError> {
        self.snapshot.save(path)?;
        info!(path = %path.display(), "Registry snapshot saved");
        Ok(())
    }

    #[must_use]
    pub const fn snapshot(&self) -> &RegistrySnapshot {
        &self.snapshot
    }

    #[must_use]
    pub const fn today(&self) -> Date {
        self.today
    }

    fn person(&self, id: PersonId) -> Result<&PersonRecord, RegistryError> {
        self.snapshot
            .persons
            .iter()
            .find(|person: &&PersonRecord| person.id == id)
            .ok_or(RegistryError::PersonNotFound(id))
    }
}

fn to_engagement(record: &EngagementRecord, segment: &SegmentRecord) -> Engagement {
    let validity: Validity = record.span().unwrap_or_else(|| segment.validity());
    Engagement {
        id: record.id,
        user_key: record.user_key.clone(),
        engagement_type: record.engagement_type,
        fraction: record.fraction,
        primary_type: segment.primary_type,
        validity,
    }
}

impl Registry for InMemoryRegistry {
    fn list_all_person_ids(&self) -> Result<Vec<PersonId>, RegistryError> {
        Ok(self
            .snapshot
            .persons
            .iter()
            .map(|person: &PersonRecord| person.id)
            .collect())
    }

    fn fetch_primary_classes(&self) -> Result<Vec<PrimaryClass>, RegistryError> {
        Ok(self.snapshot.primary_classes.clone())
    }

    fn fetch_cut_dates(
        &self,
        person: PersonId,
        include_past: bool,
    ) -> Result<Vec<Date>, RegistryError> {
        let dates: Vec<Date> = cut_dates(self.person(person)?);
        if include_past {
            Ok(dates)
        } else {
            Ok(cut_dates_from(dates, self.today))
        }
    }

    fn fetch_engagements(
        &self,
        person: PersonId,
        at: Date,
    ) -> Result<Vec<Engagement>, RegistryError> {
        let record: &PersonRecord = self.person(person)?;
        let engagements: Vec<Engagement> = record
            .engagements
            .iter()
            .filter_map(|engagement: &EngagementRecord| {
                engagement
                    .segment_at(at)
                    .map(|segment: &SegmentRecord| to_engagement(engagement, segment))
            })
            .collect();
        debug!(%person, %at, count = engagements.len(), "Fetched engagements");
        Ok(engagements)
    }

    fn dispatch_edit(&mut self, command: &EditCommand) -> Result<DispatchOutcome, RegistryError> {
        let engagement: &mut EngagementRecord = self
            .snapshot
            .persons
            .iter_mut()
            .flat_map(|person: &mut PersonRecord| person.engagements.iter_mut())
            .find(|engagement: &&mut EngagementRecord| engagement.id == command.engagement_id)
            .ok_or(RegistryError::EngagementNotFound(command.engagement_id))?;

        let outcome: DispatchOutcome =
            apply_primary_edit(engagement, command.validity, command.new_primary_type)?;
        debug!(%command, ?outcome, segments = engagement.segments.len(), "Edit dispatched");
        Ok(outcome)
    }
}

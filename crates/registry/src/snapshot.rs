// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::SnapshotError;
use calc_primary_domain::{
    EngagementId, EngagementTypeId, OPEN_ENDED, PersonId, PrimaryClass, PrimaryTypeId, Validity,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use time::Date;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// A stretch of an engagement over which its primary type is constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentRecord {
    #[serde(with = "iso_date")]
    pub from: Date,
    /// Last day of the segment (inclusive), `None` when open-ended.
    #[serde(with = "iso_date::option", default)]
    pub to: Option<Date>,
    #[serde(default)]
    pub primary_type: Option<PrimaryTypeId>,
}

impl SegmentRecord {
    #[must_use]
    pub const fn new(from: Date, to: Option<Date>, primary_type: Option<PrimaryTypeId>) -> Self {
        Self {
            from,
            to,
            primary_type,
        }
    }

    #[must_use]
    pub const fn validity(&self) -> Validity {
        Validity::new(self.from, self.to)
    }
}

/// An engagement with its segmented history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementRecord {
    pub id: EngagementId,
    #[serde(default)]
    pub user_key: Option<String>,
    #[serde(default)]
    pub engagement_type: Option<EngagementTypeId>,
    #[serde(default)]
    pub fraction: Option<u32>,
    pub segments: Vec<SegmentRecord>,
}

impl EngagementRecord {
    /// The segment active at `date`, if any.
    #[must_use]
    pub fn segment_at(&self, date: Date) -> Option<&SegmentRecord> {
        self.segments
            .iter()
            .find(|segment: &&SegmentRecord| segment.validity().contains(date))
    }

    /// The overall span of the engagement, from its first to its last segment.
    #[must_use]
    pub fn span(&self) -> Option<Validity> {
        let first: &SegmentRecord = self.segments.first()?;
        let last: &SegmentRecord = self.segments.last()?;
        Some(Validity::new(first.from, last.to))
    }

    fn validate(&self) -> Result<(), SnapshotError> {
        if self.segments.is_empty() {
            return Err(SnapshotError::InvalidSnapshot(format!(
                "engagement {} has no segments",
                self.id
            )));
        }

        for segment in &self.segments {
            if segment.to.is_some_and(|to: Date| to < segment.from) {
                return Err(SnapshotError::InvalidSnapshot(format!(
                    "engagement {} has a segment ending before it starts ({})",
                    self.id,
                    segment.validity()
                )));
            }
            // A finite end whose next day reaches the sentinel would read as open-ended.
            let reaches_sentinel: bool = segment.to.is_some_and(|to: Date| {
                to.next_day().is_none_or(|next: Date| next >= OPEN_ENDED)
            });
            if reaches_sentinel {
                return Err(SnapshotError::InvalidSnapshot(format!(
                    "engagement {} has a finite segment end at or past {} ({}); use null for open-ended",
                    self.id,
                    OPEN_ENDED.previous_day().unwrap_or(OPEN_ENDED),
                    segment.validity()
                )));
            }
        }

        for pair in self.segments.windows(2) {
            let (current, next): (&SegmentRecord, &SegmentRecord) = (&pair[0], &pair[1]);
            let ordered: bool = current.to.is_some_and(|to: Date| to < next.from);
            if !ordered {
                return Err(SnapshotError::InvalidSnapshot(format!(
                    "engagement {} has overlapping or unordered segments ({} and {})",
                    self.id,
                    current.validity(),
                    next.validity()
                )));
            }
        }
        Ok(())
    }
}

/// A person and their engagements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub id: PersonId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub engagements: Vec<EngagementRecord>,
}

/// The complete registry contents as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    #[serde(default)]
    pub primary_classes: Vec<PrimaryClass>,
    #[serde(default)]
    pub persons: Vec<PersonRecord>,
}

impl RegistrySnapshot {
    /// Parses and validates a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the snapshot is invalid.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Serializes the snapshot as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Loads and validates a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid snapshot.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let json: String = std::fs::read_to_string(path).map_err(|err| SnapshotError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        Self::from_json(&json)
    }

    /// Writes the snapshot to a file, replacing its contents.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let json: String = self.to_json()?;
        std::fs::write(path, json).map_err(|err| SnapshotError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        })
    }

    /// Checks that identifiers are unique and every engagement has ordered,
    /// non-overlapping segments.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let mut persons: BTreeSet<PersonId> = BTreeSet::new();
        let mut engagements: BTreeSet<EngagementId> = BTreeSet::new();

        for person in &self.persons {
            if !persons.insert(person.id) {
                return Err(SnapshotError::InvalidSnapshot(format!(
                    "duplicate person {}",
                    person.id
                )));
            }
            for engagement in &person.engagements {
                if !engagements.insert(engagement.id) {
                    return Err(SnapshotError::InvalidSnapshot(format!(
                        "duplicate engagement {}",
                        engagement.id
                    )));
                }
                engagement.validate()?;
            }
        }
        Ok(())
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::args::{Args, Integration};
use calc_primary_domain::{
    EarliestStartPolicy, EngagementTypeId, EngagementTypeOrderPolicy, OccupationRatePolicy,
    PersonId, TieBreakPolicy,
};
use std::collections::BTreeSet;
use std::path::PathBuf;
use thiserror::Error;
use time::Date;
use tracing::warn;

/// Errors found while validating the command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("--eng-types-primary-order is required for the engagement-type-order integration")]
    MissingEngagementTypeOrder,

    #[error("Engagement type {0} appears more than once in --eng-types-primary-order")]
    DuplicateEngagementType(EngagementTypeId),

    #[error("No operation given")]
    MissingOperation,
}

/// What to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CheckAll,
    CheckUser(PersonId),
    /// Bulk recalculation starts at today unless told otherwise.
    RecalculateAll {
        include_past: bool,
    },
    RecalculateUser {
        person: PersonId,
        include_past: bool,
    },
}

impl Operation {
    #[must_use]
    pub const fn is_recalculation(&self) -> bool {
        matches!(
            self,
            Self::RecalculateAll { .. } | Self::RecalculateUser { .. }
        )
    }
}

/// Validated run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub integration: Integration,
    pub eng_types_primary_order: Vec<EngagementTypeId>,
    pub dry_run: bool,
    pub registry: PathBuf,
    pub today: Date,
    pub operation: Operation,
}

impl Settings {
    /// Validates parsed arguments.
    ///
    /// `today` is used unless the arguments override it.
    ///
    /// # Errors
    ///
    /// Returns an error if the engagement type order is missing or repeats a
    /// type, or no operation was selected.
    pub fn from_args(args: &Args, today: Date) -> Result<Self, SettingsError> {
        let order: Vec<EngagementTypeId> = args
            .eng_types_primary_order
            .iter()
            .copied()
            .map(EngagementTypeId::from)
            .collect();

        let mut seen: BTreeSet<EngagementTypeId> = BTreeSet::new();
        if let Some(duplicate) = order.iter().find(|id| !seen.insert(**id)) {
            return Err(SettingsError::DuplicateEngagementType(*duplicate));
        }

        match args.integration {
            Integration::EngagementTypeOrder if order.is_empty() => {
                return Err(SettingsError::MissingEngagementTypeOrder);
            }
            Integration::OccupationRate | Integration::EarliestStart if !order.is_empty() => {
                warn!(
                    integration = ?args.integration,
                    "Ignoring --eng-types-primary-order for this integration"
                );
            }
            _ => {}
        }

        let operation: Operation = if args.check_all {
            Operation::CheckAll
        } else if let Some(person) = args.check_user {
            Operation::CheckUser(PersonId::from(person))
        } else if args.recalculate_all {
            Operation::RecalculateAll {
                include_past: args.include_past,
            }
        } else if let Some(person) = args.recalculate_user {
            Operation::RecalculateUser {
                person: PersonId::from(person),
                include_past: !args.no_past,
            }
        } else {
            return Err(SettingsError::MissingOperation);
        };

        Ok(Self {
            integration: args.integration,
            eng_types_primary_order: order,
            dry_run: args.dry_run,
            registry: args.registry.clone(),
            today: args.today.unwrap_or(today),
            operation,
        })
    }

    /// Builds the tie-break policy for the configured integration.
    #[must_use]
    pub fn policy(&self) -> Box<dyn TieBreakPolicy> {
        match self.integration {
            Integration::OccupationRate => Box::new(OccupationRatePolicy),
            Integration::EarliestStart => Box::new(EarliestStartPolicy),
            Integration::EngagementTypeOrder => Box::new(EngagementTypeOrderPolicy::new(
                self.eng_types_primary_order.clone(),
            )),
        }
    }
}

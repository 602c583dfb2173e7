// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::check::count_primary_engagements;
use crate::command::{DispatchOutcome, EditCommand};
use crate::error::CoreError;
use crate::reconcile::reconcile;
use crate::registry::Registry;
use crate::state::{BatchSummary, CheckSummary, RecalculationResult};
use calc_primary_audit::{Finding, PrimaryCounts, audit};
use calc_primary_domain::{
    Decision, Engagement, Interval, IntervalSnapshot, PersonId, PrimaryClass, PrimaryTypeCatalog,
    TieBreakPolicy, decide_primary, normalize_engagements, resolve,
};
use std::collections::BTreeMap;
use time::Date;
use tracing::{debug, info, warn};

/// Fetches the engagements active at `at`, drops those the policy excludes
/// from recalculation and gives every remaining engagement without a primary
/// type the `non_primary` type.
///
/// # Errors
///
/// Returns an error if the registry fails.
pub fn fetch_and_enrich<R: Registry + ?Sized>(
    registry: &R,
    policy: &dyn TieBreakPolicy,
    catalog: &PrimaryTypeCatalog,
    person: PersonId,
    at: Date,
    include_past: bool,
) -> Result<Vec<Engagement>, CoreError> {
    let engagements: Vec<Engagement> = registry
        .fetch_engagements(person, at)?
        .into_iter()
        .filter(|engagement| policy.include_in_recalculation(engagement, include_past))
        .collect();
    Ok(normalize_engagements(engagements, catalog))
}

/// Checks and recalculates primary engagements against a registry.
///
/// The catalog is built once, at construction, by the policy.
#[derive(Debug)]
pub struct PrimaryEngagementUpdater<R: Registry> {
    registry: R,
    policy: Box<dyn TieBreakPolicy>,
    catalog: PrimaryTypeCatalog,
    dry_run: bool,
}

impl<R: Registry> PrimaryEngagementUpdater<R> {
    /// Creates an updater, reading the primary classes from the registry.
    ///
    /// # Arguments
    ///
    /// * `registry` - The registry to read from and write to
    /// * `policy` - The integration's tie-break policy
    /// * `dry_run` - Compute and count edits without dispatching them
    ///
    /// # Errors
    ///
    /// Returns an error if the classes cannot be read or the policy cannot
    /// build a catalog from them.
    pub fn new(
        registry: R,
        policy: Box<dyn TieBreakPolicy>,
        dry_run: bool,
    ) -> Result<Self, CoreError> {
        let classes: Vec<PrimaryClass> = registry.fetch_primary_classes()?;
        let catalog: PrimaryTypeCatalog = policy.classify_types(&classes)?;
        info!(
            policy = policy.name(),
            fixed_primary = %catalog.fixed_primary(),
            primary = %catalog.primary(),
            non_primary = %catalog.non_primary(),
            dry_run,
            "Primary type catalog loaded"
        );

        Ok(Self {
            registry,
            policy,
            catalog,
            dry_run,
        })
    }

    #[must_use]
    pub const fn catalog(&self) -> &PrimaryTypeCatalog {
        &self.catalog
    }

    #[must_use]
    pub const fn registry(&self) -> &R {
        &self.registry
    }

    /// Consumes the updater, handing back the registry.
    #[must_use]
    pub fn into_registry(self) -> R {
        self.registry
    }

    /// Counts primaries at every cut date of a person except the terminal one.
    fn count_person(&self, person: PersonId) -> Result<BTreeMap<Date, PrimaryCounts>, CoreError> {
        let cut_dates: Vec<Date> = self.registry.fetch_cut_dates(person, true)?;
        let intervals: Vec<Interval> = resolve(&cut_dates)?;

        let mut results: BTreeMap<Date, PrimaryCounts> = BTreeMap::new();
        for interval in intervals {
            let engagements: Vec<Engagement> =
                self.registry.fetch_engagements(person, interval.start())?;
            let counts: PrimaryCounts =
                count_primary_engagements(self.policy.as_ref(), &self.catalog, &engagements);
            debug!(%person, date = %interval.start(), ?counts, "Counted primaries");
            results.insert(interval.start(), counts);
        }
        Ok(results)
    }

    /// Checks a person's primary engagements without editing anything.
    ///
    /// All registry reads happen before this returns; classification of the
    /// counts is lazy and in date order.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry fails or the cut dates are malformed.
    pub fn check_person(
        &self,
        person: PersonId,
    ) -> Result<impl Iterator<Item = Finding> + use<R>, CoreError> {
        info!(%person, "Checking primary engagements");
        let results: BTreeMap<Date, PrimaryCounts> = self.count_person(person)?;
        Ok(audit(person, results))
    }

    /// Recalculates a person's primary engagements over their timeline.
    ///
    /// Intervals are processed in chronological order. Each edit stands
    /// alone: a failing dispatch stops the person but leaves earlier edits
    /// in place.
    ///
    /// # Arguments
    ///
    /// * `person` - The person to recalculate
    /// * `include_past` - Also recalculate intervals before today
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The cut dates are malformed
    /// - An interval has several fixed primaries or no decidable primary
    /// - The registry fails, including a rejected edit
    pub fn recalculate_person(
        &mut self,
        person: PersonId,
        include_past: bool,
    ) -> Result<RecalculationResult, CoreError> {
        info!(%person, include_past, "Calculating primary engagement");
        let cut_dates: Vec<Date> = self.registry.fetch_cut_dates(person, include_past)?;
        let intervals: Vec<Interval> = resolve(&cut_dates)?;

        let mut edits: usize = 0;
        for interval in intervals {
            info!(%person, date = %interval.start(), "Recalculating primary");

            let engagements: Vec<Engagement> = fetch_and_enrich(
                &self.registry,
                self.policy.as_ref(),
                &self.catalog,
                person,
                interval.start(),
                include_past,
            )?;
            debug!(%person, ?engagements, "Engagements");

            let snapshot: IntervalSnapshot = IntervalSnapshot {
                interval,
                engagements,
            };
            let Some(decision) = decide_primary(&snapshot, &self.catalog, self.policy.as_ref())?
            else {
                continue;
            };
            info!(
                %person,
                date = %interval.start(),
                primary = %decision.primary_id,
                kind = %decision.kind,
                "Decided primary"
            );

            edits += self.apply_decision(&snapshot, &decision)?;
        }

        info!(%person, edits, dry_run = self.dry_run, "Recalculation finished");
        Ok(RecalculationResult { person, edits })
    }

    fn apply_decision(
        &mut self,
        snapshot: &IntervalSnapshot,
        decision: &Decision,
    ) -> Result<usize, CoreError> {
        let commands: Vec<EditCommand> = reconcile(snapshot, decision, &self.catalog)?;

        for command in &commands {
            debug!(%command, "Edit payload");
            if self.dry_run {
                continue;
            }
            match self.registry.dispatch_edit(command)? {
                DispatchOutcome::Applied => info!(%command, "Edit applied"),
                DispatchOutcome::NoChangeNeeded => {
                    info!(%command, "Attempted edit, but no change needed");
                }
            }
        }
        Ok(commands.len())
    }

    /// Checks every person, handing each finding to `sink`.
    ///
    /// A person whose check fails is logged and recorded; the remaining
    /// population is still checked.
    ///
    /// # Errors
    ///
    /// Returns an error only if the population cannot be listed.
    pub fn check_all<F>(&self, mut sink: F) -> Result<CheckSummary, CoreError>
    where
        F: FnMut(&Finding),
    {
        info!("Reading all persons from the registry");
        let persons: Vec<PersonId> = self.registry.list_all_person_ids()?;
        let total: usize = persons.len();

        let mut summary: CheckSummary = CheckSummary::default();
        for (index, person) in persons.into_iter().enumerate() {
            match self.check_person(person) {
                Ok(findings) => {
                    for finding in findings {
                        sink(&finding);
                        summary.findings += 1;
                    }
                    summary.persons_checked += 1;
                }
                Err(err) => {
                    warn!(%person, error = %err, "Check failed");
                    summary.failures.push((person, err));
                }
            }
            info!(progress = %format!("{}/{total}", index + 1), "Checked person");
        }
        Ok(summary)
    }

    /// Recalculates every person.
    ///
    /// A person whose recalculation fails is logged and recorded; the
    /// remaining population is still processed.
    ///
    /// # Errors
    ///
    /// Returns an error only if the population cannot be listed.
    pub fn recalculate_all(&mut self, include_past: bool) -> Result<BatchSummary, CoreError> {
        info!("Reading all persons from the registry");
        let persons: Vec<PersonId> = self.registry.list_all_person_ids()?;
        let total: usize = persons.len();

        let mut summary: BatchSummary = BatchSummary::default();
        for (index, person) in persons.into_iter().enumerate() {
            match self.recalculate_person(person, include_past) {
                Ok(result) => {
                    summary.edits.insert(result.person, result.edits);
                }
                Err(err) => {
                    warn!(%person, error = %err, "Recalculation failed");
                    summary.failures.push((person, err));
                }
            }
            info!(progress = %format!("{}/{total}", index + 1), "Recalculated person");
        }

        info!(total_edits = summary.total_edits(), "Total edits");
        Ok(summary)
    }
}

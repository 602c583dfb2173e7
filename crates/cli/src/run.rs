// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::settings::Operation;
use calc_primary::{
    BatchSummary, CheckSummary, PrimaryEngagementUpdater, RecalculationResult, Registry,
};
use calc_primary_audit::{Finding, Severity};
use color_eyre::Result;
use std::io::Write;
use tracing::info;

/// What a run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Findings of any severity.
    pub findings: usize,
    /// Findings printed to the output.
    pub reported: usize,
    /// Edits computed (dispatched unless running dry).
    pub edits: usize,
    /// Persons whose processing failed.
    pub failures: usize,
}

/// Prints reported findings and logs informational ones.
fn emit(out: &mut impl Write, finding: &Finding, report: &mut RunReport) -> std::io::Result<()> {
    report.findings += 1;
    match finding.severity() {
        Severity::Reported => {
            writeln!(out, "{finding}")?;
            report.reported += 1;
        }
        Severity::Info => info!(%finding, "Finding"),
    }
    Ok(())
}

/// Runs one operation, writing reported findings and edit counts to `out`.
///
/// # Errors
///
/// Single-person operations return the person's error; bulk operations only
/// fail if the population cannot be listed. Write errors on `out` are
/// returned as well.
pub fn execute<R: Registry>(
    updater: &mut PrimaryEngagementUpdater<R>,
    operation: Operation,
    out: &mut impl Write,
) -> Result<RunReport> {
    let mut report: RunReport = RunReport::default();

    match operation {
        Operation::CheckUser(person) => {
            for finding in updater.check_person(person)? {
                emit(out, &finding, &mut report)?;
            }
        }
        Operation::CheckAll => {
            let mut write_error: Option<std::io::Error> = None;
            let summary: CheckSummary = updater.check_all(|finding: &Finding| {
                if write_error.is_none() {
                    write_error = emit(out, finding, &mut report).err();
                }
            })?;
            if let Some(err) = write_error {
                return Err(err.into());
            }
            report.failures = summary.failures.len();
            info!(
                persons = summary.persons_checked,
                findings = summary.findings,
                failures = report.failures,
                "Check finished"
            );
        }
        Operation::RecalculateUser {
            person,
            include_past,
        } => {
            let result: RecalculationResult = updater.recalculate_person(person, include_past)?;
            report.edits = result.edits;
            writeln!(out, "{}: {}", result.person, result.edits)?;
        }
        Operation::RecalculateAll { include_past } => {
            let summary: BatchSummary = updater.recalculate_all(include_past)?;
            report.edits = summary.total_edits();
            report.failures = summary.failures.len();
            writeln!(out, "Total edits: {}", report.edits)?;
        }
    }

    Ok(report)
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod args;
mod run;
mod settings;

#[cfg(test)]
mod tests;

use crate::args::Args;
use crate::run::{RunReport, execute};
use crate::settings::Settings;
use calc_primary::PrimaryEngagementUpdater;
use calc_primary_registry::InMemoryRegistry;
use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::Context;
use time::OffsetDateTime;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(args.log_level().into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(report) if report.failures > 0 => {
            error!(failures = report.failures, "Some persons could not be processed");
            std::process::exit(2);
        }
        Ok(_) => Ok(()),
        Err(err) => {
            error!("{err:#}");
            std::process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<RunReport> {
    let settings: Settings = Settings::from_args(args, OffsetDateTime::now_utc().date())?;
    info!(
        integration = ?settings.integration,
        dry_run = settings.dry_run,
        today = %settings.today,
        operation = ?settings.operation,
        "Starting calculate-primary"
    );

    let registry: InMemoryRegistry = InMemoryRegistry::from_file(&settings.registry, settings.today)
        .wrap_err_with(|| format!("loading registry {}", settings.registry.display()))?;
    let mut updater: PrimaryEngagementUpdater<InMemoryRegistry> =
        PrimaryEngagementUpdater::new(registry, settings.policy(), settings.dry_run)?;

    // Saved even when the run fails part way; applied edits are not rolled back.
    let outcome: Result<RunReport> =
        execute(&mut updater, settings.operation, &mut std::io::stdout());

    if settings.operation.is_recalculation() {
        if settings.dry_run {
            warn!("Dry run, registry not saved");
        } else {
            updater
                .into_registry()
                .save_to_file(&settings.registry)
                .wrap_err("saving registry")?;
        }
    }

    let report: RunReport = outcome?;
    info!(
        findings = report.findings,
        reported = report.reported,
        edits = report.edits,
        "Run finished"
    );

    Ok(report)
}

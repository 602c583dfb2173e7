// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use clap::{ArgGroup, Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use std::path::PathBuf;
use time::Date;
use time::macros::format_description;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;
use uuid::Uuid;

/// The tie-break rule used when no fixed primary exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Integration {
    /// Highest occupation rate wins, then the lowest user key
    OccupationRate,
    /// Earliest start wins, then the lowest user key
    EarliestStart,
    /// Configured engagement type order wins, then the highest occupation rate
    EngagementTypeOrder,
}

/// Calculate Primary - check and recalculate primary engagements
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("operation")
        .required(true)
        .args(["check_all", "check_user", "recalculate_all", "recalculate_user"])
))]
pub struct Args {
    /// Tie-break rule for choosing the primary engagement
    #[arg(
        long,
        env = "CALCULATE_PRIMARY_INTEGRATION",
        value_enum,
        default_value_t = Integration::OccupationRate
    )]
    pub integration: Integration,

    /// Compute and count edits without writing them
    #[arg(long, env = "CALCULATE_PRIMARY_DRY_RUN")]
    pub dry_run: bool,

    /// Engagement type UUIDs in order of precedence, comma separated
    #[arg(
        long,
        env = "CALCULATE_PRIMARY_ENG_TYPES_PRIMARY_ORDER",
        value_delimiter = ','
    )]
    pub eng_types_primary_order: Vec<Uuid>,

    /// Path to the registry snapshot (JSON)
    #[arg(long, env = "CALCULATE_PRIMARY_REGISTRY")]
    pub registry: PathBuf,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, value_parser = parse_date)]
    pub today: Option<Date>,

    /// Check all persons
    #[arg(long)]
    pub check_all: bool,

    /// Check one person
    #[arg(long, value_name = "UUID")]
    pub check_user: Option<Uuid>,

    /// Recalculate all persons, from today onwards unless --include-past is given
    #[arg(long)]
    pub recalculate_all: bool,

    /// Recalculate one person
    #[arg(long, value_name = "UUID")]
    pub recalculate_user: Option<Uuid>,

    /// Only recalculate from today onwards
    #[arg(long)]
    pub no_past: bool,

    /// Also recalculate the past when recalculating all persons
    #[arg(long, requires = "recalculate_all", conflicts_with = "no_past")]
    pub include_past: bool,

    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

fn parse_date(value: &str) -> Result<Date, String> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map_err(|err| format!("expected YYYY-MM-DD: {err}"))
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::args::Args;
use calc_primary_domain::{EngagementId, PersonId, PrimaryClass, PrimaryTypeId};
use calc_primary_registry::{
    EngagementRecord, InMemoryRegistry, PersonRecord, RegistrySnapshot, SegmentRecord,
};
use clap::Parser;
use std::path::PathBuf;
use time::Date;
use time::macros::date;
use uuid::Uuid;

pub const FIXED_PRIMARY: PrimaryTypeId = PrimaryTypeId::new(Uuid::from_u128(0xf1));
pub const PRIMARY: PrimaryTypeId = PrimaryTypeId::new(Uuid::from_u128(0xf2));
pub const NON_PRIMARY: PrimaryTypeId = PrimaryTypeId::new(Uuid::from_u128(0xf3));

pub const fn person_id(n: u128) -> PersonId {
    PersonId::new(Uuid::from_u128(0x1000 + n))
}

pub fn parse_args(extra: &[&str]) -> Args {
    parse_args_with_registry("registry.json", extra)
}

pub fn parse_args_with_registry(registry: &str, extra: &[&str]) -> Args {
    let mut argv: Vec<&str> = vec!["calculate-primary", "--registry", registry];
    argv.extend_from_slice(extra);
    Args::try_parse_from(argv).unwrap()
}

pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "calculate-primary-{}-{name}.json",
        std::process::id()
    ))
}

fn engagement(n: u128, fraction: u32, from: Date, primary_type: PrimaryTypeId) -> EngagementRecord {
    EngagementRecord {
        id: EngagementId::new(Uuid::from_u128(n)),
        user_key: Some(format!("{n:05}")),
        engagement_type: None,
        fraction: Some(fraction),
        segments: vec![SegmentRecord::new(from, None, Some(primary_type))],
    }
}

/// Person 1 has two primaries from March; person 2 has no primary at all.
pub fn create_test_registry() -> InMemoryRegistry {
    let snapshot: RegistrySnapshot = RegistrySnapshot {
        primary_classes: vec![
            PrimaryClass::new(FIXED_PRIMARY, "explicitly-primary"),
            PrimaryClass::new(PRIMARY, "primary"),
            PrimaryClass::new(NON_PRIMARY, "non-primary"),
        ],
        persons: vec![
            PersonRecord {
                id: person_id(1),
                name: "Jane Doe".to_string(),
                engagements: vec![
                    engagement(1, 500, date!(2024 - 01 - 01), PRIMARY),
                    engagement(2, 1000, date!(2024 - 03 - 01), PRIMARY),
                ],
            },
            PersonRecord {
                id: person_id(2),
                name: "John Doe".to_string(),
                engagements: vec![engagement(3, 1000, date!(2024 - 01 - 01), NON_PRIMARY)],
            },
        ],
    };
    InMemoryRegistry::new(snapshot, date!(2024 - 01 - 01)).unwrap()
}

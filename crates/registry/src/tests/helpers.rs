// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{EngagementRecord, InMemoryRegistry, PersonRecord, RegistrySnapshot, SegmentRecord};
use calc_primary_domain::{EngagementId, PersonId, PrimaryClass, PrimaryTypeId};
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

pub const fn segment(from: Date, to: Option<Date>, primary_type: PrimaryTypeId) -> SegmentRecord {
    SegmentRecord::new(from, to, Some(primary_type))
}

pub fn create_test_engagement(
    n: u128,
    fraction: u32,
    segments: Vec<SegmentRecord>,
) -> EngagementRecord {
    EngagementRecord {
        id: engagement_id(n),
        user_key: Some(format!("{:05}", n * 100)),
        engagement_type: None,
        fraction: Some(fraction),
        segments,
    }
}

pub fn create_test_person(n: u128, engagements: Vec<EngagementRecord>) -> PersonRecord {
    PersonRecord {
        id: person_id(n),
        name: format!("Person {n}"),
        engagements,
    }
}

/// One person with a half-time open-ended primary engagement and a
/// full-time non-primary engagement from March to August 2024.
pub fn create_test_snapshot() -> RegistrySnapshot {
    RegistrySnapshot {
        primary_classes: create_test_classes(),
        persons: vec![create_test_person(
            1,
            vec![
                create_test_engagement(
                    1,
                    500,
                    vec![segment(date!(2024 - 01 - 01), None, PRIMARY)],
                ),
                create_test_engagement(
                    2,
                    1000,
                    vec![segment(
                        date!(2024 - 03 - 01),
                        Some(date!(2024 - 08 - 31)),
                        NON_PRIMARY,
                    )],
                ),
            ],
        )],
    }
}

pub fn create_test_registry(today: Date) -> InMemoryRegistry {
    InMemoryRegistry::new(create_test_snapshot(), today).unwrap()
}

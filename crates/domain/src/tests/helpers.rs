// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Engagement, EngagementId, EngagementTypeId, Interval, IntervalSnapshot, PrimaryClass,
    PrimaryTypeCatalog, PrimaryTypeId, Validity,
};
use time::macros::date;
use uuid::Uuid;

pub const FIXED_PRIMARY: PrimaryTypeId = PrimaryTypeId::new(Uuid::from_u128(0xf1));
pub const PRIMARY: PrimaryTypeId = PrimaryTypeId::new(Uuid::from_u128(0xf2));
pub const NON_PRIMARY: PrimaryTypeId = PrimaryTypeId::new(Uuid::from_u128(0xf3));

pub const fn engagement_id(n: u128) -> EngagementId {
    EngagementId::new(Uuid::from_u128(n))
}

pub const fn engagement_type(n: u128) -> EngagementTypeId {
    EngagementTypeId::new(Uuid::from_u128(0xe000 + n))
}

pub fn create_test_catalog() -> PrimaryTypeCatalog {
    PrimaryTypeCatalog::new(FIXED_PRIMARY, PRIMARY, NON_PRIMARY, std::iter::empty()).unwrap()
}

pub fn create_test_classes() -> Vec<PrimaryClass> {
    vec![
        PrimaryClass::new(FIXED_PRIMARY, "explicitly-primary"),
        PrimaryClass::new(PRIMARY, "primary"),
        PrimaryClass::new(NON_PRIMARY, "non-primary"),
    ]
}

/// An open-ended engagement starting 2020-01-01.
pub fn create_test_engagement(n: u128) -> Engagement {
    Engagement::new(
        engagement_id(n),
        Validity::new(date!(2020 - 01 - 01), None),
    )
}

pub fn create_test_snapshot(engagements: Vec<Engagement>) -> IntervalSnapshot {
    IntervalSnapshot {
        interval: Interval::new(date!(2024 - 01 - 01), date!(2024 - 06 - 01)),
        engagements,
    }
}

/// A policy that always returns the same answer and counts its invocations.
#[derive(Debug, Default)]
pub struct FixedChoicePolicy {
    pub choice: Option<EngagementId>,
    pub calls: std::cell::Cell<usize>,
}

impl FixedChoicePolicy {
    pub fn choosing(choice: Option<EngagementId>) -> Self {
        Self {
            choice,
            calls: std::cell::Cell::new(0),
        }
    }
}

impl crate::TieBreakPolicy for FixedChoicePolicy {
    fn name(&self) -> &'static str {
        "fixed-choice"
    }

    fn pick_primary(
        &self,
        _candidates: &[Engagement],
    ) -> Result<Option<EngagementId>, crate::DomainError> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.choice)
    }
}

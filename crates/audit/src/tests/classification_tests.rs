// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Finding, FindingKind, PrimaryCounts, Severity, audit, classify};
use calc_primary_domain::PersonId;
use std::collections::BTreeMap;
use time::Date;
use time::macros::date;
use uuid::Uuid;

fn person() -> PersonId {
    PersonId::new(Uuid::from_u128(42))
}

#[test]
fn test_no_engagements_yield_nothing() {
    assert_eq!(classify(PrimaryCounts::new(0, 0, 0)), None);
    assert_eq!(classify(PrimaryCounts::new(0, 3, 3)), None);
}

#[test]
fn test_single_primary_is_healthy() {
    assert_eq!(classify(PrimaryCounts::new(2, 1, 0)), None);
    assert_eq!(classify(PrimaryCounts::new(2, 1, 1)), None);
}

#[test]
fn test_no_primary_is_reported() {
    let kind: Option<FindingKind> = classify(PrimaryCounts::new(1, 0, 0));

    assert_eq!(kind, Some(FindingKind::NoPrimary));
    assert_eq!(FindingKind::NoPrimary.severity(), Severity::Reported);
}

#[test]
fn test_too_many_primaries_is_reported() {
    let kind: Option<FindingKind> = classify(PrimaryCounts::new(3, 2, 2));

    assert_eq!(kind, Some(FindingKind::TooManyPrimaries));
    assert_eq!(FindingKind::TooManyPrimaries.severity(), Severity::Reported);
}

#[test]
fn test_special_primaries_are_informational() {
    assert_eq!(
        classify(PrimaryCounts::new(2, 2, 0)),
        Some(FindingKind::AllPrimariesSpecial)
    );
    assert_eq!(
        classify(PrimaryCounts::new(5, 4, 1)),
        Some(FindingKind::OnlyOneNonSpecialPrimary)
    );
    assert_eq!(FindingKind::AllPrimariesSpecial.severity(), Severity::Info);
    assert_eq!(
        FindingKind::OnlyOneNonSpecialPrimary.severity(),
        Severity::Info
    );
}

#[test]
fn test_engagement_count_saturates() {
    assert_eq!(
        classify(PrimaryCounts::new(1, 0, 0)),
        classify(PrimaryCounts::new(7, 0, 0))
    );
    assert_eq!(
        classify(PrimaryCounts::new(1, 9, 9)),
        Some(FindingKind::TooManyPrimaries)
    );
}

#[test]
fn test_audit_yields_findings_in_date_order() {
    let mut results: BTreeMap<Date, PrimaryCounts> = BTreeMap::new();
    results.insert(date!(2024 - 06 - 01), PrimaryCounts::new(1, 0, 0));
    results.insert(date!(2024 - 01 - 01), PrimaryCounts::new(3, 2, 2));
    results.insert(date!(2024 - 03 - 01), PrimaryCounts::new(2, 1, 1));

    let findings: Vec<Finding> = audit(person(), results).collect();

    assert_eq!(findings.len(), 2);
    assert_eq!(findings[0].date, date!(2024 - 01 - 01));
    assert_eq!(findings[0].kind, FindingKind::TooManyPrimaries);
    assert_eq!(findings[1].date, date!(2024 - 06 - 01));
    assert_eq!(findings[1].kind, FindingKind::NoPrimary);
}

#[test]
fn test_finding_display() {
    let finding: Finding = Finding {
        person: person(),
        date: date!(2024 - 01 - 01),
        kind: FindingKind::TooManyPrimaries,
    };

    assert_eq!(
        finding.to_string(),
        "Too many primaries for 00000000-0000-0000-0000-00000000002a at 2024-01-01"
    );
    assert_eq!(finding.severity(), Severity::Reported);
}

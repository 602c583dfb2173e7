// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cut-date derivation and segment editing.

use crate::snapshot::{EngagementRecord, PersonRecord, SegmentRecord};
use calc_primary::{DispatchOutcome, RegistryError};
use calc_primary_domain::{OPEN_ENDED, PrimaryTypeId, Validity};
use std::collections::BTreeSet;
use time::Date;

/// The day after a segment's last day, clamped to the open-ended sentinel.
fn end_exclusive(to: Option<Date>) -> Date {
    to.and_then(Date::next_day)
        .map_or(OPEN_ENDED, |day: Date| day.min(OPEN_ENDED))
}

/// All dates at which a person's engagements may change, sorted and
/// deduplicated.
///
/// Each segment contributes its first day and the day after its last day.
/// Open-ended segments contribute the sentinel [`OPEN_ENDED`].
#[must_use]
pub fn cut_dates(person: &PersonRecord) -> Vec<Date> {
    let mut dates: BTreeSet<Date> = BTreeSet::new();
    for engagement in &person.engagements {
        for segment in &engagement.segments {
            dates.insert(segment.from);
            dates.insert(end_exclusive(segment.to));
        }
    }
    dates.into_iter().collect()
}

/// Drops cut dates before `today`.
///
/// When anything was dropped the sequence starts at `today`, so the interval
/// running through today is still covered.
#[must_use]
pub fn cut_dates_from(dates: Vec<Date>, today: Date) -> Vec<Date> {
    let dropped: bool = dates.first().is_some_and(|first: &Date| *first < today);
    let mut kept: Vec<Date> = dates.into_iter().filter(|date: &Date| *date >= today).collect();
    if dropped && kept.first() != Some(&today) {
        kept.insert(0, today);
    }
    kept
}

fn overlaps(a: &Validity, b: &Validity) -> bool {
    a.to.is_none_or(|to: Date| b.from <= to) && b.to.is_none_or(|to: Date| a.from <= to)
}

/// Whether the segments cover every day of `window` without gaps.
fn covers(segments: &[SegmentRecord], window: &Validity) -> bool {
    let mut cursor: Date = window.from;
    for segment in segments {
        if segment.to.is_some_and(|to: Date| to < cursor) {
            continue;
        }
        if segment.from > cursor {
            return false;
        }
        match segment.to {
            None => return true,
            Some(to) if window.to.is_some_and(|end: Date| to >= end) => return true,
            Some(to) => match to.next_day() {
                Some(next) => cursor = next,
                None => return false,
            },
        }
    }
    false
}

fn out_of_range(date: Date) -> RegistryError {
    RegistryError::Rejected(format!("date arithmetic out of range at {date}"))
}

/// Splits `segment` at the window boundaries, giving the part inside the
/// window `primary_type`.
fn split(
    segment: &SegmentRecord,
    window: &Validity,
    primary_type: PrimaryTypeId,
    out: &mut Vec<SegmentRecord>,
) -> Result<(), RegistryError> {
    if segment.from < window.from {
        let before_end: Date = window
            .from
            .previous_day()
            .ok_or_else(|| out_of_range(window.from))?;
        out.push(SegmentRecord::new(
            segment.from,
            Some(before_end),
            segment.primary_type,
        ));
    }

    let inside_from: Date = segment.from.max(window.from);
    let inside_to: Option<Date> = match (segment.to, window.to) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (Some(a), None) => Some(a),
        (None, b) => b,
    };
    out.push(SegmentRecord::new(inside_from, inside_to, Some(primary_type)));

    if let Some(window_to) = window.to {
        let runs_past: bool = segment.to.is_none_or(|to: Date| to > window_to);
        if runs_past {
            let after_from: Date = window_to
                .next_day()
                .ok_or_else(|| out_of_range(window_to))?;
            out.push(SegmentRecord::new(
                after_from,
                segment.to,
                segment.primary_type,
            ));
        }
    }
    Ok(())
}

/// Joins adjacent segments that carry the same primary type.
fn merge(segments: Vec<SegmentRecord>) -> Vec<SegmentRecord> {
    let mut merged: Vec<SegmentRecord> = Vec::with_capacity(segments.len());
    for segment in segments {
        if let Some(last) = merged.last_mut() {
            let adjacent: bool = last
                .to
                .and_then(Date::next_day)
                .is_some_and(|next: Date| next == segment.from);
            if adjacent && last.primary_type == segment.primary_type {
                last.to = segment.to;
                continue;
            }
        }
        merged.push(segment);
    }
    merged
}

/// Sets the primary type of `engagement` over `window`.
///
/// Segments touched by the window are split at its boundaries; adjacent
/// segments that end up with the same primary type are merged.
///
/// # Errors
///
/// Returns [`RegistryError::EditOutsideValidity`] if the segments do not
/// cover the whole window.
pub fn apply_primary_edit(
    engagement: &mut EngagementRecord,
    window: Validity,
    primary_type: PrimaryTypeId,
) -> Result<DispatchOutcome, RegistryError> {
    if !covers(&engagement.segments, &window) {
        return Err(RegistryError::EditOutsideValidity {
            engagement: engagement.id,
            validity: window,
        });
    }

    let unchanged: bool = engagement
        .segments
        .iter()
        .filter(|segment: &&SegmentRecord| overlaps(&segment.validity(), &window))
        .all(|segment: &SegmentRecord| segment.primary_type == Some(primary_type));
    if unchanged {
        return Ok(DispatchOutcome::NoChangeNeeded);
    }

    let mut segments: Vec<SegmentRecord> = Vec::with_capacity(engagement.segments.len() + 2);
    for segment in &engagement.segments {
        if overlaps(&segment.validity(), &window) {
            split(segment, &window, primary_type, &mut segments)?;
        } else {
            segments.push(segment.clone());
        }
    }
    engagement.segments = merge(segments);
    Ok(DispatchOutcome::Applied)
}

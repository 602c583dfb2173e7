// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::EditCommand;
use calc_primary_domain::{
    Decision, DomainError, IntervalSnapshot, PrimaryTypeCatalog, PrimaryTypeId, Validity,
};
use tracing::info;

/// Computes the edits that make an interval match its decision.
///
/// The decided engagement gets the primary type matching the decision kind;
/// every other engagement gets `non_primary`. Engagements already carrying
/// their target type produce no edit, so reconciling an already reconciled
/// interval yields nothing.
///
/// # Errors
///
/// Returns an error if the interval's validity cannot be computed.
pub fn reconcile(
    snapshot: &IntervalSnapshot,
    decision: &Decision,
    catalog: &PrimaryTypeCatalog,
) -> Result<Vec<EditCommand>, DomainError> {
    let validity: Validity = snapshot.interval.validity()?;

    let commands: Vec<EditCommand> = snapshot
        .engagements
        .iter()
        .filter_map(|engagement| {
            let target: PrimaryTypeId = if engagement.id == decision.primary_id {
                catalog.type_for(decision.kind)
            } else {
                catalog.non_primary()
            };

            if engagement.primary_type == Some(target) {
                info!(
                    engagement = %engagement.id,
                    from = %validity.from,
                    "No update as primary type is not changed"
                );
                return None;
            }

            Some(EditCommand {
                engagement_id: engagement.id,
                new_primary_type: target,
                validity,
            })
        })
        .collect();

    Ok(commands)
}

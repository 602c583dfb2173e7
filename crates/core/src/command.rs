// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use calc_primary_domain::{EngagementId, PrimaryTypeId, Validity};

/// An edit of one engagement's primary type, as data only.
///
/// Edits are idempotent: dispatching an edit whose value is already in place
/// is answered with [`DispatchOutcome::NoChangeNeeded`], not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditCommand {
    /// The engagement to edit.
    pub engagement_id: EngagementId,
    /// The primary type the engagement should carry.
    pub new_primary_type: PrimaryTypeId,
    /// The period the new primary type applies to.
    pub validity: Validity,
}

impl std::fmt::Display for EditCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "engagement {} -> primary {} ({})",
            self.engagement_id, self.new_primary_type, self.validity
        )
    }
}

/// The answer of the registry to a dispatched edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The edit changed the registry.
    Applied,
    /// The registry already carried the value.
    NoChangeNeeded,
}

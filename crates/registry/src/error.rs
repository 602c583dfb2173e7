// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors that can occur while loading or saving a registry snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// Reading or writing the snapshot file failed.
    #[error("I/O error on '{path}': {message}")]
    Io { path: String, message: String },

    /// The snapshot could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The snapshot is well-formed JSON but violates a registry invariant.
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

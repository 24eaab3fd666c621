//! Snapshot error types.

use crate::core::TableError;
use thiserror::Error;

/// Errors that can occur during snapshot encoding, decoding and restore.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Serialization to JSON or binary format failed
    #[error("serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization from JSON or binary format failed
    #[error("deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Snapshot version is not supported by this build
    #[error("unsupported snapshot version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The embedded table failed validation
    #[error("snapshot table is invalid: {0}")]
    InvalidTable(#[from] TableError),

    /// The snapshot position references a state its table does not declare
    #[error("snapshot references undeclared state '{state}'")]
    UndeclaredState { state: String },

    /// The snapshot visit history lists the same state twice
    #[error("snapshot visited history contains duplicate '{state}'")]
    DuplicateVisited { state: String },
}

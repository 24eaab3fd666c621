//! Snapshot and resume functionality for machine states.
//!
//! A [`MachineState`] is deliberately not serializable; this module
//! provides the serializable form, enabling long-lived workflows to
//! survive process restarts. The snapshot layer performs no I/O itself -
//! encoding is returned to the caller, who owns persistence.

use crate::core::{Machine, MachineState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

pub mod error;

pub use error::SnapshotError;

/// Version identifier for the snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable snapshot of a machine state.
///
/// A snapshot carries the machine alongside the position, so it is
/// self-contained. [`restore`](Snapshot::restore) re-validates everything
/// it reads: a snapshot is external input and gets no trust.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot format version
    pub version: u32,

    /// Unique snapshot identifier
    pub id: String,

    /// When the snapshot was taken
    pub taken_at: DateTime<Utc>,

    /// Current state at capture time
    pub value: String,

    /// Visited history at capture time
    pub visited: Vec<String>,

    /// The machine being walked
    pub machine: Machine,
}

impl Snapshot {
    /// Capture the current position of a machine state.
    pub fn capture(state: &MachineState) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            id: Uuid::new_v4().to_string(),
            taken_at: Utc::now(),
            value: state.value().to_string(),
            visited: state.visited().to_vec(),
            machine: state.machine().clone(),
        }
    }

    /// Rebuild a machine state from this snapshot.
    ///
    /// The embedded machine's table is validated from scratch and the
    /// recorded position is checked against the declared states.
    pub fn restore(&self) -> Result<MachineState, SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        let machine = Machine::new(&self.machine.to_raw())?;

        if !machine.contains(&self.value) {
            return Err(SnapshotError::UndeclaredState {
                state: self.value.clone(),
            });
        }
        for (index, state) in self.visited.iter().enumerate() {
            if !machine.contains(state) {
                return Err(SnapshotError::UndeclaredState {
                    state: state.clone(),
                });
            }
            if self.visited[..index].contains(state) {
                return Err(SnapshotError::DuplicateVisited {
                    state: state.clone(),
                });
            }
        }

        Ok(MachineState::resume(
            Arc::new(machine),
            self.value.clone(),
            self.visited.clone(),
        ))
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self)
            .map_err(|err| SnapshotError::SerializationFailed(err.to_string()))
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json)
            .map_err(|err| SnapshotError::DeserializationFailed(err.to_string()))
    }

    /// Encode as a compact binary blob.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self)
            .map_err(|err| SnapshotError::SerializationFailed(err.to_string()))
    }

    /// Decode from a binary blob.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(bytes)
            .map_err(|err| SnapshotError::DeserializationFailed(err.to_string()))
    }
}

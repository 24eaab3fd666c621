//! Transition table validation and the frozen [`Machine`].

use crate::core::target::{
    normalize, RawTarget, StrictTarget, TargetDescriptor, TargetError,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use thiserror::Error;
use tracing::debug;

/// Author-supplied transition table: state name to raw target, in
/// declaration order.
pub type RawTable = IndexMap<String, RawTarget>;

/// Errors raised while validating a raw transition table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("transition table declares no states")]
    EmptyTable,

    #[error("state names must not be empty")]
    EmptyStateName,

    #[error("state name '{state}' contains whitespace")]
    WhitespaceInStateName { state: String },

    #[error("invalid target for state '{state}': {source}")]
    InvalidTarget {
        state: String,
        #[source]
        source: TargetError,
    },

    #[error("state '{state}' lists target '{target}' more than once")]
    DuplicateTarget { state: String, target: String },

    #[error("state '{state}' references undeclared target '{target}'")]
    UndeclaredTarget { state: String, target: String },

    #[error("initial state '{state}' is not declared in the table")]
    UndeclaredInitialState { state: String },
}

/// A validated, normalized transition table.
///
/// A machine maps every declared state to its canonical list of
/// [`StrictTarget`]s. It is frozen at construction: every machine state
/// produced from it shares the same instance by reference, and nothing
/// ever mutates it.
///
/// Deserializing a machine does not re-validate it; the
/// validation-sensitive consumers ([`MachineState::init`] and
/// [`Snapshot::restore`]) run the inner table through [`Machine::new`]
/// again before trusting it.
///
/// [`MachineState::init`]: crate::core::MachineState::init
/// [`Snapshot::restore`]: crate::snapshot::Snapshot::restore
///
/// # Example
///
/// ```rust
/// use waypoint::core::Machine;
/// use waypoint::transition_table;
///
/// let table = transition_table! {
///     "ready" => "connecting",
///     "connecting" => ["connected", "closed"],
///     "connected" => ["closed"],
///     "closed" => "connecting",
/// };
///
/// let machine = Machine::new(&table).unwrap();
///
/// assert_eq!(machine.len(), 4);
/// assert!(machine.contains("connected"));
/// assert_eq!(machine.first_state(), Some("ready"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    states: IndexMap<String, Vec<StrictTarget>>,
}

impl Machine {
    /// Validate and normalize a raw table.
    ///
    /// Validation runs in two passes. The indexing pass checks every
    /// declared name (non-empty, no whitespace) and seeds the state index.
    /// The normalization pass collapses each raw target to its canonical
    /// form and cross-checks that every referenced state exists and that
    /// no state lists the same target twice. Any failure aborts
    /// construction entirely; there is no partially valid machine.
    pub fn new(table: &RawTable) -> Result<Self, TableError> {
        if table.is_empty() {
            return Err(TableError::EmptyTable);
        }

        let mut states: IndexMap<String, Vec<StrictTarget>> =
            IndexMap::with_capacity(table.len());
        for name in table.keys() {
            if name.is_empty() {
                return Err(TableError::EmptyStateName);
            }
            if name.chars().any(char::is_whitespace) {
                return Err(TableError::WhitespaceInStateName {
                    state: name.clone(),
                });
            }
            states.insert(name.clone(), Vec::new());
        }

        for (name, raw) in table {
            let targets = normalize(raw).map_err(|source| TableError::InvalidTarget {
                state: name.clone(),
                source,
            })?;

            let mut seen: Vec<&str> = Vec::with_capacity(targets.len());
            for target in &targets {
                let Some(target_state) = target.state() else {
                    continue;
                };
                if seen.contains(&target_state) {
                    return Err(TableError::DuplicateTarget {
                        state: name.clone(),
                        target: target_state.to_string(),
                    });
                }
                if !states.contains_key(target_state) {
                    return Err(TableError::UndeclaredTarget {
                        state: name.clone(),
                        target: target_state.to_string(),
                    });
                }
                seen.push(target_state);
            }

            states.insert(name.clone(), targets);
        }

        debug!(states = states.len(), "validated transition table");
        Ok(Self { states })
    }

    /// Number of declared states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the machine declares no states. Never true for a machine
    /// built by [`Machine::new`].
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Declared state names, in declaration order.
    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.states.keys().map(String::as_str)
    }

    /// Whether `state` is declared.
    pub fn contains(&self, state: &str) -> bool {
        self.states.contains_key(state)
    }

    /// Normalized targets of `state`, if declared.
    pub fn targets(&self, state: &str) -> Option<&[StrictTarget]> {
        self.states.get(state).map(Vec::as_slice)
    }

    /// First declared state, used as the default initial state.
    pub fn first_state(&self) -> Option<&str> {
        self.states.keys().next().map(String::as_str)
    }

    /// Whether `state` is terminal: its target list is empty or holds only
    /// the terminal marker. Undeclared states are not terminal.
    pub fn is_terminal(&self, state: &str) -> bool {
        match self.targets(state) {
            Some(targets) => targets.iter().all(StrictTarget::is_terminal),
            None => false,
        }
    }

    /// Export the canonical raw form of this machine.
    ///
    /// Terminal-only states collapse back to the bare terminal marker;
    /// every other state becomes a list of names and descriptors.
    /// Re-validating the result yields a structurally equal machine.
    pub fn to_raw(&self) -> RawTable {
        self.states
            .iter()
            .map(|(name, targets)| {
                let raw = match targets.as_slice() {
                    [StrictTarget::Terminal] => RawTarget::Terminal,
                    targets => {
                        RawTarget::List(targets.iter().map(raw_entry).collect())
                    }
                };
                (name.clone(), raw)
            })
            .collect()
    }
}

fn raw_entry(target: &StrictTarget) -> RawTarget {
    match target {
        StrictTarget::Terminal => RawTarget::Terminal,
        StrictTarget::State {
            name,
            preconditions,
        } if preconditions.is_empty() => RawTarget::Name(name.clone()),
        StrictTarget::State {
            name,
            preconditions,
        } => RawTarget::Descriptor(TargetDescriptor {
            state: name.clone(),
            preconditions: preconditions.clone(),
        }),
    }
}

/// Source of a raw transition table accepted by
/// [`MachineState::init`](crate::core::MachineState::init).
///
/// Both author-supplied raw tables and already-validated machines are
/// accepted; a machine's inner table is simply validated again.
pub trait TableSource {
    /// The raw table to validate.
    fn raw_table(&self) -> Cow<'_, RawTable>;
}

impl TableSource for RawTable {
    fn raw_table(&self) -> Cow<'_, RawTable> {
        Cow::Borrowed(self)
    }
}

impl TableSource for Machine {
    fn raw_table(&self) -> Cow<'_, RawTable> {
        Cow::Owned(self.to_raw())
    }
}

//! Immutable machine-state values and the transition operations.

use crate::core::table::{Machine, TableError, TableSource};
use crate::core::target::StrictTarget;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors raised while attempting a transition.
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("current state '{state}' is not declared in the machine")]
    UnknownCurrentState { state: String },

    #[error("target state '{state}' is not declared in the machine")]
    UndeclaredState { state: String },

    #[error(
        "cannot transition from '{from}' to '{to}', valid targets: [{}]",
        .alternatives.join(", ")
    )]
    NotReachable {
        from: String,
        to: String,
        alternatives: Vec<String>,
    },

    #[error("transition to '{to}' requires '{required}' to have been visited")]
    PreconditionNotVisited { to: String, required: String },

    #[error(
        "transition to '{to}' requires the machine to be in '{required}', \
         but it is in '{current}'"
    )]
    PreconditionWrongState {
        to: String,
        required: String,
        current: String,
    },

    #[error("not possible to move to a next state from '{state}'")]
    NoNextState { state: String },
}

/// An immutable position within a [`Machine`].
///
/// A machine state is a value: `{ current state, visited history, shared
/// machine }`. Operations never mutate it - [`to`](MachineState::to) and
/// [`next`](MachineState::next) return a new value referencing the same
/// frozen machine, so any number of machine states may coexist and be read
/// from concurrent contexts without locking. Coordinating a single
/// canonical position across racing callers is the caller's concern.
///
/// # Example
///
/// ```rust
/// use waypoint::core::MachineState;
/// use waypoint::transition_table;
///
/// let table = transition_table! {
///     "pants" => ["shoes", "socks"],
///     "socks" => ["shoes", "pants"],
///     "shoes" => "shirt",
///     "shirt" => _,
/// };
///
/// let sm = MachineState::init(&table, None).unwrap();
/// assert_eq!(sm.value(), "pants");
///
/// let sm = sm.to("shoes").unwrap();
/// assert_eq!(sm.value(), "shoes");
/// assert_eq!(sm.visited(), ["pants"]);
/// assert_eq!(sm.possible(), ["shirt"]);
///
/// let sm = sm.next().unwrap();
/// assert_eq!(sm.value(), "shirt");
/// assert!(sm.done());
/// ```
#[derive(Clone, Debug)]
pub struct MachineState {
    value: String,
    visited: Vec<String>,
    machine: Arc<Machine>,
}

impl MachineState {
    /// Validate `source` and enter the machine.
    ///
    /// The source is either a raw table or an existing [`Machine`] (whose
    /// inner table is validated again - see [`TableSource`]). The initial
    /// state is `initial` when given, otherwise the first declared state;
    /// an undeclared initial state is rejected.
    pub fn init(
        source: &impl TableSource,
        initial: Option<&str>,
    ) -> Result<Self, TableError> {
        let machine = Machine::new(source.raw_table().as_ref())?;

        let value = match initial {
            Some(state) => {
                if !machine.contains(state) {
                    return Err(TableError::UndeclaredInitialState {
                        state: state.to_string(),
                    });
                }
                state.to_string()
            }
            None => machine
                .first_state()
                .ok_or(TableError::EmptyTable)?
                .to_string(),
        };

        debug!(initial = %value, "initialized machine state");
        Ok(Self {
            value,
            visited: Vec::new(),
            machine: Arc::new(machine),
        })
    }

    /// Rebuild a position from already-validated parts. Used by snapshot
    /// restore, which has checked `value` and `visited` against `machine`.
    pub(crate) fn resume(
        machine: Arc<Machine>,
        value: String,
        visited: Vec<String>,
    ) -> Self {
        Self {
            value,
            visited,
            machine,
        }
    }

    /// Current state name.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// States previously departed, in first-departure order, without
    /// duplicates.
    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    /// The shared, frozen machine this state walks.
    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    /// Normalized targets of the current state.
    ///
    /// A terminal-only target list is reported as empty: no real moves
    /// exist.
    pub fn possible_targets(&self) -> &[StrictTarget] {
        let targets = self.machine.targets(&self.value).unwrap_or(&[]);
        match targets {
            [StrictTarget::Terminal] => &[],
            targets => targets,
        }
    }

    /// Names of the states reachable from the current state.
    pub fn possible(&self) -> Vec<&str> {
        self.possible_targets()
            .iter()
            .filter_map(StrictTarget::state)
            .collect()
    }

    /// Whether no further transition exists from the current state.
    pub fn done(&self) -> bool {
        self.possible_targets().is_empty()
    }

    /// Non-throwing probe: would [`to`](MachineState::to) accept `target`?
    pub fn is_valid_transition(&self, target: &str) -> bool {
        self.validate_transition(target).is_ok()
    }

    /// Transition to `target`, returning the successor value.
    ///
    /// The target must be declared, reachable from the current state, and
    /// its preconditions must hold. On success the new value shares this
    /// state's machine and records the departed state in `visited`
    /// (deduplicated, first-departure order). On failure this state is
    /// untouched and remains fully usable.
    pub fn to(&self, target: &str) -> Result<Self, TransitionError> {
        self.validate_transition(target)?;

        let mut visited = self.visited.clone();
        if !visited.iter().any(|seen| seen == &self.value) {
            visited.push(self.value.clone());
        }

        trace!(from = %self.value, to = target, "transition");
        Ok(Self {
            value: target.to_string(),
            visited,
            machine: Arc::clone(&self.machine),
        })
    }

    /// Transition to the first possible target.
    ///
    /// Fails when the current state is terminal.
    pub fn next(&self) -> Result<Self, TransitionError> {
        match self.possible_targets().first() {
            Some(StrictTarget::State { name, .. }) => self.to(name),
            _ => Err(TransitionError::NoNextState {
                state: self.value.clone(),
            }),
        }
    }

    fn validate_transition(&self, target: &str) -> Result<(), TransitionError> {
        // The current value can only be undeclared if this state was
        // manufactured outside init, e.g. from a hand-edited snapshot.
        if !self.machine.contains(&self.value) {
            return Err(TransitionError::UnknownCurrentState {
                state: self.value.clone(),
            });
        }
        if !self.machine.contains(target) {
            return Err(TransitionError::UndeclaredState {
                state: target.to_string(),
            });
        }

        let strict = self
            .possible_targets()
            .iter()
            .find(|candidate| candidate.state() == Some(target));
        let Some(strict) = strict else {
            return Err(TransitionError::NotReachable {
                from: self.value.clone(),
                to: target.to_string(),
                alternatives: self
                    .possible()
                    .iter()
                    .map(|name| name.to_string())
                    .collect(),
            });
        };

        for precondition in strict.preconditions() {
            if let Some(required) = &precondition.visited {
                if !self.visited.iter().any(|seen| seen == required) {
                    return Err(TransitionError::PreconditionNotVisited {
                        to: target.to_string(),
                        required: required.clone(),
                    });
                }
            }
            if let Some(required) = &precondition.current {
                if required != &self.value {
                    return Err(TransitionError::PreconditionWrongState {
                        to: target.to_string(),
                        required: required.clone(),
                        current: self.value.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

//! Transition target shapes and normalization.
//!
//! Transition tables are authored in a deliberately loose shape: a target
//! may be a terminal marker, a single state name, a descriptor carrying
//! preconditions, or a list mixing those. Normalization collapses every
//! authored shape into one canonical form before validation or execution
//! ever inspects a target.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Guard declared on a single transition target.
///
/// A precondition names a state that must already appear in the visit
/// history (`visited`) and/or the state the machine must currently occupy
/// (`current`). Preconditions are evaluated when a transition is attempted,
/// not when the table is validated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Precondition {
    /// State that must appear in the visit history.
    #[serde(default)]
    pub visited: Option<String>,
    /// State the machine must currently be in.
    #[serde(default)]
    pub current: Option<String>,
}

impl Precondition {
    /// Require `state` to appear in the visit history.
    pub fn visited(state: impl Into<String>) -> Self {
        Self {
            visited: Some(state.into()),
            current: None,
        }
    }

    /// Require the machine to currently be in `state`.
    pub fn current(state: impl Into<String>) -> Self {
        Self {
            visited: None,
            current: Some(state.into()),
        }
    }
}

/// Object-shaped target as it appears in an authored table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDescriptor {
    /// Name of the target state.
    pub state: String,
    /// Guards that must hold when this transition is attempted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preconditions: Vec<Precondition>,
}

/// One authored transition target, before normalization.
///
/// This is the heterogeneous shape accepted at the table-authoring
/// boundary. It exists only there: [`normalize`] eliminates it before any
/// other operation runs.
///
/// # Example
///
/// The four authored shapes, as they appear in a JSON table:
///
/// ```rust
/// use waypoint::core::RawTarget;
///
/// let terminal: RawTarget = serde_json::from_str("null").unwrap();
/// let name: RawTarget = serde_json::from_str(r#""decay""#).unwrap();
/// let descriptor: RawTarget =
///     serde_json::from_str(r#"{ "state": "decay" }"#).unwrap();
/// let list: RawTarget =
///     serde_json::from_str(r#"["decay", "release"]"#).unwrap();
///
/// assert_eq!(terminal, RawTarget::Terminal);
/// assert_eq!(name, RawTarget::Name("decay".into()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTarget {
    /// Terminal marker: the declaring state has no further state.
    Terminal,
    /// A single state name.
    Name(String),
    /// A descriptor naming a state and optional preconditions.
    Descriptor(TargetDescriptor),
    /// A list mixing any of the shapes above. Lists may not nest.
    List(Vec<RawTarget>),
}

impl From<&str> for RawTarget {
    fn from(name: &str) -> Self {
        RawTarget::Name(name.to_string())
    }
}

impl From<String> for RawTarget {
    fn from(name: String) -> Self {
        RawTarget::Name(name)
    }
}

/// Canonical transition target produced by [`normalize`].
///
/// Past normalization a target is either the terminal marker or a state
/// name carrying the preconditions declared on it - never a bare string,
/// never a nested list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrictTarget {
    /// No further state.
    Terminal,
    /// A reachable state and the guards declared on it.
    State {
        name: String,
        preconditions: Vec<Precondition>,
    },
}

impl StrictTarget {
    /// The target state's name, or `None` for the terminal marker.
    pub fn state(&self) -> Option<&str> {
        match self {
            StrictTarget::Terminal => None,
            StrictTarget::State { name, .. } => Some(name),
        }
    }

    /// Whether this is the terminal marker.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StrictTarget::Terminal)
    }

    /// Preconditions declared on this target. Empty for the terminal marker.
    pub fn preconditions(&self) -> &[Precondition] {
        match self {
            StrictTarget::Terminal => &[],
            StrictTarget::State { preconditions, .. } => preconditions,
        }
    }
}

/// Errors produced while normalizing a single authored target.
#[derive(Debug, Error)]
pub enum TargetError {
    #[error("a target list may contain at most one terminal marker")]
    MultipleTerminals,

    #[error("a terminal marker cannot appear alongside other targets")]
    TerminalAmongTargets,

    #[error("nested target lists are not supported")]
    NestedList,
}

/// Collapse one authored target into its canonical list of strict targets.
///
/// The terminal marker becomes a single [`StrictTarget::Terminal`]; a bare
/// name or a descriptor becomes a single [`StrictTarget::State`]; a list
/// maps entry by entry, in order. A list must either be exactly one
/// terminal marker or contain no terminal markers at all.
///
/// # Example
///
/// ```rust
/// use waypoint::core::{normalize, RawTarget, StrictTarget};
///
/// let raw = RawTarget::List(vec!["decay".into(), "release".into()]);
/// let targets = normalize(&raw).unwrap();
///
/// assert_eq!(targets.len(), 2);
/// assert_eq!(targets[0].state(), Some("decay"));
/// assert_eq!(targets[1].state(), Some("release"));
/// ```
pub fn normalize(raw: &RawTarget) -> Result<Vec<StrictTarget>, TargetError> {
    let targets = match raw {
        RawTarget::List(entries) => entries
            .iter()
            .map(normalize_entry)
            .collect::<Result<Vec<_>, _>>()?,
        single => vec![normalize_entry(single)?],
    };

    let terminals = targets.iter().filter(|t| t.is_terminal()).count();
    if terminals > 1 {
        return Err(TargetError::MultipleTerminals);
    }
    if terminals == 1 && targets.len() > 1 {
        return Err(TargetError::TerminalAmongTargets);
    }

    Ok(targets)
}

fn normalize_entry(raw: &RawTarget) -> Result<StrictTarget, TargetError> {
    match raw {
        RawTarget::Terminal => Ok(StrictTarget::Terminal),
        RawTarget::Name(name) => Ok(StrictTarget::State {
            name: name.clone(),
            preconditions: Vec::new(),
        }),
        RawTarget::Descriptor(descriptor) => Ok(StrictTarget::State {
            name: descriptor.state.clone(),
            preconditions: descriptor.preconditions.clone(),
        }),
        RawTarget::List(_) => Err(TargetError::NestedList),
    }
}

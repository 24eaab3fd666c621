//! Waypoint: a declarative finite-state-machine core
//!
//! A machine is described by a plain transition table - which states may
//! follow which. The table is validated and normalized exactly once into a
//! frozen [`Machine`]; immutable [`MachineState`] values then track the
//! current state and the history of states visited. Every operation
//! returns a new value, and the underlying machine is shared by reference,
//! never copied and never mutated.
//!
//! # Core Concepts
//!
//! - **Raw table**: the loosely-shaped authored mapping of state to
//!   targets - a single name, a list, a descriptor with preconditions, or
//!   the terminal marker
//! - **Machine**: the validated, canonical, read-only transition table
//! - **Machine state**: an immutable `{ value, visited, machine }` value
//!   transformed by [`to`](MachineState::to) and
//!   [`next`](MachineState::next), probed by
//!   [`possible`](MachineState::possible) and [`done`](MachineState::done)
//!
//! The core is fully synchronous and performs no I/O: it is a pure
//! state-space validator and transitioner. Timing, retries and hardware
//! concerns belong to the caller.
//!
//! # Example
//!
//! ```rust
//! use waypoint::core::MachineState;
//! use waypoint::transition_table;
//!
//! let table = transition_table! {
//!     "pants" => ["shoes", "socks"],
//!     "socks" => ["shoes", "pants"],
//!     "shoes" => "shirt",
//!     "shirt" => _,
//! };
//!
//! let sm = MachineState::init(&table, None).unwrap();
//! assert_eq!(sm.value(), "pants");
//!
//! let sm = sm.to("shoes").unwrap();
//! assert_eq!(sm.visited(), ["pants"]);
//! assert_eq!(sm.possible(), ["shirt"]);
//!
//! let sm = sm.next().unwrap();
//! assert!(sm.done());
//! ```

pub mod builder;
pub mod core;
pub mod snapshot;

// Re-export commonly used types
pub use builder::{from_list, from_list_bidirectional, BuildError, TableBuilder};
pub use core::{
    Machine, MachineState, Precondition, RawTable, RawTarget, StrictTarget, TableError,
    TableSource, TargetDescriptor, TransitionError,
};
pub use snapshot::{Snapshot, SnapshotError};

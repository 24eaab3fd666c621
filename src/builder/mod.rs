//! Authoring API for raw transition tables.
//!
//! This module provides fluent builders, topology helpers and macros for
//! authoring raw tables with minimal boilerplate. Everything here produces
//! a [`RawTable`](crate::core::RawTable); validation stays where it
//! belongs, in [`Machine::new`](crate::core::Machine::new).

pub mod error;
pub mod macros;
pub mod table;
pub mod topology;

pub use error::BuildError;
pub use table::TableBuilder;
pub use topology::{from_list, from_list_bidirectional};

//! Fluent builder for authoring raw transition tables.

use crate::builder::error::BuildError;
use crate::core::{RawTable, RawTarget, TargetDescriptor};

/// Builder for authoring raw transition tables with a fluent API.
///
/// The builder only catches authoring-level mistakes (duplicate
/// declarations); full validation happens when the table is handed to
/// [`Machine::new`](crate::core::Machine::new) or
/// [`MachineState::init`](crate::core::MachineState::init).
///
/// # Example
///
/// ```rust
/// use waypoint::builder::TableBuilder;
/// use waypoint::core::MachineState;
///
/// let table = TableBuilder::new()
///     .targets("pants", ["shoes", "socks"])
///     .targets("socks", ["shoes", "pants"])
///     .target("shoes", "shirt")
///     .terminal("shirt")
///     .build()
///     .unwrap();
///
/// let sm = MachineState::init(&table, None).unwrap();
/// assert_eq!(sm.value(), "pants");
/// ```
pub struct TableBuilder {
    entries: Vec<(String, RawTarget)>,
}

impl TableBuilder {
    /// Create a new, empty builder.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Declare `state` with a single target.
    pub fn target(mut self, state: impl Into<String>, target: impl Into<String>) -> Self {
        self.entries
            .push((state.into(), RawTarget::Name(target.into())));
        self
    }

    /// Declare `state` with several targets, in order.
    pub fn targets<I, S>(mut self, state: impl Into<String>, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = targets
            .into_iter()
            .map(|target| RawTarget::Name(target.into()))
            .collect();
        self.entries.push((state.into(), RawTarget::List(list)));
        self
    }

    /// Declare `state` with descriptor-shaped targets carrying
    /// preconditions.
    pub fn descriptors<I>(mut self, state: impl Into<String>, descriptors: I) -> Self
    where
        I: IntoIterator<Item = TargetDescriptor>,
    {
        let list = descriptors
            .into_iter()
            .map(RawTarget::Descriptor)
            .collect();
        self.entries.push((state.into(), RawTarget::List(list)));
        self
    }

    /// Declare `state` as terminal.
    pub fn terminal(mut self, state: impl Into<String>) -> Self {
        self.entries.push((state.into(), RawTarget::Terminal));
        self
    }

    /// Declare `state` with an already-shaped raw target.
    pub fn raw(mut self, state: impl Into<String>, target: RawTarget) -> Self {
        self.entries.push((state.into(), target));
        self
    }

    /// Assemble the raw table.
    ///
    /// Returns an error if a state was declared more than once.
    pub fn build(self) -> Result<RawTable, BuildError> {
        let mut table = RawTable::with_capacity(self.entries.len());
        for (state, target) in self.entries {
            if table.contains_key(&state) {
                return Err(BuildError::DuplicateState { state });
            }
            table.insert(state, target);
        }
        Ok(table)
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Machine, MachineState, Precondition};

    #[test]
    fn fluent_api_builds_a_table_in_declaration_order() {
        let table = TableBuilder::new()
            .targets("pants", ["shoes", "socks"])
            .targets("socks", ["shoes", "pants"])
            .target("shoes", "shirt")
            .terminal("shirt")
            .build()
            .unwrap();

        assert_eq!(
            table.keys().collect::<Vec<_>>(),
            ["pants", "socks", "shoes", "shirt"]
        );
        assert!(Machine::new(&table).is_ok());
    }

    #[test]
    fn duplicate_declarations_are_rejected() {
        let result = TableBuilder::new()
            .target("a", "b")
            .terminal("b")
            .terminal("a")
            .build();

        assert!(matches!(
            result,
            Err(BuildError::DuplicateState { state }) if state == "a"
        ));
    }

    #[test]
    fn descriptors_carry_preconditions_into_the_machine() {
        let table = TableBuilder::new()
            .target("draft", "review")
            .descriptors(
                "review",
                [TargetDescriptor {
                    state: "published".to_string(),
                    preconditions: vec![Precondition::visited("draft")],
                }],
            )
            .terminal("published")
            .build()
            .unwrap();

        let sm = MachineState::init(&table, None).unwrap();
        let sm = sm.to("review").unwrap();
        let sm = sm.to("published").unwrap();

        assert!(sm.done());
    }

    #[test]
    fn raw_passes_a_target_through_unchanged() {
        let table = TableBuilder::new()
            .raw("a", RawTarget::List(vec!["b".into()]))
            .terminal("b")
            .build()
            .unwrap();

        assert_eq!(table["a"], RawTarget::List(vec!["b".into()]));
    }

    #[test]
    fn empty_builder_yields_an_empty_table() {
        let table = TableBuilder::new().build().unwrap();
        assert!(table.is_empty());
        assert!(Machine::new(&table).is_err());
    }
}

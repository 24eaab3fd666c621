//! Topology helpers generating common raw-table shapes.

use crate::builder::error::BuildError;
use crate::core::{RawTable, RawTarget};

/// Build a linear chain: each state points to the next, the last is
/// terminal.
///
/// At least two valid, distinct state names are required.
///
/// # Example
///
/// ```rust
/// use waypoint::builder::from_list;
/// use waypoint::core::MachineState;
///
/// let table = from_list(["a", "b", "c", "d"]).unwrap();
/// let sm = MachineState::init(&table, None).unwrap();
///
/// let sm = sm.next().unwrap().next().unwrap().next().unwrap();
/// assert_eq!(sm.value(), "d");
/// assert!(sm.next().is_err());
/// ```
pub fn from_list<I, S>(states: I) -> Result<RawTable, BuildError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names = collect_names(states)?;
    let mut table = RawTable::with_capacity(names.len());

    for (index, name) in names.iter().enumerate() {
        let target = match names.get(index + 1) {
            Some(next) => RawTarget::Name(next.clone()),
            None => RawTarget::Terminal,
        };
        table.insert(name.clone(), target);
    }

    Ok(table)
}

/// Build a chain traversable both ways.
///
/// Interior states point to their predecessor and successor; the first
/// state points only forward, the last only backward.
///
/// # Example
///
/// ```rust
/// use waypoint::builder::from_list_bidirectional;
/// use waypoint::core::MachineState;
///
/// let table = from_list_bidirectional(["a", "b", "c"]).unwrap();
///
/// let sm = MachineState::init(&table, Some("c")).unwrap();
/// let sm = sm.to("b").unwrap();
/// let sm = sm.to("a").unwrap();
/// assert_eq!(sm.value(), "a");
/// ```
pub fn from_list_bidirectional<I, S>(states: I) -> Result<RawTable, BuildError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names = collect_names(states)?;
    let mut table = RawTable::with_capacity(names.len());

    for (index, name) in names.iter().enumerate() {
        let mut targets = Vec::with_capacity(2);
        if index > 0 {
            targets.push(RawTarget::Name(names[index - 1].clone()));
        }
        if let Some(next) = names.get(index + 1) {
            targets.push(RawTarget::Name(next.clone()));
        }
        table.insert(name.clone(), RawTarget::List(targets));
    }

    Ok(table)
}

fn collect_names<I, S>(states: I) -> Result<Vec<String>, BuildError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let names: Vec<String> = states.into_iter().map(Into::into).collect();

    if names.len() < 2 {
        return Err(BuildError::TooFewStates { found: names.len() });
    }
    for (index, name) in names.iter().enumerate() {
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(BuildError::InvalidStateName { name: name.clone() });
        }
        if names[..index].contains(name) {
            return Err(BuildError::DuplicateState {
                state: name.clone(),
            });
        }
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Machine, MachineState};

    #[test]
    fn from_list_builds_a_forward_chain() {
        let table = from_list(["a", "b", "c", "d"]).unwrap();

        assert_eq!(table["a"], RawTarget::Name("b".to_string()));
        assert_eq!(table["b"], RawTarget::Name("c".to_string()));
        assert_eq!(table["c"], RawTarget::Name("d".to_string()));
        assert_eq!(table["d"], RawTarget::Terminal);
    }

    #[test]
    fn from_list_chain_walks_to_the_end_and_stops() {
        let table = from_list(["a", "b", "c", "d"]).unwrap();
        let sm = MachineState::init(&table, None).unwrap();

        let sm = sm.next().unwrap();
        let sm = sm.next().unwrap();
        let sm = sm.next().unwrap();

        assert_eq!(sm.value(), "d");
        assert!(sm.done());
        assert!(sm.next().is_err());
    }

    #[test]
    fn from_list_requires_two_states() {
        assert!(matches!(
            from_list(["solo"]),
            Err(BuildError::TooFewStates { found: 1 })
        ));
        assert!(matches!(
            from_list(Vec::<String>::new()),
            Err(BuildError::TooFewStates { found: 0 })
        ));
    }

    #[test]
    fn from_list_rejects_invalid_names() {
        assert!(matches!(
            from_list(["ok", "not ok"]),
            Err(BuildError::InvalidStateName { name }) if name == "not ok"
        ));
        assert!(matches!(
            from_list(["ok", ""]),
            Err(BuildError::InvalidStateName { name }) if name.is_empty()
        ));
    }

    #[test]
    fn from_list_rejects_duplicates() {
        assert!(matches!(
            from_list(["a", "b", "a"]),
            Err(BuildError::DuplicateState { state }) if state == "a"
        ));
    }

    #[test]
    fn bidirectional_interior_states_point_both_ways() {
        let table = from_list_bidirectional(["a", "b", "c"]).unwrap();

        assert_eq!(table["a"], RawTarget::List(vec!["b".into()]));
        assert_eq!(
            table["b"],
            RawTarget::List(vec!["a".into(), "c".into()])
        );
        assert_eq!(table["c"], RawTarget::List(vec!["b".into()]));
    }

    #[test]
    fn bidirectional_chain_walks_in_either_direction() {
        let table = from_list_bidirectional(["a", "b", "c"]).unwrap();

        let sm = MachineState::init(&table, None).unwrap();
        let sm = sm.to("b").unwrap();
        let sm = sm.to("c").unwrap();
        assert_eq!(sm.value(), "c");

        let sm = sm.to("b").unwrap();
        let sm = sm.to("a").unwrap();
        assert_eq!(sm.value(), "a");
    }

    #[test]
    fn bidirectional_chain_has_no_terminal_state() {
        let table = from_list_bidirectional(["a", "b", "c"]).unwrap();
        let machine = Machine::new(&table).unwrap();

        for state in ["a", "b", "c"] {
            assert!(!machine.is_terminal(state));
        }
    }

    #[test]
    fn generated_tables_validate() {
        for table in [
            from_list(["x", "y"]).unwrap(),
            from_list_bidirectional(["x", "y", "z"]).unwrap(),
        ] {
            assert!(Machine::new(&table).is_ok());
        }
    }
}

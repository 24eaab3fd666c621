//! Property-based tests for the machine core.
//!
//! These tests use proptest to verify the transition laws hold across
//! many randomly generated topologies.

use proptest::prelude::*;
use waypoint::builder::{from_list, from_list_bidirectional};
use waypoint::core::{Machine, MachineState};

prop_compose! {
    fn state_names()(names in prop::collection::btree_set("[a-z]{1,8}", 2..8)) -> Vec<String> {
        names.into_iter().collect()
    }
}

proptest! {
    #[test]
    fn init_enters_the_requested_state(
        names in state_names(),
        pick in any::<prop::sample::Index>(),
    ) {
        let table = from_list(names.clone()).unwrap();
        let initial = &names[pick.index(names.len())];

        let sm = MachineState::init(&table, Some(initial.as_str())).unwrap();

        prop_assert_eq!(sm.value(), initial.as_str());
        prop_assert!(sm.visited().is_empty());
    }

    #[test]
    fn possible_is_empty_exactly_when_done(
        names in state_names(),
        pick in any::<prop::sample::Index>(),
    ) {
        let table = from_list(names.clone()).unwrap();
        let initial = &names[pick.index(names.len())];
        let sm = MachineState::init(&table, Some(initial.as_str())).unwrap();

        prop_assert_eq!(sm.possible().is_empty(), sm.done());
    }

    #[test]
    fn revalidating_a_machine_is_idempotent(names in state_names()) {
        let table = from_list_bidirectional(names).unwrap();
        let machine = Machine::new(&table).unwrap();
        let again = Machine::new(&machine.to_raw()).unwrap();

        prop_assert_eq!(machine, again);
    }

    #[test]
    fn reachable_transitions_follow_the_visited_law(
        names in state_names(),
        steps in prop::collection::vec(any::<prop::sample::Index>(), 1..20),
    ) {
        let table = from_list_bidirectional(names).unwrap();
        let mut sm = MachineState::init(&table, None).unwrap();

        for step in steps {
            let possible: Vec<String> =
                sm.possible().iter().map(|name| name.to_string()).collect();
            prop_assert!(!possible.is_empty());

            let target = &possible[step.index(possible.len())];
            let old_value = sm.value().to_string();
            let old_visited = sm.visited().to_vec();

            let next = sm.to(target).unwrap();

            prop_assert_eq!(next.value(), target.as_str());
            let mut expected = old_visited;
            if !expected.contains(&old_value) {
                expected.push(old_value);
            }
            prop_assert_eq!(next.visited(), expected.as_slice());

            sm = next;
        }
    }

    #[test]
    fn unreachable_transitions_fail_and_leave_the_state_usable(
        names in state_names(),
    ) {
        let table = from_list(names.clone()).unwrap();
        let sm = MachineState::init(&table, None).unwrap();

        // In a forward chain nothing points back at the first state.
        prop_assert!(sm.to(&names[0]).is_err());
        prop_assert!(sm.to("never-declared").is_err());

        prop_assert_eq!(sm.value(), names[0].as_str());
        prop_assert!(sm.visited().is_empty());
        prop_assert!(sm.to(&names[1]).is_ok());
    }

    #[test]
    fn forward_chains_walk_to_the_end_then_stop(names in state_names()) {
        let table = from_list(names.clone()).unwrap();
        let mut sm = MachineState::init(&table, None).unwrap();

        for _ in 1..names.len() {
            sm = sm.next().unwrap();
        }

        prop_assert_eq!(sm.value(), names.last().unwrap().as_str());
        prop_assert!(sm.done());
        prop_assert!(sm.next().is_err());
    }

    #[test]
    fn bidirectional_chains_walk_back_to_the_start(names in state_names()) {
        let table = from_list_bidirectional(names.clone()).unwrap();

        let last = names.last().unwrap().as_str();
        let mut sm = MachineState::init(&table, Some(last)).unwrap();
        for name in names.iter().rev().skip(1) {
            sm = sm.to(name).unwrap();
        }

        prop_assert_eq!(sm.value(), names[0].as_str());
    }

    #[test]
    fn visited_never_contains_duplicates(
        names in state_names(),
        steps in prop::collection::vec(any::<prop::sample::Index>(), 0..30),
    ) {
        let table = from_list_bidirectional(names).unwrap();
        let mut sm = MachineState::init(&table, None).unwrap();

        for step in steps {
            let possible: Vec<String> =
                sm.possible().iter().map(|name| name.to_string()).collect();
            if possible.is_empty() {
                break;
            }
            sm = sm.to(&possible[step.index(possible.len())]).unwrap();
        }

        let visited = sm.visited();
        for (index, state) in visited.iter().enumerate() {
            prop_assert!(!visited[..index].contains(state));
        }
    }
}

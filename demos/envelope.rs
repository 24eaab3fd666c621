//! Audio Envelope Stage Sequencer
//!
//! This example demonstrates how an envelope generator uses the machine
//! core purely for stage ordering. The machine knows nothing about time:
//! deciding *when* elapsed time warrants a move belongs entirely to the
//! envelope component driving it.
//!
//! Key concepts:
//! - A consumer supplying its own table
//! - `next` for the common path, `to` for early exits
//! - Terminal detection with `done`
//!
//! Run with: cargo run --example envelope

use waypoint::core::MachineState;
use waypoint::transition_table;

fn main() {
    println!("=== Envelope Stage Sequencer ===\n");

    let table = transition_table! {
        "attack" => ["decay", "release"],
        "decay" => ["sustain", "release"],
        "sustain" => ["release"],
        "release" => ["complete"],
        "complete" => _,
    };

    // Full pass: the envelope clock calls next() as each stage elapses.
    let mut sm = MachineState::init(&table, None).unwrap();
    println!("Full envelope:");
    println!("  stage: {}", sm.value());
    while !sm.done() {
        sm = sm.next().unwrap();
        println!("  stage: {}", sm.value());
    }
    println!("  path: {:?}\n", sm.visited());

    // Early note-off: release is reachable from every active stage.
    let sm = MachineState::init(&table, None).unwrap();
    println!("Note released during attack:");
    println!("  release legal now? {}", sm.is_valid_transition("release"));
    let sm = sm.to("release").unwrap();
    let sm = sm.to("complete").unwrap();
    println!("  stage: {}, done: {}", sm.value(), sm.done());

    println!("\n=== Example Complete ===");
}

//! Getting Dressed State Machine
//!
//! This example demonstrates the core transition operations on a small
//! everyday machine.
//!
//! Key concepts:
//! - Declarative transition tables
//! - Immutable machine states (every move returns a new value)
//! - Visited history with first-departure order
//!
//! Run with: cargo run --example getting_dressed

use waypoint::core::MachineState;
use waypoint::transition_table;

fn main() {
    println!("=== Getting Dressed State Machine ===\n");

    let table = transition_table! {
        "pants" => ["shoes", "socks"],
        "socks" => ["shoes", "pants"],
        "shoes" => "shirt",
        "shirt" => _,
    };

    let sm = MachineState::init(&table, None).unwrap();
    println!("Initial state: {}", sm.value());
    println!("Possible next: {:?}\n", sm.possible());

    let sm = sm.to("socks").unwrap();
    println!("Put on socks  -> value={}, visited={:?}", sm.value(), sm.visited());

    let sm = sm.to("shoes").unwrap();
    println!("Put on shoes  -> value={}, visited={:?}", sm.value(), sm.visited());

    println!("\nTrying an illegal jump back to pants:");
    match sm.to("pants") {
        Ok(_) => println!("  unexpectedly allowed"),
        Err(err) => println!("  rejected: {err}"),
    }

    let sm = sm.to("shirt").unwrap();
    println!("\nPut on shirt  -> value={}, visited={:?}", sm.value(), sm.visited());
    println!("Done: {}", sm.done());

    println!("\n=== Example Complete ===");
}

//! Hardware Connection Lifecycle
//!
//! This example demonstrates how a device-connection component uses the
//! machine core to reject illegal lifecycle jumps, and how snapshots let
//! a position survive a process restart. Retry and backoff policy stay
//! outside the machine.
//!
//! Key concepts:
//! - `is_valid_transition` as a non-throwing probe
//! - Cyclic reconnect topology
//! - Snapshot capture/restore round trip
//!
//! Run with: cargo run --example connection

use waypoint::core::MachineState;
use waypoint::snapshot::Snapshot;
use waypoint::transition_table;

fn main() {
    println!("=== Connection Lifecycle ===\n");

    let table = transition_table! {
        "ready" => "connecting",
        "connecting" => ["connected", "closed"],
        "connected" => ["closed"],
        "closed" => "connecting",
    };

    let sm = MachineState::init(&table, None).unwrap();
    println!("State: {}", sm.value());
    println!("Jump straight to connected? {}", sm.is_valid_transition("connected"));

    let sm = sm.to("connecting").unwrap();
    let sm = sm.to("connected").unwrap();
    println!("Connected after handshake: {}", sm.value());

    // The link drops; the component closes and schedules a reconnect.
    let sm = sm.to("closed").unwrap();
    println!("Link lost -> {}, can retry via {:?}", sm.value(), sm.possible());

    // Park the position before a process restart.
    let snapshot = Snapshot::capture(&sm);
    let json = snapshot.to_json().unwrap();
    println!("\nSnapshot {} taken ({} bytes of JSON)", snapshot.id, json.len());

    let restored = Snapshot::from_json(&json).unwrap().restore().unwrap();
    let sm = restored.to("connecting").unwrap();
    println!("Restored and reconnecting: {}", sm.value());
    println!("History so far: {:?}", sm.visited());

    println!("\n=== Example Complete ===");
}

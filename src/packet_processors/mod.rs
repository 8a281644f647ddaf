//! Packet processors for the routing core
//!
//! - `aprs_is_gate` decides whether an RF packet is relayed to APRS-IS
//! - `digipeater` decides whether an RF packet is repeated over RF
//! - `beacon` emits the periodic station beacon on both egress paths
//!
//! The `router` module ties them together in a RouterTask that the host
//! scheduler drives one cycle at a time.

pub mod aprs_is_gate;
pub mod beacon;
pub mod digipeater;
pub mod router;

// Re-export the main types for convenience
pub use aprs_is_gate::{AprsIsGate, GateDecision, gate_decision};
pub use beacon::{BEACON_DESTINATION, BeaconScheduler, build_beacon};
pub use digipeater::{DigiDecision, Digipeater, digi_decision};
pub use router::{CycleReport, RouterTask};

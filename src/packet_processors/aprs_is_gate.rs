use tracing::debug;

use crate::aprs_message::{AprsMessage, SharedMessage};
use crate::path::append_gate_marker;
use crate::station_config::StationConfig;
use crate::task_queue::TaskQueue;

/// Outcome of the APRS-IS gating decision for one inbound packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// `aprs_is.active` is off
    Disabled,
    /// Packet was sent by this station
    OwnPacket,
    /// Destination is empty, so the gated copy would not be a valid TNC2 frame
    Malformed,
    /// Path carries RFONLY, NOGATE or TCPIP
    RfOnly,
    /// Clone with `qAR,<callsign>` appended, ready for APRS-IS
    Forward(AprsMessage),
}

/// Decide whether an RF packet is relayed to APRS-IS.
///
/// The inbound packet is never modified; a forwarded packet is a fresh copy.
pub fn gate_decision(packet: &AprsMessage, config: &StationConfig) -> GateDecision {
    if !config.aprs_is.active {
        return GateDecision::Disabled;
    }
    if packet.source == config.callsign {
        return GateDecision::OwnPacket;
    }
    if packet.destination.is_empty() {
        return GateDecision::Malformed;
    }
    if config.path_matching.forbids_gating(&packet.path) {
        return GateDecision::RfOnly;
    }

    let mut gated = packet.clone();
    gated.path = append_gate_marker(&packet.path, &config.callsign);
    GateDecision::Forward(gated)
}

/// Relays eligible RF packets onto the APRS-IS egress queue
#[derive(Clone)]
pub struct AprsIsGate {
    to_aprs_is: TaskQueue<SharedMessage>,
}

impl AprsIsGate {
    pub fn new(to_aprs_is: TaskQueue<SharedMessage>) -> Self {
        Self { to_aprs_is }
    }

    /// Run the gate for one packet, returning `true` when a copy was queued
    pub fn process_packet(&self, packet: &AprsMessage, config: &StationConfig) -> bool {
        match gate_decision(packet, config) {
            GateDecision::Forward(gated) => {
                debug!("APRS-IS: {}", gated);
                metrics::counter!("router.aprs_is.gated_total").increment(1);
                self.to_aprs_is.add_element(gated.into_shared())
            }
            GateDecision::Disabled => {
                debug!("APRS-IS: disabled");
                false
            }
            GateDecision::OwnPacket => {
                debug!("APRS-IS: no forward => own packet received");
                metrics::counter!("router.aprs_is.suppressed_total", "reason" => "own_packet")
                    .increment(1);
                false
            }
            GateDecision::Malformed => {
                debug!("APRS-IS: no forward => empty destination from {}", packet.source);
                metrics::counter!("router.aprs_is.suppressed_total", "reason" => "malformed")
                    .increment(1);
                false
            }
            GateDecision::RfOnly => {
                debug!("APRS-IS: no forward => RFonly");
                metrics::counter!("router.aprs_is.suppressed_total", "reason" => "rf_only")
                    .increment(1);
                false
            }
        }
    }
}

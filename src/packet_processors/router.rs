use std::time::Instant;
use tracing::trace;

use super::aprs_is_gate::AprsIsGate;
use super::beacon::BeaconScheduler;
use super::digipeater::Digipeater;
use crate::aprs_message::SharedMessage;
use crate::display::DisplaySink;
use crate::station_config::StationConfig;
use crate::task_queue::TaskQueue;

/// What one router cycle did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// An inbound packet was taken from the modem queue
    pub received: bool,
    /// A copy went to the APRS-IS queue
    pub gated: bool,
    /// A copy went to the radio queue
    pub digipeated: bool,
    /// The beacon fired
    pub beacon: bool,
}

/// RouterTask moves packets between the modem and APRS-IS queues
///
/// Call [`run_cycle`](Self::run_cycle) repeatedly from the host scheduler. Each
/// call handles at most one inbound packet, checks the beacon and returns
/// without waiting on anything.
pub struct RouterTask {
    from_modem: TaskQueue<SharedMessage>,
    gate: AprsIsGate,
    digipeater: Digipeater,
    beacon: BeaconScheduler,
}

impl RouterTask {
    /// Create the router and build the beacon template from `config`
    pub fn new(
        config: &StationConfig,
        from_modem: TaskQueue<SharedMessage>,
        to_modem: TaskQueue<SharedMessage>,
        to_aprs_is: TaskQueue<SharedMessage>,
    ) -> Self {
        Self {
            from_modem,
            gate: AprsIsGate::new(to_aprs_is.clone()),
            digipeater: Digipeater::new(to_modem.clone()),
            beacon: BeaconScheduler::new(config, to_modem, to_aprs_is),
        }
    }

    /// Status line for an external status screen, e.g. `beacon 14:59`
    pub fn state_info(&self) -> &str {
        self.beacon.state_info()
    }

    pub fn beacon_template(&self) -> &SharedMessage {
        self.beacon.template()
    }

    /// One non-blocking pass: gate and digipeat one inbound packet, then the beacon
    pub fn run_cycle(
        &mut self,
        config: &StationConfig,
        display: &dyn DisplaySink,
        now: Instant,
    ) -> CycleReport {
        let mut report = CycleReport::default();

        if !self.from_modem.is_empty()
            && let Some(packet) = self.from_modem.get_element()
        {
            trace!("Routing packet from {}", packet.source);
            metrics::counter!("router.packets_received_total").increment(1);
            metrics::gauge!("router.from_modem.depth").set(self.from_modem.len() as f64);

            report.received = true;
            report.gated = self.gate.process_packet(&packet, config);
            report.digipeated = self.digipeater.process_packet(&packet, config);
        }

        report.beacon = self.beacon.poll(config, display, now);
        report
    }
}

//! Shared fixtures for router integration tests
//!
//! `TestNode` wires a [`RouterTask`] to three fresh queues and a display queue,
//! and keeps a simulated clock that tests advance explicitly.

#![allow(dead_code)]

use aprs_router::display::TextFrame;
use aprs_router::{AprsMessage, CycleReport, RouterTask, SharedMessage, StationConfig, TaskQueue};
use std::time::{Duration, Instant};

pub const CALLSIGN: &str = "N0CALL";

/// Station config with everything switched on and a 10 minute beacon
pub fn station_config() -> StationConfig {
    let mut config = StationConfig {
        callsign: CALLSIGN.to_string(),
        ..Default::default()
    };
    config.aprs_is.active = true;
    config.digi.active = true;
    config.digi.beacon = true;
    config.beacon.timeout_minutes = 10;
    config.beacon.latitude = 49.0583333;
    config.beacon.longitude = -72.0291667;
    config.beacon.message = "LoRa APRS iGate".to_string();
    config
}

pub fn packet(source: &str, destination: &str, path: &str) -> AprsMessage {
    AprsMessage::new(source, destination, path, "!4903.50N/07201.75W-Test")
}

pub struct TestNode {
    pub config: StationConfig,
    pub router: RouterTask,
    pub from_modem: TaskQueue<SharedMessage>,
    pub to_modem: TaskQueue<SharedMessage>,
    pub to_aprs_is: TaskQueue<SharedMessage>,
    pub display: TaskQueue<TextFrame>,
    pub now: Instant,
}

impl TestNode {
    pub fn new(config: StationConfig) -> Self {
        let from_modem = TaskQueue::new("from_modem", 64);
        let to_modem = TaskQueue::new("to_modem", 64);
        let to_aprs_is = TaskQueue::new("to_aprs_is", 64);
        let router = RouterTask::new(&config, from_modem.clone(), to_modem.clone(), to_aprs_is.clone());

        Self {
            config,
            router,
            from_modem,
            to_modem,
            to_aprs_is,
            display: TaskQueue::new("display", 64),
            now: Instant::now(),
        }
    }

    /// A node whose startup beacon has already fired and been cleared
    pub fn started(config: StationConfig) -> Self {
        let mut node = Self::new(config);
        node.cycle();
        node.clear();
        node
    }

    pub fn cycle(&mut self) -> CycleReport {
        self.router.run_cycle(&self.config, &self.display, self.now)
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    /// Queue one inbound packet and run a single cycle
    pub fn route(&mut self, packet: AprsMessage) -> CycleReport {
        self.from_modem.add_element(packet.into_shared());
        self.cycle()
    }

    pub fn drain(queue: &TaskQueue<SharedMessage>) -> Vec<SharedMessage> {
        std::iter::from_fn(|| queue.get_element()).collect()
    }

    pub fn clear(&mut self) {
        Self::drain(&self.to_modem);
        Self::drain(&self.to_aprs_is);
        while self.display.get_element().is_some() {}
    }
}

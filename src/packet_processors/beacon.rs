use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use crate::aprs_message::{AprsMessage, SharedMessage};
use crate::beacon_timer::BeaconTimer;
use crate::display::{DisplaySink, TextFrame};
use crate::position::beacon_body;
use crate::station_config::StationConfig;
use crate::task_queue::TaskQueue;

/// Destination (tocall) of beacons sent by this software
pub const BEACON_DESTINATION: &str = "APLG01";

/// Build the beacon packet for a station configuration
pub fn build_beacon(config: &StationConfig) -> AprsMessage {
    AprsMessage::new(
        config.callsign.clone(),
        BEACON_DESTINATION,
        "",
        beacon_body(
            config.beacon.latitude,
            config.beacon.longitude,
            &config.beacon.message,
        ),
    )
}

/// Emits the station beacon once per configured period.
///
/// The template is built once and the same `Arc` is queued on every firing, so
/// the RF and APRS-IS copies are always byte-identical.
pub struct BeaconScheduler {
    template: SharedMessage,
    timer: BeaconTimer,
    state_info: String,
    to_modem: TaskQueue<SharedMessage>,
    to_aprs_is: TaskQueue<SharedMessage>,
}

impl BeaconScheduler {
    pub fn new(
        config: &StationConfig,
        to_modem: TaskQueue<SharedMessage>,
        to_aprs_is: TaskQueue<SharedMessage>,
    ) -> Self {
        Self {
            template: build_beacon(config).into_shared(),
            timer: BeaconTimer::new(config.beacon_period()),
            state_info: String::new(),
            to_modem,
            to_aprs_is,
        }
    }

    pub fn template(&self) -> &SharedMessage {
        &self.template
    }

    /// `beacon M:S` until the next firing, refreshed by every [`poll`](Self::poll)
    pub fn state_info(&self) -> &str {
        &self.state_info
    }

    /// Fire the beacon if due and refresh the status string.
    ///
    /// Returns `true` when the beacon fired. A late poll fires once and restarts
    /// the period from `now`; missed periods are not replayed.
    pub fn poll(&mut self, config: &StationConfig, display: &dyn DisplaySink, now: Instant) -> bool {
        let fired = self.timer.check(now);
        if fired {
            debug!(
                "[{}] {}",
                chrono::Utc::now().format("%H:%M:%S"),
                self.template.encode()
            );

            if config.aprs_is.active {
                self.to_aprs_is.add_element(Arc::clone(&self.template));
            }
            if config.digi.beacon {
                self.to_modem.add_element(Arc::clone(&self.template));
            }

            display.add_frame(TextFrame::new("BEACON", self.template.describe()));
            metrics::counter!("router.beacon.sent_total").increment(1);

            self.timer.start(now);
        }

        let diff = self.timer.trigger_time_in_sec(now);
        self.state_info = format!("beacon {}:{}", diff / 60, diff % 60);
        fired
    }
}

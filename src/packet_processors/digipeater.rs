use tracing::{debug, trace};

use crate::aprs_message::{AprsMessage, SharedMessage};
use crate::path::{Destination, WIDE1_ALIAS, repeated_by};
use crate::station_config::StationConfig;
use crate::task_queue::TaskQueue;

/// Outcome of the digipeat decision for one inbound packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DigiDecision {
    /// `digi.active` is off
    Disabled,
    /// Packet was sent by this station
    OwnPacket,
    /// Repeated because the path requests `WIDE1-1`
    Alias(AprsMessage),
    /// Repeated because the destination carries an SSID
    DestinationSsid(AprsMessage),
    /// Neither strategy applies, or the destination is unusable; nothing is transmitted
    NotEligible,
}

impl DigiDecision {
    /// Metric label for a decision that transmits nothing
    pub fn drop_reason(&self) -> Option<&'static str> {
        match self {
            DigiDecision::Disabled => Some("disabled"),
            DigiDecision::OwnPacket => Some("own_packet"),
            DigiDecision::NotEligible => Some("not_eligible"),
            DigiDecision::Alias(_) | DigiDecision::DestinationSsid(_) => None,
        }
    }
}

/// Decide whether an RF packet is repeated and how the copy looks.
///
/// At most one strategy fires. Alias digipeating wins when the path carries
/// `WIDE1-1`, the destination has no SSID and this station is not yet in the
/// path. Otherwise a destination SSID triggers destination digipeating, which
/// strips the hyphen and one SSID character. Either way the copy's path is
/// replaced by `<callsign>*`. A packet already carrying our callsign is never
/// repeated again, and neither is one whose destination is empty or would be
/// left empty by stripping.
pub fn digi_decision(packet: &AprsMessage, config: &StationConfig) -> DigiDecision {
    if !config.digi.active {
        return DigiDecision::Disabled;
    }
    if packet.source == config.callsign {
        return DigiDecision::OwnPacket;
    }

    if packet.destination.is_empty() {
        return DigiDecision::NotEligible;
    }

    let matching = config.path_matching;
    let already_repeated = matching.contains(&packet.path, &config.callsign);
    let destination = Destination::split(&packet.destination);

    if matching.contains(&packet.path, WIDE1_ALIAS) && !already_repeated && !destination.has_ssid()
    {
        let mut repeated = packet.clone();
        repeated.path = repeated_by(&config.callsign);
        return DigiDecision::Alias(repeated);
    }

    if !already_repeated
        && let Some(stripped) = destination.strip_ssid_digit()
        && !stripped.is_empty()
    {
        let mut repeated = packet.clone();
        repeated.destination = stripped;
        repeated.path = repeated_by(&config.callsign);
        return DigiDecision::DestinationSsid(repeated);
    }

    DigiDecision::NotEligible
}

/// Repeats eligible RF packets onto the radio egress queue
#[derive(Clone)]
pub struct Digipeater {
    to_modem: TaskQueue<SharedMessage>,
}

impl Digipeater {
    pub fn new(to_modem: TaskQueue<SharedMessage>) -> Self {
        Self { to_modem }
    }

    /// Run the digipeater for one packet, returning `true` when a copy was queued
    pub fn process_packet(&self, packet: &AprsMessage, config: &StationConfig) -> bool {
        let repeated = match digi_decision(packet, config) {
            DigiDecision::Alias(repeated) => {
                debug!("WIDE Digipeating: {}", repeated);
                repeated
            }
            DigiDecision::DestinationSsid(repeated) => {
                debug!("DST Digipeating: {}", repeated);
                repeated
            }
            decision => {
                trace!("No digipeat for {}: {:?}", packet.source, decision);
                if let Some(reason) = decision.drop_reason() {
                    metrics::counter!("router.digi.dropped_total", "reason" => reason).increment(1);
                }
                return false;
            }
        };

        metrics::counter!("router.digi.repeated_total").increment(1);
        self.to_modem.add_element(repeated.into_shared())
    }
}

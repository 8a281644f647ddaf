//! Capacities of the three queues around the router
//!
//! The router drains at most one inbound packet per cycle, so the inbound queue
//! absorbs bursts from the modem between cycles. Egress queues only need to hold
//! what the radio and APRS-IS tasks have not picked up yet.

/// Decoded packets from the radio modem waiting for the router
pub const FROM_MODEM_QUEUE_SIZE: usize = 100;

/// Packets (digipeats and beacons) waiting to be transmitted over RF
pub const TO_MODEM_QUEUE_SIZE: usize = 50;

/// Packets (gated traffic and beacons) waiting for the APRS-IS connection
pub const TO_APRS_IS_QUEUE_SIZE: usize = 100;

/// Calculate the warning threshold for queue depth monitoring
///
/// Returns 80% of queue capacity as the warning threshold. When a queue
/// exceeds this threshold, warnings are logged to indicate potential backpressure.
///
/// # Examples
/// ```
/// use aprs_router::queue_config::queue_warning_threshold;
///
/// assert_eq!(queue_warning_threshold(100), 80);
/// assert_eq!(queue_warning_threshold(50), 40);
/// ```
pub const fn queue_warning_threshold(size: usize) -> usize {
    (size * 80) / 100
}

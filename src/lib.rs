//! APRS router - packet routing core of an iGate/digipeater node
//!
//! For every packet heard on RF the router decides whether to relay it to
//! APRS-IS and whether to repeat it over RF, and it periodically injects the
//! station beacon on both paths. The host drives [`RouterTask::run_cycle`]
//! from its own scheduler loop; queues, display and configuration are passed in.

pub mod aprs_message;
pub mod beacon_timer;
pub mod display;
pub mod log_format;
pub mod metrics;
pub mod packet_processors;
pub mod path;
pub mod position;
pub mod queue_config;
pub mod station_config;
pub mod task_queue;

pub use aprs_message::{AprsMessage, SharedMessage};
pub use packet_processors::{CycleReport, RouterTask};
pub use station_config::StationConfig;
pub use task_queue::TaskQueue;

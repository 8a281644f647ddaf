pub mod beacon;
pub mod check_config;
pub mod run;

pub use beacon::handle_beacon;
pub use check_config::handle_check_config;
pub use run::handle_run;

use anyhow::Result;
use aprs_router::StationConfig;
use std::path::Path;
use tracing::info;

pub fn handle_check_config(config_path: &Path) -> Result<()> {
    let config = StationConfig::load(config_path)?;

    info!("Configuration {:?} is valid", config_path);
    println!("callsign:       {}", config.callsign);
    println!("path matching:  {}", config.path_matching);
    println!("aprs-is gate:   {}", on_off(config.aprs_is.active));
    println!("digipeater:     {}", on_off(config.digi.active));
    println!("rf beacon:      {}", on_off(config.digi.beacon));
    println!(
        "beacon period:  {} min at {}, {}",
        config.beacon.timeout_minutes, config.beacon.latitude, config.beacon.longitude
    );

    Ok(())
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

use anyhow::Result;
use aprs_router::StationConfig;
use aprs_router::packet_processors::build_beacon;
use std::path::Path;

pub fn handle_beacon(config_path: &Path) -> Result<()> {
    let config = StationConfig::load(config_path)?;
    println!("{}", build_beacon(&config));
    Ok(())
}

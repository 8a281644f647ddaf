use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::path::PathMatching;

/// APRS-IS gating toggle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AprsIsConfig {
    #[serde(default)]
    pub active: bool,
}

/// Digipeater toggles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigiConfig {
    /// Repeat eligible packets over RF
    #[serde(default)]
    pub active: bool,
    /// Also send the station beacon over RF
    #[serde(default)]
    pub beacon: bool,
}

/// Periodic station beacon parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeaconConfig {
    #[serde(default = "default_beacon_timeout")]
    pub timeout_minutes: u32,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub message: String,
}

fn default_beacon_timeout() -> u32 {
    15
}

impl Default for BeaconConfig {
    fn default() -> Self {
        Self {
            timeout_minutes: default_beacon_timeout(),
            latitude: 0.0,
            longitude: 0.0,
            message: String::new(),
        }
    }
}

/// Read-only station configuration snapshot handed to the router every cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationConfig {
    pub callsign: String,
    #[serde(default)]
    pub path_matching: PathMatching,
    #[serde(default)]
    pub aprs_is: AprsIsConfig,
    #[serde(default)]
    pub digi: DigiConfig,
    #[serde(default)]
    pub beacon: BeaconConfig,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            callsign: "N0CALL".to_string(),
            path_matching: PathMatching::default(),
            aprs_is: AprsIsConfig::default(),
            digi: DigiConfig::default(),
            beacon: BeaconConfig::default(),
        }
    }
}

impl StationConfig {
    /// Load config from a TOML file and validate it
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: StationConfig =
            toml::from_str(&contents).with_context(|| format!("Failed to parse {:?}", path))?;
        config
            .validate()
            .with_context(|| format!("Invalid station configuration in {:?}", path))?;
        Ok(config)
    }

    /// Save config to a TOML file (atomic: write to .tmp then rename)
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;
        let tmp_path = path.with_extension("toml.tmp");
        std::fs::write(&tmp_path, &contents)
            .with_context(|| format!("Failed to write {:?}", tmp_path))?;
        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("Failed to rename {:?} to {:?}", tmp_path, path))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.callsign.is_empty() {
            bail!("callsign must not be empty");
        }
        if self
            .callsign
            .chars()
            .any(|c| matches!(c, ',' | '>' | ':' | '*') || c.is_whitespace() || !c.is_ascii())
        {
            bail!("callsign {:?} contains characters not allowed in a path", self.callsign);
        }
        if self.beacon.timeout_minutes == 0 {
            bail!("beacon.timeout_minutes must be at least 1");
        }
        let (lat, lon) = (self.beacon.latitude, self.beacon.longitude);
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            bail!("beacon.latitude out of range [-90,90]: {}", lat);
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            bail!("beacon.longitude out of range [-180,180]: {}", lon);
        }
        Ok(())
    }

    /// Beacon period as a duration
    pub fn beacon_period(&self) -> std::time::Duration {
        std::time::Duration::from_secs(u64::from(self.beacon.timeout_minutes) * 60)
    }
}

/// Resolve the station config file path.
///
/// Priority:
/// 1. `APRS_ROUTER_CONFIG` env var
/// 2. `/etc/aprs-router/station.toml` (production)
/// 3. `./station.toml` (development)
pub fn station_config_path() -> PathBuf {
    if let Ok(path) = std::env::var("APRS_ROUTER_CONFIG") {
        return PathBuf::from(path);
    }

    match std::env::var("APRS_ROUTER_ENV").as_deref() {
        Ok("production") => PathBuf::from("/etc/aprs-router/station.toml"),
        _ => PathBuf::from("./station.toml"),
    }
}

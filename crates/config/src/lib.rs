//! Configuration models and loaders for the laser_broom workspace.
//!
//! Station and debris catalogs live in YAML; the laser site definition can be
//! a single TOML file or a directory of TOML files (first match wins).

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Ground-station entry parsed from a station catalog.
#[derive(Debug, Deserialize, Clone)]
pub struct StationConfig {
    pub name: String,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    #[serde(default)]
    pub altitude_m: f64,
}

/// Debris-target entry parsed from a debris catalog.
#[derive(Debug, Deserialize, Clone)]
pub struct DebrisConfig {
    pub name: String,
    /// Characteristic size (m); drives the intensity safety gate.
    pub size_m: f64,
    pub mass_kg: f64,
    pub cross_section_m2: f64,
    /// Material identifier resolved against the static material table.
    pub material: String,
    /// Two-line elements, when tracked.
    #[serde(default)]
    pub tle_line1: Option<String>,
    #[serde(default)]
    pub tle_line2: Option<String>,
    /// Orbit geometry, used when no TLE is given.
    #[serde(default)]
    pub perigee_alt_km: f64,
    #[serde(default)]
    pub apogee_alt_km: f64,
    #[serde(default)]
    pub inclination_deg: f64,
}

/// Laser site definition parsed from TOML.
#[derive(Debug, Deserialize, Clone)]
pub struct LaserSiteConfig {
    pub name: String,
    pub pulse_energy_j: f64,
    pub wavelength_m: f64,
    pub pulse_duration_s: f64,
    pub aperture_diameter_m: f64,
    pub beam_quality_m2: f64,
    #[serde(default = "default_transmission")]
    pub atmospheric_transmission: f64,
    #[serde(default = "default_rep_rate")]
    pub max_rep_rate_hz: f64,
}

fn default_transmission() -> f64 {
    0.7
}

fn default_rep_rate() -> f64 {
    10.0
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("no records found at {0}")]
    Empty(PathBuf),
}

/// Load station entries from a YAML catalog.
pub fn load_stations<P: AsRef<Path>>(path: P) -> Result<Vec<StationConfig>, ConfigError> {
    load_records(path)
}

/// Load debris entries from a YAML catalog.
pub fn load_debris<P: AsRef<Path>>(path: P) -> Result<Vec<DebrisConfig>, ConfigError> {
    load_records(path)
}

/// Load laser site definitions from a TOML file or a directory of TOML files.
pub fn load_laser_sites<P: AsRef<Path>>(path: P) -> Result<Vec<LaserSiteConfig>, ConfigError> {
    let sites: Vec<LaserSiteConfig> = load_records(&path)?;
    if sites.is_empty() {
        return Err(ConfigError::Empty(path.as_ref().to_path_buf()));
    }
    Ok(sites)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}

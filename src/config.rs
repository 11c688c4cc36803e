//! Startup configuration, read once from a RON file.
//!
//! ```ron
//! (
//!     home: (latitude: 31.0, longitude: -97.0),
//!     locations: [
//!         (name: "Austin", latitude: 30.3, longitude: -97.7, radius_nm: 50.0),
//!     ],
//!     refresh_interval_secs: 10,
//!     rotation_interval_secs: 300,
//!     display: (width: 600, height: 448, portrait: true, output: "flight-panel.png"),
//! )
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use serde::Deserialize;
use crate::data::geography::{GeoPosition, Location};
use crate::errors::ConfigError;
use crate::sources::logos::default_logo_domains;
use crate::sources::sources::{SourceProvider, DEFAULT_AIRCRAFT_API, DEFAULT_LOGO_API, DEFAULT_ROUTE_API};
use crate::tracker::state::Schedule;

pub const DEFAULT_CONFIG_PATH: &str = "flight-panel.ron";

const MAX_INTERVAL_SECS: u64 = 24 * 60 * 60;
const MAX_PANEL_SIDE: u32 = 8192;

#[derive(Debug, Clone, Deserialize)]
pub struct LocationConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_nm: f64
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    pub portrait: bool,                     // Panel mounted rotated a quarter turn
    pub output: PathBuf
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { width: 600, height: 448, portrait: true, output: PathBuf::from("flight-panel.png") }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub aircraft_base_url: String,
    pub route_base_url: String,
    pub logo_base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            aircraft_base_url: DEFAULT_AIRCRAFT_API.to_string(),
            route_base_url: DEFAULT_ROUTE_API.to_string(),
            logo_base_url: DEFAULT_LOGO_API.to_string(),
            timeout_secs: 10,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub home: GeoPosition,
    pub locations: Vec<LocationConfig>,
    #[serde(default = "default_refresh_secs")]
    pub refresh_interval_secs: u64,
    #[serde(default = "default_rotation_secs")]
    pub rotation_interval_secs: u64,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default = "default_logo_domains")]
    pub logo_domains: HashMap<String, String>
}

fn default_refresh_secs() -> u64 { 10 }
fn default_rotation_secs() -> u64 { 300 }

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.display().to_string(), source })?;

        Self::parse(&text, &path.display().to_string())
    }

    pub fn parse(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Config = ron::de::from_str(text)
            .map_err(|e| ConfigError::Parse { path: origin.to_string(), reason: e.to_string() })?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.home.validate("home")?;
        self.locations()?;

        check_interval("refresh_interval_secs", self.refresh_interval_secs)?;
        check_interval("rotation_interval_secs", self.rotation_interval_secs)?;
        check_interval("api.timeout_secs", self.api.timeout_secs)?;

        let (w, h) = (self.display.width, self.display.height);
        if w == 0 || h == 0 || w > MAX_PANEL_SIDE || h > MAX_PANEL_SIDE {
            return Err(ConfigError::Invalid(format!("display size {}x{} is out of range", w, h)));
        }
        Ok(())
    }

    pub fn locations(&self) -> Result<Vec<Location>, ConfigError> {
        if self.locations.is_empty() {
            return Err(ConfigError::Invalid("at least one location is required".to_string()));
        }

        self.locations.iter()
            .map(|l| Location::new(&l.name, l.latitude, l.longitude, l.radius_nm))
            .collect()
    }

    pub fn schedule(&self) -> Schedule {
        Schedule {
            refresh: chrono::Duration::seconds(self.refresh_interval_secs as i64),
            rotation: chrono::Duration::seconds(self.rotation_interval_secs as i64)
        }
    }

    pub fn http_timeout(&self) -> Duration { Duration::from_secs(self.api.timeout_secs) }

    pub fn source_provider(&self) -> SourceProvider {
        SourceProvider::new(&self.api.aircraft_base_url, &self.api.route_base_url, &self.api.logo_base_url)
    }
}

fn check_interval(name: &str, secs: u64) -> Result<(), ConfigError> {
    if secs == 0 || secs > MAX_INTERVAL_SECS {
        return Err(ConfigError::Invalid(format!("{} must be between 1 and {} seconds, got {}", name, MAX_INTERVAL_SECS, secs)));
    }
    Ok(())
}

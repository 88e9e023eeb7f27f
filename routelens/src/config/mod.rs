//! Planner configuration.
//!
//! Configuration comes from three layers, weakest first: built-in
//! defaults, an optional INI file, and environment variables. The
//! defaults match the original deployment: a local scoring backend and a
//! Montreal viewport.

use ini::Ini;
use std::path::Path;

use crate::coord::LatLon;
use crate::error::RouteError;

/// Environment variable overriding the backend base URL.
pub const BACKEND_URL_ENV: &str = "ROUTELENS_BACKEND_URL";

/// Default backend base URL.
const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Default HTTP request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default viewport center (downtown Montreal).
const DEFAULT_CENTER: LatLon = LatLon {
    lat: 45.506,
    lon: -73.5783,
};

/// Default viewport zoom level.
const DEFAULT_ZOOM: u8 = 11;

/// Runtime configuration for the route planner.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Base URL of the route backend, no trailing slash.
    pub backend_url: String,
    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Initial viewport center before any route is rendered.
    pub default_center: LatLon,
    /// Initial viewport zoom level.
    pub default_zoom: u8,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            default_center: DEFAULT_CENTER,
            default_zoom: DEFAULT_ZOOM,
        }
    }
}

impl PlannerConfig {
    /// Load configuration: defaults, then the INI file if present, then
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, RouteError> {
        let mut config = Self::default();
        if let Some(path) = path {
            config.apply_ini(path)?;
        }
        config.apply_env();
        Ok(config)
    }

    /// Apply settings from an INI file.
    ///
    /// Recognized keys, all optional:
    ///
    /// ```ini
    /// [backend]
    /// url = http://localhost:8000
    /// timeout_secs = 30
    ///
    /// [viewport]
    /// lat = 45.506
    /// lon = -73.5783
    /// zoom = 11
    /// ```
    fn apply_ini(&mut self, path: &Path) -> Result<(), RouteError> {
        let ini = Ini::load_from_file(path)
            .map_err(|e| RouteError::Config(format!("Failed to read config {}: {}", path.display(), e)))?;

        if let Some(section) = ini.section(Some("backend")) {
            if let Some(url) = section.get("url") {
                self.backend_url = url.trim_end_matches('/').to_string();
            }
            if let Some(timeout) = section.get("timeout_secs") {
                self.request_timeout_secs = timeout.parse().map_err(|_| {
                    RouteError::Config(format!("Invalid timeout_secs: {}", timeout))
                })?;
            }
        }

        if let Some(section) = ini.section(Some("viewport")) {
            if let Some(lat) = section.get("lat") {
                self.default_center.lat = lat
                    .parse()
                    .map_err(|_| RouteError::Config(format!("Invalid viewport lat: {}", lat)))?;
            }
            if let Some(lon) = section.get("lon") {
                self.default_center.lon = lon
                    .parse()
                    .map_err(|_| RouteError::Config(format!("Invalid viewport lon: {}", lon)))?;
            }
            if let Some(zoom) = section.get("zoom") {
                self.default_zoom = zoom
                    .parse()
                    .map_err(|_| RouteError::Config(format!("Invalid viewport zoom: {}", zoom)))?;
            }
        }

        Ok(())
    }

    /// Apply environment variable overrides.
    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            if !url.is_empty() {
                self.backend_url = url.trim_end_matches('/').to_string();
            }
        }
    }
}

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SPAN_DEGREES};
use crate::geo::GeoCoordinate;

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// Application configuration read from disk at startup.
///
/// Every field is optional in the file; missing fields take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfigData {
    /// Base URL of an OSRM-compatible routing server
    pub routing_endpoint: String,

    /// IP geolocation endpoint used as the desktop location sensor
    pub geolocation_endpoint: String,

    /// Timeout applied to geolocation and routing requests
    pub request_timeout_secs: u64,

    /// When set, the sensor reports this coordinate instead of asking the network
    pub fixed_location: Option<GeoCoordinate>,

    /// Map centre shown before the first fix
    pub initial_center: GeoCoordinate,

    /// Simulates location services being switched off at the OS level
    pub location_services_enabled: bool,

    /// Simulates a device policy that forbids location access
    pub location_restricted: bool,

    /// Region extent used when recentering on a fix, in degrees
    pub region_span_degrees: f64,
}

impl Default for AppConfigData {
    fn default() -> Self {
        Self {
            routing_endpoint: "https://router.project-osrm.org".to_string(),
            geolocation_endpoint: "http://ip-api.com/json".to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            fixed_location: None,
            initial_center: GeoCoordinate::new(35.681236, 139.767125),
            location_services_enabled: true,
            location_restricted: false,
            region_span_degrees: DEFAULT_SPAN_DEGREES,
        }
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct AppConfig {
    /// The loaded configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: get_config_path(),
        }
    }
}

/// Resource to notify user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification dialog
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Get the path to the config file (platform-appropriate location)
fn get_config_path() -> PathBuf {
    crate::paths::config_file()
}

/// Parse config JSON. Returns the reset reason when the text is unusable.
pub fn parse_config(json: &str) -> Result<AppConfigData, String> {
    serde_json::from_str(json).map_err(|e| format!("Configuration file was corrupted: {}", e))
}

/// Load configuration from disk.
///
/// Returns the data and, if defaults had to be substituted, why.
fn load_config(config_path: &std::path::Path) -> (AppConfigData, Option<String>) {
    if !config_path.exists() {
        info!("No config file found, using defaults");
        return (AppConfigData::default(), None);
    }

    match std::fs::read_to_string(config_path) {
        Ok(json) => match parse_config(&json) {
            Ok(data) => {
                info!("Loaded config from {:?}", config_path);
                (data, None)
            }
            Err(reason) => {
                warn!("Failed to parse config file: {}", reason);
                (AppConfigData::default(), Some(reason))
            }
        },
        Err(e) => {
            warn!("Failed to read config file: {}", e);
            (
                AppConfigData::default(),
                Some(format!("Could not read configuration file: {}", e)),
            )
        }
    }
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<AppConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    let (data, reset_reason) = load_config(&config.config_path);
    config.data = data;

    // Set notification if config was reset due to an error
    if let Some(reason) = reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .init_resource::<ConfigResetNotification>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_data_default() {
        let data = AppConfigData::default();
        assert!(data.fixed_location.is_none());
        assert!(data.location_services_enabled);
        assert!(!data.location_restricted);
        assert_eq!(data.region_span_degrees, 0.05);
        assert_eq!(data.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let data = parse_config(r#"{ "location_restricted": true }"#).unwrap();
        assert!(data.location_restricted);
        assert_eq!(data.routing_endpoint, AppConfigData::default().routing_endpoint);
    }

    #[test]
    fn test_fixed_location_parsing() {
        let json = r#"{ "fixed_location": { "latitude": 35.0, "longitude": 139.0 } }"#;
        let data = parse_config(json).unwrap();
        assert_eq!(data.fixed_location, Some(GeoCoordinate::new(35.0, 139.0)));
    }

    #[test]
    fn test_corrupted_config_reports_reason() {
        let err = parse_config("{ not json").unwrap_err();
        assert!(err.starts_with("Configuration file was corrupted"));
    }

    #[test]
    fn test_missing_file_uses_defaults_without_notice() {
        let path = std::env::temp_dir().join("pinwalk-test-missing-config.json");
        let _ = std::fs::remove_file(&path);
        let (data, reason) = load_config(&path);
        assert!(reason.is_none());
        assert!(data.location_services_enabled);
    }
}

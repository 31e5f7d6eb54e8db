//! Desktop location service: an in-app consent prompt plus IP geolocation.

use bevy::prelude::*;
use futures_lite::future::{self, Boxed};
use futures_lite::FutureExt;
use serde::Deserialize;
use std::time::Duration;

use super::service::{LocationService, PermissionRequest, SensingError};
use super::state::AuthorizationState;
use crate::config::AppConfigData;
use crate::geo::GeoCoordinate;

pub struct DesktopLocationService {
    agent: ureq::Agent,
    endpoint: String,
    fixed_location: Option<GeoCoordinate>,
    services_enabled: bool,
    restricted: bool,
}

impl DesktopLocationService {
    pub fn from_config(config: &AppConfigData) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("pinwalk/", env!("CARGO_PKG_VERSION")))
            .build();

        Self {
            agent,
            endpoint: config.geolocation_endpoint.clone(),
            fixed_location: config.fixed_location,
            services_enabled: config.location_services_enabled,
            restricted: config.location_restricted,
        }
    }
}

impl LocationService for DesktopLocationService {
    fn services_enabled(&self) -> bool {
        self.services_enabled
    }

    fn request_permission(&mut self) -> PermissionRequest {
        if self.restricted {
            PermissionRequest::Resolved(AuthorizationState::Restricted)
        } else {
            PermissionRequest::Prompt
        }
    }

    fn start_sensing(&mut self) -> Boxed<Result<GeoCoordinate, SensingError>> {
        if let Some(coordinate) = self.fixed_location {
            debug!("Using configured location {}", coordinate);
            return future::ready(Ok(coordinate)).boxed();
        }

        let agent = self.agent.clone();
        let endpoint = self.endpoint.clone();
        debug!("Requesting IP geolocation from {}", endpoint);
        async move { locate_by_ip(&agent, &endpoint) }.boxed()
    }

    fn stop_sensing(&mut self) {
        debug!("Location sensing stopped");
    }
}

/// Response of an IP geolocation service.
///
/// Accepts both the `lat`/`lon` (ip-api.com) and `latitude`/`longitude`
/// (ipwho.is, ipapi.co) spellings.
#[derive(Debug, Deserialize)]
pub struct IpLocationResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, alias = "latitude")]
    pub lat: Option<f64>,
    #[serde(default, alias = "longitude")]
    pub lon: Option<f64>,
}

pub fn parse_ip_location(response: IpLocationResponse) -> Result<GeoCoordinate, SensingError> {
    if let Some(status) = response.status.as_deref()
        && status != "success"
    {
        return Err(SensingError::InvalidResponse(
            response.message.unwrap_or_else(|| status.to_string()),
        ));
    }

    match (response.lat, response.lon) {
        (Some(lat), Some(lon)) if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) => {
            Ok(GeoCoordinate::new(lat, lon))
        }
        (Some(_), Some(_)) => Err(SensingError::InvalidResponse(
            "coordinate out of range".to_string(),
        )),
        _ => Err(SensingError::LocationUnknown),
    }
}

fn locate_by_ip(agent: &ureq::Agent, endpoint: &str) -> Result<GeoCoordinate, SensingError> {
    let response = agent
        .get(endpoint)
        .call()
        .map_err(|e| SensingError::Unavailable(e.to_string()))?;

    let body: IpLocationResponse = response
        .into_json()
        .map_err(|e| SensingError::InvalidResponse(e.to_string()))?;

    parse_ip_location(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<GeoCoordinate, SensingError> {
        parse_ip_location(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_parse_ip_api_success() {
        let json = r#"{"status":"success","country":"Japan","lat":35.6895,"lon":139.6917}"#;
        assert_eq!(parse(json), Ok(GeoCoordinate::new(35.6895, 139.6917)));
    }

    #[test]
    fn test_parse_latitude_longitude_spelling() {
        let json = r#"{"ip":"203.0.113.7","latitude":-33.87,"longitude":151.21}"#;
        assert_eq!(parse(json), Ok(GeoCoordinate::new(-33.87, 151.21)));
    }

    #[test]
    fn test_parse_failure_status() {
        let json = r#"{"status":"fail","message":"reserved range"}"#;
        assert_eq!(
            parse(json),
            Err(SensingError::InvalidResponse("reserved range".to_string()))
        );
    }

    #[test]
    fn test_parse_missing_coordinates() {
        assert_eq!(parse(r#"{"status":"success"}"#), Err(SensingError::LocationUnknown));
    }

    #[test]
    fn test_parse_out_of_range() {
        let json = r#"{"lat":123.0,"lon":10.0}"#;
        assert!(matches!(parse(json), Err(SensingError::InvalidResponse(_))));
    }

    #[test]
    fn test_restricted_config_resolves_without_prompt() {
        let config = AppConfigData {
            location_restricted: true,
            ..Default::default()
        };
        let mut service = DesktopLocationService::from_config(&config);
        assert_eq!(
            service.request_permission(),
            PermissionRequest::Resolved(AuthorizationState::Restricted)
        );
    }

    #[test]
    fn test_fixed_location_is_reported() {
        let fixed = GeoCoordinate::new(35.0, 139.0);
        let config = AppConfigData {
            fixed_location: Some(fixed),
            ..Default::default()
        };
        let mut service = DesktopLocationService::from_config(&config);
        assert_eq!(service.request_permission(), PermissionRequest::Prompt);
        assert_eq!(future::block_on(service.start_sensing()), Ok(fixed));
    }
}

//! Routing backend for the OSRM HTTP API.
//!
//! Request shape:
//! `GET {endpoint}/route/v1/{profile}/{lon},{lat};{lon},{lat}?alternatives=true&overview=full&geometries=geojson`
//!
//! Example response:
//! ```json
//! {
//!   "code": "Ok",
//!   "routes": [
//!     {
//!       "geometry": { "type": "LineString", "coordinates": [[139.0, 35.0], [139.1, 35.1]] },
//!       "distance": 14210.3,
//!       "duration": 10231.9
//!     }
//!   ]
//! }
//! ```

use bevy::prelude::*;
use futures_lite::future::Boxed;
use futures_lite::FutureExt;
use serde::Deserialize;
use std::time::Duration;

use super::backend::{RoutePath, RoutingBackend, RoutingError, TransportMode};
use crate::config::AppConfigData;
use crate::geo::GeoCoordinate;

#[derive(Debug, Deserialize)]
pub struct OsrmResponse {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
pub struct OsrmRoute {
    pub geometry: OsrmGeometry,
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
}

/// GeoJSON LineString; positions are `[longitude, latitude]`
#[derive(Debug, Deserialize)]
pub struct OsrmGeometry {
    pub coordinates: Vec<[f64; 2]>,
}

pub struct OsrmRouter {
    agent: ureq::Agent,
    endpoint: String,
}

impl OsrmRouter {
    pub fn from_config(config: &AppConfigData) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("pinwalk/", env!("CARGO_PKG_VERSION")))
            .build();

        Self {
            agent,
            endpoint: config.routing_endpoint.trim_end_matches('/').to_string(),
        }
    }
}

impl RoutingBackend for OsrmRouter {
    fn compute_route(
        &self,
        source: GeoCoordinate,
        destination: GeoCoordinate,
        mode: TransportMode,
    ) -> Boxed<Result<Vec<RoutePath>, RoutingError>> {
        let agent = self.agent.clone();
        let url = route_url(&self.endpoint, source, destination, mode);
        debug!("Requesting route: {}", url);
        async move { fetch_routes(&agent, &url) }.boxed()
    }
}

pub fn route_url(
    endpoint: &str,
    source: GeoCoordinate,
    destination: GeoCoordinate,
    mode: TransportMode,
) -> String {
    format!(
        "{}/route/v1/{}/{},{};{},{}?alternatives=true&overview=full&geometries=geojson",
        endpoint,
        mode.profile(),
        source.longitude,
        source.latitude,
        destination.longitude,
        destination.latitude
    )
}

/// Convert a decoded OSRM answer into candidate routes
pub fn parse_osrm_response(response: OsrmResponse) -> Result<Vec<RoutePath>, RoutingError> {
    if response.code != "Ok" {
        return Err(RoutingError::Backend {
            message: response.message.unwrap_or_default(),
            code: response.code,
        });
    }

    if response.routes.is_empty() {
        return Err(RoutingError::NoRoutes);
    }

    Ok(response
        .routes
        .into_iter()
        .map(|route| RoutePath {
            points: route
                .geometry
                .coordinates
                .into_iter()
                .map(|[lon, lat]| GeoCoordinate::new(lat, lon))
                .collect(),
            distance: route.distance,
            duration: route.duration,
        })
        .collect())
}

fn fetch_routes(agent: &ureq::Agent, url: &str) -> Result<Vec<RoutePath>, RoutingError> {
    let response = match agent.get(url).call() {
        Ok(resp) => resp,
        // OSRM reports NoRoute and friends as 400 with a JSON body
        Err(ureq::Error::Status(status, resp)) => {
            return match resp.into_json::<OsrmResponse>() {
                Ok(body) => parse_osrm_response(body),
                Err(_) => Err(RoutingError::Backend {
                    code: status.to_string(),
                    message: "HTTP error".to_string(),
                }),
            };
        }
        Err(e) => return Err(RoutingError::Transport(e.to_string())),
    };

    let body: OsrmResponse = response
        .into_json()
        .map_err(|e| RoutingError::InvalidResponse(e.to_string()))?;

    parse_osrm_response(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Vec<RoutePath>, RoutingError> {
        parse_osrm_response(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_route_url_orders_lon_lat() {
        let url = route_url(
            "https://router.example.org",
            GeoCoordinate::new(35.0, 139.0),
            GeoCoordinate::new(35.1, 139.1),
            TransportMode::Walking,
        );
        assert_eq!(
            url,
            "https://router.example.org/route/v1/foot/139,35;139.1,35.1\
             ?alternatives=true&overview=full&geometries=geojson"
        );
    }

    #[test]
    fn test_endpoint_trailing_slash_trimmed() {
        let config = AppConfigData {
            routing_endpoint: "http://localhost:5000/".to_string(),
            ..Default::default()
        };
        let router = OsrmRouter::from_config(&config);
        assert_eq!(router.endpoint, "http://localhost:5000");
    }

    #[test]
    fn test_parse_two_candidates_keeps_order() {
        let json = r#"{
            "code": "Ok",
            "routes": [
                { "geometry": { "type": "LineString", "coordinates": [[139.0, 35.0], [139.05, 35.05], [139.1, 35.1]] },
                  "distance": 15000.0, "duration": 10800.0 },
                { "geometry": { "type": "LineString", "coordinates": [[139.0, 35.0], [139.1, 35.1]] },
                  "distance": 16000.0, "duration": 11500.0 }
            ],
            "waypoints": []
        }"#;

        let routes = parse(json).unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].points.len(), 3);
        assert_eq!(routes[0].points[1], GeoCoordinate::new(35.05, 139.05));
        assert_eq!(routes[0].distance, 15000.0);
        assert_eq!(routes[1].duration, 11500.0);
    }

    #[test]
    fn test_parse_backend_error() {
        let json = r#"{ "code": "NoRoute", "message": "Impossible route between points" }"#;
        assert_eq!(
            parse(json),
            Err(RoutingError::Backend {
                code: "NoRoute".to_string(),
                message: "Impossible route between points".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_empty_routes() {
        assert_eq!(parse(r#"{ "code": "Ok", "routes": [] }"#), Err(RoutingError::NoRoutes));
    }
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::config::RoutingConfig;
use crate::model::LatLng;
use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    #[error("Routing request failed: {0}")]
    Network(String),
    #[error("Routing service returned HTTP {0}")]
    Status(u16),
    #[error("No route found: {0}")]
    NoRoute(String),
    #[error("Malformed routing response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for RouteError {
    fn from(e: reqwest::Error) -> Self {
        RouteError::Network(e.to_string())
    }
}

/// A computed path, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePath {
    pub distance_m: f64,
    pub duration_s: f64,
    pub points: Vec<LatLng>,
}

/// Turn-by-turn routing between two points. The travel profile is part of
/// the service's configuration, not of each request.
#[async_trait]
pub trait RoutingService: Send + Sync {
    async fn route(&self, from: LatLng, to: LatLng) -> Result<RoutePath, RouteError>;
}

#[derive(Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: OsrmGeometry,
}

#[derive(Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

/// Parses an OSRM `route/v1` body requested with `geometries=geojson`.
pub fn parse_route_response(body: &str) -> Result<RoutePath, RouteError> {
    let parsed: OsrmResponse =
        serde_json::from_str(body).map_err(|e| RouteError::Malformed(e.to_string()))?;

    if parsed.code != "Ok" {
        return Err(RouteError::NoRoute(parsed.message.unwrap_or(parsed.code)));
    }

    let route = parsed
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| RouteError::NoRoute("response contained no routes".to_string()))?;

    // GeoJSON order is [lng, lat]
    let points = route
        .geometry
        .coordinates
        .iter()
        .map(|[lng, lat]| LatLng::new(*lat, *lng))
        .collect();

    Ok(RoutePath {
        distance_m: route.distance,
        duration_s: route.duration,
        points,
    })
}

/// Client for an OSRM-compatible HTTP routing service.
pub struct OsrmRouter {
    client: reqwest::Client,
    service_url: String,
    profile: String,
}

impl OsrmRouter {
    pub fn new(
        service_url: impl Into<String>,
        profile: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, RouteError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("campus-nav/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            service_url: service_url.into().trim_end_matches('/').to_string(),
            profile: profile.into(),
        })
    }

    pub fn from_config(config: &RoutingConfig) -> Result<Self, RouteError> {
        Self::new(
            config.service_url.clone(),
            config.profile.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn route_url(&self, from: LatLng, to: LatLng) -> String {
        format!(
            "{}/{}/{},{};{},{}?overview=full&geometries=geojson&steps=false",
            self.service_url, self.profile, from.lng, from.lat, to.lng, to.lat
        )
    }
}

#[async_trait]
impl RoutingService for OsrmRouter {
    async fn route(&self, from: LatLng, to: LatLng) -> Result<RoutePath, RouteError> {
        let url = self.route_url(from, to);
        info!("Requesting route — profile={} url={}", self.profile, url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!("Routing response — status={} bytes={}", status, body.len());

        match parse_route_response(&body) {
            Ok(path) => Ok(path),
            // OSRM reports NoRoute and friends as 400 with a JSON body
            Err(e @ RouteError::NoRoute(_)) => Err(e),
            Err(_) if !status.is_success() => Err(RouteError::Status(status.as_u16())),
            Err(e) => Err(e),
        }
    }
}

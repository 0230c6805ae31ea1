// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! What the map shows, independent of how it is drawn.

use crate::config::MapConfig;
use crate::model::{Department, DepartmentType, LatLng};
use crate::routing::RouteStatus;
use crate::selection::{EndpointRole, SelectionState};
use serde::Serialize;

// --- Slippy Map / Mercator Math ---
pub const TILE_SIZE: f64 = 256.0;
pub const MAX_ZOOM: u8 = 19;

pub fn lon_to_x(lon: f64, zoom: f64) -> f64 {
    ((lon + 180.0) / 360.0) * 2.0f64.powf(zoom) * TILE_SIZE
}

pub fn lat_to_y(lat: f64, zoom: f64) -> f64 {
    let lat_rad = lat.to_radians();
    (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI) / 2.0
        * 2.0f64.powf(zoom)
        * TILE_SIZE
}

/// Highest integer zoom at which every point fits in a viewport of
/// `width` x `height` pixels.
pub fn fit_zoom(points: &[LatLng], width: f64, height: f64) -> u8 {
    if points.len() < 2 {
        return MAX_ZOOM;
    }
    let (mut min_x, mut max_x) = (f64::MAX, f64::MIN);
    let (mut min_y, mut max_y) = (f64::MAX, f64::MIN);
    for p in points {
        let x = lon_to_x(p.lng, 0.0);
        let y = lat_to_y(p.lat, 0.0);
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    // Each zoom level doubles the pixel span
    (0..=MAX_ZOOM)
        .rev()
        .find(|z| {
            let scale = 2.0f64.powi(*z as i32);
            (max_x - min_x) * scale <= width && (max_y - min_y) * scale <= height
        })
        .unwrap_or(0)
}

fn midpoint(points: &[LatLng]) -> Option<LatLng> {
    let first = points.first()?;
    let (mut min, mut max) = (*first, *first);
    for p in points {
        min.lat = min.lat.min(p.lat);
        min.lng = min.lng.min(p.lng);
        max.lat = max.lat.max(p.lat);
        max.lng = max.lng.max(p.lng);
    }
    Some(LatLng::new((min.lat + max.lat) / 2.0, (min.lng + max.lng) / 2.0))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub department_id: String,
    pub position: LatLng,
    pub label: String,
    pub selected: bool,
    pub endpoint: Option<EndpointRole>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapScene {
    pub center: LatLng,
    pub zoom: u8,
    pub markers: Vec<Marker>,
    /// Drawn route, when one is ready.
    pub route: Option<Vec<LatLng>>,
    /// Shown next to the map when the last routing attempt failed.
    pub route_error: Option<String>,
}

/// Viewport size used when fitting the map to a route.
pub const VIEWPORT: (f64, f64) = (1024.0, 720.0);

impl MapScene {
    /// Markers for the filtered departments; the view centres on the first
    /// one, or on the configured default, and zooms to fit a ready route.
    pub fn build(
        filtered: &[Department],
        selection: &SelectionState,
        route: &RouteStatus,
        config: &MapConfig,
    ) -> Self {
        let markers = filtered
            .iter()
            .map(|d| Marker {
                department_id: d.id.clone(),
                position: d.position(),
                label: d.code.clone(),
                selected: selection.selected_department_id.as_deref() == Some(d.id.as_str()),
                endpoint: if selection.from_id.as_deref() == Some(d.id.as_str()) {
                    Some(EndpointRole::From)
                } else if selection.to_id.as_deref() == Some(d.id.as_str()) {
                    Some(EndpointRole::To)
                } else {
                    None
                },
            })
            .collect();

        let mut center = filtered
            .first()
            .map(Department::position)
            .unwrap_or(config.default_center);
        let mut zoom = config.zoom;

        let route_line = match route {
            RouteStatus::Ready(_, path) if !path.points.is_empty() => {
                if let Some(mid) = midpoint(&path.points) {
                    center = mid;
                    zoom = fit_zoom(&path.points, VIEWPORT.0, VIEWPORT.1);
                }
                Some(path.points.clone())
            }
            _ => None,
        };

        Self {
            center,
            zoom,
            markers,
            route: route_line,
            route_error: route.error().map(|e| e.to_string()),
        }
    }

    /// Resolves a marker click to its department id.
    pub fn marker_at(&self, index: usize) -> Option<&str> {
        self.markers.get(index).map(|m| m.department_id.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacilityBadge {
    pub name: String,
    pub available: bool,
}

/// Contents of the popup attached to a marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentPopup {
    pub id: String,
    pub name: String,
    pub kind: DepartmentType,
    pub code: String,
    pub description: String,
    pub facilities: Vec<FacilityBadge>,
    pub faculty_count: u32,
    pub image_urls: Vec<String>,
}

impl From<&Department> for DepartmentPopup {
    fn from(d: &Department) -> Self {
        Self {
            id: d.id.clone(),
            name: d.name.clone(),
            kind: d.kind,
            code: d.code.clone(),
            description: d.description.clone(),
            facilities: d
                .facilities
                .iter()
                .map(|f| FacilityBadge {
                    name: f.name.clone(),
                    available: f.available,
                })
                .collect(),
            faculty_count: d.faculty_count,
            image_urls: d.image_urls.clone(),
        }
    }
}

/// Campus-wide totals, computed over the unfiltered dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CampusStats {
    pub departments: usize,
    pub faculty: u32,
    pub engineering: usize,
}

impl CampusStats {
    pub fn compute(departments: &[Department]) -> Self {
        Self {
            departments: departments.len(),
            faculty: departments.iter().map(|d| d.faculty_count).sum(),
            engineering: departments
                .iter()
                .filter(|d| d.kind == DepartmentType::Engineering)
                .count(),
        }
    }
}

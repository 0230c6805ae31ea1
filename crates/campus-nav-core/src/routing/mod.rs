// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

pub mod osrm;

pub use osrm::{parse_route_response, OsrmRouter, RouteError, RoutePath, RoutingService};

use crate::model::{Department, LatLng};
use log::{debug, info, warn};

/// Opaque id for a route layer living on a [`MapSurface`]. Not `Clone`:
/// the controller holds the only copy and gives it back exactly once.
#[derive(Debug, PartialEq, Eq)]
pub struct OverlayHandle(u64);

impl OverlayHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// The external map that shows the route line.
pub trait MapSurface {
    /// Creates the route layer between two waypoints. The line is drawn later.
    fn acquire_overlay(&mut self, waypoints: [LatLng; 2]) -> OverlayHandle;
    fn draw_route(&mut self, handle: &OverlayHandle, path: &RoutePath);
    fn release_overlay(&mut self, handle: OverlayHandle);
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoutePair {
    pub from_id: String,
    pub to_id: String,
    pub from: LatLng,
    pub to: LatLng,
}

impl RoutePair {
    /// Both departments must be distinct and carry usable coordinates.
    pub fn between(from: &Department, to: &Department) -> Option<Self> {
        if from.id == to.id || !from.has_valid_position() || !to.has_valid_position() {
            return None;
        }
        Some(Self {
            from_id: from.id.clone(),
            to_id: to.id.clone(),
            from: from.position(),
            to: to.position(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteStatus {
    Idle,
    /// Overlay placed, waiting on the routing service.
    Routing(RoutePair),
    Ready(RoutePair, RoutePath),
    /// Last attempt failed; no overlay is held.
    Failed(RoutePair, RouteError),
}

impl RouteStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, RouteStatus::Routing(_) | RouteStatus::Ready(..))
    }

    pub fn pair(&self) -> Option<&RoutePair> {
        match self {
            RouteStatus::Idle => None,
            RouteStatus::Routing(pair) | RouteStatus::Ready(pair, _) | RouteStatus::Failed(pair, _) => {
                Some(pair)
            }
        }
    }

    pub fn error(&self) -> Option<&RouteError> {
        match self {
            RouteStatus::Failed(_, e) => Some(e),
            _ => None,
        }
    }
}

/// A routing request issued by [`RouteOverlayController::set_endpoints`].
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTicket {
    generation: u64,
    pair: RoutePair,
}

impl RouteTicket {
    pub fn pair(&self) -> &RoutePair {
        &self.pair
    }

    pub async fn fetch(&self, service: &dyn RoutingService) -> Result<RoutePath, RouteError> {
        service.route(self.pair.from, self.pair.to).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteUpdate {
    Applied,
    /// The endpoints moved on before the response arrived.
    Stale,
}

/// Owns the single route layer on the map.
///
/// Every endpoint change tears the previous layer down before a new one is
/// placed, so at most one layer exists at any time. Responses are matched to
/// requests by generation; a response for an older generation is dropped.
pub struct RouteOverlayController<M: MapSurface> {
    surface: M,
    overlay: Option<OverlayHandle>,
    status: RouteStatus,
    generation: u64,
}

impl<M: MapSurface> RouteOverlayController<M> {
    pub fn new(surface: M) -> Self {
        Self {
            surface,
            overlay: None,
            status: RouteStatus::Idle,
            generation: 0,
        }
    }

    pub fn status(&self) -> &RouteStatus {
        &self.status
    }

    pub fn surface(&self) -> &M {
        &self.surface
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// Reconciles the overlay with the current endpoints.
    ///
    /// Returns a ticket when a new request must be made. Re-sending the pair
    /// that is already routing or drawn is a no-op; re-sending a pair that
    /// failed retries it.
    pub fn set_endpoints(
        &mut self,
        from: Option<&Department>,
        to: Option<&Department>,
    ) -> Option<RouteTicket> {
        let next = match (from, to) {
            (Some(a), Some(b)) => RoutePair::between(a, b),
            _ => None,
        };

        if self.status.is_active() && next.as_ref() == self.status.pair() {
            return None;
        }

        self.release();
        self.generation += 1;

        let Some(pair) = next else {
            self.status = RouteStatus::Idle;
            return None;
        };

        let handle = self.surface.acquire_overlay([pair.from, pair.to]);
        info!(
            "Route overlay placed — from={} to={} overlay={}",
            pair.from_id,
            pair.to_id,
            handle.id()
        );
        self.overlay = Some(handle);
        self.status = RouteStatus::Routing(pair.clone());
        Some(RouteTicket {
            generation: self.generation,
            pair,
        })
    }

    pub fn apply_response(
        &mut self,
        ticket: &RouteTicket,
        result: Result<RoutePath, RouteError>,
    ) -> RouteUpdate {
        if ticket.generation != self.generation || !matches!(self.status, RouteStatus::Routing(_)) {
            debug!(
                "Discarding stale route response — from={} to={} generation={} current={}",
                ticket.pair.from_id, ticket.pair.to_id, ticket.generation, self.generation
            );
            return RouteUpdate::Stale;
        }

        match result {
            Ok(path) => {
                if let Some(handle) = &self.overlay {
                    self.surface.draw_route(handle, &path);
                }
                info!(
                    "Route ready — from={} to={} distance_m={:.0} points={}",
                    ticket.pair.from_id,
                    ticket.pair.to_id,
                    path.distance_m,
                    path.points.len()
                );
                self.status = RouteStatus::Ready(ticket.pair.clone(), path);
            }
            Err(e) => {
                warn!(
                    "Routing failed — from={} to={} error={}",
                    ticket.pair.from_id, ticket.pair.to_id, e
                );
                self.release();
                self.status = RouteStatus::Failed(ticket.pair.clone(), e);
            }
        }
        RouteUpdate::Applied
    }

    /// Sets endpoints and waits for the route in one step.
    pub async fn route(
        &mut self,
        from: Option<&Department>,
        to: Option<&Department>,
        service: &dyn RoutingService,
    ) -> &RouteStatus {
        if let Some(ticket) = self.set_endpoints(from, to) {
            let result = ticket.fetch(service).await;
            self.apply_response(&ticket, result);
        }
        &self.status
    }

    /// Drops the overlay and invalidates any request in flight.
    pub fn clear(&mut self) {
        self.release();
        self.generation += 1;
        self.status = RouteStatus::Idle;
    }

    fn release(&mut self) {
        if let Some(handle) = self.overlay.take() {
            debug!("Releasing route overlay — overlay={}", handle.id());
            self.surface.release_overlay(handle);
        }
    }
}

impl<M: MapSurface> Drop for RouteOverlayController<M> {
    fn drop(&mut self) {
        self.release();
    }
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::config::Config;
use crate::data_source::DataSource;
use crate::export::{StaffDocument, StaffRosterExporter};
use crate::filter::filter_departments;
use crate::map_view::{CampusStats, DepartmentPopup, MapScene};
use crate::model::{find_department, Department, StaffMember};
use crate::routing::{
    MapSurface, RouteError, RouteOverlayController, RoutePair, RoutePath, RouteStatus,
    RouteTicket, RouteUpdate, RoutingService,
};
use crate::selection::{AppEvent, SelectionState};
use crate::voice::{VoiceOutcome, VoiceSearchController};
use log::{error, info, warn};
use std::sync::Arc;

/// Central controller for one browsing session.
///
/// Every user action comes in through [`Navigator::dispatch`]. The selection
/// is updated with the pure reducer, then the route overlay is reconciled
/// against the new endpoints. Endpoints resolve against the filtered list:
/// a route is only shown between departments that have markers.
pub struct Navigator<M: MapSurface> {
    source: Arc<dyn DataSource>,
    departments: Vec<Department>,
    selection: SelectionState,
    route: RouteOverlayController<M>,
    exporter: StaffRosterExporter,
    config: Config,
}

impl<M: MapSurface> Navigator<M> {
    /// Loads the department list. A failing source leaves the map empty
    /// rather than failing the session.
    pub async fn load(source: Arc<dyn DataSource>, surface: M, config: Config) -> Self {
        let departments = match source.list_departments().await {
            Ok(list) => list,
            Err(e) => {
                error!("Failed to load departments — error={}", e);
                Vec::new()
            }
        };
        info!("Navigator ready — departments={}", departments.len());

        Self {
            source,
            departments,
            selection: SelectionState::new(),
            route: RouteOverlayController::new(surface),
            exporter: StaffRosterExporter::default(),
            config,
        }
    }

    pub fn with_exporter(mut self, exporter: StaffRosterExporter) -> Self {
        self.exporter = exporter;
        self
    }

    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn department(&self, id: &str) -> Option<&Department> {
        find_department(&self.departments, id)
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn route_status(&self) -> &RouteStatus {
        self.route.status()
    }

    pub fn surface(&self) -> &M {
        self.route.surface()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn filtered(&self) -> Vec<Department> {
        filter_departments(
            &self.departments,
            &self.selection.search_text,
            self.selection.type_filter,
        )
    }

    pub fn scene(&self) -> MapScene {
        MapScene::build(
            &self.filtered(),
            &self.selection,
            self.route.status(),
            &self.config.map,
        )
    }

    pub fn stats(&self) -> CampusStats {
        CampusStats::compute(&self.departments)
    }

    pub fn popup(&self, id: &str) -> Option<DepartmentPopup> {
        self.department(id).map(DepartmentPopup::from)
    }

    /// Applies one user action. Returns a routing request when the endpoints
    /// now describe a new route; the caller fetches it and hands the result
    /// to [`Navigator::apply_route_response`].
    ///
    /// Re-sending an endpoint retries a failed route. Filter changes only
    /// reroute when the visible pair changes.
    pub fn dispatch(&mut self, event: AppEvent) -> Option<RouteTicket> {
        self.selection = std::mem::take(&mut self.selection).apply(&event);

        match event {
            AppEvent::RouteCleared => {
                self.route.clear();
                None
            }
            AppEvent::RouteEndpointSet { .. } => self.reconcile_route(true),
            AppEvent::SearchChanged(_)
            | AppEvent::TypeFilterChanged(_)
            | AppEvent::VoiceSearchCompleted(_) => self.reconcile_route(false),
            AppEvent::DepartmentFocused(_)
            | AppEvent::DepartmentSelected(_)
            | AppEvent::StaffPanelOpened
            | AppEvent::StaffPanelClosed => None,
        }
    }

    fn reconcile_route(&mut self, retry_failed: bool) -> Option<RouteTicket> {
        let visible = self.filtered();
        let from = self
            .selection
            .from_id
            .as_deref()
            .and_then(|id| find_department(&visible, id));
        let to = self
            .selection
            .to_id
            .as_deref()
            .and_then(|id| find_department(&visible, id));

        if !retry_failed {
            if let RouteStatus::Failed(failed, _) = self.route.status() {
                let next = match (from, to) {
                    (Some(a), Some(b)) => RoutePair::between(a, b),
                    _ => None,
                };
                if next.as_ref() == Some(failed) {
                    return None;
                }
            }
        }
        self.route.set_endpoints(from, to)
    }

    pub fn apply_route_response(
        &mut self,
        ticket: &RouteTicket,
        result: Result<RoutePath, RouteError>,
    ) -> RouteUpdate {
        self.route.apply_response(ticket, result)
    }

    /// Dispatches and, if a route is needed, waits for it.
    pub async fn dispatch_and_route(
        &mut self,
        event: AppEvent,
        service: &dyn RoutingService,
    ) -> &RouteStatus {
        if let Some(ticket) = self.dispatch(event) {
            let result = ticket.fetch(service).await;
            self.route.apply_response(&ticket, result);
        }
        self.route.status()
    }

    /// Roster for `department_id`. Source failures degrade to an empty list.
    pub async fn roster(&self, department_id: &str) -> Vec<StaffMember> {
        match self.source.list_staff(department_id).await {
            Ok(staff) => staff,
            Err(e) => {
                warn!(
                    "Failed to load staff — department={} error={}",
                    department_id, e
                );
                Vec::new()
            }
        }
    }

    /// The department whose staff panel is open, with its roster.
    pub async fn staff_panel(&self) -> Option<(Department, Vec<StaffMember>)> {
        let dept = self
            .selection
            .staff_panel_department(&self.departments)?
            .clone();
        let staff = self.roster(&dept.id).await;
        Some((dept, staff))
    }

    /// Lays out the selected department's roster. With nothing selected the
    /// document is empty and carries the generic title.
    pub async fn export_selected_staff(&self) -> StaffDocument {
        match self.selection.selected_department(&self.departments) {
            Some(dept) => {
                let staff = self.roster(&dept.id).await;
                self.exporter.export(Some(&dept.name), &staff)
            }
            None => self.exporter.export(None, &[]),
        }
    }

    /// Runs a voice search and feeds any recognised text into the search box.
    /// The new search may bring a route back into view, hence `service`.
    pub async fn voice_search(
        &mut self,
        voice: &VoiceSearchController,
        service: &dyn RoutingService,
    ) -> VoiceOutcome {
        let outcome = voice.start().await;
        if let Some(text) = outcome.search_text() {
            let event = AppEvent::VoiceSearchCompleted(text.to_string());
            self.dispatch_and_route(event, service).await;
        }
        outcome
    }
}

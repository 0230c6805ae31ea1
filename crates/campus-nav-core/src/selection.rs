// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::model::{find_department, Department, TypeFilter};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndpointRole {
    From,
    To,
}

/// Every user action that can change the browsing state.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Marker click: inspect a department without opening its roster.
    DepartmentFocused(String),
    /// "View Staff": inspect a department and open its roster.
    DepartmentSelected(String),
    StaffPanelOpened,
    StaffPanelClosed,
    RouteEndpointSet { role: EndpointRole, id: String },
    RouteCleared,
    SearchChanged(String),
    TypeFilterChanged(TypeFilter),
    VoiceSearchCompleted(String),
}

/// Browsing state for one session. Mutators consume the state and return the
/// next one; ids are stored as given and resolved lazily by consumers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    pub selected_department_id: Option<String>,
    pub staff_panel_open: bool,
    pub from_id: Option<String>,
    pub to_id: Option<String>,
    pub search_text: String,
    pub type_filter: TypeFilter,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_department(self, id: impl Into<String>) -> Self {
        Self {
            selected_department_id: Some(id.into()),
            staff_panel_open: true,
            ..self
        }
    }

    pub fn focus_department(self, id: impl Into<String>) -> Self {
        Self {
            selected_department_id: Some(id.into()),
            ..self
        }
    }

    pub fn open_staff_panel(self) -> Self {
        Self {
            staff_panel_open: true,
            ..self
        }
    }

    pub fn close_staff_panel(self) -> Self {
        Self {
            staff_panel_open: false,
            ..self
        }
    }

    pub fn set_from(self, id: impl Into<String>) -> Self {
        Self {
            from_id: Some(id.into()),
            ..self
        }
    }

    pub fn set_to(self, id: impl Into<String>) -> Self {
        Self {
            to_id: Some(id.into()),
            ..self
        }
    }

    /// Resets the route endpoints only.
    pub fn clear_route(self) -> Self {
        Self {
            from_id: None,
            to_id: None,
            ..self
        }
    }

    pub fn set_search(self, text: impl Into<String>) -> Self {
        Self {
            search_text: text.into(),
            ..self
        }
    }

    pub fn set_type_filter(self, type_filter: TypeFilter) -> Self {
        Self {
            type_filter,
            ..self
        }
    }

    pub fn apply(self, event: &AppEvent) -> Self {
        match event {
            AppEvent::DepartmentFocused(id) => self.focus_department(id.as_str()),
            AppEvent::DepartmentSelected(id) => self.select_department(id.as_str()),
            AppEvent::StaffPanelOpened => self.open_staff_panel(),
            AppEvent::StaffPanelClosed => self.close_staff_panel(),
            AppEvent::RouteEndpointSet {
                role: EndpointRole::From,
                id,
            } => self.set_from(id.as_str()),
            AppEvent::RouteEndpointSet {
                role: EndpointRole::To,
                id,
            } => self.set_to(id.as_str()),
            AppEvent::RouteCleared => self.clear_route(),
            AppEvent::SearchChanged(text) | AppEvent::VoiceSearchCompleted(text) => {
                self.set_search(text.as_str())
            }
            AppEvent::TypeFilterChanged(filter) => self.set_type_filter(*filter),
        }
    }

    pub fn endpoints(&self) -> (Option<&str>, Option<&str>) {
        (self.from_id.as_deref(), self.to_id.as_deref())
    }

    /// The inspected department, or `None` when nothing is selected or the id
    /// no longer resolves.
    pub fn selected_department<'a>(&self, departments: &'a [Department]) -> Option<&'a Department> {
        let id = self.selected_department_id.as_deref()?;
        find_department(departments, id)
    }

    /// Department whose roster panel is showing, if any.
    pub fn staff_panel_department<'a>(
        &self,
        departments: &'a [Department],
    ) -> Option<&'a Department> {
        if !self.staff_panel_open {
            return None;
        }
        self.selected_department(departments)
    }

    pub fn is_staff_panel_open_for(&self, departments: &[Department], id: &str) -> bool {
        self.staff_panel_department(departments)
            .is_some_and(|d| d.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_data::campus_departments;
    use crate::model::DepartmentType;

    #[test]
    fn test_select_opens_staff_panel_but_focus_does_not() {
        let depts = campus_departments();

        let state = SelectionState::new().focus_department("2");
        assert_eq!(state.selected_department(&depts).unwrap().code, "IT");
        assert!(!state.is_staff_panel_open_for(&depts, "2"));

        let state = state.select_department("4");
        assert!(state.is_staff_panel_open_for(&depts, "4"));
        assert!(!state.is_staff_panel_open_for(&depts, "2"));

        let state = state.close_staff_panel();
        assert!(state.staff_panel_department(&depts).is_none());
        assert_eq!(state.selected_department_id.as_deref(), Some("4"));
    }

    #[test]
    fn test_unknown_id_behaves_as_deselected() {
        let depts = campus_departments();
        let state = SelectionState::new().select_department("missing");
        assert!(state.selected_department(&depts).is_none());
        assert!(state.staff_panel_department(&depts).is_none());
    }

    #[test]
    fn test_clear_route_keeps_everything_else() {
        let state = SelectionState::new()
            .set_search("block")
            .set_type_filter(TypeFilter::Only(DepartmentType::Arts))
            .select_department("1")
            .set_from("1")
            .set_to("2");
        assert_eq!(state.endpoints(), (Some("1"), Some("2")));

        let cleared = state.clone().clear_route();
        assert_eq!(cleared.endpoints(), (None, None));
        assert_eq!(cleared.search_text, "block");
        assert_eq!(cleared.type_filter, state.type_filter);
        assert_eq!(cleared.selected_department_id.as_deref(), Some("1"));
        assert!(cleared.staff_panel_open);
    }

    #[test]
    fn test_apply_maps_events_to_mutators() {
        let events = [
            AppEvent::SearchChanged("it".to_string()),
            AppEvent::RouteEndpointSet {
                role: EndpointRole::From,
                id: "1".to_string(),
            },
            AppEvent::RouteEndpointSet {
                role: EndpointRole::To,
                id: "6".to_string(),
            },
            AppEvent::DepartmentFocused("3".to_string()),
            AppEvent::VoiceSearchCompleted("civil".to_string()),
            AppEvent::TypeFilterChanged(TypeFilter::Only(DepartmentType::Engineering)),
        ];

        let state = events
            .iter()
            .fold(SelectionState::new(), |state, event| state.apply(event));

        assert_eq!(state.search_text, "civil");
        assert_eq!(state.endpoints(), (Some("1"), Some("6")));
        assert_eq!(state.selected_department_id.as_deref(), Some("3"));
        assert!(!state.staff_panel_open);
        assert_eq!(
            state.type_filter,
            TypeFilter::Only(DepartmentType::Engineering)
        );

        let state = state.apply(&AppEvent::RouteCleared);
        assert_eq!(state.endpoints(), (None, None));
    }
}

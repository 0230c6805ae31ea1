// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepartmentType {
    Engineering,
    Science,
    Arts,
    Administration,
    Other,
}

impl DepartmentType {
    pub const ALL: [DepartmentType; 5] = [
        DepartmentType::Engineering,
        DepartmentType::Science,
        DepartmentType::Arts,
        DepartmentType::Administration,
        DepartmentType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DepartmentType::Engineering => "Engineering",
            DepartmentType::Science => "Science",
            DepartmentType::Arts => "Arts",
            DepartmentType::Administration => "Administration",
            DepartmentType::Other => "Other",
        }
    }
}

impl fmt::Display for DepartmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The type dropdown: either a concrete department type or the `All` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TypeFilter {
    #[default]
    All,
    Only(DepartmentType),
}

impl TypeFilter {
    pub fn matches(&self, kind: DepartmentType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(wanted) => *wanted == kind,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => f.write_str("All"),
            TypeFilter::Only(kind) => kind.fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTypeFilter(pub String);

impl fmt::Display for UnknownTypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown department type '{}' (expected All, Engineering, Science, Arts, Administration or Other)",
            self.0
        )
    }
}

impl std::error::Error for UnknownTypeFilter {}

impl FromStr for TypeFilter {
    type Err = UnknownTypeFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if wanted.eq_ignore_ascii_case("all") {
            return Ok(TypeFilter::All);
        }
        DepartmentType::ALL
            .iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .map(|kind| TypeFilter::Only(*kind))
            .ok_or_else(|| UnknownTypeFilter(wanted.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub name: String,
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: String,
    pub name: String,
    pub code: String,
    pub description: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "type")]
    pub kind: DepartmentType,
    #[serde(default)]
    pub facilities: Vec<Facility>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub faculty_count: u32,
}

impl Department {
    pub fn position(&self) -> LatLng {
        LatLng {
            lat: self.lat,
            lng: self.lng,
        }
    }

    /// True when the position is a usable degree coordinate.
    pub fn has_valid_position(&self) -> bool {
        self.position().is_valid()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: String,
    pub department_id: String,
    pub name: String,
    pub designation: String,
    pub qualification: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Looks a department up by id. Absent ids resolve to `None`, never an error.
pub fn find_department<'a>(departments: &'a [Department], id: &str) -> Option<&'a Department> {
    departments.iter().find(|d| d.id == id)
}

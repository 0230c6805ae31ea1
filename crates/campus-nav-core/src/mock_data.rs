// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Built-in demo campus. Stands in for a real backend until one exists.

use crate::data_source::{DataError, DataSource};
use crate::model::{Department, DepartmentType, Facility, LatLng, StaffMember};
use async_trait::async_trait;
use log::debug;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const CAMPUS_CENTER: LatLng = LatLng {
    lat: 11.2749,
    lng: 77.6099,
};

const ROSTER_SIZE: usize = 10;
const INITIALS: [&str; 5] = ["A.", "S.", "K.", "M.", "L."];
const SURNAMES: [&str; 5] = ["Kumar", "Priya", "Anand", "Selvi", "Rao"];
const QUALIFICATIONS: [&str; 5] = ["Ph.D", "M.E", "M.Tech", "M.S", "B.E"];
const IMAGE_URLS: [&str; 2] = [
    "https://images.unsplash.com/photo-1523050854058-8df90110c9f1?q=80&w=1600&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1523580846011-d3a5bc25702b?q=80&w=1600&auto=format&fit=crop",
];

fn make_department(
    id: u32,
    name: &str,
    code: &str,
    dlat: f64,
    dlng: f64,
    kind: DepartmentType,
) -> Department {
    Department {
        id: id.to_string(),
        name: name.to_string(),
        code: code.to_string(),
        description: format!("{} offering programs and research opportunities.", name),
        lat: CAMPUS_CENTER.lat + dlat,
        lng: CAMPUS_CENTER.lng + dlng,
        kind,
        facilities: vec![
            Facility {
                name: "Seminar Hall".to_string(),
                available: true,
                image_url: None,
            },
            Facility {
                name: "Conference Hall".to_string(),
                available: id % 2 == 0,
                image_url: None,
            },
            Facility {
                name: "Library Section".to_string(),
                available: id % 3 != 0,
                image_url: None,
            },
        ],
        image_urls: IMAGE_URLS.iter().map(|s| s.to_string()).collect(),
        faculty_count: 10 + id % 5,
    }
}

pub fn campus_departments() -> Vec<Department> {
    use DepartmentType::*;
    vec![
        make_department(1, "CTUG Block", "CTUG", 0.0012, 0.001, Engineering),
        make_department(2, "IT Block", "IT", 0.0002, -0.0006, Engineering),
        make_department(3, "Science & Humanities", "SH", -0.0006, 0.0008, Science),
        make_department(4, "MBA Block", "MBA", 0.0016, -0.0002, Arts),
        make_department(5, "Admin Block", "ADMIN", -0.0002, -0.0005, Administration),
        make_department(6, "Mechanical Dept", "MECH", -0.001, -0.0001, Engineering),
        make_department(7, "Civil Dept", "CIV", 0.0007, -0.001, Engineering),
    ]
}

fn generate_roster(department_id: &str) -> Vec<StaffMember> {
    (0..ROSTER_SIZE)
        .map(|i| StaffMember {
            id: format!("{}-{}", department_id, i + 1),
            department_id: department_id.to_string(),
            name: format!("Dr. {} {}", INITIALS[i % 5], SURNAMES[i % 5]),
            designation: match i {
                0 => "HOD",
                1 | 2 => "Associate Professor",
                _ => "Assistant Professor",
            }
            .to_string(),
            qualification: QUALIFICATIONS[i % 5].to_string(),
            email: format!("faculty{}@college.edu", i + 1),
            photo_url: Some(format!("https://i.pravatar.cc/96?img={}", (i % 70) + 1)),
        })
        .collect()
}

/// In-memory campus with rosters generated on every call.
/// Wrap it in [`crate::cache::StaffCache`] to generate each roster once.
pub struct MockDataSource {
    departments: Vec<Department>,
    generated: AtomicUsize,
}

impl Default for MockDataSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDataSource {
    pub fn new() -> Self {
        Self {
            departments: campus_departments(),
            generated: AtomicUsize::new(0),
        }
    }

    /// How many rosters have been generated so far.
    pub fn generated_rosters(&self) -> usize {
        self.generated.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataSource for MockDataSource {
    async fn list_departments(&self) -> Result<Vec<Department>, DataError> {
        Ok(self.departments.clone())
    }

    async fn list_staff(&self, department_id: &str) -> Result<Vec<StaffMember>, DataError> {
        if !self.departments.iter().any(|d| d.id == department_id) {
            debug!("Roster requested for unknown department — id={}", department_id);
            return Ok(Vec::new());
        }
        self.generated.fetch_add(1, Ordering::SeqCst);
        Ok(generate_roster(department_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campus_layout() {
        let depts = campus_departments();
        assert_eq!(depts.len(), 7);
        assert_eq!(depts[0].code, "CTUG");
        assert_eq!(depts[4].kind, DepartmentType::Administration);
        assert!(depts.iter().all(|d| d.has_valid_position()));

        // Conference hall only on even ids, library missing on multiples of 3
        let it = &depts[1];
        assert!(it.facilities[1].available);
        let sh = &depts[2];
        assert!(!sh.facilities[1].available);
        assert!(!sh.facilities[2].available);
        assert_eq!(sh.faculty_count, 13);
    }

    #[tokio::test]
    async fn test_generated_roster_shape() {
        let source = MockDataSource::new();
        let roster = source.list_staff("2").await.unwrap();
        assert_eq!(roster.len(), 10);
        assert_eq!(roster[0].id, "2-1");
        assert_eq!(roster[0].designation, "HOD");
        assert_eq!(roster[2].designation, "Associate Professor");
        assert_eq!(roster[3].designation, "Assistant Professor");
        assert_eq!(roster[5].name, "Dr. A. Kumar");
        assert_eq!(roster[9].email, "faculty10@college.edu");
        assert!(roster.iter().all(|s| s.department_id == "2"));
        assert_eq!(source.generated_rosters(), 1);
    }

    #[tokio::test]
    async fn test_unknown_department_yields_empty_roster() {
        let source = MockDataSource::new();
        assert!(source.list_staff("99").await.unwrap().is_empty());
        assert_eq!(source.generated_rosters(), 0);
    }
}

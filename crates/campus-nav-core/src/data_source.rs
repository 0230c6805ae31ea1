// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::model::{Department, StaffMember};
use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to read dataset {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse dataset {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Duplicate department id '{0}'")]
    DuplicateId(String),
    #[error("Department '{0}' has an invalid position")]
    InvalidPosition(String),
}

/// Supplier of departments and rosters. Implementations may be in-memory or
/// backed by a remote service; callers only see this contract.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn list_departments(&self) -> Result<Vec<Department>, DataError>;

    /// Roster for one department, in the source's own order.
    /// An unknown id yields an empty list rather than an error.
    async fn list_staff(&self, department_id: &str) -> Result<Vec<StaffMember>, DataError>;
}

/// On-disk dataset layout for [`JsonFileDataSource`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub departments: Vec<Department>,
    #[serde(default)]
    pub staff: Vec<StaffMember>,
}

impl Dataset {
    /// Checks id uniqueness and coordinates. Staff rows pointing at a
    /// department that does not exist are dropped with a warning.
    pub fn validate(mut self) -> Result<Self, DataError> {
        let mut seen = HashSet::new();
        for dept in &self.departments {
            if !seen.insert(dept.id.as_str()) {
                return Err(DataError::DuplicateId(dept.id.clone()));
            }
            if !dept.has_valid_position() {
                return Err(DataError::InvalidPosition(dept.id.clone()));
            }
        }

        let before = self.staff.len();
        let known: HashSet<String> = self.departments.iter().map(|d| d.id.clone()).collect();
        self.staff.retain(|s| known.contains(&s.department_id));
        if self.staff.len() != before {
            warn!(
                "Dropped staff rows with unknown department — dropped={}",
                before - self.staff.len()
            );
        }
        Ok(self)
    }
}

/// A dataset loaded once from a JSON file.
pub struct JsonFileDataSource {
    dataset: Dataset,
}

impl JsonFileDataSource {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| DataError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset: Dataset =
            serde_json::from_str(&content).map_err(|source| DataError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        let dataset = dataset.validate()?;
        debug!(
            "Loaded dataset — path={} departments={} staff={}",
            path.display(),
            dataset.departments.len(),
            dataset.staff.len()
        );
        Ok(Self { dataset })
    }

    pub fn from_dataset(dataset: Dataset) -> Result<Self, DataError> {
        Ok(Self {
            dataset: dataset.validate()?,
        })
    }
}

#[async_trait]
impl DataSource for JsonFileDataSource {
    async fn list_departments(&self) -> Result<Vec<Department>, DataError> {
        Ok(self.dataset.departments.clone())
    }

    async fn list_staff(&self, department_id: &str) -> Result<Vec<StaffMember>, DataError> {
        Ok(self
            .dataset
            .staff
            .iter()
            .filter(|s| s.department_id == department_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DepartmentType;

    fn dept(id: &str, lat: f64) -> Department {
        Department {
            id: id.to_string(),
            name: format!("Dept {}", id),
            code: format!("D{}", id),
            description: String::new(),
            lat,
            lng: 77.6,
            kind: DepartmentType::Science,
            facilities: Vec::new(),
            image_urls: Vec::new(),
            faculty_count: 3,
        }
    }

    fn member(id: &str, dept: &str) -> StaffMember {
        StaffMember {
            id: id.to_string(),
            department_id: dept.to_string(),
            name: format!("Dr. {}", id),
            designation: "HOD".to_string(),
            qualification: "Ph.D".to_string(),
            email: format!("{}@college.edu", id),
            photo_url: None,
        }
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let dataset = Dataset {
            departments: vec![dept("1", 11.0), dept("1", 11.1)],
            staff: Vec::new(),
        };
        assert!(matches!(
            dataset.validate(),
            Err(DataError::DuplicateId(id)) if id == "1"
        ));
    }

    #[test]
    fn test_validate_rejects_bad_position() {
        let dataset = Dataset {
            departments: vec![dept("1", 123.0)],
            staff: Vec::new(),
        };
        assert!(matches!(
            dataset.validate(),
            Err(DataError::InvalidPosition(_))
        ));
    }

    #[tokio::test]
    async fn test_json_file_source_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("campus.json");
        let dataset = Dataset {
            departments: vec![dept("1", 11.0), dept("2", 11.1)],
            staff: vec![member("a", "1"), member("b", "2"), member("c", "1"), member("x", "404")],
        };
        fs::write(&path, serde_json::to_string_pretty(&dataset).unwrap()).unwrap();

        let source = JsonFileDataSource::load(&path).unwrap();
        assert_eq!(source.list_departments().await.unwrap().len(), 2);

        let roster = source.list_staff("1").await.unwrap();
        let ids: Vec<&str> = roster.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);

        assert!(source.list_staff("404").await.unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = JsonFileDataSource::load(dir.path().join("nope.json"));
        assert!(matches!(result, Err(DataError::Read { .. })));
    }
}

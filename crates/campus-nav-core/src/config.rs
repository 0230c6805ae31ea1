// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::mock_data::CAMPUS_CENTER;
use crate::model::LatLng;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub service_url: String,
    /// Travel mode passed to the routing service. Not user-selectable.
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            service_url: "https://router.project-osrm.org/route/v1".to_string(),
            profile: "foot".to_string(),
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    pub endpoint: String,
    pub max_recording_ms: u64,
    pub timeout_secs: u64,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:5000/stt".to_string(),
            max_recording_ms: 3000,
            timeout_secs: 30,
        }
    }
}

impl VoiceConfig {
    pub fn max_recording(&self) -> Duration {
        Duration::from_millis(self.max_recording_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Used when the dataset is empty.
    pub default_center: LatLng,
    pub zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center: CAMPUS_CENTER,
            zoom: 16,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub routing: RoutingConfig,
    pub voice: VoiceConfig,
    pub map: MapConfig,
}

impl Config {
    /// Loads `path` if given, otherwise the per-user config file. A missing
    /// per-user file yields defaults; an explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_file(path),
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Self::load_file(&path)
                } else {
                    debug!("No config file, using defaults — path={}", path.display());
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config — path={}", path.display());
        Ok(config)
    }

    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("org", "campus-nav", "CampusNav")
            .map(|dirs| dirs.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("campus-nav.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{ "routing": { "profile": "bike" }, "voice": { "max_recording_ms": 5000 } }"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.routing.profile, "bike");
        assert_eq!(config.routing.service_url, RoutingConfig::default().service_url);
        assert_eq!(config.voice.max_recording(), Duration::from_secs(5));
        assert_eq!(config.voice.endpoint, "http://localhost:5000/stt");
        assert_eq!(config.map.zoom, 16);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(&dir.path().join("absent.json")));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ routing: nope").unwrap();
        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.routing.profile, "foot");
        assert_eq!(config.voice.max_recording(), Duration::from_millis(3000));
        assert_eq!(config.map.default_center, CAMPUS_CENTER);
    }
}

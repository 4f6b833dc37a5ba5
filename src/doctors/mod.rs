//! Doctor Directory
//!
//! The doctor finder's data model and search logic. Directory data comes
//! from the static `database.json` asset:
//!
//! ```json
//! { "doctors": [...], "specialties": [...], "availabilityOptions": [...] }
//! ```
//!
//! - **search**: text, specialty and availability filters plus distance sort
//! - **geo**: haversine distance and map links

pub mod geo;
pub mod search;

pub use geo::{directions_url, haversine_km, maps_script_url, GeoPoint};
pub use search::{AvailabilityFilter, DirectoryStats, DoctorFilter, DoctorMatch};

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Doctor availability as published in the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Busy,
    Offline,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "available",
            Availability::Busy => "busy",
            Availability::Offline => "offline",
        }
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Clinic coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Location> for GeoPoint {
    fn from(loc: Location) -> Self {
        GeoPoint::new(loc.latitude, loc.longitude)
    }
}

/// One doctor listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: u32,
    pub name: String,
    pub specialty: String,
    pub clinic: String,
    pub availability: Availability,
    pub rating: f64,
    #[serde(default)]
    pub reviews: u32,
    #[serde(default)]
    pub experience: u32,
    #[serde(default)]
    pub consultation_fee: u32,
    #[serde(default)]
    pub next_available: String,
    #[serde(default)]
    pub phone: String,
    pub location: Location,
}

/// The full directory asset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Directory {
    #[serde(default)]
    pub doctors: Vec<Doctor>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub availability_options: Vec<String>,
}

/// Errors loading the directory asset
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Failed to read directory {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid directory JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Directory {
    /// Load the directory from a JSON file
    pub fn load(path: &Path) -> Result<Self, DirectoryError> {
        let content = std::fs::read_to_string(path).map_err(|source| DirectoryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Load the directory, falling back to an empty one when unavailable
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(dir) => {
                tracing::info!(doctors = dir.doctors.len(), "Doctor directory loaded");
                dir
            }
            Err(e) => {
                tracing::warn!(error = %e, "Doctor directory unavailable, starting empty");
                Self::default()
            }
        }
    }

    pub fn from_json(content: &str) -> Result<Self, DirectoryError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn find(&self, id: u32) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == id)
    }

    /// Apply a filter, returning matches in display order
    pub fn search(&self, filter: &DoctorFilter) -> Vec<DoctorMatch<'_>> {
        search::run(&self.doctors, filter)
    }

    pub fn is_empty(&self) -> bool {
        self.doctors.is_empty()
    }
}

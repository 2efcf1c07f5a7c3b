//! Common type definitions and utilities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp type alias
pub type Timestamp = DateTime<Utc>;

/// Geographic coordinate (WGS 84)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub long: f64,
}

impl Coordinate {
    pub fn new(lat: f64, long: f64) -> Self {
        Self { lat, long }
    }

    /// Check that both components are within their valid ranges
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.long)
    }
}

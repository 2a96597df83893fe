//! Data models.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

/// Position on the Earth's surface
///
/// Coordinates are WGS84 decimal degrees. No range check is done here,
/// out-of-range values still give a defined distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct GeoPoint {
    /// Latitude in decimal degrees, -90..90
    pub latitude: f64,
    /// Longitude in decimal degrees, -180..180
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Named port with its position
#[derive(Debug, Clone, PartialEq)]
pub struct Port {
    pub name: String,
    pub position: GeoPoint,
}

impl Port {
    pub fn new(name: impl Into<String>, position: GeoPoint) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// Single-leg route of a vessel, as read from the route source
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRecord {
    pub vessel_name: String,
    /// Vessel identifier (MMSI) in canonical string form
    pub mmsi: String,
    pub departure_port: Port,
    pub arrival_port: Port,
    pub departure_time: DateTime<Utc>,
    /// Free-form status tag, e.g. "underway" or "arrived"
    pub status: String,
}

/// Result of a full arrival estimate
///
/// Every field is derived from the route, the position and speed sample,
/// and the reference time given to the estimator.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EtaResult {
    pub vessel_name: String,
    pub mmsi: String,
    pub current_position: GeoPoint,
    /// Departure port name
    pub departure_port: String,
    /// Arrival port name
    pub arrival_port: String,
    /// Great-circle distance to the arrival port in nautical miles
    pub distance_remaining_nm: f64,
    /// Speed used for the projection in knots, after the fallback for
    /// non-positive speeds
    pub speed_knots: f64,
    pub eta: DateTime<Utc>,
    /// Year-month-day-hour rendering of `eta`
    pub eta_formatted: String,
    /// Straight-line voyage progress, 0.0 - 100.0
    pub voyage_progress_pct: f64,
    /// Time since departure, negative if the reference time precedes it
    #[serde_as(as = "serde_with::DurationSeconds<i64>")]
    pub time_elapsed: TimeDelta,
    /// Time until `eta`, never negative
    #[serde_as(as = "serde_with::DurationSeconds<i64>")]
    pub time_remaining: TimeDelta,
}

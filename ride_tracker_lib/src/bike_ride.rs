use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single persisted fix belonging to a completed ride.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideLocation {
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub speed: Option<f64>,
}

/// The immutable record of a completed ride, built once when recording stops
/// and handed off to whatever store the caller uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BikeRide {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Total distance in meters.
    pub total_distance: f64,
    /// Average speed over the ride in m/s.
    pub avg_speed: f64,
    /// Maximum speed reached in m/s.
    pub max_speed: f64,
    /// Total elevation gain in meters. Always 0 until elevation is tracked.
    pub elevation_gain: f64,
    /// Calories burned, whole kcal.
    pub calories: u32,
    /// Optional rider notes. Never set by the engine.
    pub notes: Option<String>,
    /// The recorded route, in arrival order.
    pub locations: Vec<RideLocation>,
}

impl BikeRide {
    /// Ride duration in seconds.
    pub fn duration(&self) -> f64 {
        (self.end_time - self.start_time).num_milliseconds() as f64 / 1000.0
    }
}

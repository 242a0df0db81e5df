use chrono::{DateTime, Utc};
use geo_types::Point;
use serde::{Deserialize, Serialize};

/// An accepted, recorded fix. Points are only ever appended while recording,
/// so their timestamps are monotonic by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    /// Position with x = longitude, y = latitude.
    pub position: Point,
    pub timestamp: DateTime<Utc>,
    /// Clamped speed at the time of the fix in m/s, if known.
    pub speed: Option<f64>,
}

impl RoutePoint {
    pub fn new(position: Point, timestamp: DateTime<Utc>, speed: Option<f64>) -> Self {
        Self {
            position,
            timestamp,
            speed,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.position.y()
    }

    pub fn longitude(&self) -> f64 {
        self.position.x()
    }
}

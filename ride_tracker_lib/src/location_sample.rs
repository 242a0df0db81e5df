use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One raw fix as delivered by the location hardware, before any filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSample {
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    /// Instantaneous speed in m/s. Negative means the sensor considers the
    /// reading invalid.
    pub speed: f64,
    /// Horizontal accuracy radius in meters. Negative means invalid.
    pub horizontal_accuracy: f64,
}

impl LocationSample {
    pub fn new(
        timestamp: DateTime<Utc>,
        latitude: f64,
        longitude: f64,
        speed: f64,
        horizontal_accuracy: f64,
    ) -> Self {
        Self {
            timestamp,
            latitude,
            longitude,
            speed,
            horizontal_accuracy,
        }
    }
}

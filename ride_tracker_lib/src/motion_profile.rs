use serde::{Deserialize, Serialize};

/// Accuracy tier requested from the location hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DesiredAccuracy {
    /// Coarse fixes, roughly a 100 m radius class. Cheap on battery.
    HundredMeters,
    /// The finest accuracy the hardware can deliver.
    Best,
}

/// A named sensor power/accuracy configuration. Two are in use: [`MotionProfile::idle`]
/// while the rider is just watching the gauge, [`MotionProfile::recording`] during a ride.
/// Applying a profile is a pure configuration swap with no state of its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionProfile {
    pub accuracy: DesiredAccuracy,
    /// Minimum movement in meters before the source reports a new fix.
    pub distance_filter_m: f64,
    pub allows_background_updates: bool,
    pub pauses_automatically: bool,
}

impl MotionProfile {
    pub fn idle() -> Self {
        Self {
            accuracy: DesiredAccuracy::HundredMeters,
            distance_filter_m: 25.0,
            allows_background_updates: false,
            pauses_automatically: true,
        }
    }

    /// Background updates are only requested when the host app actually holds
    /// a background-location capability. Requesting them without it would get
    /// the process killed by the OS.
    pub fn recording(background_capable: bool) -> Self {
        Self {
            accuracy: DesiredAccuracy::Best,
            distance_filter_m: 5.0,
            allows_background_updates: background_capable,
            pauses_automatically: false,
        }
    }
}

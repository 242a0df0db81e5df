use std::sync::Mutex;

use ride_tracker_lib::{location_sample::LocationSample, motion_profile::MotionProfile};
use tokio::sync::broadcast;

/// One event from the location/heading hardware.
#[derive(Debug, Clone)]
pub enum SensorEvent {
    Location(LocationSample),
    /// Heading in degrees from true north.
    Heading(f64),
}

/// The location hardware abstraction the engine subscribes to for its
/// lifetime. Delivery rate is whatever the hardware feels like; the engine
/// never polls.
pub trait LocationSource: Send + Sync {
    fn subscribe(&self) -> broadcast::Receiver<SensorEvent>;

    /// Reconfigure the sensor power/accuracy tradeoff. Idempotent, does not
    /// emit an event or reset anything.
    fn apply_profile(&self, profile: &MotionProfile);
}

/// A broadcast-backed source fed by hand. Stands in for the platform location
/// service in the demo driver and in tests.
pub struct ChannelLocationSource {
    tx: broadcast::Sender<SensorEvent>,
    active_profile: Mutex<MotionProfile>,
}

impl ChannelLocationSource {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(256);
        Self {
            tx,
            active_profile: Mutex::new(MotionProfile::idle()),
        }
    }

    pub fn emit(&self, event: SensorEvent) {
        // No subscriber just means nobody is monitoring right now.
        let _ = self.tx.send(event);
    }

    pub fn active_profile(&self) -> MotionProfile {
        *self.active_profile.lock().unwrap()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for ChannelLocationSource {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationSource for ChannelLocationSource {
    fn subscribe(&self) -> broadcast::Receiver<SensorEvent> {
        self.tx.subscribe()
    }

    fn apply_profile(&self, profile: &MotionProfile) {
        *self.active_profile.lock().unwrap() = *profile;
        tracing::debug!("location source reconfigured: {:?}", profile);
    }
}

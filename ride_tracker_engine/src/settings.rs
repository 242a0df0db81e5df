/// The slice of user settings the engine cares about.
pub trait RideSettings: Send + Sync {
    /// Whether heart-rate sync is enabled. Read once per ride when recording
    /// starts; toggling mid-ride takes effect on the next ride.
    fn heart_rate_sync_enabled(&self) -> bool;
}

/// Fixed settings for the demo driver and tests.
pub struct StaticSettings {
    pub heart_rate_sync: bool,
}

impl RideSettings for StaticSettings {
    fn heart_rate_sync_enabled(&self) -> bool {
        self.heart_rate_sync
    }
}

#![allow(dead_code)]

use std::sync::Arc;

use chrono::Utc;
use ride_tracker_engine::{
    heart_rate::ChannelHeartRateMonitor, sensor::ChannelLocationSource,
    session::RideSessionManager, settings::StaticSettings,
};
use ride_tracker_lib::location_sample::LocationSample;

pub struct TestRig {
    pub manager: RideSessionManager,
    pub source: Arc<ChannelLocationSource>,
    pub monitor: Arc<ChannelHeartRateMonitor>,
}

pub fn rig(heart_rate_sync: bool) -> TestRig {
    let source = Arc::new(ChannelLocationSource::new());
    let monitor = Arc::new(ChannelHeartRateMonitor::new());
    let settings = Arc::new(StaticSettings { heart_rate_sync });
    let manager = RideSessionManager::new(source.clone(), settings, monitor.clone(), false);
    TestRig {
        manager,
        source,
        monitor,
    }
}

/// A fresh fix at the given coordinates, accurate enough to pass the filter.
pub fn sample(latitude: f64, longitude: f64, speed: f64) -> LocationSample {
    LocationSample::new(Utc::now(), latitude, longitude, speed, 5.0)
}

/// A fix with explicit accuracy, for exercising the filter end to end.
pub fn sample_with_accuracy(
    latitude: f64,
    longitude: f64,
    speed: f64,
    accuracy: f64,
) -> LocationSample {
    LocationSample::new(Utc::now(), latitude, longitude, speed, accuracy)
}

/// Roughly `meters` of northward displacement in degrees of latitude.
pub fn lat_offset(meters: f64) -> f64 {
    meters * 0.00009 / 10.0
}

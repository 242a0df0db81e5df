use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use geo_types::Point;
use ride_tracker_lib::{
    bike_ride::{BikeRide, RideLocation},
    location_sample::LocationSample,
    motion_profile::MotionProfile,
    route_point::RoutePoint,
};
use serde::{Deserialize, Serialize};
use tokio::{
    sync::{Mutex, broadcast::error::RecvError, watch},
    task::JoinHandle,
    time::Instant,
};

use crate::{
    heart_rate::HeartRateMonitor,
    metrics::{average_speed, estimate_calories, haversine_distance_m},
    sample_filter::{self, SampleVerdict},
    sensor::{LocationSource, SensorEvent},
    settings::RideSettings,
};

/// Minimum displacement in meters before a new fix is appended to the route.
/// Bounds route growth and keeps GPS jitter at a red light from counting as
/// distance.
pub const MIN_POINT_DISPLACEMENT_M: f64 = 5.0;
/// How often duration, average speed and calories are recomputed while recording.
pub const METRICS_TICK: Duration = Duration::from_secs(1);
/// How often latched sensor values are copied into the published metrics.
pub const PUBLISH_TICK: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RideMode {
    Idle,
    Recording,
}

/// Snapshot of the externally observable session metrics. `current_speed` and
/// `heading` lag the raw sensor by at most one publish tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RideMetrics {
    /// m/s
    pub current_speed: f64,
    /// Degrees from true north.
    pub heading: f64,
    /// bpm, 0 until a sample arrives.
    pub heart_rate: u16,
    /// Meters.
    pub distance: f64,
    /// Seconds, at metrics-tick granularity.
    pub duration: f64,
    /// m/s
    pub avg_speed: f64,
    /// m/s
    pub max_speed: f64,
    /// Whole kcal.
    pub calories: u32,
    pub is_recording: bool,
}

/// The live, mutable session. Only ever touched behind the manager's mutex so
/// sensor callbacks, timer ticks and mode transitions cannot interleave.
struct SessionState {
    mode: RideMode,
    rider_weight_kg: f64,
    start_time: Option<DateTime<Utc>>,
    started_at: Option<Instant>,

    // Latch tier: written on every accepted sensor event, read by the
    // publish task. Cheap enough to take any event rate.
    last_known_speed: f64,
    last_known_heading: f64,

    // Published tier: copied from the latch once per publish tick.
    current_speed: f64,
    heading: f64,

    heart_rate: u16,
    distance: f64,
    duration: f64,
    avg_speed: f64,
    max_speed: f64,
    calories: u32,
    route: Vec<RoutePoint>,
}

impl SessionState {
    fn new() -> Self {
        Self {
            mode: RideMode::Idle,
            rider_weight_kg: 0.0,
            start_time: None,
            started_at: None,
            last_known_speed: 0.0,
            last_known_heading: 0.0,
            current_speed: 0.0,
            heading: 0.0,
            heart_rate: 0,
            distance: 0.0,
            duration: 0.0,
            avg_speed: 0.0,
            max_speed: 0.0,
            calories: 0,
            route: Vec::new(),
        }
    }

    fn reset_accumulators(&mut self) {
        self.start_time = None;
        self.started_at = None;
        self.distance = 0.0;
        self.duration = 0.0;
        self.avg_speed = 0.0;
        self.max_speed = 0.0;
        self.calories = 0;
        self.route.clear();
    }

    fn snapshot(&self) -> RideMetrics {
        RideMetrics {
            current_speed: self.current_speed,
            heading: self.heading,
            heart_rate: self.heart_rate,
            distance: self.distance,
            duration: self.duration,
            avg_speed: self.avg_speed,
            max_speed: self.max_speed,
            calories: self.calories,
            is_recording: self.mode == RideMode::Recording,
        }
    }
}

#[derive(Default)]
struct EngineTasks {
    ingest: Option<JoinHandle<()>>,
    publish: Option<JoinHandle<()>>,
    metrics: Option<JoinHandle<()>>,
    heart_rate: Option<JoinHandle<()>>,
}

/// Handle to the ride session engine. Clones share the same session.
///
/// Lock order is tasks before state wherever both are taken, which keeps the
/// ingest path (state only) free to run while transitions are in flight.
#[derive(Clone)]
pub struct RideSessionManager {
    state: Arc<Mutex<SessionState>>,
    tasks: Arc<Mutex<EngineTasks>>,
    source: Arc<dyn LocationSource>,
    settings: Arc<dyn RideSettings>,
    heart_rate_monitor: Arc<dyn HeartRateMonitor>,
    metrics_tx: Arc<watch::Sender<RideMetrics>>,
    background_location_capable: bool,
}

impl RideSessionManager {
    pub fn new(
        source: Arc<dyn LocationSource>,
        settings: Arc<dyn RideSettings>,
        heart_rate_monitor: Arc<dyn HeartRateMonitor>,
        background_location_capable: bool,
    ) -> Self {
        let (metrics_tx, _rx) = watch::channel(RideMetrics::default());
        Self {
            state: Arc::new(Mutex::new(SessionState::new())),
            tasks: Arc::new(Mutex::new(EngineTasks::default())),
            source,
            settings,
            heart_rate_monitor,
            metrics_tx: Arc::new(metrics_tx),
            background_location_capable,
        }
    }

    /// Begin consuming sensor events and publishing latched values. The gauge
    /// needs live speed and heading even when nothing is being recorded, so
    /// this runs across both modes. Idempotent.
    pub async fn start_idle_monitoring(&self) {
        let mut tasks = self.tasks.lock().await;
        if tasks.ingest.is_some() {
            return;
        }

        self.source.apply_profile(&MotionProfile::idle());

        let mut events = self.source.subscribe();
        let manager = self.clone();
        tasks.ingest = Some(tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(SensorEvent::Location(sample)) => manager.handle_sample(sample).await,
                    Ok(SensorEvent::Heading(degrees)) => manager.handle_heading(degrees).await,
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("sensor stream lagged, skipped {} events", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }));

        let state = self.state.clone();
        let metrics_tx = self.metrics_tx.clone();
        tasks.publish = Some(tokio::spawn(async move {
            let mut tick = tokio::time::interval(PUBLISH_TICK);
            loop {
                tick.tick().await;
                let mut state = state.lock().await;
                state.current_speed = state.last_known_speed;
                state.heading = state.last_known_heading;
                let _ = metrics_tx.send(state.snapshot());
            }
        }));

        tracing::info!("idle monitoring started");
    }

    /// Stop consuming sensor events and publishing. Idempotent.
    pub async fn stop_idle_monitoring(&self) {
        let mut tasks = self.tasks.lock().await;
        if let Some(task) = tasks.ingest.take() {
            task.abort();
        }
        if let Some(task) = tasks.publish.take() {
            task.abort();
        }
        tracing::info!("idle monitoring stopped");
    }

    /// Begin recording a ride. No-op when already recording.
    pub async fn start(&self, rider_weight_kg: f64) {
        let mut tasks = self.tasks.lock().await;

        {
            let mut state = self.state.lock().await;
            if state.mode == RideMode::Recording {
                tracing::debug!("start ignored, already recording");
                return;
            }
            state.reset_accumulators();
            state.rider_weight_kg = rider_weight_kg;
            state.start_time = Some(Utc::now());
            state.started_at = Some(Instant::now());
            state.mode = RideMode::Recording;
        }

        self.source
            .apply_profile(&MotionProfile::recording(self.background_location_capable));

        let state = self.state.clone();
        tasks.metrics = Some(tokio::spawn(async move {
            let mut tick = tokio::time::interval(METRICS_TICK);
            loop {
                tick.tick().await;
                let mut state = state.lock().await;
                let Some(started_at) = state.started_at else {
                    continue;
                };
                state.duration = started_at.elapsed().as_secs_f64();
                state.avg_speed = average_speed(state.distance, state.duration);
                state.calories = estimate_calories(
                    state.last_known_speed,
                    state.rider_weight_kg,
                    state.duration,
                );
            }
        }));

        if self.settings.heart_rate_sync_enabled() {
            let mut samples = self.heart_rate_monitor.start_observing();
            let state = self.state.clone();
            tasks.heart_rate = Some(tokio::spawn(async move {
                loop {
                    match samples.recv().await {
                        Ok(bpm) => state.lock().await.heart_rate = bpm,
                        Err(RecvError::Lagged(_)) => continue,
                        Err(RecvError::Closed) => break,
                    }
                }
            }));
        }

        tracing::info!("recording started (rider {} kg)", rider_weight_kg);
    }

    /// Stop recording. Returns the finished ride, or `None` when nothing was
    /// recorded yet or no time had accumulated. Safe to call repeatedly.
    pub async fn stop(&self) -> Option<BikeRide> {
        let mut tasks = self.tasks.lock().await;

        // Heart-rate cleanup happens whether or not observation ever started,
        // so a stop in any state leaves the health platform quiet.
        self.heart_rate_monitor.stop_observing();
        if let Some(task) = tasks.heart_rate.take() {
            task.abort();
        }

        let mut state = self.state.lock().await;
        if state.mode != RideMode::Recording {
            return None;
        }

        if let Some(task) = tasks.metrics.take() {
            task.abort();
        }
        self.source.apply_profile(&MotionProfile::idle());

        let ride = build_artifact(&state);
        state.mode = RideMode::Idle;
        state.reset_accumulators();

        match &ride {
            Some(ride) => tracing::info!(
                "recording stopped: {:.0} m in {:.0} s",
                ride.total_distance,
                ride.duration()
            ),
            None => tracing::info!("recording stopped with no elapsed time, nothing to keep"),
        }
        ride
    }

    /// Ingestion path for one raw fix. Called by the ingest task, but public
    /// so a host that owns delivery can push samples directly. All mutation
    /// is serialized through the session mutex.
    pub async fn handle_sample(&self, sample: LocationSample) {
        let accepted = match sample_filter::evaluate(&sample, Utc::now()) {
            SampleVerdict::Accepted(accepted) => accepted,
            SampleVerdict::Rejected(reason) => {
                tracing::trace!("dropped sample: {:?}", reason);
                return;
            }
        };

        let mut state = self.state.lock().await;
        state.last_known_speed = accepted.speed;

        if state.mode != RideMode::Recording {
            return;
        }

        state.max_speed = state.max_speed.max(accepted.speed);

        let point = RoutePoint::new(
            Point::new(accepted.longitude, accepted.latitude),
            accepted.timestamp,
            Some(accepted.speed),
        );

        let step = state.route.last().map(|last| {
            haversine_distance_m(
                (last.latitude(), last.longitude()),
                (point.latitude(), point.longitude()),
            )
        });

        match step {
            // First fix of the ride is always kept, it anchors the route.
            None => state.route.push(point),
            Some(step) if step >= MIN_POINT_DISPLACEMENT_M => {
                state.distance += step;
                state.route.push(point);
            }
            Some(_) => {}
        }
    }

    /// Ingestion path for one heading update, latched unconditionally.
    pub async fn handle_heading(&self, degrees: f64) {
        self.state.lock().await.last_known_heading = degrees;
    }

    /// Current snapshot of the published metrics.
    pub async fn metrics(&self) -> RideMetrics {
        self.state.lock().await.snapshot()
    }

    /// Watch channel refreshed on every publish tick.
    pub fn subscribe_metrics(&self) -> watch::Receiver<RideMetrics> {
        self.metrics_tx.subscribe()
    }

    pub async fn is_recording(&self) -> bool {
        self.state.lock().await.mode == RideMode::Recording
    }

    /// Read-only projection of the route recorded so far.
    pub async fn route_coordinates(&self) -> Vec<Point> {
        self.state
            .lock()
            .await
            .route
            .iter()
            .map(|point| point.position)
            .collect()
    }
}

/// Snapshot the accumulators into an immutable ride record. Yields `None`
/// when no tick ever ran, a zero-length ride is not worth keeping.
fn build_artifact(state: &SessionState) -> Option<BikeRide> {
    let start_time = state.start_time?;
    if state.duration <= 0.0 {
        return None;
    }

    let locations = state
        .route
        .iter()
        .map(|point| RideLocation {
            timestamp: point.timestamp,
            latitude: point.latitude(),
            longitude: point.longitude(),
            speed: point.speed,
        })
        .collect();

    Some(BikeRide {
        start_time,
        // Derived from the tick-granular duration so the record agrees with
        // the metrics the rider was shown.
        end_time: start_time + TimeDelta::milliseconds((state.duration * 1000.0) as i64),
        total_distance: state.distance,
        avg_speed: state.avg_speed,
        max_speed: state.max_speed,
        elevation_gain: 0.0,
        calories: state.calories,
        notes: None,
        locations,
    })
}

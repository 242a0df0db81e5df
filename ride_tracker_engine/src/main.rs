use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use ride_tracker_engine::{
    heart_rate::ChannelHeartRateMonitor,
    sensor::{ChannelLocationSource, SensorEvent},
    session::RideSessionManager,
    settings::StaticSettings,
    store::{InMemoryRideStore, RideStore},
};
use ride_tracker_lib::location_sample::LocationSample;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Drives the engine through a short simulated ride and prints the saved record.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=debug", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let source = Arc::new(ChannelLocationSource::new());
    let monitor = Arc::new(ChannelHeartRateMonitor::new());
    let settings = Arc::new(StaticSettings {
        heart_rate_sync: true,
    });
    let store = InMemoryRideStore::new();

    let manager =
        RideSessionManager::new(source.clone(), settings, monitor.clone(), false);

    manager.start_idle_monitoring().await;
    manager.start(72.0).await;

    // Ride north at ~11 m/s with a little GPS jitter, one fix per simulated
    // second, played back at 10x.
    let mut latitude = 55.6761;
    let longitude = 12.5683;
    for second in 0..30u16 {
        latitude += 0.0001; // ~11 m
        let jitter = (rand::random::<f64>() - 0.5) * 1e-6;
        source.emit(SensorEvent::Location(LocationSample::new(
            Utc::now(),
            latitude + jitter,
            longitude,
            11.0,
            5.0,
        )));
        source.emit(SensorEvent::Heading(0.0));
        if second % 5 == 0 {
            monitor.emit(128 + second % 10);
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    let metrics = manager.metrics().await;
    tracing::info!(
        "live: {:.0} m ridden, avg {:.1} m/s, {} bpm",
        metrics.distance,
        metrics.avg_speed,
        metrics.heart_rate
    );

    match manager.stop().await {
        Some(ride) => {
            let ride_id = store
                .save_ride(ride.clone())
                .await
                .map_err(|e| anyhow::anyhow!("failed to save ride: {:?}", e))?;
            tracing::info!("saved ride {}", ride_id);
            println!("{}", serde_json::to_string_pretty(&ride)?);
        }
        None => tracing::warn!("ride too short, nothing recorded"),
    }

    manager.stop_idle_monitoring().await;
    Ok(())
}

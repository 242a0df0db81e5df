mod common;

use std::time::Duration;

use chrono::{TimeDelta, Utc};
use ride_tracker_lib::location_sample::LocationSample;

#[tokio::test(start_paused = true)]
async fn stop_without_progress_returns_nothing() {
    let rig = common::rig(false);
    rig.manager.start(70.0).await;
    assert!(rig.manager.stop().await.is_none());
    assert!(!rig.manager.is_recording().await);
}

#[tokio::test(start_paused = true)]
async fn stop_is_idempotent() {
    let rig = common::rig(false);
    rig.manager.start(70.0).await;
    rig.manager.handle_sample(common::sample(0.0, 0.0, 5.0)).await;
    tokio::time::sleep(Duration::from_millis(1500)).await;

    assert!(rig.manager.stop().await.is_some());
    assert!(rig.manager.stop().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn stop_before_any_start_is_a_noop() {
    let rig = common::rig(true);
    assert!(rig.manager.stop().await.is_none());
    assert!(!rig.monitor.is_observing());
}

#[tokio::test(start_paused = true)]
async fn start_while_recording_keeps_the_ride() {
    let rig = common::rig(false);
    rig.manager.start(70.0).await;
    rig.manager.handle_sample(common::sample(0.0, 0.0, 5.0)).await;
    rig.manager
        .handle_sample(common::sample(common::lat_offset(10.0), 0.0, 5.0))
        .await;
    tokio::time::sleep(Duration::from_millis(1100)).await;

    let before = rig.manager.metrics().await;
    assert!(before.distance > 0.0);

    // Second start must not reset the ride in flight.
    rig.manager.start(90.0).await;
    let after = rig.manager.metrics().await;
    assert_eq!(after.distance, before.distance);
    assert_eq!(rig.manager.route_coordinates().await.len(), 2);
    assert!(after.is_recording);
}

#[tokio::test(start_paused = true)]
async fn accumulators_reset_when_a_new_ride_starts() {
    let rig = common::rig(false);
    rig.manager.start(70.0).await;
    rig.manager.handle_sample(common::sample(0.0, 0.0, 8.0)).await;
    rig.manager
        .handle_sample(common::sample(common::lat_offset(15.0), 0.0, 8.0))
        .await;
    tokio::time::sleep(Duration::from_millis(2100)).await;
    rig.manager.stop().await.expect("first ride should produce a record");

    rig.manager.start(70.0).await;
    let metrics = rig.manager.metrics().await;
    assert_eq!(metrics.distance, 0.0);
    assert_eq!(metrics.duration, 0.0);
    assert_eq!(metrics.avg_speed, 0.0);
    assert_eq!(metrics.max_speed, 0.0);
    assert_eq!(metrics.calories, 0);
    assert!(rig.manager.route_coordinates().await.is_empty());
    assert!(metrics.is_recording);
}

#[tokio::test(start_paused = true)]
async fn rejected_samples_leave_the_session_untouched() {
    let rig = common::rig(false);
    rig.manager.start(70.0).await;

    let stale = LocationSample::new(Utc::now() - TimeDelta::seconds(5), 0.0, 0.0, 9.0, 5.0);
    rig.manager.handle_sample(stale).await;

    let blurry = common::sample_with_accuracy(0.0, 0.0, 9.0, 80.0);
    rig.manager.handle_sample(blurry).await;

    let metrics = rig.manager.metrics().await;
    assert_eq!(metrics.max_speed, 0.0);
    assert!(rig.manager.route_coordinates().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn profile_follows_the_session_mode() {
    let rig = common::rig(false);
    rig.manager.start_idle_monitoring().await;
    assert_eq!(rig.source.active_profile().distance_filter_m, 25.0);

    rig.manager.start(70.0).await;
    let recording = rig.source.active_profile();
    assert_eq!(recording.distance_filter_m, 5.0);
    assert!(!recording.allows_background_updates); // rig has no background capability
    assert!(!recording.pauses_automatically);

    rig.manager.stop().await;
    assert_eq!(rig.source.active_profile().distance_filter_m, 25.0);
    assert!(rig.source.active_profile().pauses_automatically);
}

mod common;

use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn bridge_runs_when_sync_is_enabled() {
    let rig = common::rig(true);
    rig.manager.start(70.0).await;
    assert!(rig.monitor.is_observing());

    rig.monitor.emit(141);
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(rig.manager.metrics().await.heart_rate, 141);
}

#[tokio::test(start_paused = true)]
async fn samples_overwrite_without_smoothing() {
    let rig = common::rig(true);
    rig.manager.start(70.0).await;

    rig.monitor.emit(120);
    rig.monitor.emit(155);
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(rig.manager.metrics().await.heart_rate, 155);
}

#[tokio::test(start_paused = true)]
async fn bridge_stays_off_when_sync_is_disabled() {
    let rig = common::rig(false);
    rig.manager.start(70.0).await;
    assert!(!rig.monitor.is_observing());

    rig.monitor.emit(141);
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(rig.manager.metrics().await.heart_rate, 0);
}

#[tokio::test(start_paused = true)]
async fn stop_quiets_the_monitor() {
    let rig = common::rig(true);
    rig.manager.start(70.0).await;
    assert!(rig.monitor.is_observing());

    rig.manager.stop().await;
    assert!(!rig.monitor.is_observing());

    // Samples arriving after stop are ignored.
    rig.monitor.emit(180);
    tokio::time::sleep(Duration::from_millis(50)).await;
    let rate = rig.manager.metrics().await.heart_rate;
    assert_ne!(rate, 180);
}

#[tokio::test(start_paused = true)]
async fn stop_without_a_bridge_is_harmless() {
    let rig = common::rig(true);
    // Never started: stop must still tell the monitor to quiet down.
    assert!(rig.manager.stop().await.is_none());
    assert!(!rig.monitor.is_observing());
}

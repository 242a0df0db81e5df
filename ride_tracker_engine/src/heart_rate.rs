use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::broadcast;

/// The health-platform contract the engine consumes. Observation is started
/// at most once per ride and stopped unconditionally on every stop, so
/// implementations must tolerate `stop_observing` without a matching start.
pub trait HeartRateMonitor: Send + Sync {
    /// Begin delivering bpm samples and return the stream to read them from.
    fn start_observing(&self) -> broadcast::Receiver<u16>;

    fn stop_observing(&self);
}

/// A broadcast-backed monitor fed by hand, standing in for the real health
/// platform in the demo driver and in tests.
pub struct ChannelHeartRateMonitor {
    tx: broadcast::Sender<u16>,
    observing: AtomicBool,
}

impl ChannelHeartRateMonitor {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(64);
        Self {
            tx,
            observing: AtomicBool::new(false),
        }
    }

    pub fn emit(&self, bpm: u16) {
        let _ = self.tx.send(bpm);
    }

    pub fn is_observing(&self) -> bool {
        self.observing.load(Ordering::SeqCst)
    }
}

impl Default for ChannelHeartRateMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl HeartRateMonitor for ChannelHeartRateMonitor {
    fn start_observing(&self) -> broadcast::Receiver<u16> {
        self.observing.store(true, Ordering::SeqCst);
        self.tx.subscribe()
    }

    fn stop_observing(&self) {
        self.observing.store(false, Ordering::SeqCst);
    }
}

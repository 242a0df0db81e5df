use std::sync::Arc;

use ride_tracker_lib::bike_ride::BikeRide;
use tokio::sync::Mutex;

#[derive(Debug)]
pub enum RideStoreError {
    NotFound(i64),
    Storage(String),
}

/// Persistence contract for completed rides. The engine never awaits this
/// itself; whoever called `stop()` owns saving the returned ride.
#[allow(async_fn_in_trait)]
pub trait RideStore: Send + Sync {
    /// Persist a finished ride and return its assigned id.
    async fn save_ride(&self, ride: BikeRide) -> Result<i64, RideStoreError>;

    /// All stored rides, newest first.
    async fn fetch_all_rides(&self) -> Result<Vec<(i64, BikeRide)>, RideStoreError>;

    async fn delete_ride(&self, ride_id: i64) -> Result<(), RideStoreError>;

    async fn delete_all_rides(&self) -> Result<(), RideStoreError>;
}

#[derive(Default)]
struct StoreInner {
    next_id: i64,
    rides: Vec<(i64, BikeRide)>,
}

/// Keeps finished rides in memory. Stands in for the real database, which
/// lives outside the engine.
#[derive(Clone)]
pub struct InMemoryRideStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl InMemoryRideStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoreInner {
                next_id: 1,
                rides: Vec::new(),
            })),
        }
    }
}

impl Default for InMemoryRideStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RideStore for InMemoryRideStore {
    async fn save_ride(&self, ride: BikeRide) -> Result<i64, RideStoreError> {
        let mut inner = self.inner.lock().await;
        let ride_id = inner.next_id;
        inner.next_id += 1;
        tracing::info!(
            "ride {} saved: {:.0} m in {:.0} s",
            ride_id,
            ride.total_distance,
            ride.duration()
        );
        inner.rides.push((ride_id, ride));
        Ok(ride_id)
    }

    async fn fetch_all_rides(&self) -> Result<Vec<(i64, BikeRide)>, RideStoreError> {
        let inner = self.inner.lock().await;
        let mut rides = inner.rides.clone();
        rides.sort_by(|(_, a), (_, b)| b.start_time.cmp(&a.start_time));
        Ok(rides)
    }

    async fn delete_ride(&self, ride_id: i64) -> Result<(), RideStoreError> {
        let mut inner = self.inner.lock().await;
        let before = inner.rides.len();
        inner.rides.retain(|(id, _)| *id != ride_id);
        if inner.rides.len() == before {
            return Err(RideStoreError::NotFound(ride_id));
        }
        Ok(())
    }

    async fn delete_all_rides(&self) -> Result<(), RideStoreError> {
        self.inner.lock().await.rides.clear();
        Ok(())
    }
}

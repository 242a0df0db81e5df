pub mod heart_rate;
pub mod metrics;
pub mod sample_filter;
pub mod sensor;
pub mod session;
pub mod settings;
pub mod store;

pub use session::{RideMetrics, RideSessionManager};

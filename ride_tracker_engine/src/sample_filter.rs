use chrono::{DateTime, TimeDelta, Utc};
use ride_tracker_lib::location_sample::LocationSample;

/// Fixes older than this are stale, usually a buffered batch flushed after the
/// receiver woke up.
pub const MAX_SAMPLE_AGE_SECS: i64 = 3;
/// Fixes with a horizontal accuracy radius above this are too blurry to use.
pub const MAX_HORIZONTAL_ACCURACY_M: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Stale,
    Inaccurate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SampleVerdict {
    Accepted(LocationSample),
    Rejected(RejectReason),
}

/// Validates one raw fix. Accepted samples come back with their speed clamped
/// to zero or above, since the hardware reports negative speed to mean
/// "invalid". Rejected samples have no side effects anywhere downstream.
pub fn evaluate(sample: &LocationSample, now: DateTime<Utc>) -> SampleVerdict {
    if now - sample.timestamp > TimeDelta::seconds(MAX_SAMPLE_AGE_SECS) {
        return SampleVerdict::Rejected(RejectReason::Stale);
    }

    if sample.horizontal_accuracy < 0.0 || sample.horizontal_accuracy > MAX_HORIZONTAL_ACCURACY_M {
        return SampleVerdict::Rejected(RejectReason::Inaccurate);
    }

    let mut accepted = sample.clone();
    accepted.speed = sample.speed.max(0.0);
    SampleVerdict::Accepted(accepted)
}

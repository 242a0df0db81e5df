//! Pure derived-metric math. Everything here is recomputed wholesale on each
//! metrics tick, so a bad value at one tick corrects itself at the next.

/// MET (metabolic equivalent) estimate for cycling at the given speed,
/// bucketed over km/h per the usual compendium values.
pub fn met_for_speed(speed_ms: f64) -> f64 {
    let kmh = speed_ms * 3.6;
    if kmh < 10.0 {
        4.0 // light effort
    } else if kmh < 14.0 {
        6.0 // moderate
    } else if kmh < 20.0 {
        8.0 // brisk
    } else {
        10.0 // vigorous
    }
}

pub fn average_speed(distance_m: f64, duration_secs: f64) -> f64 {
    if duration_secs > 0.0 {
        distance_m / duration_secs
    } else {
        0.0
    }
}

/// Calories burned so far: MET x rider weight x hours, truncated to whole kcal.
pub fn estimate_calories(speed_ms: f64, rider_weight_kg: f64, duration_secs: f64) -> u32 {
    (met_for_speed(speed_ms) * rider_weight_kg * (duration_secs / 3600.0)) as u32
}

/// Great-circle distance in meters between two (latitude, longitude) pairs.
pub fn haversine_distance_m(p1: (f64, f64), p2: (f64, f64)) -> f64 {
    const R: f64 = 6372.8; // Radius of the earth in km

    let d_lat = (p2.0 - p1.0).to_radians();
    let d_lon = (p2.1 - p1.1).to_radians();
    let lat1 = p1.0.to_radians();
    let lat2 = p2.0.to_radians();

    let a = f64::sin(d_lat / 2.).powi(2)
        + f64::cos(lat1) * f64::cos(lat2) * f64::sin(d_lon / 2.).powi(2);
    let c = 2. * f64::asin(f64::sqrt(a));

    R * c * 1000.0
}

pub mod bike_ride;
pub mod location_sample;
pub mod motion_profile;
pub mod route_point;

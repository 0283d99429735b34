//! Geometry helpers for link planning.
//!
//! Independent of the airtime tables; these are plain functions over
//! latitude, longitude and antenna heights.

mod haversine;
mod vector;

pub use haversine::{
    angular_distance, bearing, destination_point, elevation_angle, great_circle_distance,
    height_from_angle, miles_to_nautical_miles, nautical_miles_to_miles, Haversine,
    EARTH_RADIUS_MILES, FEET_IN_METRE, FEET_IN_MILE, METRES_IN_MILE, MILES_IN_NAUTICAL_MILE,
    MIN_EARTH_RADIUS_METRES, NAUTICAL_MILES_IN_MILE,
};
pub use vector::UnitVector;

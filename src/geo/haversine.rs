//! Great-circle distance and bearing on a spherical Earth.
//!
//! Formulae follow <https://www.movable-type.co.uk/scripts/latlong.html>.
//! Distances are in statute miles, angles in degrees.
//!
//! # Example
//!
//! ```
//! use lora_airtime::geo::{bearing, great_circle_distance};
//!
//! // London to Paris
//! let miles = great_circle_distance(51.5074, -0.1278, 48.8566, 2.3522);
//! assert!((miles - 213.0).abs() < 1.0);
//!
//! let deg = bearing(51.5074, -0.1278, 48.8566, 2.3522);
//! assert!((deg - 148.0).abs() < 1.0);
//! ```

/// Mean Earth radius in miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.87433;

pub const FEET_IN_MILE: f64 = 5280.0;
pub const FEET_IN_METRE: f64 = 3.28084;
pub const METRES_IN_MILE: f64 = 1609.344;
pub const NAUTICAL_MILES_IN_MILE: f64 = 0.868976;
pub const MILES_IN_NAUTICAL_MILE: f64 = 1.15078;

pub fn miles_to_nautical_miles(miles: f64) -> f64 {
    NAUTICAL_MILES_IN_MILE * miles
}

pub fn nautical_miles_to_miles(nautical_miles: f64) -> f64 {
    MILES_IN_NAUTICAL_MILE * nautical_miles
}

/// Radii below this many metres select angular (unit sphere) results.
pub const MIN_EARTH_RADIUS_METRES: f64 = 6_000_000.0;

/// Sphere the distance and destination formulae run on.
///
/// The default is the mean Earth radius. A radius given in metres below
/// [`MIN_EARTH_RADIUS_METRES`] becomes a unit sphere, so distances come back
/// as central angles in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Haversine {
    radius_miles: f64,
}

impl Default for Haversine {
    fn default() -> Self {
        Self {
            radius_miles: EARTH_RADIUS_MILES,
        }
    }
}

impl Haversine {
    pub fn with_radius_metres(radius_metres: f64) -> Self {
        let radius_miles = if radius_metres < MIN_EARTH_RADIUS_METRES {
            1.0
        } else {
            radius_metres * FEET_IN_METRE / FEET_IN_MILE
        };
        Self { radius_miles }
    }

    pub fn radius_miles(&self) -> f64 {
        self.radius_miles
    }

    /// Distance between two points in units of the radius.
    pub fn distance(&self, lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
        self.radius_miles * angular_distance(lat1, lon1, lat2, lon2)
    }

    /// Point reached travelling `distance` (units of the radius) from
    /// `(lat, lon)` on `bearing_deg`.
    ///
    /// Returns `(latitude, longitude)` with longitude normalized to `[-180, 180)`.
    pub fn destination_point(
        &self,
        bearing_deg: f64,
        distance: f64,
        lat: f64,
        lon: f64,
    ) -> (f64, f64) {
        let delta = distance / self.radius_miles;
        let theta = bearing_deg.to_radians();
        let phi1 = lat.to_radians();

        let phi2 = (phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos()).asin();

        let y = theta.sin() * delta.sin() * phi1.cos();
        let x = delta.cos() - phi1.sin() * phi2.sin();
        let lon2 = lon + y.atan2(x).to_degrees();

        (phi2.to_degrees(), (lon2 + 540.0) % 360.0 - 180.0)
    }
}

/// Distance in miles between two points.
pub fn great_circle_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    Haversine::default().distance(lat1, lon1, lat2, lon2)
}

/// Central angle in radians between two points (haversine).
pub fn angular_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Initial bearing from point 1 to point 2, in `[0, 360)` degrees.
pub fn bearing(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let y = d_lon.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lon.cos();

    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

/// Point reached travelling `distance_miles` from `(lat, lon)` on `bearing_deg`.
pub fn destination_point(bearing_deg: f64, distance_miles: f64, lat: f64, lon: f64) -> (f64, f64) {
    Haversine::default().destination_point(bearing_deg, distance_miles, lat, lon)
}

/// Elevation angle in degrees from a local antenna to a remote one.
///
/// Accounts for the drop of the Earth's surface over the path:
/// `atan((h2 - h1) / d - d / 2R)`.
pub fn elevation_angle(distance_miles: f64, local_height_ft: f64, remote_height_ft: f64) -> f64 {
    let distance_ft = distance_miles * FEET_IN_MILE;
    let curvature_drop = distance_miles / (2.0 * EARTH_RADIUS_MILES);

    let slope = if distance_ft <= 0.0 {
        0.0
    } else {
        (remote_height_ft - local_height_ft) / distance_ft
    };

    (slope - curvature_drop).atan().to_degrees()
}

/// Remote antenna height in feet, relative to the local one, seen at
/// `angle_deg` over `distance_miles`.
///
/// Adds back the drop of the Earth's surface, so this is the inverse of
/// [`elevation_angle`]: `tan(angle + d / 2R) * d`.
pub fn height_from_angle(angle_deg: f64, distance_miles: f64) -> f64 {
    let curvature_drop = distance_miles / (2.0 * EARTH_RADIUS_MILES);
    (angle_deg.to_radians() + curvature_drop).tan() * distance_miles * FEET_IN_MILE
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    #[test]
    fn test_zero_distance() {
        assert_eq!(great_circle_distance(51.0, -1.0, 51.0, -1.0), 0.0);
    }

    #[test]
    fn test_quarter_meridian() {
        let miles = great_circle_distance(0.0, 0.0, 90.0, 0.0);
        let expected = EARTH_RADIUS_MILES * std::f64::consts::FRAC_PI_2;
        assert!((miles - expected).abs() < EPS, "got {}", miles);
    }

    #[test]
    fn test_cardinal_bearings() {
        assert!((bearing(0.0, 0.0, 1.0, 0.0) - 0.0).abs() < EPS);
        assert!((bearing(0.0, 0.0, 0.0, 1.0) - 90.0).abs() < EPS);
        assert!((bearing(1.0, 0.0, 0.0, 0.0) - 180.0).abs() < EPS);
        assert!((bearing(0.0, 1.0, 0.0, 0.0) - 270.0).abs() < EPS);
    }

    #[test]
    fn test_destination_round_trip() {
        let (lat, lon) = (52.2, 0.12);
        let (lat2, lon2) = destination_point(60.0, 25.0, lat, lon);

        let back = great_circle_distance(lat, lon, lat2, lon2);
        assert!((back - 25.0).abs() < 1e-6, "distance {}", back);
        assert!((bearing(lat, lon, lat2, lon2) - 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_destination_wraps_longitude() {
        let (_, lon) = destination_point(90.0, 100.0, 0.0, 179.5);
        assert!((-180.0..180.0).contains(&lon), "lon {}", lon);
        assert!(lon < 0.0);
    }

    #[test]
    fn test_custom_radius() {
        let earth = Haversine::with_radius_metres(6_371_000.0);
        assert!((earth.radius_miles() - 3958.76).abs() < 0.01);

        let miles = earth.distance(0.0, 0.0, 0.0, 90.0);
        let expected = earth.radius_miles() * std::f64::consts::FRAC_PI_2;
        assert!((miles - expected).abs() < EPS, "got {}", miles);
    }

    #[test]
    fn test_small_radius_gives_angles() {
        let unit = Haversine::with_radius_metres(1.0);
        assert_eq!(unit.radius_miles(), 1.0);

        let angle = unit.distance(0.0, 0.0, 90.0, 0.0);
        assert!((angle - std::f64::consts::FRAC_PI_2).abs() < EPS);

        // Travel a quarter turn north from the equator
        let (lat, _) = unit.destination_point(0.0, std::f64::consts::FRAC_PI_2, 0.0, 10.0);
        assert!((lat - 90.0).abs() < 1e-9, "lat {}", lat);
    }

    #[test]
    fn test_elevation_angle() {
        // Level antennas still look down because of curvature
        assert!(elevation_angle(10.0, 100.0, 100.0) < 0.0);
        assert!(elevation_angle(1.0, 0.0, 1000.0) > 10.0);
        // Zero distance has no slope, only (zero) curvature
        assert_eq!(elevation_angle(0.0, 0.0, 500.0), 0.0);
    }

    #[test]
    fn test_height_from_angle() {
        assert_eq!(height_from_angle(45.0, 0.0), 0.0);

        // A level sight line still clears the curve by d^2 / 2R
        let ft = height_from_angle(0.0, 10.0);
        assert!((ft - 66.67).abs() < 0.01, "height {}", ft);
    }

    #[test]
    fn test_height_inverts_elevation_angle() {
        for (miles, local, remote) in [(10.0, 0.0, 500.0), (2.5, 120.0, 40.0), (30.0, 0.0, 0.0)] {
            let angle = elevation_angle(miles, local, remote);
            let ft = height_from_angle(angle, miles);
            assert!(
                (ft - (remote - local)).abs() < 0.01,
                "{} mi {} -> {} ft gave {}",
                miles,
                local,
                remote,
                ft
            );
        }
    }

    #[test]
    fn test_nautical_conversion() {
        assert!((miles_to_nautical_miles(1.0) - 0.868976).abs() < EPS);
        assert!((nautical_miles_to_miles(1.0) - 1.15078).abs() < EPS);
    }
}

//! Positions as 3D unit vectors.
//!
//! Averaging latitudes and longitudes directly breaks near the antimeridian
//! and the poles. Converting to unit vectors, averaging, and converting back
//! gives a sensible centre point for a set of receivers.

/// A position on the unit sphere plus an altitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Altitude, carried through unchanged (units are the caller's).
    pub altitude: i32,
}

impl UnitVector {
    pub fn new(x: f64, y: f64, z: f64, altitude: i32) -> Self {
        Self { x, y, z, altitude }
    }

    /// Convert a latitude/longitude in degrees.
    pub fn from_lat_lon(latitude: f64, longitude: f64, altitude: i32) -> Self {
        let lat = latitude.to_radians();
        let lon = longitude.to_radians();
        let w = lat.cos();
        Self {
            x: w * lon.cos(),
            y: w * lon.sin(),
            z: lat.sin(),
            altitude,
        }
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        let w = (self.x * self.x + self.y * self.y).sqrt();
        self.z.atan2(w).to_degrees()
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.y.atan2(self.x).to_degrees()
    }

    /// Latitude rounded up to `precision` decimal places, trailing zeros dropped.
    pub fn rounded_latitude(&self, precision: usize) -> String {
        round_up_text(self.latitude(), precision)
    }

    /// Longitude rounded up to `precision` decimal places, trailing zeros dropped.
    pub fn rounded_longitude(&self, precision: usize) -> String {
        round_up_text(self.longitude(), precision)
    }

    pub fn rounded_altitude(&self) -> String {
        self.altitude.to_string()
    }

    /// Component-wise mean. Altitude uses integer division.
    ///
    /// Returns `None` for an empty slice.
    pub fn mean(points: &[UnitVector]) -> Option<UnitVector> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let (x, y, z, alt) = points.iter().fold((0.0, 0.0, 0.0, 0i64), |acc, p| {
            (acc.0 + p.x, acc.1 + p.y, acc.2 + p.z, acc.3 + i64::from(p.altitude))
        });
        Some(UnitVector::new(
            x / n,
            y / n,
            z / n,
            (alt / points.len() as i64) as i32,
        ))
    }
}

/// Ceiling to `precision` decimals, printed without trailing zeros.
fn round_up_text(value: f64, precision: usize) -> String {
    let scale = 10f64.powi(precision as i32);
    let scaled = value * scale;

    // Values already on the grid (up to float noise) are not bumped
    let nearest = scaled.round();
    let mut rounded = if (scaled - nearest).abs() < 1e-9 {
        nearest
    } else {
        scaled.ceil()
    };
    if rounded == 0.0 {
        rounded = 0.0; // drop the sign of -0
    }

    let text = format!("{:.*}", precision, rounded / scale);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_lat_lon_round_trip() {
        let v = UnitVector::from_lat_lon(51.5, -0.12, 35);
        assert!((v.latitude() - 51.5).abs() < EPS);
        assert!((v.longitude() + 0.12).abs() < EPS);
        assert_eq!(v.altitude, 35);

        let norm = (v.x * v.x + v.y * v.y + v.z * v.z).sqrt();
        assert!((norm - 1.0).abs() < EPS);
    }

    #[test]
    fn test_mean_across_antimeridian() {
        let a = UnitVector::from_lat_lon(0.0, 179.0, 10);
        let b = UnitVector::from_lat_lon(0.0, -179.0, 20);
        let m = UnitVector::mean(&[a, b]).unwrap();

        assert!(m.latitude().abs() < EPS);
        assert!((m.longitude().abs() - 180.0).abs() < EPS, "lon {}", m.longitude());
        assert_eq!(m.altitude, 15);
    }

    #[test]
    fn test_rounded_text() {
        let v = UnitVector::from_lat_lon(51.5, -0.12, 35);
        assert_eq!(v.rounded_latitude(2), "51.5");
        assert_eq!(v.rounded_latitude(0), "52");
        assert_eq!(v.rounded_longitude(1), "-0.1");
        assert_eq!(v.rounded_altitude(), "35");

        let v = UnitVector::from_lat_lon(10.123, 20.0, -5);
        assert_eq!(v.rounded_latitude(2), "10.13");
        assert_eq!(v.rounded_longitude(3), "20");
        assert_eq!(v.rounded_altitude(), "-5");
    }

    #[test]
    fn test_round_up_text_sign_of_zero() {
        assert_eq!(round_up_text(-0.004, 2), "0");
    }

    #[test]
    fn test_mean_empty() {
        assert!(UnitVector::mean(&[]).is_none());
    }
}

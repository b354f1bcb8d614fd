//! Geographic positions.

use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};

/// A WGS84 latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLong {
    pub lat: f64,
    pub lon: f64,
}

impl LatLong {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// As a `geo` point (x is longitude).
    pub fn point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }

    /// Great-circle distance to `other` in metres (haversine).
    pub fn distance_metres(&self, other: &LatLong) -> f64 {
        Haversine.distance(self.point(), other.point())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_to_self() {
        let pic = LatLong::new(53.4774, -2.2309);
        assert!(pic.distance_metres(&pic).abs() < 1e-6);
    }

    #[test]
    fn known_distance() {
        // Piccadilly to Altrincham, roughly 13km
        let pic = LatLong::new(53.4774, -2.2309);
        let alt = LatLong::new(53.3874, -2.3476);
        let d = pic.distance_metres(&alt);
        assert!(d > 11_000.0 && d < 15_000.0, "distance was {d}");
    }

    #[test]
    fn point_is_lon_lat() {
        let p = LatLong::new(53.4774, -2.2309).point();
        assert_eq!(p.x(), -2.2309);
        assert_eq!(p.y(), 53.4774);
    }

    #[test]
    fn one_degree_of_latitude() {
        let a = LatLong::new(53.0, -2.0);
        let b = LatLong::new(54.0, -2.0);
        let d = a.distance_metres(&b);
        assert!((d - 111_195.0).abs() < 100.0, "distance was {d}");
    }

    #[test]
    fn symmetric() {
        let a = LatLong::new(53.48, -2.24);
        let b = LatLong::new(53.40, -2.30);
        assert!((a.distance_metres(&b) - b.distance_metres(&a)).abs() < 1e-6);
    }
}

//! Geographic position
//!

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// A point on the globe, degrees for `lat`/`lon` and meters for the optional altitude.
///
/// Nothing is checked here: a `GeoPoint` is whatever the producer gave us.  Range checks are done
/// by [`Mission::validate()`](crate::Mission::validate) when reading a mission file.
///
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct GeoPoint {
    /// Latitude
    pub lat: f64,
    /// Longitude
    #[serde(alias = "lng")]
    pub lon: f64,
    /// Altitude in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<f64>,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon, alt: None }
    }

    #[inline]
    pub fn with_alt(self, alt: f64) -> Self {
        Self {
            alt: Some(alt),
            ..self
        }
    }

    /// Same horizontal position, altitude ignored.
    ///
    #[inline]
    pub fn same_spot(&self, other: &GeoPoint) -> bool {
        self.lat == other.lat && self.lon == other.lon
    }
}

impl AsRef<GeoPoint> for GeoPoint {
    fn as_ref(&self) -> &GeoPoint {
        self
    }
}

impl Display for GeoPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.alt {
            Some(alt) => write!(f, "{:.6}, {:.6} ({:.1} m)", self.lat, self.lon, alt),
            None => write!(f, "{:.6}, {:.6}", self.lat, self.lon),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geopoint_lng_alias() {
        let p: GeoPoint = serde_json::from_str(r#"{"lat": 48.5, "lng": 2.3}"#).unwrap();
        assert_eq!(GeoPoint::new(48.5, 2.3), p);

        let p: GeoPoint = serde_json::from_str(r#"{"lat": 48.5, "lon": 2.3, "alt": 50}"#).unwrap();
        assert_eq!(Some(50.), p.alt);
    }

    #[test]
    fn test_geopoint_same_spot() {
        let a = GeoPoint::new(1., 2.).with_alt(10.);
        let b = GeoPoint::new(1., 2.);
        assert!(a.same_spot(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_geopoint_display() {
        assert_eq!("1.000000, 2.000000", GeoPoint::new(1., 2.).to_string());
        assert_eq!(
            "1.000000, 2.000000 (30.0 m)",
            GeoPoint::new(1., 2.).with_alt(30.).to_string()
        );
    }
}

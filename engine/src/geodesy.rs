//! Geodesy primitives on a spherical Earth.
//!
//! Everything is 2D great-circle except [`distance_3d()`] which adds the altitude difference
//! when both ends have one.
//!

use crate::GeoPoint;

/// Mean Earth radius in meters
pub const EARTH_RADIUS: f64 = 6_371_000.0;

/// Great-circle distance in meters between `a` and `b`, using the haversine formula.
///
/// Altitude is ignored.
///
/// ```
/// use waypath_engine::{distance, GeoPoint};
///
/// let d = distance(&GeoPoint::new(0., 0.), &GeoPoint::new(1., 0.));
/// assert!((d - 111_195.).abs() < 1.);
/// ```
///
pub fn distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS * c
}

/// Distance in meters including the altitude difference if both points have one.
///
pub fn distance_3d(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let d = distance(a, b);
    match (a.alt, b.alt) {
        (Some(a1), Some(a2)) => d.hypot(a2 - a1),
        _ => d,
    }
}

/// Forward azimuth from `a` to `b` in degrees, clockwise from north, in `[0, 360)`.
///
/// The bearing between two points at the same spot is undefined, we return 0.
///
pub fn initial_bearing(a: &GeoPoint, b: &GeoPoint) -> f64 {
    if a.same_spot(b) {
        return 0.;
    }

    let (phi1, phi2) = (a.lat.to_radians(), b.lat.to_radians());
    let d_lon = (b.lon - a.lon).to_radians();

    let y = d_lon.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * d_lon.cos();

    // `rem_euclid()` can return exactly 360 for tiny negative values.
    (y.atan2(x).to_degrees() + 360.) % 360.
}

/// Linear interpolation between `a` and `b`, independently on latitude and longitude.
///
/// `t` is clamped to `[0, 1]`.  This is not a great-circle interpolation and is only good for
/// short segments; it will do the wrong thing across the antimeridian or near the poles.
///
/// Altitude is interpolated only if both ends have one.
///
pub fn lerp(a: &GeoPoint, b: &GeoPoint, t: f64) -> GeoPoint {
    let t = if t.is_nan() { 0. } else { t.clamp(0., 1.) };

    let alt = match (a.alt, b.alt) {
        (Some(a1), Some(a2)) => Some(a1 + (a2 - a1) * t),
        _ => None,
    };
    GeoPoint {
        lat: a.lat + (b.lat - a.lat) * t,
        lon: a.lon + (b.lon - a.lon) * t,
        alt,
    }
}

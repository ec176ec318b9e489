//! Great-circle geometry between geographic fixes.
//!
//! Distance and initial course between two positions given as signed
//! decimal-degree latitude/longitude, computed on a sphere of radius
//! 6 372 795 m. Because Earth is not an exact sphere, distances may be off
//! by up to 0.5% and courses by a tiny fraction; at dive-site scale (tens to
//! hundreds of meters) both errors are far below one screen pixel.
//!
//! All functions here are pure: no state, no clamping, no failure modes.
//! Geographic math stays in `f64` end to end; trig comes from `libm` so the
//! crate builds without a float runtime from the standard library.

use libm::{atan2, cos, sin, sqrt};

/// Spherical Earth radius used for distance computation, in meters.
pub const EARTH_RADIUS_M: f64 = 6_372_795.0;

// =============================================================================
// Geographic Types
// =============================================================================

/// A geographic position in signed decimal degrees. Immutable value type.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Longitude in degrees, positive east.
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a geographic point from decimal degrees.
    pub const fn new(
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self { latitude, longitude }
    }
}

/// One instantaneous position + heading sample from the positioning source.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Fix {
    /// Position at the time of the sample.
    pub position: GeoPoint,
    /// Compass heading in degrees, 0-360, 0 = north.
    pub heading: f64,
}

impl Fix {
    /// Create a fix from raw latitude/longitude/heading values.
    pub const fn new(
        latitude: f64,
        longitude: f64,
        heading: f64,
    ) -> Self {
        Self {
            position: GeoPoint::new(latitude, longitude),
            heading,
        }
    }
}

// =============================================================================
// Great-Circle Math
// =============================================================================

/// Distance in meters between two positions.
///
/// Uses the arctangent form of the great-circle distance, which stays
/// numerically stable for both tiny and antipodal separations.
pub fn distance_between(
    from: GeoPoint,
    to: GeoPoint,
) -> f64 {
    let delta = (from.longitude - to.longitude).to_radians();
    let sdlong = sin(delta);
    let cdlong = cos(delta);
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let slat1 = sin(lat1);
    let clat1 = cos(lat1);
    let slat2 = sin(lat2);
    let clat2 = cos(lat2);
    let cross = clat1 * slat2 - slat1 * clat2 * cdlong;
    let num = sqrt(cross * cross + (clat2 * sdlong) * (clat2 * sdlong));
    let denom = slat1 * slat2 + clat1 * clat2 * cdlong;
    atan2(num, denom) * EARTH_RADIUS_M
}

/// Initial course from one position toward another, in radians.
///
/// North = 0, increasing clockwise (east = PI/2), normalized into [0, TAU).
pub fn radians_course_to(
    from: GeoPoint,
    to: GeoPoint,
) -> f64 {
    let dlon = (to.longitude - from.longitude).to_radians();
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let a1 = sin(dlon) * cos(lat2);
    let a2 = cos(lat1) * sin(lat2) - sin(lat1) * cos(lat2) * cos(dlon);
    let mut course = atan2(a1, a2);
    if course < 0.0 {
        course += core::f64::consts::TAU;
    }
    course
}

/// Initial course from one position toward another, in compass degrees [0, 360).
pub fn degrees_course_to(
    from: GeoPoint,
    to: GeoPoint,
) -> f64 {
    radians_course_to(from, to).to_degrees()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_distance_to_self_is_zero() {
        let p = GeoPoint::new(51.46, -0.45);
        assert!(
            distance_between(p, p).abs() < EPS,
            "Distance from a point to itself should be zero"
        );
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = GeoPoint::new(51.46, -0.45);
        let b = GeoPoint::new(51.47, -0.44);
        let ab = distance_between(a, b);
        let ba = distance_between(b, a);
        assert!((ab - ba).abs() < 1e-6, "Distance should be symmetric: {ab} vs {ba}");
    }

    #[test]
    fn test_distance_one_degree_latitude() {
        // One degree of latitude is ~111.2 km on the sphere used here.
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(1.0, 0.0);
        let d = distance_between(a, b);
        let expected = EARTH_RADIUS_M * 1.0_f64.to_radians();
        assert!(
            (d - expected).abs() < 1.0,
            "1 degree of latitude should be ~{expected} m, got {d}"
        );
    }

    #[test]
    fn test_course_due_east_at_equator() {
        // A small eastward step on the equator is a ~90 degree course.
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 0.001);
        let course = degrees_course_to(a, b);
        assert!(
            (course - 90.0).abs() < 1e-6,
            "Due east at the equator should be 90 degrees, got {course}"
        );
    }

    #[test]
    fn test_course_due_north_and_south() {
        let a = GeoPoint::new(51.0, -0.5);
        let north = GeoPoint::new(51.01, -0.5);
        let south = GeoPoint::new(50.99, -0.5);
        assert!(degrees_course_to(a, north).abs() < 1e-6, "North should be 0 degrees");
        assert!(
            (degrees_course_to(a, south) - 180.0).abs() < 1e-6,
            "South should be 180 degrees"
        );
    }

    #[test]
    fn test_course_always_in_compass_range() {
        let center = GeoPoint::new(51.46, -0.45);
        // Sweep targets all around the center point.
        for i in 0..36 {
            let angle = f64::from(i) * 10.0_f64.to_radians();
            let target = GeoPoint::new(center.latitude + 0.01 * cos(angle), center.longitude + 0.01 * sin(angle));
            let course = degrees_course_to(center, target);
            assert!(
                (0.0..360.0).contains(&course),
                "Course {course} out of [0, 360) for sweep step {i}"
            );
        }
    }

    #[test]
    fn test_westward_course_wraps_positive() {
        // Westward courses come out of atan2 negative and must wrap into [0, 360).
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, -0.001);
        let course = degrees_course_to(a, b);
        assert!(
            (course - 270.0).abs() < 1e-6,
            "Due west at the equator should be 270 degrees, got {course}"
        );
    }
}

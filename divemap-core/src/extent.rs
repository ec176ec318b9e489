//! Map extents and the geographic-to-pixel projection.
//!
//! A [`MapExtent`] is a rectangular geographic region with declared
//! longitude/latitude bounds and, optionally, a full-canvas raster image.
//! Extents are static data: loaded once into a read-only [`MapCatalog`] and
//! never mutated. The catalog orders detail extents by selection priority
//! (survey sites before general detail maps) and names the catch-all
//! whole-region extent used when no detail extent contains the diver.
//!
//! [`project`] maps latitude/longitude to canvas pixels using a true
//! Mercator vertical scale derived from the extent's longitude span, so
//! straight compass bearings stay visually straight across the extent.
//! An equirectangular mapping would bend them noticeably even at the few
//! hundred meters an extent covers.
//!
//! Projection does not clamp: a position outside the extent yields pixel
//! coordinates outside the canvas, and callers test with
//! [`is_outside_canvas`]. Latitudes of exactly +/-90 degrees hit the
//! Mercator pole singularity and come back as a far out-of-range pixel
//! rather than an error; positioning sources never produce them in practice.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::Point;
use libm::{log, sin};

use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::geo::GeoPoint;

// =============================================================================
// Extent Data Model
// =============================================================================

/// Raster imagery for one extent: a full-canvas Rgb565 pixel buffer.
///
/// `swap_bytes` marks imagery stored in the opposite byte order (assets
/// converted for DMA-friendly layouts); the blit path swaps words on read.
pub struct MapImage {
    /// Row-major Rgb565 words, exactly one canvas worth of pixels.
    pub data: &'static [u16],
    /// Swap the byte order of each word when reading.
    pub swap_bytes: bool,
}

/// One rectangular map region. Static, never mutated after load.
///
/// Invariant: `lon_left < lon_right`.
pub struct MapExtent {
    /// Human-readable label, drawn as the map title.
    pub label: &'static str,
    /// Backing imagery; `None` means fill with `back_color`, no raster.
    pub image: Option<&'static MapImage>,
    /// Background fill used when no imagery is present.
    pub back_color: Rgb565,
    /// Survey extents are preferred during map resolution and skip the
    /// previous-target marker.
    pub survey: bool,
    /// Longitude of the left canvas edge, degrees.
    pub lon_left: f64,
    /// Longitude of the right canvas edge, degrees.
    pub lon_right: f64,
    /// Latitude of the bottom canvas row, degrees.
    pub lat_bottom: f64,
}

/// Read-only extent table for one deployment, indexed by integer id.
///
/// Detail extents occupy `first_detail..end_detail` in selection-priority
/// order; `whole_region` indexes the catch-all extent covering everything.
#[derive(Clone, Copy)]
pub struct MapCatalog {
    /// All extents for the deployment.
    pub extents: &'static [MapExtent],
    /// First detail extent index (inclusive).
    pub first_detail: usize,
    /// End of the detail extent range (exclusive).
    pub end_detail: usize,
    /// Index of the whole-region extent.
    pub whole_region: usize,
}

impl MapCatalog {
    /// Look up an extent by id.
    #[inline]
    pub fn extent(
        &self,
        index: usize,
    ) -> &'static MapExtent {
        &self.extents[index]
    }
}

// =============================================================================
// Projection
// =============================================================================

/// Project a geographic position to canvas pixels on the given extent.
///
/// Horizontal mapping is linear in longitude. Vertical mapping is true
/// Mercator: the extent's longitude span fixes the world-map width, and a
/// vertical offset anchors `lat_bottom` to the bottom canvas row. No
/// clamping is applied; see [`is_outside_canvas`].
pub fn project(
    point: GeoPoint,
    extent: &MapExtent,
) -> Point {
    let canvas_w = f64::from(CANVAS_WIDTH);
    let canvas_h = f64::from(CANVAS_HEIGHT);

    let lon_span = extent.lon_right - extent.lon_left;
    let lat_bottom_rad = extent.lat_bottom.to_radians();
    let lat_rad = point.latitude.to_radians();

    // Width of the whole-world Mercator map, in pixels, at this extent's scale.
    let world_width = canvas_w / lon_span * 360.0 / core::f64::consts::TAU;
    let offset_y = world_width / 2.0 * log((1.0 + sin(lat_bottom_rad)) / (1.0 - sin(lat_bottom_rad)));

    let x = ((point.longitude - extent.lon_left) * (canvas_w / lon_span)) as i32;
    let y = (canvas_h - (world_width / 2.0 * log((1.0 + sin(lat_rad)) / (1.0 - sin(lat_rad))) - offset_y)) as i32;

    Point::new(x, y)
}

/// Whether a projected pixel lies outside the canvas.
#[inline]
pub const fn is_outside_canvas(p: Point) -> bool {
    p.x < 0 || p.x >= CANVAS_WIDTH || p.y < 0 || p.y >= CANVAS_HEIGHT
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::BLACK;

    const TEST_EXTENT: MapExtent = MapExtent {
        label: "TEST",
        image: None,
        back_color: BLACK,
        survey: false,
        lon_left: -0.5,
        lon_right: -0.4,
        lat_bottom: 51.45,
    };

    #[test]
    fn test_projection_example_position() {
        // Mid-longitude position just north of the bottom edge. The x cast
        // truncates, so mid-longitude lands within one pixel of mid-width.
        let p = project(GeoPoint::new(51.46, -0.45), &TEST_EXTENT);
        assert!((159..=160).contains(&p.x), "Mid-longitude should project near mid-width, got x={}", p.x);
        assert!(p.y < CANVAS_HEIGHT, "North of the bottom edge draws above the bottom row, got y={}", p.y);
        assert!(p.y > 0, "Position near the bottom edge should still be on canvas, got y={}", p.y);
    }

    #[test]
    fn test_projection_anchors_bottom_latitude() {
        // The declared bottom latitude anchors the vertical offset: it lands
        // exactly one past the last row, so anything strictly north of it is
        // on canvas.
        let p = project(GeoPoint::new(51.45, -0.45), &TEST_EXTENT);
        assert_eq!(p.y, CANVAS_HEIGHT);
    }

    #[test]
    fn test_projection_monotonic_in_latitude() {
        // North of another point at the same longitude means a smaller y.
        let mut prev_y = i32::MAX;
        for i in 0..10 {
            let lat = 51.45 + 0.002 * f64::from(i);
            let p = project(GeoPoint::new(lat, -0.45), &TEST_EXTENT);
            assert!(p.y < prev_y, "Mercator must be monotonic in latitude (step {i}, y={})", p.y);
            prev_y = p.y;
        }
    }

    #[test]
    fn test_projection_linear_in_longitude() {
        // Horizontal mapping is linear; the truncating cast allows one pixel
        // of slack at fraction boundaries.
        let left = project(GeoPoint::new(51.46, -0.5), &TEST_EXTENT);
        let quarter = project(GeoPoint::new(51.46, -0.475), &TEST_EXTENT);
        let right = project(GeoPoint::new(51.46, -0.4), &TEST_EXTENT);
        assert_eq!(left.x, 0);
        assert!((79..=80).contains(&quarter.x), "Quarter span projects a quarter across, got {}", quarter.x);
        assert!(
            (319..=320).contains(&right.x),
            "The right-edge longitude projects at or one past the last column, got {}",
            right.x
        );
    }

    #[test]
    fn test_projection_outside_extent_is_off_canvas() {
        let p = project(GeoPoint::new(51.46, -0.3), &TEST_EXTENT);
        assert!(is_outside_canvas(p), "A longitude east of the extent must project off canvas");
    }

    #[test]
    fn test_projection_pole_singularity_is_out_of_range() {
        // Exactly +/-90 degrees hits the Mercator pole; the result is a far
        // out-of-range pixel, not a panic. Callers avoid feeding poles.
        let p = project(GeoPoint::new(90.0, -0.45), &TEST_EXTENT);
        assert!(is_outside_canvas(p), "The pole must land outside the canvas");
    }

    #[test]
    fn test_is_outside_canvas_bounds() {
        assert!(!is_outside_canvas(Point::new(0, 0)));
        assert!(!is_outside_canvas(Point::new(319, 239)));
        assert!(is_outside_canvas(Point::new(320, 0)));
        assert!(is_outside_canvas(Point::new(0, 240)));
        assert!(is_outside_canvas(Point::new(-1, 0)));
        assert!(is_outside_canvas(Point::new(0, -1)));
    }
}

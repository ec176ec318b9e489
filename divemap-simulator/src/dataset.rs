//! Demo deployment dataset: a diveable lake with detail maps, a survey
//! site, categorized waypoints, and a trace line.
//!
//! The geometry is a small lake around 51.466N 0.452W. Four extents:
//!
//! - `WRECK SITE` - tiny survey extent over the wreck, highest priority
//! - `LAKE NORTH` - detail extent with raster imagery
//! - `LAKE SOUTH` - detail extent, fill-only
//! - `WHOLE LAKE` - catch-all whole-region extent
//!
//! The handoff policy mirrors how the maps nest: the survey site hands back
//! to the north lake when the diver leaves it, the two detail maps hand off
//! to each other across their shared edge, and everything falls back to the
//! whole-lake map. From the whole-lake map, pixel zones over the detail
//! areas hand control back down.

use divemap_core::colors::WHITE;
use divemap_core::config::{CANVAS_HEIGHT, CANVAS_WIDTH, PIXEL_COUNT};
use divemap_core::{
    ExtentPolicy, GeoPoint, MapCatalog, MapExtent, MapImage, PixelZone, Waypoint, WaypointCategory, WaypointTable,
};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::Point;

// =============================================================================
// Extents
// =============================================================================

/// Extent ids, in catalog priority order (survey site first).
pub const WRECK_SITE: usize = 0;
pub const LAKE_NORTH: usize = 1;
pub const LAKE_SOUTH: usize = 2;
pub const WHOLE_LAKE: usize = 3;

/// Synthetic imagery for the north lake: deep-to-shallow water gradient
/// with a sand band along the top shoreline.
const fn north_lake_image() -> [u16; PIXEL_COUNT] {
    let mut data = [0u16; PIXEL_COUNT];
    let mut i = 0;
    while i < PIXEL_COUNT {
        let y = i as i32 / CANVAS_WIDTH;
        // Rgb565 words: deeper water toward the bottom rows.
        data[i] = if y < 14 {
            0xBDC3 // sand
        } else {
            let depth = (y * 18 / CANVAS_HEIGHT) as u16; // 0..18
            0x0200 + (18 - depth) // dark green-blue fading deeper
        };
        i += 1;
    }
    data
}

static NORTH_LAKE_PIXELS: [u16; PIXEL_COUNT] = north_lake_image();

static NORTH_LAKE_IMAGE: MapImage = MapImage {
    data: &NORTH_LAKE_PIXELS,
    swap_bytes: false,
};

pub static EXTENTS: [MapExtent; 4] = [
    MapExtent {
        label: "WRECK SITE",
        image: None,
        back_color: Rgb565::new(0, 24, 12),
        survey: true,
        lon_left: -0.4545,
        lon_right: -0.4515,
        lat_bottom: 51.4650,
    },
    MapExtent {
        label: "LAKE NORTH",
        image: Some(&NORTH_LAKE_IMAGE),
        back_color: Rgb565::new(0, 12, 14),
        survey: false,
        lon_left: -0.458,
        lon_right: -0.446,
        lat_bottom: 51.4615,
    },
    MapExtent {
        label: "LAKE SOUTH",
        image: None,
        back_color: Rgb565::new(0, 10, 16),
        survey: false,
        lon_left: -0.458,
        lon_right: -0.446,
        lat_bottom: 51.4505,
    },
    MapExtent {
        label: "WHOLE LAKE",
        image: None,
        back_color: Rgb565::new(0, 14, 18),
        survey: false,
        lon_left: -0.462,
        lon_right: -0.438,
        lat_bottom: 51.4505,
    },
];

pub static CATALOG: MapCatalog = MapCatalog {
    extents: &EXTENTS,
    first_detail: 0,
    end_detail: 3,
    whole_region: 3,
};

// =============================================================================
// Waypoints
// =============================================================================

const fn wp(
    lat: f64,
    lon: f64,
    category: WaypointCategory,
    label: &'static str,
) -> Waypoint {
    Waypoint {
        position: GeoPoint::new(lat, lon),
        category,
        label,
    }
}

pub static WAYPOINTS: [Waypoint; 20] = [
    // North lake features
    wp(51.4662, -0.4530, WaypointCategory::Container, "A1 Container"),
    wp(51.4668, -0.4521, WaypointCategory::BlueBuoy, "A2 Bus"),
    wp(51.4672, -0.4508, WaypointCategory::Platform, "A3 Platform 6m"),
    wp(51.4658, -0.4498, WaypointCategory::OrangeBuoy, "A4 Plane"),
    wp(51.4650, -0.4512, WaypointCategory::BlueBuoy, "A5 Caves"),
    wp(51.4645, -0.4535, WaypointCategory::NoBuoy, "A6 Old Boat"),
    wp(51.4640, -0.4489, WaypointCategory::Unmarked, "A7 Training Sq"),
    // Wreck site detail
    wp(51.4660, -0.4532, WaypointCategory::Unknown, "W1 Bow Anchor"),
    wp(51.4663, -0.4527, WaypointCategory::Unknown, "W2 Stern"),
    // South lake features
    wp(51.4598, -0.4520, WaypointCategory::Platform, "B1 Platform 3m"),
    wp(51.4590, -0.4505, WaypointCategory::BlueBuoy, "B2 Lightning Boat"),
    wp(51.4581, -0.4532, WaypointCategory::Container, "B3 Crushed Van"),
    wp(51.4570, -0.4495, WaypointCategory::OrangeBuoy, "B4 Gnome Garden"),
    wp(51.4558, -0.4515, WaypointCategory::NoBuoy, "B5 Dragon"),
    wp(51.4548, -0.4540, WaypointCategory::Unmarked, "B6 Quarry Wall"),
    wp(51.4535, -0.4508, WaypointCategory::Unknown, "B7 Deep Hole"),
    // Exits
    wp(51.4674, -0.4541, WaypointCategory::Jetty, "Z01 Main Jetty"),
    wp(51.4655, -0.4470, WaypointCategory::Jetty, "Z02 Cafe Steps"),
    wp(51.4575, -0.4555, WaypointCategory::Jetty, "Z03 Mid Jetty"),
    wp(51.4520, -0.4490, WaypointCategory::Jetty, "Z04 South Slip"),
];

pub static WAYPOINT_TABLE: WaypointTable = WaypointTable {
    waypoints: &WAYPOINTS,
    first: 0,
    end: 20,
};

/// Target labels the N key cycles through (three-character prefixes).
pub static TARGET_CYCLE: [&str; 6] = ["A1 ", "A2 ", "A4 ", "B1 ", "B4 ", "Z02"];

// =============================================================================
// Traces
// =============================================================================

/// Recorded survey swim line across the south lake.
pub static TRACES: [GeoPoint; 12] = [
    GeoPoint::new(51.4560, -0.4545),
    GeoPoint::new(51.4564, -0.4538),
    GeoPoint::new(51.4568, -0.4531),
    GeoPoint::new(51.4572, -0.4524),
    GeoPoint::new(51.4576, -0.4517),
    GeoPoint::new(51.4580, -0.4510),
    GeoPoint::new(51.4584, -0.4503),
    GeoPoint::new(51.4588, -0.4496),
    GeoPoint::new(51.4592, -0.4489),
    GeoPoint::new(51.4596, -0.4482),
    GeoPoint::new(51.4600, -0.4475),
    GeoPoint::new(51.4604, -0.4468),
];

// =============================================================================
// Handoff Policy
// =============================================================================

/// Margin (pixels) treated as "at the edge" for detail-map handoff.
const EDGE_MARGIN: i32 = 8;

/// Pixel zones on the whole-lake map, each paired with the detail extent it
/// hands control to. The survey zone is listed first so it wins inside the
/// north-lake area.
static WHOLE_LAKE_ZONES: [(PixelZone, usize); 3] = [
    (PixelZone::new(Point::new(100, 55), Point::new(140, 85), WHOLE_LAKE), WRECK_SITE),
    (PixelZone::new(Point::new(53, 3), Point::new(213, 120), WHOLE_LAKE), LAKE_NORTH),
    (PixelZone::new(Point::new(53, 121), Point::new(213, 240), WHOLE_LAKE), LAKE_SOUTH),
];

/// Registration marks for aligning the north-lake imagery.
static NORTH_LAKE_MARKS: [(Point, Rgb565); 2] = [
    (Point::new(10, 10), WHITE),
    (Point::new(310, 230), WHITE),
];

/// Map handoff rules for the demo lake.
pub struct LakePolicy;

impl ExtentPolicy for LakePolicy {
    fn next_extent(
        &self,
        pixel: Point,
        current: usize,
        catalog: &MapCatalog,
    ) -> usize {
        let off_canvas =
            pixel.x < 0 || pixel.x >= CANVAS_WIDTH || pixel.y < 0 || pixel.y >= CANVAS_HEIGHT;

        match current {
            // The survey site hands back to its containing detail map.
            WRECK_SITE => {
                if off_canvas {
                    LAKE_NORTH
                } else {
                    WRECK_SITE
                }
            }
            // The detail maps hand off across their shared edge, and fall
            // back to the whole lake anywhere else off-extent.
            LAKE_NORTH => {
                if pixel.y >= CANVAS_HEIGHT - EDGE_MARGIN {
                    LAKE_SOUTH
                } else if off_canvas {
                    catalog.whole_region
                } else {
                    LAKE_NORTH
                }
            }
            LAKE_SOUTH => {
                if pixel.y < EDGE_MARGIN {
                    LAKE_NORTH
                } else if off_canvas {
                    catalog.whole_region
                } else {
                    LAKE_SOUTH
                }
            }
            // From the whole lake, pixel zones hand control back down.
            _ => {
                for (zone, target) in &WHOLE_LAKE_ZONES {
                    if zone.contains(pixel, current) {
                        return *target;
                    }
                }
                current
            }
        }
    }

    fn registration_marks(
        &self,
        extent: usize,
    ) -> &[(Point, Rgb565)] {
        if extent == LAKE_NORTH { &NORTH_LAKE_MARKS } else { &[] }
    }
}

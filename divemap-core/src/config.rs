//! Layout and capacity constants for the map display.
//!
//! Layout values like the canvas center are computed at compile time as
//! `const`, avoiding per-frame arithmetic. Capacities for the bounded stores
//! (breadcrumb trail, placed pins, exit waypoints) live here so the memory
//! footprint of a display session is visible in one place.

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels.
pub const SCREEN_WIDTH: u32 = 320;

/// Display height in pixels.
pub const SCREEN_HEIGHT: u32 = 240;

/// Canvas width as i32 for pixel math.
pub const CANVAS_WIDTH: i32 = SCREEN_WIDTH as i32;

/// Canvas height as i32 for pixel math.
pub const CANVAS_HEIGHT: i32 = SCREEN_HEIGHT as i32;

/// Total pixel count of one full-screen surface.
pub const PIXEL_COUNT: usize = (SCREEN_WIDTH * SCREEN_HEIGHT) as usize;

/// Canvas center X coordinate. Pre-computed as i32 for text positioning.
pub const CENTER_X: i32 = CANVAS_WIDTH / 2;

/// Canvas center Y coordinate.
pub const CENTER_Y: i32 = CANVAS_HEIGHT / 2;

// =============================================================================
// Zoom Configuration
// =============================================================================

/// Minimum zoom level (whole extent on screen, 1x1 tile grid).
pub const MIN_ZOOM: i32 = 1;

/// Maximum zoom level (extent split into a 4x4 tile grid).
pub const MAX_ZOOM: i32 = 4;

// =============================================================================
// Bounded Store Capacities
// =============================================================================

/// Maximum number of recorded breadcrumbs per session. Recording stops
/// silently at capacity; old crumbs are never evicted.
pub const MAX_BREADCRUMBS: usize = 1000;

/// Maximum number of user-placed pins. Further placements are dropped.
pub const MAX_PLACED_PINS: usize = 50;

/// Maximum number of indexed exit waypoints. Extra label matches beyond this
/// are silently ignored at initialization.
pub const MAX_EXIT_WAYPOINTS: usize = 10;

// =============================================================================
// Waypoint Label Conventions
// =============================================================================

/// Waypoints whose label starts with this prefix are exits (jetties, ladders).
pub const EXIT_LABEL_PREFIX: &str = "Z0";

/// Number of leading label characters compared when selecting a target.
pub const TARGET_LABEL_PREFIX_LEN: usize = 3;

// =============================================================================
// Marker Geometry
// =============================================================================

/// Diver icon radius in pixels.
pub const DIVER_RADIUS: i32 = 10;

/// Heading dot radius on the rotated diver icon.
pub const DIVER_HEADING_DOT_RADIUS: i32 = 3;

/// Feature / target marker radius.
pub const FEATURE_RADIUS: i32 = 5;

/// Half-height of the breadcrumb triangle.
pub const BREADCRUMB_HALF: i32 = 10;

/// Side length of the placed-pin glyph.
pub const PIN_SIZE: u32 = 15;

/// Side length of a trace-point rectangle.
pub const TRACE_POINT_SIZE: u32 = 3;

/// Side length of the blinking record indicator square.
pub const RECORD_INDICATOR_SIZE: u32 = 30;

// =============================================================================
// Indicator Line Lengths
// =============================================================================

/// Length of the diver's own heading ray, in pixels.
pub const HEADING_LINE_LENGTH: i32 = 50;

/// Length of the nearest-exit ray when the exit is off-screen.
pub const EXIT_LINE_LENGTH: i32 = 100;

/// Length of the target ray when the target is off-screen.
pub const TARGET_LINE_LENGTH: i32 = 100;

// =============================================================================
// Trail Recording Cadence
// =============================================================================

/// Number of fixes between recorded breadcrumbs while recording is active.
pub const BREADCRUMB_DROP_FIX_COUNT: u8 = 10;

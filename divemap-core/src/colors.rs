//! Color constants for the map display.
//!
//! # Rgb565 Color Format
//!
//! Rgb565 uses 16 bits per pixel: 5 bits red, 6 bits green, 5 bits blue.
//! - Red: 0-31 (5 bits)
//! - Green: 0-63 (6 bits)
//! - Blue: 0-31 (5 bits)
//!
//! This format is native to the small TFT panels the display targets and
//! requires no conversion when the composited frame is pushed out.
//!
//! Standard colors come from the `RgbColor` trait constants; map-specific
//! colors (line colors, marker colors) are named for their role so drawing
//! code reads as intent rather than raw color values.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait - guaranteed optimal values)
// =============================================================================

/// Pure black (0, 0, 0). Screen clear color and fill for unknown areas.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white (31, 63, 31). Text and platform markers.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red (31, 0, 0). Target direction line and record indicator.
pub const RED: Rgb565 = Rgb565::RED;

/// Pure green (0, 63, 0). Nearest-exit direction line and jetty markers.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Pure blue (0, 0, 31). Diver heading line and blue buoy markers.
pub const BLUE: Rgb565 = Rgb565::BLUE;

/// Pure yellow (31, 63, 0). Diver icon.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

/// Magenta (31, 0, 31). Breadcrumb trail markers and unbuoyed features.
pub const MAGENTA: Rgb565 = Rgb565::MAGENTA;

/// Cyan (0, 63, 31). Current target marker and legend title.
pub const CYAN: Rgb565 = Rgb565::CYAN;

// =============================================================================
// Custom Colors (application-specific)
// =============================================================================

/// Orange (31, 45, 0). Orange buoy markers and the previous-target marker.
pub const ORANGE: Rgb565 = Rgb565::new(31, 45, 0);

/// Gold (31, 53, 0). Unmarked feature markers.
pub const GOLD: Rgb565 = Rgb565::new(31, 53, 0);

/// Brown (19, 19, 0). Uncategorized feature markers.
pub const BROWN: Rgb565 = Rgb565::new(19, 19, 0);

/// Dark gray (8, 16, 8). Trace-point outlines, subtle against map imagery.
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);

// =============================================================================
// Role Aliases (drawing code refers to these, not raw colors)
// =============================================================================

/// Diver icon body color.
pub const DIVER_COLOR: Rgb565 = YELLOW;

/// Heading dot on the rotated diver icon.
pub const DIVER_HEADING_DOT_COLOR: Rgb565 = RED;

/// Diver's own heading ray.
pub const HEADING_LINE_COLOR: Rgb565 = BLUE;

/// Line toward the nearest exit waypoint.
pub const EXIT_LINE_COLOR: Rgb565 = GREEN;

/// Line toward the current target waypoint.
pub const TARGET_LINE_COLOR: Rgb565 = RED;

/// Current target waypoint marker.
pub const TARGET_MARKER_COLOR: Rgb565 = CYAN;

/// Previously visited target waypoint marker.
pub const LAST_TARGET_MARKER_COLOR: Rgb565 = ORANGE;

/// Breadcrumb trail triangles.
pub const BREADCRUMB_COLOR: Rgb565 = MAGENTA;

/// Trace-point rectangles.
pub const TRACE_COLOR: Rgb565 = GRAY;

/// Placed pin glyph background.
pub const PIN_BACK_COLOR: Rgb565 = BLUE;

/// Placed pin glyph center dot.
pub const PIN_FORE_COLOR: Rgb565 = WHITE;

/// Blinking record indicator square.
pub const RECORD_INDICATOR_COLOR: Rgb565 = RED;

//! Zoom-tile location within an extent's canvas.
//!
//! At zoom Z the canvas splits the active extent into a Z x Z grid of tiles,
//! each displayed full-screen. [`locate_tile`] takes a pixel in full-extent
//! coordinates and computes which tile it falls on plus its position in that
//! tile's local coordinate space (the full-extent pixel scaled up by the
//! zoom factor with the tile origin subtracted).
//!
//! Overlay drawing uses the returned tile for visibility: an overlay item is
//! drawn only when its tile equals the tile currently displayed (the
//! diver's own tile), so items from neighboring tiles never bleed onto the
//! screen at high zoom.

use embedded_graphics::prelude::Point;

use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH};

// =============================================================================
// Tile Types
// =============================================================================

/// One cell of the zoom x zoom grid subdividing an extent's canvas.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Tile {
    /// Column index, 0..zoom.
    pub x: i32,
    /// Row index, 0..zoom.
    pub y: i32,
}

impl Tile {
    /// Create a tile coordinate.
    pub const fn new(
        x: i32,
        y: i32,
    ) -> Self {
        Self { x, y }
    }
}

/// A pixel located on the tile grid: local coordinates plus owning tile.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TilePixel {
    /// Pixel coordinates local to the displayed tile.
    pub local: Point,
    /// The tile the pixel falls on.
    pub tile: Tile,
}

// =============================================================================
// Tile Location
// =============================================================================

/// Locate a full-extent pixel on the zoom grid.
///
/// For pixels on the grid the local coordinates are
/// `pixel * zoom - canvas_size * tile_index`, i.e. coordinates on a
/// zoom-times-canvas virtual surface with the displayed tile's origin
/// subtracted.
///
/// Pixels beyond the grid (past the last tile boundary, which can happen for
/// positions at the very edge of an extent) are NOT clamped: the result
/// carries tile (0, 0) and the unclamped scaled pixel. Consumers compare the
/// tile against the displayed tile, so such items simply don't draw this
/// frame instead of drawing in the wrong place.
pub fn locate_tile(
    p: Point,
    zoom: i32,
) -> TilePixel {
    let tile_x = p.x / (CANVAS_WIDTH / zoom);
    let tile_y = p.y / (CANVAS_HEIGHT / zoom);

    if tile_x >= 0 && tile_x < zoom && tile_y >= 0 && tile_y < zoom {
        TilePixel {
            local: Point::new(p.x * zoom - CANVAS_WIDTH * tile_x, p.y * zoom - CANVAS_HEIGHT * tile_y),
            tile: Tile::new(tile_x, tile_y),
        }
    } else {
        // Off the tracked grid: unclamped scaled pixel, tile pinned to (0,0).
        TilePixel {
            local: Point::new(p.x * zoom, p.y * zoom),
            tile: Tile::new(0, 0),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH};

    #[test]
    fn test_zoom_one_is_identity() {
        // At zoom 1 the whole extent is one tile and pixels pass through.
        for p in [Point::new(0, 0), Point::new(160, 120), Point::new(319, 239)] {
            let tp = locate_tile(p, 1);
            assert_eq!(tp.tile, Tile::new(0, 0), "Zoom 1 has a single tile");
            assert_eq!(tp.local, p, "Zoom 1 must not rescale pixels");
        }
    }

    #[test]
    fn test_zoom_two_quadrants() {
        let tp = locate_tile(Point::new(10, 10), 2);
        assert_eq!(tp.tile, Tile::new(0, 0));
        assert_eq!(tp.local, Point::new(20, 20));

        let tp = locate_tile(Point::new(170, 130), 2);
        assert_eq!(tp.tile, Tile::new(1, 1));
        assert_eq!(tp.local, Point::new(170 * 2 - 320, 130 * 2 - 240));
    }

    #[test]
    fn test_example_position_recomputes_tile_on_zoom_change() {
        // The projected example position lands mid-canvas; switching zoom
        // from 1 to 2 must produce indices within {0,1} x {0,1}.
        let p = Point::new(160, 214);
        let z1 = locate_tile(p, 1);
        assert_eq!(z1.tile, Tile::new(0, 0));
        let z2 = locate_tile(p, 2);
        assert!(z2.tile.x < 2 && z2.tile.y < 2, "Zoom 2 indices must be in {{0,1}}");
        assert_eq!(z2.tile, Tile::new(1, 1));
    }

    #[test]
    fn test_partition_covers_every_canvas_pixel_exactly_once() {
        // For zooms dividing the canvas evenly, every on-canvas pixel maps to
        // exactly one tile in [0, zoom)^2.
        for zoom in [1, 2, 4] {
            for y in 0..CANVAS_HEIGHT {
                for x in 0..CANVAS_WIDTH {
                    let tp = locate_tile(Point::new(x, y), zoom);
                    assert!(
                        tp.tile.x >= 0 && tp.tile.x < zoom && tp.tile.y >= 0 && tp.tile.y < zoom,
                        "Tile {:?} out of range at ({x},{y}) zoom {zoom}",
                        tp.tile
                    );
                }
            }
        }
    }

    #[test]
    fn test_zoom_three_rightmost_columns_fall_off_grid() {
        // 320 / 3 truncates to 106, so tile boundaries sit at 106 and 212 and
        // the last two pixel columns compute tile index 3. They take the
        // off-grid branch instead of joining the rightmost tile; another
        // extent-edge quirk kept deliberately.
        let tp = locate_tile(Point::new(318, 100), 3);
        assert_eq!(tp.tile, Tile::new(0, 0), "Columns past the truncated grid pin to (0,0)");
        assert_eq!(tp.local.x, 318 * 3);
    }

    #[test]
    fn test_local_coordinates_within_tile_grid() {
        // With canvas dimensions divisible by the zoom, local coordinates
        // stay within [0, canvas) on the displayed tile.
        for zoom in [2, 4] {
            for y in (0..CANVAS_HEIGHT).step_by(11) {
                for x in (0..CANVAS_WIDTH).step_by(11) {
                    let tp = locate_tile(Point::new(x, y), zoom);
                    assert!(
                        (0..CANVAS_WIDTH).contains(&tp.local.x) && (0..CANVAS_HEIGHT).contains(&tp.local.y),
                        "Local {:?} escapes the canvas at ({x},{y}) zoom {zoom}",
                        tp.local
                    );
                }
            }
        }
    }

    #[test]
    fn test_off_grid_pixel_is_unclamped_with_zero_tile() {
        // A pixel past the last tile boundary comes back with tile (0,0) and
        // the raw scaled coordinates. This reads like an extent-edge glitch
        // (the pixel could instead clamp to the nearest valid tile) but is
        // load-bearing: the zero tile rarely matches the displayed tile, so
        // edge items skip a frame rather than draw misplaced.
        let tp = locate_tile(Point::new(CANVAS_WIDTH, CANVAS_HEIGHT), 2);
        assert_eq!(tp.tile, Tile::new(0, 0), "Off-grid pixels pin to tile (0,0)");
        assert_eq!(
            tp.local,
            Point::new(CANVAS_WIDTH * 2, CANVAS_HEIGHT * 2),
            "Off-grid pixels keep the unclamped scaled coordinates"
        );
    }

    #[test]
    fn test_far_negative_pixel_is_off_grid() {
        let tp = locate_tile(Point::new(-CANVAS_WIDTH, 10), 2);
        assert_eq!(tp.tile, Tile::new(0, 0));
        assert_eq!(tp.local.x, -CANVAS_WIDTH * 2, "Negative off-grid pixels are unclamped too");
    }
}

//! Owned full-screen drawing surface and the raster blit path.
//!
//! [`MapCanvas`] is one canvas worth of Rgb565 pixels implementing
//! `DrawTarget`, used as the base-layer cache: the extent raster plus
//! feature markers are rendered into it once, then blitted to the composite
//! target every frame until a map/zoom/tile change invalidates it. The
//! surface is exclusively owned by the display core for the session; there
//! is exactly one writer and no concurrent readers, so no locking exists
//! anywhere in the pipeline.
//!
//! [`draw_raster_tile`] scales the selected zoom-grid tile of a full-canvas
//! raster image up to fill the whole canvas with nearest-neighbor sampling,
//! optionally swapping the byte order of each pixel word for imagery stored
//! in DMA layout.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::colors::BLACK;
use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH, PIXEL_COUNT, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::extent::MapImage;
use crate::tile::Tile;

// =============================================================================
// Owned Canvas
// =============================================================================

/// A full-screen Rgb565 surface owned by the display core.
pub struct MapCanvas {
    pixels: [Rgb565; PIXEL_COUNT],
}

impl MapCanvas {
    /// A black canvas.
    pub const fn new() -> Self {
        Self {
            pixels: [BLACK; PIXEL_COUNT],
        }
    }

    /// Read one pixel; `None` outside the canvas.
    pub fn pixel(
        &self,
        p: Point,
    ) -> Option<Rgb565> {
        if p.x < 0 || p.x >= CANVAS_WIDTH || p.y < 0 || p.y >= CANVAS_HEIGHT {
            return None;
        }
        Some(self.pixels[(p.y * CANVAS_WIDTH + p.x) as usize])
    }

    /// Fill the whole canvas with one color.
    pub fn fill(
        &mut self,
        color: Rgb565,
    ) {
        self.pixels.fill(color);
    }

    /// Blit the whole canvas onto another target at the origin.
    pub fn push_to<D>(
        &self,
        target: &mut D,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        target
            .fill_contiguous(
                &Rectangle::new(Point::zero(), Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)),
                self.pixels.iter().copied(),
            )
            .ok();
    }
}

impl Default for MapCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for MapCanvas {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl DrawTarget for MapCanvas {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            if p.x >= 0 && p.x < CANVAS_WIDTH && p.y >= 0 && p.y < CANVAS_HEIGHT {
                self.pixels[(p.y * CANVAS_WIDTH + p.x) as usize] = color;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Raster Blit
// =============================================================================

/// Scale one zoom-grid tile of a full-canvas raster image to fill the target.
///
/// Nearest-neighbor: destination pixel (x, y) samples the source at
/// `(tile_origin + x / zoom, tile_origin + y / zoom)`. Source rows are
/// `CANVAS_WIDTH` words wide; short image data reads as black rather than
/// failing.
pub fn draw_raster_tile<D>(
    target: &mut D,
    image: &MapImage,
    zoom: i32,
    tile: Tile,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let origin_x = tile.x * (CANVAS_WIDTH / zoom);
    let origin_y = tile.y * (CANVAS_HEIGHT / zoom);

    let colors = (0..PIXEL_COUNT as i32).map(|i| {
        let sx = origin_x + (i % CANVAS_WIDTH) / zoom;
        let sy = origin_y + (i / CANVAS_WIDTH) / zoom;
        let word = image.data.get((sy * CANVAS_WIDTH + sx) as usize).copied().unwrap_or(0);
        let word = if image.swap_bytes { word.swap_bytes() } else { word };
        Rgb565::from(RawU16::new(word))
    });

    target
        .fill_contiguous(&Rectangle::new(Point::zero(), Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)), colors)
        .ok();
}

// =============================================================================
// Unit Tests
// =============================================================================

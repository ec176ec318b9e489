//! Active-map resolution: which extent and tile are on screen.
//!
//! The selector is a small state machine over extent identity, zoom, and the
//! show-whole-region mode:
//!
//! - With no active extent (start of session, or after an invalidation) the
//!   first fix scans the detail extents in catalog priority order and picks
//!   the first whose projected diver pixel lands on the canvas, falling back
//!   to the whole-region extent.
//! - With an active extent, each fix re-projects the diver against it and
//!   asks the deployment's [`ExtentPolicy`] whether a neighboring extent
//!   should take over. This is how detail maps hand off to each other and to
//!   the whole-region map as the diver crosses extent edges.
//! - Zoom cycling runs 1 -> 2 -> 3 -> 4 -> whole-region -> 1. Entering the
//!   whole-region mode forces zoom 1 on the whole-region extent; leaving it
//!   clears the active extent so the next fix re-resolves.
//!
//! Every transition that changes the extent, zoom, or displayed tile marks
//! the base layer dirty, forcing a full base redraw on the next compositing
//! pass. Unchanged frames keep the cached base layer and only redraw
//! overlays, which is the main performance lever on the target hardware.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::Point;

use crate::config::{MAX_ZOOM, MIN_ZOOM};
use crate::extent::{MapCatalog, is_outside_canvas, project};
use crate::geo::GeoPoint;
use crate::tile::{Tile, TilePixel, locate_tile};

// =============================================================================
// Deployment Policy Hooks
// =============================================================================

/// Per-deployment map-handoff strategy.
///
/// The core does not know the shape of a deployment's region; the policy
/// decides, from the diver's projected pixel on the active extent, which
/// extent should be active next. Implementations typically test the pixel
/// against [`PixelZone`]s covering the handoff edges.
pub trait ExtentPolicy {
    /// Choose the next active extent given the diver's pixel on the current
    /// one. Returning `current` keeps the active extent.
    fn next_extent(
        &self,
        pixel: Point,
        current: usize,
        catalog: &MapCatalog,
    ) -> usize;

    /// Calibration marks stamped on an extent's base layer. Default: none.
    fn registration_marks(
        &self,
        _extent: usize,
    ) -> &[(Point, Rgb565)] {
        &[]
    }
}

/// A pixel-space rectangle on a specific extent, for handoff tests.
#[derive(Clone, Copy, Debug)]
pub struct PixelZone {
    /// Top-left corner, inclusive.
    pub top_left: Point,
    /// Bottom-right corner, inclusive.
    pub bottom_right: Point,
    /// Extent this zone is defined on.
    pub extent: usize,
}

impl PixelZone {
    /// Create a zone on an extent.
    pub const fn new(
        top_left: Point,
        bottom_right: Point,
        extent: usize,
    ) -> Self {
        Self { top_left, bottom_right, extent }
    }

    /// Whether a pixel on the given extent falls inside this zone.
    pub const fn contains(
        &self,
        p: Point,
        extent: usize,
    ) -> bool {
        extent == self.extent
            && p.x >= self.top_left.x
            && p.y >= self.top_left.y
            && p.x <= self.bottom_right.x
            && p.y <= self.bottom_right.y
    }
}

// =============================================================================
// Selector State
// =============================================================================

/// Outcome of resolving one fix against the catalog.
#[derive(Clone, Copy, Debug)]
pub struct Resolution {
    /// The extent to display this frame.
    pub extent: usize,
    /// The diver's pixel located on the zoom grid of that extent.
    pub diver: TilePixel,
    /// Whether the base layer must be fully redrawn this frame.
    pub base_dirty: bool,
}

/// Display-session state: active extent, zoom, displayed tile, region mode.
pub struct MapSelector {
    current: Option<usize>,
    zoom: i32,
    prev_zoom: i32,
    tile: Tile,
    show_all_region: bool,
}

impl MapSelector {
    /// Fresh session state: no active extent, zoom 1.
    pub const fn new() -> Self {
        Self {
            current: None,
            zoom: MIN_ZOOM,
            prev_zoom: MIN_ZOOM,
            tile: Tile::new(0, 0),
            show_all_region: false,
        }
    }

    /// Current zoom level.
    #[inline]
    pub const fn zoom(&self) -> i32 {
        self.zoom
    }

    /// The tile currently displayed.
    #[inline]
    pub const fn tile(&self) -> Tile {
        self.tile
    }

    /// The active extent, if resolved.
    #[inline]
    pub const fn current(&self) -> Option<usize> {
        self.current
    }

    /// Whether the whole-region mode is active.
    #[inline]
    pub const fn is_all_region_shown(&self) -> bool {
        self.show_all_region
    }

    /// Force a specific extent to be active (map browsing).
    pub const fn set_current(
        &mut self,
        extent: Option<usize>,
    ) {
        self.current = extent;
    }

    /// Drop the active extent so the next fix re-resolves from scratch.
    pub const fn invalidate(&mut self) {
        self.current = None;
    }

    /// Reset to session-start state.
    pub const fn clear(&mut self) {
        self.current = None;
        self.zoom = MIN_ZOOM;
        self.prev_zoom = MIN_ZOOM;
        self.tile = Tile::new(0, 0);
        self.show_all_region = false;
    }

    /// Set the zoom level directly. Leaves whole-region mode if active.
    pub const fn set_zoom(
        &mut self,
        zoom: i32,
    ) {
        self.prev_zoom = self.zoom;
        if self.show_all_region {
            self.show_all_region = false;
            self.current = None;
        }
        self.zoom = zoom;
    }

    /// Advance the zoom cycle: 1 -> 2 -> 3 -> 4 -> whole-region -> 1.
    pub const fn cycle_zoom(
        &mut self,
        catalog: &MapCatalog,
    ) {
        self.prev_zoom = self.zoom;

        if self.show_all_region {
            self.show_all_region = false;
            self.zoom = MIN_ZOOM;
            self.current = None;
        } else if self.zoom == MAX_ZOOM {
            self.show_all_region = true;
            self.zoom = MIN_ZOOM;
            self.current = Some(catalog.whole_region);
        } else {
            self.zoom += 1;
        }
    }

    /// Enter or leave whole-region mode directly. No-op when already there.
    pub const fn set_all_region_shown(
        &mut self,
        show_all: bool,
        catalog: &MapCatalog,
    ) {
        if self.show_all_region == show_all {
            return;
        }

        self.zoom = MIN_ZOOM;
        if show_all {
            self.show_all_region = true;
            self.current = Some(catalog.whole_region);
        } else {
            self.show_all_region = false;
            self.current = None;
        }
    }

    /// Resolve one fix: pick the extent and tile to display and decide
    /// whether the base layer needs a redraw.
    ///
    /// `cache_enabled` reflects whether a base-layer cache exists; without
    /// one the base is redrawn every frame regardless of state changes.
    pub fn resolve<P: ExtentPolicy>(
        &mut self,
        position: GeoPoint,
        catalog: &MapCatalog,
        policy: &P,
        cache_enabled: bool,
    ) -> Resolution {
        let mut force_redraw = false;

        let current = match self.current {
            Some(index) => index,
            None => {
                force_redraw = true;
                self.locate_initial(position, catalog)
            }
        };

        let mut p = project(position, catalog.extent(current));

        // Whole-region mode pins the extent; otherwise the deployment policy
        // may hand off to a neighbor.
        let next = if self.show_all_region {
            current
        } else {
            policy.next_extent(p, current, catalog)
        };
        if next != current {
            p = project(position, catalog.extent(next));
        }

        let prev_tile = self.tile;
        let diver = locate_tile(p, self.zoom);
        self.tile = diver.tile;

        if self.prev_zoom != self.zoom {
            force_redraw = true;
            self.prev_zoom = self.zoom;
        }

        let base_dirty = !cache_enabled || next != current || prev_tile != self.tile || force_redraw;

        self.current = Some(next);
        Resolution { extent: next, diver, base_dirty }
    }

    /// First-fix scan: detail extents in priority order, whole-region fallback.
    fn locate_initial(
        &mut self,
        position: GeoPoint,
        catalog: &MapCatalog,
    ) -> usize {
        for index in catalog.first_detail..catalog.end_detail {
            let p = project(position, catalog.extent(index));
            if !is_outside_canvas(p) {
                self.tile = locate_tile(p, self.zoom).tile;
                return index;
            }
        }
        catalog.whole_region
    }
}

impl Default for MapSelector {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

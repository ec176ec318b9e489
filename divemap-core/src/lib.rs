//! Tiled-map navigation display engine for an underwater diver HUD.
//!
//! Given a stream of position/heading fixes, this crate selects the correct
//! map extent, projects geographic coordinates to screen pixels, and
//! composites a multi-layer scene (base map, feature markers, breadcrumb
//! trail, placed pins, directional indicators, diver icon) onto any
//! `embedded-graphics` draw target, redrawing the expensive base layer only
//! when the extent, zoom, or displayed tile changes.
//!
//! - [`geo`]: great-circle distance and bearing between fixes
//! - [`extent`]: map extents, catalogs, and the Mercator projection
//! - [`tile`]: zoom-grid tile location
//! - [`selector`]: active-map state machine and deployment policy hooks
//! - [`compositor`]: the per-fix layered rendering pipeline
//! - [`trail`]: breadcrumb recording and placed pins
//! - [`waypoint`]: waypoint tables, categories, exit index
//! - [`canvas`]: the owned base-layer surface and raster blits
//! - [`markers`]: primitive marker drawing
//! - [`colors`] / [`config`] / [`styles`]: palette, layout, text styles
//! - [`events`]: display event ring buffer
//!
//! # no_std Compatibility
//!
//! The crate is `no_std`: all storage is fixed-capacity (`heapless`), f64
//! trig comes from `libm`, and rendering goes through generic
//! `DrawTarget`s. Unit tests run on the host.

#![no_std]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod canvas;
pub mod colors;
pub mod compositor;
pub mod config;
pub mod events;
pub mod extent;
pub mod geo;
pub mod markers;
pub mod selector;
pub mod styles;
pub mod tile;
pub mod trail;
pub mod waypoint;

// Re-export the session-facing types
pub use compositor::{MapScreen, NavReadout, WaypointReadout};
pub use events::DebugLog;
pub use extent::{MapCatalog, MapExtent, MapImage};
pub use geo::{Fix, GeoPoint, degrees_course_to, distance_between};
pub use selector::{ExtentPolicy, PixelZone};
pub use tile::Tile;
pub use waypoint::{Waypoint, WaypointCategory, WaypointTable};

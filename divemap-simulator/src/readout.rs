//! Debug page: navigation readout numbers and the event log tail.
//!
//! Rendered in place of the map so the derived bearings/distances the core
//! reports each frame can be eyeballed against the picture. All text goes
//! through `heapless::String`, matching the display core's no-heap
//! formatting.

use core::fmt::Write;

use divemap_core::colors::{BLACK, CYAN, GREEN, RED};
use divemap_core::styles::{LEFT_ALIGNED, VALUE_STYLE_WHITE};
use divemap_core::{DebugLog, Fix, NavReadout, WaypointReadout};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;

/// Row height for readout lines.
const LINE_STEP: i32 = 12;

/// Left margin for all text.
const MARGIN_X: i32 = 6;

fn draw_line<D>(
    display: &mut D,
    y: i32,
    color: Rgb565,
    text: &str,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Text::with_text_style(
        text,
        Point::new(MARGIN_X, y),
        MonoTextStyle::new(&FONT_6X10, color),
        LEFT_ALIGNED,
    )
    .draw(display)
    .ok();
}

fn format_waypoint_line(
    out: &mut heapless::String<48>,
    name: &str,
    readout: Option<WaypointReadout>,
) {
    match readout {
        Some(r) => {
            let _ = write!(out, "{name} #{:02} {:6.1}m {:3.0}deg", r.index, r.distance, r.bearing);
        }
        None => {
            let _ = write!(out, "{name} --");
        }
    }
}

/// Draw the full debug page.
#[allow(clippy::too_many_arguments)]
pub fn draw_debug_page<D>(
    display: &mut D,
    fix: Fix,
    readout: &NavReadout,
    zoom: i32,
    extent_label: &str,
    crumb_count: usize,
    recording: bool,
    log: &DebugLog,
) where
    D: DrawTarget<Color = Rgb565>,
{
    display.clear(BLACK).ok();

    Text::with_text_style("NAV READOUT", Point::new(MARGIN_X, 18), VALUE_STYLE_WHITE, LEFT_ALIGNED)
        .draw(display)
        .ok();

    let mut y = 40;

    let mut line: heapless::String<48> = heapless::String::new();
    let _ = write!(line, "FIX  {:9.5} {:9.5} {:3.0}deg", fix.position.latitude, fix.position.longitude, fix.heading);
    draw_line(display, y, CYAN, &line);
    y += LINE_STEP;

    let mut line: heapless::String<48> = heapless::String::new();
    let _ = write!(line, "MAP  {extent_label}  ZOOM {zoom}");
    draw_line(display, y, CYAN, &line);
    y += LINE_STEP + 6;

    let mut line: heapless::String<48> = heapless::String::new();
    format_waypoint_line(&mut line, "EXIT", readout.nearest_exit);
    draw_line(display, y, GREEN, &line);
    y += LINE_STEP;

    let mut line: heapless::String<48> = heapless::String::new();
    format_waypoint_line(&mut line, "TGT ", readout.target);
    draw_line(display, y, RED, &line);
    y += LINE_STEP;

    let mut line: heapless::String<48> = heapless::String::new();
    format_waypoint_line(&mut line, "NEAR", readout.nearest_feature);
    draw_line(display, y, divemap_core::colors::WHITE, &line);
    y += LINE_STEP + 6;

    let mut line: heapless::String<48> = heapless::String::new();
    let _ = write!(
        line,
        "TRAIL {crumb_count} crumbs  REC {}",
        if recording { "ON" } else { "OFF" }
    );
    draw_line(display, y, divemap_core::colors::YELLOW, &line);
    y += LINE_STEP + 6;

    // Event log tail, oldest first.
    for msg in log.iter() {
        draw_line(display, y, GREEN, msg);
        y += LINE_STEP;
    }
}

//! Dive navigation display simulator for Windows/Desktop.
//!
//! Drives the map display core against `embedded-graphics-simulator` with a
//! scripted dive path standing in for the positioning source. The diver
//! swims a slow loop around the demo lake, crossing the detail-map boundary
//! and the survey site, so every map handoff fires without real hardware.
//!
//! # Controls
//!
//! | Key | Action |
//! |-----|--------|
//! | `Z` | Cycle zoom (1 -> 2 -> 3 -> 4 -> whole lake -> 1) |
//! | `L` | Toggle whole-lake view directly |
//! | `T` | Toggle breadcrumb trail display |
//! | `R` | Toggle breadcrumb recording |
//! | `C` | Clear the breadcrumb trail |
//! | `P` | Place a pin at the diver's position |
//! | `N` | Cycle the target waypoint |
//! | `F` | Toggle the feature-marker layer |
//! | `H` | Toggle heading-rotated diver icon |
//! | `G` | Show the feature legend for two seconds |
//! | `Y` | Toggle the debug readout page |
//!
//! Key repeat is ignored to prevent toggle spam when holding keys.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]

mod dataset;
mod readout;

use core::fmt::Write as _;
use std::sync::atomic::{AtomicU8, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use divemap_core::colors::BLACK;
use divemap_core::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use divemap_core::{DebugLog, Fix, MapScreen, degrees_course_to};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};

use crate::dataset::{CATALOG, LakePolicy, TARGET_CYCLE, TRACES, WAYPOINT_TABLE};
use crate::readout::draw_debug_page;

/// Target frame time; fixes arrive at ~25 Hz.
const FRAME_TIME: Duration = Duration::from_millis(40);

/// Record-state notifications latched by the callback until the main loop
/// drains them into the event log (the callback is a plain fn pointer).
static REC_EVENT: AtomicU8 = AtomicU8::new(REC_NONE);
const REC_NONE: u8 = 0;
const REC_ON: u8 = 1;
const REC_OFF: u8 = 2;

fn record_state_changed(recording: bool) {
    REC_EVENT.store(if recording { REC_ON } else { REC_OFF }, Ordering::SeqCst);
}

/// Pages the Y key toggles between.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
enum Page {
    #[default]
    Map,
    Debug,
}

impl Page {
    const fn toggle(self) -> Self {
        match self {
            Self::Map => Self::Debug,
            Self::Debug => Self::Map,
        }
    }
}

/// Scripted dive path: a slow loop straddling the north/south boundary,
/// grazing the survey site at the top of each lap. Heading comes from the
/// path tangent so the diver icon and trail rotate like a real compass feed.
fn dive_path(t: f64) -> Fix {
    let lat = 51.4615 + 0.0042 * (t * 0.05).sin() + 0.0004 * (t * 0.31).sin();
    let lon = -0.4520 + 0.0044 * (t * 0.05).cos() + 0.0005 * (t * 0.23).sin();

    let here = divemap_core::GeoPoint::new(lat, lon);
    let ahead = {
        let t = t + 0.4;
        divemap_core::GeoPoint::new(
            51.4615 + 0.0042 * (t * 0.05).sin() + 0.0004 * (t * 0.31).sin(),
            -0.4520 + 0.0044 * (t * 0.05).cos() + 0.0005 * (t * 0.23).sin(),
        )
    };

    Fix {
        position: here,
        heading: degrees_course_to(here, ahead),
    }
}

fn main() {
    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    let mut window = Window::new("Dive Nav Sim", &output_settings);

    display.clear(BLACK).ok();
    window.update(&display);

    // The display session. Base-layer caching on, as on hardware.
    let mut screen = MapScreen::new(CATALOG, WAYPOINT_TABLE, &TRACES, LakePolicy, true);
    screen.trail_mut().set_record_callback(record_state_changed);

    let mut log = DebugLog::new();
    log.push("Session started");

    // Main loop state
    let mut t = 0.0f64;
    let mut current_page = Page::default();
    let mut target_cycle_index: Option<usize> = None;
    let mut diver_rotated = true;

    'running: loop {
        let frame_start = Instant::now();

        let events: Vec<_> = window.events().collect();
        for ev in events {
            match ev {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    // Ignore OS key repeat to prevent toggle spam
                    if repeat {
                        continue;
                    }
                    match keycode {
                        Keycode::Z => {
                            screen.cycle_zoom();
                            if screen.is_all_region_shown() {
                                log.push("ZOOM: whole lake");
                            } else {
                                let mut msg: heapless::String<16> = heapless::String::new();
                                let _ = write!(msg, "ZOOM: {}", screen.zoom());
                                log.push(&msg);
                            }
                        }
                        Keycode::L => {
                            let show_all = !screen.is_all_region_shown();
                            screen.set_all_region_shown(show_all);
                            log.push(if show_all { "VIEW: whole lake" } else { "VIEW: detail" });
                        }
                        Keycode::T => {
                            screen.trail_mut().toggle_show_trail();
                            log.push(if screen.trail().is_trail_shown() {
                                "TRAIL: shown"
                            } else {
                                "TRAIL: hidden"
                            });
                        }
                        Keycode::R => {
                            screen.trail_mut().toggle_record();
                        }
                        Keycode::C => {
                            screen.trail_mut().clear();
                            log.push("TRAIL: cleared");
                        }
                        Keycode::P => {
                            screen.place_pin(0.0);
                            log.push("PIN placed");
                        }
                        Keycode::N => {
                            let next = target_cycle_index.map_or(0, |i| (i + 1) % TARGET_CYCLE.len());
                            target_cycle_index = Some(next);
                            screen.set_target_by_label(TARGET_CYCLE[next]);
                            let mut msg: heapless::String<16> = heapless::String::new();
                            let _ = write!(msg, "TGT {}", TARGET_CYCLE[next]);
                            log.push(&msg);
                        }
                        Keycode::F => {
                            screen.toggle_draw_all_features();
                            log.push(if screen.draw_all_features() {
                                "FEATURES: on"
                            } else {
                                "FEATURES: off"
                            });
                        }
                        Keycode::H => {
                            diver_rotated = !diver_rotated;
                            screen.set_use_diver_heading(diver_rotated);
                            log.push(if diver_rotated { "DIVER: rotated" } else { "DIVER: plain" });
                        }
                        Keycode::G => {
                            screen.draw_legend(&mut display);
                            window.update(&display);
                            thread::sleep(Duration::from_secs(2));
                        }
                        Keycode::Y => {
                            current_page = current_page.toggle();
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        // Drain record-state notifications latched by the callback.
        match REC_EVENT.swap(REC_NONE, Ordering::SeqCst) {
            REC_ON => log.push("REC ON"),
            REC_OFF => log.push("REC OFF"),
            _ => {}
        }

        // One fix per frame, exactly as the positioning source would pace it.
        let fix = dive_path(t);

        match current_page {
            Page::Map => {
                screen.update(&mut display, fix);
            }
            Page::Debug => {
                // The map keeps tracking underneath; only the rendering
                // target switches to the readout page.
                let readout = screen.update(&mut display, fix);
                let extent_label = screen
                    .current_extent()
                    .map_or("--", |index| CATALOG.extent(index).label);
                draw_debug_page(
                    &mut display,
                    fix,
                    &readout,
                    screen.zoom(),
                    extent_label,
                    screen.trail().crumbs().len(),
                    screen.trail().is_recording(),
                    &log,
                );
            }
        }

        window.update(&display);

        t += 1.0;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_TIME {
            thread::sleep(FRAME_TIME - elapsed);
        }
    }
}

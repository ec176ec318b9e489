//! Breadcrumb trail recording and user-placed pins.
//!
//! The trail is an append-only, fixed-capacity sequence of breadcrumbs,
//! oldest first. While recording is enabled, a countdown gates how often a
//! fix is appended (one crumb every [`BREADCRUMB_DROP_FIX_COUNT`] fixes);
//! once the store is full new crumbs are silently dropped. Nothing is ever
//! evicted; only a bulk clear resets the trail.
//!
//! Recording and trail display are coupled: enabling recording turns the
//! display on, and turning the display off force-disables recording, since
//! recording without display has no use on this screen. Every recording
//! toggle fires the registered notification callback; a bulk clear fires it
//! regardless of the previous state so downstream listeners always learn
//! about trail invalidation.
//!
//! Pins share the crumb shape but live in their own store, are placed by
//! explicit user action, and survive until an explicit clear.

use heapless::Vec;

use crate::config::{BREADCRUMB_DROP_FIX_COUNT, MAX_BREADCRUMBS, MAX_PLACED_PINS};
use crate::geo::GeoPoint;

// =============================================================================
// Breadcrumb Data
// =============================================================================

/// One recorded historical fix.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct BreadCrumb {
    /// Position when the crumb was dropped.
    pub position: GeoPoint,
    /// Compass heading at the time, degrees.
    pub heading: f64,
    /// Depth at the time, meters. Zero when no depth source is attached.
    pub depth: f64,
}

impl BreadCrumb {
    /// Create a crumb from its parts.
    pub const fn new(
        position: GeoPoint,
        heading: f64,
        depth: f64,
    ) -> Self {
        Self { position, heading, depth }
    }
}

/// Notification fired whenever the recording state toggles.
pub type RecordCallback = fn(recording: bool);

// =============================================================================
// Trail Recorder
// =============================================================================

/// Fixed-capacity breadcrumb recorder with a fix-count drop cadence.
pub struct TrailRecorder {
    crumbs: Vec<BreadCrumb, MAX_BREADCRUMBS>,
    recording: bool,
    show_trail: bool,
    countdown: u8,
    drop_fix_count: u8,
    callback: Option<RecordCallback>,
}

impl TrailRecorder {
    /// New recorder: display on, recording off, empty trail.
    pub const fn new() -> Self {
        Self {
            crumbs: Vec::new(),
            recording: false,
            show_trail: true,
            countdown: 0,
            drop_fix_count: BREADCRUMB_DROP_FIX_COUNT,
            callback: None,
        }
    }

    /// New recorder with a custom drop cadence (fixes per crumb).
    pub const fn with_cadence(drop_fix_count: u8) -> Self {
        let mut recorder = Self::new();
        recorder.drop_fix_count = drop_fix_count;
        recorder
    }

    /// Register the recording-state notification callback.
    pub const fn set_record_callback(
        &mut self,
        callback: RecordCallback,
    ) {
        self.callback = Some(callback);
    }

    /// The recorded crumbs, oldest first.
    #[inline]
    pub fn crumbs(&self) -> &[BreadCrumb] {
        &self.crumbs
    }

    /// Whether recording is currently enabled.
    #[inline]
    pub const fn is_recording(&self) -> bool {
        self.recording
    }

    /// Whether the trail should be drawn.
    #[inline]
    pub const fn is_trail_shown(&self) -> bool {
        self.show_trail
    }

    /// Toggle trail display. Hiding the trail force-disables recording.
    pub fn toggle_show_trail(&mut self) {
        self.show_trail = !self.show_trail;

        if !self.show_trail && self.recording {
            self.toggle_record();
        }
    }

    /// Toggle recording. Enabling it turns the display on and re-arms the
    /// drop countdown. The notification callback fires on every toggle.
    pub fn toggle_record(&mut self) {
        self.recording = !self.recording;

        if self.recording {
            self.show_trail = true;
            self.countdown = self.drop_fix_count;
        }

        if let Some(callback) = self.callback {
            callback(self.recording);
        }
    }

    /// Set recording to a specific state (toggles only on change).
    pub fn set_record(
        &mut self,
        enable: bool,
    ) {
        if self.recording != enable {
            self.toggle_record();
        }
    }

    /// Wipe the trail and stop recording.
    ///
    /// Recording is forced on and toggled back off so the notification fires
    /// even if recording was already disabled; listeners must always hear
    /// about trail invalidation.
    pub fn clear(&mut self) {
        self.crumbs.clear();
        self.countdown = self.drop_fix_count;
        self.recording = true;
        self.toggle_record();
    }

    /// Feed one fix through the drop cadence.
    ///
    /// Returns whether the record indicator should be lit this frame (it
    /// blinks on alternating countdown parities while recording). When not
    /// recording this is a no-op returning `false`.
    pub fn on_fix(
        &mut self,
        position: GeoPoint,
        heading: f64,
        depth: f64,
    ) -> bool {
        if !self.recording {
            return false;
        }

        self.countdown = self.countdown.wrapping_sub(1);

        if !self.crumbs.is_full() && self.countdown == 0 {
            self.crumbs.push(BreadCrumb::new(position, heading, depth)).ok();
            self.countdown = self.drop_fix_count;
        }

        self.countdown % 2 == 1
    }
}

impl Default for TrailRecorder {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Placed Pins
// =============================================================================

/// Append-only store of user-placed pins. Full store drops new placements.
pub struct PinStore {
    pins: Vec<BreadCrumb, MAX_PLACED_PINS>,
}

impl PinStore {
    /// Empty pin store.
    pub const fn new() -> Self {
        Self { pins: Vec::new() }
    }

    /// Place a pin. Silently dropped once the store is full.
    pub fn place(
        &mut self,
        pin: BreadCrumb,
    ) {
        self.pins.push(pin).ok();
    }

    /// The placed pins, oldest first.
    #[inline]
    pub fn pins(&self) -> &[BreadCrumb] {
        &self.pins
    }

    /// Remove every placed pin.
    pub fn clear(&mut self) {
        self.pins.clear();
    }
}

impl Default for PinStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

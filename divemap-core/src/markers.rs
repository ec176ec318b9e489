//! Low-level marker drawing shared across overlay layers.
//!
//! Every marker is drawn with embedded-graphics primitives straight onto the
//! composite target each frame; there is no per-marker bitmap to rotate, so
//! heading-rotated markers (crumb triangles, the diver icon) rotate their
//! vertices instead. Rotation math is f32 - marker geometry is a handful of
//! pixels, well inside f32 precision.
//!
//! Thick lines are drawn as five strokes: the line itself plus four copies
//! with the start point offset in a small diamond. The panel has no
//! anti-aliasing support, and this is cheaper than a polygon fill at these
//! lengths.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle, RoundedRectangle, Triangle};
use micromath::F32;

use crate::colors::{
    BREADCRUMB_COLOR, DIVER_COLOR, DIVER_HEADING_DOT_COLOR, PIN_BACK_COLOR, PIN_FORE_COLOR, RECORD_INDICATOR_COLOR,
    TRACE_COLOR,
};
use crate::config::{
    BREADCRUMB_HALF, CANVAS_HEIGHT, DIVER_HEADING_DOT_RADIUS, DIVER_RADIUS, FEATURE_RADIUS, PIN_SIZE,
    RECORD_INDICATOR_SIZE, TRACE_POINT_SIZE,
};

// =============================================================================
// Rotation Helper
// =============================================================================

/// Rotate an offset around the origin by a compass heading (clockwise,
/// 0 = up) in screen coordinates (y grows downward). Rounded, not
/// truncated, so the approximated trig never shrinks a marker by a pixel.
fn rotate_offset(
    offset: Point,
    heading_degrees: f32,
) -> Point {
    let theta = F32(heading_degrees.to_radians());
    let (sin, cos) = (theta.sin().0, theta.cos().0);
    let x = offset.x as f32;
    let y = offset.y as f32;
    Point::new(
        F32(x * cos - y * sin).round().0 as i32,
        F32(x * sin + y * cos).round().0 as i32,
    )
}

// =============================================================================
// Feature / Trace / Pin Markers
// =============================================================================

/// Filled circle for a charted feature, colored by category.
pub fn draw_feature<D>(
    display: &mut D,
    center: Point,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Circle::with_center(center, (FEATURE_RADIUS * 2) as u32)
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(display)
        .ok();
}

/// Small outlined rectangle for a historical trace point.
pub fn draw_trace_point<D>(
    display: &mut D,
    center: Point,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Rectangle::new(center - Point::new(1, 1), Size::new(TRACE_POINT_SIZE, TRACE_POINT_SIZE))
        .into_styled(PrimitiveStyle::with_stroke(TRACE_COLOR, 1))
        .draw(display)
        .ok();
}

/// Heading-rotated triangle for one breadcrumb.
pub fn draw_breadcrumb<D>(
    display: &mut D,
    center: Point,
    heading_degrees: f32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let apex = Point::new(0, -BREADCRUMB_HALF);
    let base_left = Point::new(-BREADCRUMB_HALF / 2, BREADCRUMB_HALF);
    let base_right = Point::new(BREADCRUMB_HALF / 2, BREADCRUMB_HALF);

    Triangle::new(
        center + rotate_offset(apex, heading_degrees),
        center + rotate_offset(base_left, heading_degrees),
        center + rotate_offset(base_right, heading_degrees),
    )
    .into_styled(PrimitiveStyle::with_fill(BREADCRUMB_COLOR))
    .draw(display)
    .ok();
}

/// Fixed pin glyph: rounded square with a center dot.
pub fn draw_pin<D>(
    display: &mut D,
    center: Point,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let half = (PIN_SIZE / 2) as i32;
    let top_left = center - Point::new(half, half);

    RoundedRectangle::with_equal_corners(
        Rectangle::new(top_left, Size::new(PIN_SIZE, PIN_SIZE)),
        Size::new(4, 4),
    )
    .into_styled(PrimitiveStyle::with_fill(PIN_BACK_COLOR))
    .draw(display)
    .ok();

    Circle::with_center(center, 2 * (PIN_SIZE / 3))
        .into_styled(PrimitiveStyle::with_fill(PIN_FORE_COLOR))
        .draw(display)
        .ok();
}

// =============================================================================
// Diver Icon
// =============================================================================

/// The diver icon: filled circle, plus a heading dot near the rim when
/// rotated rendering is requested.
pub fn draw_diver<D>(
    display: &mut D,
    center: Point,
    heading_degrees: f32,
    rotated: bool,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Circle::with_center(center, (DIVER_RADIUS * 2) as u32)
        .into_styled(PrimitiveStyle::with_fill(DIVER_COLOR))
        .draw(display)
        .ok();

    if rotated {
        let dot_offset = Point::new(0, -(DIVER_RADIUS - DIVER_HEADING_DOT_RADIUS));
        let dot_center = center + rotate_offset(dot_offset, heading_degrees);
        Circle::with_center(dot_center, (DIVER_HEADING_DOT_RADIUS * 2) as u32)
            .into_styled(PrimitiveStyle::with_fill(DIVER_HEADING_DOT_COLOR))
            .draw(display)
            .ok();
    }
}

// =============================================================================
// Indicator Lines
// =============================================================================

/// Thickened line: the stroke itself plus four diamond-offset duplicates
/// around the start point.
pub fn draw_thick_line<D>(
    display: &mut D,
    from: Point,
    to: Point,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let style = PrimitiveStyle::with_stroke(color, 1);

    Line::new(from, to).into_styled(style).draw(display).ok();
    Line::new(from + Point::new(-2, -2), to).into_styled(style).draw(display).ok();
    Line::new(from + Point::new(-2, 2), to).into_styled(style).draw(display).ok();
    Line::new(from + Point::new(2, -2), to).into_styled(style).draw(display).ok();
    Line::new(from + Point::new(2, 2), to).into_styled(style).draw(display).ok();
}

/// Fixed-length ray from a point along a compass heading.
pub fn draw_ray<D>(
    display: &mut D,
    from: Point,
    heading_degrees: f32,
    length: i32,
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let rads = F32(heading_degrees.to_radians());
    let to = Point::new(
        from.x + F32(length as f32 * rads.sin().0).round().0 as i32,
        from.y - F32(length as f32 * rads.cos().0).round().0 as i32,
    );
    draw_thick_line(display, from, to, color);
}

// =============================================================================
// Record Indicator
// =============================================================================

/// Red square in the bottom-left corner while recording blinks on.
pub fn draw_record_indicator<D>(display: &mut D)
where
    D: DrawTarget<Color = Rgb565>,
{
    Rectangle::new(
        Point::new(0, CANVAS_HEIGHT - RECORD_INDICATOR_SIZE as i32 - 1),
        Size::new(RECORD_INDICATOR_SIZE, RECORD_INDICATOR_SIZE),
    )
    .into_styled(PrimitiveStyle::with_fill(RECORD_INDICATOR_COLOR))
    .draw(display)
    .ok();
}

// =============================================================================
// Unit Tests
// =============================================================================

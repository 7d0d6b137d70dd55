//! The render pipeline: background, axes and grid, course blocks, encode.
//!
//! One synchronous pass per call. The canvas, the shuffle stream, and the
//! color assignment are all constructed here and dropped after encoding, so
//! concurrent renders share nothing but the immutable theme and font data.

use crate::blur::gaussian_blur;
use crate::canvas::Canvas;
use crate::composite;
use crate::core::{ClockTime, Rgba8};
use crate::draw::{draw_text_centered, draw_text_right, fill_round_rect, hline};
use crate::encode::{encode_png, to_base64};
use crate::error::TimegridResult;
use crate::font::FontSet;
use crate::layout::GridGeometry;
use crate::model::{CourseRecord, RenderOutput, RenderRequest, WINDOW_START_HOUR};
use crate::palette::{ColorAssignment, SplitMix64};
use crate::theme::{Style, Theme};

/// Gap between a block edge and its column/row boundary. Adjacent blocks
/// never touch.
pub const INNER_MARGIN: f64 = 4.0;
/// Corner radius shared by every block and its shadow.
pub const CORNER_RADIUS: f64 = 12.0;

const SHADOW_OFFSET_Y: f64 = 10.0;
const SHADOW_ALPHA: u8 = 90;
const SHADOW_BLUR_RADIUS: u32 = 8;
const SHADOW_BLUR_SIGMA: f32 = 4.0;

const HEADER_TEXT_PX: f32 = 18.0;
const AXIS_TEXT_PX: f32 = 14.0;
const NAME_TEXT_PX: f32 = 16.0;
const LOCATION_TEXT_PX: f32 = 13.0;
const AXIS_LABEL_GAP: f64 = 8.0;
const LABEL_TOP_INSET: f64 = 8.0;

const DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Render the full timetable and wrap it in the transport envelope
/// (`timetable_<style>.png` plus base64 PNG bytes).
#[tracing::instrument(
    skip(request, fonts),
    fields(style = %request.style, courses = request.courses.len())
)]
pub fn render_timetable(request: &RenderRequest, fonts: &FontSet) -> TimegridResult<RenderOutput> {
    let style = Style::resolve(&request.style);
    let png = render_png(request, fonts)?;
    Ok(RenderOutput {
        filename: format!("timetable_{}.png", style.as_str()),
        filedata_encoded: to_base64(&png),
    })
}

/// Render the timetable to raw PNG bytes.
pub fn render_png(request: &RenderRequest, fonts: &FontSet) -> TimegridResult<Vec<u8>> {
    request.validate()?;

    let theme = Style::resolve(&request.style).theme();
    let config = request.canvas.unwrap_or_default();
    let geometry = GridGeometry::compute(&config)?;

    let mut rng = match request.seed {
        Some(seed) => SplitMix64::new(seed),
        None => SplitMix64::from_entropy(),
    };
    let mut colors = ColorAssignment::new(theme, &mut rng);

    let mut canvas = Canvas::new(config.width, config.height)?;
    canvas.paint_vertical_gradient(theme.background_top, theme.background_bottom);
    draw_axes_and_grid(&mut canvas, &geometry, theme, fonts);

    for course in &request.courses {
        draw_course(&mut canvas, &geometry, theme, &mut colors, fonts, course)?;
    }

    encode_png(&canvas, theme)
}

/// Day headers centered per column, hour labels right-aligned in the gutter,
/// and a rule line per row boundary (plus the closing bottom edge).
pub fn draw_axes_and_grid(
    canvas: &mut Canvas,
    geometry: &GridGeometry,
    theme: &Theme,
    fonts: &FontSet,
) {
    for day in 0..geometry.day_count {
        let label = day_label(day);
        let m = fonts.bold.measure(&label, HEADER_TEXT_PX);
        let cx = geometry.col_x(day) + geometry.col_width / 2.0;
        let y = geometry.padding + (geometry.header_height - m.height) / 2.0;
        draw_text_centered(canvas, &fonts.bold, &label, HEADER_TEXT_PX, cx, y, theme.axis_text);
    }

    let grid_right = geometry.grid_x + geometry.grid_width;
    for slot in 0..=geometry.slot_count {
        let y = geometry.row_y(slot);
        hline(canvas, geometry.grid_x, grid_right, y, theme.rule);
        if slot < geometry.slot_count {
            let label = time_label(slot);
            let m = fonts.regular.measure(&label, AXIS_TEXT_PX);
            draw_text_right(
                canvas,
                &fonts.regular,
                &label,
                AXIS_TEXT_PX,
                geometry.grid_x - AXIS_LABEL_GAP,
                y - m.height / 2.0,
                theme.axis_text,
            );
        }
    }
}

/// Label for 0-based day column `i`. Columns past the seven weekday names
/// (non-default day_count) fall back to a numbered label.
pub fn day_label(i: u32) -> String {
    match DAY_NAMES.get(i as usize) {
        Some(name) => (*name).to_string(),
        None => format!("Day {}", i + 1),
    }
}

/// Hour label for 0-based row `i`, counted from the window start.
pub fn time_label(i: u32) -> String {
    format!("{}:00", u32::from(WINDOW_START_HOUR) + i)
}

/// Block rectangle for a course, or `None` when its clamped time span is
/// empty (entirely outside the display window).
///
/// Row position is `(hour - window_start) + minute/60`; times outside the
/// window clamp to the grid edges rather than rendering off-grid.
pub fn course_rect(geometry: &GridGeometry, course: &CourseRecord) -> Option<(f64, f64, f64, f64)> {
    let start_row = clamped_row(geometry, course.start);
    let end_row = clamped_row(geometry, course.end);
    if end_row <= start_row {
        return None;
    }

    let day = f64::from(course.day);
    let x1 = geometry.grid_x + (day - 1.0) * geometry.col_width + INNER_MARGIN;
    let x2 = geometry.grid_x + day * geometry.col_width - INNER_MARGIN;
    let y1 = geometry.grid_y + start_row * geometry.row_height + INNER_MARGIN;
    let y2 = geometry.grid_y + end_row * geometry.row_height - INNER_MARGIN;
    if x2 <= x1 || y2 <= y1 {
        return None;
    }
    Some((x1, y1, x2, y2))
}

fn clamped_row(geometry: &GridGeometry, t: ClockTime) -> f64 {
    (t.as_hours() - f64::from(WINDOW_START_HOUR)).clamp(0.0, f64::from(geometry.slot_count))
}

/// Shadow pass, fill pass, label pass for one course block.
pub fn draw_course(
    canvas: &mut Canvas,
    geometry: &GridGeometry,
    theme: &Theme,
    colors: &mut ColorAssignment,
    fonts: &FontSet,
    course: &CourseRecord,
) -> TimegridResult<()> {
    let Some((x1, y1, x2, y2)) = course_rect(geometry, course) else {
        tracing::debug!(
            name = %course.name,
            start = %course.start,
            end = %course.end,
            "course outside display window, skipped"
        );
        return Ok(());
    };

    // Shadow: same bounds shifted down, blurred on its own layer, then
    // composited before the fill so it reads as coming from under the block.
    let mut shadow = Canvas::new(canvas.width(), canvas.height())?;
    fill_round_rect(
        &mut shadow,
        x1,
        y1 + SHADOW_OFFSET_Y,
        x2,
        y2 + SHADOW_OFFSET_Y,
        CORNER_RADIUS,
        Rgba8::rgba(0, 0, 0, SHADOW_ALPHA),
    );
    gaussian_blur(&mut shadow, SHADOW_BLUR_RADIUS, SHADOW_BLUR_SIGMA)?;
    composite::over_in_place(canvas.data_mut(), shadow.data())?;

    fill_round_rect(canvas, x1, y1, x2, y2, CORNER_RADIUS, colors.color_for(&course.name));

    // Labels: bold name near the top, "@location" beneath. Overflowing text
    // is drawn as-is; no wrapping or shrinking.
    let cx = (x1 + x2) / 2.0;
    let name_y = y1 + LABEL_TOP_INSET;
    draw_text_centered(
        canvas,
        &fonts.bold,
        &course.name,
        NAME_TEXT_PX,
        cx,
        name_y,
        theme.block_text,
    );

    if !course.location.is_empty() {
        let name_h = fonts.bold.measure(&course.name, NAME_TEXT_PX).height;
        let location = format!("@{}", course.location);
        draw_text_centered(
            canvas,
            &fonts.regular,
            &location,
            LOCATION_TEXT_PX,
            cx,
            name_y + name_h + 2.0,
            theme.block_text,
        );
    }
    Ok(())
}

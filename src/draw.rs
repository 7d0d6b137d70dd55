//! Raster primitives: rounded rectangles, rule lines, text.
//!
//! Geometry arrives as f64 and is rounded to device pixels exactly once,
//! here. Everything blends through `composite::over`, so translucent colors
//! work the same for shadows, rules, and glyph coverage.

use crate::canvas::Canvas;
use crate::composite::over;
use crate::core::Rgba8;
use crate::font::FontFace;

/// Fill the axis-aligned rectangle [x1, x2) x [y1, y2) with rounded corners
/// of `radius` pixels. Degenerate or inverted rectangles draw nothing.
pub fn fill_round_rect(
    canvas: &mut Canvas,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    radius: f64,
    color: Rgba8,
) {
    let left = x1.round() as i64;
    let top = y1.round() as i64;
    let right = x2.round() as i64;
    let bottom = y2.round() as i64;
    if right <= left || bottom <= top {
        return;
    }

    let w = right - left;
    let h = bottom - top;
    let r = (radius.round() as i64).clamp(0, w.min(h) / 2);
    let src = color.premultiply();

    for y in top..bottom {
        for x in left..right {
            if !canvas.in_bounds(x, y) {
                continue;
            }
            if r > 0 && !round_rect_contains(x - left, y - top, w, h, r) {
                continue;
            }
            let (xu, yu) = (x as u32, y as u32);
            canvas.set_pixel(xu, yu, over(canvas.pixel(xu, yu), src));
        }
    }
}

/// Corner containment: inside the rect body, or within radius of the
/// nearest corner circle center.
fn round_rect_contains(x: i64, y: i64, w: i64, h: i64, r: i64) -> bool {
    if x >= r && x < w - r {
        return true;
    }
    if y >= r && y < h - r {
        return true;
    }
    let cx = if x < r { r - 1 } else { w - r };
    let cy = if y < r { r - 1 } else { h - r };
    let dx = x - cx;
    let dy = y - cy;
    dx * dx + dy * dy <= r * r
}

/// One-pixel-high horizontal rule across [x1, x2) at row `y`.
pub fn hline(canvas: &mut Canvas, x1: f64, x2: f64, y: f64, color: Rgba8) {
    let row = y.round() as i64;
    let src = color.premultiply();
    for x in (x1.round() as i64)..(x2.round() as i64) {
        if canvas.in_bounds(x, row) {
            let (xu, yu) = (x as u32, row as u32);
            canvas.set_pixel(xu, yu, over(canvas.pixel(xu, yu), src));
        }
    }
}

/// Draw `text` with its top-left corner at (x, y). Glyph coverage scales the
/// color's alpha before the over blend.
pub fn draw_text(
    canvas: &mut Canvas,
    face: &FontFace,
    text: &str,
    px: f32,
    x: f64,
    y: f64,
    color: Rgba8,
) {
    let ox = x.round() as i64;
    let oy = y.round() as i64;
    face.for_each_coverage(text, px, &mut |gx, gy, cov| {
        let (tx, ty) = (ox + gx, oy + gy);
        if !canvas.in_bounds(tx, ty) {
            return;
        }
        let a = ((u16::from(color.a) * u16::from(cov) + 127) / 255) as u8;
        let src = Rgba8::rgba(color.r, color.g, color.b, a).premultiply();
        let (xu, yu) = (tx as u32, ty as u32);
        canvas.set_pixel(xu, yu, over(canvas.pixel(xu, yu), src));
    });
}

/// Center `text` horizontally on `cx`; `y` is the top of the line box.
pub fn draw_text_centered(
    canvas: &mut Canvas,
    face: &FontFace,
    text: &str,
    px: f32,
    cx: f64,
    y: f64,
    color: Rgba8,
) {
    let m = face.measure(text, px);
    draw_text(canvas, face, text, px, cx - m.width / 2.0, y, color);
}

/// Right-align `text` so it ends at `right_x`; `y` is the top of the line box.
pub fn draw_text_right(
    canvas: &mut Canvas,
    face: &FontFace,
    text: &str,
    px: f32,
    right_x: f64,
    y: f64,
    color: Rgba8,
) {
    let m = face.measure(text, px);
    draw_text(canvas, face, text, px, right_x - m.width, y, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Rgba8Premul;

    fn ink_count(canvas: &Canvas) -> usize {
        canvas
            .data()
            .chunks_exact(4)
            .filter(|px| px[3] != 0)
            .count()
    }

    #[test]
    fn round_rect_fills_interior_and_clears_corners() {
        let mut c = Canvas::new(40, 40).unwrap();
        fill_round_rect(&mut c, 0.0, 0.0, 40.0, 40.0, 10.0, Rgba8::rgb(255, 0, 0));
        // Center is filled, the very corner pixel is outside the radius.
        assert_eq!(c.pixel(20, 20).r, 255);
        assert_eq!(c.pixel(0, 0), Rgba8Premul::TRANSPARENT);
        assert_eq!(c.pixel(39, 39), Rgba8Premul::TRANSPARENT);
    }

    #[test]
    fn round_rect_ignores_inverted_bounds() {
        let mut c = Canvas::new(10, 10).unwrap();
        fill_round_rect(&mut c, 8.0, 8.0, 2.0, 2.0, 2.0, Rgba8::rgb(1, 2, 3));
        assert_eq!(ink_count(&c), 0);
    }

    #[test]
    fn round_rect_clips_to_canvas() {
        let mut c = Canvas::new(10, 10).unwrap();
        fill_round_rect(&mut c, -5.0, -5.0, 15.0, 15.0, 0.0, Rgba8::rgb(9, 9, 9));
        assert_eq!(ink_count(&c), 100);
    }

    #[test]
    fn hline_spans_requested_columns_only() {
        let mut c = Canvas::new(10, 5).unwrap();
        hline(&mut c, 2.0, 8.0, 3.0, Rgba8::rgb(0, 0, 0));
        assert_eq!(c.pixel(1, 3), Rgba8Premul::TRANSPARENT);
        assert_ne!(c.pixel(2, 3), Rgba8Premul::TRANSPARENT);
        assert_ne!(c.pixel(7, 3), Rgba8Premul::TRANSPARENT);
        assert_eq!(c.pixel(8, 3), Rgba8Premul::TRANSPARENT);
    }

    #[test]
    fn centered_text_is_balanced_around_center() {
        let mut c = Canvas::new(120, 30).unwrap();
        let face = FontFace::Builtin;
        draw_text_centered(&mut c, &face, "HH", 18.0, 60.0, 5.0, Rgba8::rgb(0, 0, 0));

        let mut min_x = i64::MAX;
        let mut max_x = i64::MIN;
        for y in 0..30 {
            for x in 0..120 {
                if c.pixel(x, y).a != 0 {
                    min_x = min_x.min(i64::from(x));
                    max_x = max_x.max(i64::from(x));
                }
            }
        }
        assert!(min_x < max_x);
        let center = (min_x + max_x) as f64 / 2.0;
        assert!((center - 60.0).abs() <= 3.0);
    }

    #[test]
    fn right_aligned_text_ends_at_edge() {
        let mut c = Canvas::new(100, 30).unwrap();
        let face = FontFace::Builtin;
        draw_text_right(&mut c, &face, "9:00", 14.0, 90.0, 5.0, Rgba8::rgb(0, 0, 0));
        for y in 0..30 {
            for x in 91..100 {
                assert_eq!(c.pixel(x, y).a, 0);
            }
        }
        assert!(ink_count(&c) > 0);
    }
}

//! Terminal pipeline stage: flatten, PNG-serialize, base64 transport.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::ImageEncoder as _;

use crate::canvas::Canvas;
use crate::error::{TimegridError, TimegridResult};
use crate::theme::Theme;

/// Flatten any remaining alpha against the theme's own background gradient
/// (not a fixed color, so partially covered edges show no seam) and encode
/// the result as an RGB8 PNG byte stream.
pub fn encode_png(canvas: &Canvas, theme: &Theme) -> TimegridResult<Vec<u8>> {
    let (w, h) = (canvas.width(), canvas.height());
    if w == 0 || h == 0 {
        return Err(TimegridError::encoding("cannot encode an empty canvas"));
    }

    let mut rgb = Vec::with_capacity(w as usize * h as usize * 3);
    for y in 0..h {
        let t = if h <= 1 {
            0.0
        } else {
            f64::from(y) / f64::from(h - 1)
        };
        let bg = theme.background_top.lerp(theme.background_bottom, t);
        for x in 0..w {
            let px = canvas.pixel(x, y);
            let inv = 255u16 - u16::from(px.a);
            let flat = |c: u8, b: u8| -> u8 {
                c.saturating_add((((u16::from(b) * inv) + 127) / 255) as u8)
            };
            rgb.push(flat(px.r, bg.r));
            rgb.push(flat(px.g, bg.g));
            rgb.push(flat(px.b, bg.b));
        }
    }

    let mut bytes = Vec::new();
    image::codecs::png::PngEncoder::new(&mut bytes)
        .write_image(&rgb, w, h, image::ExtendedColorType::Rgb8)
        .map_err(|e| TimegridError::encoding(format!("png serialization failed: {e}")))?;
    Ok(bytes)
}

/// Text-safe transport encoding for JSON embedding. Reversible
/// byte-for-byte via `from_base64`.
pub fn to_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

pub fn from_base64(text: &str) -> TimegridResult<Vec<u8>> {
    BASE64
        .decode(text)
        .map_err(|e| TimegridError::encoding(format!("base64 decode failed: {e}")))
}

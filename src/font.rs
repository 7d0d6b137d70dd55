//! Font loading and glyph rasterization.
//!
//! Loading is an explicit initialization step: `FontSet::load` returns a
//! capability object the render pipeline takes by reference, so nothing in
//! the drawing path touches the filesystem. A missing or unreadable font
//! file degrades to a builtin 5x7 bitmap face with a warning instead of
//! failing the render.

use std::path::Path;

use crate::error::{TimegridError, TimegridResult};

/// Measured extent of a single rendered line.
#[derive(Clone, Copy, Debug)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub ascent: f64,
}

pub enum FontFace {
    Ttf(fontdue::Font),
    /// Minimal 5x7 bitmap face. Uppercase-only letterforms; lowercase input
    /// is folded, unknown characters draw as a hollow box.
    Builtin,
}

impl FontFace {
    pub fn from_file(path: &Path) -> TimegridResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            TimegridError::asset(format!("read font '{}': {e}", path.display()))
        })?;
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| TimegridError::asset(format!("parse font '{}': {e}", path.display())))?;
        Ok(Self::Ttf(font))
    }

    pub fn measure(&self, text: &str, px: f32) -> TextMetrics {
        match self {
            Self::Ttf(font) => {
                let (ascent, descent) = match font.horizontal_line_metrics(px) {
                    Some(m) => (f64::from(m.ascent), f64::from(m.descent)),
                    None => (f64::from(px) * 0.8, f64::from(px) * -0.2),
                };
                let mut width = 0.0f64;
                for ch in text.chars() {
                    let metrics = font.metrics(ch, px);
                    width += f64::from(metrics.advance_width);
                }
                TextMetrics {
                    width,
                    height: ascent - descent,
                    ascent,
                }
            }
            Self::Builtin => {
                // Same integer cell as rasterization, so measured and drawn
                // widths agree exactly.
                let cell = builtin_cell(px) as f64;
                TextMetrics {
                    width: (text.chars().count() as f64) * 6.0 * cell,
                    height: 9.0 * cell,
                    ascent: 7.0 * cell,
                }
            }
        }
    }

    /// Rasterize `text` with its top-left corner at the local origin and
    /// emit `(x, y, coverage)` per touched pixel. Callers translate and
    /// blend; this stays purely geometric.
    pub fn for_each_coverage(&self, text: &str, px: f32, emit: &mut dyn FnMut(i64, i64, u8)) {
        match self {
            Self::Ttf(font) => {
                let ascent = self.measure(text, px).ascent;
                let mut caret = 0.0f32;
                for ch in text.chars() {
                    let (metrics, bitmap) = font.rasterize(ch, px);
                    let x0 = (f64::from(caret) + f64::from(metrics.xmin)).round() as i64;
                    let y0 = (ascent - f64::from(metrics.ymin) - metrics.height as f64).round()
                        as i64;
                    for row in 0..metrics.height {
                        for col in 0..metrics.width {
                            let cov = bitmap[row * metrics.width + col];
                            if cov > 0 {
                                emit(x0 + col as i64, y0 + row as i64, cov);
                            }
                        }
                    }
                    caret += metrics.advance_width;
                }
            }
            Self::Builtin => {
                let cell = builtin_cell(px);
                for (i, ch) in text.chars().enumerate() {
                    let glyph = builtin_glyph(ch);
                    let gx = i as i64 * 6 * cell;
                    for (row, bits) in glyph.iter().enumerate() {
                        for col in 0..5usize {
                            if bits & (0b1_0000 >> col) != 0 {
                                for dy in 0..cell {
                                    for dx in 0..cell {
                                        emit(
                                            gx + col as i64 * cell + dx,
                                            row as i64 * cell + dy,
                                            255,
                                        );
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub struct FontSet {
    pub regular: FontFace,
    pub bold: FontFace,
}

impl FontSet {
    /// Load the two faces, degrading each independently to the builtin face.
    pub fn load(regular: Option<&Path>, bold: Option<&Path>) -> Self {
        Self {
            regular: Self::load_face(regular, "regular"),
            bold: Self::load_face(bold, "bold"),
        }
    }

    pub fn builtin() -> Self {
        Self {
            regular: FontFace::Builtin,
            bold: FontFace::Builtin,
        }
    }

    fn load_face(path: Option<&Path>, role: &str) -> FontFace {
        let Some(path) = path else {
            return FontFace::Builtin;
        };
        match FontFace::from_file(path) {
            Ok(face) => face,
            Err(err) => {
                tracing::warn!(%err, role, "font unavailable, using builtin face");
                FontFace::Builtin
            }
        }
    }
}

fn builtin_cell(px: f32) -> i64 {
    ((f64::from(px) / 9.0).round() as i64).max(1)
}

/// 5x7 letterforms, one byte per row, bit 4 = leftmost column.
fn builtin_glyph(ch: char) -> [u8; 7] {
    let ch = ch.to_ascii_uppercase();
    match ch {
        ' ' => [0, 0, 0, 0, 0, 0, 0],
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        ':' => [0b00000, 0b00100, 0b00100, 0b00000, 0b00100, 0b00100, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00100, 0b00100],
        ',' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00100, 0b00100, 0b01000],
        '-' => [0b00000, 0b00000, 0b00000, 0b01110, 0b00000, 0b00000, 0b00000],
        '/' => [0b00001, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b10000],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        '@' => [0b01110, 0b10001, 0b10111, 0b10101, 0b10111, 0b10000, 0b01110],
        _ => [0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111],
    }
}

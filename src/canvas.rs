use crate::core::{Rgba8, Rgba8Premul};
use crate::error::{TimegridError, TimegridResult};

/// Mutable premultiplied-RGBA8 pixel buffer, row-major, tightly packed.
/// Exclusively owned by one render call; never shared.
#[derive(Clone, Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    /// A fully transparent canvas. Fails when the pixel buffer length
    /// would overflow addressable memory.
    pub fn new(width: u32, height: u32) -> TimegridResult<Self> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(4))
            .ok_or_else(|| {
                TimegridError::configuration(format!(
                    "canvas {width}x{height} exceeds addressable size"
                ))
            })?;
        Ok(Self {
            width,
            height,
            data: vec![0u8; len],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba8Premul {
        let i = self.index(x, y);
        Rgba8Premul {
            r: self.data[i],
            g: self.data[i + 1],
            b: self.data[i + 2],
            a: self.data[i + 3],
        }
    }

    /// Unconditional store; callers wanting blending go through `composite`.
    pub fn set_pixel(&mut self, x: u32, y: u32, px: Rgba8Premul) {
        let i = self.index(x, y);
        self.data[i..i + 4].copy_from_slice(&px.as_bytes());
    }

    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0
            && y >= 0
            && (x as u64) < u64::from(self.width)
            && (y as u64) < u64::from(self.height)
    }

    pub fn fill(&mut self, px: Rgba8Premul) {
        let bytes = px.as_bytes();
        for chunk in self.data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&bytes);
        }
    }

    /// Vertical two-tone background: row `y` takes the per-channel lerp of
    /// `top` toward `bottom`, 0 at the first row and 1 at the last. A
    /// one-row canvas takes the top color.
    pub fn paint_vertical_gradient(&mut self, top: Rgba8, bottom: Rgba8) {
        let h = self.height;
        for y in 0..h {
            let t = if h <= 1 {
                0.0
            } else {
                f64::from(y) / f64::from(h - 1)
            };
            let row = top.lerp(bottom, t).premultiply();
            let bytes = row.as_bytes();
            let start = y as usize * self.width as usize * 4;
            let end = start + self.width as usize * 4;
            for chunk in self.data[start..end].chunks_exact_mut(4) {
                chunk.copy_from_slice(&bytes);
            }
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y as usize * self.width as usize + x as usize) * 4
    }
}

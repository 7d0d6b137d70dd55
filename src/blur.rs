//! Separable Gaussian blur on premultiplied RGBA8, used for block shadows.
//!
//! Two 1D passes (horizontal then vertical) with a Q16 fixed-point kernel;
//! edges clamp to the border pixel.

use crate::canvas::Canvas;
use crate::error::{TimegridError, TimegridResult};

pub fn gaussian_blur(canvas: &mut Canvas, radius: u32, sigma: f32) -> TimegridResult<()> {
    if radius == 0 {
        return Ok(());
    }
    let kernel = kernel_q16(radius, sigma)?;

    let (w, h) = (canvas.width() as usize, canvas.height() as usize);
    let mut tmp = vec![0u8; canvas.data().len()];
    pass(canvas.data(), &mut tmp, w, h, &kernel, Axis::Horizontal);
    let mut out = vec![0u8; canvas.data().len()];
    pass(&tmp, &mut out, w, h, &kernel, Axis::Vertical);
    canvas.data_mut().copy_from_slice(&out);
    Ok(())
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Normalized kernel in Q16: weights sum to exactly 65536, with any rounding
/// residue folded into the center tap so a constant image stays constant.
fn kernel_q16(radius: u32, sigma: f32) -> TimegridResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(TimegridError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();

    let mut weights: Vec<u32> = weights_f
        .iter()
        .map(|&w| (((w / sum) * 65536.0).round() as i64).clamp(0, 65536) as u32)
        .collect();
    let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
    let mid = weights.len() / 2;
    weights[mid] = (i64::from(weights[mid]) + (65536 - acc)).clamp(0, 65536) as u32;
    Ok(weights)
}

fn pass(src: &[u8], dst: &mut [u8], w: usize, h: usize, kernel: &[u32], axis: Axis) {
    let radius = (kernel.len() / 2) as i64;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in kernel.iter().enumerate() {
                let offset = ki as i64 - radius;
                let (sx, sy) = match axis {
                    Axis::Horizontal => ((x as i64 + offset).clamp(0, w as i64 - 1), y as i64),
                    Axis::Vertical => (x as i64, (y as i64 + offset).clamp(0, h as i64 - 1)),
                };
                let idx = (sy as usize * w + sx as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out = (y * w + x) * 4;
            for c in 0..4 {
                dst[out + c] = (((acc[c] + 32768) >> 16).min(255)) as u8;
            }
        }
    }
}

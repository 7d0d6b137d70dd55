//! Alpha-over compositing on premultiplied RGBA8 buffers.

use crate::core::Rgba8Premul;
use crate::error::{TimegridError, TimegridResult};

/// Standard source-over: `out = src + dst * (1 - src.a)`.
pub fn over(dst: Rgba8Premul, src: Rgba8Premul) -> Rgba8Premul {
    if src.a == 0 {
        return dst;
    }
    if src.a == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src.a);
    Rgba8Premul {
        r: src.r.saturating_add(mul_div255(u16::from(dst.r), inv)),
        g: src.g.saturating_add(mul_div255(u16::from(dst.g), inv)),
        b: src.b.saturating_add(mul_div255(u16::from(dst.b), inv)),
        a: src.a.saturating_add(mul_div255(u16::from(dst.a), inv)),
    }
}

/// Composite `src` over `dst` pixel-by-pixel. Buffers must be the same
/// length and a whole number of RGBA8 pixels.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> TimegridResult<()> {
    if dst.len() != src.len() || dst.len() % 4 != 0 {
        return Err(TimegridError::validation(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over(
            Rgba8Premul {
                r: d[0],
                g: d[1],
                b: d[2],
                a: d[3],
            },
            Rgba8Premul {
                r: s[0],
                g: s[1],
                b: s[2],
                a: s[3],
            },
        );
        d.copy_from_slice(&out.as_bytes());
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

//! Position-independent color filters.
//!
//! Each filter rewrites a pixel from that pixel's own R, G, B values and
//! nothing else (pixelate reads its own tile), in place, visiting every pixel
//! once. The alpha channel of RGBA buffers is never touched.
//!
//! Float results are clamped to `[0, 255]` and truncated, not rounded.
//!
//! # Example
//!
//! ```rust
//! use facefx_core::PixelBuffer;
//! use facefx_ops::color::{grayscale, negative};
//!
//! let mut buf = PixelBuffer::from_vec(1, 1, 4, vec![255, 0, 0, 128]).unwrap();
//! grayscale(&mut buf);
//! assert_eq!(buf.as_bytes(), &[76, 76, 76, 128]);
//!
//! negative(&mut buf);
//! assert_eq!(buf.as_bytes(), &[179, 179, 179, 128]);
//! ```

use facefx_core::PixelBuffer;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Number of color channels every filter rewrites (R, G, B).
const COLOR_CHANNELS: usize = 3;

#[inline]
fn clamp_u8(v: f32) -> u8 {
    v.clamp(0.0, 255.0) as u8
}

/// Channel targeted by a tint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TintChannel {
    /// Red
    Red,
    /// Green
    Green,
    /// Blue
    Blue,
}

impl TintChannel {
    #[inline]
    fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }
}

/// Integer luma with weights 0.299 / 0.587 / 0.114, truncated.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000) as u8
}

/// Replaces R, G and B with their [`luma`].
pub fn grayscale(buf: &mut PixelBuffer) {
    trace!(width = buf.width(), height = buf.height(), "color::grayscale");
    for px in buf.pixels_mut() {
        let gray = luma(px[0], px[1], px[2]);
        px[..COLOR_CHANNELS].fill(gray);
    }
}

/// Classic sepia matrix.
pub fn sepia(buf: &mut PixelBuffer) {
    trace!(width = buf.width(), height = buf.height(), "color::sepia");
    for px in buf.pixels_mut() {
        let r = px[0] as f32;
        let g = px[1] as f32;
        let b = px[2] as f32;
        px[0] = clamp_u8(0.393 * r + 0.769 * g + 0.189 * b);
        px[1] = clamp_u8(0.349 * r + 0.686 * g + 0.168 * b);
        px[2] = clamp_u8(0.272 * r + 0.534 * g + 0.131 * b);
    }
}

/// Inverts R, G and B. Applying it twice restores the input.
pub fn negative(buf: &mut PixelBuffer) {
    trace!(width = buf.width(), height = buf.height(), "color::negative");
    for px in buf.pixels_mut() {
        for v in &mut px[..COLOR_CHANNELS] {
            *v = 255 - *v;
        }
    }
}

/// Warm, lifted-shadows look: `R*.9+20`, `G*.85+15`, `B*.8+10`.
pub fn vintage(buf: &mut PixelBuffer) {
    trace!(width = buf.width(), height = buf.height(), "color::vintage");
    for px in buf.pixels_mut() {
        px[0] = clamp_u8(px[0] as f32 * 0.9 + 20.0);
        px[1] = clamp_u8(px[1] as f32 * 0.85 + 15.0);
        px[2] = clamp_u8(px[2] as f32 * 0.8 + 10.0);
    }
}

/// Scales one channel by `gain`, leaving the others alone.
pub fn tint(buf: &mut PixelBuffer, channel: TintChannel, gain: f32) {
    trace!(width = buf.width(), height = buf.height(), ?channel, gain, "color::tint");
    let c = channel.index();
    for px in buf.pixels_mut() {
        px[c] = clamp_u8(px[c] as f32 * gain);
    }
}

/// Quantizes each color channel to `levels` evenly spaced values.
///
/// Idempotent whenever `levels` divides 256. `levels` of zero is treated as
/// one.
pub fn posterize(buf: &mut PixelBuffer, levels: u32) {
    trace!(width = buf.width(), height = buf.height(), levels, "color::posterize");
    let step = 256.0 / levels.max(1) as f32;
    for px in buf.pixels_mut() {
        for v in &mut px[..COLOR_CHANNELS] {
            *v = clamp_u8((*v as f32 / step).floor() * step);
        }
    }
}

/// False-color "heat" palette keyed on the mean of R, G, B.
///
/// ```text
///   mean <  85   black  -> blue      (0, 0, 3m)
///   mean < 170   cyan   -> white     (3(m-85), 255, 255)
///   otherwise    yellow -> red       (255, 255-3(m-170), 0)
/// ```
pub fn thermal(buf: &mut PixelBuffer) {
    trace!(width = buf.width(), height = buf.height(), "color::thermal");
    for px in buf.pixels_mut() {
        let m = (px[0] as f32 + px[1] as f32 + px[2] as f32) / 3.0;
        let (r, g, b) = if m < 85.0 {
            (0, 0, clamp_u8(m * 3.0))
        } else if m < 170.0 {
            (clamp_u8((m - 85.0) * 3.0), 255, 255)
        } else {
            (255, clamp_u8(255.0 - (m - 170.0) * 3.0), 0)
        };
        px[0] = r;
        px[1] = g;
        px[2] = b;
    }
}

/// Inverts every color channel value above `threshold`.
pub fn solarize(buf: &mut PixelBuffer, threshold: u8) {
    trace!(width = buf.width(), height = buf.height(), threshold, "color::solarize");
    for px in buf.pixels_mut() {
        for v in &mut px[..COLOR_CHANNELS] {
            if *v > threshold {
                *v = 255 - *v;
            }
        }
    }
}

/// Replaces each `block x block` tile with its mean color.
///
/// Tiles are laid out from the top-left corner and clipped at the right and
/// bottom edges. `block` of zero is treated as one.
pub fn pixelate(buf: &mut PixelBuffer, block: u32) {
    trace!(width = buf.width(), height = buf.height(), block, "color::pixelate");
    debug!(block, "Pixelating frame");

    let width = buf.width() as usize;
    let height = buf.height() as usize;
    let ch = buf.channels() as usize;
    let stride = buf.stride();
    let block = block.max(1) as usize;
    let data = buf.as_bytes_mut();

    for by in (0..height).step_by(block) {
        let y_end = (by + block).min(height);
        for bx in (0..width).step_by(block) {
            let x_end = (bx + block).min(width);

            let mut sum = [0u64; COLOR_CHANNELS];
            for y in by..y_end {
                for x in bx..x_end {
                    let idx = y * stride + x * ch;
                    for (c, s) in sum.iter_mut().enumerate() {
                        *s += data[idx + c] as u64;
                    }
                }
            }

            let count = ((y_end - by) * (x_end - bx)) as u64;
            let mean = sum.map(|s| (s / count) as u8);

            for y in by..y_end {
                for x in bx..x_end {
                    let idx = y * stride + x * ch;
                    data[idx..idx + COLOR_CHANNELS].copy_from_slice(&mean);
                }
            }
        }
    }
}

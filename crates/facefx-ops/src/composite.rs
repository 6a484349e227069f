//! Face-mask overlay.
//!
//! Scales an RGBA mask to cover a detected face and alpha-blends it onto the
//! frame with Porter-Duff "over" on the color channels:
//!
//! ```text
//! dst = mask * a + dst * (1 - a)      a = mask.alpha / 255
//! ```
//!
//! The mask is resampled nearest-neighbour. The frame's own alpha channel is
//! never written.
//!
//! # Example
//!
//! ```rust
//! use facefx_core::{FaceRegion, PixelBuffer};
//! use facefx_ops::composite::{composite_mask, MaskImage};
//! use facefx_ops::config::MaskParams;
//!
//! let mut frame = PixelBuffer::new(64, 64, 3).unwrap();
//! let face = FaceRegion::new(20.0, 20.0, 20.0, 20.0);
//! let pixels = [255u8, 0, 0, 255].repeat(4);
//! let mask = MaskImage::new(&pixels, 2, 2).unwrap();
//!
//! composite_mask(&mut frame, &face, &mask, &MaskParams::default()).unwrap();
//! assert_eq!(frame.pixel(30, 30).unwrap(), &[255, 0, 0]);
//! ```

use facefx_core::{FaceRegion, PixelBuffer};
#[allow(unused_imports)]
use tracing::{debug, trace};

use crate::config::MaskParams;
use crate::{OpsError, OpsResult};

/// Borrowed RGBA overlay image.
#[derive(Debug, Clone, Copy)]
pub struct MaskImage<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> MaskImage<'a> {
    /// Wraps `width * height` RGBA pixels. Trailing bytes are ignored.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidInput`] for a zero dimension or when `data` is
    /// shorter than `width * height * 4`.
    pub fn new(data: &'a [u8], width: u32, height: u32) -> OpsResult<Self> {
        if width == 0 || height == 0 {
            return Err(OpsError::InvalidInput(format!(
                "mask has zero size {width}x{height}"
            )));
        }
        let needed = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| OpsError::InvalidInput(format!("mask {width}x{height} too large")))?;
        if data.len() < needed {
            return Err(OpsError::InvalidInput(format!(
                "mask {width}x{height} needs {needed} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self { data, width, height })
    }

    /// Mask width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Mask height.
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn rgba(&self, x: u32, y: u32) -> &[u8] {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        &self.data[idx..idx + 4]
    }
}

/// Screen-space rectangle the mask is drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    /// Left edge (may be negative)
    pub x: i64,
    /// Top edge (may be negative)
    pub y: i64,
    /// Scaled mask width
    pub width: i64,
    /// Scaled mask height
    pub height: i64,
}

impl Footprint {
    /// Places the mask over the face, scaled by the larger of the two
    /// face/mask ratios times `coverage` and centered on the face box.
    ///
    /// The scaled size is rounded, the origin truncated toward zero.
    pub fn around(face: &FaceRegion, mask_width: u32, mask_height: u32, coverage: f32) -> Self {
        let mw = mask_width as f32;
        let mh = mask_height as f32;
        let scale = (face.width / mw).max(face.height / mh) * coverage;

        // `as` saturates and maps NaN to 0
        let width = (mw * scale).round().max(0.0) as i64;
        let height = (mh * scale).round().max(0.0) as i64;
        let x = (face.x - (width as f32 - face.width) / 2.0) as i64;
        let y = (face.y - (height as f32 - face.height) / 2.0) as i64;
        Self { x, y, width, height }
    }

    /// True if nothing would be drawn.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Blends `mask` over the face region of `buf`.
///
/// Footprint pixels that land outside the frame are skipped. A footprint of
/// zero area, or one entirely off-frame, writes nothing and succeeds.
///
/// # Errors
///
/// [`OpsError::InvalidInput`] if `buf` is empty.
pub fn composite_mask(
    buf: &mut PixelBuffer,
    face: &FaceRegion,
    mask: &MaskImage<'_>,
    params: &MaskParams,
) -> OpsResult<()> {
    if buf.is_empty() {
        return Err(OpsError::InvalidInput("empty frame".into()));
    }
    let fp = Footprint::around(face, mask.width, mask.height, params.coverage);
    trace!(
        width = buf.width(),
        height = buf.height(),
        mask_w = mask.width,
        mask_h = mask.height,
        "composite::composite_mask"
    );
    debug!(x = fp.x, y = fp.y, w = fp.width, h = fp.height, "Compositing mask");

    if fp.is_empty() {
        return Ok(());
    }

    // Clip the footprint to the frame.
    let x0 = fp.x.max(0);
    let y0 = fp.y.max(0);
    let x1 = fp.x.saturating_add(fp.width).min(buf.width() as i64);
    let y1 = fp.y.saturating_add(fp.height).min(buf.height() as i64);
    if x0 >= x1 || y0 >= y1 {
        return Ok(());
    }

    let ch = buf.channels() as usize;
    let stride = buf.stride();
    // Footprint extents can approach i64::MAX; u128 keeps the products exact.
    let (mw, mh) = (mask.width as u128, mask.height as u128);
    let (tw, th) = (fp.width as u128, fp.height as u128);
    let data = buf.as_bytes_mut();

    for by in y0..y1 {
        let my = ((by - fp.y) as u128 * mh / th) as u32;
        let row = &mut data[by as usize * stride..(by as usize + 1) * stride];
        for bx in x0..x1 {
            let mx = ((bx - fp.x) as u128 * mw / tw) as u32;
            let src = mask.rgba(mx, my);
            let alpha = src[3] as f32 / 255.0;
            let inv = 1.0 - alpha;
            let idx = bx as usize * ch;
            for c in 0..3 {
                let d = row[idx + c] as f32;
                row[idx + c] = (src[c] as f32 * alpha + d * inv) as u8;
            }
        }
    }

    Ok(())
}

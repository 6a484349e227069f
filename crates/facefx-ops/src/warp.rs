//! Geometric remap filters.
//!
//! Every effect here is an inverse mapping: for each destination pixel it
//! computes the source coordinate to sample. [`remap`] owns the iteration and
//! the resampling; a new effect only supplies the mapping closure.
//!
//! The driver snapshots the frame first and samples only from the snapshot,
//! so no pass ever reads a pixel it has already written. Sampling is bilinear
//! with edge-replicate clamping (see [`PixelBuffer::bilinear`]).
//!
//! When the `parallel` feature is enabled, rows are processed with rayon.
//! Each row is written by exactly one task and every read goes to the
//! snapshot, so the output is identical to the sequential path.
//!
//! # Example
//!
//! ```rust
//! use facefx_core::PixelBuffer;
//! use facefx_ops::warp::{remap, swirl};
//!
//! let mut frame = PixelBuffer::new(64, 48, 3).unwrap();
//! swirl(&mut frame, 2.0).unwrap();
//!
//! // Custom effect: shift the whole frame one pixel right.
//! remap(&mut frame, |x, y| Some((x - 1.0, y))).unwrap();
//! ```

use facefx_core::{FaceRegion, PixelBuffer};
#[allow(unused_imports)]
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::OpsResult;

/// Writes the resampled channels of one destination pixel.
#[inline]
fn resample_into(dst: &mut [u8], src: &PixelBuffer, sx: f32, sy: f32) {
    for (c, v) in dst.iter_mut().enumerate() {
        *v = src.bilinear(sx, sy, c);
    }
}

/// Applies an inverse coordinate mapping to the whole frame.
///
/// `map(x, y)` receives the destination pixel and returns the source
/// coordinate to sample, or `None` to keep the pixel as it is.
///
/// # Errors
///
/// - [`OpsError::InvalidInput`](crate::OpsError::InvalidInput) for an empty buffer
/// - [`OpsError::ResourceExhausted`](crate::OpsError::ResourceExhausted) if the
///   snapshot cannot be allocated; the frame is left untouched
#[cfg(feature = "parallel")]
pub fn remap<F>(buf: &mut PixelBuffer, map: F) -> OpsResult<()>
where
    F: Fn(f32, f32) -> Option<(f32, f32)> + Sync,
{
    let src = buf.try_duplicate()?;
    let width = buf.width() as usize;
    let ch = buf.channels() as usize;
    let stride = buf.stride();
    trace!(width, height = buf.height(), channels = ch, "warp::remap (parallel)");

    buf.as_bytes_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..width {
                if let Some((sx, sy)) = map(x as f32, y as f32) {
                    let idx = x * ch;
                    resample_into(&mut row[idx..idx + ch], &src, sx, sy);
                }
            }
        });

    Ok(())
}

/// Applies an inverse coordinate mapping to the whole frame (single-threaded).
///
/// `map(x, y)` receives the destination pixel and returns the source
/// coordinate to sample, or `None` to keep the pixel as it is.
///
/// # Errors
///
/// - [`OpsError::InvalidInput`](crate::OpsError::InvalidInput) for an empty buffer
/// - [`OpsError::ResourceExhausted`](crate::OpsError::ResourceExhausted) if the
///   snapshot cannot be allocated; the frame is left untouched
#[cfg(not(feature = "parallel"))]
pub fn remap<F>(buf: &mut PixelBuffer, map: F) -> OpsResult<()>
where
    F: Fn(f32, f32) -> Option<(f32, f32)> + Sync,
{
    let src = buf.try_duplicate()?;
    let width = buf.width() as usize;
    let ch = buf.channels() as usize;
    let stride = buf.stride();
    trace!(width, height = buf.height(), channels = ch, "warp::remap");

    for (y, row) in buf.as_bytes_mut().chunks_exact_mut(stride).enumerate() {
        for x in 0..width {
            if let Some((sx, sy)) = map(x as f32, y as f32) {
                let idx = x * ch;
                resample_into(&mut row[idx..idx + ch], &src, sx, sy);
            }
        }
    }

    Ok(())
}

/// Center and reference radius shared by the radial effects.
///
/// The center is `(width/2, height/2)` and the radius `min(width, height)/2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialFrame {
    /// Center X
    pub cx: f32,
    /// Center Y
    pub cy: f32,
    /// Effect radius
    pub radius: f32,
}

impl RadialFrame {
    /// Radial frame centered on the buffer.
    pub fn of(buf: &PixelBuffer) -> Self {
        let w = buf.width() as f32;
        let h = buf.height() as f32;
        Self {
            cx: w / 2.0,
            cy: h / 2.0,
            radius: w.min(h) / 2.0,
        }
    }
}

/// Inverse mapping for [`bulge`]. Pixels at or beyond the radius map to `None`.
pub fn bulge_map(frame: RadialFrame, strength: f32) -> impl Fn(f32, f32) -> Option<(f32, f32)> + Sync {
    let RadialFrame { cx, cy, radius } = frame;
    move |x, y| {
        let dx = x - cx;
        let dy = y - cy;
        let dist_sq = dx * dx + dy * dy;
        if dist_sq >= radius * radius {
            return None;
        }
        let dist = dist_sq.sqrt();
        let factor = (1.0 - (dist / radius) * strength).clamp(0.0, 1.0);
        Some((cx + dx * factor, cy + dy * factor))
    }
}

/// Inverse mapping for [`swirl`]. Pixels at or beyond the radius map to `None`.
pub fn swirl_map(frame: RadialFrame, strength: f32) -> impl Fn(f32, f32) -> Option<(f32, f32)> + Sync {
    let RadialFrame { cx, cy, radius } = frame;
    move |x, y| {
        let dx = x - cx;
        let dy = y - cy;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist >= radius {
            return None;
        }
        let angle = dy.atan2(dx);
        let twist = strength * (1.0 - (dist / radius).clamp(0.0, 1.0));
        let (sin, cos) = (angle + twist).sin_cos();
        Some((cx + dist * cos, cy + dist * sin))
    }
}

/// Magnifies the middle of the frame.
///
/// Inside the radius, each pixel samples from `center + offset * factor`
/// with `factor = clamp(1 - (d / R) * strength, 0, 1)`, so points near the
/// center move least. Outside the radius the frame is untouched.
pub fn bulge(buf: &mut PixelBuffer, strength: f32) -> OpsResult<()> {
    let frame = RadialFrame::of(buf);
    debug!(strength, radius = frame.radius, "Applying bulge");
    remap(buf, bulge_map(frame, strength))
}

/// Twists the middle of the frame.
///
/// The twist is `strength` radians at the center and falls linearly to zero
/// at the radius, so the frame outside the radius is untouched.
pub fn swirl(buf: &mut PixelBuffer, strength: f32) -> OpsResult<()> {
    let frame = RadialFrame::of(buf);
    debug!(strength, radius = frame.radius, "Applying swirl");
    remap(buf, swirl_map(frame, strength))
}

/// Scales the frame around an anchor: `source = anchor + (dx * sx, dy * sy)`.
///
/// The anchor is the face center when a non-empty face is given, otherwise
/// the buffer center. Coordinates past the edge replicate the border.
pub fn stretch(buf: &mut PixelBuffer, face: Option<&FaceRegion>, sx: f32, sy: f32) -> OpsResult<()> {
    let (ax, ay) = match face {
        Some(f) if !f.is_empty() => f.center(),
        _ => (buf.width() as f32 / 2.0, buf.height() as f32 / 2.0),
    };
    debug!(ax, ay, sx, sy, "Applying stretch");
    remap(buf, move |x, y| Some((ax + (x - ax) * sx, ay + (y - ay) * sy)))
}

/// Mirror axis for [`flip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipAxis {
    /// Left-right
    Horizontal,
    /// Top-bottom
    Vertical,
    /// Both axes (180° rotation)
    Both,
}

/// Mirrors the frame. Sampling lands on integer coordinates, so it is exact.
pub fn flip(buf: &mut PixelBuffer, axis: FlipAxis) -> OpsResult<()> {
    let last_x = buf.width().saturating_sub(1) as f32;
    let last_y = buf.height().saturating_sub(1) as f32;
    debug!(?axis, "Applying flip");
    remap(buf, move |x, y| {
        Some(match axis {
            FlipAxis::Horizontal => (last_x - x, y),
            FlipAxis::Vertical => (x, last_y - y),
            FlipAxis::Both => (last_x - x, last_y - y),
        })
    })
}

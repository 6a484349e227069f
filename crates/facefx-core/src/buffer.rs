//! Owned pixel buffer, the unit of work for every filter.
//!
//! # Memory Layout
//!
//! Pixels are stored **row-major**, top-to-bottom, with channels interleaved:
//!
//! ```text
//! Memory: [R G B R G B R G B ...]  ← Row 0
//!         [R G B R G B R G B ...]  ← Row 1
//!         ...
//! ```
//!
//! For RGBA buffers alpha is interleaved: `[R G B A R G B A ...]`. The byte
//! for `(x, y, c)` lives at `(y * width + x) * channels + c`.
//!
//! # Ownership
//!
//! A [`PixelBuffer`] exclusively owns its bytes. [`Clone`] and
//! [`PixelBuffer::try_duplicate`] both produce fully independent storage, so
//! a filter can read a snapshot while writing the original. Storage is freed
//! when the value goes out of scope; [`PixelBuffer::release`] frees it early
//! and leaves the buffer in the empty state.
//!
//! # Usage
//!
//! ```rust
//! use facefx_core::PixelBuffer;
//!
//! let mut frame = PixelBuffer::new(640, 480, 4).unwrap();
//! frame.set(10, 20, 0, 255);
//!
//! let snapshot = frame.try_duplicate().unwrap();
//! frame.set(10, 20, 0, 0);
//! assert_eq!(snapshot.get(10, 20, 0), 255);
//! ```

use std::fmt;

use crate::{Error, Result};

/// Channel count of an RGB buffer.
pub const RGB: u8 = 3;
/// Channel count of an RGBA buffer.
pub const RGBA: u8 = 4;
/// Index of the alpha channel in an RGBA pixel.
pub const ALPHA_CHANNEL: usize = 3;

/// Row-major, channel-interleaved 8-bit pixel storage plus dimensions.
///
/// # Invariants
///
/// - `as_bytes().len() == width * height * channels`
/// - `channels` is 3 or 4, unless the buffer is empty
/// - an empty buffer (see [`PixelBuffer::is_empty`]) has zero width, height
///   and storage; it stands for a released or never-allocated frame
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
}

/// Computes the exact byte size of a buffer, rejecting degenerate or
/// overflowing dimensions.
fn byte_len(width: u32, height: u32, channels: u8) -> Result<usize> {
    if channels != RGB && channels != RGBA {
        return Err(Error::UnsupportedChannels(channels));
    }
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(
            width,
            height,
            "width and height must be > 0",
        ));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(channels as usize))
        .ok_or_else(|| Error::invalid_dimensions(width, height, "byte size overflows usize"))
}

/// Reserves `len` bytes without aborting on allocator failure.
fn try_alloc(len: usize) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|e| Error::allocation_failed(len, e.to_string()))?;
    Ok(data)
}

impl PixelBuffer {
    /// Allocates a zero-filled buffer.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedChannels`] unless `channels` is 3 or 4
    /// - [`Error::InvalidDimensions`] on a zero dimension or size overflow
    /// - [`Error::AllocationFailed`] if storage cannot be reserved
    ///
    /// # Example
    ///
    /// ```rust
    /// use facefx_core::PixelBuffer;
    ///
    /// let buf = PixelBuffer::new(4, 2, 3).unwrap();
    /// assert_eq!(buf.len(), 24);
    /// assert!(buf.as_bytes().iter().all(|&b| b == 0));
    /// ```
    pub fn new(width: u32, height: u32, channels: u8) -> Result<Self> {
        let len = byte_len(width, height, channels)?;
        let mut data = try_alloc(len)?;
        data.resize(len, 0);
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Wraps caller-supplied bytes as a buffer.
    ///
    /// # Errors
    ///
    /// Same dimension checks as [`PixelBuffer::new`], plus
    /// [`Error::InvalidDimensions`] if `data.len()` does not match.
    pub fn from_vec(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self> {
        let expected = byte_len(width, height, channels)?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Produces an independent byte-for-byte copy.
    ///
    /// Unlike [`Clone`], allocation failure is reported instead of aborting,
    /// which lets geometric filters back out without touching the frame.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyBuffer`] if `self` has no storage
    /// - [`Error::AllocationFailed`] if the copy cannot be reserved
    pub fn try_duplicate(&self) -> Result<Self> {
        if self.is_empty() {
            return Err(Error::EmptyBuffer);
        }
        let mut data = try_alloc(self.data.len())?;
        data.extend_from_slice(&self.data);
        Ok(Self {
            data,
            width: self.width,
            height: self.height,
            channels: self.channels,
        })
    }

    /// Frees the storage and leaves the buffer empty.
    ///
    /// Calling this on an already empty buffer does nothing.
    pub fn release(&mut self) {
        *self = Self::default();
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channels per pixel (3 or 4; 0 when empty).
    #[inline]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// `true` for RGBA buffers.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.channels == RGBA
    }

    /// Total number of bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` if the buffer has no storage.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    /// Byte offset of channel 0 of pixel `(x, y)`.
    ///
    /// The caller guarantees `x < width` and `y < height`.
    #[inline]
    pub fn pixel_offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels as usize
    }

    /// Raw bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw bytes.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the buffer, returning its bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Channels of pixel `(x, y)`, or `None` when out of range.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.pixel_offset(x, y);
        Some(&self.data[idx..idx + self.channels as usize])
    }

    /// Mutable channels of pixel `(x, y)`, or `None` when out of range.
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut [u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.pixel_offset(x, y);
        let ch = self.channels as usize;
        Some(&mut self.data[idx..idx + ch])
    }

    /// Row `y`, or `None` when out of range.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let stride = self.stride();
        let start = y as usize * stride;
        Some(&self.data[start..start + stride])
    }

    /// Iterates over whole pixels (`channels` bytes each).
    ///
    /// Yields nothing for an empty buffer.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        let ch = (self.channels as usize).max(1);
        self.data.chunks_exact(ch)
    }

    /// Iterates mutably over whole pixels (`channels` bytes each).
    pub fn pixels_mut(&mut self) -> impl Iterator<Item = &mut [u8]> {
        let ch = (self.channels as usize).max(1);
        self.data.chunks_exact_mut(ch)
    }
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &self.channels)
            .field("len", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_zeroed() {
        let buf = PixelBuffer::new(5, 3, 4).unwrap();
        assert_eq!(buf.width(), 5);
        assert_eq!(buf.height(), 3);
        assert_eq!(buf.channels(), 4);
        assert!(buf.has_alpha());
        assert_eq!(buf.len(), 5 * 3 * 4);
        assert!(buf.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_rejects_zero_dimension() {
        assert!(matches!(
            PixelBuffer::new(0, 3, 3),
            Err(Error::InvalidDimensions { .. })
        ));
        assert!(matches!(
            PixelBuffer::new(3, 0, 3),
            Err(Error::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_channels() {
        for ch in [0u8, 1, 2, 5] {
            assert!(matches!(
                PixelBuffer::new(2, 2, ch),
                Err(Error::UnsupportedChannels(c)) if c == ch
            ));
        }
    }

    #[test]
    fn test_rejects_overflow() {
        assert!(matches!(
            PixelBuffer::new(u32::MAX, u32::MAX, 4),
            Err(Error::InvalidDimensions { .. })
        ));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_huge_allocation_reports_failure() {
        // Fits in usize but exceeds isize::MAX, so the reservation fails.
        let result = PixelBuffer::new(1 << 31, 1 << 31, 3);
        assert!(matches!(result, Err(Error::AllocationFailed { .. })));
    }

    #[test]
    fn test_from_vec_length_check() {
        assert!(PixelBuffer::from_vec(2, 2, 3, vec![0; 12]).is_ok());
        let err = PixelBuffer::from_vec(2, 2, 3, vec![0; 11]).unwrap_err();
        assert!(err.to_string().contains("expected 12 bytes, got 11"));
    }

    #[test]
    fn test_duplicate_is_independent() {
        let src = PixelBuffer::from_vec(2, 1, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let mut dup = src.try_duplicate().unwrap();
        assert_eq!(dup, src);

        dup.as_bytes_mut().fill(9);
        assert_eq!(src.as_bytes(), &[1, 2, 3, 4, 5, 6]);
        assert_ne!(dup, src);
    }

    #[test]
    fn test_clone_is_independent() {
        let src = PixelBuffer::from_vec(1, 1, 4, vec![10, 20, 30, 40]).unwrap();
        let mut copy = src.clone();
        copy.set(0, 0, 1, 0);
        assert_eq!(src.as_bytes(), &[10, 20, 30, 40]);
    }

    #[test]
    fn test_duplicate_empty_fails() {
        let empty = PixelBuffer::default();
        assert!(matches!(empty.try_duplicate(), Err(Error::EmptyBuffer)));
    }

    #[test]
    fn test_release_twice() {
        let mut buf = PixelBuffer::new(8, 8, 3).unwrap();
        buf.release();
        assert!(buf.is_empty());
        assert_eq!(buf.width(), 0);
        buf.release();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_pixel_access() {
        let buf = PixelBuffer::from_vec(2, 2, 3, (0..12).collect()).unwrap();
        assert_eq!(buf.pixel(1, 1), Some(&[9u8, 10, 11][..]));
        assert_eq!(buf.pixel(2, 0), None);
        assert_eq!(buf.row(1), Some(&[6u8, 7, 8, 9, 10, 11][..]));
        assert_eq!(buf.row(2), None);
        assert_eq!(buf.pixel_offset(1, 1), 9);
        assert_eq!(buf.pixels().count(), 4);
    }

    #[test]
    fn test_empty_pixels_iter() {
        let mut empty = PixelBuffer::default();
        assert_eq!(empty.pixels().count(), 0);
        assert_eq!(empty.pixels_mut().count(), 0);
    }

    #[test]
    fn test_debug_omits_bytes() {
        let buf = PixelBuffer::new(3, 3, 3).unwrap();
        let dbg = format!("{buf:?}");
        assert!(dbg.contains("width: 3"));
        assert!(dbg.contains("len: 27"));
    }
}

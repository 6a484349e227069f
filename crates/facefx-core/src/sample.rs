//! Bounds-clamped pixel access and bilinear sub-pixel sampling.
//!
//! Every accessor here uses an **edge-replicate** boundary policy: any
//! coordinate outside the buffer is pulled to the nearest edge pixel. Remap
//! filters rely on this to stretch the border instead of wrapping around or
//! producing black, and it guarantees no access ever lands outside the
//! owned storage.
//!
//! ```text
//!   get(-5, 1) == get(0, 1)        get(w + 9, 1) == get(w - 1, 1)
//! ```
//!
//! Channel indices are *not* clamped: reading an out-of-range channel returns
//! `0` and writing one is ignored, as is any access to an empty buffer.

use crate::PixelBuffer;

#[inline]
fn clamp_index(v: i64, len: u32) -> u32 {
    v.clamp(0, len as i64 - 1) as u32
}

#[inline]
fn clamp_coord(v: f32, len: u32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, (len - 1) as f32)
    }
}

impl PixelBuffer {
    /// Reads one channel at `(x, y)`, clamping coordinates into the buffer.
    ///
    /// Returns `0` for an empty buffer or `channel >= channels`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use facefx_core::PixelBuffer;
    ///
    /// let buf = PixelBuffer::from_vec(2, 1, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
    /// assert_eq!(buf.get(-100, 0, 0), 1);
    /// assert_eq!(buf.get(100, 50, 2), 6);
    /// assert_eq!(buf.get(0, 0, 3), 0);
    /// ```
    #[inline]
    pub fn get(&self, x: i64, y: i64, channel: usize) -> u8 {
        if self.is_empty() || channel >= self.channels() as usize {
            return 0;
        }
        let x = clamp_index(x, self.width());
        let y = clamp_index(y, self.height());
        self.as_bytes()[self.pixel_offset(x, y) + channel]
    }

    /// Writes one channel at `(x, y)`, clamping coordinates into the buffer.
    ///
    /// Ignored for an empty buffer or `channel >= channels`.
    #[inline]
    pub fn set(&mut self, x: i64, y: i64, channel: usize, value: u8) {
        if self.is_empty() || channel >= self.channels() as usize {
            return;
        }
        let x = clamp_index(x, self.width());
        let y = clamp_index(y, self.height());
        let idx = self.pixel_offset(x, y) + channel;
        self.as_bytes_mut()[idx] = value;
    }

    /// Bilinear blend of the four pixels around `(fx, fy)`, before truncation.
    ///
    /// The coordinates are clamped to `[0, width-1] x [0, height-1]`; the
    /// right/bottom neighbours are clamped again by [`PixelBuffer::get`]. The
    /// result is clamped to `[0, 255]`.
    pub fn bilinear_f32(&self, fx: f32, fy: f32, channel: usize) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        let fx = clamp_coord(fx, self.width());
        let fy = clamp_coord(fy, self.height());

        let x1 = fx as i64;
        let y1 = fy as i64;
        let x2 = x1 + 1;
        let y2 = y1 + 1;

        let tx = fx - x1 as f32;
        let ty = fy - y1 as f32;

        let p11 = self.get(x1, y1, channel) as f32;
        let p21 = self.get(x2, y1, channel) as f32;
        let p12 = self.get(x1, y2, channel) as f32;
        let p22 = self.get(x2, y2, channel) as f32;

        // Nested lerps stay exact on flat neighbourhoods.
        let top = p11 + (p21 - p11) * tx;
        let bot = p12 + (p22 - p12) * tx;
        let v = top + (bot - top) * ty;
        v.clamp(0.0, 255.0)
    }

    /// Bilinear sample at sub-pixel position `(fx, fy)`, truncated to `u8`.
    ///
    /// At integer coordinates this is exactly [`PixelBuffer::get`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use facefx_core::PixelBuffer;
    ///
    /// let buf = PixelBuffer::from_vec(2, 1, 3, vec![0, 0, 0, 100, 100, 100]).unwrap();
    /// assert_eq!(buf.bilinear(0.5, 0.0, 0), 50);
    /// assert_eq!(buf.bilinear(1.0, 0.0, 0), 100);
    /// ```
    #[inline]
    pub fn bilinear(&self, fx: f32, fy: f32, channel: usize) -> u8 {
        self.bilinear_f32(fx, fy, channel) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn gradient(w: u32, h: u32, ch: u8) -> PixelBuffer {
        let data = (0..w as usize * h as usize * ch as usize)
            .map(|i| (i * 7 % 256) as u8)
            .collect();
        PixelBuffer::from_vec(w, h, ch, data).unwrap()
    }

    #[test]
    fn test_get_clamps_far_out_of_range() {
        let buf = gradient(5, 4, 3);
        let coords = [i64::MIN, -1_000_000, -1, 0, 2, 4, 5, 1_000_000, i64::MAX];
        for &x in &coords {
            for &y in &coords {
                let cx = x.clamp(0, 4);
                let cy = y.clamp(0, 3);
                for c in 0..3 {
                    assert_eq!(buf.get(x, y, c), buf.get(cx, cy, c));
                }
            }
        }
    }

    #[test]
    fn test_get_bad_channel_is_zero() {
        let buf = PixelBuffer::from_vec(1, 1, 3, vec![9, 9, 9]).unwrap();
        assert_eq!(buf.get(0, 0, 3), 0);
        assert_eq!(buf.get(0, 0, usize::MAX), 0);
    }

    #[test]
    fn test_empty_buffer_reads_zero() {
        let mut buf = PixelBuffer::default();
        assert_eq!(buf.get(0, 0, 0), 0);
        assert_eq!(buf.bilinear(0.5, 0.5, 0), 0);
        buf.set(0, 0, 0, 7);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_set_clamps_and_drops() {
        let mut buf = PixelBuffer::new(3, 3, 4).unwrap();
        buf.set(-10, -10, 1, 200);
        assert_eq!(buf.get(0, 0, 1), 200);
        buf.set(50, 50, 2, 77);
        assert_eq!(buf.get(2, 2, 2), 77);

        let before = buf.clone();
        buf.set(1, 1, 4, 255);
        assert_eq!(buf, before);
    }

    #[test]
    fn test_bilinear_integer_coords_exact() {
        let buf = gradient(6, 5, 4);
        for y in 0..5 {
            for x in 0..6 {
                for c in 0..4 {
                    assert_eq!(
                        buf.bilinear(x as f32, y as f32, c),
                        buf.get(x, y, c),
                        "mismatch at ({x}, {y}, {c})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_bilinear_midpoint() {
        #[rustfmt::skip]
        let buf = PixelBuffer::from_vec(2, 2, 3, vec![
            0, 0, 0,      100, 100, 100,
            200, 200, 200, 40, 40, 40,
        ]).unwrap();
        assert_relative_eq!(buf.bilinear_f32(0.5, 0.0, 0), 50.0);
        assert_relative_eq!(buf.bilinear_f32(0.0, 0.5, 1), 100.0);
        assert_relative_eq!(buf.bilinear_f32(0.5, 0.5, 2), 85.0);
        assert_relative_eq!(buf.bilinear_f32(0.25, 0.0, 0), 25.0);
    }

    #[test]
    fn test_bilinear_clamps_coordinates() {
        let buf = gradient(4, 4, 3);
        assert_eq!(buf.bilinear(-3.5, -9.0, 0), buf.get(0, 0, 0));
        assert_eq!(buf.bilinear(99.0, 99.0, 1), buf.get(3, 3, 1));
        assert_eq!(buf.bilinear(f32::NAN, f32::INFINITY, 2), buf.get(0, 3, 2));
    }

    #[test]
    fn test_bilinear_flat_region_is_exact() {
        for value in [1u8, 77, 128, 200, 255] {
            let buf = PixelBuffer::from_vec(7, 5, 3, vec![value; 7 * 5 * 3]).unwrap();
            for iy in 0..=40 {
                for ix in 0..=60 {
                    let fx = ix as f32 * 0.1037;
                    let fy = iy as f32 * 0.0991;
                    assert_eq!(buf.bilinear(fx, fy, 1), value, "at ({fx}, {fy})");
                }
            }
        }
    }

    #[test]
    fn test_single_pixel_buffer() {
        let buf = PixelBuffer::from_vec(1, 1, 3, vec![11, 22, 33]).unwrap();
        assert_eq!(buf.bilinear(0.7, 0.2, 1), 22);
        assert_eq!(buf.get(5, -5, 2), 33);
    }
}

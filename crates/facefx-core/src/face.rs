//! Detected face region supplied alongside a frame.
//!
//! Coordinates share the pixel space of the [`PixelBuffer`](crate::PixelBuffer)
//! they accompany, with the usual top-left origin:
//!
//! ```text
//! (0,0) ────────► X
//!   │
//!   │   ┌──────────┐
//!   │   │   Face   │
//!   │   └──────────┘
//!   ▼
//!   Y
//! ```
//!
//! A region may be partially or fully off-frame (negative origin, extent past
//! the right/bottom edge); consumers clip, they never reject.

/// Axis-aligned face bounding box from an external detector.
///
/// `confidence` is carried through for the host and never validated here.
///
/// # Example
///
/// ```rust
/// use facefx_core::FaceRegion;
///
/// let face = FaceRegion::new(100.0, 50.0, 80.0, 120.0);
/// assert_eq!(face.center(), (140.0, 110.0));
/// assert_eq!(face.confidence, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct FaceRegion {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
    /// Detector confidence, nominally in `[0, 1]`
    pub confidence: f32,
}

impl FaceRegion {
    /// Creates a region with full confidence.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::with_confidence(x, y, width, height, 1.0)
    }

    /// Creates a region with an explicit detector confidence.
    #[inline]
    pub const fn with_confidence(x: f32, y: f32, width: f32, height: f32, confidence: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            confidence,
        }
    }

    /// Center point of the box.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// `true` if the box has no positive area (including NaN extents).
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

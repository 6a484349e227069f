//! Error types for facefx-core operations.
//!
//! Buffer construction and duplication are the only fallible operations in
//! this crate. Sampling never fails: out-of-range coordinates are clamped and
//! out-of-range channels read as zero.
//!
//! # Usage
//!
//! ```rust
//! use facefx_core::{Error, PixelBuffer};
//!
//! let err = PixelBuffer::new(0, 10, 3).unwrap_err();
//! assert!(matches!(err, Error::InvalidDimensions { .. }));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while creating or copying pixel buffers.
///
/// # Categories
///
/// - **Dimension errors**: [`InvalidDimensions`](Error::InvalidDimensions),
///   [`UnsupportedChannels`](Error::UnsupportedChannels)
/// - **Allocation errors**: [`AllocationFailed`](Error::AllocationFailed)
/// - **State errors**: [`EmptyBuffer`](Error::EmptyBuffer)
#[derive(Debug, Error)]
pub enum Error {
    /// Width or height is zero, the byte size overflows `usize`, or the
    /// supplied data length does not match the dimensions.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Channel count is not 3 (RGB) or 4 (RGBA).
    #[error("unsupported channel count: {0} (expected 3 or 4)")]
    UnsupportedChannels(u8),

    /// Storage for the buffer could not be reserved.
    ///
    /// # Fields
    ///
    /// - `requested` - Number of bytes requested
    /// - `reason` - Allocator diagnostic
    #[error("failed to allocate {requested} bytes: {reason}")]
    AllocationFailed {
        /// Bytes requested
        requested: usize,
        /// Failure reason
        reason: String,
    },

    /// The buffer has been released or was never allocated.
    #[error("buffer has no storage")]
    EmptyBuffer,
}

impl Error {
    /// Creates an [`Error::AllocationFailed`] error.
    #[inline]
    pub fn allocation_failed(requested: usize, reason: impl Into<String>) -> Self {
        Self::AllocationFailed {
            requested,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is an allocation error.
    #[inline]
    pub fn is_allocation_error(&self) -> bool {
        matches!(self, Self::AllocationFailed { .. })
    }
}

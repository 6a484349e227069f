//! # facefx-core
//!
//! Core types for the facefx real-time image-effects engine.
//!
//! - [`PixelBuffer`] - Owned, row-major, channel-interleaved 8-bit frame
//! - [`FaceRegion`] - Optional face box used to anchor effects and overlays
//! - Sampling primitives on [`PixelBuffer`]: [`get`](PixelBuffer::get),
//!   [`set`](PixelBuffer::set) and [`bilinear`](PixelBuffer::bilinear)
//!
//! ## Crate Structure
//!
//! ```text
//! facefx-core (this crate)
//!    ^
//!    |
//!    +-- facefx-ops (filters, remap, overlay, dispatch)
//!    +-- facefx-tests, facefx-bench
//! ```
//!
//! ## Example
//!
//! ```rust
//! use facefx_core::{FaceRegion, PixelBuffer};
//!
//! let mut frame = PixelBuffer::new(320, 240, 3).unwrap();
//! frame.set(0, 0, 0, 255);
//! let face = FaceRegion::new(100.0, 60.0, 80.0, 100.0);
//! assert_eq!(frame.get(-1, -1, 0), 255);
//! assert!(!face.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod error;
pub mod face;
mod sample;

pub use buffer::{PixelBuffer, ALPHA_CHANNEL, RGB, RGBA};
pub use error::{Error, Result};
pub use face::FaceRegion;

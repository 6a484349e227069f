//! # facefx-ops
//!
//! Per-frame image effects for live camera feeds.
//!
//! Every operation rewrites a [`PixelBuffer`](facefx_core::PixelBuffer) in
//! place and is cheap enough to run once per frame.
//!
//! # Modules
//!
//! - [`color`] - Position-independent color filters (grayscale, sepia, ...)
//! - [`warp`] - Geometric remaps (bulge, swirl, stretch, flips) over a generic driver
//! - [`composite`] - Face-mask overlay
//! - [`effect`] - The fixed effect catalog
//! - [`registry`] - Effect dispatch with an explicit "not implemented" outcome
//! - [`config`] - Tunable parameters, loadable from YAML
//!
//! # Example
//!
//! ```rust
//! use facefx_core::{FaceRegion, PixelBuffer};
//! use facefx_ops::{apply_filter, status_code, Effect};
//!
//! let mut frame = PixelBuffer::new(640, 480, 4).unwrap();
//! let face = FaceRegion::new(260.0, 180.0, 120.0, 150.0);
//!
//! apply_filter(&mut frame, Effect::Bulge, Some(&face), 0).unwrap();
//!
//! let outcome = apply_filter(&mut frame, Effect::Kaleidoscope, Some(&face), 1);
//! assert_eq!(status_code(&outcome), -2);
//! ```
//!
//! # Features
//!
//! - `parallel` - process remap rows with rayon

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod color;
pub mod composite;
pub mod config;
pub mod effect;
pub mod registry;
pub mod warp;

pub use composite::{composite_mask, MaskImage};
pub use config::EffectConfig;
pub use effect::Effect;
pub use error::{status_code, OpsError, OpsResult};
pub use registry::{apply_filter, apply_filter_with, Registry};

//! Tunable filter parameters.
//!
//! Defaults reproduce the fixed constants of the built-in filters, so
//! `EffectConfig::default()` is what [`apply_filter`](crate::apply_filter)
//! uses. Hosts that want different looks load a YAML document; every field is
//! optional and falls back to its default:
//!
//! ```yaml
//! bulge:
//!   strength: 0.8
//! pixelate:
//!   block_size: 16
//! ```
//!
//! ```rust
//! use facefx_ops::EffectConfig;
//!
//! let cfg = EffectConfig::from_yaml_str("swirl:\n  strength: 3.5\n").unwrap();
//! assert_eq!(cfg.swirl.strength, 3.5);
//! assert_eq!(cfg.bulge.strength, 0.5);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{OpsError, OpsResult};

/// Bulge remap parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BulgeParams {
    /// How strongly pixels near the rim are pulled toward the center.
    pub strength: f32,
}

impl Default for BulgeParams {
    fn default() -> Self {
        Self { strength: 0.5 }
    }
}

/// Swirl remap parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SwirlParams {
    /// Twist in radians at the center, decaying to zero at the radius.
    pub strength: f32,
}

impl Default for SwirlParams {
    fn default() -> Self {
        Self { strength: 2.0 }
    }
}

/// Anisotropic stretch around the face center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StretchParams {
    /// Horizontal source scale.
    pub x: f32,
    /// Vertical source scale.
    pub y: f32,
}

impl Default for StretchParams {
    fn default() -> Self {
        Self { x: 1.5, y: 0.7 }
    }
}

/// Channel gain for the red/green/blue tints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TintParams {
    /// Multiplier applied to the tinted channel.
    pub gain: f32,
}

impl Default for TintParams {
    fn default() -> Self {
        Self { gain: 1.5 }
    }
}

/// Posterize quantization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PosterizeParams {
    /// Number of output levels per channel.
    pub levels: u32,
}

impl Default for PosterizeParams {
    fn default() -> Self {
        Self { levels: 4 }
    }
}

/// Pixelate tile size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PixelateParams {
    /// Tile edge in pixels.
    pub block_size: u32,
}

impl Default for PixelateParams {
    fn default() -> Self {
        Self { block_size: 10 }
    }
}

/// Solarize threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolarizeParams {
    /// Channel values strictly above this are inverted.
    pub threshold: u8,
}

impl Default for SolarizeParams {
    fn default() -> Self {
        Self { threshold: 128 }
    }
}

/// Face-mask overlay sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MaskParams {
    /// Overlay size relative to the face box (1.6 = 60% larger).
    pub coverage: f32,
}

impl Default for MaskParams {
    fn default() -> Self {
        Self { coverage: 1.6 }
    }
}

/// All tunable parameters, one section per filter family.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EffectConfig {
    /// [`Effect::Bulge`](crate::Effect::Bulge)
    pub bulge: BulgeParams,
    /// [`Effect::Swirl`](crate::Effect::Swirl)
    pub swirl: SwirlParams,
    /// [`Effect::Stretch`](crate::Effect::Stretch)
    pub stretch: StretchParams,
    /// Red, green and blue tints
    pub tint: TintParams,
    /// [`Effect::Posterize`](crate::Effect::Posterize)
    pub posterize: PosterizeParams,
    /// [`Effect::Pixelate`](crate::Effect::Pixelate)
    pub pixelate: PixelateParams,
    /// [`Effect::Solarize`](crate::Effect::Solarize)
    pub solarize: SolarizeParams,
    /// [`composite_mask`](crate::composite::composite_mask)
    pub mask: MaskParams,
}

fn finite(name: &str, v: f32) -> OpsResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(OpsError::InvalidParameter(format!("{name} must be finite, got {v}")))
    }
}

impl EffectConfig {
    /// Parses and validates a YAML document.
    pub fn from_yaml_str(yaml: &str) -> OpsResult<Self> {
        let cfg: Self = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads, parses and validates a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> OpsResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading effect config");
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Serializes to YAML.
    pub fn to_yaml(&self) -> OpsResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Checks every parameter is in range.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidParameter`] naming the first offending field.
    pub fn validate(&self) -> OpsResult<()> {
        finite("bulge.strength", self.bulge.strength)?;
        finite("swirl.strength", self.swirl.strength)?;
        finite("stretch.x", self.stretch.x)?;
        finite("stretch.y", self.stretch.y)?;
        finite("tint.gain", self.tint.gain)?;
        if self.tint.gain < 0.0 {
            return Err(OpsError::InvalidParameter(format!(
                "tint.gain must be >= 0, got {}",
                self.tint.gain
            )));
        }
        if self.posterize.levels == 0 {
            return Err(OpsError::InvalidParameter("posterize.levels must be >= 1".into()));
        }
        if self.pixelate.block_size == 0 {
            return Err(OpsError::InvalidParameter("pixelate.block_size must be >= 1".into()));
        }
        if !(self.mask.coverage.is_finite() && self.mask.coverage > 0.0) {
            return Err(OpsError::InvalidParameter(format!(
                "mask.coverage must be > 0, got {}",
                self.mask.coverage
            )));
        }
        Ok(())
    }
}

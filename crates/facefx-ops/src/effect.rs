//! The effect catalog.
//!
//! Every selectable effect has a fixed numeric identifier that hosts send
//! across their boundary (`0` = [`Effect::None`] through `79` =
//! [`Effect::Puzzle`]) and a stable snake_case name. Only a subset of the
//! catalog is backed by an implementation; which ones is decided by the
//! [`Registry`](crate::registry::Registry), not by this enum.
//!
//! # Example
//!
//! ```rust
//! use facefx_ops::Effect;
//!
//! let swirl: Effect = "SWIRL".parse().unwrap();
//! assert_eq!(swirl, Effect::Swirl);
//! assert_eq!(swirl.id(), 30);
//! assert_eq!(Effect::from_id(30), Some(Effect::Swirl));
//! assert_eq!(swirl.to_string(), "swirl");
//! ```

use std::fmt;
use std::str::FromStr;

use crate::OpsError;

macro_rules! catalog {
    ($($variant:ident = $id:literal => $name:literal,)*) => {
        /// Effect identifier from the fixed catalog.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum Effect {
            $(
                #[doc = concat!("`", $name, "`")]
                $variant = $id,
            )*
        }

        impl Effect {
            /// Every catalog member in identifier order.
            pub const ALL: [Effect; Effect::COUNT] = [$(Effect::$variant,)*];

            /// Stable snake_case name.
            pub const fn name(self) -> &'static str {
                match self {
                    $(Effect::$variant => $name,)*
                }
            }
        }
    };
}

catalog! {
    None = 0 => "none",
    BlackWhite = 1 => "black_white",
    Sepia = 2 => "sepia",
    Negative = 3 => "negative",
    Vintage = 4 => "vintage",
    NeonGlow = 5 => "neon_glow",
    RedTint = 6 => "red_tint",
    BlueTint = 7 => "blue_tint",
    GreenTint = 8 => "green_tint",
    Posterize = 9 => "posterize",
    Thermal = 10 => "thermal",
    Pixelate = 11 => "pixelate",
    Blur = 12 => "blur",
    Sharpen = 13 => "sharpen",
    Emboss = 14 => "emboss",
    Sketch = 15 => "sketch",
    Cartoon = 16 => "cartoon",
    Rainbow = 17 => "rainbow",
    RainbowShift = 18 => "rainbow_shift",
    AcidTrip = 19 => "acid_trip",
    Vhs = 20 => "vhs",
    Retro = 21 => "retro",
    Cyberpunk = 22 => "cyberpunk",
    Anime = 23 => "anime",
    Glow = 24 => "glow",
    Solarize = 25 => "solarize",
    EdgeDetect = 26 => "edge_detect",
    Halftone = 27 => "halftone",
    Bulge = 28 => "bulge",
    Stretch = 29 => "stretch",
    Swirl = 30 => "swirl",
    Fisheye = 31 => "fisheye",
    Pinch = 32 => "pinch",
    Wave = 33 => "wave",
    Mirror = 34 => "mirror",
    Twirl = 35 => "twirl",
    Ripple = 36 => "ripple",
    Sphere = 37 => "sphere",
    Tunnel = 38 => "tunnel",
    WaterRipple = 39 => "water_ripple",
    RadialBlur = 40 => "radial_blur",
    Cylinder = 41 => "cylinder",
    Barrel = 42 => "barrel",
    Pincushion = 43 => "pincushion",
    Whirlpool = 44 => "whirlpool",
    RadialZoom = 45 => "radial_zoom",
    Concave = 46 => "concave",
    Convex = 47 => "convex",
    Spiral = 48 => "spiral",
    RadialStretch = 49 => "radial_stretch",
    RadialCompress = 50 => "radial_compress",
    VerticalWave = 51 => "vertical_wave",
    HorizontalWave = 52 => "horizontal_wave",
    SkewHorizontal = 53 => "skew_horizontal",
    SkewVertical = 54 => "skew_vertical",
    RotateZoom = 55 => "rotate_zoom",
    RadialWave = 56 => "radial_wave",
    ZoomIn = 57 => "zoom_in",
    ZoomOut = 58 => "zoom_out",
    Rotate = 59 => "rotate",
    Rotate45 = 60 => "rotate_45",
    Rotate90 = 61 => "rotate_90",
    FlipHorizontal = 62 => "flip_horizontal",
    FlipVertical = 63 => "flip_vertical",
    FlipBoth = 64 => "flip_both",
    QuadMirror = 65 => "quad_mirror",
    Tile = 66 => "tile",
    RadialTile = 67 => "radial_tile",
    ZoomBlur = 68 => "zoom_blur",
    Melt = 69 => "melt",
    Kaleidoscope = 70 => "kaleidoscope",
    Glitch = 71 => "glitch",
    DoubleVision = 72 => "double_vision",
    FastZoomIn = 73 => "fast_zoom_in",
    FastZoomOut = 74 => "fast_zoom_out",
    Shake = 75 => "shake",
    Pulse = 76 => "pulse",
    SpiralZoom = 77 => "spiral_zoom",
    ExtremeCloseup = 78 => "extreme_closeup",
    Puzzle = 79 => "puzzle",
}

impl Effect {
    /// Number of catalog members.
    pub const COUNT: usize = 80;

    /// Numeric identifier used at the host boundary.
    #[inline]
    pub const fn id(self) -> i32 {
        self as u8 as i32
    }

    /// Looks up an effect by numeric identifier.
    ///
    /// Returns `None` for identifiers outside the catalog.
    pub fn from_id(id: i32) -> Option<Self> {
        usize::try_from(id).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    /// Looks up an effect by name.
    ///
    /// Matching ignores ASCII case and treats `-` and spaces like `_`, so
    /// `"black-white"`, `"BLACK_WHITE"` and `"Black White"` all resolve.
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        Self::ALL.iter().copied().find(|e| e.name() == key)
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Effect {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| OpsError::UnknownEffectName(s.to_string()))
    }
}

impl TryFrom<i32> for Effect {
    type Error = OpsError;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        Self::from_id(id).ok_or(OpsError::UnknownEffect(id))
    }
}

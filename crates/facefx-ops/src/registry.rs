//! Effect dispatch.
//!
//! A [`Registry`] maps every [`Effect`] in the catalog to a [`Binding`]:
//! identity, a filter function, or explicitly unimplemented. Asking for an
//! unimplemented effect is a distinct outcome ([`OpsError::NotImplemented`])
//! rather than a silent no-op, so hosts can tell "nothing to do" from
//! "can't do it".
//!
//! # Example
//!
//! ```rust
//! use facefx_core::PixelBuffer;
//! use facefx_ops::{apply_filter, Effect, OpsError};
//!
//! let mut frame = PixelBuffer::new(32, 32, 4).unwrap();
//! apply_filter(&mut frame, Effect::Sepia, None, 0).unwrap();
//!
//! let err = apply_filter(&mut frame, Effect::Wave, None, 1).unwrap_err();
//! assert!(matches!(err, OpsError::NotImplemented(Effect::Wave)));
//! ```
//!
//! Hosts extend the catalog by registering their own filters:
//!
//! ```rust
//! use facefx_core::PixelBuffer;
//! use facefx_ops::registry::{FilterContext, Registry};
//! use facefx_ops::{Effect, EffectConfig, OpsResult};
//!
//! fn mirror(buf: &mut PixelBuffer, _ctx: &FilterContext<'_>) -> OpsResult<()> {
//!     facefx_ops::warp::flip(buf, facefx_ops::warp::FlipAxis::Horizontal)
//! }
//!
//! let mut registry = Registry::builtin();
//! registry.register(Effect::Mirror, mirror);
//!
//! let mut frame = PixelBuffer::new(8, 8, 3).unwrap();
//! registry.dispatch(&mut frame, Effect::Mirror, None, 0, &EffectConfig::default()).unwrap();
//! ```

use std::sync::LazyLock;

use facefx_core::{FaceRegion, PixelBuffer};
use tracing::{debug, warn};

use crate::color::{self, TintChannel};
use crate::warp::{self, FlipAxis};
use crate::{Effect, EffectConfig, OpsError, OpsResult};

/// Per-call inputs handed to a filter alongside the frame.
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    /// Detected face, if any.
    pub face: Option<&'a FaceRegion>,
    /// Host frame counter, passed through unchanged for animated effects.
    pub frame_count: i64,
    /// Tunable parameters.
    pub config: &'a EffectConfig,
}

/// Filter entry point.
pub type FilterFn = fn(&mut PixelBuffer, &FilterContext<'_>) -> OpsResult<()>;

/// What an effect resolves to.
#[derive(Clone, Copy)]
pub enum Binding {
    /// Leaves the frame untouched.
    Identity,
    /// Runs the filter.
    Filter(FilterFn),
    /// Known effect with no implementation.
    Unimplemented,
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identity => f.write_str("Identity"),
            Self::Filter(_) => f.write_str("Filter(..)"),
            Self::Unimplemented => f.write_str("Unimplemented"),
        }
    }
}

fn black_white(buf: &mut PixelBuffer, _: &FilterContext<'_>) -> OpsResult<()> {
    color::grayscale(buf);
    Ok(())
}

fn sepia(buf: &mut PixelBuffer, _: &FilterContext<'_>) -> OpsResult<()> {
    color::sepia(buf);
    Ok(())
}

fn negative(buf: &mut PixelBuffer, _: &FilterContext<'_>) -> OpsResult<()> {
    color::negative(buf);
    Ok(())
}

fn vintage(buf: &mut PixelBuffer, _: &FilterContext<'_>) -> OpsResult<()> {
    color::vintage(buf);
    Ok(())
}

fn red_tint(buf: &mut PixelBuffer, ctx: &FilterContext<'_>) -> OpsResult<()> {
    color::tint(buf, TintChannel::Red, ctx.config.tint.gain);
    Ok(())
}

fn green_tint(buf: &mut PixelBuffer, ctx: &FilterContext<'_>) -> OpsResult<()> {
    color::tint(buf, TintChannel::Green, ctx.config.tint.gain);
    Ok(())
}

fn blue_tint(buf: &mut PixelBuffer, ctx: &FilterContext<'_>) -> OpsResult<()> {
    color::tint(buf, TintChannel::Blue, ctx.config.tint.gain);
    Ok(())
}

fn posterize(buf: &mut PixelBuffer, ctx: &FilterContext<'_>) -> OpsResult<()> {
    color::posterize(buf, ctx.config.posterize.levels);
    Ok(())
}

fn thermal(buf: &mut PixelBuffer, _: &FilterContext<'_>) -> OpsResult<()> {
    color::thermal(buf);
    Ok(())
}

fn pixelate(buf: &mut PixelBuffer, ctx: &FilterContext<'_>) -> OpsResult<()> {
    color::pixelate(buf, ctx.config.pixelate.block_size);
    Ok(())
}

fn solarize(buf: &mut PixelBuffer, ctx: &FilterContext<'_>) -> OpsResult<()> {
    color::solarize(buf, ctx.config.solarize.threshold);
    Ok(())
}

fn bulge(buf: &mut PixelBuffer, ctx: &FilterContext<'_>) -> OpsResult<()> {
    warp::bulge(buf, ctx.config.bulge.strength)
}

fn swirl(buf: &mut PixelBuffer, ctx: &FilterContext<'_>) -> OpsResult<()> {
    warp::swirl(buf, ctx.config.swirl.strength)
}

fn stretch(buf: &mut PixelBuffer, ctx: &FilterContext<'_>) -> OpsResult<()> {
    let p = ctx.config.stretch;
    warp::stretch(buf, ctx.face, p.x, p.y)
}

fn flip_horizontal(buf: &mut PixelBuffer, _: &FilterContext<'_>) -> OpsResult<()> {
    warp::flip(buf, FlipAxis::Horizontal)
}

fn flip_vertical(buf: &mut PixelBuffer, _: &FilterContext<'_>) -> OpsResult<()> {
    warp::flip(buf, FlipAxis::Vertical)
}

fn flip_both(buf: &mut PixelBuffer, _: &FilterContext<'_>) -> OpsResult<()> {
    warp::flip(buf, FlipAxis::Both)
}

/// Table from catalog member to [`Binding`].
#[derive(Debug, Clone)]
pub struct Registry {
    bindings: [Binding; Effect::COUNT],
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Registry {
    /// Registry with every effect unimplemented except [`Effect::None`].
    pub fn empty() -> Self {
        let mut bindings = [Binding::Unimplemented; Effect::COUNT];
        bindings[Effect::None as usize] = Binding::Identity;
        Self { bindings }
    }

    /// Registry with the built-in filters bound.
    pub fn builtin() -> Self {
        let mut r = Self::empty();
        r.register(Effect::BlackWhite, black_white);
        r.register(Effect::Sepia, sepia);
        r.register(Effect::Negative, negative);
        r.register(Effect::Vintage, vintage);
        r.register(Effect::RedTint, red_tint);
        r.register(Effect::GreenTint, green_tint);
        r.register(Effect::BlueTint, blue_tint);
        r.register(Effect::Posterize, posterize);
        r.register(Effect::Thermal, thermal);
        r.register(Effect::Pixelate, pixelate);
        r.register(Effect::Solarize, solarize);
        r.register(Effect::Bulge, bulge);
        r.register(Effect::Stretch, stretch);
        r.register(Effect::Swirl, swirl);
        r.register(Effect::FlipHorizontal, flip_horizontal);
        r.register(Effect::FlipVertical, flip_vertical);
        r.register(Effect::FlipBoth, flip_both);
        r
    }

    /// Binds `effect` to `filter`, replacing any previous binding.
    pub fn register(&mut self, effect: Effect, filter: FilterFn) {
        self.bindings[effect as usize] = Binding::Filter(filter);
    }

    /// Marks `effect` unimplemented.
    pub fn unregister(&mut self, effect: Effect) {
        self.bindings[effect as usize] = Binding::Unimplemented;
    }

    /// Current binding of `effect`.
    pub fn binding(&self, effect: Effect) -> Binding {
        self.bindings[effect as usize]
    }

    /// True unless `effect` is bound to [`Binding::Unimplemented`].
    pub fn is_implemented(&self, effect: Effect) -> bool {
        !matches!(self.binding(effect), Binding::Unimplemented)
    }

    /// Implemented effects in identifier order.
    pub fn implemented(&self) -> impl Iterator<Item = Effect> + '_ {
        Effect::ALL.into_iter().filter(|&e| self.is_implemented(e))
    }

    /// Applies `effect` to `buf` in place.
    ///
    /// # Errors
    ///
    /// - [`OpsError::InvalidInput`] for an empty buffer, before any filter runs
    /// - [`OpsError::NotImplemented`] for an unbound effect; the buffer is untouched
    /// - whatever the bound filter returns
    pub fn dispatch(
        &self,
        buf: &mut PixelBuffer,
        effect: Effect,
        face: Option<&FaceRegion>,
        frame_count: i64,
        config: &EffectConfig,
    ) -> OpsResult<()> {
        if buf.is_empty() {
            return Err(OpsError::InvalidInput("empty frame".into()));
        }
        debug!(
            effect = %effect,
            width = buf.width(),
            height = buf.height(),
            frame_count,
            "Dispatching effect"
        );

        match self.binding(effect) {
            Binding::Identity => Ok(()),
            Binding::Filter(filter) => {
                let ctx = FilterContext { face, frame_count, config };
                filter(buf, &ctx)
            }
            Binding::Unimplemented => {
                warn!(effect = %effect, id = effect.id(), "Effect not implemented");
                Err(OpsError::NotImplemented(effect))
            }
        }
    }

    /// [`dispatch`](Self::dispatch) by raw host identifier.
    ///
    /// # Errors
    ///
    /// [`OpsError::UnknownEffect`] if `id` is outside the catalog, plus
    /// everything [`dispatch`](Self::dispatch) returns.
    pub fn dispatch_id(
        &self,
        buf: &mut PixelBuffer,
        id: i32,
        face: Option<&FaceRegion>,
        frame_count: i64,
        config: &EffectConfig,
    ) -> OpsResult<()> {
        if buf.is_empty() {
            return Err(OpsError::InvalidInput("empty frame".into()));
        }
        let effect = Effect::try_from(id)?;
        self.dispatch(buf, effect, face, frame_count, config)
    }
}

/// Applies `effect` with the built-in filters and default parameters.
pub fn apply_filter(
    buf: &mut PixelBuffer,
    effect: Effect,
    face: Option<&FaceRegion>,
    frame_count: i64,
) -> OpsResult<()> {
    apply_filter_with(buf, effect, face, frame_count, &EffectConfig::default())
}

/// Applies `effect` with the built-in filters and caller parameters.
pub fn apply_filter_with(
    buf: &mut PixelBuffer,
    effect: Effect,
    face: Option<&FaceRegion>,
    frame_count: i64,
    config: &EffectConfig,
) -> OpsResult<()> {
    BUILTIN.dispatch(buf, effect, face, frame_count, config)
}

/// Built-in registry shared by [`apply_filter`] and [`apply_filter_with`].
static BUILTIN: LazyLock<Registry> = LazyLock::new(Registry::builtin);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};

    fn make_frame() -> PixelBuffer {
        let data = (0..12 * 9 * 4).map(|i| (i * 7 % 251) as u8).collect();
        PixelBuffer::from_vec(12, 9, 4, data).unwrap()
    }

    #[test]
    fn test_unimplemented_leaves_buffer() {
        let src = make_frame();
        for effect in [Effect::Wave, Effect::Mirror, Effect::Kaleidoscope, Effect::Puzzle] {
            let mut buf = src.clone();
            let err = apply_filter(&mut buf, effect, None, 3).unwrap_err();
            assert!(matches!(err, OpsError::NotImplemented(e) if e == effect));
            assert_eq!(err.code(), -2);
            assert_eq!(buf, src);
        }
    }

    #[test]
    fn test_none_is_identity() {
        let src = make_frame();
        let mut buf = src.clone();
        apply_filter(&mut buf, Effect::None, None, 0).unwrap();
        assert_eq!(buf, src);
    }

    #[test]
    fn test_empty_buffer_rejected_first() {
        let mut buf = PixelBuffer::default();
        for effect in [Effect::None, Effect::Sepia, Effect::Wave] {
            let err = apply_filter(&mut buf, effect, None, 0).unwrap_err();
            assert!(matches!(err, OpsError::InvalidInput(_)));
        }
        let err = Registry::builtin()
            .dispatch_id(&mut buf, 999, None, 0, &EffectConfig::default())
            .unwrap_err();
        assert!(matches!(err, OpsError::InvalidInput(_)));
    }

    #[test]
    fn test_unknown_id() {
        let registry = Registry::builtin();
        let cfg = EffectConfig::default();
        for id in [Effect::COUNT as i32, -1, i32::MAX] {
            let mut buf = make_frame();
            let err = registry.dispatch_id(&mut buf, id, None, 0, &cfg).unwrap_err();
            assert!(matches!(err, OpsError::UnknownEffect(i) if i == id));
            assert_eq!(err.code(), -3);
        }
    }

    #[test]
    fn test_dispatch_id_matches_enum() {
        let registry = Registry::builtin();
        let cfg = EffectConfig::default();
        let mut by_id = make_frame();
        let mut by_enum = by_id.clone();
        registry.dispatch_id(&mut by_id, 2, None, 0, &cfg).unwrap();
        registry.dispatch(&mut by_enum, Effect::Sepia, None, 0, &cfg).unwrap();
        assert_eq!(by_id, by_enum);
    }

    #[test]
    fn test_builtin_set() {
        let registry = Registry::builtin();
        let implemented: Vec<_> = registry.implemented().collect();
        assert_eq!(implemented.len(), 18);
        assert_eq!(implemented[0], Effect::None);
        assert!(registry.is_implemented(Effect::Swirl));
        assert!(registry.is_implemented(Effect::FlipBoth));
        assert!(!registry.is_implemented(Effect::NeonGlow));
        assert!(matches!(registry.binding(Effect::None), Binding::Identity));
    }

    #[test]
    fn test_every_implemented_effect_runs() {
        let registry = Registry::builtin();
        let cfg = EffectConfig::default();
        let face = FaceRegion::new(2.0, 2.0, 6.0, 5.0);
        for effect in registry.implemented() {
            for ch in [3, 4] {
                let mut buf = PixelBuffer::new(12, 9, ch).unwrap();
                registry
                    .dispatch(&mut buf, effect, Some(&face), 0, &cfg)
                    .unwrap_or_else(|e| panic!("{effect}: {e}"));
            }
        }
    }

    #[test]
    fn test_unregister_masks_builtin() {
        let mut registry = Registry::builtin();
        registry.unregister(Effect::Sepia);
        let mut buf = make_frame();
        let err = registry
            .dispatch(&mut buf, Effect::Sepia, None, 0, &EffectConfig::default())
            .unwrap_err();
        assert!(matches!(err, OpsError::NotImplemented(Effect::Sepia)));
        assert!(!Registry::empty().is_implemented(Effect::Sepia));
    }

    static SEEN_FRAME: AtomicI64 = AtomicI64::new(-1);

    fn record_frame(_: &mut PixelBuffer, ctx: &FilterContext<'_>) -> OpsResult<()> {
        SEEN_FRAME.store(ctx.frame_count, Ordering::SeqCst);
        Ok(())
    }

    #[test]
    fn test_frame_count_passthrough() {
        let mut registry = Registry::empty();
        registry.register(Effect::Pulse, record_frame);
        let mut buf = make_frame();
        registry
            .dispatch(&mut buf, Effect::Pulse, None, 12345, &EffectConfig::default())
            .unwrap();
        assert_eq!(SEEN_FRAME.load(Ordering::SeqCst), 12345);
    }

    #[test]
    fn test_shared_builtin_matches_fresh() {
        let fresh = Registry::builtin();
        for effect in Effect::ALL {
            assert_eq!(BUILTIN.is_implemented(effect), fresh.is_implemented(effect), "{effect}");
        }
    }

    #[test]
    fn test_config_reaches_filter() {
        let mut cfg = EffectConfig::default();
        cfg.posterize.levels = 2;
        let mut buf = PixelBuffer::from_vec(1, 1, 3, vec![200, 100, 20]).unwrap();
        apply_filter_with(&mut buf, Effect::Posterize, None, 0, &cfg).unwrap();
        assert_eq!(buf.as_bytes(), &[128, 0, 0]);
    }
}

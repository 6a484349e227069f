//! Error types for effect operations.
//!
//! Every public entry point returns [`OpsResult`]. The variants map onto the
//! outcome classes a host needs to tell apart:
//!
//! | Outcome | Variant | [`OpsError::code`] |
//! |---|---|---|
//! | invalid input | [`InvalidInput`](OpsError::InvalidInput) | `-1` |
//! | known but unimplemented effect | [`NotImplemented`](OpsError::NotImplemented) | `-2` |
//! | identifier outside the catalog | [`UnknownEffect`](OpsError::UnknownEffect), [`UnknownEffectName`](OpsError::UnknownEffectName) | `-3` |
//! | resource exhaustion | [`ResourceExhausted`](OpsError::ResourceExhausted) | `-4` |
//! | bad parameters or config | [`InvalidParameter`](OpsError::InvalidParameter), [`Config`](OpsError::Config), [`Io`](OpsError::Io) | `-5` |

use thiserror::Error;

use crate::Effect;

/// Error type for effect operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Empty buffer, empty mask, or mask smaller than its declared size.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The effect is in the catalog but has no registered filter.
    #[error("effect not implemented: {0}")]
    NotImplemented(Effect),

    /// Numeric identifier outside the catalog.
    #[error("unknown effect id: {0}")]
    UnknownEffect(i32),

    /// Name that matches no catalog member.
    #[error("unknown effect name: {0:?}")]
    UnknownEffectName(String),

    /// A working copy of the frame could not be allocated.
    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),

    /// Filter parameter out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Configuration document could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// Configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl OpsError {
    /// Status code for hosts that speak integers across their boundary.
    ///
    /// Success is `0` and never produced here.
    pub fn code(&self) -> i32 {
        match self {
            Self::InvalidInput(_) => -1,
            Self::NotImplemented(_) => -2,
            Self::UnknownEffect(_) | Self::UnknownEffectName(_) => -3,
            Self::ResourceExhausted(_) => -4,
            Self::InvalidParameter(_) | Self::Config(_) | Self::Io(_) => -5,
        }
    }
}

impl From<facefx_core::Error> for OpsError {
    fn from(err: facefx_core::Error) -> Self {
        if err.is_allocation_error() {
            Self::ResourceExhausted(err.to_string())
        } else {
            Self::InvalidInput(err.to_string())
        }
    }
}

/// Result type for effect operations.
pub type OpsResult<T> = Result<T, OpsError>;

/// Folds an [`OpsResult`] into a host status code (`0` on success).
pub fn status_code(result: &OpsResult<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => e.code(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct_per_outcome() {
        assert_eq!(OpsError::InvalidInput("x".into()).code(), -1);
        assert_eq!(OpsError::NotImplemented(Effect::Wave).code(), -2);
        assert_eq!(OpsError::UnknownEffect(99).code(), -3);
        assert_eq!(OpsError::UnknownEffectName("x".into()).code(), -3);
        assert_eq!(OpsError::ResourceExhausted("x".into()).code(), -4);
        assert_eq!(OpsError::InvalidParameter("x".into()).code(), -5);
    }

    #[test]
    fn test_status_code() {
        assert_eq!(status_code(&Ok(())), 0);
        assert_eq!(status_code(&Err(OpsError::NotImplemented(Effect::Mirror))), -2);
    }

    #[test]
    fn test_core_error_mapping() {
        let alloc = facefx_core::Error::allocation_failed(10, "oom");
        assert!(matches!(OpsError::from(alloc), OpsError::ResourceExhausted(_)));

        let empty = facefx_core::Error::EmptyBuffer;
        assert!(matches!(OpsError::from(empty), OpsError::InvalidInput(_)));
    }

    #[test]
    fn test_display_names_effect() {
        let err = OpsError::NotImplemented(Effect::Kaleidoscope);
        assert_eq!(err.to_string(), "effect not implemented: kaleidoscope");
    }
}

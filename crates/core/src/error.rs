//! Error types for the flowfield core.

use thiserror::Error;

/// Errors produced by engine operations.
///
/// Every variant except `Io` is raised before any drawing happens, so a
/// failed construction or step leaves the caller's surface untouched.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Width or height was zero, overflowed, or produced an empty flow grid.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A parameter was present but outside its valid domain.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParam { name: String, reason: String },

    /// Two grids or surfaces had incompatible dimensions.
    #[error("dimension mismatch: ({lhs_w}, {lhs_h}) vs ({rhs_w}, {rhs_h})")]
    DimensionMismatch {
        lhs_w: usize,
        lhs_h: usize,
        rhs_w: usize,
        rhs_h: usize,
    },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// No engine is registered under the given name.
    #[error("unknown engine: {0}")]
    UnknownEngine(String),

    /// Reading or writing an artifact failed.
    #[error("i/o error: {0}")]
    Io(String),
}

impl EngineError {
    /// Shorthand for [`EngineError::InvalidParam`].
    pub fn invalid_param(name: &str, reason: impl Into<String>) -> Self {
        EngineError::InvalidParam {
            name: name.to_owned(),
            reason: reason.into(),
        }
    }
}

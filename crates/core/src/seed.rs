//! Reproducible recipe for a rendered image.
//!
//! A [`Seed`] captures everything needed to repaint an image: engine name,
//! surface dimensions, parameters, and the PRNG seed.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Reproducible recipe for a rendered image.
///
/// Two identical `Seed` values fed to the same engine binary produce a
/// bit-identical sequence of draw calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    pub engine: String,
    pub width: usize,
    pub height: usize,
    pub params: serde_json::Value,
    pub seed: u64,
}

impl Seed {
    /// Creates a new Seed with empty params (`{}`).
    pub fn new(engine: &str, width: usize, height: usize, seed: u64) -> Self {
        Self {
            engine: engine.to_string(),
            width,
            height,
            params: serde_json::Value::Object(serde_json::Map::new()),
            seed,
        }
    }

    /// Replaces the parameter object (builder style).
    pub fn with_params(mut self, params: serde_json::Value) -> Self {
        self.params = params;
        self
    }

    /// Validates that the seed has non-zero dimensions, that
    /// `width * height` does not overflow, and that params is an object.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        self.width
            .checked_mul(self.height)
            .ok_or(EngineError::InvalidDimensions)?;
        if !self.params.is_object() {
            return Err(EngineError::invalid_param(
                "params",
                "expected a JSON object",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_seed_with_empty_params() {
        let s = Seed::new("flow", 512, 256, 42);
        assert_eq!(s.engine, "flow");
        assert_eq!(s.width, 512);
        assert_eq!(s.height, 256);
        assert_eq!(s.seed, 42);
        assert_eq!(s.params, serde_json::json!({}));
    }

    #[test]
    fn json_round_trip_with_custom_params() {
        let s = Seed::new("flow", 300, 200, 99).with_params(serde_json::json!({
            "scale": 4,
            "iterations": 50,
            "noise_seed": 0.5
        }));
        let json = serde_json::to_string_pretty(&s).unwrap();
        let restored: Seed = serde_json::from_str(&json).unwrap();
        assert_eq!(s, restored);
    }

    #[test]
    fn json_contains_expected_keys() {
        let v = serde_json::to_value(Seed::new("flow", 128, 128, 1)).unwrap();
        for key in ["engine", "width", "height", "params", "seed"] {
            assert!(v.get(key).is_some(), "missing key {key}");
        }
    }

    #[test]
    fn validate_succeeds_for_valid_seed() {
        assert!(Seed::new("flow", 512, 512, 42).validate().is_ok());
    }

    #[test]
    fn validate_fails_for_zero_dimensions() {
        assert!(Seed::new("flow", 0, 512, 42).validate().is_err());
        assert!(Seed::new("flow", 512, 0, 42).validate().is_err());
    }

    #[test]
    fn validate_fails_for_overflow() {
        assert!(Seed::new("flow", usize::MAX, 2, 42).validate().is_err());
    }

    #[test]
    fn validate_fails_for_non_object_params() {
        let s = Seed::new("flow", 10, 10, 1).with_params(serde_json::json!([1, 2]));
        assert!(matches!(
            s.validate(),
            Err(EngineError::InvalidParam { .. })
        ));
    }
}

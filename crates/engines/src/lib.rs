#![deny(unsafe_code)]
//! Engine registry: maps engine names to implementations and provides the
//! CPU-side RGBA surface and PNG snapshots.
//!
//! This crate sits between `flowfield-core` (which defines the `Engine` and
//! `Surface` traits) and the individual engine crates (`flowfield-flow`).
//! The CLI depends on this crate so dispatch logic lives in one place.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

use flowfield_core::error::EngineError;
use flowfield_core::{Engine, Seed, Surface};
use serde_json::Value;

pub use pixel::PixelSurface;

/// All available engine names.
const ENGINE_NAMES: &[&str] = &["flow"];

/// Enumeration of all available generative art engines.
///
/// Wraps each engine implementation and delegates `Engine` trait methods.
/// Use [`EngineKind::from_name`] for string-based construction.
pub enum EngineKind {
    /// Noise flow-field particle painter.
    Flow(flowfield_flow::FlowEngine),
}

impl EngineKind {
    /// Constructs an engine by name.
    ///
    /// Returns `EngineError::UnknownEngine` if the name is not recognized.
    pub fn from_name(
        name: &str,
        width: usize,
        height: usize,
        seed: u64,
        params: &Value,
    ) -> Result<Self, EngineError> {
        match name {
            "flow" => Ok(EngineKind::Flow(flowfield_flow::FlowEngine::from_json(
                width, height, seed, params,
            )?)),
            _ => Err(EngineError::UnknownEngine(name.to_string())),
        }
    }

    /// Constructs the engine a [`Seed`] describes, after validating it.
    pub fn from_seed(seed: &Seed) -> Result<Self, EngineError> {
        seed.validate()?;
        Self::from_name(&seed.engine, seed.width, seed.height, seed.seed, &seed.params)
    }

    /// Returns a slice of all recognized engine names.
    pub fn list_engines() -> &'static [&'static str] {
        ENGINE_NAMES
    }
}

impl Engine for EngineKind {
    fn step(&mut self, surface: &mut dyn Surface) -> Result<(), EngineError> {
        match self {
            EngineKind::Flow(e) => e.step(surface),
        }
    }

    fn is_finished(&self) -> bool {
        match self {
            EngineKind::Flow(e) => e.is_finished(),
        }
    }

    fn params(&self) -> Value {
        match self {
            EngineKind::Flow(e) => e.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            EngineKind::Flow(e) => e.param_schema(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowfield_core::{DrawRecorder, Rgb};
    use serde_json::json;

    fn quick() -> Value {
        json!({"iterations": 5, "particle_count": 40})
    }

    #[test]
    fn from_name_flow_succeeds() {
        assert!(EngineKind::from_name("flow", 32, 32, 42, &json!({})).is_ok());
    }

    #[test]
    fn from_name_unknown_returns_error() {
        let result = EngineKind::from_name("nonexistent", 32, 32, 42, &json!({}));
        assert!(matches!(result, Err(EngineError::UnknownEngine(_))));
    }

    #[test]
    fn from_name_propagates_config_errors() {
        let result = EngineKind::from_name("flow", 32, 32, 42, &json!({"scale": -1}));
        assert!(matches!(result, Err(EngineError::InvalidParam { .. })));
    }

    #[test]
    fn list_engines_includes_flow() {
        assert!(EngineKind::list_engines().contains(&"flow"));
    }

    #[test]
    fn from_seed_validates_first() {
        let seed = Seed::new("flow", 0, 10, 1);
        assert!(matches!(
            EngineKind::from_seed(&seed),
            Err(EngineError::InvalidDimensions)
        ));
    }

    #[test]
    fn trait_delegation_render() {
        let mut engine = EngineKind::from_name("flow", 64, 48, 42, &quick()).unwrap();
        let mut rec = DrawRecorder::new(64, 48);
        assert_eq!(engine.render(&mut rec).unwrap(), 5);
        assert!(engine.is_finished());
        assert_eq!(rec.calls().len(), 5 * 40);
    }

    #[test]
    fn trait_delegation_params_and_schema() {
        let engine = EngineKind::from_name("flow", 16, 16, 42, &json!({})).unwrap();
        assert!(engine.params().get("accel").is_some());
        assert!(engine.param_schema().get("accel").is_some());
    }

    #[test]
    fn seed_replay_gives_identical_pixels() {
        let seed = Seed::new("flow", 80, 60, 2024).with_params(quick());
        let mut first = PixelSurface::new(80, 60, Rgb::BLACK).unwrap();
        let mut second = PixelSurface::new(80, 60, Rgb::BLACK).unwrap();
        EngineKind::from_seed(&seed).unwrap().render(&mut first).unwrap();
        EngineKind::from_seed(&seed).unwrap().render(&mut second).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn render_paints_pixels() {
        let mut engine = EngineKind::from_name("flow", 100, 100, 7, &quick()).unwrap();
        let mut surface = PixelSurface::new(100, 100, Rgb::gray(10)).unwrap();
        engine.render(&mut surface).unwrap();
        assert!(surface.painted_pixels() > 0);
    }

    #[test]
    fn zero_iterations_leaves_surface_untouched() {
        let params = json!({"iterations": 0});
        let mut engine = EngineKind::from_name("flow", 50, 50, 7, &params).unwrap();
        let mut surface = PixelSurface::new(50, 50, Rgb::gray(10)).unwrap();
        let before = surface.clone();
        engine.render(&mut surface).unwrap();
        assert_eq!(surface, before);
    }

    #[test]
    fn object_safety() {
        let engine = EngineKind::from_name("flow", 16, 16, 42, &json!({})).unwrap();
        let boxed: Box<dyn Engine> = Box::new(engine);
        assert!(!boxed.is_finished());
    }
}

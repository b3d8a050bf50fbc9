//! The core `Engine` trait that every generative art engine implements.
//!
//! The trait is object-safe so engines can be used as `dyn Engine` for runtime
//! switching between different generative algorithms.

use crate::error::EngineError;
use crate::surface::Surface;
use serde_json::Value;

/// Core trait for generative art engines.
///
/// An engine is a step-based simulation that paints onto an external
/// [`Surface`]. Each `step` layers its strokes on top of everything earlier
/// steps drew, so steps must be applied in order to the same surface.
///
/// This trait is **object-safe**: you can use `Box<dyn Engine>` or `&dyn Engine`
/// for runtime polymorphism.
pub trait Engine {
    /// Advance the simulation by one step, drawing that step's strokes.
    ///
    /// Stepping a finished engine draws nothing and returns `Ok(())`.
    fn step(&mut self, surface: &mut dyn Surface) -> Result<(), EngineError>;

    /// Whether every planned step has run.
    fn is_finished(&self) -> bool;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all available parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;

    /// Runs steps until the engine is finished, returning how many ran.
    fn render(&mut self, surface: &mut dyn Surface) -> Result<usize, EngineError> {
        let mut steps = 0;
        while !self.is_finished() {
            self.step(surface)?;
            steps += 1;
        }
        Ok(steps)
    }
}

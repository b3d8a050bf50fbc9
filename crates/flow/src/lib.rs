#![deny(unsafe_code)]
//! Noise flow-field particle painter.
//!
//! Builds a coarse grid of unit vectors from gradient noise once, scatters a
//! fixed population of particles over the surface, and then for each
//! iteration advances every particle through the field and draws the segment
//! it travelled. Stroke brightness rises along a cubic ease-in from black to
//! white over the run, so early strokes sit dark underneath and the latest
//! strokes are brightest on top.

pub mod particles;

use flowfield_core::easing::smooth2;
use flowfield_core::error::EngineError;
use flowfield_core::field::FlowField;
use flowfield_core::hash::NoiseSeed;
use flowfield_core::params::{param_count, param_f64, param_opt_f64};
use flowfield_core::prng::Xorshift64;
use flowfield_core::{Engine, Rgb, Surface};
use serde_json::{json, Value};

pub use particles::{Dynamics, Particle, ParticleSystem, Segment};

/// Default pixels per field cell.
const DEFAULT_SCALE: f64 = 5.0;
/// Default noise-space distance between neighbouring cells.
const DEFAULT_NOISE_STEP: f64 = 0.01;
/// Default number of passes over all particles.
const DEFAULT_ITERATIONS: usize = 100;
/// Default per-component velocity cap.
const DEFAULT_MAX_SPEED: f64 = 2.0;
/// Default particle population.
const DEFAULT_PARTICLE_COUNT: usize = 10_000;
/// Default fraction of the field vector added to velocity per update.
const DEFAULT_ACCEL: f64 = 0.02;
/// Largest accepted particle population.
pub const MAX_PARTICLE_COUNT: usize = 1_000_000;

/// Parameters for the flow painter.
///
/// Use [`Default`] for the classic settings: 5px cells, 0.01 noise step,
/// 100 iterations of 10 000 particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowParams {
    /// Pixels per field cell.
    pub scale: f64,
    /// Noise-space distance between neighbouring cells.
    pub noise_step: f64,
    /// Number of passes over all particles.
    pub iterations: usize,
    /// Upper bound on each velocity component.
    pub max_speed: f64,
    /// Number of particles.
    pub particle_count: usize,
    /// Fraction of the field vector added to velocity per update.
    pub accel: f64,
    /// Noise seed in `[0, 1)`; drawn from the run PRNG when `None`.
    pub noise_seed: Option<f64>,
}

impl Default for FlowParams {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            noise_step: DEFAULT_NOISE_STEP,
            iterations: DEFAULT_ITERATIONS,
            max_speed: DEFAULT_MAX_SPEED,
            particle_count: DEFAULT_PARTICLE_COUNT,
            accel: DEFAULT_ACCEL,
            noise_seed: None,
        }
    }
}

impl FlowParams {
    /// Extracts parameters from a JSON object, falling back to defaults for
    /// missing keys.
    ///
    /// Counts that are negative or fractional are rejected here; everything
    /// else is checked by [`FlowParams::validate`].
    pub fn from_json(params: &Value) -> Result<Self, EngineError> {
        Ok(Self {
            scale: param_f64(params, "scale", DEFAULT_SCALE),
            noise_step: param_f64(params, "noise_step", DEFAULT_NOISE_STEP),
            iterations: param_count(params, "iterations", DEFAULT_ITERATIONS)?,
            max_speed: param_f64(params, "max_speed", DEFAULT_MAX_SPEED),
            particle_count: param_count(params, "particle_count", DEFAULT_PARTICLE_COUNT)?,
            accel: param_f64(params, "accel", DEFAULT_ACCEL),
            noise_seed: param_opt_f64(params, "noise_seed"),
        })
    }

    /// Checks every parameter's domain.
    ///
    /// Zero iterations or zero particles are valid and simply draw nothing.
    /// More than [`MAX_PARTICLE_COUNT`] particles is rejected.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.particle_count > MAX_PARTICLE_COUNT {
            return Err(EngineError::invalid_param(
                "particle_count",
                format!(
                    "must be at most {MAX_PARTICLE_COUNT}, got {}",
                    self.particle_count
                ),
            ));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(EngineError::invalid_param(
                "scale",
                format!("must be a positive finite number, got {}", self.scale),
            ));
        }
        for (name, value) in [
            ("noise_step", self.noise_step),
            ("max_speed", self.max_speed),
            ("accel", self.accel),
        ] {
            if !value.is_finite() {
                return Err(EngineError::invalid_param(
                    name,
                    format!("must be finite, got {value}"),
                ));
            }
        }
        if let Some(s) = self.noise_seed {
            if !(0.0..1.0).contains(&s) {
                return Err(EngineError::invalid_param(
                    "noise_seed",
                    format!("must lie in [0, 1), got {s}"),
                ));
            }
        }
        Ok(())
    }

    fn dynamics(&self) -> Dynamics {
        Dynamics {
            scale: self.scale,
            accel: self.accel,
            max_speed: self.max_speed,
        }
    }
}

/// Stroke color for `iteration` of a run of `iterations` passes.
///
/// Brightness follows `smooth2(0, 255, iteration / iterations)`, truncated to
/// 8 bits, and never decreases as `iteration` grows.
pub fn frame_color(iteration: usize, iterations: usize) -> Rgb {
    if iterations == 0 {
        return Rgb::BLACK;
    }
    let t = iteration as f64 / iterations as f64;
    Rgb::gray(smooth2(0.0, 255.0, t) as u8)
}

/// Flow-field particle painter.
///
/// Construction validates all parameters, resolves the noise seed, builds
/// the flow field, and scatters the particles; nothing is drawn until
/// [`Engine::step`] is called. Each step is one full pass over the particles.
pub struct FlowEngine {
    width: usize,
    height: usize,
    params: FlowParams,
    noise_seed: NoiseSeed,
    field: FlowField,
    particles: ParticleSystem,
    iteration: usize,
}

impl FlowEngine {
    /// Creates a new flow painter for a `width × height` surface.
    ///
    /// The PRNG seeded with `seed` first supplies the noise seed (only when
    /// `params.noise_seed` is `None`) and then every particle position.
    ///
    /// Returns `EngineError::InvalidDimensions` if width or height is zero
    /// or does not fit in `i32` pixel coordinates, and
    /// `EngineError::InvalidParam` for out-of-domain parameters or a scale
    /// too coarse to leave at least one field cell per axis.
    pub fn new(
        width: usize,
        height: usize,
        seed: u64,
        params: FlowParams,
    ) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
            return Err(EngineError::InvalidDimensions);
        }
        width
            .checked_mul(height)
            .ok_or(EngineError::InvalidDimensions)?;
        params.validate()?;

        let cols = (width as f64 / params.scale).floor() as usize;
        let rows = (height as f64 / params.scale).floor() as usize;
        if cols == 0 || rows == 0 {
            return Err(EngineError::invalid_param(
                "scale",
                format!(
                    "{} leaves no field cells on a {width}x{height} surface",
                    params.scale
                ),
            ));
        }

        let mut rng = Xorshift64::new(seed);
        let noise_seed = match params.noise_seed {
            Some(s) => NoiseSeed::from_unit(s),
            None => NoiseSeed::from_unit(rng.next_f64()),
        };
        let field = FlowField::from_noise(cols, rows, params.noise_step, noise_seed)?;
        let particles =
            ParticleSystem::scatter(params.particle_count, width as f64, height as f64, &mut rng);

        tracing::debug!(
            width,
            height,
            cols,
            rows,
            particles = particles.len(),
            iterations = params.iterations,
            noise_seed = noise_seed.0,
            "flow engine ready"
        );

        Ok(Self {
            width,
            height,
            params,
            noise_seed,
            field,
            particles,
            iteration: 0,
        })
    }

    /// Creates a flow painter from a JSON params object.
    ///
    /// Extracts `scale`, `noise_step`, `iterations`, `max_speed`,
    /// `particle_count`, `accel`, and `noise_seed`, falling back to defaults
    /// for missing keys.
    pub fn from_json(
        width: usize,
        height: usize,
        seed: u64,
        json_params: &Value,
    ) -> Result<Self, EngineError> {
        Self::new(width, height, seed, FlowParams::from_json(json_params)?)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The resolved noise seed.
    pub fn noise_seed(&self) -> NoiseSeed {
        self.noise_seed
    }

    /// Read-only access to the flow field.
    pub fn field(&self) -> &FlowField {
        &self.field
    }

    /// Current particle states.
    pub fn particles(&self) -> &[Particle] {
        self.particles.particles()
    }

    /// Number of completed iterations.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn flow_params(&self) -> &FlowParams {
        &self.params
    }
}

impl Engine for FlowEngine {
    fn step(&mut self, surface: &mut dyn Surface) -> Result<(), EngineError> {
        if self.is_finished() {
            return Ok(());
        }
        if surface.width() != self.width || surface.height() != self.height {
            return Err(EngineError::DimensionMismatch {
                lhs_w: self.width,
                lhs_h: self.height,
                rhs_w: surface.width(),
                rhs_h: surface.height(),
            });
        }

        let color = frame_color(self.iteration, self.params.iterations);
        let dynamics = self.params.dynamics();
        self.particles.advance(&self.field, &dynamics, |segment| {
            let ((x1, y1), (x2, y2)) = segment.pixels();
            surface.draw_line(x1, y1, x2, y2, color);
        });
        self.iteration += 1;

        tracing::trace!(iteration = self.iteration, brightness = color.r, "iteration drawn");
        if self.is_finished() {
            tracing::info!(
                iterations = self.iteration,
                segments = self.iteration * self.particles.len(),
                "flow render finished"
            );
        }
        Ok(())
    }

    fn is_finished(&self) -> bool {
        self.iteration >= self.params.iterations
    }

    fn params(&self) -> Value {
        json!({
            "scale": self.params.scale,
            "noise_step": self.params.noise_step,
            "iterations": self.params.iterations,
            "max_speed": self.params.max_speed,
            "particle_count": self.params.particle_count,
            "accel": self.params.accel,
            "noise_seed": self.noise_seed.to_unit(),
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "scale": {
                "type": "number",
                "default": DEFAULT_SCALE,
                "min": 1.0,
                "max": 50.0,
                "description": "Pixels per flow-field cell"
            },
            "noise_step": {
                "type": "number",
                "default": DEFAULT_NOISE_STEP,
                "min": 0.001,
                "max": 0.5,
                "description": "Noise-space distance between neighbouring cells (smaller = broader swirls)"
            },
            "iterations": {
                "type": "integer",
                "default": DEFAULT_ITERATIONS,
                "min": 0,
                "max": 1000,
                "description": "Passes over all particles; each pass draws one segment per particle"
            },
            "max_speed": {
                "type": "number",
                "default": DEFAULT_MAX_SPEED,
                "min": 0.0,
                "max": 10.0,
                "description": "Upper bound on each velocity component (no lower bound is applied)"
            },
            "particle_count": {
                "type": "integer",
                "default": DEFAULT_PARTICLE_COUNT,
                "min": 0,
                "max": MAX_PARTICLE_COUNT,
                "description": "Number of particles"
            },
            "accel": {
                "type": "number",
                "default": DEFAULT_ACCEL,
                "min": 0.0,
                "max": 1.0,
                "description": "Fraction of the field vector added to velocity per update"
            },
            "noise_seed": {
                "type": "number",
                "default": null,
                "min": 0.0,
                "max": 1.0,
                "description": "Noise seed in [0, 1); drawn from the run seed when omitted"
            }
        })
    }
}

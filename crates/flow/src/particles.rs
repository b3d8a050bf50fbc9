//! Point particles advected through a [`FlowField`].
//!
//! Particles are independent: each one reads the read-only field and updates
//! only its own state, so a whole iteration can be computed in any order as
//! long as the resulting segments are drawn in particle order.

use flowfield_core::field::FlowField;
use flowfield_core::prng::Xorshift64;

/// Constants that drive a particle update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dynamics {
    /// Pixels per field cell.
    pub scale: f64,
    /// Fraction of the field vector added to velocity per update.
    pub accel: f64,
    /// Upper bound applied to each velocity component.
    pub max_speed: f64,
}

/// The motion of one particle during one update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: (f64, f64),
    pub to: (f64, f64),
}

impl Segment {
    /// Endpoints truncated toward zero to integer pixel coordinates.
    ///
    /// Values beyond the `i32` range saturate.
    pub fn pixels(&self) -> ((i32, i32), (i32, i32)) {
        (
            (self.from.0 as i32, self.from.1 as i32),
            (self.to.0 as i32, self.to.1 as i32),
        )
    }
}

/// A point with position and velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: (f64, f64),
    pub velocity: (f64, f64),
}

impl Particle {
    /// A particle at rest at `position`.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: (x, y),
            velocity: (0.0, 0.0),
        }
    }

    /// Advances one update and returns the traversed segment.
    ///
    /// The velocity gains `field_vector * accel` and each component is then
    /// capped at `max_speed` from above only. There is no lower bound and no
    /// friction, so a particle pushed in a negative direction keeps speeding
    /// up; this matches the sketch the engine reproduces. Positions are never
    /// wrapped or reflected.
    pub fn advance(&mut self, field: &FlowField, dynamics: &Dynamics) -> Segment {
        let from = self.position;
        let (fx, fy) = field.sample(from.0, from.1, dynamics.scale);

        let vx = (self.velocity.0 + fx * dynamics.accel).min(dynamics.max_speed);
        let vy = (self.velocity.1 + fy * dynamics.accel).min(dynamics.max_speed);
        self.velocity = (vx, vy);
        self.position = (from.0 + vx, from.1 + vy);

        Segment {
            from,
            to: self.position,
        }
    }
}

/// A fixed-size population of particles.
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    /// Places `count` particles uniformly in `[0, width) × [0, height)`.
    pub fn scatter(count: usize, width: f64, height: f64, rng: &mut Xorshift64) -> Self {
        let particles = (0..count)
            .map(|_| {
                let (x, y) = rng.next_point(width, height);
                Particle::at(x, y)
            })
            .collect();
        Self { particles }
    }

    /// Wraps an existing set of particles.
    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Advances every particle once, passing each segment to `draw` in
    /// particle order.
    #[cfg(not(feature = "parallel"))]
    pub fn advance<F>(&mut self, field: &FlowField, dynamics: &Dynamics, mut draw: F)
    where
        F: FnMut(Segment),
    {
        for particle in &mut self.particles {
            draw(particle.advance(field, dynamics));
        }
    }

    /// Advances every particle once, passing each segment to `draw` in
    /// particle order.
    ///
    /// Updates run on the rayon pool; segments are buffered and handed out
    /// afterwards so draw order matches the serial path.
    #[cfg(feature = "parallel")]
    pub fn advance<F>(&mut self, field: &FlowField, dynamics: &Dynamics, draw: F)
    where
        F: FnMut(Segment),
    {
        use rayon::prelude::*;

        let segments: Vec<Segment> = self
            .particles
            .par_iter_mut()
            .map(|particle| particle.advance(field, dynamics))
            .collect();
        segments.into_iter().for_each(draw);
    }
}

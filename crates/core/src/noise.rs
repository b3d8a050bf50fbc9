//! Two-dimensional gradient noise built on the lattice [`hash`].
//!
//! Every integer lattice point gets a pseudo-random unit gradient whose angle
//! is `2π · hash(point)`. A sample is the smoothstep-weighted blend of the four
//! surrounding corners' dot products with the offset from each corner. The
//! result is continuous everywhere, zero on lattice points, and bounded by
//! `√2` in magnitude.

use std::f64::consts::TAU;

use crate::easing::smooth;
use crate::hash::{hash, NoiseSeed};

/// Dot product of the gradient at lattice point `(cx, cy)` with the offset
/// `(dx, dy)` from that point to the sample position.
#[inline]
fn corner(cx: i32, cy: i32, dx: f64, dy: f64, seed: NoiseSeed) -> f64 {
    let theta = TAU * hash(cx, cy, seed);
    theta.cos() * dx + theta.sin() * dy
}

/// Samples gradient noise at `(x, y)`.
///
/// Coordinates are usually pre-scaled by a small step (e.g. `0.01`) to set
/// the feature size. Lattice coordinates beyond the `i32` range saturate.
pub fn gradient_noise(x: f64, y: f64, seed: NoiseSeed) -> f64 {
    let fx = x.floor();
    let fy = y.floor();
    let x1 = fx as i32;
    let y1 = fy as i32;
    let x2 = x1.wrapping_add(1);
    let y2 = y1.wrapping_add(1);
    let t1 = x - fx;
    let t2 = y - fy;

    let top_left = corner(x1, y1, t1, t2, seed);
    let top_right = corner(x2, y1, t1 - 1.0, t2, seed);
    let bottom_left = corner(x1, y2, t1, t2 - 1.0, seed);
    let bottom_right = corner(x2, y2, t1 - 1.0, t2 - 1.0, seed);

    let top = smooth(top_left, top_right, t1);
    let bottom = smooth(bottom_left, bottom_right, t1);
    smooth(top, bottom, t2)
}

#![deny(unsafe_code)]
//! Core types and traits for the flowfield generative art system.
//!
//! Provides the stateless lattice hash, 2D gradient noise, the `FlowField`
//! grid of unit vectors, easing curves, the `Surface` and `Engine` traits,
//! `Rgb` color, the `Xorshift64` PRNG, `Seed`, and parameter helpers.

pub mod color;
pub mod easing;
pub mod engine;
pub mod error;
pub mod field;
pub mod hash;
pub mod noise;
pub mod params;
pub mod prng;
pub mod seed;
pub mod surface;

pub use color::Rgb;
pub use engine::Engine;
pub use error::EngineError;
pub use field::FlowField;
pub use hash::NoiseSeed;
pub use prng::Xorshift64;
pub use seed::Seed;
pub use surface::{DrawCall, DrawRecorder, Surface};

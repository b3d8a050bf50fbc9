//! Stateless, coordinate-addressable lattice hash.
//!
//! [`hash`] maps an integer lattice point and a run seed to a value in
//! `[0, 1)`. It keeps no state, so the same lattice point always yields the
//! same value within one render and cells can be evaluated in any order or
//! in parallel. Pure 32-bit integer arithmetic makes the output identical on
//! every platform.

use serde::{Deserialize, Serialize};

/// The run seed as consumed by [`hash`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoiseSeed(pub u32);

impl NoiseSeed {
    /// Maps a fraction in `[0, 1)` onto the full 32-bit seed range.
    ///
    /// Values outside the interval saturate to the nearest end; NaN maps to 0.
    pub fn from_unit(fraction: f64) -> Self {
        NoiseSeed((fraction * 4_294_967_296.0).floor() as u32)
    }

    /// The seed as a fraction in `[0, 1)`.
    pub fn to_unit(self) -> f64 {
        self.0 as f64 / 4_294_967_296.0
    }
}

const PRIME_X: u32 = 0x85EB_CA6B;
const PRIME_Y: u32 = 0xC2B2_AE35;
const PRIME_SEED: u32 = 0x27D4_EB2F;
const PRIME_MIX: u32 = 0x1656_67B1;

/// Number of output bits kept before normalizing.
const OUTPUT_BITS: u32 = 24;
const OUTPUT_MASK: u32 = (1 << OUTPUT_BITS) - 1;
const OUTPUT_SCALE: f64 = 1.0 / (1u32 << OUTPUT_BITS) as f64;

/// Hashes lattice point `(ix, iy)` under `seed` to a value in `[0, 1)`.
///
/// Each input is folded in with its own odd multiplier and rotation, then
/// three multiply/xor-shift rounds spread every input bit across the word.
/// The low 24 bits are kept so the result converts to `f64` exactly.
#[inline]
pub fn hash(ix: i32, iy: i32, seed: NoiseSeed) -> f64 {
    let mut h = seed.0.wrapping_mul(PRIME_SEED) ^ 0x9E37_79B9;
    h = h
        .wrapping_add((ix as u32).wrapping_mul(PRIME_X))
        .rotate_left(13);
    h = h.wrapping_mul(PRIME_MIX);
    h = h
        .wrapping_add((iy as u32).wrapping_mul(PRIME_Y))
        .rotate_left(17);
    h = h.wrapping_mul(PRIME_SEED);

    h ^= h >> 16;
    h = h.wrapping_mul(PRIME_X);
    h ^= h >> 13;
    h = h.wrapping_mul(PRIME_Y);
    h ^= h >> 16;

    (h & OUTPUT_MASK) as f64 * OUTPUT_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_unit_maps_half_to_top_bit() {
        assert_eq!(NoiseSeed::from_unit(0.5), NoiseSeed(0x8000_0000));
        assert_eq!(NoiseSeed::from_unit(0.0), NoiseSeed(0));
    }

    #[test]
    fn from_unit_saturates_out_of_range_input() {
        assert_eq!(NoiseSeed::from_unit(-0.25), NoiseSeed(0));
        assert_eq!(NoiseSeed::from_unit(2.0), NoiseSeed(u32::MAX));
        assert_eq!(NoiseSeed::from_unit(f64::NAN), NoiseSeed(0));
    }

    #[test]
    fn to_unit_inverts_from_unit_on_representable_values() {
        let s = NoiseSeed::from_unit(0.75);
        assert!((s.to_unit() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn hash_produces_known_golden_values() {
        // If these break, every saved seed file renders differently.
        for (ix, iy, seed, bits) in [
            (0, 0, 0, 14_094_040.0),
            (1, 2, 3, 396_938.0),
            (-7, 11, 0x8000_0000, 11_535_361.0),
            (i32::MAX, i32::MIN, u32::MAX, 13_147_955.0),
        ] {
            assert_eq!(hash(ix, iy, NoiseSeed(seed)) * 16_777_216.0, bits);
        }
    }

    #[test]
    fn hash_is_deterministic() {
        let seed = NoiseSeed(1234);
        for x in -20..20 {
            for y in -20..20 {
                assert_eq!(
                    hash(x, y, seed).to_bits(),
                    hash(x, y, seed).to_bits(),
                    "hash diverged at ({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn hash_handles_extreme_coordinates() {
        for &(x, y) in &[
            (i32::MIN, i32::MIN),
            (i32::MAX, i32::MAX),
            (i32::MIN, i32::MAX),
            (0, i32::MIN),
        ] {
            let v = hash(x, y, NoiseSeed(u32::MAX));
            assert!((0.0..1.0).contains(&v), "hash({x}, {y}) = {v}");
        }
    }

    #[test]
    fn neighbouring_points_are_uncorrelated() {
        let seed = NoiseSeed(42);
        let mut distinct = std::collections::HashSet::new();
        for x in 0..64 {
            distinct.insert(hash(x, 0, seed).to_bits());
        }
        assert!(
            distinct.len() >= 60,
            "expected nearly all 64 neighbours to differ, got {}",
            distinct.len()
        );
    }

    #[test]
    fn seed_changes_output() {
        let same = (0..100)
            .filter(|&i| hash(i, -i, NoiseSeed(1)).to_bits() == hash(i, -i, NoiseSeed(2)).to_bits())
            .count();
        assert!(same < 5, "{same} of 100 points ignored the seed");
    }

    #[test]
    fn swapping_axes_changes_output() {
        let seed = NoiseSeed(7);
        let swapped = (1..100)
            .filter(|&i| hash(i, i + 1, seed).to_bits() == hash(i + 1, i, seed).to_bits())
            .count();
        assert!(swapped < 5, "{swapped} of 99 points were axis-symmetric");
    }

    #[test]
    fn output_is_roughly_uniform() {
        let seed = NoiseSeed(0xDEAD_BEEF);
        let mut buckets = [0u32; 10];
        for x in 0..100 {
            for y in 0..100 {
                let idx = (hash(x, y, seed) * 10.0) as usize;
                buckets[idx] += 1;
            }
        }
        for (i, &count) in buckets.iter().enumerate() {
            assert!(
                (700..=1300).contains(&count),
                "bucket {i} has {count} values (expected ~1000)"
            );
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn hash_in_unit_interval(x: i32, y: i32, seed: u32) {
                let v = hash(x, y, NoiseSeed(seed));
                prop_assert!((0.0..1.0).contains(&v), "hash({x}, {y}, {seed}) = {v}");
            }

            #[test]
            fn hash_repeatable(x: i32, y: i32, seed: u32) {
                prop_assert_eq!(
                    hash(x, y, NoiseSeed(seed)).to_bits(),
                    hash(x, y, NoiseSeed(seed)).to_bits()
                );
            }

            #[test]
            fn hash_is_multiple_of_output_step(x: i32, y: i32, seed: u32) {
                let scaled = hash(x, y, NoiseSeed(seed)) * (1u32 << OUTPUT_BITS) as f64;
                prop_assert_eq!(scaled, scaled.trunc());
            }
        }
    }
}

//! Interpolation curves shared by the noise and the frame color.

/// Cubic Hermite blend from `a` to `b`: `a + (b - a)(3 - 2t)t²`.
///
/// Zero slope at both ends, which hides lattice seams in gradient noise.
#[inline]
pub fn smooth(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * (3.0 - 2.0 * t) * t * t
}

/// Cubic ease-in from `a` to `b`: `a + (b - a)t³`.
#[inline]
pub fn smooth2(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t * t * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smooth_hits_endpoints() {
        assert_eq!(smooth(2.0, 5.0, 0.0), 2.0);
        assert_eq!(smooth(2.0, 5.0, 1.0), 5.0);
    }

    #[test]
    fn smooth_is_symmetric_about_midpoint() {
        assert!((smooth(0.0, 1.0, 0.5) - 0.5).abs() < 1e-12);
        let lo = smooth(0.0, 1.0, 0.2);
        let hi = smooth(0.0, 1.0, 0.8);
        assert!((lo + hi - 1.0).abs() < 1e-12);
    }

    #[test]
    fn smooth_has_flat_ends() {
        let h = 1e-6;
        let start_slope = (smooth(0.0, 1.0, h) - smooth(0.0, 1.0, 0.0)) / h;
        let end_slope = (smooth(0.0, 1.0, 1.0) - smooth(0.0, 1.0, 1.0 - h)) / h;
        assert!(start_slope.abs() < 1e-4, "slope at 0: {start_slope}");
        assert!(end_slope.abs() < 1e-4, "slope at 1: {end_slope}");
    }

    #[test]
    fn smooth2_matches_cube() {
        assert_eq!(smooth2(0.0, 255.0, 0.0), 0.0);
        assert_eq!(smooth2(0.0, 255.0, 1.0), 255.0);
        assert!((smooth2(0.0, 255.0, 0.5) - 31.875).abs() < 1e-12);
    }

    #[test]
    fn smooth2_is_monotonic_on_unit_interval() {
        let mut prev = smooth2(0.0, 255.0, 0.0);
        for i in 1..=1000 {
            let v = smooth2(0.0, 255.0, i as f64 / 1000.0);
            assert!(v >= prev, "smooth2 decreased at step {i}");
            prev = v;
        }
    }
}

//! Bezel cross-section: a squircle-style convex height curve.
//!
//! `t` runs from 0 at the outer edge to 1 where the bezel meets the flat
//! interior.

/// Step used for the central-difference slope.
pub const SLOPE_EPSILON: f64 = 0.001;

/// Surface height at normalized bezel position `t`, `(1 - (1 - t)^4)^(1/4)`.
///
/// `t` is clamped to `[0, 1]`, so `height(0) == 0` and `height(1) == 1`.
#[inline]
pub fn height(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    (1.0 - inv.powi(4)).powf(0.25)
}

/// Surface slope at `t` by central difference.
#[inline]
pub fn slope(t: f64) -> f64 {
    (height(t + SLOPE_EPSILON) - height(t - SLOPE_EPSILON)) / (2.0 * SLOPE_EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_endpoints() {
        assert_eq!(height(0.0), 0.0);
        assert_eq!(height(1.0), 1.0);
    }

    #[test]
    fn test_height_clamps() {
        assert_eq!(height(-3.0), 0.0);
        assert_eq!(height(2.5), 1.0);
    }

    #[test]
    fn test_height_monotonic() {
        let mut prev = height(0.0);
        for i in 1..=1000 {
            let h = height(i as f64 / 1000.0);
            assert!(h >= prev, "height dropped at step {i}: {h} < {prev}");
            prev = h;
        }
    }

    #[test]
    fn test_slope_steep_at_edge_flat_at_center() {
        assert!(slope(0.0) > 10.0);
        assert!(slope(1.0) >= 0.0);
        assert!(slope(1.0) < 1e-3);
        assert!(slope(0.1) > slope(0.5));
    }
}

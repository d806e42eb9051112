//! Snell's-law displacement table across the bezel.

use std::f64::consts::FRAC_PI_2;

use super::profile;

/// Refractive index of air.
pub const N_AIR: f64 = 1.0;
/// Refractive index of the simulated glass.
pub const N_GLASS: f64 = 1.5;

/// One refraction sample at normalized bezel position `t`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BezelSample {
    /// 0 = outer edge, 1 = flat center.
    pub t: f64,
    /// Signed radial displacement in pixels.
    pub displacement: f64,
}

/// Samples in ascending `t` plus the largest `|displacement|` among them.
#[derive(Clone, Debug, PartialEq)]
pub struct BezelTable {
    pub samples: Vec<BezelSample>,
    pub max_magnitude: f64,
}

impl BezelTable {
    /// Sample nearest below `bezel_t`, clamped into the table.
    #[inline]
    pub fn lookup(&self, bezel_t: f64) -> f64 {
        let last = self.samples.len().saturating_sub(1);
        let idx = (bezel_t * last as f64).floor();
        let idx = if idx.is_nan() { 0 } else { (idx.max(0.0) as usize).min(last) };
        self.samples.get(idx).map_or(0.0, |s| s.displacement)
    }
}

/// Refracted angle for a ray at `incident` radians crossing from `n1` to `n2`.
///
/// When `|(n1 / n2) · sin(incident)| >= 1` there is no transmitted ray; the
/// angle is clamped to `π/2`.
pub fn snell_refract(incident: f64, n1: f64, n2: f64) -> f64 {
    let s = (n1 / n2) * incident.sin();
    if s.abs() >= 1.0 {
        return FRAC_PI_2;
    }
    s.asin()
}

/// Build the displacement table for `sample_count` evenly spaced positions.
///
/// Displacement falls off linearly toward the center, so the final sample
/// (`t == 1`) is always zero. `sample_count` below 2 is treated as 2.
pub fn sample_bezel(sample_count: usize, glass_thickness: f64) -> BezelTable {
    let count = sample_count.max(2);
    let last = (count - 1) as f64;
    let mut samples = Vec::with_capacity(count);
    let mut max_magnitude = 0.0f64;

    for i in 0..count {
        let t = i as f64 / last;
        let s = profile::slope(t);
        let incident = s.abs().atan();
        let refracted = snell_refract(incident, N_AIR, N_GLASS);
        let magnitude = refracted.tan() * glass_thickness * (1.0 - t);
        let direction = if s >= 0.0 { 1.0 } else { -1.0 };

        max_magnitude = max_magnitude.max(magnitude.abs());
        samples.push(BezelSample {
            t,
            displacement: magnitude * direction,
        });
    }

    BezelTable {
        samples,
        max_magnitude,
    }
}

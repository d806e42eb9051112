// ============================================================================
// EFFECT PARAMETERS — the single input to a generation call
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::error::{GlassError, GlassResult};

pub const DEFAULT_WIDTH: u32 = 240;
pub const DEFAULT_HEIGHT: u32 = 80;
pub const DEFAULT_BEZEL_WIDTH: f64 = 32.0;
pub const DEFAULT_GLASS_THICKNESS: f64 = 15.0;
pub const DEFAULT_SPECULAR_OPACITY: f64 = 0.4;
pub const DEFAULT_SAMPLE_COUNT: usize = 127;

/// Largest accepted canvas side, in pixels.  A 16384 × 16384 map is 1 GiB.
pub const MAX_DIMENSION: u32 = 16384;

/// Inputs for one glass map generation.
///
/// Missing fields in a JSON preset fall back to the defaults, so a preset
/// holding only `{"bezel_width": 20}` is valid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectParameters {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Width of the sloped rim, in pixels.
    pub bezel_width: f64,
    /// Simulated glass thickness, in pixels.
    pub glass_thickness: f64,
    /// Highlight strength in `[0, 1]`.
    pub specular_opacity: f64,
    /// Number of refraction samples taken across the bezel (≥ 2).
    pub sample_count: usize,
}

impl Default for EffectParameters {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            bezel_width: DEFAULT_BEZEL_WIDTH,
            glass_thickness: DEFAULT_GLASS_THICKNESS,
            specular_opacity: DEFAULT_SPECULAR_OPACITY,
            sample_count: DEFAULT_SAMPLE_COUNT,
        }
    }
}

impl EffectParameters {
    /// Default parameters on a `width × height` canvas.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Reject parameter sets the generator has no defined output for.
    pub fn validate(&self) -> GlassResult<()> {
        if self.width == 0 {
            return Err(GlassError::invalid("width", "must be at least 1 pixel"));
        }
        if self.height == 0 {
            return Err(GlassError::invalid("height", "must be at least 1 pixel"));
        }
        if self.width > MAX_DIMENSION {
            return Err(GlassError::invalid(
                "width",
                format!("must be at most {} pixels, got {}", MAX_DIMENSION, self.width),
            ));
        }
        if self.height > MAX_DIMENSION {
            return Err(GlassError::invalid(
                "height",
                format!("must be at most {} pixels, got {}", MAX_DIMENSION, self.height),
            ));
        }
        if !self.bezel_width.is_finite() || self.bezel_width < 0.0 {
            return Err(GlassError::invalid(
                "bezel_width",
                format!("must be a finite non-negative number, got {}", self.bezel_width),
            ));
        }
        if !self.glass_thickness.is_finite() || self.glass_thickness < 0.0 {
            return Err(GlassError::invalid(
                "glass_thickness",
                format!(
                    "must be a finite non-negative number, got {}",
                    self.glass_thickness
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.specular_opacity) {
            return Err(GlassError::invalid(
                "specular_opacity",
                format!("must lie in [0, 1], got {}", self.specular_opacity),
            ));
        }
        if self.sample_count < 2 {
            return Err(GlassError::invalid(
                "sample_count",
                format!("must be at least 2, got {}", self.sample_count),
            ));
        }
        Ok(())
    }
}

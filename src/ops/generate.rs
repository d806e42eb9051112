//! One-shot generation of both glass maps from a parameter set.

use std::time::Instant;

use super::displacement::render_displacement;
use super::refraction::sample_bezel;
use super::specular::render_specular;
use super::RasterImage;
use crate::error::GlassResult;
use crate::params::EffectParameters;
use crate::log_info;

/// Everything a compositing filter needs to draw the glass effect.
#[derive(Clone, Debug)]
pub struct GenerationResult {
    /// RG-encoded offset field (128 = no offset).
    pub displacement_image: RasterImage,
    /// Pixel offset represented by a full ±127 channel swing.
    pub max_displacement: f64,
    /// White highlight layer, intensity in alpha.
    pub specular_image: RasterImage,
}

impl GenerationResult {
    /// Integer scale to hand to a displacement filter.
    pub fn displacement_scale(&self) -> f64 {
        self.max_displacement.round()
    }
}

/// Validate `params` and build the displacement and specular maps.
pub fn generate(params: &EffectParameters) -> GlassResult<GenerationResult> {
    params.validate()?;
    let start = Instant::now();

    let table = sample_bezel(params.sample_count, params.glass_thickness);
    let (displacement_image, max_displacement) =
        render_displacement(params.width, params.height, params.bezel_width, &table);
    let specular_image = render_specular(params.width, params.height, params.specular_opacity);

    log_info!(
        "generated {}x{} glass maps (bezel {}, thickness {}, {} samples): max displacement {:.3}px in {:.1}ms",
        params.width,
        params.height,
        params.bezel_width,
        params.glass_thickness,
        params.sample_count,
        max_displacement,
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(GenerationResult {
        displacement_image,
        max_displacement,
        specular_image,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GlassError;
    use crate::ops::displacement::NEUTRAL;

    #[test]
    fn test_generate_dimensions() {
        let result = generate(&EffectParameters::with_size(90, 40)).unwrap();
        assert_eq!(result.displacement_image.dimensions(), (90, 40));
        assert_eq!(result.specular_image.dimensions(), (90, 40));
        assert!(result.max_displacement > 0.0);
    }

    #[test]
    fn test_generate_is_deterministic() {
        let p = EffectParameters::with_size(73, 51);
        let a = generate(&p).unwrap();
        let b = generate(&p).unwrap();
        assert_eq!(a.displacement_image.as_raw(), b.displacement_image.as_raw());
        assert_eq!(a.specular_image.as_raw(), b.specular_image.as_raw());
        assert_eq!(a.max_displacement.to_bits(), b.max_displacement.to_bits());
    }

    #[test]
    fn test_generate_rejects_invalid() {
        let p = EffectParameters::with_size(0, 10);
        assert!(matches!(
            generate(&p),
            Err(GlassError::InvalidParameter { name: "width", .. })
        ));
    }

    #[test]
    fn test_generate_rejects_oversized_canvas() {
        let p = EffectParameters::with_size(100_000, 100_000);
        assert!(matches!(
            generate(&p),
            Err(GlassError::InvalidParameter { name: "width", .. })
        ));
    }

    #[test]
    fn test_zero_thickness_generation() {
        let mut p = EffectParameters::with_size(64, 64);
        p.glass_thickness = 0.0;
        let result = generate(&p).unwrap();
        assert_eq!(result.max_displacement, 0.0);
        assert_eq!(result.displacement_scale(), 0.0);
        assert!(result.displacement_image.pixels().all(|px| px.0 == NEUTRAL));
    }

    #[test]
    fn test_displacement_scale_rounds() {
        let result = generate(&EffectParameters::default()).unwrap();
        assert_eq!(
            result.displacement_scale(),
            result.max_displacement.round()
        );
    }
}

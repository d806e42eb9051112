// ============================================================================
// SPECULAR MAP — white rim highlight carried entirely in alpha
// ============================================================================

use super::{Ellipse, RasterImage, render_pixels};

/// Direction of the key light, in degrees (screen space, y down).
pub const LIGHT_ANGLE_DEG: f64 = -60.0;

/// Inner edge of the highlight band, as a fraction of the ellipse radius.
pub const BAND_INNER: f64 = 0.7;

const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// Highlight alpha for a point at ellipse distance `dist` and polar angle
/// `angle` (radians, from `atan2(ny, nx)`).
///
/// Zero outside the `[0.7, 1]` band. Inside it, a cubed cosine lobe around
/// the light direction, boosted by up to 50% toward the outer rim.
pub fn highlight_alpha(dist: f64, angle: f64, opacity: f64) -> u8 {
    if !(BAND_INNER..=1.0).contains(&dist) {
        return 0;
    }
    let edge_factor = (dist - BAND_INNER) / (1.0 - BAND_INNER);
    let angle_diff = (angle - LIGHT_ANGLE_DEG.to_radians()).abs();
    let intensity = angle_diff.cos().max(0.0).powi(3);
    let boosted = intensity * (1.0 + edge_factor * 0.5);
    (boosted * opacity * 255.0).min(255.0).round() as u8
}

/// Rasterize the specular map for a `width × height` canvas.
pub fn render_specular(width: u32, height: u32, opacity: f64) -> RasterImage {
    let ellipse = Ellipse::for_canvas(width, height);

    render_pixels(width, height, |x, y| {
        let p = ellipse.locate(x, y);
        if p.dist > 1.0 || p.dist < BAND_INNER {
            return TRANSPARENT;
        }
        let alpha = highlight_alpha(p.dist, p.ny.atan2(p.nx), opacity);
        [255, 255, 255, alpha]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light() -> f64 {
        LIGHT_ANGLE_DEG.to_radians()
    }

    #[test]
    fn test_on_axis_outer_rim() {
        assert_eq!(highlight_alpha(1.0, light(), 0.4), 153);
    }

    #[test]
    fn test_on_axis_inner_boundary() {
        assert_eq!(highlight_alpha(0.7, light(), 0.4), 102);
    }

    #[test]
    fn test_outside_band() {
        assert_eq!(highlight_alpha(0.69, light(), 1.0), 0);
        assert_eq!(highlight_alpha(1.0001, light(), 1.0), 0);
    }

    #[test]
    fn test_facing_away_is_dark() {
        // More than 90° from the light: cosine clamps to zero.
        assert_eq!(highlight_alpha(1.0, light() + 2.0, 1.0), 0);
        assert_eq!(highlight_alpha(0.9, std::f64::consts::FRAC_PI_2, 1.0), 0);
    }

    #[test]
    fn test_alpha_saturates() {
        assert_eq!(highlight_alpha(1.0, light(), 1.0), 255);
    }

    #[test]
    fn test_zero_opacity() {
        assert_eq!(highlight_alpha(0.85, light(), 0.0), 0);
    }

    #[test]
    fn test_render_pixels_are_white_or_transparent() {
        let img = render_specular(160, 90, 0.4);
        let e = Ellipse::for_canvas(160, 90);
        for (x, y, px) in img.enumerate_pixels() {
            let dist = e.locate(x, y).dist;
            if !(BAND_INNER..=1.0).contains(&dist) {
                assert_eq!(px.0, TRANSPARENT, "pixel ({x},{y})");
            } else {
                assert_eq!(&px.0[..3], &[255, 255, 255]);
            }
        }
        // Center and corners carry no highlight.
        assert_eq!(img.get_pixel(80, 45).0, TRANSPARENT);
        assert_eq!(img.get_pixel(0, 0).0, TRANSPARENT);
    }

    #[test]
    fn test_off_axis_pixel_on_wide_canvas() {
        // 200×60 canvas, pixel (160, 8): nx = 0.6, ny = -22/30.
        let img = render_specular(200, 60, 0.4);
        let px = img.get_pixel(160, 8).0;
        assert_eq!(px, [255, 255, 255, 138]);

        let nx = 0.6f64;
        let ny = -22.0f64 / 30.0;
        let dist = (nx * nx + ny * ny).sqrt();
        assert_eq!(px[3], highlight_alpha(dist, ny.atan2(nx), 0.4));
        // Pixel-space angle atan2(-22, 60) gives a much dimmer highlight.
        assert_ne!(px[3], highlight_alpha(dist, (-22.0f64).atan2(60.0), 0.4));
    }

    #[test]
    fn test_highlight_sits_upper_right() {
        let img = render_specular(200, 200, 0.4);
        // Rim point along -60° (up and to the right, y down).
        let a = light();
        let x = (100.0 + 95.0 * a.cos()).round() as u32;
        let y = (100.0 + 95.0 * a.sin()).round() as u32;
        let lit = img.get_pixel(x, y).0[3];
        // Mirror point on the lower left.
        let dark = img.get_pixel(200 - x, 200 - y).0[3];
        assert!(lit > 100, "lit alpha {lit}");
        assert_eq!(dark, 0);
    }
}

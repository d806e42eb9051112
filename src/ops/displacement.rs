// ============================================================================
// DISPLACEMENT MAP — refraction offsets encoded as RG around 128
// ============================================================================
//
// R carries the X offset and G the Y offset. 128 is zero, ±127 spans
// ± max_magnitude pixels. B is fixed at 128 and A at 255.
// ============================================================================

use super::refraction::BezelTable;
use super::{Ellipse, RasterImage, render_pixels};

/// Zero-offset pixel, used outside the footprint and over the flat interior.
pub const NEUTRAL: [u8; 4] = [128, 128, 128, 255];

/// Encode a normalized offset (each axis in `[-1, 1]`) into an RGBA pixel.
#[inline]
pub fn encode_offset(norm_x: f64, norm_y: f64) -> [u8; 4] {
    [encode_channel(norm_x), encode_channel(norm_y), 128, 255]
}

#[inline]
fn encode_channel(v: f64) -> u8 {
    (128.0 + v * 127.0).round().clamp(0.0, 255.0) as u8
}

/// Normalized bezel position of a pixel `dist` from the ellipse center.
///
/// Returns 1 (flat interior) for pixels at least `bezel_width` inside the
/// outline, and whenever `bezel_width` is not positive.
#[inline]
pub fn bezel_position(dist: f64, min_radius: f64, bezel_width: f64) -> f64 {
    if bezel_width <= 0.0 {
        return 1.0;
    }
    let from_edge = (1.0 - dist) * min_radius;
    (from_edge / bezel_width).min(1.0)
}

/// Rasterize the displacement map for a `width × height` canvas.
///
/// Returns the image together with `table.max_magnitude`, the scale a
/// compositing filter should apply to the decoded offsets.
pub fn render_displacement(
    width: u32,
    height: u32,
    bezel_width: f64,
    table: &BezelTable,
) -> (RasterImage, f64) {
    let ellipse = Ellipse::for_canvas(width, height);
    let min_radius = ellipse.min_radius();
    let max_mag = table.max_magnitude;

    let image = render_pixels(width, height, |x, y| {
        let p = ellipse.locate(x, y);
        if p.dist > 1.0 {
            return NEUTRAL;
        }

        let bezel_t = bezel_position(p.dist, min_radius, bezel_width);
        if bezel_t >= 1.0 {
            return NEUTRAL;
        }

        let d = table.lookup(bezel_t);

        // Radial displacement has no tangential component, so d·cos / d·sin
        // is the whole rotation into the pixel's frame.
        let angle = (y as f64 - ellipse.cy).atan2(x as f64 - ellipse.cx);
        let rot_dx = d * angle.cos();
        let rot_dy = d * angle.sin();

        if max_mag > 0.0 {
            encode_offset(rot_dx / max_mag, rot_dy / max_mag)
        } else {
            encode_offset(0.0, 0.0)
        }
    });

    (image, max_mag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::refraction::sample_bezel;

    #[test]
    fn test_encode_offset_range() {
        assert_eq!(encode_offset(0.0, 0.0), NEUTRAL);
        assert_eq!(encode_offset(1.0, -1.0), [255, 1, 128, 255]);
        assert_eq!(encode_offset(0.5, -0.5), [192, 65, 128, 255]);
    }

    #[test]
    fn test_bezel_position() {
        // Outline sits at t = 0.
        assert_eq!(bezel_position(1.0, 50.0, 10.0), 0.0);
        // Halfway through a 10px bezel.
        assert!((bezel_position(0.9, 50.0, 10.0) - 0.5).abs() < 1e-12);
        // Deep inside.
        assert_eq!(bezel_position(0.0, 50.0, 10.0), 1.0);
        assert_eq!(bezel_position(0.5, 50.0, 0.0), 1.0);
    }

    #[test]
    fn test_outside_footprint_is_neutral() {
        let table = sample_bezel(127, 15.0);
        let (img, _) = render_displacement(120, 60, 16.0, &table);
        let e = Ellipse::for_canvas(120, 60);
        for (x, y, px) in img.enumerate_pixels() {
            if e.locate(x, y).dist > 1.0 {
                assert_eq!(px.0, NEUTRAL, "pixel ({x},{y})");
            }
        }
        assert_eq!(img.get_pixel(0, 0).0, NEUTRAL);
    }

    #[test]
    fn test_flat_interior_is_neutral() {
        let table = sample_bezel(127, 15.0);
        for bezel in [1.0, 8.0, 20.0, 39.0] {
            let (img, _) = render_displacement(100, 80, bezel, &table);
            // Center pixel: dist 0, bezel_t = 40 / bezel ≥ 1.
            assert_eq!(img.get_pixel(50, 40).0, NEUTRAL, "bezel {bezel}");
        }
    }

    #[test]
    fn test_rim_points_outward() {
        let table = sample_bezel(127, 15.0);
        let (img, scale) = render_displacement(100, 100, 20.0, &table);
        assert_eq!(scale, table.max_magnitude);

        // Just inside the right edge: +X offset, no Y.
        let right = img.get_pixel(99, 50).0;
        assert!(right[0] > 200, "{right:?}");
        assert_eq!(right[1], 128);

        // Just inside the top edge: -Y offset.
        let top = img.get_pixel(50, 1).0;
        assert_eq!(top[0], 128);
        assert!(top[1] < 56, "{top:?}");
    }

    #[test]
    fn test_off_axis_pixel_on_wide_canvas() {
        // 200×60 canvas: the pixel-space angle differs from the normalized one.
        let table = sample_bezel(127, 15.0);
        let (img, scale) = render_displacement(200, 60, 32.0, &table);
        let px = img.get_pixel(165, 48).0;
        assert_eq!(px, [212, 151, 128, 255]);

        // Same value derived by hand: pixel (165, 48) sits at dist ≈ 0.8846,
        // bezel_t ≈ 0.108, sample 13, angle atan2(18, 65).
        let d = table.samples[13].displacement;
        let angle = 18.0f64.atan2(65.0);
        let expected = encode_offset(d * angle.cos() / scale, d * angle.sin() / scale);
        assert_eq!(px, expected);

        // The normalized-frame angle would point elsewhere.
        let skewed = (18.0f64 / 30.0).atan2(65.0 / 100.0);
        assert_ne!(
            px,
            encode_offset(d * skewed.cos() / scale, d * skewed.sin() / scale)
        );
    }

    #[test]
    fn test_zero_thickness_is_neutral_everywhere() {
        let table = sample_bezel(127, 0.0);
        let (img, scale) = render_displacement(64, 48, 32.0, &table);
        assert_eq!(scale, 0.0);
        assert!(img.pixels().all(|p| p.0 == NEUTRAL));
    }
}

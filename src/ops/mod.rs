// ============================================================================
// GLASS MAP OPERATIONS — rayon-parallelized map synthesis
// ============================================================================
//
// Pipeline:
//   profile      → bezel height / slope curve
//   refraction   → per-sample Snell's-law displacement table
//   displacement → RG-encoded offset map over the elliptical footprint
//   specular     → alpha-only rim highlight
//   generate     → validation + the two passes above
// ============================================================================

pub mod displacement;
pub mod generate;
pub mod profile;
pub mod refraction;
pub mod specular;

use image::RgbaImage;
use rayon::prelude::*;

/// Owned RGBA8 raster: flat row-major bytes plus explicit width/height.
pub type RasterImage = RgbaImage;

// ============================================================================
// SHARED HELPERS
// ============================================================================

/// Render a fresh `width × height` image, one row per rayon task.
/// `shade` receives integer pixel coordinates and returns the RGBA value.
pub(crate) fn render_pixels<F>(width: u32, height: u32, shade: F) -> RasterImage
where
    F: Fn(u32, u32) -> [u8; 4] + Sync,
{
    let w = width as usize;
    let h = height as usize;
    if w == 0 || h == 0 {
        return RgbaImage::new(width, height);
    }

    let stride = w * 4;
    let mut dst_raw = vec![0u8; stride * h];

    dst_raw
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row_out)| {
            for x in 0..w {
                let pi = x * 4;
                let px = shade(x as u32, y as u32);
                row_out[pi..pi + 4].copy_from_slice(&px);
            }
        });

    RgbaImage::from_raw(width, height, dst_raw).expect("row buffer sized width * height * 4")
}

/// Elliptical footprint inscribed in the canvas.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Ellipse {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
}

/// A pixel expressed in the ellipse's normalized frame.
#[derive(Clone, Copy, Debug)]
pub(crate) struct EllipsePoint {
    pub nx: f64,
    pub ny: f64,
    /// 0 at the center, 1 on the outline.
    pub dist: f64,
}

impl Ellipse {
    pub fn for_canvas(width: u32, height: u32) -> Self {
        let rx = width as f64 / 2.0;
        let ry = height as f64 / 2.0;
        Self {
            cx: rx,
            cy: ry,
            rx,
            ry,
        }
    }

    #[inline]
    pub fn locate(&self, x: u32, y: u32) -> EllipsePoint {
        let nx = (x as f64 - self.cx) / self.rx;
        let ny = (y as f64 - self.cy) / self.ry;
        EllipsePoint {
            nx,
            ny,
            dist: (nx * nx + ny * ny).sqrt(),
        }
    }

    #[inline]
    pub fn min_radius(&self) -> f64 {
        self.rx.min(self.ry)
    }
}

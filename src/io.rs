use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbaImage};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GlassError, GlassResult};
use crate::ops::generate::GenerationResult;
use crate::params::EffectParameters;

// ============================================================================
// PNG EXPORT
// ============================================================================

/// Encode `image` as an 8-bit RGBA PNG at `path`.
pub fn write_png(image: &RgbaImage, path: &Path) -> GlassResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let encoder = PngEncoder::new(&mut writer);
    encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ColorType::Rgba8,
    )?;
    writer.flush()?;
    Ok(())
}

// ============================================================================
// PRESETS
// ============================================================================

/// Read a JSON parameter preset.  Missing fields take their defaults.
pub fn load_preset(path: &Path) -> GlassResult<EffectParameters> {
    let file = File::open(path)?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| GlassError::Preset {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// MAP MANIFEST — JSON sidecar describing a generated map pair
// ============================================================================

/// Sidecar written next to the two PNGs so a compositor can bind them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MapManifest {
    pub width: u32,
    pub height: u32,
    pub max_displacement: f64,
    /// `max_displacement` rounded; the filter scale for a ±127 channel swing.
    pub scale: f64,
    /// File name of the displacement PNG, relative to the manifest.
    pub displacement_map: String,
    /// File name of the specular PNG, relative to the manifest.
    pub specular_map: String,
    pub parameters: EffectParameters,
}

impl MapManifest {
    pub fn new(
        result: &GenerationResult,
        params: &EffectParameters,
        displacement_map: &str,
        specular_map: &str,
    ) -> Self {
        Self {
            width: result.displacement_image.width(),
            height: result.displacement_image.height(),
            max_displacement: result.max_displacement,
            scale: result.displacement_scale(),
            displacement_map: displacement_map.to_string(),
            specular_map: specular_map.to_string(),
            parameters: *params,
        }
    }
}

/// Paths written by [`write_outputs`].
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub displacement: PathBuf,
    pub specular: PathBuf,
    pub manifest: Option<PathBuf>,
}

/// Write `<stem>_displacement.png`, `<stem>_specular.png` and, when
/// `with_manifest` is set, `<stem>.json` into `dir`.
pub fn write_outputs(
    result: &GenerationResult,
    params: &EffectParameters,
    dir: &Path,
    stem: &str,
    with_manifest: bool,
) -> GlassResult<OutputPaths> {
    let displacement_name = format!("{}_displacement.png", stem);
    let specular_name = format!("{}_specular.png", stem);
    let displacement = dir.join(&displacement_name);
    let specular = dir.join(&specular_name);

    write_png(&result.displacement_image, &displacement)?;
    write_png(&result.specular_image, &specular)?;

    let manifest = if with_manifest {
        let path = dir.join(format!("{}.json", stem));
        let manifest = MapManifest::new(result, params, &displacement_name, &specular_name);
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, &manifest)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Some(path)
    } else {
        None
    };

    Ok(OutputPaths {
        displacement,
        specular,
        manifest,
    })
}

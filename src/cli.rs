// ============================================================================
// glassmap CLI — headless glass map generation
// ============================================================================
//
// Usage examples:
//   glassmap --width 240 --height 80                      (writes glass_*.png + glass.json)
//   glassmap -p pill.json --output-dir maps/
//   glassmap -p "presets/*.json" --glass-thickness 20 --output-dir maps/
//
// Each job writes <stem>_displacement.png, <stem>_specular.png and <stem>.json.
// Flags override the matching preset fields for every job.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use crate::cache::MapCache;
use crate::error::GlassResult;
use crate::io::{load_preset, write_outputs};
use crate::params::EffectParameters;
use crate::{log_err, log_info, log_warn};

// ============================================================================
// CLI argument definition (clap Derive)
// ============================================================================

/// Generate refractive glass displacement and specular maps.
#[derive(Parser, Debug)]
#[command(
    name = "glassmap",
    version,
    about = "Generate glass displacement and specular highlight maps",
    long_about = "Synthesizes the two raster maps of a refractive glass surface:\n\
                  an RG-encoded displacement map (128 = no offset) and an alpha-only\n\
                  specular highlight map, plus a JSON manifest with the displacement\n\
                  scale.\n\n\
                  Example:\n  \
                  glassmap --width 240 --height 80 --output-dir maps/\n  \
                  glassmap -p \"presets/*.json\" --output-dir maps/"
)]
pub struct CliArgs {
    /// JSON preset file(s). Glob patterns accepted (e.g. "presets/*.json").
    /// Each preset is one job, named after the file stem.
    #[arg(short, long, num_args = 1.., value_name = "PRESET")]
    pub preset: Vec<String>,

    /// Canvas width in pixels.
    #[arg(long)]
    pub width: Option<u32>,

    /// Canvas height in pixels.
    #[arg(long)]
    pub height: Option<u32>,

    /// Width of the sloped rim in pixels (default 32).
    #[arg(long)]
    pub bezel_width: Option<f64>,

    /// Simulated glass thickness in pixels (default 15).
    #[arg(long)]
    pub glass_thickness: Option<f64>,

    /// Highlight opacity, 0–1 (default 0.4).
    #[arg(long)]
    pub specular_opacity: Option<f64>,

    /// Refraction samples across the bezel (default 127).
    #[arg(long, value_name = "COUNT")]
    pub samples: Option<usize>,

    /// Directory the maps are written to. Created if missing.
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Output file stem when no preset is given.
    #[arg(short, long, default_value = "glass", value_name = "STEM")]
    pub name: String,

    /// Skip writing the JSON manifest.
    #[arg(long)]
    pub no_manifest: bool,

    /// Log file path (default: platform data directory).
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Print per-job output paths, scale and timing.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Apply explicitly given flags on top of `base`.
    pub fn apply_overrides(&self, base: EffectParameters) -> EffectParameters {
        EffectParameters {
            width: self.width.unwrap_or(base.width),
            height: self.height.unwrap_or(base.height),
            bezel_width: self.bezel_width.unwrap_or(base.bezel_width),
            glass_thickness: self.glass_thickness.unwrap_or(base.glass_thickness),
            specular_opacity: self.specular_opacity.unwrap_or(base.specular_opacity),
            sample_count: self.samples.unwrap_or(base.sample_count),
        }
    }
}

/// One unit of work: output stem plus where its base parameters come from.
#[derive(Debug, Clone, PartialEq)]
struct Job {
    stem: String,
    preset: Option<PathBuf>,
}

// ============================================================================
// Public entry point
// ============================================================================

/// Run all jobs and return an OS exit code.
/// `0` = every job succeeded, `1` = one or more failed.
pub fn run(args: CliArgs) -> ExitCode {
    let jobs = match build_jobs(&args) {
        Some(jobs) => jobs,
        None => {
            eprintln!("error: no preset files matched the given pattern(s).");
            log_err!("no preset files matched {:?}", args.preset);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = std::fs::create_dir_all(&args.output_dir) {
        eprintln!(
            "error: could not create output directory '{}': {}",
            args.output_dir.display(),
            e
        );
        log_err!("create_dir_all {}: {}", args.output_dir.display(), e);
        return ExitCode::FAILURE;
    }

    let total = jobs.len();
    let multi = total > 1;
    let mut cache = MapCache::new();
    let mut any_failure = false;

    for (idx, job) in jobs.iter().enumerate() {
        if multi || args.verbose {
            println!("[{}/{}] {}", idx + 1, total, job.stem);
        }
        let job_start = Instant::now();

        match run_one(job, &args, &mut cache) {
            Ok(scale) => {
                log_info!("job '{}' done, scale {}", job.stem, scale);
                if args.verbose || multi {
                    println!(
                        "  → {}/{}_*.png  scale {} ({:.0}ms)",
                        args.output_dir.display(),
                        job.stem,
                        scale,
                        job_start.elapsed().as_secs_f64() * 1000.0
                    );
                }
            }
            Err(e) => {
                eprintln!("  error: {}: {}", job.stem, e);
                log_err!("job '{}' failed: {}", job.stem, e);
                any_failure = true;
            }
        }
    }

    if any_failure { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

// ============================================================================
// Per-job pipeline
// ============================================================================

fn run_one(job: &Job, args: &CliArgs, cache: &mut MapCache) -> GlassResult<f64> {
    // -- Step 1: Resolve parameters -------------------------------------
    let base = match &job.preset {
        Some(path) => load_preset(path)?,
        None => EffectParameters::default(),
    };
    let params = args.apply_overrides(base);

    // -- Step 2: Generate (identical parameter sets share one result) ----
    let hits_before = cache.get(&params).is_some();
    let result = cache.get_or_generate(&params)?;
    if hits_before {
        log_info!("job '{}' reused cached maps", job.stem);
    }

    // -- Step 3: Write ---------------------------------------------------
    let paths = write_outputs(
        &result,
        &params,
        &args.output_dir,
        &job.stem,
        !args.no_manifest,
    )?;
    if args.verbose {
        println!("  displacement: {}", paths.displacement.display());
        println!("  specular:     {}", paths.specular.display());
        if let Some(m) = &paths.manifest {
            println!("  manifest:     {}", m.display());
        }
    }

    Ok(result.displacement_scale())
}

// ============================================================================
// Helpers
// ============================================================================

/// Expand presets into jobs. With no `--preset`, a single flag-only job named
/// `--name`.  Returns `None` when patterns were given but nothing matched.
fn build_jobs(args: &CliArgs) -> Option<Vec<Job>> {
    if args.preset.is_empty() {
        return Some(vec![Job {
            stem: args.name.clone(),
            preset: None,
        }]);
    }

    let presets = resolve_inputs(&args.preset);
    if presets.is_empty() {
        return None;
    }
    Some(
        presets
            .into_iter()
            .map(|path| Job {
                stem: preset_stem(&path),
                preset: Some(path),
            })
            .collect(),
    )
}

fn preset_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "glass".to_string())
}

/// Expand glob patterns and literal paths into a deduplicated, ordered list.
fn resolve_inputs(patterns: &[String]) -> Vec<PathBuf> {
    let mut result: Vec<PathBuf> = Vec::new();

    for pattern in patterns {
        let as_path = Path::new(pattern);

        if as_path.exists() {
            if !result.iter().any(|p| p.as_path() == as_path) {
                result.push(as_path.to_path_buf());
            }
            continue;
        }

        match glob::glob(pattern) {
            Ok(entries) => {
                let mut matched = false;
                for entry in entries.flatten() {
                    if !result.contains(&entry) {
                        result.push(entry);
                    }
                    matched = true;
                }
                if !matched {
                    eprintln!("warning: pattern '{}' matched no files.", pattern);
                    log_warn!("pattern '{}' matched no files", pattern);
                }
            }
            Err(e) => {
                eprintln!("warning: invalid glob '{}': {}", pattern, e);
                log_warn!("invalid glob '{}': {}", pattern, e);
            }
        }
    }

    result
}

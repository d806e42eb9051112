//! Procedural refractive-glass map generator.
//!
//! [`generate`] turns an [`EffectParameters`] into a displacement map, the
//! scale that map encodes, and a specular highlight map, ready for a
//! displacement-and-blend compositing filter.

pub mod logger;

pub mod cache;
pub mod cli;
pub mod error;
pub mod io;
pub mod ops;
pub mod params;

pub use cache::MapCache;
pub use error::{GlassError, GlassResult};
pub use ops::RasterImage;
pub use ops::generate::{GenerationResult, generate};
pub use ops::refraction::{BezelSample, BezelTable};
pub use params::EffectParameters;

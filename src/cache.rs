// ============================================================================
// MAP CACHE — reuse generated maps while parameters stay the same
// ============================================================================

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use crate::error::GlassResult;
use crate::ops::generate::{GenerationResult, generate};
use crate::params::EffectParameters;

/// Hashable identity of an [`EffectParameters`]; floats compare by bit pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct CacheKey {
    width: u32,
    height: u32,
    bezel_width: u64,
    glass_thickness: u64,
    specular_opacity: u64,
    sample_count: usize,
}

impl From<&EffectParameters> for CacheKey {
    fn from(p: &EffectParameters) -> Self {
        Self {
            width: p.width,
            height: p.height,
            bezel_width: p.bezel_width.to_bits(),
            glass_thickness: p.glass_thickness.to_bits(),
            specular_opacity: p.specular_opacity.to_bits(),
            sample_count: p.sample_count,
        }
    }
}

/// A bounded cache of generated map pairs keyed by their parameters.
///
/// Callers re-render only when the parameters change.  Once `capacity`
/// entries are held, the oldest insertion is dropped first.
pub struct MapCache {
    entries: HashMap<CacheKey, Arc<GenerationResult>>,
    order: VecDeque<CacheKey>,
    capacity: usize,
}

impl MapCache {
    pub fn new() -> Self {
        Self::with_capacity(8)
    }

    /// A cache holding at most `capacity` results (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Return the cached maps for `params`, generating them on a miss.
    /// Invalid parameters are rejected and nothing is cached.
    pub fn get_or_generate(&mut self, params: &EffectParameters) -> GlassResult<Arc<GenerationResult>> {
        let key = CacheKey::from(params);
        if let Some(hit) = self.entries.get(&key) {
            return Ok(Arc::clone(hit));
        }

        let result = Arc::new(generate(params)?);
        while self.entries.len() >= self.capacity {
            match self.order.pop_front() {
                Some(old) => {
                    self.entries.remove(&old);
                }
                None => break,
            }
        }
        self.entries.insert(key, Arc::clone(&result));
        self.order.push_back(key);
        Ok(result)
    }

    /// Cached maps for `params`, without generating.
    pub fn get(&self, params: &EffectParameters) -> Option<Arc<GenerationResult>> {
        self.entries.get(&CacheKey::from(params)).cloned()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for MapCache {
    fn default() -> Self {
        Self::new()
    }
}

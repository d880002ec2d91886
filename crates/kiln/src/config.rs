//! Kiln configuration

use std::num::NonZeroUsize;

use kiln_core::{CachePolicy, KilnError, Result};
use serde::{Deserialize, Serialize};

/// Configuration read once at [`Kiln::init`](crate::Kiln::init)
///
/// ```toml
/// cache_enabled = true
/// texture_cache = { lru = 256 }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KilnConfig {
    /// Process-wide cache switch; when off every lookup misses and nothing
    /// is stored
    pub cache_enabled: bool,
    pub paint_cache: CachePolicy,
    pub shader_cache: CachePolicy,
    pub paragraph_cache: CachePolicy,
    pub texture_cache: CachePolicy,
}

impl Default for KilnConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            paint_cache: CachePolicy::Unbounded,
            shader_cache: CachePolicy::Unbounded,
            paragraph_cache: CachePolicy::Unbounded,
            texture_cache: CachePolicy::Unbounded,
        }
    }
}

impl KilnConfig {
    /// Parse a configuration from TOML text; missing keys keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| KilnError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| KilnError::Config(e.to_string()))
    }

    pub fn with_cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    /// Bound every cache to `capacity` entries
    pub fn with_lru_capacity(mut self, capacity: NonZeroUsize) -> Self {
        let policy = CachePolicy::Lru(capacity);
        self.paint_cache = policy;
        self.shader_cache = policy;
        self.paragraph_cache = policy;
        self.texture_cache = policy;
        self
    }

    pub fn with_texture_cache(mut self, policy: CachePolicy) -> Self {
        self.texture_cache = policy;
        self
    }
}

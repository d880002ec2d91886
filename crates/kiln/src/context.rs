//! The Kiln context
//!
//! Owns the rasterization engine, the configuration and the four artifact
//! caches. Every builder and producer goes through a `Kiln`, so nothing can
//! consult the engine before it exists.

use kiln_core::{Engine, RenderCache};

use crate::config::KilnConfig;
use crate::texture::Texture;

/// An initialized engine plus its render caches
pub struct Kiln<E: Engine> {
    pub(crate) engine: E,
    config: KilnConfig,
    pub(crate) paints: RenderCache<E::Paint>,
    pub(crate) shaders: RenderCache<E::Shader>,
    pub(crate) paragraphs: RenderCache<E::Paragraph>,
    pub(crate) textures: RenderCache<Texture<E::HostCanvas>>,
}

impl<E: Engine> Kiln<E> {
    /// Take ownership of an engine and build empty caches
    pub fn init(engine: E, config: KilnConfig) -> Self {
        let enabled = config.cache_enabled;
        tracing::info!(
            backend = engine.name(),
            cache_enabled = enabled,
            "kiln initialized"
        );
        Self {
            paints: RenderCache::new("paint", config.paint_cache, enabled),
            shaders: RenderCache::new("shader", config.shader_cache, enabled),
            paragraphs: RenderCache::new("paragraph", config.paragraph_cache, enabled),
            textures: RenderCache::new("texture", config.texture_cache, enabled),
            engine,
            config,
        }
    }

    /// Drop every cached artifact and hand the engine back
    pub fn teardown(mut self) -> E {
        self.clear_caches();
        tracing::info!(backend = self.engine.name(), "kiln torn down");
        self.engine
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn config(&self) -> &KilnConfig {
        &self.config
    }

    pub fn cache_enabled(&self) -> bool {
        self.config.cache_enabled
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Cache management
    // ─────────────────────────────────────────────────────────────────────────

    pub fn clear_paint_cache(&mut self) {
        self.paints.clear();
    }

    pub fn clear_shader_cache(&mut self) {
        self.shaders.clear();
    }

    pub fn clear_paragraph_cache(&mut self) {
        self.paragraphs.clear();
    }

    pub fn clear_texture_cache(&mut self) {
        self.textures.clear();
    }

    /// Clear all four caches
    pub fn clear_caches(&mut self) {
        self.clear_paint_cache();
        self.clear_shader_cache();
        self.clear_paragraph_cache();
        self.clear_texture_cache();
    }

    pub fn paint_cache(&self) -> &RenderCache<E::Paint> {
        &self.paints
    }

    pub fn shader_cache(&self) -> &RenderCache<E::Shader> {
        &self.shaders
    }

    pub fn paragraph_cache(&self) -> &RenderCache<E::Paragraph> {
        &self.paragraphs
    }

    pub fn texture_cache(&self) -> &RenderCache<Texture<E::HostCanvas>> {
        &self.textures
    }
}

impl<E: Engine> std::fmt::Debug for Kiln<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kiln")
            .field("backend", &self.engine.name())
            .field("config", &self.config)
            .field("paints", &self.paints)
            .field("shaders", &self.shaders)
            .field("paragraphs", &self.paragraphs)
            .field("textures", &self.textures)
            .finish()
    }
}

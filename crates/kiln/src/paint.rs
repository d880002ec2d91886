//! Paint and shader builders
//!
//! Translate declarative style records into engine handles, cached by the
//! fingerprint of the record. A paint that carries a shader is keyed on
//! the shader's fingerprint too.

use std::sync::Arc;

use kiln_core::{fingerprint, Engine, Fingerprint, LinearGradientDesc, PaintOptions, Result};
use serde::Serialize;

use crate::context::Kiln;

/// A cached shader together with the fingerprint it is stored under
pub struct ShaderHandle<S> {
    fingerprint: Fingerprint,
    shader: Arc<S>,
}

impl<S> ShaderHandle<S> {
    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    pub fn shader(&self) -> &Arc<S> {
        &self.shader
    }

    /// Whether both handles refer to the same cached shader
    pub fn ptr_eq(&self, other: &ShaderHandle<S>) -> bool {
        Arc::ptr_eq(&self.shader, &other.shader)
    }
}

impl<S> Clone for ShaderHandle<S> {
    fn clone(&self) -> Self {
        Self {
            fingerprint: self.fingerprint.clone(),
            shader: Arc::clone(&self.shader),
        }
    }
}

impl<S> std::fmt::Debug for ShaderHandle<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderHandle")
            .field("fingerprint", &self.fingerprint)
            .finish()
    }
}

#[derive(Serialize)]
struct PaintKey<'a> {
    options: &'a PaintOptions,
    shader: Option<&'a Fingerprint>,
}

impl<E: Engine> Kiln<E> {
    /// Get or create the paint described by `options`
    pub fn paint(&mut self, options: &PaintOptions) -> Result<Arc<E::Paint>> {
        let key = fingerprint(&PaintKey {
            options,
            shader: None,
        })?;
        let engine = &self.engine;
        self.paints
            .get_or_try_insert_with(&key, || engine.create_paint(options, None))
    }

    /// Get or create a paint that draws with `shader`
    pub fn paint_with_shader(
        &mut self,
        options: &PaintOptions,
        shader: &ShaderHandle<E::Shader>,
    ) -> Result<Arc<E::Paint>> {
        let key = fingerprint(&PaintKey {
            options,
            shader: Some(shader.fingerprint()),
        })?;
        let engine = &self.engine;
        self.paints.get_or_try_insert_with(&key, || {
            engine.create_paint(options, Some(shader.shader().as_ref()))
        })
    }

    /// Get or create a linear gradient shader
    pub fn linear_shader(&mut self, desc: &LinearGradientDesc) -> Result<ShaderHandle<E::Shader>> {
        let key = fingerprint(desc)?;
        let engine = &self.engine;
        let shader = self
            .shaders
            .get_or_try_insert_with(&key, || engine.create_linear_gradient(desc))?;
        Ok(ShaderHandle {
            fingerprint: key,
            shader,
        })
    }
}

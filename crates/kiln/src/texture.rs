//! Texture production
//!
//! A [`TextureProducer`] describes something that can draw itself into a
//! surface of a known size. [`Kiln::produce_texture`] turns a producer into
//! a [`Texture`], rasterizing at most once per distinct configuration while
//! the texture cache is enabled.

use std::sync::Arc;

use kiln_core::{fingerprint, Canvas, Color, Engine, Fingerprint, KilnError, Result, Surface};
use serde::Serialize;

use crate::context::Kiln;

// ─────────────────────────────────────────────────────────────────────────────
// Producer contract
// ─────────────────────────────────────────────────────────────────────────────

/// Something that can be rasterized into a texture
pub trait TextureProducer<E: Engine> {
    /// Runs before every texture request, cached or not
    ///
    /// Producers whose size depends on mutable state recompute it here.
    fn prepare(&mut self, _engine: &E) -> Result<()> {
        Ok(())
    }

    /// Logical `(width, height)`, `None` until known
    fn size(&self) -> Option<(f64, f64)>;

    /// Content fingerprint; `None` disables caching for this producer
    fn fingerprint(&self) -> Option<Fingerprint>;

    /// Draw into a canvas already scaled by the multisample factor
    fn render(&self, canvas: &mut dyn Canvas<E>);
}

/// Fingerprint of a producer's content
///
/// An encoding failure is logged and yields `None`, leaving that producer
/// uncached.
pub(crate) fn content_fingerprint<T: Serialize + ?Sized>(
    value: &T,
    producer: &'static str,
) -> Option<Fingerprint> {
    match fingerprint(value) {
        Ok(key) => Some(key),
        Err(err) => {
            tracing::warn!(
                producer,
                error = %err,
                "content not fingerprintable, texture will not be cached"
            );
            None
        }
    }
}

type RenderFn<E> = Box<dyn Fn(&mut dyn Canvas<E>)>;
type FingerprintFn = Box<dyn Fn() -> Option<Fingerprint>>;
type BeforeRenderFn<E> = Box<dyn FnMut(&E) -> Result<()>>;

/// A producer assembled from closures
pub struct CallbackProducer<E: Engine> {
    size: Option<(f64, f64)>,
    render: RenderFn<E>,
    fingerprint: Option<FingerprintFn>,
    before_render: Option<BeforeRenderFn<E>>,
}

impl<E: Engine> CallbackProducer<E> {
    pub fn new(render: impl Fn(&mut dyn Canvas<E>) + 'static) -> Self {
        Self {
            size: None,
            render: Box::new(render),
            fingerprint: None,
            before_render: None,
        }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = Some((width, height));
        self
    }

    pub fn with_fingerprint(mut self, fingerprint: impl Fn() -> Option<Fingerprint> + 'static) -> Self {
        self.fingerprint = Some(Box::new(fingerprint));
        self
    }

    pub fn with_before_render(mut self, hook: impl FnMut(&E) -> Result<()> + 'static) -> Self {
        self.before_render = Some(Box::new(hook));
        self
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.size = Some((width, height));
    }
}

impl<E: Engine> TextureProducer<E> for CallbackProducer<E> {
    fn prepare(&mut self, engine: &E) -> Result<()> {
        match &mut self.before_render {
            Some(hook) => hook(engine),
            None => Ok(()),
        }
    }

    fn size(&self) -> Option<(f64, f64)> {
        self.size
    }

    fn fingerprint(&self) -> Option<Fingerprint> {
        self.fingerprint.as_ref().and_then(|f| f())
    }

    fn render(&self, canvas: &mut dyn Canvas<E>) {
        (self.render)(canvas)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Requests and artifacts
// ─────────────────────────────────────────────────────────────────────────────

/// Where a texture is rasterized
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    /// Pixel memory allocated and released by Kiln
    #[default]
    Offscreen,
    /// A caller-provided canvas, resized and drawn into
    HostCanvasBacked,
}

/// Options for a single texture request
#[derive(Clone, Debug)]
pub struct ProduceOptions<C> {
    /// Supersampling factor, `>= 1`
    pub multisample: f64,
    /// Resolution recorded on the texture
    pub resolution: f64,
    /// Clear color; fully transparent when `None`
    pub background: Option<Color>,
    pub surface: SurfaceKind,
    pub host_canvas: Option<C>,
}

impl<C> Default for ProduceOptions<C> {
    fn default() -> Self {
        Self {
            multisample: 1.0,
            resolution: 1.0,
            background: None,
            surface: SurfaceKind::Offscreen,
            host_canvas: None,
        }
    }
}

impl<C> ProduceOptions<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_multisample(mut self, multisample: f64) -> Self {
        self.multisample = multisample;
        self
    }

    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn with_surface(mut self, surface: SurfaceKind) -> Self {
        self.surface = surface;
        self
    }

    /// Draw into `canvas` instead of offscreen memory
    pub fn with_host_canvas(mut self, canvas: C) -> Self {
        self.surface = SurfaceKind::HostCanvasBacked;
        self.host_canvas = Some(canvas);
        self
    }

    fn validate(&self) -> Result<()> {
        if !self.multisample.is_finite() || self.multisample < 1.0 {
            return Err(KilnError::UnsupportedConfiguration(format!(
                "multisample must be a finite value >= 1, got {}",
                self.multisample
            )));
        }
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(KilnError::UnsupportedConfiguration(format!(
                "resolution must be a finite value > 0, got {}",
                self.resolution
            )));
        }
        Ok(())
    }
}

/// Pixels of a produced texture
#[derive(Debug)]
pub enum TextureData<C> {
    /// Premultiplied RGBA8, row-major, `width * height * 4` bytes
    Pixels(Vec<u8>),
    /// The host canvas that was drawn into
    HostCanvas(C),
}

/// A rasterized artifact
#[derive(Debug)]
pub struct Texture<C> {
    /// Surface width in pixels, multisampling included
    pub width: u32,
    /// Surface height in pixels, multisampling included
    pub height: u32,
    pub resolution: f64,
    pub multisample: f64,
    pub data: TextureData<C>,
}

impl<C> Texture<C> {
    pub fn pixels(&self) -> Option<&[u8]> {
        match &self.data {
            TextureData::Pixels(pixels) => Some(pixels),
            TextureData::HostCanvas(_) => None,
        }
    }

    pub fn host_canvas(&self) -> Option<&C> {
        match &self.data {
            TextureData::Pixels(_) => None,
            TextureData::HostCanvas(canvas) => Some(canvas),
        }
    }

    /// Size in logical units, undoing the multisample factor
    pub fn logical_size(&self) -> (f64, f64) {
        (
            self.width as f64 / self.multisample,
            self.height as f64 / self.multisample,
        )
    }
}

#[derive(Serialize)]
struct TextureKey<'a> {
    producer: &'a Fingerprint,
    multisample: f64,
    resolution: f64,
    background: Option<Color>,
    surface: SurfaceKind,
}

// ─────────────────────────────────────────────────────────────────────────────
// Production
// ─────────────────────────────────────────────────────────────────────────────

impl<E: Engine> Kiln<E> {
    /// Produce the texture for `producer`, reusing a cached one when possible
    ///
    /// The producer is prepared first, then the request options and its
    /// size are validated. On a
    /// cache hit nothing is allocated or drawn. On a miss a surface of
    /// `ceil(width * multisample) x ceil(height * multisample)` pixels is
    /// allocated, cleared, scaled by the multisample factor and handed to
    /// the producer. Offscreen surfaces are released before returning on
    /// every path.
    pub fn produce_texture<P>(
        &mut self,
        producer: &mut P,
        options: &ProduceOptions<E::HostCanvas>,
    ) -> Result<Arc<Texture<E::HostCanvas>>>
    where
        P: TextureProducer<E> + ?Sized,
    {
        producer.prepare(&self.engine)?;
        options.validate()?;

        let (width, height) = producer
            .size()
            .ok_or_else(|| KilnError::NotReady("producer size is not set".into()))?;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(KilnError::NotReady(format!(
                "producer size {}x{} is not drawable",
                width, height
            )));
        }

        let host = match options.surface {
            SurfaceKind::Offscreen => None,
            SurfaceKind::HostCanvasBacked => {
                Some(options.host_canvas.as_ref().ok_or(KilnError::CanvasRequired)?)
            }
        };

        let key = match producer.fingerprint() {
            Some(producer_key) if self.textures.is_enabled() => Some(fingerprint(&TextureKey {
                producer: &producer_key,
                multisample: options.multisample,
                resolution: options.resolution,
                background: options.background,
                surface: options.surface,
            })?),
            _ => None,
        };

        if let Some(key) = &key {
            if let Some(texture) = self.textures.get(key) {
                return Ok(texture);
            }
        }

        let texture = Arc::new(self.rasterize(&*producer, width, height, options, host)?);
        if let Some(key) = key {
            self.textures.put(key, Arc::clone(&texture));
        }
        Ok(texture)
    }

    fn rasterize<P>(
        &self,
        producer: &P,
        width: f64,
        height: f64,
        options: &ProduceOptions<E::HostCanvas>,
        host: Option<&E::HostCanvas>,
    ) -> Result<Texture<E::HostCanvas>>
    where
        P: TextureProducer<E> + ?Sized,
    {
        let multisample = options.multisample;
        let pixel_width = (width * multisample).ceil() as u32;
        let pixel_height = (height * multisample).ceil() as u32;
        tracing::debug!(
            pixel_width,
            pixel_height,
            multisample,
            host_backed = host.is_some(),
            "rasterizing texture"
        );

        let surface = match host {
            None => self.engine.create_raster_surface(pixel_width, pixel_height),
            Some(canvas) => self
                .engine
                .create_host_surface(canvas, pixel_width, pixel_height),
        };
        let mut surface = surface.map_err(|e| {
            tracing::error!(pixel_width, pixel_height, error = %e, "surface creation failed");
            e
        })?;

        let canvas = surface.canvas();
        canvas.clear(options.background.unwrap_or(Color::TRANSPARENT));
        canvas.scale(multisample, multisample);
        producer.render(canvas);
        surface.flush();

        let data = match host {
            None => TextureData::Pixels(surface.read_pixels()?),
            Some(canvas) => TextureData::HostCanvas(canvas.clone()),
        };

        Ok(Texture {
            width: pixel_width,
            height: pixel_height,
            resolution: options.resolution,
            multisample,
            data,
        })
    }
}

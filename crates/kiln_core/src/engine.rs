//! Rasterization engine capability set
//!
//! Kiln never rasterizes anything itself. Everything that touches pixels,
//! glyphs or curve geometry goes through these traits, implemented by a
//! concrete backend (see the `kiln_skia` crate) or by a test double.

use crate::error::Result;
use crate::path::PathData;
use crate::style::{FillRule, LinearGradientDesc, PaintOptions};
use crate::text::{ParagraphMetrics, ParagraphStyle, TextRun};
use crate::types::{Color, Rect};

/// A rasterization engine
///
/// Handles are opaque to Kiln; it only stores them in caches and passes
/// them back to the engine.
pub trait Engine {
    type Paint;
    type Shader;
    type Path;
    type Paragraph;
    type FontCollection;
    /// A caller-owned drawing target that surfaces can be backed by
    type HostCanvas: Clone;
    type Surface: Surface<Self>;

    /// Human-readable backend name for diagnostics
    fn name(&self) -> &'static str;

    /// Translate a paint description, attaching `shader` when given
    fn create_paint(&self, options: &PaintOptions, shader: Option<&Self::Shader>)
        -> Result<Self::Paint>;

    fn create_linear_gradient(&self, desc: &LinearGradientDesc) -> Result<Self::Shader>;

    fn create_path(&self, data: &PathData, fill_rule: FillRule) -> Result<Self::Path>;

    /// Curve-aware bounds of the unstroked path, `None` for an empty path
    fn tight_bounds(&self, path: &Self::Path) -> Option<Rect>;

    /// Allocate an offscreen surface
    ///
    /// The surface exclusively owns its pixel memory and releases it when
    /// dropped.
    fn create_raster_surface(&self, width: u32, height: u32) -> Result<Self::Surface>;

    /// Resize `canvas` to `width x height` and draw into it
    fn create_host_surface(
        &self,
        canvas: &Self::HostCanvas,
        width: u32,
        height: u32,
    ) -> Result<Self::Surface>;

    /// Load font files into a collection paragraphs can draw from
    fn load_fonts(&self, fonts: &[Vec<u8>]) -> Result<Self::FontCollection>;

    fn build_paragraph(
        &self,
        fonts: &Self::FontCollection,
        style: &ParagraphStyle,
        runs: &[TextRun],
    ) -> Result<Self::Paragraph>;

    /// Break the paragraph into lines no wider than `width`
    fn layout_paragraph(&self, paragraph: &mut Self::Paragraph, width: f64);

    fn paragraph_metrics(&self, paragraph: &Self::Paragraph) -> ParagraphMetrics;
}

/// A drawing target with its own backing store
pub trait Surface<E: Engine + ?Sized> {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn canvas(&mut self) -> &mut dyn Canvas<E>;

    /// Complete any pending drawing
    fn flush(&mut self) {}

    /// Copy out the pixels as premultiplied RGBA8, row-major
    fn read_pixels(&mut self) -> Result<Vec<u8>>;
}

/// Drawing operations available inside a producer's render step
pub trait Canvas<E: Engine + ?Sized> {
    /// Fill the whole target with `color`, ignoring the transform
    fn clear(&mut self, color: Color);

    fn scale(&mut self, sx: f64, sy: f64);

    fn translate(&mut self, dx: f64, dy: f64);

    fn draw_rect(&mut self, rect: Rect, paint: &E::Paint);

    fn draw_path(&mut self, path: &E::Path, paint: &E::Paint);

    fn draw_paragraph(&mut self, paragraph: &E::Paragraph, x: f64, y: f64);
}

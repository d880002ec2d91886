//! The tiny-skia engine

use std::sync::Arc;

use kiln_core::{
    Engine, FillRule, KilnError, LinearGradientDesc, PaintOptions, ParagraphMetrics,
    ParagraphStyle, PathCommand, PathData, Rect, Result, TextRun,
};
use tiny_skia::PathBuilder;

use crate::convert::{rect_from_skia, ToSkia};
use crate::paint::{SkiaPaint, SkiaShader};
use crate::surface::{HostCanvas, SkiaSurface};
use crate::text::{SkiaFonts, SkiaParagraph, SystemFonts};

/// A finished path and the rule it fills with
#[derive(Clone, Debug)]
pub struct SkiaPath {
    pub(crate) path: tiny_skia::Path,
    pub(crate) fill_rule: tiny_skia::FillRule,
}

impl SkiaPath {
    pub fn path(&self) -> &tiny_skia::Path {
        &self.path
    }
}

/// CPU rasterization engine backed by tiny-skia
///
/// Clones share one view of the host's fonts.
#[derive(Clone, Debug, Default)]
pub struct SkiaEngine {
    system_fonts: Arc<SystemFonts>,
}

impl SkiaEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fonts installed on the host, scanned on first use
    pub fn system_fonts(&self) -> &SystemFonts {
        &self.system_fonts
    }
}

impl Engine for SkiaEngine {
    type Paint = SkiaPaint;
    type Shader = SkiaShader;
    type Path = SkiaPath;
    type Paragraph = SkiaParagraph;
    type FontCollection = SkiaFonts;
    type HostCanvas = HostCanvas;
    type Surface = SkiaSurface;

    fn name(&self) -> &'static str {
        "tiny-skia"
    }

    fn create_paint(&self, options: &PaintOptions, shader: Option<&SkiaShader>) -> Result<SkiaPaint> {
        SkiaPaint::from_options(options, shader)
    }

    fn create_linear_gradient(&self, desc: &LinearGradientDesc) -> Result<SkiaShader> {
        SkiaShader::linear_gradient(desc)
    }

    fn create_path(&self, data: &PathData, fill_rule: FillRule) -> Result<SkiaPath> {
        let mut builder = PathBuilder::new();
        for command in data.commands() {
            match command {
                PathCommand::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
                PathCommand::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
                PathCommand::QuadTo { control, end } => builder.quad_to(
                    control.x as f32,
                    control.y as f32,
                    end.x as f32,
                    end.y as f32,
                ),
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => builder.cubic_to(
                    control1.x as f32,
                    control1.y as f32,
                    control2.x as f32,
                    control2.y as f32,
                    end.x as f32,
                    end.y as f32,
                ),
                PathCommand::Close => builder.close(),
            }
        }

        let path = builder.finish().ok_or_else(|| {
            KilnError::ResourceCreationFailed(format!(
                "path with {} commands has no drawable segments",
                data.commands().len()
            ))
        })?;

        Ok(SkiaPath {
            path,
            fill_rule: fill_rule.to_skia(),
        })
    }

    fn tight_bounds(&self, path: &SkiaPath) -> Option<Rect> {
        path.path.compute_tight_bounds().map(rect_from_skia)
    }

    fn create_raster_surface(&self, width: u32, height: u32) -> Result<SkiaSurface> {
        SkiaSurface::raster(width, height)
    }

    fn create_host_surface(
        &self,
        canvas: &HostCanvas,
        width: u32,
        height: u32,
    ) -> Result<SkiaSurface> {
        SkiaSurface::host(canvas, width, height)
    }

    fn load_fonts(&self, fonts: &[Vec<u8>]) -> Result<SkiaFonts> {
        Ok(SkiaFonts::from_data(fonts)?.with_system_fonts(Arc::clone(&self.system_fonts)))
    }

    fn build_paragraph(
        &self,
        fonts: &SkiaFonts,
        style: &ParagraphStyle,
        runs: &[TextRun],
    ) -> Result<SkiaParagraph> {
        SkiaParagraph::build(fonts, style, runs)
    }

    fn layout_paragraph(&self, paragraph: &mut SkiaParagraph, width: f64) {
        paragraph.layout(width);
    }

    fn paragraph_metrics(&self, paragraph: &SkiaParagraph) -> ParagraphMetrics {
        paragraph.metrics()
    }
}

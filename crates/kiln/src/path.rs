//! Path textures
//!
//! A [`PathProducer`] records a vector outline and optional stroke and fill
//! paints. Its texture is exactly large enough for the stroked outline,
//! mitre spikes included; bounds are recomputed before every texture
//! request because the stroke can change after construction.

use std::sync::Arc;

use kiln_core::{
    compute_bounds, Canvas, Engine, Fingerprint, FillRule, PaintOptions, PaintStyle,
    PathBounds, PathCommand, PathData, PathOutline, Rect, Result, StrokeGeometry,
};
use serde::{Deserialize, Serialize};

use crate::context::Kiln;
use crate::texture::{content_fingerprint, TextureProducer};

/// Stroke width the engine uses when a stroke paint sets none
pub const DEFAULT_STROKE_WIDTH: f64 = 1.0;
/// Mitre limit the engine uses when a stroke paint sets none
pub const DEFAULT_MITRE_LIMIT: f64 = 4.0;

/// Stroke and fill styling of a path
///
/// The paint style of each entry is forced: `stroke` always strokes and
/// `fill` always fills. An absent entry is not drawn.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathOptions {
    pub stroke: Option<PaintOptions>,
    pub fill: Option<PaintOptions>,
    #[serde(deserialize_with = "kiln_core::style::lenient")]
    pub fill_rule: Option<FillRule>,
}

impl PathOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stroke(mut self, stroke: PaintOptions) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn with_fill(mut self, fill: PaintOptions) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_fill_rule(mut self, rule: FillRule) -> Self {
        self.fill_rule = Some(rule);
        self
    }
}

#[derive(Serialize)]
struct PathKey<'a> {
    commands: &'a PathData,
    fill_rule: FillRule,
    stroke: Option<&'a PaintOptions>,
    fill: Option<&'a PaintOptions>,
}

/// Produces a texture of a stroked and/or filled vector path
pub struct PathProducer<E: Engine> {
    outline: PathOutline,
    fill_rule: FillRule,
    stroke: Option<PaintOptions>,
    fill: Option<PaintOptions>,
    stroke_paint: Option<Arc<E::Paint>>,
    fill_paint: Option<Arc<E::Paint>>,
    path: Option<E::Path>,
    dirty: bool,
    bounds: Option<PathBounds>,
}

impl<E: Engine> PathProducer<E> {
    pub fn new(kiln: &mut Kiln<E>, options: PathOptions) -> Result<Self> {
        let mut producer = Self {
            outline: PathOutline::new(),
            fill_rule: options.fill_rule.unwrap_or_default(),
            stroke: None,
            fill: None,
            stroke_paint: None,
            fill_paint: None,
            path: None,
            dirty: true,
            bounds: None,
        };
        producer.set_stroke(kiln, options.stroke)?;
        producer.set_fill(kiln, options.fill)?;
        Ok(producer)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Geometry
    // ─────────────────────────────────────────────────────────────────────────

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.outline.move_to(x, y);
        self.dirty = true;
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        self.outline.line_to(x, y);
        self.dirty = true;
    }

    pub fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        self.outline.quad_to(cx, cy, x, y);
        self.dirty = true;
    }

    pub fn cubic_to(&mut self, cx1: f64, cy1: f64, cx2: f64, cy2: f64, x: f64, y: f64) {
        self.outline.cubic_to(cx1, cy1, cx2, cy2, x, y);
        self.dirty = true;
    }

    pub fn close(&mut self) {
        self.outline.close();
        self.dirty = true;
    }

    /// Replay recorded commands onto this path
    pub fn extend<'a>(&mut self, commands: impl IntoIterator<Item = &'a PathCommand>) {
        for command in commands {
            self.outline.apply(command);
        }
        self.dirty = true;
    }

    pub fn outline(&self) -> &PathOutline {
        &self.outline
    }

    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    pub fn set_fill_rule(&mut self, rule: FillRule) {
        self.fill_rule = rule;
        self.dirty = true;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Paints
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the stroke paint; `None` removes the stroke
    pub fn set_stroke(&mut self, kiln: &mut Kiln<E>, stroke: Option<PaintOptions>) -> Result<()> {
        let stroke = stroke.map(|options| options.with_style(PaintStyle::Stroke));
        self.stroke_paint = stroke.as_ref().map(|options| kiln.paint(options)).transpose()?;
        self.stroke = stroke;
        Ok(())
    }

    /// Replace the fill paint; `None` removes the fill
    pub fn set_fill(&mut self, kiln: &mut Kiln<E>, fill: Option<PaintOptions>) -> Result<()> {
        let fill = fill.map(|options| options.with_style(PaintStyle::Fill));
        self.fill_paint = fill.as_ref().map(|options| kiln.paint(options)).transpose()?;
        self.fill = fill;
        Ok(())
    }

    pub fn stroke(&self) -> Option<&PaintOptions> {
        self.stroke.as_ref()
    }

    pub fn fill(&self) -> Option<&PaintOptions> {
        self.fill.as_ref()
    }

    /// Stroke parameters the bounds are computed with
    pub fn stroke_geometry(&self) -> StrokeGeometry {
        match &self.stroke {
            Some(stroke) => StrokeGeometry::from_width(
                stroke
                    .stroke_width
                    .map_or(DEFAULT_STROKE_WIDTH, |w| f64::from(w).max(0.0)),
                stroke.stroke_miter.map_or(DEFAULT_MITRE_LIMIT, f64::from),
            ),
            None => StrokeGeometry::default(),
        }
    }

    /// Bounds from the last [`prepare`](TextureProducer::prepare)
    pub fn bounds(&self) -> Option<PathBounds> {
        self.bounds
    }
}

impl<E: Engine> TextureProducer<E> for PathProducer<E> {
    fn prepare(&mut self, engine: &E) -> Result<()> {
        if self.outline.data().is_empty() {
            self.path = None;
            self.bounds = None;
            return Ok(());
        }

        if self.dirty || self.path.is_none() {
            self.path = Some(engine.create_path(self.outline.data(), self.fill_rule)?);
            self.dirty = false;
        }

        let tight = self
            .path
            .as_ref()
            .and_then(|path| engine.tight_bounds(path))
            .unwrap_or(Rect::ZERO);
        let bounds = compute_bounds(tight, self.outline.edges(), self.stroke_geometry());
        tracing::debug!(
            left = bounds.rect.left,
            top = bounds.rect.top,
            width = bounds.width(),
            height = bounds.height(),
            "path bounds"
        );
        self.bounds = Some(bounds);
        Ok(())
    }

    fn size(&self) -> Option<(f64, f64)> {
        self.bounds.map(|bounds| (bounds.width(), bounds.height()))
    }

    fn fingerprint(&self) -> Option<Fingerprint> {
        content_fingerprint(
            &PathKey {
                commands: self.outline.data(),
                fill_rule: self.fill_rule,
                stroke: self.stroke.as_ref(),
                fill: self.fill.as_ref(),
            },
            "path",
        )
    }

    fn render(&self, canvas: &mut dyn Canvas<E>) {
        let (Some(path), Some(bounds)) = (&self.path, &self.bounds) else {
            return;
        };
        let offset = bounds.offset();
        canvas.translate(offset.x, offset.y);
        if let Some(paint) = &self.fill_paint {
            canvas.draw_path(path, paint);
        }
        if let Some(paint) = &self.stroke_paint {
            canvas.draw_path(path, paint);
        }
    }
}

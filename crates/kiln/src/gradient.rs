//! Gradient textures
//!
//! A linear gradient fills a `width x height` rectangle. The gradient line
//! runs through the rectangle's center, rotated by a signed angle in
//! degrees; its end points are rounded to two decimals so that nearly equal
//! rotations share a shader.

use std::f64::consts::PI;
use std::sync::Arc;

use kiln_core::{
    Canvas, Engine, Fingerprint, GradientOptions, KilnError, LinearGradientDesc,
    LinearGradientOptions, PaintOptions, PaintStyle, Point, Rect, Result,
};

use crate::context::Kiln;
use crate::paint::ShaderHandle;
use crate::texture::{content_fingerprint, TextureProducer};

/// Round to two decimal places
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Start and end of a gradient line through the center of a `width x height`
/// box, rotated by `rotation` degrees
///
/// At zero rotation the line runs from the middle of the right edge to the
/// middle of the left edge.
pub fn linear_positions(width: f64, height: f64, rotation: f64) -> (Point, Point) {
    let radians = rotation.to_radians();
    let (cx, cy) = (width / 2.0, height / 2.0);
    let at = |angle: f64| Point::new(round2(cx + cx * angle.cos()), round2(cy + cy * angle.sin()));
    (at(radians), at(radians + PI))
}

/// Resolve declarative options into engine input
pub fn linear_desc(options: &LinearGradientOptions) -> LinearGradientDesc {
    let (start, end) = linear_positions(options.width, options.height, options.rotation);
    LinearGradientDesc {
        start,
        end,
        stops: options.stops.clone(),
        tile_mode: options.tile_mode.unwrap_or_default(),
    }
}

/// Produces a texture filled with a gradient
pub struct GradientProducer<E: Engine> {
    options: GradientOptions,
    size: (f64, f64),
    shader: ShaderHandle<E::Shader>,
    paint: Arc<E::Paint>,
}

impl<E: Engine> GradientProducer<E> {
    /// Resolve the shader and paint for `options`
    ///
    /// Radial gradients are rejected with
    /// [`KilnError::UnsupportedConfiguration`].
    pub fn new(kiln: &mut Kiln<E>, options: GradientOptions) -> Result<Self> {
        let linear = match &options {
            GradientOptions::Linear(linear) => linear,
            GradientOptions::Radial(_) => {
                return Err(KilnError::UnsupportedConfiguration(
                    "radial gradients are not supported".into(),
                ))
            }
        };
        if linear.stops.is_empty() {
            return Err(KilnError::UnsupportedConfiguration(
                "a linear gradient needs at least one color stop".into(),
            ));
        }

        let desc = linear_desc(linear);
        tracing::debug!(
            start_x = desc.start.x,
            start_y = desc.start.y,
            end_x = desc.end.x,
            end_y = desc.end.y,
            stops = desc.stops.len(),
            "linear gradient"
        );
        let shader = kiln.linear_shader(&desc)?;
        let paint = kiln.paint_with_shader(&PaintOptions::new().with_style(PaintStyle::Fill), &shader)?;

        Ok(Self {
            size: (linear.width, linear.height),
            options,
            shader,
            paint,
        })
    }

    pub fn options(&self) -> &GradientOptions {
        &self.options
    }

    pub fn shader(&self) -> &ShaderHandle<E::Shader> {
        &self.shader
    }

    pub fn paint(&self) -> &Arc<E::Paint> {
        &self.paint
    }
}

impl<E: Engine> TextureProducer<E> for GradientProducer<E> {
    fn size(&self) -> Option<(f64, f64)> {
        Some(self.size)
    }

    fn fingerprint(&self) -> Option<Fingerprint> {
        content_fingerprint(&self.options, "gradient")
    }

    fn render(&self, canvas: &mut dyn Canvas<E>) {
        let (width, height) = self.size;
        canvas.draw_rect(Rect::from_xywh(0.0, 0.0, width, height), &self.paint);
    }
}

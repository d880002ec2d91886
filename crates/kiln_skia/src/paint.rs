//! Paint and shader handles

use kiln_core::{KilnError, LinearGradientDesc, PaintOptions, PaintStyle, Result};
use tiny_skia::{GradientStop, LinearGradient, Shader, Stroke, StrokeDash, Transform};

use crate::convert::ToSkia;

/// A resolved paint: the tiny-skia paint plus the stroke it draws with
#[derive(Clone, Debug)]
pub struct SkiaPaint {
    pub(crate) paint: tiny_skia::Paint<'static>,
    pub(crate) style: PaintStyle,
    pub(crate) stroke: Stroke,
}

impl SkiaPaint {
    pub fn style(&self) -> PaintStyle {
        self.style
    }

    pub fn stroke(&self) -> &Stroke {
        &self.stroke
    }

    pub fn paint(&self) -> &tiny_skia::Paint<'static> {
        &self.paint
    }

    /// Build a paint from its declarative description
    ///
    /// Unset options keep tiny-skia's defaults: opaque black fill,
    /// anti-aliased, source-over, 1px stroke with a mitre limit of 4.
    pub(crate) fn from_options(options: &PaintOptions, shader: Option<&SkiaShader>) -> Result<Self> {
        let mut paint = tiny_skia::Paint::default();

        if let Some(shader) = shader {
            paint.shader = shader.shader.clone();
        } else if let Some(color) = options.color {
            paint.set_color(color.to_skia());
        } else {
            paint.set_color(tiny_skia::Color::BLACK);
        }

        if let Some(anti_alias) = options.anti_alias {
            paint.anti_alias = anti_alias;
        }
        if let Some(mode) = options.blend_mode {
            paint.blend_mode = mode.to_skia();
        }
        if let Some(alpha) = options.alpha {
            paint.shader.apply_opacity(alpha.clamp(0.0, 1.0));
        }

        let mut stroke = Stroke::default();
        if let Some(width) = options.stroke_width {
            stroke.width = width.max(0.0);
        }
        if let Some(miter) = options.stroke_miter {
            stroke.miter_limit = miter;
        }
        if let Some(cap) = options.stroke_cap {
            stroke.line_cap = cap.to_skia();
        }
        if let Some(join) = options.stroke_join {
            stroke.line_join = join.to_skia();
        }
        if let Some(dash) = &options.dash {
            stroke.dash = Some(StrokeDash::new(dash.intervals.clone(), dash.phase).ok_or_else(
                || {
                    KilnError::ResourceCreationFailed(format!(
                        "invalid dash intervals {:?}",
                        dash.intervals
                    ))
                },
            )?);
        }

        Ok(Self {
            paint,
            style: options.style.unwrap_or(PaintStyle::Fill),
            stroke,
        })
    }
}

/// A shader handle
#[derive(Clone, Debug)]
pub struct SkiaShader {
    pub(crate) shader: Shader<'static>,
}

impl SkiaShader {
    pub(crate) fn linear_gradient(desc: &LinearGradientDesc) -> Result<Self> {
        let stops = desc
            .stops
            .iter()
            .map(|stop| GradientStop::new(stop.offset, stop.color.to_skia()))
            .collect();

        let shader = LinearGradient::new(
            desc.start.to_skia(),
            desc.end.to_skia(),
            stops,
            desc.tile_mode.to_skia(),
            Transform::identity(),
        )
        .ok_or_else(|| {
            KilnError::ResourceCreationFailed(format!(
                "linear gradient from {:?} to {:?} with {} stops",
                desc.start,
                desc.end,
                desc.stops.len()
            ))
        })?;

        Ok(Self { shader })
    }
}

//! Paragraph textures
//!
//! A [`ParagraphBuilder`] holds a font collection and a paragraph style.
//! Building a list of text segments yields a laid-out paragraph, cached by
//! the fingerprint of everything that affects its layout, wrapped in a
//! [`ParagraphProducer`] sized to the layout.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use kiln_core::{
    fingerprint, Canvas, Engine, Fingerprint, KilnError, ParagraphMetrics, ParagraphStyle,
    Result, TextRun, TextSegment,
};
use serde::Serialize;

use crate::context::Kiln;
use crate::texture::TextureProducer;

/// Width used to measure a paragraph before shrinking it to its content
pub const UNBOUNDED_WIDTH: f64 = 9_007_199_254_740_991.0;

#[derive(Serialize)]
struct ParagraphKey<'a> {
    fonts: u64,
    style: &'a ParagraphStyle,
    segments: &'a [TextSegment],
    max_width: Option<f64>,
}

/// Builds paragraphs against one font collection and paragraph style
pub struct ParagraphBuilder<E: Engine> {
    fonts: Arc<E::FontCollection>,
    fonts_hash: u64,
    style: ParagraphStyle,
}

impl<E: Engine> ParagraphBuilder<E> {
    /// Load `fonts` through the engine
    pub fn new(kiln: &Kiln<E>, fonts: &[Vec<u8>], style: ParagraphStyle) -> Result<Self> {
        let mut hasher = DefaultHasher::new();
        fonts.hash(&mut hasher);
        let fonts_hash = hasher.finish();

        let collection = kiln.engine().load_fonts(fonts)?;
        tracing::debug!(fonts = fonts.len(), fonts_hash, "paragraph fonts loaded");

        Ok(Self {
            fonts: Arc::new(collection),
            fonts_hash,
            style,
        })
    }

    pub fn style(&self) -> &ParagraphStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: ParagraphStyle) {
        self.style = style;
    }

    /// Resolve each segment's style against the paragraph default
    fn resolve_runs(&self, segments: &[TextSegment]) -> Result<Vec<TextRun>> {
        segments
            .iter()
            .map(|segment| {
                let style = segment
                    .style
                    .as_ref()
                    .or(self.style.text_style.as_ref())
                    .cloned()
                    .ok_or_else(|| {
                        KilnError::MissingDependency(format!(
                            "no text style for segment {:?}",
                            segment.text
                        ))
                    })?;
                Ok(TextRun {
                    text: segment.text.clone(),
                    style,
                })
            })
            .collect()
    }

    /// Lay out `segments` and wrap the result in a producer
    ///
    /// With a positive `max_width` the paragraph wraps at that width.
    /// Otherwise it is measured unbounded and laid out again at the ceiling
    /// of its widest line, so the texture hugs the text.
    pub fn build(
        &self,
        kiln: &mut Kiln<E>,
        segments: &[TextSegment],
        max_width: Option<f64>,
    ) -> Result<ParagraphProducer<E>> {
        let runs = self.resolve_runs(segments)?;
        let key = fingerprint(&ParagraphKey {
            fonts: self.fonts_hash,
            style: &self.style,
            segments,
            max_width,
        })?;

        let engine = &kiln.engine;
        let paragraph = kiln.paragraphs.get_or_try_insert_with(&key, || {
            let mut paragraph = engine.build_paragraph(&self.fonts, &self.style, &runs)?;
            match max_width {
                Some(width) if width > 0.0 => engine.layout_paragraph(&mut paragraph, width),
                _ => {
                    engine.layout_paragraph(&mut paragraph, UNBOUNDED_WIDTH);
                    let intrinsic = engine.paragraph_metrics(&paragraph).max_intrinsic_width;
                    engine.layout_paragraph(&mut paragraph, intrinsic.ceil());
                }
            }
            Ok(paragraph)
        })?;
        let metrics = engine.paragraph_metrics(&paragraph);

        Ok(ParagraphProducer {
            paragraph,
            metrics,
            fingerprint: key,
        })
    }
}

/// Produces a texture of a laid-out paragraph
pub struct ParagraphProducer<E: Engine> {
    paragraph: Arc<E::Paragraph>,
    metrics: ParagraphMetrics,
    fingerprint: Fingerprint,
}

impl<E: Engine> ParagraphProducer<E> {
    pub fn paragraph(&self) -> &Arc<E::Paragraph> {
        &self.paragraph
    }

    pub fn metrics(&self) -> ParagraphMetrics {
        self.metrics
    }
}

impl<E: Engine> Clone for ParagraphProducer<E> {
    fn clone(&self) -> Self {
        Self {
            paragraph: Arc::clone(&self.paragraph),
            metrics: self.metrics,
            fingerprint: self.fingerprint.clone(),
        }
    }
}

impl<E: Engine> TextureProducer<E> for ParagraphProducer<E> {
    fn size(&self) -> Option<(f64, f64)> {
        Some((self.metrics.max_width, self.metrics.height))
    }

    fn fingerprint(&self) -> Option<Fingerprint> {
        Some(self.fingerprint.clone())
    }

    fn render(&self, canvas: &mut dyn Canvas<E>) {
        canvas.draw_paragraph(&self.paragraph, 0.0, 0.0);
    }
}

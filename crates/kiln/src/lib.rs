//! Kiln
//!
//! Turns vector paths, gradients and text paragraphs into textures, and
//! rasterizes each distinct configuration at most once.
//!
//! - **Context**: [`Kiln`] owns the engine, the configuration and the paint,
//!   shader, paragraph and texture caches
//! - **Builders**: paints and shaders resolved from declarative records
//! - **Producers**: [`GradientProducer`], [`ParagraphProducer`] and
//!   [`PathProducer`], or any [`TextureProducer`] of your own
//!
//! # Example
//!
//! ```rust
//! use kiln::{Kiln, KilnConfig, PathOptions, PathProducer, ProduceOptions};
//! use kiln_core::{Color, PaintOptions};
//! use kiln_skia::SkiaEngine;
//!
//! let mut kiln = Kiln::init(SkiaEngine::new(), KilnConfig::default());
//! let stroke = PaintOptions::stroke(Color::BLACK, 4.0).with_stroke_miter(10.0);
//! let mut path = PathProducer::new(&mut kiln, PathOptions::new().with_stroke(stroke))?;
//! path.move_to(0.0, 0.0);
//! path.line_to(10.0, 0.0);
//! path.line_to(10.0, 10.0);
//! path.close();
//!
//! let texture = kiln.produce_texture(&mut path, &ProduceOptions::new())?;
//! let again = kiln.produce_texture(&mut path, &ProduceOptions::new())?;
//! assert!(std::sync::Arc::ptr_eq(&texture, &again));
//! # Ok::<(), kiln_core::KilnError>(())
//! ```

mod config;
mod context;
mod gradient;
mod paint;
mod paragraph;
mod path;
mod texture;

#[cfg(test)]
mod testing;
#[cfg(test)]
mod tests;

pub use config::KilnConfig;
pub use context::Kiln;
pub use gradient::{linear_desc, linear_positions, GradientProducer};
pub use paint::ShaderHandle;
pub use paragraph::{ParagraphBuilder, ParagraphProducer, UNBOUNDED_WIDTH};
pub use path::{PathOptions, PathProducer, DEFAULT_MITRE_LIMIT, DEFAULT_STROKE_WIDTH};
pub use texture::{
    CallbackProducer, ProduceOptions, SurfaceKind, Texture, TextureData, TextureProducer,
};

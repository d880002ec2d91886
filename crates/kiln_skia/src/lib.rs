//! tiny-skia backend for Kiln
//!
//! Implements [`kiln_core::Engine`] on the CPU:
//!
//! - **Paints and shaders**: tiny-skia paints with stroke settings, linear gradients
//! - **Paths**: built from [`kiln_core::PathData`], tight bounds from tiny-skia
//! - **Surfaces**: owned raster pixmaps or a shared [`HostCanvas`]
//! - **Paragraphs**: outline glyphs from ttf-parser, wrapped at Unicode line
//!   break opportunities, with host fonts found through fontdb
//!
//! # Example
//!
//! ```rust
//! use kiln_core::{Engine, FillRule, PathOutline};
//! use kiln_skia::SkiaEngine;
//!
//! let mut outline = PathOutline::new();
//! outline.move_to(0.0, 0.0);
//! outline.line_to(10.0, 5.0);
//!
//! let engine = SkiaEngine::new();
//! let path = engine.create_path(outline.data(), FillRule::Winding).unwrap();
//! assert!(engine.tight_bounds(&path).is_some());
//! ```

mod convert;
mod engine;
mod paint;
mod surface;
mod text;

pub use engine::{SkiaEngine, SkiaPath};
pub use paint::{SkiaPaint, SkiaShader};
pub use surface::{HostCanvas, SkiaSurface};
pub use text::{
    load_system_font, FontFace, SkiaFonts, SkiaParagraph, SystemFonts, DEFAULT_FONT_SIZE,
};

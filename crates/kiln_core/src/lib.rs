//! Kiln Core
//!
//! Engine-neutral building blocks of the Kiln render cache:
//!
//! - **Fingerprints**: deterministic cache keys derived from configuration values
//! - **Geometry kernel**: mitre-join tip placement for stroked corners
//! - **Path bounds**: tight engine bounds grown to cover mitre spikes
//! - **Render cache**: content-addressed artifact store with identity-preserving hits
//! - **Engine traits**: the capability set a rasterization backend provides
//!
//! # Example
//!
//! ```rust
//! use kiln_core::{compute_bounds, PathOutline, Rect, StrokeGeometry};
//!
//! let mut outline = PathOutline::new();
//! outline.move_to(0.0, 0.0);
//! outline.line_to(10.0, 0.0);
//! outline.line_to(10.0, 10.0);
//! outline.line_to(0.0, 10.0);
//! outline.close();
//!
//! let tight = Rect::from_ltrb(0.0, 0.0, 10.0, 10.0);
//! let bounds = compute_bounds(tight, outline.edges(), StrokeGeometry::new(2.0, 10.0));
//! assert_eq!(bounds.width(), 14.0);
//! ```

pub mod bounds;
pub mod cache;
pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod geometry;
pub mod path;
pub mod style;
pub mod text;
pub mod types;

pub use bounds::{compute_bounds, PathBounds};
pub use cache::{CachePolicy, CacheStats, RenderCache};
pub use engine::{Canvas, Engine, Surface};
pub use error::{KilnError, Result};
pub use fingerprint::{fingerprint, Fingerprint};
pub use geometry::{angle_between, distance, mitre_length, outer_mitre_point, StrokeGeometry};
pub use path::{PathCommand, PathData, PathOutline};
pub use style::{
    BlendMode, ColorStop, DashPattern, FillRule, GradientOptions, LineCap, LineJoin,
    LinearGradientDesc, LinearGradientOptions, NamedEnum, PaintOptions, PaintStyle,
    RadialGradientOptions, TileMode,
};
pub use text::{
    Decoration, DecorationStyle, FontFeature, FontSlant, FontStyle, FontVariation, FontWeight,
    FontWidth, ParagraphMetrics, ParagraphStyle, StrutStyle, TextAlign, TextBaseline,
    TextDirection, TextHeightBehavior, TextRun, TextSegment, TextShadow, TextStyle,
};
pub use types::{Color, Point, Rect};

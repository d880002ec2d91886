//! Path bounds engine
//!
//! Combines the engine's curve-aware tight bounds with a mitre pass over the
//! recorded edge list, producing the rectangle a stroked path occupies and
//! the translation that brings it on-canvas.
//!
//! Curves only contribute their end points to the mitre pass. Their extrema
//! are covered by the engine's tight bounds, but the join spikes a curve
//! forms with its neighbours are approximated by the straight edge between
//! its end points.

use serde::Serialize;

use crate::geometry::{outer_mitre_point, StrokeGeometry};
use crate::types::{Point, Rect};

/// Bounding rectangle of a stroked path plus its placement
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PathBounds {
    pub rect: Rect,
}

impl PathBounds {
    /// Surface width needed to hold the stroked path
    pub fn width(&self) -> f64 {
        ceil_extent(self.rect.width())
    }

    /// Surface height needed to hold the stroked path
    pub fn height(&self) -> f64 {
        ceil_extent(self.rect.height())
    }

    /// Translation applied to the canvas origin before drawing
    ///
    /// This is the magnitude of the left/top edges. For paths whose bounds
    /// start at or above the origin on both axes (the common case for
    /// stroked paths built around the origin) it moves the whole outline
    /// into the positive quadrant of a `width x height` surface.
    pub fn offset(&self) -> Point {
        Point::new(self.rect.left.abs(), self.rect.top.abs())
    }
}

/// Round an extent up to whole pixels
///
/// Extents within `SNAP_EPSILON` of an integer snap to it, so trigonometric
/// noise on an exact mitre never costs an extra row of pixels.
fn ceil_extent(extent: f64) -> f64 {
    let nearest = extent.round();
    if (extent - nearest).abs() < SNAP_EPSILON {
        nearest
    } else {
        extent.ceil()
    }
}

const SNAP_EPSILON: f64 = 1e-9;

/// Compute the bounds of a stroked path
///
/// `tight` is the engine's tight bounds of the unstroked path. It is inflated
/// by the stroke half-width, then grown to include the outer mitre point of
/// every vertex in `edges`, treated as a closed polygon.
pub fn compute_bounds(tight: Rect, edges: &[Point], stroke: StrokeGeometry) -> PathBounds {
    let mut rect = tight.outset(stroke.half_width);
    let count = edges.len();
    for (index, &current) in edges.iter().enumerate() {
        let previous = edges[(index + count - 1) % count];
        let next = edges[(index + 1) % count];
        let tip = outer_mitre_point(previous, current, next, stroke);
        tracing::trace!(index, x = tip.x, y = tip.y, "mitre contribution");
        rect = rect.include(tip);
    }
    PathBounds { rect }
}

//! Geometry kernel for mitre-join bounds
//!
//! Pure functions that reproduce where a stroke renderer places the tip of
//! a mitre join. They never draw anything; the path bounds engine uses them
//! to grow a bounding box around stroked corners.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::types::Point;

/// Stroke parameters that influence mitre geometry
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StrokeGeometry {
    /// Half of the stroke width, `>= 0`
    pub half_width: f64,
    /// Maximum mitre spike length as a multiple of `half_width`
    pub mitre_limit: f64,
}

impl StrokeGeometry {
    pub fn new(half_width: f64, mitre_limit: f64) -> Self {
        Self {
            half_width,
            mitre_limit,
        }
    }

    /// Build from a full stroke width
    pub fn from_width(width: f64, mitre_limit: f64) -> Self {
        Self::new(width / 2.0, mitre_limit)
    }

    pub fn width(&self) -> f64 {
        self.half_width * 2.0
    }

    /// Longest spike the mitre limit allows
    ///
    /// A zero-width stroke measures the limit against a unit length.
    pub fn mitre_cap(&self) -> f64 {
        let unit = if self.width() != 0.0 {
            self.half_width
        } else {
            1.0
        };
        self.mitre_limit * unit
    }
}

/// Euclidean distance between two points
pub fn distance(p1: Point, p2: Point) -> f64 {
    (p1.x - p2.x).hypot(p1.y - p2.y)
}

/// Interior angle at `p2` of the triangle `p1 p2 p3`, in radians
///
/// Uses the law of cosines. When `p2` coincides with a neighbour the
/// denominator is replaced by `1`, which yields a defined but arbitrary
/// angle; zero-length edges are left to the mitre limit to tame.
pub fn angle_between(p1: Point, p2: Point, p3: Point) -> f64 {
    let a = distance(p1, p2);
    let b = distance(p2, p3);
    let c = distance(p1, p3);
    let mut denominator = 2.0 * a * b;
    if denominator == 0.0 || denominator.is_nan() {
        denominator = 1.0;
    }
    // rounding can push the cosine a hair outside [-1, 1]
    ((a * a + b * b - c * c) / denominator)
        .clamp(-1.0, 1.0)
        .acos()
}

/// Distance from a corner to the tip of its mitre join
///
/// Grows without bound as `angle` approaches zero; callers clamp it with
/// the stroke's mitre limit.
pub fn mitre_length(angle: f64, stroke_width: f64) -> f64 {
    stroke_width / (2.0 * (angle / 2.0).sin())
}

/// Angle of `v` from the positive x axis in `[0, 2π)`
fn axis_angle(v: Point) -> f64 {
    let mut length = distance(v, Point::ZERO);
    if length == 0.0 {
        length = 1.0;
    }
    let angle = (v.x / length).clamp(-1.0, 1.0).acos();
    if v.y < 0.0 {
        TAU - angle
    } else {
        angle
    }
}

/// Tip of the mitre join formed at `curr` by the edges `prev -> curr -> next`
///
/// Collinear edges (angle exactly `0` or `π`) cannot form a spike, so
/// `curr` is returned unchanged. Otherwise the tip sits on the exterior
/// bisector of the corner at the mitre length, clamped to the stroke's
/// mitre cap.
pub fn outer_mitre_point(prev: Point, curr: Point, next: Point, stroke: StrokeGeometry) -> Point {
    let angle = angle_between(prev, curr, next);
    if angle == PI || angle == 0.0 {
        return curr;
    }

    let to_prev = axis_angle(prev.sub(curr));
    let to_next = axis_angle(next.sub(curr));
    let (low, high) = (to_prev.min(to_next), to_prev.max(to_next));
    let spread = high - low;

    // Halfway between the edge directions is the interior bisector when the
    // edges are less than π apart, and already the exterior one otherwise.
    let mut bisector = low + spread / 2.0;
    if spread <= PI {
        bisector += PI;
    }
    let bisector = bisector % TAU;

    let length = mitre_length(angle, stroke.width()).min(stroke.mitre_cap());
    Point::new(
        curr.x + length * bisector.cos(),
        curr.y + length * bisector.sin(),
    )
}

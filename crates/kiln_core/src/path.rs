//! Engine-neutral path recording
//!
//! [`PathOutline`] records path commands for the engine together with the
//! vertex list the bounds engine walks when computing mitre spikes.

use serde::{Deserialize, Serialize};

use crate::types::{Point, Rect};

/// Path command for building vector paths
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathCommand {
    /// Move to a point
    MoveTo(Point),
    /// Line to a point
    LineTo(Point),
    /// Quadratic Bézier curve
    QuadTo { control: Point, end: Point },
    /// Cubic Bézier curve
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    /// Close the current subpath
    Close,
}

/// A sequence of path commands
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_commands(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    fn push(&mut self, command: PathCommand) {
        self.commands.push(command);
    }

    /// Bounds of every point the commands mention, control points included
    ///
    /// This is a conservative hull, not the tight curve bounds an engine
    /// reports.
    pub fn control_bounds(&self) -> Option<Rect> {
        Rect::from_points(self.commands.iter().flat_map(|command| {
            let points: Vec<Point> = match command {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => vec![*p],
                PathCommand::QuadTo { control, end } => vec![*control, *end],
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => vec![*control1, *control2, *end],
                PathCommand::Close => Vec::new(),
            };
            points
        }))
    }
}

/// Records a path while tracking its vertices in trace order
///
/// Every line or curve pushes its end point onto the edge list. The point it
/// starts from is pushed first unless it equals the last recorded vertex, so
/// consecutive segments share their joint instead of repeating it.
/// Curve control points are kept separately and do not take part in the
/// mitre pass.
#[derive(Clone, Debug, Default)]
pub struct PathOutline {
    data: PathData,
    current: Point,
    edges: Vec<Point>,
    control_points: Vec<Point>,
}

impl PathOutline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &PathData {
        &self.data
    }

    /// Vertices in trace order, treated as a closed polygon for joins
    pub fn edges(&self) -> &[Point] {
        &self.edges
    }

    /// Curve control points in the order they were recorded
    pub fn control_points(&self) -> &[Point] {
        &self.control_points
    }

    pub fn current_point(&self) -> Point {
        self.current
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.current = Point::new(x, y);
        self.data.push(PathCommand::MoveTo(self.current));
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        let end = Point::new(x, y);
        self.push_segment(end);
        self.data.push(PathCommand::LineTo(end));
    }

    pub fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        let control = Point::new(cx, cy);
        let end = Point::new(x, y);
        self.push_segment(end);
        self.control_points.push(control);
        self.data.push(PathCommand::QuadTo { control, end });
    }

    pub fn cubic_to(&mut self, cx1: f64, cy1: f64, cx2: f64, cy2: f64, x: f64, y: f64) {
        let control1 = Point::new(cx1, cy1);
        let control2 = Point::new(cx2, cy2);
        let end = Point::new(x, y);
        self.push_segment(end);
        self.control_points.push(control1);
        self.control_points.push(control2);
        self.data.push(PathCommand::CubicTo {
            control1,
            control2,
            end,
        });
    }

    pub fn close(&mut self) {
        self.data.push(PathCommand::Close);
    }

    /// Record a single command as if the matching method had been called
    pub fn apply(&mut self, command: &PathCommand) {
        match *command {
            PathCommand::MoveTo(p) => self.move_to(p.x, p.y),
            PathCommand::LineTo(p) => self.line_to(p.x, p.y),
            PathCommand::QuadTo { control, end } => self.quad_to(control.x, control.y, end.x, end.y),
            PathCommand::CubicTo {
                control1,
                control2,
                end,
            } => self.cubic_to(control1.x, control1.y, control2.x, control2.y, end.x, end.y),
            PathCommand::Close => self.close(),
        }
    }

    fn push_segment(&mut self, end: Point) {
        if self.edges.last() != Some(&self.current) {
            self.edges.push(self.current);
        }
        self.edges.push(end);
        self.current = end;
    }
}

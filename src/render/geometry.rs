//! Geometry functions: arc fitting and path data

use std::fmt;

use crate::types::{Point, fmt_num};

/// `c` values below this mean the three arc points are collinear
const COLLINEAR_EPSILON: f64 = 1e-12;

/// SVG path `d` attribute builder.
///
/// Coordinates are written with [`fmt_num`], so the output does not carry
/// float noise from the transforms.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathData {
    d: String,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    fn command(mut self, cmd: &str, args: &[f64]) -> Self {
        if !self.d.is_empty() {
            self.d.push(' ');
        }
        self.d.push_str(cmd);
        for arg in args {
            self.d.push(' ');
            self.d.push_str(&fmt_num(*arg));
        }
        self
    }

    /// Move to
    pub fn m(self, x: f64, y: f64) -> Self {
        self.command("M", &[x, y])
    }

    /// Line to
    pub fn l(self, x: f64, y: f64) -> Self {
        self.command("L", &[x, y])
    }

    /// Elliptical arc with equal radii and no x-axis rotation
    pub fn a(self, r: f64, large_arc: bool, sweep: bool, x: f64, y: f64) -> Self {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        self.command("A", &[r, r, 0.0, flag(large_arc), flag(sweep), x, y])
    }

    pub fn is_empty(&self) -> bool {
        self.d.is_empty()
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.d)
    }
}

impl From<PathData> for svg::node::Value {
    fn from(path: PathData) -> Self {
        path.d.into()
    }
}

/// Open polyline through `points`. Empty for no points.
pub fn create_polyline_path(points: &[Point]) -> PathData {
    let mut path = PathData::new();
    for (i, p) in points.iter().enumerate() {
        path = if i == 0 { path.m(p.x, p.y) } else { path.l(p.x, p.y) };
    }
    path
}

/// Circle through three points, or a line when they are collinear.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ArcFit {
    Circle {
        center: Point,
        radius: f64,
        large_arc: bool,
        sweep: bool,
    },
    Line,
}

/// 3×3 determinant of the columns `(x, y, z)`.
#[allow(clippy::too_many_arguments)]
fn det3(x1: f64, x2: f64, x3: f64, y1: f64, y2: f64, y3: f64, z1: f64, z2: f64, z3: f64) -> f64 {
    x1 * y2 * z3 + x2 * y3 * z1 + x3 * y1 * z2 - z1 * y2 * x3 - z2 * y3 * x1 - z3 * y1 * x2
}

/// Fit the circumscribed circle of `start`, `mid`, `end`.
///
/// The sweep flag follows the orientation of the three points. A chord
/// as long as the diameter is a half circle and never a large arc; shorter
/// chords are large arcs when `mid` lies on the center's side of the chord.
pub fn fit_arc(start: Point, mid: Point, end: Point) -> ArcFit {
    let z = |p: Point| p.x * p.x + p.y * p.y;
    let (z1, z2, z3) = (z(start), z(mid), z(end));

    let a = det3(1.0, 1.0, 1.0, start.y, mid.y, end.y, z1, z2, z3);
    let b = det3(start.x, mid.x, end.x, 1.0, 1.0, 1.0, z1, z2, z3);
    let c = det3(start.x, mid.x, end.x, start.y, mid.y, end.y, 1.0, 1.0, 1.0);
    let d = det3(start.x, mid.x, end.x, start.y, mid.y, end.y, z1, z2, z3);

    if c.abs() < COLLINEAR_EPSILON {
        return ArcFit::Line;
    }

    let radius = ((a * a + b * b + 4.0 * c * d) / (4.0 * c * c)).sqrt();
    if !radius.is_finite() {
        return ArcFit::Line;
    }
    let center = Point::new(-a / (2.0 * c), -b / (2.0 * c));

    let chord = end - start;
    let large_arc = if chord.length() >= 2.0 * radius {
        false
    } else {
        let mid_side = chord.perp_dot(mid - start);
        let center_side = chord.perp_dot(center - start);
        mid_side * center_side > 0.0
    };

    ArcFit::Circle {
        center,
        radius,
        large_arc,
        sweep: c >= 0.0,
    }
}

/// Path for an arc through three points, a straight line when degenerate.
pub fn create_arc_path(start: Point, mid: Point, end: Point) -> PathData {
    let path = PathData::new().m(start.x, start.y);
    match fit_arc(start, mid, end) {
        ArcFit::Circle {
            radius,
            large_arc,
            sweep,
            ..
        } => path.a(radius, large_arc, sweep, end.x, end.y),
        ArcFit::Line => path.l(end.x, end.y),
    }
}

//! Numeric primitives shared by the transform, net and render layers.
//!
//! All coordinates are in document units (millimetres for KiCad). The output
//! format uses the same unit: one document unit is one SVG user unit.

use std::fmt;

pub use glam::{DVec2, dvec2};

/// A point or vector in some coordinate system's local frame.
pub type Point = DVec2;

/// Convert degrees to radians.
#[inline]
pub fn to_rad(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Convert radians to degrees.
#[inline]
pub fn to_deg(radians: f64) -> f64 {
    radians.to_degrees()
}

/// Fold `angle` into the half-open range spanned by `max`.
///
/// With a positive `max` the result lies in `[0, max)`, with a negative `max`
/// in `(max, 0]`, i.e. `normalize_angle(190.0, -180.0) == -170.0` and
/// `normalize_angle(-190.0, 180.0) == 170.0`.
pub fn normalize_angle(angle: f64, max: f64) -> f64 {
    let modulus = max.abs();
    (angle % modulus + max) % modulus
}

/// Mutable min/max rectangle.
///
/// Starts out empty (inverted infinities) and grows with every point that is
/// fed into it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new()
    }
}

impl Bounds {
    /// Create an empty bounding box (will expand on first point)
    pub fn new() -> Self {
        Bounds {
            min: dvec2(f64::INFINITY, f64::INFINITY),
            max: dvec2(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Check if the bounds are empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Expand to include a point
    pub fn update(&mut self, p: Point) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Shift the whole rectangle by `offset`. Empty bounds stay empty.
    pub fn translate(&mut self, offset: Point) {
        self.min += offset;
        self.max += offset;
    }

    /// Grow to cover another accumulator.
    pub fn merge(&mut self, other: &Bounds) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Grow by `padding` on every side.
    pub fn pad(&mut self, padding: f64) {
        self.min -= dvec2(padding, padding);
        self.max += dvec2(padding, padding);
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// True when every edge is a finite number.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// `(min-x, min-y, width, height)` as used by `viewBox`.
    pub fn to_rect(&self) -> (f64, f64, f64, f64) {
        (self.min.x, self.min.y, self.width(), self.height())
    }

    /// The `viewBox` attribute value for these bounds.
    pub fn to_view_box(&self) -> String {
        let (x, y, w, h) = self.to_rect();
        format!(
            "{} {} {} {}",
            fmt_num(x),
            fmt_num(y),
            fmt_num(w),
            fmt_num(h)
        )
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_view_box())
    }
}

/// Magnitudes below this print as `0`.
const ZERO_EPSILON: f64 = 1e-9;

/// Format a number with 10 significant figures, trailing zeros trimmed.
///
/// `-0` and residue below `1e-9` print as `0`, which keeps output
/// stable when a mirror flips a zero or a quarter turn leaves `cos` noise.
pub fn fmt_num(value: f64) -> String {
    fmt_num_precision(value, 10)
}

/// Format a number with specified significant figures, trailing zeros trimmed.
fn fmt_num_precision(value: f64, sig_figs: i32) -> String {
    if value.abs() < ZERO_EPSILON {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10_f64.powi(sig_figs - 1 - magnitude);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 {
        return "0".to_string();
    }

    let decimals = (sig_figs - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

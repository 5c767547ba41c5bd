//! 2D affine transforms.
//!
//! A [`Transform`] is the 2×3 matrix
//!
//! ```text
//! | a b c |
//! | d e f |
//! ```
//!
//! acting on homogeneous points, so `apply((x, y)) = (a·x + b·y + c, d·x + e·y + f)`.

use crate::types::{Point, dvec2, to_deg};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform::scale(1.0, 1.0);

    /// Flip across the x axis (negate y).
    pub const MIRROR_X: Transform = Transform::scale(1.0, -1.0);

    /// Flip across the y axis (negate x).
    pub const MIRROR_Y: Transform = Transform::scale(-1.0, 1.0);

    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Transform { a, b, c, d, e, f }
    }

    pub const fn translate(tx: f64, ty: f64) -> Self {
        Transform::new(1.0, 0.0, tx, 0.0, 1.0, ty)
    }

    pub const fn scale(sx: f64, sy: f64) -> Self {
        Transform::new(sx, 0.0, 0.0, 0.0, sy, 0.0)
    }

    /// Rotation by `radians` about the origin. Positive angles turn +x towards +y.
    pub fn rotate(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        Transform::new(c, -s, 0.0, s, c, 0.0)
    }

    /// "Apply `self`, then apply `next`".
    ///
    /// `a.then(b).apply(p) == b.apply(a.apply(p))`, i.e. the resulting matrix
    /// is `next · self`.
    pub fn then(&self, next: &Transform) -> Transform {
        let t = next;
        Transform {
            a: t.a * self.a + t.b * self.d,
            b: t.a * self.b + t.b * self.e,
            c: t.a * self.c + t.b * self.f + t.c,
            d: t.d * self.a + t.e * self.d,
            e: t.d * self.b + t.e * self.e,
            f: t.d * self.c + t.e * self.f + t.f,
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        dvec2(
            self.a * p.x + self.b * p.y + self.c,
            self.d * p.x + self.e * p.y + self.f,
        )
    }

    /// Apply only the linear part. Used for direction and normal vectors,
    /// never for positions.
    pub fn apply_direction(&self, v: Point) -> Point {
        dvec2(self.a * v.x + self.b * v.y, self.d * v.x + self.e * v.y)
    }

    /// Rotation of the image of the +x axis, in radians.
    pub fn rotation(&self) -> f64 {
        self.d.atan2(self.a)
    }

    pub fn rotation_degrees(&self) -> f64 {
        to_deg(self.rotation())
    }

    /// `-1` if the transform reverses orientation (contains an odd number of
    /// mirrors), `1` otherwise.
    ///
    /// Decided on the sign of the determinant: for rotation/mirror matrices it
    /// has the sign of `a·e` but stays well away from zero when `a` and `e`
    /// are rounding noise at quarter turns.
    pub fn angle_direction(&self) -> f64 {
        if self.determinant() < 0.0 { -1.0 } else { 1.0 }
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.e - self.b * self.d
    }

    pub fn translation(&self) -> Point {
        dvec2(self.c, self.f)
    }
}

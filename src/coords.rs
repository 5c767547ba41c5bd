//! Nested coordinate systems.
//!
//! Every placement level (sheet, symbol, pin, text) gets a [`CoordinateSystem`]
//! whose transform maps its local points straight into the output frame.
//! Besides the transform each level carries an angle sign: KiCad measures
//! sheet angles counter-clockwise in a y-down frame while library symbols
//! are drawn y-up, and every mirror on the way flips the sense again.

use crate::justify::{self, Justification, JustifyFlag};
use crate::schematic::{Mirror, Position};
use crate::transform::Transform;
use crate::types::{Point, normalize_angle, to_rad};

/// Composed transform plus angle conventions for one placement level.
///
/// Derived values are computed once in [`CoordinateSystem::new`]; the
/// `with_*` methods return a rebuilt value instead of mutating.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateSystem {
    transform: Transform,
    angle_sign: f64,
    text_angle_multiplier: f64,
    effective_angle_sign: f64,
    effective_angle_offset: f64,
}

impl Default for CoordinateSystem {
    fn default() -> Self {
        Self::new(Transform::IDENTITY, 1.0, 1.0)
    }
}

impl CoordinateSystem {
    pub fn new(transform: Transform, angle_sign: f64, text_angle_multiplier: f64) -> Self {
        CoordinateSystem {
            transform,
            angle_sign,
            text_angle_multiplier,
            effective_angle_sign: transform.angle_direction() * angle_sign,
            effective_angle_offset: transform.rotation_degrees(),
        }
    }

    /// The sheet frame: identity transform with KiCad's reversed angle sense.
    pub fn sheet() -> Self {
        Self::new(Transform::IDENTITY, -1.0, 1.0)
    }

    /// A nested system. `local` maps child points into this system's frame,
    /// so the child's absolute transform is `local` followed by ours.
    pub fn child(&self, local: Option<&Transform>) -> Self {
        let transform = match local {
            Some(local) => local.then(&self.transform),
            None => self.transform,
        };
        Self::new(transform, self.angle_sign, self.text_angle_multiplier)
    }

    pub fn with_angle_sign(&self, angle_sign: f64) -> Self {
        Self::new(self.transform, angle_sign, self.text_angle_multiplier)
    }

    pub fn with_text_angle_multiplier(&self, multiplier: f64) -> Self {
        Self::new(self.transform, self.angle_sign, multiplier)
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn angle_sign(&self) -> f64 {
        self.angle_sign
    }

    pub fn text_angle_multiplier(&self) -> f64 {
        self.text_angle_multiplier
    }

    pub fn effective_angle_sign(&self) -> f64 {
        self.effective_angle_sign
    }

    pub fn effective_angle_offset(&self) -> f64 {
        self.effective_angle_offset
    }

    /// Project a local point into the output frame.
    pub fn point(&self, p: Point) -> Point {
        self.transform.apply(p)
    }

    /// Output rotation (SVG, clockwise degrees) of a locally stored angle.
    pub fn angle(&self, angle: f64) -> f64 {
        self.effective_angle_sign * angle + self.effective_angle_offset
    }

    /// Output rotation of a text angle, folded into `(-180, 0]`.
    pub fn text_angle(&self, angle: f64) -> f64 {
        normalize_angle(self.angle(angle * self.text_angle_multiplier), -180.0)
    }

    /// Screen anchoring for a text stored at `at` with `flags`.
    pub fn text_justify(&self, at: &Position, flags: &[JustifyFlag]) -> Justification {
        justify::resolve(
            at.angle * self.text_angle_multiplier,
            flags,
            &self.transform,
            self.angle_sign,
        )
    }

    /// Anchor direction of a text in output space, for the debug overlay.
    pub fn text_anchor_direction(&self, at: &Position, flags: &[JustifyFlag]) -> Point {
        justify::global_anchor_direction(
            at.angle * self.text_angle_multiplier,
            flags,
            &self.transform,
            self.angle_sign,
        )
    }

    /// Lengths are not scaled by any transform in use.
    pub fn length(&self, length: f64) -> f64 {
        length
    }

    /// Local transform of an element placed at `at` inside this system:
    /// rotate by the signed angle, mirror, then move to `(at.x, at.y)`.
    pub fn placement_transform(&self, at: &Position, mirror: Mirror) -> Transform {
        let mut t = Transform::rotate(to_rad(self.angle_sign * at.angle));
        match mirror {
            Mirror::None => {}
            Mirror::X => t = t.then(&Transform::MIRROR_X),
            Mirror::Y => t = t.then(&Transform::MIRROR_Y),
        }
        t.then(&Transform::translate(at.x, at.y))
    }

    /// Frame of a placed symbol's library graphics.
    ///
    /// Library symbols are drawn y-up, so the placement is preceded by a flip
    /// across the x axis and angles inside count with a positive sign.
    pub fn symbol_frame(&self, at: &Position, mirror: Mirror) -> CoordinateSystem {
        let placement = self.placement_transform(at, mirror);
        self.child(Some(&Transform::MIRROR_X.then(&placement)))
            .with_angle_sign(1.0)
    }
}

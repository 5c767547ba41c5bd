//! Text justification resolver.
//!
//! KiCad stores justification as flags relative to the text's own rotated
//! frame. SVG wants `text-anchor` / `dominant-baseline` relative to the
//! rotated glyph run on screen. The resolver turns the flags into a direction
//! vector, pushes that vector through the active transform and reads the
//! anchor keywords off the angle between the vector and the output text
//! rotation.

use std::fmt;

use crate::transform::Transform;
use crate::types::{Point, dvec2, normalize_angle, to_deg, to_rad};

/// Anchor directions shorter than this count as "no justification".
const DIRECTION_EPSILON: f64 = 1e-12;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JustifyFlag {
    Left,
    Right,
    Top,
    Bottom,
    Mirror,
}

/// SVG `text-anchor`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAnchor {
    Start,
    #[default]
    Middle,
    End,
}

impl HorizontalAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            HorizontalAnchor::Start => "start",
            HorizontalAnchor::Middle => "middle",
            HorizontalAnchor::End => "end",
        }
    }
}

/// SVG `dominant-baseline`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerticalAnchor {
    Hanging,
    #[default]
    Middle,
    Baseline,
}

impl VerticalAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            VerticalAnchor::Hanging => "hanging",
            VerticalAnchor::Middle => "middle",
            VerticalAnchor::Baseline => "baseline",
        }
    }
}

/// Resolved screen-space anchoring of one text element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Justification {
    pub horizontal: HorizontalAnchor,
    pub vertical: VerticalAnchor,
}

impl fmt::Display for Justification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.horizontal.as_str(), self.vertical.as_str())
    }
}

/// Direction from the anchor towards the side the text is on, in the text's
/// local (unrotated) frame.
///
/// `text_angle` is expected in `[0, 180)`. Only near-vertical text
/// (`45 < angle < 135`) re-orients the direction itself.
pub fn anchor_direction(text_angle: f64, flags: &[JustifyFlag], angle_sign: f64) -> Point {
    let mut x = 0.0;
    let mut y = 0.0;
    for flag in flags {
        match flag {
            JustifyFlag::Left => x = 1.0,
            JustifyFlag::Right => x = -1.0,
            JustifyFlag::Top => y = -angle_sign,
            JustifyFlag::Bottom => y = angle_sign,
            JustifyFlag::Mirror => {}
        }
    }

    let dir = dvec2(x, y);
    if text_angle > 45.0 && text_angle < 135.0 {
        Transform::rotate(to_rad(text_angle) * angle_sign).apply_direction(dir)
    } else {
        dir
    }
}

/// [`anchor_direction`] mapped into output space.
pub fn global_anchor_direction(
    local_text_angle: f64,
    flags: &[JustifyFlag],
    transform: &Transform,
    angle_sign: f64,
) -> Point {
    let local = anchor_direction(normalize_angle(local_text_angle, 180.0), flags, angle_sign);
    transform.apply_direction(local)
}

/// Bin the anchor direction, relative to the output text rotation, into
/// anchor keywords.
///
/// `text_angle` is the SVG rotation of the text in degrees and
/// `direction` the anchor direction in SVG space.
pub fn justification_for(text_angle: f64, direction: Point) -> Justification {
    let mut justification = Justification::default();
    if direction.x.abs() <= DIRECTION_EPSILON && direction.y.abs() <= DIRECTION_EPSILON {
        return justification;
    }

    let angle = normalize_angle(to_deg(direction.y.atan2(direction.x)) - text_angle, 360.0);

    if (22.5..157.5).contains(&angle) {
        justification.vertical = VerticalAnchor::Hanging;
    } else if (202.5..337.5).contains(&angle) {
        justification.vertical = VerticalAnchor::Baseline;
    }

    if angle < 67.5 || angle > 292.5 {
        justification.horizontal = HorizontalAnchor::Start;
    } else if (112.5..=247.5).contains(&angle) {
        justification.horizontal = HorizontalAnchor::End;
    }

    justification
}

/// Full resolution for a text stored at `local_text_angle` with `flags`,
/// drawn through `transform`.
///
/// `angle_sign` is the context's own sign, not the effective one: the
/// transform's orientation is folded in here.
pub fn resolve(
    local_text_angle: f64,
    flags: &[JustifyFlag],
    transform: &Transform,
    angle_sign: f64,
) -> Justification {
    let direction = global_anchor_direction(local_text_angle, flags, transform, angle_sign);
    let text_angle = output_text_angle(local_text_angle, transform, angle_sign);
    justification_for(text_angle, direction)
}

/// Output rotation of a text stored at `local_text_angle`, folded into
/// `(-180, 0]` so it never renders upside down.
pub fn output_text_angle(local_text_angle: f64, transform: &Transform, angle_sign: f64) -> f64 {
    let angle =
        angle_sign * transform.angle_direction() * local_text_angle + transform.rotation_degrees();
    normalize_angle(angle, -180.0)
}

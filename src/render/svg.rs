//! SVG element helpers and debug overlays

use svg::Node;
use svg::node::element::{Circle, Group, Path, Rectangle, Text};

use crate::types::{Point, dvec2, fmt_num};

use super::context::RenderContext;
use super::defaults;
use super::geometry::PathData;
use super::hooks::Attributes;

/// Boxed SVG node, the unit every render function produces.
pub type SvgNode = Box<dyn Node>;

/// Bulk attribute setting for the element types we emit.
pub trait SetAttributes: Sized {
    fn set_all(self, attributes: &[(String, String)]) -> Self;
}

macro_rules! impl_set_attributes {
    ($($element:ty),* $(,)?) => {
        $(
            impl SetAttributes for $element {
                fn set_all(self, attributes: &[(String, String)]) -> Self {
                    attributes
                        .iter()
                        .fold(self, |el, (name, value)| el.set(name.as_str(), value.as_str()))
                }
            }
        )*
    };
}

impl_set_attributes!(Circle, Group, Path, Rectangle, Text);

/// `<g>` with the given class (omitted when empty), attributes and children.
pub fn group(class: &str, attributes: &Attributes, children: Vec<SvgNode>) -> Group {
    let mut group = Group::new();
    if !class.is_empty() {
        group = group.set("class", class);
    }
    children
        .into_iter()
        .fold(group.set_all(attributes), |g, child| g.add(child))
}

/// Straight debug line from `from` to `to`.
pub fn debug_line(from: Point, to: Point, color: &str) -> Path {
    Path::new()
        .set("d", PathData::new().m(from.x, from.y).l(to.x, to.y))
        .set("stroke", color)
        .set("stroke-width", fmt_num(defaults::DEBUG_STROKE_WIDTH))
        .set("fill", "transparent")
}

/// Axes of the context's coordinate system at its origin: x red, y green,
/// with a caption listing the rotation and the angle signs.
pub fn coordinate_system_overlay(ctx: &RenderContext<'_>) -> Vec<SvgNode> {
    let origin = ctx.point(dvec2(0.0, 0.0));
    let x = ctx.point(dvec2(defaults::DEBUG_AXIS_LENGTH, 0.0));
    let y = ctx.point(dvec2(0.0, defaults::DEBUG_AXIS_LENGTH));
    let caption_at = ctx.point(dvec2(
        defaults::DEBUG_ANCHOR_LENGTH,
        defaults::DEBUG_ANCHOR_LENGTH,
    ));
    let angle = ctx.cs.angle(0.0);

    ctx.update_bounds(origin);
    ctx.update_bounds(x);
    ctx.update_bounds(y);

    let caption = format!(
        "{:.1}°, {}/{}/{}",
        angle,
        fmt_num(ctx.cs.angle_sign()),
        fmt_num(ctx.cs.effective_angle_sign()),
        fmt_num(ctx.cs.text_angle_multiplier())
    );
    let text = Text::new()
        .set("x", fmt_num(caption_at.x))
        .set("y", fmt_num(caption_at.y))
        .set(
            "transform",
            format!(
                "rotate({}, {}, {})",
                fmt_num(angle),
                fmt_num(caption_at.x),
                fmt_num(caption_at.y)
            ),
        )
        .set("text-anchor", "start")
        .set("dominant-baseline", "baseline")
        .set("font-size", "2")
        .set("fill", "orange")
        .add(svg::node::Text::new(caption));

    vec![
        Box::new(debug_line(origin, x, "red")),
        Box::new(debug_line(origin, y, "green")),
        Box::new(text),
    ]
}

/// Whether `svg` has an element whose whole text content is `text`.
#[cfg(test)]
pub(crate) fn has_text(svg: &str, text: &str) -> bool {
    regex_lite::Regex::new(&format!(r">\s*{}\s*<", regex_lite::escape(text)))
        .map(|re| re.is_match(svg))
        .unwrap_or(false)
}

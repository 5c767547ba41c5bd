//! Text elements
//!
//! A text is anchored at a point of one coordinate system but may take its
//! rotation and justification from another: symbol properties sit in sheet
//! coordinates yet turn with their symbol, pin numbers turn with the sheet.

use svg::node::element::Text as SvgText;

use crate::coords::CoordinateSystem;
use crate::justify::JustifyFlag;
use crate::schematic::{Effects, PositionedText};
use crate::types::fmt_num;

use super::context::RenderContext;
use super::defaults;
use super::hooks::Attributes;
use super::svg::{SetAttributes, SvgNode, debug_line};

/// Per-call extras for [`render_text`].
#[derive(Clone, Debug, Default)]
pub struct TextOptions {
    pub classes: Vec<String>,
    pub attributes: Attributes,
    /// Justification used when the text's effects carry none
    pub default_justify: Vec<JustifyFlag>,
}

/// Draw a positioned text.
///
/// `rotation` supplies angle and justification; `None` uses the context's
/// own system. Hidden texts come out invisible, or not at all when the
/// configuration says so.
pub fn render_text(
    text: &PositionedText,
    ctx: &RenderContext<'_>,
    rotation: Option<&CoordinateSystem>,
    options: &TextOptions,
) -> Vec<SvgNode> {
    let effects = text.effects.clone().unwrap_or_default();
    if effects.hide && !ctx.config.create_hidden_texts {
        return Vec::new();
    }

    let rotation = rotation.unwrap_or(&ctx.cs);
    let justify = justify_flags(&effects, &options.default_justify);
    let anchor = ctx.point(text.at.point());
    let angle = rotation.text_angle(text.at.angle);
    let justification = rotation.text_justify(&text.at, justify);

    // bounds track the anchor only, text extent is unknown without font metrics
    ctx.update_bounds(anchor);

    let mut element = SvgText::new()
        .set("class", ctx.class_attr(&options.classes))
        .set_all(&options.attributes)
        .set("x", fmt_num(anchor.x))
        .set("y", fmt_num(anchor.y))
        .set(
            "transform",
            format!(
                "rotate({}, {}, {})",
                fmt_num(angle),
                fmt_num(anchor.x),
                fmt_num(anchor.y)
            ),
        )
        .set("text-anchor", justification.horizontal.as_str())
        .set("dominant-baseline", justification.vertical.as_str())
        .set("font-size", fmt_num(effects.font_size.height));
    if effects.hide {
        element = element.set("visibility", "hidden");
    }
    let element = element.add(svg::node::Text::new(text.text.clone()));

    let mut nodes: Vec<SvgNode> = vec![Box::new(element)];
    if ctx.config.debug.text_anchor {
        let direction = ctx.cs.text_anchor_direction(&text.at, justify);
        let tip = anchor + direction * defaults::DEBUG_ANCHOR_LENGTH;
        nodes.push(Box::new(debug_line(anchor, tip, "yellow")));
    }
    nodes
}

fn justify_flags<'e>(effects: &'e Effects, fallback: &'e [JustifyFlag]) -> &'e [JustifyFlag] {
    if effects.justify.is_empty() {
        fallback
    } else {
        &effects.justify
    }
}

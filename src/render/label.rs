//! Net labels as sheet text

use crate::schematic::Label;

use super::context::RenderContext;
use super::svg::SvgNode;
use super::text::{TextOptions, render_text};

pub fn render_label(label: &Label, ctx: &RenderContext<'_>) -> Vec<SvgNode> {
    let label_ctx = ctx.with_classes([ctx.config.classes.label.as_str()]);
    render_text(
        &label.positioned_text(),
        &label_ctx,
        None,
        &TextOptions::default(),
    )
}

//! Placed symbols
//!
//! Library graphics are drawn in the symbol's own frame with the placement
//! translation left to a group transform, so their bounds are collected in
//! an isolated accumulator, moved to the symbol origin and merged into the
//! sheet afterwards. Properties are drawn straight in sheet coordinates.

use svg::node::element::{Group, Rectangle};

use crate::errors::RenderWarning;
use crate::schematic::{Position, PositionedText, Symbol};
use crate::symbol_index::SymbolIndex;
use crate::types::fmt_num;

use super::context::RenderContext;
use super::defaults;
use super::hooks::RenderHooks;
use super::pin::{PinTextSettings, render_pin};
use super::shapes::{Layers, render_section};
use super::svg::{SvgNode, group};
use super::text::{TextOptions, render_text};

/// Draw one placed symbol into the sheet context `ctx`.
///
/// A symbol without library graphics still gets its group and properties;
/// the miss is reported through `warnings`.
pub fn render_symbol(
    symbol: &Symbol,
    index: &SymbolIndex<'_>,
    hooks: &dyn RenderHooks,
    ctx: &RenderContext<'_>,
    warnings: &mut Vec<RenderWarning>,
) -> Group {
    let classes = &ctx.config.classes;
    let origin = ctx.point(symbol.at.point());

    let frame = ctx
        .cs
        .symbol_frame(&Position::new(0.0, 0.0, symbol.at.angle), symbol.mirror);
    let symbol_ctx = ctx.with_cs(frame).isolated();
    let graphics_ctx = symbol_ctx.with_cs(
        symbol_ctx
            .cs
            .with_text_angle_multiplier(defaults::SYMBOL_TEXT_ANGLE_MULTIPLIER),
    );

    let lib_symbols = index.symbols_for(symbol);
    if lib_symbols.is_empty() {
        crate::log::warn!(lib_id = %symbol.lib_id, unit = ?symbol.unit, "no library symbol");
        warnings.push(RenderWarning::MissingLibrarySymbol {
            lib_id: symbol.lib_id.clone(),
            unit: symbol.unit,
        });
    }

    let mut layers = Layers::new();
    let mut pins: Vec<SvgNode> = Vec::new();
    if let Some(root) = lib_symbols.first() {
        for unit in &lib_symbols {
            render_section(&unit.graphics, &graphics_ctx, &mut layers);
            let settings = PinTextSettings::resolve(unit, root);
            for pin in unit.pins.iter().filter(|p| !p.hide) {
                pins.extend(render_pin(pin, &settings, &graphics_ctx));
            }
        }
    }

    let mut graphics = layers.into_nodes();
    graphics.extend(pins);

    let local_bounds = symbol_ctx.bounds();
    if ctx.config.create_bounds && !local_bounds.is_empty() {
        let (x, y, w, h) = local_bounds.to_rect();
        graphics.push(Box::new(
            Rectangle::new()
                .set("class", classes.bounds.as_str())
                .set("x", fmt_num(x))
                .set("y", fmt_num(y))
                .set("width", fmt_num(w))
                .set("height", fmt_num(h))
                .set("visibility", "hidden"),
        ));
    }
    let graphics = group(
        &classes.symbol_graphics,
        &vec![(
            "transform".to_string(),
            format!("translate({} {})", fmt_num(origin.x), fmt_num(origin.y)),
        )],
        graphics,
    );

    symbol_ctx.translate_bounds(origin);
    ctx.merge_bounds(&symbol_ctx.bounds());
    crate::log::debug!(
        lib_id = %symbol.lib_id,
        x = origin.x,
        y = origin.y,
        units = lib_symbols.len(),
        "placed symbol"
    );

    let mut children: Vec<SvgNode> = vec![Box::new(graphics)];

    // sheet position, symbol rotation
    let property_ctx = ctx.with_classes([classes.property.as_str()]);
    for property in &symbol.properties {
        let text = PositionedText {
            text: hooks
                .property_text(symbol, property)
                .unwrap_or_else(|| property.value.clone()),
            at: property.at,
            effects: property.effects.clone(),
        };
        let options = TextOptions {
            classes: hooks.property_classes(symbol, property),
            attributes: hooks.property_attributes(symbol, property),
            ..TextOptions::default()
        };
        children.extend(render_text(&text, &property_ctx, Some(&symbol_ctx.cs), &options));
    }

    children.extend(hooks.symbol_extra_elements(symbol));

    let mut outer_classes = vec![classes.symbol.clone()];
    outer_classes.extend(hooks.symbol_classes(symbol));
    group(
        &ctx.class_attr(&outer_classes),
        &hooks.symbol_attributes(symbol),
        children,
    )
}

//! Library pins: line, graphic style, name and number

use crate::justify::JustifyFlag;
use crate::schematic::{
    Circle, GraphicalSection, LibSymbol, Pin, PinGraphicStyle, PolyLine, Position,
    PositionedText, Shape, ShapeStyle,
};
use crate::transform::Transform;
use crate::types::{dvec2, normalize_angle};

use super::context::RenderContext;
use super::defaults::{self, MIL_25, MIL_50};
use super::shapes::{Layers, render_section};
use super::svg::SvgNode;
use super::text::{TextOptions, render_text};

/// Pin name/number settings of a library unit, falling back to its root
/// symbol.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinTextSettings {
    pub name_offset: f64,
    pub hide_names: bool,
    pub hide_numbers: bool,
}

impl Default for PinTextSettings {
    fn default() -> Self {
        PinTextSettings {
            name_offset: defaults::PIN_NAME_OFFSET,
            hide_names: false,
            hide_numbers: false,
        }
    }
}

impl PinTextSettings {
    pub fn resolve(unit: &LibSymbol, root: &LibSymbol) -> Self {
        let names = unit.pin_names.or(root.pin_names);
        let numbers = unit.pin_numbers.or(root.pin_numbers);
        PinTextSettings {
            name_offset: unit
                .pin_names
                .and_then(|n| n.offset)
                .or_else(|| root.pin_names.and_then(|n| n.offset))
                .unwrap_or(defaults::PIN_NAME_OFFSET),
            hide_names: names.is_some_and(|n| n.hide),
            hide_numbers: numbers.is_some_and(|n| n.hide),
        }
    }
}

/// Space kept free between the pin line and the body for a graphic style,
/// and the shapes drawn there. Shapes are relative to the body end of the
/// pin, with the pin line running along negative x.
fn style_graphics(style: PinGraphicStyle) -> (f64, Vec<Shape>) {
    let bubble = || -> Shape {
        Circle {
            center: dvec2(-MIL_25, 0.0),
            radius: MIL_25,
            style: ShapeStyle::default(),
        }
        .into()
    };
    let clock = || -> Shape {
        PolyLine::new(vec![
            dvec2(0.0, -MIL_50),
            dvec2(MIL_50, 0.0),
            dvec2(0.0, MIL_50),
        ])
        .into()
    };

    match style {
        PinGraphicStyle::Inverted => (MIL_50, vec![bubble()]),
        PinGraphicStyle::Clock => (0.0, vec![clock()]),
        PinGraphicStyle::InvertedClock => (MIL_50, vec![bubble(), clock()]),
        PinGraphicStyle::NonLogic => (
            0.0,
            vec![
                PolyLine::new(vec![dvec2(-MIL_25, -MIL_50), dvec2(MIL_25, MIL_25)]).into(),
                PolyLine::new(vec![dvec2(-MIL_25, MIL_50), dvec2(MIL_25, -MIL_25)]).into(),
            ],
        ),
        // KiCad's remaining styles are drawn as a plain line
        PinGraphicStyle::Line
        | PinGraphicStyle::InputLow
        | PinGraphicStyle::ClockLow
        | PinGraphicStyle::OutputLow
        | PinGraphicStyle::EdgeClockHigh => (0.0, Vec::new()),
    }
}

/// Graphics of a pin: its line up to the style's clearance, then the style.
pub fn pin_graphics(pin: &Pin) -> GraphicalSection {
    let (clearance, style_shapes) = style_graphics(pin.graphic_style);
    let mut shapes = Vec::with_capacity(style_shapes.len() + 1);
    if pin.length > clearance {
        shapes.push(PolyLine::new(vec![dvec2(-pin.length, 0.0), dvec2(-clearance, 0.0)]).into());
    }
    shapes.extend(style_shapes);
    GraphicalSection {
        shapes,
        texts: Vec::new(),
    }
}

/// Draw a pin inside its symbol's graphics context.
pub fn render_pin(pin: &Pin, settings: &PinTextSettings, ctx: &RenderContext<'_>) -> Vec<SvgNode> {
    let placement = ctx.cs.placement_transform(&pin.at, Default::default());
    let pin_ctx = ctx
        .child(Some(&placement))
        .with_classes([ctx.config.classes.pin.as_str()]);

    let graphics_ctx = pin_ctx.child(Some(&Transform::translate(pin.length, 0.0)));
    let mut layers = Layers::new();
    render_section(&pin_graphics(pin), &graphics_ctx, &mut layers);
    let mut nodes = layers.into_nodes();

    if !settings.hide_names && pin.name.text != "~" {
        nodes.extend(render_pin_name(pin, settings.name_offset, &pin_ctx));
    }
    if !settings.hide_numbers && pin.number.text != "~" {
        nodes.extend(render_pin_number(pin, &pin_ctx));
    }
    nodes
}

fn render_pin_name(pin: &Pin, offset: f64, pin_ctx: &RenderContext<'_>) -> Vec<SvgNode> {
    let text = PositionedText {
        text: pin.name.text.clone(),
        at: Position::new(pin.length + offset, 0.0, 0.0),
        effects: pin.name.effects.clone(),
    };
    let options = TextOptions {
        classes: vec![pin_ctx.config.classes.pin_name.clone()],
        default_justify: vec![JustifyFlag::Left],
        ..TextOptions::default()
    };
    render_text(&text, pin_ctx, None, &options)
}

/// Pin numbers sit centred on the pin line and turn with the sheet, not
/// with the symbol, so they always read left-to-right or bottom-to-top.
fn render_pin_number(pin: &Pin, pin_ctx: &RenderContext<'_>) -> Vec<SvgNode> {
    let root = *pin_ctx.root();

    // pin direction on screen, in [0, -360)
    let pin_angle = normalize_angle(pin_ctx.cs.angle(0.0), -360.0);
    let number_angle = normalize_angle(pin_angle, 180.0) * root.effective_angle_sign()
        / root.text_angle_multiplier();
    // pins pointing left get their number on the other side
    let flip = pin_angle <= -179.0;
    let side = if flip { 1.0 } else { -1.0 };
    let offset = side
        * pin_ctx.cs.transform().angle_direction()
        * defaults::PIN_NUMBER_OFFSET;

    let text = PositionedText {
        text: pin.number.text.clone(),
        at: Position::new(pin.length / 2.0, offset, number_angle),
        effects: pin.number.effects.clone(),
    };
    let options = TextOptions {
        classes: vec![pin_ctx.config.classes.pin_number.clone()],
        default_justify: vec![JustifyFlag::Bottom],
        ..TextOptions::default()
    };
    render_text(&text, pin_ctx, Some(&root), &options)
}

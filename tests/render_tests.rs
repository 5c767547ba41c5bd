//! Rendering of hand-built sheets, checked on the SVG text.

use kisvg::render::geometry::{ArcFit, fit_arc};
use kisvg::render::hooks::Attributes;
use kisvg::render::shapes::{Layers, Primitive};
use kisvg::render::{RenderContext, RenderHooks};
use kisvg::{
    Arc, CoordinateSystem, Effects, Junction, JustifyFlag, Label, LibSymbol, Mirror, Net, Pin,
    Position, Property, RenderConfig, RenderWarning, Rectangle, Schematic, SchematicData,
    SchematicRenderer, Shape, ShapeStyle, Symbol, Text, Wire, dvec2, render_schematic,
};
use regex_lite::Regex;

/// All start tags of `tag` elements.
fn tags<'a>(svg: &'a str, tag: &str) -> Vec<&'a str> {
    let re = Regex::new(&format!(r"<{tag}\b[^>]*>")).expect("valid regex");
    re.find_iter(svg).map(|m| m.as_str()).collect()
}

fn attr(tag: &str, name: &str) -> Option<String> {
    let re = Regex::new(&format!(r#"\s{name}="([^"]*)""#)).expect("valid regex");
    re.captures(tag).map(|c| c[1].to_string())
}

/// Start tag of the `text` element holding exactly `content`.
fn text_tag<'a>(svg: &'a str, content: &str) -> Option<&'a str> {
    let re = Regex::new(&format!(
        r"<text\b[^>]*>\s*{}\s*</text>",
        regex_lite::escape(content)
    ))
    .expect("valid regex");
    let element = re.find(svg)?.as_str();
    element.find('>').map(|end| &element[..=end])
}

fn square() -> Shape {
    Rectangle {
        start: dvec2(-5.0, -5.0),
        end: dvec2(5.0, 5.0),
        style: ShapeStyle::default(),
    }
    .into()
}

fn resistor_library() -> LibSymbol {
    let mut root = LibSymbol::new("Device:R");
    let mut body = LibSymbol::new("R_0_1");
    body.graphics.shapes.push(
        Rectangle {
            start: dvec2(-1.016, 2.54),
            end: dvec2(1.016, -2.54),
            style: ShapeStyle::default(),
        }
        .into(),
    );
    let mut pins = LibSymbol::new("R_1_1");
    pins.pins = vec![
        Pin {
            at: Position::new(0.0, 3.81, 270.0),
            length: 1.27,
            name: Text::new("~"),
            number: Text::new("1"),
            ..Pin::default()
        },
        Pin {
            at: Position::new(0.0, -3.81, 90.0),
            length: 1.27,
            name: Text::new("~"),
            number: Text::new("2"),
            ..Pin::default()
        },
    ];
    root.units = vec![body, pins];
    root
}

fn property(key: &str, value: &str, at: Position) -> Property {
    Property {
        key: key.into(),
        value: value.into(),
        at,
        ..Property::default()
    }
}

fn divider_sheet() -> Schematic {
    let mut footprint = property("Footprint", "R_0603", Position::at(12.0, 12.0));
    footprint.effects = Some(Effects {
        hide: true,
        ..Effects::default()
    });
    Schematic {
        lib_symbols: vec![resistor_library()],
        symbols: vec![Symbol {
            lib_id: "Device:R".into(),
            at: Position::at(20.0, 20.0),
            unit: Some(1),
            uuid: "r1".into(),
            properties: vec![
                property("Reference", "R1", Position::at(22.0, 19.0)),
                property("Value", "10k", Position::at(22.0, 21.0)),
                footprint,
            ],
            ..Symbol::default()
        }],
        wires: vec![
            Wire::new("w-top", dvec2(20.0, 10.0), dvec2(20.0, 16.19)),
            Wire::new("w-bottom", dvec2(20.0, 23.81), dvec2(20.0, 30.0)),
            Wire::new("w-branch", dvec2(20.0, 30.0), dvec2(30.0, 30.0)),
        ],
        junctions: vec![Junction::new("j1", dvec2(20.0, 30.0))],
        labels: vec![Label::new("l1", "VIN", Position::at(20.0, 10.0))],
        global_labels: vec![Label::new("l2", "Net:OUT", Position::at(30.0, 30.0))],
        ..Schematic::default()
    }
}

#[test]
fn square_bounds_before_and_after_padding() {
    let config = RenderConfig::default();
    let ctx = RenderContext::new(&config, CoordinateSystem::default());
    let mut layers = Layers::new();
    square().render(&ctx, &mut layers);
    assert_eq!(ctx.bounds().to_rect(), (-5.0, -5.0, 10.0, 10.0));

    let sheet = Schematic {
        graphics: kisvg::GraphicalSection {
            shapes: vec![square()],
            texts: Vec::new(),
        },
        ..Schematic::default()
    };
    let rendering = render_schematic(&sheet).expect("renders");
    assert_eq!(rendering.bounds.to_rect(), (-15.0, -15.0, 30.0, 30.0));
    let svg = rendering.to_svg_string();
    let view_box = attr(tags(&svg, "svg")[0], "viewBox").unwrap_or_default();
    insta::assert_snapshot!(view_box.as_str(), @"-15 -15 30 30");
}

#[test]
fn semicircle_arc_fit() {
    match fit_arc(dvec2(0.0, 0.0), dvec2(1.0, 1.0), dvec2(2.0, 0.0)) {
        ArcFit::Circle {
            radius, large_arc, ..
        } => {
            assert!((radius - 1.0).abs() < 1e-9);
            assert!(!large_arc);
        }
        ArcFit::Line => panic!("semicircle fitted as a line"),
    }

    let sheet = Schematic {
        graphics: kisvg::GraphicalSection {
            shapes: vec![
                Arc {
                    start: dvec2(0.0, 0.0),
                    mid: dvec2(1.0, 1.0),
                    end: dvec2(2.0, 0.0),
                    style: ShapeStyle::default(),
                }
                .into(),
            ],
            texts: Vec::new(),
        },
        ..Schematic::default()
    };
    let svg = render_schematic(&sheet).expect("renders").to_svg_string();
    let d = attr(tags(&svg, "path")[0], "d").expect("path data");
    insta::assert_snapshot!(d.as_str(), @"M 0 0 A 1 1 0 0 0 2 0");
    let re = Regex::new(r"^M 0 0 A ([\d.]+) ([\d.]+) 0 ([01]) ([01]) 2 0$").expect("valid regex");
    let caps = re.captures(&d).expect("arc command");
    assert_eq!(&caps[1], "1");
    assert_eq!(&caps[3], "0", "large arc flag");
}

#[test]
fn collinear_arc_is_a_line() {
    let sheet = Schematic {
        graphics: kisvg::GraphicalSection {
            shapes: vec![
                Arc {
                    start: dvec2(0.0, 0.0),
                    mid: dvec2(1.0, 0.0),
                    end: dvec2(2.0, 0.0),
                    style: ShapeStyle::default(),
                }
                .into(),
            ],
            texts: Vec::new(),
        },
        ..Schematic::default()
    };
    let svg = render_schematic(&sheet).expect("renders").to_svg_string();
    let d = attr(tags(&svg, "path")[0], "d").unwrap_or_default();
    insta::assert_snapshot!(d.as_str(), @"M 0 0 L 2 0");
    assert!(!svg.contains("NaN"));
}

#[test]
fn empty_sheet_gets_padded_origin() {
    let schematic = Schematic::default();
    let rendering = render_schematic(&schematic).expect("renders");
    assert_eq!(rendering.bounds.to_rect(), (-10.0, -10.0, 20.0, 20.0));
    assert!(rendering.nets.is_empty());
    assert!(rendering.warnings.is_empty());
}

#[test]
fn full_sheet() {
    let sheet = divider_sheet();
    let rendering = render_schematic(&sheet).expect("renders");
    assert!(rendering.warnings.is_empty(), "{:?}", rendering.warnings);
    let svg = rendering.to_svg_string();
    assert!(!svg.contains("NaN"), "{svg}");

    let root = tags(&svg, "svg")[0];
    assert_eq!(attr(root, "class").as_deref(), Some("pnid-diagram"));

    // one symbol group, translated to the placement point
    let groups = tags(&svg, "g");
    let symbol_groups: Vec<_> = groups
        .iter()
        .filter(|g| attr(g, "class").as_deref() == Some("pnid-symbol"))
        .collect();
    assert_eq!(symbol_groups.len(), 1);
    assert!(groups.iter().any(|g| {
        attr(g, "class").as_deref() == Some("pnid-symbol-graphics")
            && attr(g, "transform").as_deref() == Some("translate(20 20)")
    }));

    // properties, the hidden one included but invisible
    let texts = tags(&svg, "text");
    let properties: Vec<_> = texts
        .iter()
        .filter(|t| attr(t, "class").as_deref() == Some("pnid-property"))
        .collect();
    assert_eq!(properties.len(), 3);
    assert_eq!(
        properties
            .iter()
            .filter(|t| attr(t, "visibility").as_deref() == Some("hidden"))
            .count(),
        1
    );

    // w-top and w-bottom end on the pins, branch and junction join w-bottom
    assert_eq!(rendering.nets.len(), 2);
    let vin = rendering
        .nets
        .iter()
        .find(|n| n.name == Some("VIN"))
        .expect("VIN net");
    assert!(vin.connects_pin("R1", "1"));
    let out = rendering
        .nets
        .iter()
        .find(|n| n.name == Some("Net:OUT"))
        .expect("OUT net");
    assert!(out.connects_pin("R1", "2"));
    assert!(out.contains_wire("w-branch"));
    assert!(out.contains_junction("j1"));

    let net_classes: Vec<_> = groups
        .iter()
        .filter_map(|g| attr(g, "class"))
        .filter(|c| c.starts_with("pnid-wire"))
        .collect();
    assert!(net_classes.contains(&"pnid-wire VIN".to_string()), "{net_classes:?}");
    assert!(net_classes.contains(&"pnid-wire Net-OUT".to_string()), "{net_classes:?}");

    let junction = tags(&svg, "circle")
        .into_iter()
        .find(|c| attr(c, "class").as_deref() == Some("pnid-wire"))
        .expect("junction dot");
    assert_eq!(attr(junction, "cx").as_deref(), Some("20"));
    assert_eq!(attr(junction, "cy").as_deref(), Some("30"));

    let labels = texts
        .iter()
        .filter(|t| attr(t, "class").as_deref() == Some("pnid-label"))
        .count();
    assert_eq!(labels, 2);

    // every wire end is inside the view box
    let (x, y, w, h) = rendering.bounds.to_rect();
    assert!(x <= 20.0 && y <= 10.0);
    assert!(x + w >= 30.0 && y + h >= 30.0);
}

fn turned_divider(angle: f64, mirror: Mirror) -> Schematic {
    let mut sheet = divider_sheet();
    let symbol = &mut sheet.symbols[0];
    symbol.at = Position::new(20.0, 20.0, angle);
    symbol.mirror = mirror;
    symbol.properties[0].effects = Some(Effects::justified(vec![JustifyFlag::Left]));
    sheet
}

fn body_rect(svg: &str) -> Vec<Option<String>> {
    let rect = tags(svg, "rect")
        .into_iter()
        .find(|r| attr(r, "class").as_deref() == Some("pnid-graphics"))
        .expect("body rect");
    ["x", "y", "width", "height"]
        .iter()
        .map(|name| attr(rect, name))
        .collect()
}

fn reference_text(svg: &str) -> &str {
    text_tag(svg, "R1").expect("reference text")
}

#[test]
fn quarter_turn_symbol() {
    let schematic = turned_divider(90.0, Mirror::None);
    let rendering = render_schematic(&schematic).expect("renders");
    let svg = rendering.to_svg_string();
    assert!(!Regex::new(r"\d{12,}").expect("valid regex").is_match(&svg), "{svg}");

    // library y-up body, turned counter-clockwise: lies flat
    let expected = ["-2.54", "-1.016", "5.08", "2.032"].map(|v| Some(v.to_string()));
    assert_eq!(body_rect(&svg), expected);
    assert!(tags(&svg, "g").iter().any(|g| {
        attr(g, "class").as_deref() == Some("pnid-symbol-graphics")
            && attr(g, "transform").as_deref() == Some("translate(20 20)")
    }));

    // pin 1 moves from the top to the left and its line runs horizontally
    assert!(svg.contains(r#"d="M -3.81 0 L -2.54 0""#), "{svg}");

    // pin numbers turn with the sheet, so a horizontal pin reads upright
    let number = text_tag(&svg, "1").expect("pin number");
    assert_eq!(attr(number, "class").as_deref(), Some("pnid-pin pnid-pin-number"));
    assert_eq!(attr(number, "x").as_deref(), Some("-3.175"));
    assert_eq!(attr(number, "y").as_deref(), Some("-0.254"));
    assert_eq!(
        attr(number, "transform").as_deref(),
        Some("rotate(0, -3.175, -0.254)")
    );
    assert_eq!(attr(number, "text-anchor").as_deref(), Some("middle"));
    assert_eq!(attr(number, "dominant-baseline").as_deref(), Some("baseline"));

    // properties stay at their sheet position but turn with the symbol
    let reference = reference_text(&svg);
    assert_eq!(
        attr(reference, "transform").as_deref(),
        Some("rotate(-90, 22, 19)")
    );
    assert_eq!(attr(reference, "text-anchor").as_deref(), Some("start"));
    let value = text_tag(&svg, "10k").expect("value text");
    assert_eq!(attr(value, "text-anchor").as_deref(), Some("middle"));
}

#[test]
fn mirrored_symbol() {
    let schematic = turned_divider(0.0, Mirror::X);
    let rendering = render_schematic(&schematic).expect("renders");
    let svg = rendering.to_svg_string();
    assert!(!Regex::new(r"\d{12,}").expect("valid regex").is_match(&svg), "{svg}");

    let expected = ["-1.016", "-2.54", "2.032", "5.08"].map(|v| Some(v.to_string()));
    assert_eq!(body_rect(&svg), expected);

    // pin 1 is now below the body
    assert!(svg.contains(r#"d="M 0 3.81 L 0 2.54""#), "{svg}");
    let number = text_tag(&svg, "1").expect("pin number");
    assert_eq!(attr(number, "x").as_deref(), Some("-0.254"));
    assert_eq!(attr(number, "y").as_deref(), Some("3.175"));
    assert_eq!(
        attr(number, "transform").as_deref(),
        Some("rotate(-90, -0.254, 3.175)")
    );
    assert_eq!(attr(number, "text-anchor").as_deref(), Some("middle"));
    assert_eq!(attr(number, "dominant-baseline").as_deref(), Some("baseline"));

    let reference = reference_text(&svg);
    assert_eq!(
        attr(reference, "transform").as_deref(),
        Some("rotate(0, 22, 19)")
    );
    assert_eq!(attr(reference, "text-anchor").as_deref(), Some("start"));

    // and the nets follow the swapped pins
    let vin = rendering
        .nets
        .iter()
        .find(|n| n.name == Some("VIN"))
        .expect("VIN net");
    assert!(vin.connects_pin("R1", "2"));
    let out = rendering
        .nets
        .iter()
        .find(|n| n.name == Some("Net:OUT"))
        .expect("OUT net");
    assert!(out.connects_pin("R1", "1"));
}

#[test]
fn hidden_texts_can_be_dropped() {
    let sheet = divider_sheet();
    let config = RenderConfig {
        create_hidden_texts: false,
        create_bounds: false,
        ..RenderConfig::default()
    };
    let svg = SchematicRenderer::new(config)
        .render(&sheet)
        .expect("renders")
        .to_svg_string();
    let properties = tags(&svg, "text")
        .into_iter()
        .filter(|t| attr(t, "class").as_deref() == Some("pnid-property"))
        .count();
    assert_eq!(properties, 2);
    assert!(!svg.contains("R_0603"));
    assert!(tags(&svg, "rect")
        .iter()
        .all(|r| attr(r, "class").as_deref() != Some("pnid-bounds")));
}

#[test]
fn missing_library_symbol_is_a_warning() {
    let mut sheet = divider_sheet();
    sheet.lib_symbols.clear();
    let rendering = render_schematic(&sheet).expect("renders");
    assert_eq!(
        rendering.warnings,
        vec![RenderWarning::MissingLibrarySymbol {
            lib_id: "Device:R".into(),
            unit: Some(1),
        }]
    );
    let svg = rendering.to_svg_string();
    assert_eq!(
        tags(&svg, "text")
            .iter()
            .filter(|t| attr(t, "class").as_deref() == Some("pnid-property"))
            .count(),
        3
    );
}

#[test]
fn inconsistent_library_symbol_is_reported() {
    let mut sheet = divider_sheet();
    sheet.lib_symbols[0].units[1].id = "C_1_1".into();
    let rendering = render_schematic(&sheet).expect("renders");
    assert!(rendering.warnings.iter().any(|w| matches!(
        w,
        RenderWarning::Library(kisvg::LibraryError::UnitMismatch { .. })
    )));
    assert!(rendering.warnings.iter().any(|w| matches!(
        w,
        RenderWarning::MissingLibrarySymbol { .. }
    )));
}

struct Annotate;

impl RenderHooks for Annotate {
    fn net_attributes(&self, net: &Net<'_>) -> Attributes {
        vec![("data-net".into(), net.name.unwrap_or_default().into())]
    }

    fn property_classes(&self, _symbol: &Symbol, property: &Property) -> Vec<String> {
        vec![format!("prop-{}", property.key.to_lowercase())]
    }
}

#[test]
fn hooks_reach_nets_and_properties() {
    let sheet = divider_sheet();
    let svg = SchematicRenderer::default()
        .with_hooks(Box::new(Annotate))
        .render(&sheet)
        .expect("renders")
        .to_svg_string();
    assert!(tags(&svg, "g")
        .iter()
        .any(|g| attr(g, "data-net").as_deref() == Some("VIN")));
    assert!(tags(&svg, "text")
        .iter()
        .any(|t| attr(t, "class").as_deref() == Some("pnid-property prop-value")));
}

#[test]
fn debug_overlays() {
    let sheet = divider_sheet();
    let mut config = RenderConfig::default();
    config.debug.coordinate_system = true;
    config.debug.text_anchor = true;
    let svg = SchematicRenderer::new(config)
        .render(&sheet)
        .expect("renders")
        .to_svg_string();
    let paths = tags(&svg, "path");
    assert!(paths.iter().any(|p| attr(p, "stroke").as_deref() == Some("red")));
    assert!(paths.iter().any(|p| attr(p, "stroke").as_deref() == Some("green")));
    assert!(paths.iter().any(|p| attr(p, "stroke").as_deref() == Some("yellow")));
}

#[test]
fn precomputed_data_renders_the_same_nets() {
    let sheet = divider_sheet();
    let data = SchematicData::new(&sheet);
    let renderer = SchematicRenderer::default();
    let rendering = data.render(&renderer).expect("renders");
    assert_eq!(rendering.nets, data.nets.nets);
    assert_eq!(
        rendering.to_svg_string(),
        renderer.render(&sheet).expect("renders").to_svg_string()
    );
}

#[test]
fn html_page_embeds_stylesheet() {
    let sheet = divider_sheet();
    let renderer = SchematicRenderer::default();
    let html = renderer
        .render(&sheet)
        .expect("renders")
        .to_html(&renderer.stylesheet());
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(".pnid-wire {"));
    assert!(html.contains("<svg"));
}

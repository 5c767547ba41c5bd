//! Render a small RC low-pass sheet and list its nets.
//!
//! ```text
//! RUST_LOG=kisvg=debug cargo run --example render_demo --features tracing -- --html > rc.html
//! ```

use kisvg::{
    Effects, Junction, Label, LibSymbol, Pin, Position, Property, Rectangle, RenderConfig,
    Schematic, SchematicData, SchematicRenderer, Shape, ShapeStyle, Symbol, Text, Wire, dvec2,
};

fn two_pin(id: &str, unit_prefix: &str, body: Shape) -> LibSymbol {
    let mut root = LibSymbol::new(id);
    let mut graphics = LibSymbol::new(format!("{unit_prefix}_0_1"));
    graphics.graphics.shapes.push(body);
    let mut pins = LibSymbol::new(format!("{unit_prefix}_1_1"));
    for (number, y, angle) in [("1", 3.81, 270.0), ("2", -3.81, 90.0)] {
        pins.pins.push(Pin {
            at: Position::new(0.0, y, angle),
            length: 1.27,
            name: Text::new("~"),
            number: Text::new(number),
            ..Pin::default()
        });
    }
    root.units = vec![graphics, pins];
    root
}

fn placed(lib_id: &str, reference: &str, value: &str, at: Position) -> Symbol {
    let text = |key: &str, value: &str, dy: f64| Property {
        key: key.into(),
        value: value.into(),
        at: Position::at(at.x + 2.54, at.y + dy),
        effects: Some(Effects::default()),
        ..Property::default()
    };
    Symbol {
        lib_id: lib_id.into(),
        at,
        unit: Some(1),
        uuid: format!("{reference}-uuid"),
        properties: vec![
            text("Reference", reference, -1.27),
            text("Value", value, 1.27),
        ],
        ..Symbol::default()
    }
}

fn rc_filter() -> Schematic {
    let body = |w: f64, h: f64| -> Shape {
        Rectangle {
            start: dvec2(-w / 2.0, h / 2.0),
            end: dvec2(w / 2.0, -h / 2.0),
            style: ShapeStyle::default(),
        }
        .into()
    };

    Schematic {
        lib_symbols: vec![
            two_pin("Device:R", "R", body(2.032, 5.08)),
            two_pin("Device:C", "C", body(2.032, 0.762)),
        ],
        symbols: vec![
            placed("Device:R", "R1", "10k", Position::new(30.0, 20.0, 90.0)),
            placed("Device:C", "C1", "100n", Position::at(40.0, 30.0)),
        ],
        wires: vec![
            Wire::new("w-in", dvec2(20.0, 20.0), dvec2(26.19, 20.0)),
            Wire::new("w-out", dvec2(33.81, 20.0), dvec2(50.0, 20.0)),
            Wire::new("w-cap", dvec2(40.0, 20.0), dvec2(40.0, 26.19)),
            Wire::new("w-gnd", dvec2(40.0, 33.81), dvec2(40.0, 40.0)),
        ],
        junctions: vec![Junction::new("j-out", dvec2(40.0, 20.0))],
        labels: vec![
            Label::new("l-in", "IN", Position::at(20.0, 20.0)),
            Label::new("l-out", "OUT", Position::at(50.0, 20.0)),
        ],
        global_labels: vec![Label::new("l-gnd", "GND", Position::at(40.0, 40.0))],
        ..Schematic::default()
    }
}

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let html = std::env::args().any(|arg| arg == "--html");
    let debug = std::env::args().any(|arg| arg == "--debug");

    let mut config = RenderConfig::default();
    config.debug.coordinate_system = debug;
    config.debug.text_anchor = debug;
    let renderer = SchematicRenderer::new(config);

    let sheet = rc_filter();
    let data = SchematicData::new(&sheet);
    for error in &data.library_errors {
        eprintln!("{:?}", miette::Report::new(error.clone()));
    }

    let rendering = data.render(&renderer)?;
    for warning in &rendering.warnings {
        eprintln!("{:?}", miette::Report::new(warning.clone()));
    }

    for net in &rendering.nets {
        let pins: Vec<String> = net
            .connections
            .iter()
            .map(|c| format!("{}.{}", c.reference().unwrap_or("?"), c.pin_number()))
            .collect();
        eprintln!(
            "net {} ({}): {} wires, pins [{}]",
            net.id,
            net.name.unwrap_or("unnamed"),
            net.segments.len(),
            pins.join(", ")
        );
    }

    if html {
        println!("{}", rendering.to_html(&renderer.stylesheet()));
    } else {
        println!("{}", rendering.to_svg_string());
    }
    Ok(())
}

//! Typed KiCad schematic document.
//!
//! This is the tree a `.kicad_sch` parser produces; the crate only consumes
//! it. Field names follow the file format. Everything is plain owned data so
//! documents can be built by hand in tests and demos.

use enum_dispatch::enum_dispatch;

use crate::justify::JustifyFlag;
use crate::render::shapes::Primitive;
use crate::types::{Point, dvec2};

/// Default font height for texts without `effects`, in mm.
pub const DEFAULT_FONT_SIZE: f64 = 1.27;

/// A location plus rotation in degrees (counter-clockwise in KiCad's frame).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub angle: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, angle: f64) -> Self {
        Position { x, y, angle }
    }

    pub const fn at(x: f64, y: f64) -> Self {
        Position::new(x, y, 0.0)
    }

    pub fn point(&self) -> Point {
        dvec2(self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mirror {
    #[default]
    None,
    X,
    Y,
}

/// RGBA with every channel in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Color { r, g, b, a }
    }

    /// KiCad writes `(color 0 0 0 0)` for "use the theme colour".
    pub fn is_unset(&self) -> bool {
        self.r == 0.0 && self.g == 0.0 && self.b == 0.0 && self.a == 0.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StrokeType {
    #[default]
    Default,
    Solid,
    Dash,
    DashDot,
    DashDotDot,
    Dot,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Stroke {
    /// `0` means the inherited default width
    pub width: f64,
    pub kind: StrokeType,
    pub color: Option<Color>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillType {
    #[default]
    None,
    Outline,
    Background,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShapeStyle {
    pub stroke: Stroke,
    pub fill: FillType,
}

/// Arc through three points.
#[derive(Clone, Debug, PartialEq)]
pub struct Arc {
    pub start: Point,
    pub mid: Point,
    pub end: Point,
    pub style: ShapeStyle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
    pub style: ShapeStyle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Rectangle {
    pub start: Point,
    pub end: Point,
    pub style: ShapeStyle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PolyLine {
    pub pts: Vec<Point>,
    pub style: ShapeStyle,
}

impl PolyLine {
    pub fn new(pts: Vec<Point>) -> Self {
        PolyLine {
            pts,
            style: ShapeStyle::default(),
        }
    }
}

/// One stroked/filled graphic item.
#[enum_dispatch(Primitive)]
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Arc,
    Circle,
    Rectangle,
    PolyLine,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Effects {
    pub font_size: FontSize,
    pub justify: Vec<JustifyFlag>,
    pub hide: bool,
}

impl Default for Effects {
    fn default() -> Self {
        Effects {
            font_size: FontSize {
                width: DEFAULT_FONT_SIZE,
                height: DEFAULT_FONT_SIZE,
            },
            justify: Vec::new(),
            hide: false,
        }
    }
}

impl Effects {
    pub fn justified(justify: Vec<JustifyFlag>) -> Self {
        Effects {
            justify,
            ..Effects::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionedText {
    pub text: String,
    pub at: Position,
    pub effects: Option<Effects>,
}

impl PositionedText {
    pub fn new(text: impl Into<String>, at: Position) -> Self {
        PositionedText {
            text: text.into(),
            at,
            effects: None,
        }
    }
}

/// Text without a position of its own (pin names and numbers).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Text {
    pub text: String,
    pub effects: Option<Effects>,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Text {
            text: text.into(),
            effects: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Property {
    pub key: String,
    pub value: String,
    pub id: u32,
    pub at: Position,
    pub effects: Option<Effects>,
}

/// Shapes and texts of a sheet or a library (sub-)symbol.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphicalSection {
    pub shapes: Vec<Shape>,
    pub texts: Vec<PositionedText>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PinElectricalType {
    Input,
    Output,
    Bidirectional,
    TriState,
    #[default]
    Passive,
    Free,
    Unspecified,
    PowerIn,
    PowerOut,
    OpenCollector,
    OpenEmitter,
    NoConnect,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PinGraphicStyle {
    #[default]
    Line,
    Inverted,
    Clock,
    InvertedClock,
    InputLow,
    ClockLow,
    OutputLow,
    EdgeClockHigh,
    NonLogic,
}

/// A library pin. `at` is the connection point, the pin body extends
/// `length` along `at.angle` from there.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pin {
    pub electrical_type: PinElectricalType,
    pub graphic_style: PinGraphicStyle,
    pub at: Position,
    pub length: f64,
    pub name: Text,
    pub number: Text,
    pub hide: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PinNames {
    pub offset: Option<f64>,
    pub hide: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PinNumbers {
    pub hide: bool,
}

/// A library symbol or one of its units.
///
/// Root symbols carry an id `<library>:<symbol>`, units an id
/// `<symbol>_<unit>_<style>`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LibSymbol {
    pub id: String,
    pub graphics: GraphicalSection,
    pub pin_names: Option<PinNames>,
    pub pin_numbers: Option<PinNumbers>,
    pub properties: Vec<Property>,
    pub units: Vec<LibSymbol>,
    pub pins: Vec<Pin>,
}

impl LibSymbol {
    pub fn new(id: impl Into<String>) -> Self {
        LibSymbol {
            id: id.into(),
            ..LibSymbol::default()
        }
    }
}

/// A placed symbol instance on the sheet.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Symbol {
    pub lib_id: String,
    /// Name under `lib_symbols` when it differs from `lib_id`
    pub lib_name: Option<String>,
    pub at: Position,
    pub mirror: Mirror,
    pub unit: Option<u32>,
    pub uuid: String,
    pub properties: Vec<Property>,
}

impl Symbol {
    /// The `Reference` property value, e.g. `R1`.
    pub fn reference(&self) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.key == "Reference")
            .map(|p| p.value.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Wire {
    pub pts: Vec<Point>,
    pub stroke: Stroke,
    pub uuid: String,
}

impl Wire {
    pub fn new(uuid: impl Into<String>, start: Point, end: Point) -> Self {
        Wire {
            pts: vec![start, end],
            stroke: Stroke::default(),
            uuid: uuid.into(),
        }
    }

    pub fn style(&self) -> ShapeStyle {
        ShapeStyle {
            stroke: self.stroke,
            fill: FillType::None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Junction {
    pub at: Position,
    pub diameter: Option<f64>,
    pub color: Option<Color>,
    pub uuid: String,
}

impl Junction {
    pub fn new(uuid: impl Into<String>, at: Point) -> Self {
        Junction {
            at: Position::at(at.x, at.y),
            diameter: None,
            color: None,
            uuid: uuid.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Label {
    pub text: String,
    pub at: Position,
    pub effects: Option<Effects>,
    pub uuid: String,
}

impl Label {
    pub fn new(uuid: impl Into<String>, text: impl Into<String>, at: Position) -> Self {
        Label {
            text: text.into(),
            at,
            effects: None,
            uuid: uuid.into(),
        }
    }

    pub fn positioned_text(&self) -> PositionedText {
        PositionedText {
            text: self.text.clone(),
            at: self.at,
            effects: self.effects.clone(),
        }
    }
}

/// One schematic sheet.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Schematic {
    pub version: u32,
    pub uuid: String,
    pub paper: String,
    pub graphics: GraphicalSection,
    pub lib_symbols: Vec<LibSymbol>,
    pub symbols: Vec<Symbol>,
    pub junctions: Vec<Junction>,
    pub wires: Vec<Wire>,
    pub labels: Vec<Label>,
    pub global_labels: Vec<Label>,
}

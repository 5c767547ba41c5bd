//! Render configuration: CSS class names, CSS custom properties and switches.

use super::defaults;

/// Class names put on the generated elements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SvgClasses {
    /// Root `<svg>` element
    pub diagram: String,
    /// Outer group of a placed symbol
    pub symbol: String,
    /// Net groups, wire paths and junction dots
    pub wire: String,
    /// Every arc, circle, rectangle and polyline
    pub graphics: String,
    /// Translated group holding a symbol's library graphics
    pub symbol_graphics: String,
    pub property: String,
    pub pin: String,
    pub pin_number: String,
    pub pin_name: String,
    /// Net labels drawn on the sheet
    pub label: String,
    /// Invisible per-symbol bounds rectangle
    pub bounds: String,
}

impl Default for SvgClasses {
    fn default() -> Self {
        SvgClasses {
            diagram: "pnid-diagram".into(),
            symbol: "pnid-symbol".into(),
            wire: "pnid-wire".into(),
            graphics: "pnid-graphics".into(),
            symbol_graphics: "pnid-symbol-graphics".into(),
            property: "pnid-property".into(),
            pin: "pnid-pin".into(),
            pin_number: "pnid-pin-number".into(),
            pin_name: "pnid-pin-name".into(),
            label: "pnid-label".into(),
            bounds: "pnid-bounds".into(),
        }
    }
}

/// Names of the CSS custom properties used for inherited defaults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleVars {
    pub default_stroke_width: String,
    pub default_stroke_color: String,
    pub default_fill_color: String,
    pub default_stroke_style: String,
    pub default_junction_radius: String,
}

impl Default for StyleVars {
    fn default() -> Self {
        StyleVars {
            default_stroke_width: "--pnid-default-stroke-width".into(),
            default_stroke_color: "--pnid-default-stroke-color".into(),
            default_fill_color: "--pnid-default-fill-color".into(),
            default_stroke_style: "--pnid-default-stroke-style".into(),
            default_junction_radius: "--pnid-default-junction-radius".into(),
        }
    }
}

impl StyleVars {
    /// `var(--name, fallback)`
    pub fn var(name: &str, fallback: &str) -> String {
        format!("var({name}, {fallback})")
    }
}

/// Overlays for checking transforms by eye.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DebugSettings {
    /// Draw the sheet's x (red) and y (green) axes at the origin
    pub coordinate_system: bool,
    /// Draw a yellow arrow from every text anchor towards its justified side
    pub text_anchor: bool,
}

/// Rendering options
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub classes: SvgClasses,
    pub style_vars: StyleVars,
    /// Emit hidden texts with `visibility="hidden"` instead of dropping them
    pub create_hidden_texts: bool,
    /// Emit an invisible bounds rectangle per symbol
    pub create_bounds: bool,
    pub debug: DebugSettings,
    /// Margin added around the drawing's bounds
    pub padding: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            classes: SvgClasses::default(),
            style_vars: StyleVars::default(),
            create_hidden_texts: true,
            create_bounds: true,
            debug: DebugSettings::default(),
            padding: defaults::PADDING,
        }
    }
}

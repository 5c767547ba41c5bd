//! Stroke and fill attributes for shapes

use crate::schematic::{Color, FillType, ShapeStyle, StrokeType};
use crate::types::fmt_num;

use super::config::StyleVars;
use super::defaults;
use super::hooks::Attributes;

/// `rgba(...)` for an explicit colour, `default` for a missing or unset one.
pub fn color(color: Option<Color>, default: &str) -> String {
    match color {
        Some(c) if !c.is_unset() => {
            let channel = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
            format!(
                "rgba({}, {}, {}, {:.3})",
                channel(c.r),
                channel(c.g),
                channel(c.b),
                c.a
            )
        }
        _ => default.to_string(),
    }
}

/// Dash pattern for a stroke type; `default` for `Default` and `Dot`.
pub fn dasharray(kind: StrokeType, default: &str) -> String {
    match kind {
        StrokeType::Solid => String::new(),
        StrokeType::Dash => "1.2,0.8".to_string(),
        StrokeType::DashDot => "1.2,0.3,0.2,0.3".to_string(),
        StrokeType::DashDotDot => "1.0,0.2,0.2,0.2,0.2,0.2".to_string(),
        StrokeType::Default | StrokeType::Dot => default.to_string(),
    }
}

/// Attributes of the stroked (foreground) copy of a shape.
pub fn foreground(style: &ShapeStyle, vars: &StyleVars) -> Attributes {
    let stroke_width = if style.stroke.width == 0.0 {
        StyleVars::var(&vars.default_stroke_width, &fmt_num(defaults::STROKE_WIDTH))
    } else {
        fmt_num(style.stroke.width)
    };
    let stroke_color_default = StyleVars::var(&vars.default_stroke_color, "black");
    let stroke = color(style.stroke.color, &stroke_color_default);
    let dashes = dasharray(
        style.stroke.kind,
        &StyleVars::var(&vars.default_stroke_style, "none"),
    );
    let fill = match style.fill {
        FillType::Outline => stroke_color_default,
        FillType::None | FillType::Background => "transparent".to_string(),
    };

    vec![
        ("stroke".to_string(), stroke),
        ("stroke-width".to_string(), stroke_width),
        ("stroke-dasharray".to_string(), dashes),
        ("stroke-linecap".to_string(), "round".to_string()),
        ("stroke-linejoin".to_string(), "round".to_string()),
        ("fill".to_string(), fill),
    ]
}

/// Attributes of the filled background copy, if the shape has one.
pub fn background(style: &ShapeStyle, vars: &StyleVars) -> Option<Attributes> {
    (style.fill == FillType::Background).then(|| {
        vec![(
            "fill".to_string(),
            StyleVars::var(&vars.default_fill_color, "lightgray"),
        )]
    })
}

//! KiCad-like default look for the generated SVG.
//!
//! The renderer only emits classes and `var(...)` references; this sheet
//! gives them KiCad's colours. Inside the view box one px is one mm.

use super::config::RenderConfig;

/// `calc(<base> * v)` list for a dash pattern scaled by the stroke width.
fn scaled_dash_array(base: &str, values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("calc({base} * {v})"))
        .collect::<Vec<_>>()
        .join(",")
}

/// CSS for the classes and custom properties named in `config`.
pub fn kicad_style_css(config: &RenderConfig) -> String {
    let vars = &config.style_vars;
    let classes = &config.classes;
    let stroke_width = &vars.default_stroke_width;
    let stroke_color = &vars.default_stroke_color;
    let fill_color = &vars.default_fill_color;
    let stroke_style = &vars.default_stroke_style;
    let junction_radius = &vars.default_junction_radius;
    let dashes = scaled_dash_array(&format!("var({stroke_width})"), &[12.0, 8.0]);

    format!(
        r#".{diagram} {{width: 1000px;}}
text {{font-family: "Montserrat", "Monospace"}}
svg {{
    {stroke_color}: blue;
    {stroke_width}: 0.1524px;
    {junction_radius}: 0.508px;
    {stroke_style}: {dashes}
}}
.{symbol} {{
    {stroke_color}: maroon;
    {fill_color}: lightyellow;
    {stroke_style}: none;
}}
.{wire} {{
    {stroke_color}: green;
    {fill_color}: green;
    {stroke_style}: none;
}}
.{property} {{fill: darkcyan }}
.{pin_number} {{fill: maroon }}
.{pin_name} {{fill: darkcyan }}
.{label} {{fill: green }}
"#,
        diagram = classes.diagram,
        symbol = classes.symbol,
        wire = classes.wire,
        property = classes.property,
        pin_number = classes.pin_number,
        pin_name = classes.pin_name,
        label = classes.label,
    )
}

fn indent(text: &str, levels: usize) -> String {
    let prefix = "    ".repeat(levels);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Standalone HTML page showing `svg` with `css`.
pub fn html_page(svg: &str, css: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n    <head>\n        <style>\n{}\n        </style>\n    </head>\n    <body>\n{}\n    </body>\n</html>\n",
        indent(css, 3),
        indent(svg, 2)
    )
}

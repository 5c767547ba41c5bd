//! Net groups: wire paths and junction dots

use svg::node::element::{Circle, Group, Path};

use crate::net::Net;
use crate::types::fmt_num;

use super::config::StyleVars;
use super::context::RenderContext;
use super::defaults;
use super::geometry::create_polyline_path;
use super::hooks::RenderHooks;
use super::style;
use super::svg::{SetAttributes, SvgNode, group};

/// Net name as a CSS class: `:` and whitespace become `-`.
pub fn sanitize_class(name: &str) -> String {
    name.chars()
        .map(|c| if c == ':' || c.is_whitespace() { '-' } else { c })
        .collect()
}

/// One `<g>` per net holding its wires and junctions.
pub fn render_net(net: &Net<'_>, hooks: &dyn RenderHooks, ctx: &RenderContext<'_>) -> Group {
    let net_ctx = ctx.with_classes([ctx.config.classes.wire.as_str()]);
    let vars = &ctx.config.style_vars;
    let mut children: Vec<SvgNode> = Vec::new();

    for segment in &net.segments {
        let wire = segment.wire;
        let points: Vec<_> = wire.pts.iter().map(|p| net_ctx.point(*p)).collect();
        if points.is_empty() {
            continue;
        }
        for p in &points {
            net_ctx.update_bounds(*p);
        }
        let path = Path::new()
            .set("class", net_ctx.class_attr::<&str>(&[]))
            .set("d", create_polyline_path(&points))
            .set_all(&style::foreground(&wire.style(), vars));
        children.push(Box::new(path));
    }

    for junction in &net.junctions {
        let center = net_ctx.point(junction.at.point());
        net_ctx.update_bounds(center);
        let radius = match junction.diameter {
            Some(d) if d > 0.0 => fmt_num(net_ctx.cs.length(d / 2.0)),
            _ => StyleVars::var(
                &vars.default_junction_radius,
                &format!("{}px", fmt_num(defaults::JUNCTION_RADIUS)),
            ),
        };
        let fill = style::color(
            junction.color,
            &StyleVars::var(&vars.default_fill_color, "black"),
        );
        children.push(Box::new(
            Circle::new()
                .set("class", net_ctx.class_attr::<&str>(&[]))
                .set("cx", fmt_num(center.x))
                .set("cy", fmt_num(center.y))
                .set("r", radius)
                .set("fill", fill),
        ));
    }

    let mut classes: Vec<String> = net.name.map(sanitize_class).into_iter().collect();
    classes.extend(hooks.net_classes(net));
    group(
        &net_ctx.class_attr(&classes),
        &hooks.net_attributes(net),
        children,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::CoordinateSystem;
    use crate::net::NetBuilder;
    use crate::render::config::RenderConfig;
    use crate::render::hooks::{Attributes, NoHooks};
    use crate::schematic::{Color, Junction, Label, Position, Wire};
    use crate::types::dvec2;

    #[test]
    fn sanitized_names() {
        assert_eq!(sanitize_class("Net:GND"), "Net-GND");
        assert_eq!(sanitize_class("VCC 3V3"), "VCC-3V3");
        assert_eq!(sanitize_class("SDA"), "SDA");
    }

    #[test]
    fn wires_and_junctions() {
        let wires = vec![
            Wire::new("w1", dvec2(0.0, 0.0), dvec2(10.0, 0.0)),
            Wire::new("w2", dvec2(5.0, 0.0), dvec2(5.0, 5.0)),
        ];
        let mut sized = Junction::new("j2", dvec2(10.0, 0.0));
        sized.diameter = Some(1.0);
        sized.color = Some(Color::new(1.0, 0.0, 0.0, 1.0));
        let junctions = vec![Junction::new("j1", dvec2(5.0, 0.0)), sized];
        let labels = vec![Label::new("l1", "Net:A", Position::at(0.0, 0.0))];

        let mut builder = NetBuilder::new();
        wires.iter().for_each(|w| builder.add_wire(w));
        junctions.iter().for_each(|j| builder.add_junction(j));
        labels.iter().for_each(|l| builder.add_label(l));
        let nets = builder.build();
        assert_eq!(nets.nets.len(), 1);

        let config = RenderConfig::default();
        let ctx = RenderContext::new(&config, CoordinateSystem::sheet());
        let svg = render_net(&nets.nets[0], &NoHooks, &ctx).to_string();

        assert!(svg.contains(r#"class="pnid-wire Net-A""#), "{svg}");
        assert!(svg.contains(r#"d="M 0 0 L 10 0""#), "{svg}");
        assert!(svg.contains(r#"d="M 5 0 L 5 5""#), "{svg}");
        assert!(
            svg.contains(r#"r="var(--pnid-default-junction-radius, 0.508px)""#),
            "{svg}"
        );
        assert!(
            svg.contains(r#"fill="var(--pnid-default-fill-color, black)""#),
            "{svg}"
        );
        assert!(svg.contains(r#"r="0.5""#), "{svg}");
        assert!(svg.contains(r#"fill="rgba(255, 0, 0, 1.000)""#), "{svg}");
        assert_eq!(ctx.bounds().max, dvec2(10.0, 5.0));
    }

    struct NetHooks;

    impl RenderHooks for NetHooks {
        fn net_attributes(&self, net: &Net<'_>) -> Attributes {
            vec![("data-net".into(), net.name.unwrap_or("?").into())]
        }

        fn net_classes(&self, _net: &Net<'_>) -> Vec<String> {
            vec!["highlight".into()]
        }
    }

    #[test]
    fn hooks_decorate_net_group() {
        let wires = vec![Wire::new("w1", dvec2(0.0, 0.0), dvec2(1.0, 0.0))];
        let mut builder = NetBuilder::new();
        builder.add_wire(&wires[0]);
        let nets = builder.build();

        let config = RenderConfig::default();
        let ctx = RenderContext::new(&config, CoordinateSystem::sheet());
        let svg = render_net(&nets.nets[0], &NetHooks, &ctx).to_string();
        assert!(svg.contains(r#"class="pnid-wire highlight""#), "{svg}");
        assert!(svg.contains(r#"data-net="?""#), "{svg}");
    }
}

//! Drawing of the graphic primitives: arcs, circles, rectangles, polylines.
//!
//! Each primitive projects its points through the context, grows the
//! context's bounds and contributes a stroked copy to the foreground layer.
//! Shapes with a background fill also contribute a fill-only copy to the
//! background layer, so fills never cover strokes of other shapes.

use enum_dispatch::enum_dispatch;
use svg::node::element::{Circle as SvgCircle, Path, Rectangle as SvgRect};

use crate::schematic::{Arc, Circle, GraphicalSection, PolyLine, Rectangle, ShapeStyle};
use crate::types::{dvec2, fmt_num};

use super::context::RenderContext;
use super::geometry::{create_arc_path, create_polyline_path};
use super::style;
use super::svg::{SetAttributes, SvgNode};
use super::text;

/// Output of a graphical section, kept apart so callers can stack them.
#[derive(Debug, Default)]
pub struct Layers {
    pub background: Vec<SvgNode>,
    pub foreground: Vec<SvgNode>,
    pub text: Vec<SvgNode>,
}

impl Layers {
    pub fn new() -> Self {
        Self::default()
    }

    /// All layers in paint order.
    pub fn into_nodes(self) -> Vec<SvgNode> {
        let mut nodes = self.background;
        nodes.extend(self.foreground);
        nodes.extend(self.text);
        nodes
    }
}

/// Something that can draw itself into [`Layers`].
#[enum_dispatch]
pub trait Primitive {
    fn render(
        &self,
        ctx: &crate::render::context::RenderContext<'_>,
        layers: &mut crate::render::shapes::Layers,
    );
}

/// Push the foreground copy and, for background fills, the fill-only copy.
fn push_styled<E>(element: E, style: &ShapeStyle, ctx: &RenderContext<'_>, layers: &mut Layers)
where
    E: SetAttributes + svg::Node + Clone,
{
    let vars = &ctx.config.style_vars;
    if let Some(bg) = style::background(style, vars) {
        layers.background.push(Box::new(Clone::clone(&element).set_all(&bg)));
    }
    layers
        .foreground
        .push(Box::new(element.set_all(&style::foreground(style, vars))));
}

impl Primitive for Arc {
    fn render(&self, ctx: &RenderContext<'_>, layers: &mut Layers) {
        let start = ctx.point(self.start);
        let mid = ctx.point(self.mid);
        let end = ctx.point(self.end);
        // the three defining points only; the arc may bulge past them
        ctx.update_bounds(start);
        ctx.update_bounds(mid);
        ctx.update_bounds(end);

        let path = Path::new()
            .set("class", ctx.class_attr::<&str>(&[]))
            .set("d", create_arc_path(start, mid, end));
        push_styled(path, &self.style, ctx, layers);
    }
}

impl Primitive for Circle {
    fn render(&self, ctx: &RenderContext<'_>, layers: &mut Layers) {
        let center = ctx.point(self.center);
        let radius = ctx.cs.length(self.radius);
        ctx.update_bounds(center - dvec2(radius, radius));
        ctx.update_bounds(center + dvec2(radius, radius));

        let circle = SvgCircle::new()
            .set("class", ctx.class_attr::<&str>(&[]))
            .set("cx", fmt_num(center.x))
            .set("cy", fmt_num(center.y))
            .set("r", fmt_num(radius));
        push_styled(circle, &self.style, ctx, layers);
    }
}

impl Primitive for Rectangle {
    fn render(&self, ctx: &RenderContext<'_>, layers: &mut Layers) {
        let start = ctx.point(self.start);
        let end = ctx.point(self.end);
        ctx.update_bounds(start);
        ctx.update_bounds(end);

        let origin = start.min(end);
        let size = (start - end).abs();
        let rect = SvgRect::new()
            .set("class", ctx.class_attr::<&str>(&[]))
            .set("x", fmt_num(origin.x))
            .set("y", fmt_num(origin.y))
            .set("width", fmt_num(size.x))
            .set("height", fmt_num(size.y));
        push_styled(rect, &self.style, ctx, layers);
    }
}

impl Primitive for PolyLine {
    fn render(&self, ctx: &RenderContext<'_>, layers: &mut Layers) {
        if self.pts.is_empty() {
            return;
        }
        let points: Vec<_> = self.pts.iter().map(|p| ctx.point(*p)).collect();
        for p in &points {
            ctx.update_bounds(*p);
        }

        let path = Path::new()
            .set("class", ctx.class_attr::<&str>(&[]))
            .set("d", create_polyline_path(&points));
        push_styled(path, &self.style, ctx, layers);
    }
}

/// Draw every shape and text of a section with the graphics class.
pub fn render_section(section: &GraphicalSection, ctx: &RenderContext<'_>, layers: &mut Layers) {
    let ctx = ctx.with_classes([ctx.config.classes.graphics.as_str()]);
    for shape in &section.shapes {
        shape.render(&ctx, layers);
    }
    for t in &section.texts {
        layers
            .text
            .extend(text::render_text(t, &ctx, None, &text::TextOptions::default()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::CoordinateSystem;
    use crate::render::config::RenderConfig;
    use crate::schematic::{FillType, PositionedText, Position, Shape};
    use crate::transform::Transform;

    fn render_one(shape: Shape, ctx: &RenderContext<'_>) -> Layers {
        let mut layers = Layers::new();
        shape.render(ctx, &mut layers);
        layers
    }

    #[test]
    fn rectangle_normalizes_corners() {
        let config = RenderConfig::default();
        let ctx = RenderContext::new(&config, CoordinateSystem::sheet());
        let rect = Shape::from(Rectangle {
            start: dvec2(4.0, 3.0),
            end: dvec2(1.0, 1.0),
            style: ShapeStyle::default(),
        });
        let layers = render_one(rect, &ctx);
        assert!(layers.background.is_empty());
        let svg = layers.foreground[0].to_string();
        assert!(svg.contains(r#"x="1""#), "{svg}");
        assert!(svg.contains(r#"y="1""#), "{svg}");
        assert!(svg.contains(r#"width="3""#), "{svg}");
        assert!(svg.contains(r#"height="2""#), "{svg}");
        assert_eq!(ctx.bounds().min, dvec2(1.0, 1.0));
        assert_eq!(ctx.bounds().max, dvec2(4.0, 3.0));
    }

    #[test]
    fn background_fill_adds_a_second_element() {
        let config = RenderConfig::default();
        let ctx = RenderContext::new(&config, CoordinateSystem::sheet());
        let mut circle = Circle {
            center: dvec2(0.0, 0.0),
            radius: 2.0,
            style: ShapeStyle::default(),
        };
        circle.style.fill = FillType::Background;
        let layers = render_one(circle.into(), &ctx);
        assert_eq!(layers.background.len(), 1);
        assert_eq!(layers.foreground.len(), 1);
        assert!(layers.background[0].to_string().contains("lightgray"));
        assert_eq!(ctx.bounds().min, dvec2(-2.0, -2.0));
        assert_eq!(ctx.bounds().max, dvec2(2.0, 2.0));
    }

    #[test]
    fn polyline_goes_through_the_transform() {
        let config = RenderConfig::default();
        let ctx = RenderContext::new(&config, CoordinateSystem::sheet())
            .child(Some(&Transform::translate(10.0, 5.0)));
        let line = PolyLine::new(vec![dvec2(0.0, 0.0), dvec2(1.0, 0.0)]);
        let layers = render_one(line.into(), &ctx);
        let svg = layers.foreground[0].to_string();
        assert!(svg.contains(r#"d="M 10 5 L 11 5""#), "{svg}");
    }

    #[test]
    fn empty_polyline_draws_nothing() {
        let config = RenderConfig::default();
        let ctx = RenderContext::new(&config, CoordinateSystem::sheet());
        let layers = render_one(PolyLine::new(Vec::new()).into(), &ctx);
        assert!(layers.foreground.is_empty());
        assert!(ctx.bounds().is_empty());
    }

    #[test]
    fn section_layers_and_classes() {
        let config = RenderConfig::default();
        let ctx = RenderContext::new(&config, CoordinateSystem::sheet());
        let section = GraphicalSection {
            shapes: vec![
                Arc {
                    start: dvec2(0.0, 0.0),
                    mid: dvec2(1.0, 1.0),
                    end: dvec2(2.0, 0.0),
                    style: ShapeStyle::default(),
                }
                .into(),
            ],
            texts: vec![PositionedText::new("note", Position::at(5.0, 5.0))],
        };
        let mut layers = Layers::new();
        render_section(&section, &ctx, &mut layers);
        assert_eq!(layers.foreground.len(), 1);
        assert_eq!(layers.text.len(), 1);
        let arc = layers.foreground[0].to_string();
        assert!(arc.contains(r#"class="pnid-graphics""#), "{arc}");
        assert!(arc.contains("A 1 1 0 0"), "{arc}");
        assert_eq!(layers.into_nodes().len(), 2);
    }
}

//! SVG rendering for KiCad schematics
//!
//! This module is organized into submodules:
//! - `config`: class names, CSS variables and switches
//! - `context`: RenderContext for coordinate systems, classes and bounds
//! - `defaults`: Default sizes and settings
//! - `geometry`: Arc fitting and path data
//! - `hooks`: Caller-supplied decorations
//! - `shapes`, `style`, `text`: Primitives
//! - `pin`, `symbol`, `net`, `label`: Schematic items
//! - `stylesheet`: KiCad-like CSS for the output
//! - `svg`: SVG element helpers and debug overlays

pub mod config;
pub mod context;
pub mod defaults;
pub mod geometry;
pub mod hooks;
pub mod label;
pub mod net;
pub mod pin;
pub mod shapes;
pub mod style;
pub mod stylesheet;
pub mod svg;
pub mod symbol;
pub mod text;

pub use config::{DebugSettings, RenderConfig, StyleVars, SvgClasses};
pub use context::RenderContext;
pub use hooks::{Attributes, NoHooks, RenderHooks};

use ::svg::Document;

use crate::coords::CoordinateSystem;
use crate::errors::{RenderError, RenderWarning};
use crate::net::{Net, NetBuilder, NetList};
use crate::schematic::Schematic;
use crate::symbol_index::SymbolIndex;
use crate::types::{Bounds, dvec2};

use self::shapes::{Layers, render_section};
use self::svg::{SvgNode, group};

/// Renders schematics with one configuration and one set of hooks.
pub struct SchematicRenderer {
    config: RenderConfig,
    hooks: Box<dyn RenderHooks>,
}

impl Default for SchematicRenderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

impl std::fmt::Debug for SchematicRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchematicRenderer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SchematicRenderer {
    pub fn new(config: RenderConfig) -> Self {
        SchematicRenderer {
            config,
            hooks: Box::new(NoHooks),
        }
    }

    pub fn with_hooks(mut self, hooks: Box<dyn RenderHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render a sheet, extracting its nets on the way.
    pub fn render<'s>(&self, schematic: &'s Schematic) -> Result<Rendering<'s>, RenderError> {
        let (index, library_errors) = SymbolIndex::from_library(&schematic.lib_symbols);
        let warnings = library_errors
            .into_iter()
            .map(|error| {
                crate::log::warn!(%error, "library symbol rejected");
                RenderWarning::from(error)
            })
            .collect();
        let nets = NetBuilder::from_schematic(schematic, &index).build();
        self.assemble(schematic, &index, nets, warnings)
    }

    /// Render a sheet whose index and nets were built beforehand.
    pub fn render_data<'s>(
        &self,
        data: &crate::SchematicData<'s>,
    ) -> Result<Rendering<'s>, RenderError> {
        let warnings = data
            .library_errors
            .iter()
            .cloned()
            .map(RenderWarning::from)
            .collect();
        self.assemble(data.schematic, &data.index, data.nets.clone(), warnings)
    }

    /// KiCad-like CSS for this renderer's class and variable names.
    pub fn stylesheet(&self) -> String {
        stylesheet::kicad_style_css(&self.config)
    }

    fn assemble<'s>(
        &self,
        schematic: &'s Schematic,
        index: &SymbolIndex<'s>,
        net_list: NetList<'s>,
        mut warnings: Vec<RenderWarning>,
    ) -> Result<Rendering<'s>, RenderError> {
        let hooks = self.hooks.as_ref();
        let ctx = RenderContext::new(&self.config, CoordinateSystem::sheet());
        let mut children: Vec<SvgNode> = Vec::new();

        if self.config.debug.coordinate_system {
            children.extend(svg::coordinate_system_overlay(&ctx));
        }

        for placed in &schematic.symbols {
            children.push(Box::new(symbol::render_symbol(
                placed,
                index,
                hooks,
                &ctx,
                &mut warnings,
            )));
        }

        let mut sheet_graphics = Layers::new();
        render_section(&schematic.graphics, &ctx, &mut sheet_graphics);
        children.extend(sheet_graphics.into_nodes());

        let NetList {
            nets,
            warnings: net_warnings,
        } = net_list;
        warnings.extend(net_warnings);
        for n in &nets {
            children.push(Box::new(net::render_net(n, hooks, &ctx)));
        }

        for l in schematic.labels.iter().chain(&schematic.global_labels) {
            children.extend(label::render_label(l, &ctx));
        }

        let mut bounds = ctx.bounds();
        if bounds.is_empty() {
            bounds = Bounds {
                min: dvec2(0.0, 0.0),
                max: dvec2(0.0, 0.0),
            };
        }
        bounds.pad(self.config.padding);
        if !bounds.is_finite() {
            return Err(RenderError::InvalidBounds {
                view_box: bounds.to_view_box(),
            });
        }

        let view_box = bounds.to_view_box();
        crate::log::debug!(
            %view_box,
            symbols = schematic.symbols.len(),
            nets = nets.len(),
            warnings = warnings.len(),
            "rendered schematic"
        );

        let document = Document::new()
            .set("class", self.config.classes.diagram.as_str())
            .set("viewBox", view_box)
            .add(group("", &Vec::new(), children));

        Ok(Rendering {
            document,
            bounds,
            nets,
            warnings,
        })
    }
}

/// Output of one render call.
#[derive(Debug)]
pub struct Rendering<'s> {
    pub document: Document,
    /// Padded bounds, equal to the view box
    pub bounds: Bounds,
    pub nets: Vec<Net<'s>>,
    pub warnings: Vec<RenderWarning>,
}

impl Rendering<'_> {
    pub fn to_svg_string(&self) -> String {
        self.document.to_string()
    }

    /// Standalone HTML page embedding the SVG with `css`.
    pub fn to_html(&self, css: &str) -> String {
        stylesheet::html_page(&self.to_svg_string(), css)
    }
}

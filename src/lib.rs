//! Render KiCad schematics to SVG and recover their electrical nets.
//!
//! The input is an already parsed [`Schematic`]. Rendering places every
//! symbol, pin, text and wire through nested coordinate systems; net
//! extraction runs pin positions through the same systems, so a pin drawn
//! on a wire end is also connected to it.
//!
//! ```
//! use kisvg::{Schematic, Wire, dvec2, render_schematic};
//!
//! let mut sheet = Schematic::default();
//! sheet.wires.push(Wire::new("w1", dvec2(0.0, 0.0), dvec2(10.0, 0.0)));
//!
//! let rendering = render_schematic(&sheet)?;
//! assert_eq!(rendering.nets.len(), 1);
//! assert!(rendering.to_svg_string().contains("viewBox"));
//! # Ok::<(), kisvg::RenderError>(())
//! ```

pub mod coords;
pub mod errors;
pub mod justify;
pub mod log;
pub mod net;
pub mod render;
pub mod schematic;
pub mod symbol_index;
pub mod transform;
pub mod types;

pub use coords::CoordinateSystem;
pub use errors::{LibraryError, RenderError, RenderWarning};
pub use justify::{Justification, JustifyFlag};
pub use net::{Net, NetBuilder, NetList, PinConnection, Segment};
pub use render::{RenderConfig, RenderHooks, Rendering, SchematicRenderer};
pub use schematic::*;
pub use symbol_index::SymbolIndex;
pub use transform::Transform;
pub use types::{Bounds, Point, dvec2};

/// Render a sheet with the default configuration.
pub fn render_schematic(schematic: &Schematic) -> Result<Rendering<'_>, RenderError> {
    SchematicRenderer::default().render(schematic)
}

/// Extract the nets of a sheet without rendering it.
pub fn extract_nets(schematic: &Schematic) -> NetList<'_> {
    let (index, _) = SymbolIndex::from_library(&schematic.lib_symbols);
    NetBuilder::from_schematic(schematic, &index).build()
}

/// A sheet with its symbol index and nets, built once and reused for
/// rendering and connectivity queries.
#[derive(Debug)]
pub struct SchematicData<'s> {
    pub schematic: &'s Schematic,
    pub index: SymbolIndex<'s>,
    pub nets: NetList<'s>,
    /// Library symbols left out of `index`
    pub library_errors: Vec<LibraryError>,
}

impl<'s> SchematicData<'s> {
    pub fn new(schematic: &'s Schematic) -> Self {
        let (index, library_errors) = SymbolIndex::from_library(&schematic.lib_symbols);
        let nets = NetBuilder::from_schematic(schematic, &index).build();
        SchematicData {
            schematic,
            index,
            nets,
            library_errors,
        }
    }

    /// Net that the given pin of the symbol with `reference` is on.
    pub fn net_of_pin(&self, reference: &str, number: &str) -> Option<&Net<'s>> {
        self.nets
            .nets
            .iter()
            .find(|net| net.connects_pin(reference, number))
    }

    /// Render with `renderer`, reusing the extracted nets.
    pub fn render(&self, renderer: &SchematicRenderer) -> Result<Rendering<'s>, RenderError> {
        renderer.render_data(self)
    }
}

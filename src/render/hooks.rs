//! Caller hooks for decorating the output.
//!
//! A [`RenderHooks`] implementation is handed to the renderer once. It is
//! asked for extra attributes, classes and content per symbol, property and
//! net. Every method has a no-op default and only sees the entity by shared
//! reference.

use svg::Node;

use crate::net::Net;
use crate::schematic::{Property, Symbol};

/// Extra `name="value"` pairs for an element.
pub type Attributes = Vec<(String, String)>;

pub trait RenderHooks {
    fn symbol_attributes(&self, _symbol: &Symbol) -> Attributes {
        Vec::new()
    }

    fn symbol_classes(&self, _symbol: &Symbol) -> Vec<String> {
        Vec::new()
    }

    /// Appended to the symbol's outer group after its properties.
    fn symbol_extra_elements(&self, _symbol: &Symbol) -> Vec<Box<dyn Node>> {
        Vec::new()
    }

    fn property_attributes(&self, _symbol: &Symbol, _property: &Property) -> Attributes {
        Vec::new()
    }

    fn property_classes(&self, _symbol: &Symbol, _property: &Property) -> Vec<String> {
        Vec::new()
    }

    /// Replacement for the property's value, e.g. to resolve `${VAR}` text.
    fn property_text(&self, _symbol: &Symbol, _property: &Property) -> Option<String> {
        None
    }

    fn net_attributes(&self, _net: &Net<'_>) -> Attributes {
        Vec::new()
    }

    fn net_classes(&self, _net: &Net<'_>) -> Vec<String> {
        Vec::new()
    }
}

/// Hooks that add nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHooks;

impl RenderHooks for NoHooks {}

//! Library symbol lookup.
//!
//! `lib_symbols` holds one root symbol per part (`Device:R`) with nested units
//! (`R_0_1`, `R_1_1`, ...). A placed symbol needs the shared unit 0 graphics
//! plus the graphics of its own unit; this index answers that lookup.

use std::collections::HashMap;

use crate::errors::LibraryError;
use crate::schematic::{LibSymbol, Symbol};

/// Lookup from `<library>:<symbol>` + unit number to library sub-symbols.
#[derive(Debug, Default)]
pub struct SymbolIndex<'s> {
    entries: HashMap<String, Vec<&'s LibSymbol>>,
}

impl<'s> SymbolIndex<'s> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index over a whole `lib_symbols` section.
    ///
    /// Symbols whose units are inconsistent are left out; the errors are
    /// returned alongside the index.
    pub fn from_library(symbols: &'s [LibSymbol]) -> (Self, Vec<LibraryError>) {
        let mut index = Self::new();
        let errors = index.add_library(symbols);
        (index, errors)
    }

    pub fn add_library(&mut self, symbols: &'s [LibSymbol]) -> Vec<LibraryError> {
        symbols
            .iter()
            .filter_map(|symbol| self.add_symbol(symbol).err())
            .collect()
    }

    /// Register a root library symbol and its units.
    ///
    /// The root is stored as unit 0. Nested units are kept when they are unit
    /// 0 (shared by all units) or style 1; alternate body styles are skipped.
    /// All units are validated before anything is inserted, so a rejected
    /// symbol leaves the index untouched.
    pub fn add_symbol(&mut self, symbol: &'s LibSymbol) -> Result<(), LibraryError> {
        let (_, symbol_name) = split_lib_id(&symbol.id);

        let mut units = Vec::with_capacity(symbol.units.len());
        for unit in &symbol.units {
            let (parent, unit_number, style) = split_unit_id(&unit.id)?;
            if parent != symbol_name {
                return Err(LibraryError::UnitMismatch {
                    unit: unit.id.clone(),
                    parent: symbol.id.clone(),
                });
            }
            units.push((unit_number, style, unit));
        }

        self.insert(&symbol.id, 0, symbol);
        for (unit_number, style, unit) in units {
            if unit_number == 0 || style == 1 {
                self.insert(&symbol.id, unit_number, unit);
            }
        }

        crate::log::trace!(id = %symbol.id, units = symbol.units.len(), "indexed library symbol");
        Ok(())
    }

    fn insert(&mut self, symbol_id: &str, unit: u32, symbol: &'s LibSymbol) {
        self.entries
            .entry(entry_key(symbol_id, unit))
            .or_default()
            .push(symbol);
    }

    /// Sub-symbols to draw for a placed symbol: every unit 0 entry (the root
    /// first) followed by the entries of the symbol's own unit.
    pub fn symbols_for(&self, symbol: &Symbol) -> Vec<&'s LibSymbol> {
        let id = symbol.lib_name.as_deref().unwrap_or(&symbol.lib_id);

        let mut result: Vec<&'s LibSymbol> = self
            .entries
            .get(&entry_key(id, 0))
            .map(|v| v.to_vec())
            .unwrap_or_default();

        if let Some(unit) = symbol.unit.filter(|&u| u != 0) {
            if let Some(unit_symbols) = self.entries.get(&entry_key(id, unit)) {
                result.extend(unit_symbols.iter().copied());
            }
        }
        result
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn entry_key(symbol_id: &str, unit: u32) -> String {
    format!("{symbol_id}:{unit}")
}

/// Split `<library>:<symbol>` at the last colon. Ids without a library part
/// yield an empty library name.
pub fn split_lib_id(id: &str) -> (&str, &str) {
    id.rsplit_once(':').unwrap_or(("", id))
}

/// Split `<symbol>_<unit>_<style>`. The symbol part may itself contain
/// underscores.
pub fn split_unit_id(id: &str) -> Result<(&str, u32, u32), LibraryError> {
    let malformed = || LibraryError::MalformedUnitId { id: id.to_string() };

    let (rest, style) = id.rsplit_once('_').ok_or_else(malformed)?;
    let (parent, unit) = rest.rsplit_once('_').ok_or_else(malformed)?;
    let unit = unit.parse().map_err(|_| malformed())?;
    let style = style.parse().map_err(|_| malformed())?;
    Ok((parent, unit, style))
}

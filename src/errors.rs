//! Error and warning types with miette diagnostics
//!
//! Only [`RenderError`] aborts a render. Everything that concerns a single
//! entity (a broken library symbol, a zero-length wire) is a [`RenderWarning`]
//! collected on the output while the rest of the sheet is still drawn.

use miette::Diagnostic;
use thiserror::Error;

// ============================================================================
// Library Errors
// ============================================================================

/// Structural problems in the `lib_symbols` section
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum LibraryError {
    #[error("unit `{unit}` doesn't match parent symbol `{parent}`")]
    #[diagnostic(
        code(kisvg::library::unit_mismatch),
        help("unit ids have the form <symbol>_<unit>_<style>, where <symbol> is the parent's id without its library prefix")
    )]
    UnitMismatch { unit: String, parent: String },

    #[error("malformed unit id `{id}`")]
    #[diagnostic(
        code(kisvg::library::malformed_unit_id),
        help("unit ids must end in _<unit>_<style> with integer unit and style")
    )]
    MalformedUnitId { id: String },
}

// ============================================================================
// Render Warnings
// ============================================================================

/// Non-fatal problems found while rendering or extracting nets
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum RenderWarning {
    #[error("no library symbol for `{lib_id}` (unit {unit:?})")]
    #[diagnostic(code(kisvg::render::missing_library_symbol))]
    MissingLibrarySymbol { lib_id: String, unit: Option<u32> },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Library(#[from] LibraryError),

    #[error("wire {uuid} has zero length")]
    #[diagnostic(
        code(kisvg::net::degenerate_wire),
        help("the wire only connects to items lying exactly on its single point")
    )]
    DegenerateWire { uuid: String },

    #[error("wire {uuid} has no points")]
    #[diagnostic(code(kisvg::net::empty_wire))]
    EmptyWire { uuid: String },
}

// ============================================================================
// Render Errors
// ============================================================================

/// Errors that abort rendering
#[derive(Error, Diagnostic, Debug)]
pub enum RenderError {
    #[error("infinite or NaN in bounds: {view_box}")]
    #[diagnostic(code(kisvg::render::invalid_bounds))]
    InvalidBounds { view_box: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_error_converts_into_warning() {
        let warning: RenderWarning = LibraryError::MalformedUnitId {
            id: "R_x".to_string(),
        }
        .into();
        assert_eq!(warning.to_string(), "malformed unit id `R_x`");
        assert_eq!(
            warning.code().map(|c| c.to_string()).as_deref(),
            Some("kisvg::library::malformed_unit_id")
        );
    }
}

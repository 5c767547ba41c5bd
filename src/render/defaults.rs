//! Default sizes and settings (all in mm, KiCad's document unit)

/// Stroke width used when a shape's stroke width is 0
pub const STROKE_WIDTH: f64 = 0.1524;
/// Junction dot radius when the junction has no explicit diameter
pub const JUNCTION_RADIUS: f64 = 0.508;
/// Distance between a pin's body end and its name
pub const PIN_NAME_OFFSET: f64 = 0.508;
/// Distance between a pin line and its number
pub const PIN_NUMBER_OFFSET: f64 = 0.254;
/// Margin around the drawing in the final view box
pub const PADDING: f64 = 10.0;
/// Library symbol text angles are stored in tenths of a degree
pub const SYMBOL_TEXT_ANGLE_MULTIPLIER: f64 = 0.1;

/// 50 mil
pub const MIL_50: f64 = 2.54 / 2.0;
/// 25 mil
pub const MIL_25: f64 = MIL_50 / 2.0;

/// Length of the debug coordinate axes
pub const DEBUG_AXIS_LENGTH: f64 = 20.0;
/// Length of the debug text anchor arrows
pub const DEBUG_ANCHOR_LENGTH: f64 = 5.0;
pub const DEBUG_STROKE_WIDTH: f64 = 0.2;

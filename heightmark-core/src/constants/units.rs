//! Unit Conversion Constants
//!
//! Elevation is carried internally in meters (the unit the location
//! subsystem reports). Conversion happens once, at display time.

/// Feet per meter.
///
/// The international foot is defined as exactly 0.3048 m; its reciprocal
/// truncated to five decimals is the conversion factor used for display
/// (100 m -> 328.084 ft).
pub const FEET_PER_METER: f64 = 3.28084;

/// Display suffix for metric elevations.
pub const METRIC_SUFFIX: &str = "m";

/// Display suffix for imperial elevations.
pub const IMPERIAL_SUFFIX: &str = "ft";

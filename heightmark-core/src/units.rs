//! Elevation Display Units
//!
//! Altitude is carried in meters everywhere inside the crate; conversion
//! to the user's preferred unit happens exactly once, when a value is
//! rendered. The preference itself persists as a boolean
//! (`use_metric_unit`, default true) — see [`crate::prefs`].

use crate::constants::units::{FEET_PER_METER, IMPERIAL_SUFFIX, METRIC_SUFFIX};

/// Display unit for elevation values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Unit {
    /// Meters
    Metric,
    /// Feet
    Imperial,
}

impl Unit {
    /// Map the persisted `use_metric_unit` flag to a unit
    pub const fn from_use_metric(use_metric: bool) -> Self {
        if use_metric {
            Unit::Metric
        } else {
            Unit::Imperial
        }
    }

    /// The persisted-flag value this unit corresponds to
    pub const fn use_metric(self) -> bool {
        matches!(self, Unit::Metric)
    }

    /// Display suffix ("m" or "ft")
    pub const fn suffix(self) -> &'static str {
        match self {
            Unit::Metric => METRIC_SUFFIX,
            Unit::Imperial => IMPERIAL_SUFFIX,
        }
    }

    /// Human-readable unit name
    pub const fn name(self) -> &'static str {
        match self {
            Unit::Metric => "meters",
            Unit::Imperial => "feet",
        }
    }
}

impl Default for Unit {
    fn default() -> Self {
        Unit::Metric
    }
}

/// Convert an elevation in meters to the requested display unit
///
/// Metric values pass through unchanged; imperial multiplies by
/// [`FEET_PER_METER`]. NaN stays NaN, so an empty window renders the same
/// in either unit.
pub fn convert_elevation(meters: f64, unit: Unit) -> f64 {
    match unit {
        Unit::Metric => meters,
        Unit::Imperial => meters * FEET_PER_METER,
    }
}

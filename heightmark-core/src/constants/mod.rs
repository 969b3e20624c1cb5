//! Constants for HeightMark Core
//!
//! Centralized numeric values used throughout the crate, grouped by domain.
//! Prefer these over inline magic numbers; each constant documents its
//! source (platform convention, geography, or the unit definition itself).

/// Unit conversion factors between metric and imperial elevation units.
pub mod units;

/// Location-subsystem parameters: update cadence and plausibility limits.
pub mod location;

/// Rolling-average window sizing.
pub mod smoothing;

/// Time conversions and display timing.
pub mod time;

// Re-export commonly used constants for convenience
pub use units::FEET_PER_METER;
pub use location::{DEFAULT_UPDATE_INTERVAL_MS, DEFAULT_MIN_DISTANCE_M};
pub use smoothing::DEFAULT_WINDOW_SAMPLES;
pub use time::MS_PER_SECOND;

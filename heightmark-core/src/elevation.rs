//! Rolling-Average Elevation Tracker
//!
//! The smoothing service at the center of the crate: each raw altitude
//! reading goes into a fixed [`SampleWindow`] and the display always shows
//! the mean of what the window currently holds.
//!
//! ## Usage
//!
//! ```rust
//! use heightmark_core::elevation::ElevationTracker;
//! use heightmark_core::units::Unit;
//!
//! let mut tracker: ElevationTracker<3> = ElevationTracker::new();
//!
//! assert_eq!(tracker.add_reading(100.0), 100.0);
//! assert_eq!(tracker.add_reading(200.0), 150.0);
//! assert_eq!(tracker.add_reading(300.0), 200.0);
//!
//! // Fourth reading evicts the first
//! assert_eq!(tracker.add_reading(400.0), 300.0);
//!
//! // Display-time conversion leaves the stored meters untouched
//! let feet = tracker.average_in(Unit::Imperial);
//! assert!((feet - 984.252).abs() < 0.001);
//! ```

use crate::buffer::SampleWindow;
use crate::units::{self, Unit};

/// Rolling-average accumulator over the last `N` altitude readings
///
/// Readings are meters above the reference datum, exactly as the location
/// subsystem reports them. The tracker performs no screening; feed it
/// through [`crate::validator::AltitudeValidator`] first if the source is
/// untrusted.
#[derive(Debug, Clone, Default)]
pub struct ElevationTracker<const N: usize> {
    window: SampleWindow<N>,
}

impl<const N: usize> ElevationTracker<N> {
    /// Creates a tracker with an empty window
    pub const fn new() -> Self {
        Self {
            window: SampleWindow::new(),
        }
    }

    /// Appends a reading and returns the new rolling mean
    ///
    /// Evicts the oldest reading once `N` are held.
    pub fn add_reading(&mut self, meters: f64) -> f64 {
        self.window.push(meters);
        self.average()
    }

    /// Rolling mean of the held readings, in meters
    ///
    /// NaN while no readings have arrived.
    pub fn average(&self) -> f64 {
        self.window.mean()
    }

    /// Rolling mean converted for display in `unit`
    pub fn average_in(&self, unit: Unit) -> f64 {
        units::convert_elevation(self.average(), unit)
    }

    /// Number of readings currently smoothed over
    pub fn sample_count(&self) -> usize {
        self.window.len()
    }

    /// True until the first reading arrives
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Most recent raw reading, in meters
    pub fn last_reading(&self) -> Option<f64> {
        self.window.last()
    }

    /// Forget all readings (e.g. after a long gap in coverage)
    pub fn reset(&mut self) {
        self.window.clear();
    }
}

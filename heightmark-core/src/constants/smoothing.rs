//! Rolling-Average Window Sizing
//!
//! GPS altitude is the noisiest component of a fix (vertical error is
//! typically 1.5-3x the horizontal error), so raw readings are smoothed
//! over a short window before display.

/// Default number of readings in the rolling-average window.
///
/// At the default 1 Hz update cadence this is ten seconds of history:
/// long enough to damp meter-scale GPS jitter, short enough that walking
/// up a hill is reflected within a few seconds.
pub const DEFAULT_WINDOW_SAMPLES: usize = 10;

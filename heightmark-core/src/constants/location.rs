//! Location-Subsystem Parameters
//!
//! Update-cadence defaults and the plausibility envelope applied to
//! incoming fixes before they reach the smoothing window.

/// Minimum interval between delivered fixes, in milliseconds.
///
/// 1 Hz matches the native update rate of consumer GNSS receivers; asking
/// for more only replays interpolated positions.
pub const DEFAULT_UPDATE_INTERVAL_MS: u32 = 1000;

/// Minimum movement between delivered fixes, in meters.
pub const DEFAULT_MIN_DISTANCE_M: f32 = 1.0;

/// Lowest plausible surface elevation, in meters.
///
/// The Dead Sea shore sits at -430 m; -500 m leaves margin for mines and
/// survey datum offsets.
pub const ALTITUDE_MIN_M: f64 = -500.0;

/// Highest plausible surface elevation, in meters.
///
/// Everest is 8849 m. Anything above 9000 m from a handheld receiver is a
/// multipath or cold-start artifact.
pub const ALTITUDE_MAX_M: f64 = 9000.0;

/// Maximum plausible altitude rate of change, in meters per second.
///
/// Covers elevators (~10 m/s) and light aircraft climbs with a wide
/// margin; genuine GPS glitches jump hundreds of meters between fixes.
pub const ALTITUDE_MAX_RATE_M_PER_S: f64 = 75.0;

/// Mean Earth radius in meters, for great-circle distance.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

//! Shared helpers for integration tests
//!
//! Builds synthetic fix recordings: a walker moving steadily north with a
//! configurable altitude profile, one fix per second, matching the cadence
//! a real receiver delivers at the default update request.

#![allow(dead_code)]

use heightmark_core::location::{GeoFix, ProviderKind};

/// Start of every synthetic recording, in ms
pub const WALK_START_MS: u64 = 1_000;

/// Fix cadence of the synthetic walker, in ms
pub const WALK_STEP_MS: u64 = 1_500;

/// Northward movement per fix, in degrees (~17 m)
pub const WALK_STEP_DEG: f64 = 0.000_15;

/// A walk with one fix per altitude in `profile`
///
/// Consecutive fixes are spaced so both the interval and the distance
/// threshold of the default update request are cleared.
pub fn walk(profile: &[f64]) -> Vec<GeoFix> {
    profile
        .iter()
        .enumerate()
        .map(|(i, &altitude_m)| GeoFix {
            latitude: 52.0 + i as f64 * WALK_STEP_DEG,
            longitude: 13.0,
            altitude_m,
            accuracy_m: 5.0,
            provider: ProviderKind::Gps,
            timestamp: WALK_START_MS + i as u64 * WALK_STEP_MS,
        })
        .collect()
}

/// A walk at a constant altitude
pub fn flat_walk(altitude_m: f64, fixes: usize) -> Vec<GeoFix> {
    walk(&vec![altitude_m; fixes])
}

/// Render a fix as a CSV record accepted by `FixLog`
pub fn csv_record(fix: &GeoFix) -> String {
    format!(
        "{},{},{},{},{},{}",
        fix.timestamp,
        fix.provider.name(),
        fix.latitude,
        fix.longitude,
        fix.altitude_m,
        fix.accuracy_m
    )
}

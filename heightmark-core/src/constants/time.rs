//! Time-Related Constants

/// Milliseconds per second.
pub const MS_PER_SECOND: u64 = 1000;

/// Period of the loading-readout animation cycle, in milliseconds.
///
/// Matches the one-second pulse of the original loading indicator.
pub const LOADING_CYCLE_MS: u64 = 1000;

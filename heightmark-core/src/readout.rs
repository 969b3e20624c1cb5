//! Elevation Readout Rendering
//!
//! The display surface reduced to a tiny state machine and a formatter.
//! Three things can be on screen: the animated loading text shown between
//! subscribing and the first fix, the smoothed elevation rounded to whole
//! units with a suffix, or the permission-required message.
//!
//! Rendering is pure: the animation frame is a function of the timestamp
//! passed in, so the same state renders deterministically in tests.

use core::fmt::Write;

use heapless::String;

use crate::constants::time::LOADING_CYCLE_MS;
use crate::units::{self, Unit};

/// Maximum rendered readout length in bytes
pub const READOUT_LEN: usize = 48;

/// Message shown when location access is refused
pub const PERMISSION_REQUIRED_TEXT: &str = "Location permission required";

/// Base of the loading animation
const LOADING_TEXT: &str = "Loading elevation";

/// Dot frames appended to the loading text over one animation cycle
const LOADING_FRAMES: [&str; 4] = ["", ".", "..", "..."];

/// What the elevation screen is currently showing
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayState {
    /// Subscribed, waiting for the first fix
    Loading,
    /// Showing a smoothed elevation (meters; converted at render time)
    Elevation(f64),
    /// Location access refused
    PermissionRequired,
}

impl DisplayState {
    /// Render this state for display
    ///
    /// `now` drives the loading animation; elevation states ignore it.
    pub fn render(&self, unit: Unit, now: u64) -> String<READOUT_LEN> {
        let mut out = String::new();

        match self {
            DisplayState::Loading => {
                let _ = out.push_str(LOADING_TEXT);
                let _ = out.push_str(loading_frame(now));
            }
            DisplayState::Elevation(meters) => {
                let _ = write!(out, "{}", format_elevation(*meters, unit).as_str());
            }
            DisplayState::PermissionRequired => {
                let _ = out.push_str(PERMISSION_REQUIRED_TEXT);
            }
        }

        out
    }
}

/// Pick the loading-animation frame for a timestamp
///
/// Cycles through the dot frames once per [`LOADING_CYCLE_MS`].
pub fn loading_frame(now: u64) -> &'static str {
    let frame_ms = LOADING_CYCLE_MS / LOADING_FRAMES.len() as u64;
    let phase = (now / frame_ms) as usize % LOADING_FRAMES.len();
    LOADING_FRAMES[phase]
}

/// Format an elevation for display: nearest whole unit plus suffix
///
/// `128.4 m` renders as `"128 m"`; `128.4 m` in feet is `421.3 ft` and
/// renders as `"421 ft"`.
pub fn format_elevation(meters: f64, unit: Unit) -> String<READOUT_LEN> {
    let converted = units::convert_elevation(meters, unit);
    let rounded = libm::round(converted) as i64;

    let mut out = String::new();
    let _ = write!(out, "{} {}", rounded, unit.suffix());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_metric() {
        assert_eq!(format_elevation(128.4, Unit::Metric).as_str(), "128 m");
        assert_eq!(format_elevation(128.5, Unit::Metric).as_str(), "129 m");
        assert_eq!(format_elevation(-430.2, Unit::Metric).as_str(), "-430 m");
    }

    #[test]
    fn formats_imperial() {
        // 100 m = 328.084 ft
        assert_eq!(format_elevation(100.0, Unit::Imperial).as_str(), "328 ft");
    }

    #[test]
    fn loading_animation_cycles() {
        assert_eq!(loading_frame(0), "");
        assert_eq!(loading_frame(250), ".");
        assert_eq!(loading_frame(500), "..");
        assert_eq!(loading_frame(750), "...");
        // wraps after one full cycle
        assert_eq!(loading_frame(1000), "");
    }

    #[test]
    fn render_states() {
        let loading = DisplayState::Loading.render(Unit::Metric, 250);
        assert_eq!(loading.as_str(), "Loading elevation.");

        let value = DisplayState::Elevation(100.0).render(Unit::Imperial, 0);
        assert_eq!(value.as_str(), "328 ft");

        let denied = DisplayState::PermissionRequired.render(Unit::Metric, 0);
        assert_eq!(denied.as_str(), PERMISSION_REQUIRED_TEXT);
    }
}

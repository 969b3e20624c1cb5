//! Core engine for HeightMark
//!
//! Turns a stream of GPS fixes into a smoothed, unit-converted elevation
//! readout. The pieces are deliberately small: a fixed ring of recent
//! altitude samples, a plausibility screen in front of it, a permission
//! state machine gating the data flow, and a durable one-key preference
//! store for the display unit.
//!
//! Everything except the preference store and file-backed fix logs is
//! `no_std`-capable; a single UI loop drives the whole thing, so no type
//! here is thread-safe and none needs to be.
//!
//! ```rust
//! use heightmark_core::{ElevationSession, Unit};
//! use heightmark_core::location::{LocationSource, ReplaySource, UpdateRequest};
//! use heightmark_core::constants::DEFAULT_WINDOW_SAMPLES;
//!
//! # let recorded_fixes = [];
//! let mut session: ElevationSession<DEFAULT_WINDOW_SAMPLES> =
//!     ElevationSession::new(UpdateRequest::default(), Unit::Metric);
//! let mut source = ReplaySource::new(&recorded_fixes);
//!
//! session.resume(&mut source).unwrap();
//! while let Ok(fix) = source.poll_fix() {
//!     session.handle_fix(&fix);
//! }
//! session.pause(&mut source);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod buffer;
pub mod constants;
pub mod elevation;
pub mod errors;
pub mod location;
pub mod permission;
pub mod readout;
pub mod session;
pub mod time;
pub mod units;
pub mod validator;

#[cfg(feature = "std")]
pub mod prefs;

// Public API
pub use elevation::ElevationTracker;
pub use errors::{FixError, FixResult, LocationError};
pub use permission::{FlowOutcome, PermissionFlow, PermissionState};
pub use readout::DisplayState;
pub use session::ElevationSession;
pub use units::Unit;

#[cfg(feature = "std")]
pub use prefs::{PreferenceStore, PrefsError};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

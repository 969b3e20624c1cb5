//! Location Sources
//!
//! ## Overview
//!
//! The crate never talks to GPS hardware directly; it pulls [`GeoFix`]es
//! from anything implementing [`LocationSource`]. The trait is pull-based
//! in the `nb` non-blocking idiom — `WouldBlock` means "no fix yet, come
//! back", which maps cleanly onto both a live receiver and a replayed
//! recording without an async runtime.
//!
//! ## Module Organization
//!
//! - Core types and the source trait (this file)
//! - [`replay`] — in-memory recordings for tests and demos
//! - [`throttle`] — interval/distance update filtering
//! - [`file`] — CSV / JSON-lines fix logs (requires `std`)
//!
//! ## Subscription Lifecycle
//!
//! Updates are requested on screen resume and removed on pause, so a
//! source is only active while the elevation screen is visible:
//!
//! ```text
//! resume ──► request_updates(request) ──► poll_fix()* ──► remove_updates ──► pause
//! ```

use crate::errors::LocationError;
use crate::time::Timestamp;

pub mod replay;
pub mod throttle;

#[cfg(feature = "std")]
pub mod file;

pub use replay::ReplaySource;
pub use throttle::UpdateThrottle;

#[cfg(feature = "std")]
pub use file::{FixLog, FixLogStats, LogFormat};

use crate::constants::location::{DEFAULT_MIN_DISTANCE_M, DEFAULT_UPDATE_INTERVAL_MS};

/// Which positioning backend produced a fix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ProviderKind {
    /// Satellite positioning; best altitude quality
    Gps,
    /// Cell/Wi-Fi positioning; coarse, altitude often interpolated
    Network,
}

impl ProviderKind {
    /// Human-readable provider name
    pub const fn name(&self) -> &'static str {
        match self {
            ProviderKind::Gps => "gps",
            ProviderKind::Network => "network",
        }
    }
}

/// One position report from a provider
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoFix {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Altitude above the reference datum, in meters
    pub altitude_m: f64,
    /// Estimated horizontal accuracy, in meters
    pub accuracy_m: f32,
    /// Backend that produced this fix
    pub provider: ProviderKind,
    /// Fix time in milliseconds
    pub timestamp: Timestamp,
}

/// Parameters of an update subscription
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateRequest {
    /// Preferred provider (fallback is the caller's policy)
    pub provider: ProviderKind,
    /// Minimum interval between delivered fixes, in milliseconds
    pub min_interval_ms: u32,
    /// Minimum movement between delivered fixes, in meters
    pub min_distance_m: f32,
}

impl UpdateRequest {
    /// Request with the default cadence for a provider
    pub const fn for_provider(provider: ProviderKind) -> Self {
        Self {
            provider,
            min_interval_ms: DEFAULT_UPDATE_INTERVAL_MS,
            min_distance_m: DEFAULT_MIN_DISTANCE_M,
        }
    }
}

impl Default for UpdateRequest {
    fn default() -> Self {
        Self::for_provider(ProviderKind::Gps)
    }
}

/// A pull-based producer of position fixes
///
/// ## Contract
///
/// - `poll_fix` before `request_updates` (or after `remove_updates`)
///   returns `WouldBlock`.
/// - `WouldBlock` is normal and repeated; callers decide how to wait.
/// - `RecordingExhausted` is sticky for finite sources.
/// - Losing access mid-subscription surfaces as
///   `LocationError::PermissionRequired` from `poll_fix`.
pub trait LocationSource {
    /// Transport error type (`()` for in-memory sources)
    type Error;

    /// Begin delivering fixes per `request`
    fn request_updates(
        &mut self,
        request: &UpdateRequest,
    ) -> Result<(), LocationError<Self::Error>>;

    /// Stop delivering fixes; idempotent
    fn remove_updates(&mut self);

    /// Whether updates are currently being delivered
    fn is_subscribed(&self) -> bool;

    /// Attempt to pull the next fix
    fn poll_fix(&mut self) -> nb::Result<GeoFix, LocationError<Self::Error>>;

    /// Whether a provider is enabled on this source
    fn provider_enabled(&self, provider: ProviderKind) -> bool;
}

/// Provider fallback policy: GPS when enabled, else network
pub fn select_provider<S: LocationSource + ?Sized>(source: &S) -> Option<ProviderKind> {
    if source.provider_enabled(ProviderKind::Gps) {
        Some(ProviderKind::Gps)
    } else if source.provider_enabled(ProviderKind::Network) {
        Some(ProviderKind::Network)
    } else {
        None
    }
}

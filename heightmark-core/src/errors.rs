//! Error Types for Fix Screening and Location Sources
//!
//! Two families of failure exist in this crate and they are kept apart:
//!
//! - [`FixError`] — a fix arrived but its altitude is not worth averaging
//!   (not a number, outside the terrestrial envelope, or changing
//!   implausibly fast). These are screening verdicts, not faults: the
//!   session counts and skips them.
//! - [`LocationError`] — the source itself failed: access to the location
//!   subsystem was refused, no provider is enabled, a recording ran out, or
//!   the transport/format layer broke.
//!
//! Error values are kept small and inline (`&'static str`, no `String`) so
//! they stay `Copy`-friendly and allocation-free on `no_std` targets. The
//! one place richer context is needed — I/O failures in the std-only fix
//! log — is carried in the generic `Transport` variant.

use core::fmt;

use thiserror_no_std::Error;

/// Result type for fix screening.
pub type FixResult<T> = Result<T, FixError>;

/// Why an incoming altitude reading was rejected before smoothing
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum FixError {
    /// Altitude is NaN or infinite
    #[error("Invalid altitude: not a valid number")]
    InvalidValue,

    /// Altitude outside the plausible terrestrial envelope
    #[error("Altitude {value} m outside range [{min}, {max}] m")]
    OutOfRange {
        /// The reported altitude that failed screening
        value: f64,
        /// Lower bound of the plausibility envelope
        min: f64,
        /// Upper bound of the plausibility envelope
        max: f64,
    },

    /// Altitude changed faster than anything that carries a phone
    #[error("Climb rate {rate} m/s exceeds limit {max_rate} m/s")]
    RateExceeded {
        /// Observed rate of change (m/s, absolute)
        rate: f64,
        /// Maximum plausible rate
        max_rate: f64,
    },
}

/// Errors produced by location sources
///
/// Generic over the transport error `E` so in-memory sources can use
/// `E = ()` while the file-backed log carries `std::io::Error`.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationError<E> {
    /// Access to the location subsystem was refused
    PermissionRequired,
    /// No enabled provider satisfies the update request
    NoProvider,
    /// A finite recording has no more fixes
    RecordingExhausted,
    /// Transport-level failure (e.g. I/O error)
    Transport(E),
    /// A fix record could not be parsed
    Format(&'static str),
}

impl<E: fmt::Display> fmt::Display for LocationError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PermissionRequired => write!(f, "Location permission required"),
            Self::NoProvider => write!(f, "No location provider enabled"),
            Self::RecordingExhausted => write!(f, "Fix recording exhausted"),
            Self::Transport(e) => write!(f, "Transport error: {}", e),
            Self::Format(msg) => write!(f, "Format error: {}", msg),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug + fmt::Display> std::error::Error for LocationError<E> {}

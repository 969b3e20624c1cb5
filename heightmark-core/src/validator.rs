//! Altitude Plausibility Screening
//!
//! GPS altitude fails in characteristic ways: NaN during a cold start,
//! kilometer-scale jumps from multipath reflections, and slow drift the
//! smoothing window already handles. A rolling mean has no defense against
//! the first two — one NaN poisons the window until every sample cycles
//! out — so fixes are screened before they reach the accumulator.
//!
//! Three checks, cheapest first:
//!
//! 1. the altitude is a finite number;
//! 2. it lies inside the terrestrial envelope (Dead Sea to Everest, with
//!    margin);
//! 3. it did not change faster than anything that carries a phone.
//!
//! Rejected fixes are verdicts, not faults — the session counts and skips
//! them and the display simply keeps its previous value.

use crate::constants::location::{ALTITUDE_MAX_M, ALTITUDE_MAX_RATE_M_PER_S, ALTITUDE_MIN_M};
use crate::constants::time::MS_PER_SECOND;
use crate::errors::{FixError, FixResult};
use crate::time::Timestamp;

/// A previously accepted altitude, for rate-of-change screening
#[derive(Debug, Clone, Copy)]
pub struct PriorReading {
    /// Altitude in meters
    pub meters: f64,
    /// When it was accepted
    pub timestamp: Timestamp,
}

/// Screens raw altitude readings before smoothing
#[derive(Debug, Clone)]
pub struct AltitudeValidator {
    /// Lowest acceptable altitude in meters
    min_m: f64,

    /// Highest acceptable altitude in meters
    max_m: f64,

    /// Maximum acceptable rate of change in m/s
    max_rate_m_per_s: f64,
}

impl Default for AltitudeValidator {
    fn default() -> Self {
        Self {
            min_m: ALTITUDE_MIN_M,
            max_m: ALTITUDE_MAX_M,
            max_rate_m_per_s: ALTITUDE_MAX_RATE_M_PER_S,
        }
    }
}

impl AltitudeValidator {
    /// Validator with custom limits (e.g. aviation use)
    pub fn new_with_limits(min_m: f64, max_m: f64, max_rate_m_per_s: f64) -> Self {
        Self {
            min_m,
            max_m,
            max_rate_m_per_s,
        }
    }

    /// Screen a reading against the envelope and the prior reading
    ///
    /// `prior` is the last reading that passed screening; rate-of-change
    /// is skipped when there is none or when the timestamps coincide.
    pub fn validate(
        &self,
        meters: f64,
        timestamp: Timestamp,
        prior: Option<PriorReading>,
    ) -> FixResult<()> {
        if !meters.is_finite() {
            return Err(FixError::InvalidValue);
        }

        if meters < self.min_m || meters > self.max_m {
            return Err(FixError::OutOfRange {
                value: meters,
                min: self.min_m,
                max: self.max_m,
            });
        }

        if let Some(prior) = prior {
            let dt_ms = timestamp.saturating_sub(prior.timestamp);
            if dt_ms > 0 {
                let rate = (meters - prior.meters).abs() * MS_PER_SECOND as f64 / dt_ms as f64;
                if rate > self.max_rate_m_per_s {
                    return Err(FixError::RateExceeded {
                        rate,
                        max_rate: self.max_rate_m_per_s,
                    });
                }
            }
        }

        Ok(())
    }
}

//! Interval/Distance Update Throttling
//!
//! The platform location manager only delivers an update once the
//! requested minimum time has elapsed *and* the device has moved the
//! requested minimum distance. Sources here are dumb pipes, so the same
//! filter is applied on the consumer side: the session passes every pulled
//! fix through an [`UpdateThrottle`] built from its [`UpdateRequest`].
//!
//! Distance uses the haversine great-circle formula — overkill for
//! meter-scale thresholds, but it is branch-free, allocation-free, and
//! correct across the antimeridian.

use crate::constants::location::EARTH_RADIUS_M;
use crate::location::{GeoFix, UpdateRequest};
use crate::time::Timestamp;

/// Consumer-side reimplementation of the platform's minTime/minDistance filter
#[derive(Debug, Clone)]
pub struct UpdateThrottle {
    min_interval_ms: u32,
    min_distance_m: f32,
    last: Option<LastFix>,
}

#[derive(Debug, Clone, Copy)]
struct LastFix {
    timestamp: Timestamp,
    latitude: f64,
    longitude: f64,
}

impl UpdateThrottle {
    /// Throttle matching the thresholds of `request`
    pub fn new(request: &UpdateRequest) -> Self {
        Self {
            min_interval_ms: request.min_interval_ms,
            min_distance_m: request.min_distance_m,
            last: None,
        }
    }

    /// Decide whether a fix passes the thresholds; admitted fixes become
    /// the new reference point
    ///
    /// The first fix is always admitted.
    pub fn admit(&mut self, fix: &GeoFix) -> bool {
        let admitted = match self.last {
            None => true,
            Some(last) => {
                let dt_ms = fix.timestamp.saturating_sub(last.timestamp);
                let moved_m =
                    great_circle_m(last.latitude, last.longitude, fix.latitude, fix.longitude);

                dt_ms >= self.min_interval_ms as u64 && moved_m >= self.min_distance_m as f64
            }
        };

        if admitted {
            self.last = Some(LastFix {
                timestamp: fix.timestamp,
                latitude: fix.latitude,
                longitude: fix.longitude,
            });
        }

        admitted
    }

    /// Forget the reference point (e.g. after pause)
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Great-circle distance between two coordinates, in meters
pub fn great_circle_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = libm::sin(d_phi / 2.0) * libm::sin(d_phi / 2.0)
        + libm::cos(phi1) * libm::cos(phi2) * libm::sin(d_lambda / 2.0) * libm::sin(d_lambda / 2.0);
    let c = 2.0 * libm::atan2(libm::sqrt(a), libm::sqrt(1.0 - a));

    EARTH_RADIUS_M * c
}

//! Elevation Screen Session
//!
//! The screen's behavior with the GUI stripped away: a single-threaded
//! state machine that subscribes to a location source while the screen is
//! visible, screens and throttles incoming fixes, feeds the smoothing
//! window, and knows what the readout should currently say.
//!
//! The session never owns the source — it borrows it for the lifecycle
//! calls so the same source can outlive pause/resume cycles, exactly as a
//! location manager outlives a screen.
//!
//! ```text
//! resume ──► select provider ──► request_updates
//!   │                                  │
//!   │            fix ◄─────────────────┘
//!   │             │ throttle (1 s / 1 m)
//!   │             │ screen (finite, envelope, rate)
//!   │             ▼
//!   │        tracker.add_reading ──► DisplayState::Elevation(mean)
//!   ▼
//! pause ──► remove_updates
//! ```

use crate::elevation::ElevationTracker;
use crate::errors::{FixError, LocationError};
use crate::location::{self, GeoFix, LocationSource, UpdateRequest, UpdateThrottle};
use crate::readout::{DisplayState, READOUT_LEN};
use crate::time::Timestamp;
use crate::units::Unit;
use crate::validator::{AltitudeValidator, PriorReading};

use heapless::String;

/// Ties tracker, validator, throttle, and readout together for one screen
#[derive(Debug, Clone)]
pub struct ElevationSession<const N: usize> {
    tracker: ElevationTracker<N>,
    validator: AltitudeValidator,
    throttle: UpdateThrottle,
    request: UpdateRequest,
    unit: Unit,
    display: DisplayState,
    last_accepted: Option<PriorReading>,
    rejected_fixes: u32,
}

impl<const N: usize> ElevationSession<N> {
    /// Session displaying in `unit`, subscribing with `request` thresholds
    pub fn new(request: UpdateRequest, unit: Unit) -> Self {
        Self {
            tracker: ElevationTracker::new(),
            validator: AltitudeValidator::default(),
            throttle: UpdateThrottle::new(&request),
            request,
            unit,
            display: DisplayState::Loading,
            last_accepted: None,
            rejected_fixes: 0,
        }
    }

    /// Replace the default altitude screening limits
    pub fn with_validator(mut self, validator: AltitudeValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Screen became visible: pick a provider and request updates
    ///
    /// Falls back from GPS to the network provider; errs with
    /// `NoProvider` when neither is enabled. While the window is still
    /// empty the readout shows the loading animation.
    pub fn resume<S: LocationSource>(
        &mut self,
        source: &mut S,
    ) -> Result<(), LocationError<S::Error>> {
        let provider = location::select_provider(source).ok_or(LocationError::NoProvider)?;

        let mut request = self.request;
        request.provider = provider;
        source.request_updates(&request)?;

        if self.tracker.is_empty() {
            self.display = DisplayState::Loading;
        }

        Ok(())
    }

    /// Screen went invisible: stop updates, keep the smoothed history
    pub fn pause<S: LocationSource>(&mut self, source: &mut S) {
        source.remove_updates();
    }

    /// Feed one fix through throttle and screening
    ///
    /// Returns the new rolling mean (meters) when the fix was accepted.
    /// Throttled fixes are silently dropped (the platform would never
    /// have delivered them); implausible fixes are counted in
    /// [`rejected_fixes`](Self::rejected_fixes).
    pub fn handle_fix(&mut self, fix: &GeoFix) -> Option<f64> {
        if !self.throttle.admit(fix) {
            return None;
        }

        if let Err(_e) = self
            .validator
            .validate(fix.altitude_m, fix.timestamp, self.last_accepted)
        {
            self.rejected_fixes += 1;
            return None;
        }

        self.last_accepted = Some(PriorReading {
            meters: fix.altitude_m,
            timestamp: fix.timestamp,
        });

        let mean = self.tracker.add_reading(fix.altitude_m);
        self.display = DisplayState::Elevation(mean);
        Some(mean)
    }

    /// Detailed screening verdict for a fix, without mutating anything
    pub fn screen_fix(&self, fix: &GeoFix) -> Result<(), FixError> {
        self.validator
            .validate(fix.altitude_m, fix.timestamp, self.last_accepted)
    }

    /// Location access disappeared: show the permission message
    ///
    /// The caller is expected to also `pause` the source.
    pub fn permission_lost(&mut self) {
        self.display = DisplayState::PermissionRequired;
    }

    /// Switch the display unit for subsequent renders
    pub fn set_unit(&mut self, unit: Unit) {
        self.unit = unit;
    }

    /// Current display unit
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Current display state
    pub fn display(&self) -> DisplayState {
        self.display
    }

    /// Render the readout for the current state
    pub fn readout(&self, now: Timestamp) -> String<READOUT_LEN> {
        self.display.render(self.unit, now)
    }

    /// Rolling mean in meters (NaN before the first accepted fix)
    pub fn smoothed(&self) -> f64 {
        self.tracker.average()
    }

    /// Number of readings currently in the window
    pub fn sample_count(&self) -> usize {
        self.tracker.sample_count()
    }

    /// Fixes rejected by plausibility screening so far
    pub fn rejected_fixes(&self) -> u32 {
        self.rejected_fixes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::ProviderKind;

    fn fix(timestamp: Timestamp, altitude_m: f64) -> GeoFix {
        GeoFix {
            // march north so the distance threshold is always cleared
            latitude: 52.0 + timestamp as f64 * 1e-6,
            longitude: 13.0,
            altitude_m,
            accuracy_m: 5.0,
            provider: ProviderKind::Gps,
            timestamp,
        }
    }

    #[test]
    fn session_starts_loading() {
        let session: ElevationSession<10> =
            ElevationSession::new(UpdateRequest::default(), Unit::Metric);
        assert_eq!(session.display(), DisplayState::Loading);
        assert!(session.smoothed().is_nan());
    }

    #[test]
    fn accepted_fix_updates_display() {
        let mut session: ElevationSession<10> =
            ElevationSession::new(UpdateRequest::default(), Unit::Metric);

        assert_eq!(session.handle_fix(&fix(1000, 120.0)), Some(120.0));
        assert_eq!(session.display(), DisplayState::Elevation(120.0));
        assert_eq!(session.readout(0).as_str(), "120 m");
    }

    #[test]
    fn implausible_fix_keeps_previous_display() {
        let mut session: ElevationSession<10> =
            ElevationSession::new(UpdateRequest::default(), Unit::Metric);

        session.handle_fix(&fix(1000, 120.0));
        assert_eq!(session.handle_fix(&fix(3000, f64::NAN)), None);

        assert_eq!(session.rejected_fixes(), 1);
        assert_eq!(session.display(), DisplayState::Elevation(120.0));
    }

    #[test]
    fn unit_switch_changes_render_only() {
        let mut session: ElevationSession<10> =
            ElevationSession::new(UpdateRequest::default(), Unit::Metric);
        session.handle_fix(&fix(1000, 100.0));

        session.set_unit(Unit::Imperial);
        assert_eq!(session.readout(0).as_str(), "328 ft");
        assert_eq!(session.smoothed(), 100.0);
    }

    #[test]
    fn permission_loss_shows_message() {
        let mut session: ElevationSession<10> =
            ElevationSession::new(UpdateRequest::default(), Unit::Metric);
        session.handle_fix(&fix(1000, 100.0));

        session.permission_lost();
        assert_eq!(session.display(), DisplayState::PermissionRequired);
    }
}

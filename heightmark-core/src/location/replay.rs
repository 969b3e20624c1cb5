//! In-Memory Fix Recordings
//!
//! Replays a slice of fixes for unit tests, demos, and simulated walks.
//! The source honors the subscription lifecycle (no fixes before
//! `request_updates` or after `remove_updates`) and can simulate a
//! mid-session permission revocation, which is otherwise hard to exercise.

use crate::errors::LocationError;
use crate::location::{GeoFix, LocationSource, ProviderKind, UpdateRequest};

/// Location source backed by a recorded slice of fixes
///
/// ## Example
///
/// ```rust
/// use heightmark_core::location::{GeoFix, LocationSource, ProviderKind, ReplaySource, UpdateRequest};
///
/// let fixes = [GeoFix {
///     latitude: 52.52,
///     longitude: 13.40,
///     altitude_m: 34.0,
///     accuracy_m: 4.0,
///     provider: ProviderKind::Gps,
///     timestamp: 1000,
/// }];
///
/// let mut source = ReplaySource::new(&fixes);
/// source.request_updates(&UpdateRequest::default()).unwrap();
/// assert_eq!(source.poll_fix().unwrap().altitude_m, 34.0);
/// ```
pub struct ReplaySource<'a> {
    /// Recorded fixes, in delivery order
    fixes: &'a [GeoFix],
    /// Next fix to deliver
    position: usize,
    /// Whether updates were requested and not yet removed
    subscribed: bool,
    /// Simulated provider toggles
    gps_enabled: bool,
    network_enabled: bool,
    /// Simulated mid-session permission loss
    access_revoked: bool,
}

impl<'a> ReplaySource<'a> {
    /// Replay source with both providers enabled
    pub fn new(fixes: &'a [GeoFix]) -> Self {
        Self {
            fixes,
            position: 0,
            subscribed: false,
            gps_enabled: true,
            network_enabled: true,
            access_revoked: false,
        }
    }

    /// Override which providers report as enabled
    pub fn with_providers(mut self, gps: bool, network: bool) -> Self {
        self.gps_enabled = gps;
        self.network_enabled = network;
        self
    }

    /// Rewind to the start of the recording
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Index of the next fix to deliver
    pub fn position(&self) -> usize {
        self.position
    }

    /// True once every recorded fix has been delivered
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.fixes.len()
    }

    /// Simulate the permission being revoked while subscribed
    ///
    /// Subsequent polls fail with `PermissionRequired`.
    pub fn revoke_access(&mut self) {
        self.access_revoked = true;
    }
}

impl<'a> LocationSource for ReplaySource<'a> {
    type Error = ();

    fn request_updates(&mut self, request: &UpdateRequest) -> Result<(), LocationError<()>> {
        if !self.provider_enabled(request.provider) {
            return Err(LocationError::NoProvider);
        }

        self.subscribed = true;
        Ok(())
    }

    fn remove_updates(&mut self) {
        self.subscribed = false;
    }

    fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    fn poll_fix(&mut self) -> nb::Result<GeoFix, LocationError<()>> {
        if !self.subscribed {
            return Err(nb::Error::WouldBlock);
        }

        if self.access_revoked {
            return Err(nb::Error::Other(LocationError::PermissionRequired));
        }

        if self.is_exhausted() {
            return Err(nb::Error::Other(LocationError::RecordingExhausted));
        }

        let fix = self.fixes[self.position];
        self.position += 1;
        Ok(fix)
    }

    fn provider_enabled(&self, provider: ProviderKind) -> bool {
        match provider {
            ProviderKind::Gps => self.gps_enabled,
            ProviderKind::Network => self.network_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixes() -> [GeoFix; 2] {
        [
            GeoFix {
                latitude: 52.0,
                longitude: 13.0,
                altitude_m: 100.0,
                accuracy_m: 5.0,
                provider: ProviderKind::Gps,
                timestamp: 1000,
            },
            GeoFix {
                latitude: 52.001,
                longitude: 13.0,
                altitude_m: 102.0,
                accuracy_m: 5.0,
                provider: ProviderKind::Gps,
                timestamp: 2000,
            },
        ]
    }

    #[test]
    fn blocks_until_subscribed() {
        let fixes = fixes();
        let mut source = ReplaySource::new(&fixes);

        assert_eq!(source.poll_fix(), Err(nb::Error::WouldBlock));

        source.request_updates(&UpdateRequest::default()).unwrap();
        assert_eq!(source.poll_fix().unwrap().altitude_m, 100.0);
    }

    #[test]
    fn exhaustion_is_reported() {
        let fixes = fixes();
        let mut source = ReplaySource::new(&fixes);
        source.request_updates(&UpdateRequest::default()).unwrap();

        source.poll_fix().unwrap();
        source.poll_fix().unwrap();
        assert_eq!(
            source.poll_fix(),
            Err(nb::Error::Other(LocationError::RecordingExhausted))
        );
        assert!(source.is_exhausted());
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let fixes = fixes();
        let mut source = ReplaySource::new(&fixes);
        source.request_updates(&UpdateRequest::default()).unwrap();
        source.poll_fix().unwrap();

        source.remove_updates();
        assert_eq!(source.poll_fix(), Err(nb::Error::WouldBlock));
        // position is preserved across pause/resume
        assert_eq!(source.position(), 1);
    }

    #[test]
    fn disabled_provider_rejected() {
        let fixes = fixes();
        let mut source = ReplaySource::new(&fixes).with_providers(false, true);

        let err = source
            .request_updates(&UpdateRequest::for_provider(ProviderKind::Gps))
            .unwrap_err();
        assert_eq!(err, LocationError::NoProvider);

        assert!(source
            .request_updates(&UpdateRequest::for_provider(ProviderKind::Network))
            .is_ok());
    }

    #[test]
    fn revocation_surfaces_permission_error() {
        let fixes = fixes();
        let mut source = ReplaySource::new(&fixes);
        source.request_updates(&UpdateRequest::default()).unwrap();

        source.revoke_access();
        assert_eq!(
            source.poll_fix(),
            Err(nb::Error::Other(LocationError::PermissionRequired))
        );
    }
}

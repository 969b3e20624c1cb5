//! Location Permission Flow
//!
//! ## Overview
//!
//! Access to the location subsystem is user-granted and revocable, so the
//! elevation screen cannot just start reading fixes: it runs a small
//! request/response state machine first. The platform's permission API and
//! the blocking prompts are both traits, which keeps the flow itself pure
//! and lets tests drive it with scripted fakes.
//!
//! ## Policy
//!
//! One canonical policy (earlier revisions of this flow disagreed with
//! each other; this is the settled one):
//!
//! ```text
//!                 ┌── already granted ──────────────► Granted
//! check ──────────┤
//!                 ├── rationale warranted ──► RequiresRationale
//!                 │       rationale prompt: grant ──► request
//!                 │                          exit  ──► Exit
//!                 └── otherwise ───────────► request
//!
//! request result: granted ────────────────► Granted
//!                 denied, rationale now ───► RequiresRationale (prompt again)
//!                 denied, no rationale ────► PermanentlyDenied
//!                         denial prompt: open settings ──► SettingsRequested
//!                                        exit ──────────► Exit
//! ```
//!
//! `Granted` enables the data flow; `Exit` is the user-chosen irrecoverable
//! exit. The state is ephemeral — recomputed on every check, never
//! persisted.

/// Permission state as seen by the elevation screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    /// No request has been issued yet this session
    Unrequested,
    /// Access granted; the data flow may start
    Granted,
    /// Access refused without a stronger signal (e.g. revoked mid-session)
    Denied,
    /// Refused, and the platform wants an explanation before re-asking
    RequiresRationale,
    /// Refused with re-prompting suppressed; only settings can fix it
    PermanentlyDenied,
}

/// Result of the platform's permission prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOutcome {
    /// At least one requested permission was granted
    Granted,
    /// Every requested permission was denied
    Denied,
}

/// User's choice on the rationale prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RationaleChoice {
    /// Re-issue the permission request
    Grant,
    /// Leave the app
    Exit,
}

/// User's choice on the permanent-denial prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialChoice {
    /// Jump to the system settings page for this app
    OpenSettings,
    /// Leave the app
    Exit,
}

/// How a completed flow run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
    /// Permission granted; start the location data flow
    Granted,
    /// User went to settings; the screen shows the permission message
    SettingsRequested,
    /// User chose to leave
    Exit,
}

/// The host platform's permission API
pub trait PermissionPlatform {
    /// Is the location permission currently granted?
    fn is_granted(&self) -> bool;

    /// Should an explanation be shown before (re-)requesting?
    fn should_show_rationale(&self) -> bool;

    /// Issue the permission prompt and block for its result
    fn request_permission(&mut self) -> PromptOutcome;

    /// Open the system settings page for this app
    fn open_settings(&mut self);
}

/// The two blocking prompts the flow can show
pub trait PermissionUi {
    /// Explain why location is needed; offer grant or exit
    fn show_rationale(&mut self) -> RationaleChoice;

    /// Explain that only settings can restore access; offer settings or exit
    fn show_permanent_denial(&mut self) -> DenialChoice;
}

/// State transition applied to a prompt result
///
/// `rationale_warranted` is the platform's post-prompt signal: a denial
/// with it set means the user can still be convinced; without it the
/// denial is permanent.
pub fn state_after_prompt(outcome: PromptOutcome, rationale_warranted: bool) -> PermissionState {
    match outcome {
        PromptOutcome::Granted => PermissionState::Granted,
        PromptOutcome::Denied if rationale_warranted => PermissionState::RequiresRationale,
        PromptOutcome::Denied => PermissionState::PermanentlyDenied,
    }
}

/// Drives the permission policy against a platform and its prompts
#[derive(Debug, Clone)]
pub struct PermissionFlow {
    state: PermissionState,
}

impl PermissionFlow {
    /// A flow that has not requested anything yet
    pub const fn new() -> Self {
        Self {
            state: PermissionState::Unrequested,
        }
    }

    /// Current permission state
    pub fn state(&self) -> PermissionState {
        self.state
    }

    /// Run one full check, blocking on prompts as needed
    ///
    /// Safe to call on every screen resume: if access is already granted
    /// nothing is shown.
    pub fn check<P, U>(&mut self, platform: &mut P, ui: &mut U) -> FlowOutcome
    where
        P: PermissionPlatform,
        U: PermissionUi,
    {
        if platform.is_granted() {
            self.state = PermissionState::Granted;
            return FlowOutcome::Granted;
        }

        if platform.should_show_rationale() {
            self.state = PermissionState::RequiresRationale;
            return self.run_rationale(platform, ui);
        }

        let outcome = platform.request_permission();
        self.resolve_prompt(outcome, platform, ui)
    }

    /// Record that a previously granted permission disappeared at runtime
    ///
    /// The data flow must stop; the next `check` re-runs the policy.
    pub fn note_revoked(&mut self) {
        self.state = PermissionState::Denied;
    }

    fn run_rationale<P, U>(&mut self, platform: &mut P, ui: &mut U) -> FlowOutcome
    where
        P: PermissionPlatform,
        U: PermissionUi,
    {
        match ui.show_rationale() {
            RationaleChoice::Exit => FlowOutcome::Exit,
            RationaleChoice::Grant => {
                let outcome = platform.request_permission();
                self.resolve_prompt(outcome, platform, ui)
            }
        }
    }

    fn resolve_prompt<P, U>(
        &mut self,
        outcome: PromptOutcome,
        platform: &mut P,
        ui: &mut U,
    ) -> FlowOutcome
    where
        P: PermissionPlatform,
        U: PermissionUi,
    {
        self.state = state_after_prompt(outcome, platform.should_show_rationale());

        match self.state {
            PermissionState::Granted => FlowOutcome::Granted,
            PermissionState::RequiresRationale => self.run_rationale(platform, ui),
            PermissionState::PermanentlyDenied => match ui.show_permanent_denial() {
                DenialChoice::OpenSettings => {
                    platform.open_settings();
                    FlowOutcome::SettingsRequested
                }
                DenialChoice::Exit => FlowOutcome::Exit,
            },
            // state_after_prompt only yields the three states above
            _ => unreachable!("prompt resolution produced {:?}", self.state),
        }
    }
}

impl Default for PermissionFlow {
    fn default() -> Self {
        Self::new()
    }
}

//! Permission flow scenarios
//!
//! Drives the full policy against scripted platform and prompt fakes.
//! Each scenario corresponds to a path a user can actually take through
//! the two dialogs.

use heightmark_core::permission::{
    DenialChoice, FlowOutcome, PermissionFlow, PermissionPlatform, PermissionState,
    PermissionUi, PromptOutcome, RationaleChoice,
};

/// Platform fake with scripted prompt results
struct ScriptedPlatform {
    granted: bool,
    rationale: Vec<bool>,
    prompt_results: Vec<PromptOutcome>,
    requests_issued: usize,
    settings_opened: bool,
}

impl ScriptedPlatform {
    fn new(granted: bool, rationale: &[bool], prompts: &[PromptOutcome]) -> Self {
        Self {
            granted,
            // popped front-to-back
            rationale: rationale.iter().rev().copied().collect(),
            prompt_results: prompts.iter().rev().copied().collect(),
            requests_issued: 0,
            settings_opened: false,
        }
    }
}

impl PermissionPlatform for ScriptedPlatform {
    fn is_granted(&self) -> bool {
        self.granted
    }

    fn should_show_rationale(&self) -> bool {
        *self.rationale.last().unwrap_or(&false)
    }

    fn request_permission(&mut self) -> PromptOutcome {
        self.requests_issued += 1;
        let result = self.prompt_results.pop().expect("unscripted prompt");
        self.rationale.pop();
        if result == PromptOutcome::Granted {
            self.granted = true;
        }
        result
    }

    fn open_settings(&mut self) {
        self.settings_opened = true;
    }
}

/// Prompt fake with scripted user choices
#[derive(Default)]
struct ScriptedUi {
    rationale_choices: Vec<RationaleChoice>,
    denial_choices: Vec<DenialChoice>,
    rationales_shown: usize,
    denials_shown: usize,
}

impl ScriptedUi {
    fn with_rationale(mut self, choice: RationaleChoice) -> Self {
        self.rationale_choices.insert(0, choice);
        self
    }

    fn with_denial(mut self, choice: DenialChoice) -> Self {
        self.denial_choices.insert(0, choice);
        self
    }
}

impl PermissionUi for ScriptedUi {
    fn show_rationale(&mut self) -> RationaleChoice {
        self.rationales_shown += 1;
        self.rationale_choices.pop().expect("unscripted rationale prompt")
    }

    fn show_permanent_denial(&mut self) -> DenialChoice {
        self.denials_shown += 1;
        self.denial_choices.pop().expect("unscripted denial prompt")
    }
}

#[test]
fn already_granted_shows_nothing() {
    let mut platform = ScriptedPlatform::new(true, &[], &[]);
    let mut ui = ScriptedUi::default();
    let mut flow = PermissionFlow::new();

    assert_eq!(flow.check(&mut platform, &mut ui), FlowOutcome::Granted);
    assert_eq!(flow.state(), PermissionState::Granted);
    assert_eq!(platform.requests_issued, 0);
    assert_eq!(ui.rationales_shown, 0);
}

#[test]
fn first_prompt_granted() {
    let mut platform = ScriptedPlatform::new(false, &[false], &[PromptOutcome::Granted]);
    let mut ui = ScriptedUi::default();
    let mut flow = PermissionFlow::new();

    assert_eq!(flow.check(&mut platform, &mut ui), FlowOutcome::Granted);
    assert_eq!(flow.state(), PermissionState::Granted);
    assert_eq!(platform.requests_issued, 1);
}

#[test]
fn denial_with_rationale_then_grant() {
    // deny once (rationale warranted afterwards), user grants on rationale,
    // second prompt granted
    let mut platform = ScriptedPlatform::new(
        false,
        &[false, true, false],
        &[PromptOutcome::Denied, PromptOutcome::Granted],
    );
    let mut ui = ScriptedUi::default().with_rationale(RationaleChoice::Grant);
    let mut flow = PermissionFlow::new();

    assert_eq!(flow.check(&mut platform, &mut ui), FlowOutcome::Granted);
    assert_eq!(flow.state(), PermissionState::Granted);
    assert_eq!(platform.requests_issued, 2);
    assert_eq!(ui.rationales_shown, 1);
}

#[test]
fn denial_with_rationale_then_exit() {
    let mut platform =
        ScriptedPlatform::new(false, &[false, true], &[PromptOutcome::Denied]);
    let mut ui = ScriptedUi::default().with_rationale(RationaleChoice::Exit);
    let mut flow = PermissionFlow::new();

    assert_eq!(flow.check(&mut platform, &mut ui), FlowOutcome::Exit);
    assert_eq!(flow.state(), PermissionState::RequiresRationale);
}

#[test]
fn rationale_warranted_before_first_prompt() {
    // A previous session already denied once: rationale comes first
    let mut platform =
        ScriptedPlatform::new(false, &[true, false], &[PromptOutcome::Granted]);
    let mut ui = ScriptedUi::default().with_rationale(RationaleChoice::Grant);
    let mut flow = PermissionFlow::new();

    assert_eq!(flow.check(&mut platform, &mut ui), FlowOutcome::Granted);
    assert_eq!(ui.rationales_shown, 1);
    assert_eq!(platform.requests_issued, 1);
}

#[test]
fn permanent_denial_to_settings() {
    let mut platform =
        ScriptedPlatform::new(false, &[false, false], &[PromptOutcome::Denied]);
    let mut ui = ScriptedUi::default().with_denial(DenialChoice::OpenSettings);
    let mut flow = PermissionFlow::new();

    assert_eq!(
        flow.check(&mut platform, &mut ui),
        FlowOutcome::SettingsRequested
    );
    assert_eq!(flow.state(), PermissionState::PermanentlyDenied);
    assert!(platform.settings_opened);
    assert_eq!(ui.denials_shown, 1);
}

#[test]
fn permanent_denial_to_exit() {
    let mut platform =
        ScriptedPlatform::new(false, &[false, false], &[PromptOutcome::Denied]);
    let mut ui = ScriptedUi::default().with_denial(DenialChoice::Exit);
    let mut flow = PermissionFlow::new();

    assert_eq!(flow.check(&mut platform, &mut ui), FlowOutcome::Exit);
    assert_eq!(flow.state(), PermissionState::PermanentlyDenied);
    assert!(!platform.settings_opened);
}

#[test]
fn recheck_after_settings_grant() {
    // User flipped the toggle in settings; the next check sees it granted
    let mut platform =
        ScriptedPlatform::new(false, &[false, false], &[PromptOutcome::Denied]);
    let mut ui = ScriptedUi::default().with_denial(DenialChoice::OpenSettings);
    let mut flow = PermissionFlow::new();

    flow.check(&mut platform, &mut ui);
    assert_eq!(flow.state(), PermissionState::PermanentlyDenied);

    platform.granted = true;
    assert_eq!(flow.check(&mut platform, &mut ui), FlowOutcome::Granted);
    assert_eq!(flow.state(), PermissionState::Granted);
}

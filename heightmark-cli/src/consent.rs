//! Terminal Consent Prompts
//!
//! The desktop analog of the platform permission dialogs. The permission
//! state machine in `heightmark-core` only sees the two traits; what a
//! "prompt" looks like lives entirely here.
//!
//! Answering `n` to the access prompt counts as a denial the user could
//! still be talked out of (rationale allowed); answering `never` mirrors
//! the platform's "don't ask again" and makes the denial permanent.

use std::io::{self, BufRead, Write};

use heightmark_core::permission::{
    DenialChoice, PermissionPlatform, PermissionUi, PromptOutcome, RationaleChoice,
};

/// In-process permission state driven by terminal prompts
///
/// Ephemeral by design: every run starts unrequested unless
/// `--allow-location` pre-grants access.
pub struct TerminalPlatform {
    granted: bool,
    denied_this_run: bool,
    suppressed: bool,
}

impl TerminalPlatform {
    /// Platform with access optionally pre-granted
    pub fn new(pre_granted: bool) -> Self {
        Self {
            granted: pre_granted,
            denied_this_run: false,
            suppressed: false,
        }
    }
}

impl PermissionPlatform for TerminalPlatform {
    fn is_granted(&self) -> bool {
        self.granted
    }

    fn should_show_rationale(&self) -> bool {
        self.denied_this_run && !self.suppressed && !self.granted
    }

    fn request_permission(&mut self) -> PromptOutcome {
        match ask("Allow HeightMark to access this device's location? [y/n/never] ") {
            Some(answer) if answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes") => {
                self.granted = true;
                PromptOutcome::Granted
            }
            Some(answer) if answer.eq_ignore_ascii_case("never") => {
                self.denied_this_run = true;
                self.suppressed = true;
                PromptOutcome::Denied
            }
            _ => {
                self.denied_this_run = true;
                PromptOutcome::Denied
            }
        }
    }

    fn open_settings(&mut self) {
        println!(
            "Grant HeightMark access to the fix recording (check file permissions), then run again."
        );
    }
}

/// The two blocking dialogs, rendered as stdin prompts
pub struct TerminalPrompts;

impl PermissionUi for TerminalPrompts {
    fn show_rationale(&mut self) -> RationaleChoice {
        println!("Location permission required");
        println!(
            "HeightMark needs location access to determine your elevation. \
             Without it the app cannot function."
        );

        match ask("[g]rant permission / [e]xit app: ") {
            Some(answer) if answer.eq_ignore_ascii_case("g") => RationaleChoice::Grant,
            _ => RationaleChoice::Exit,
        }
    }

    fn show_permanent_denial(&mut self) -> DenialChoice {
        println!("Location permission required");
        println!(
            "Location access was permanently denied. \
             It can only be restored from the system settings."
        );

        match ask("[s]ettings / [e]xit app: ") {
            Some(answer) if answer.eq_ignore_ascii_case("s") => DenialChoice::OpenSettings,
            _ => DenialChoice::Exit,
        }
    }
}

/// Prompt on stdout, read one trimmed line; None on EOF
fn ask(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    let _ = io::stdout().flush();

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

//! The Elevation Screen Loop
//!
//! Mirrors the lifecycle of the mobile screen: read the unit preference
//! (first value), walk the permission flow, resume the session against the
//! fix source, pull fixes on the main thread until the recording ends, and
//! pause on the way out. The readout is redrawn in place on one line.

use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Result};

use heightmark_core::constants::DEFAULT_WINDOW_SAMPLES;
use heightmark_core::location::{FixLog, LocationSource, LogFormat, UpdateRequest};
use heightmark_core::permission::{FlowOutcome, PermissionFlow};
use heightmark_core::prefs::PreferenceStore;
use heightmark_core::readout::PERMISSION_REQUIRED_TEXT;
use heightmark_core::session::ElevationSession;
use heightmark_core::time::{SystemClock, TimeSource};
use heightmark_core::units::Unit;
use heightmark_core::LocationError;

use crate::consent::{TerminalPlatform, TerminalPrompts};

/// Poll back-off while the source has no fix ready, in ms
const IDLE_POLL_MS: u64 = 100;

/// Everything the run subcommand needs
pub struct RunConfig {
    /// Fix recording to replay
    pub fixes: PathBuf,
    /// Recording format
    pub format: LogFormat,
    /// Header lines to skip (CSV only)
    pub skip_lines: usize,
    /// Settings file backing the unit preference
    pub settings: PathBuf,
    /// Skip the consent prompts
    pub allow_location: bool,
}

/// Run the elevation screen against a recorded fix log
pub fn run(config: RunConfig) -> Result<()> {
    let store = PreferenceStore::new(&config.settings);
    let unit = match store.unit() {
        Ok(unit) => unit,
        Err(e) => {
            log::warn!("unit preference unavailable, using meters: {}", e);
            Unit::Metric
        }
    };
    log::debug!("displaying elevation in {}", unit.name());

    let mut platform = TerminalPlatform::new(config.allow_location);
    let mut prompts = TerminalPrompts;
    let mut flow = PermissionFlow::new();

    match flow.check(&mut platform, &mut prompts) {
        FlowOutcome::Granted => {}
        FlowOutcome::SettingsRequested => {
            println!("{}", PERMISSION_REQUIRED_TEXT);
            return Ok(());
        }
        FlowOutcome::Exit => {
            log::info!("exiting at user request");
            return Ok(());
        }
    }

    // The one place an OS access refusal becomes the permission message
    let skip_lines = match config.format {
        LogFormat::Csv => config.skip_lines,
        LogFormat::JsonLines => 0,
    };
    let mut fix_log = match FixLog::open(&config.fixes, config.format) {
        Ok(log) => log.with_skip_lines(skip_lines),
        Err(LocationError::PermissionRequired) => {
            log::error!("fix recording is not readable by this process");
            println!("{}", PERMISSION_REQUIRED_TEXT);
            return Ok(());
        }
        Err(e) => bail!("opening fix recording {}: {}", config.fixes.display(), e),
    };

    let clock = SystemClock;
    let mut session: ElevationSession<DEFAULT_WINDOW_SAMPLES> =
        ElevationSession::new(UpdateRequest::default(), unit);

    if let Err(e) = session.resume(&mut fix_log) {
        bail!("starting location updates: {}", e);
    }

    let mut stdout = io::stdout();
    render(&mut stdout, &session, &clock)?;

    loop {
        match fix_log.poll_fix() {
            Ok(fix) => {
                if let Some(mean) = session.handle_fix(&fix) {
                    log::debug!(
                        "{} fix {:.1} m smoothed to {:.1} m",
                        fix.provider.name(),
                        fix.altitude_m,
                        mean
                    );
                }
                render(&mut stdout, &session, &clock)?;
            }
            Err(nb::Error::WouldBlock) => {
                render(&mut stdout, &session, &clock)?;
                thread::sleep(Duration::from_millis(IDLE_POLL_MS));
            }
            Err(nb::Error::Other(LocationError::RecordingExhausted)) => break,
            Err(nb::Error::Other(LocationError::PermissionRequired)) => {
                // Access revoked while updates were active
                flow.note_revoked();
                session.permission_lost();
                session.pause(&mut fix_log);
                render(&mut stdout, &session, &clock)?;
                println!();
                log::error!("location access revoked while updates were active");
                return Ok(());
            }
            Err(nb::Error::Other(e)) => {
                session.pause(&mut fix_log);
                println!();
                bail!("reading fix recording: {}", e);
            }
        }
    }

    session.pause(&mut fix_log);
    println!();

    let stats = fix_log.stats();
    log::info!(
        "replayed {} fixes ({} unparseable records, {} rejected as implausible)",
        stats.fixes_read,
        stats.parse_errors,
        session.rejected_fixes()
    );

    if session.sample_count() == 0 {
        println!("No usable fixes in the recording.");
    } else {
        println!(
            "Final elevation over the last {} fixes: {}",
            session.sample_count(),
            session.readout(clock.now()).as_str()
        );
    }

    Ok(())
}

/// Redraw the readout in place
fn render<const N: usize>(
    stdout: &mut io::Stdout,
    session: &ElevationSession<N>,
    clock: &SystemClock,
) -> Result<()> {
    write!(stdout, "\r{:<40}", session.readout(clock.now()).as_str())?;
    stdout.flush()?;
    Ok(())
}

//! HeightMark - smoothed GPS elevation in the terminal
//!
//! Replays a fix recording through the elevation engine and renders the
//! rolling-average altitude in the user's preferred unit, after walking
//! the same consent flow the mobile screen would.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use heightmark_core::location::LogFormat;
use heightmark_core::prefs::PreferenceStore;
use heightmark_core::units::Unit;

mod app;
mod consent;

/// HeightMark: rolling-average GPS elevation readout
#[derive(Parser)]
#[command(name = "heightmark")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file path
    #[arg(
        short,
        long,
        global = true,
        env = "HEIGHTMARK_SETTINGS",
        default_value = "settings.json"
    )]
    settings: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a fix recording and display the smoothed elevation
    Run {
        /// Fix recording to replay
        #[arg(short, long)]
        fixes: PathBuf,

        /// Recording format
        #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
        format: FormatArg,

        /// Header lines to skip in CSV recordings
        #[arg(long, default_value_t = 1)]
        skip_lines: usize,

        /// Grant location access without prompting
        #[arg(long)]
        allow_location: bool,
    },

    /// Persist the preferred display unit
    Unit {
        /// Unit to display elevations in
        #[arg(value_enum)]
        unit: UnitArg,
    },
}

#[derive(ValueEnum, Clone, Copy)]
enum FormatArg {
    /// timestamp,provider,latitude,longitude,altitude_m,accuracy_m
    Csv,
    /// One JSON fix object per line
    Jsonl,
}

impl From<FormatArg> for LogFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => LogFormat::Csv,
            FormatArg::Jsonl => LogFormat::JsonLines,
        }
    }
}

#[derive(ValueEnum, Clone, Copy)]
enum UnitArg {
    /// Meters
    Metric,
    /// Feet
    Imperial,
}

impl From<UnitArg> for Unit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Metric => Unit::Metric,
            UnitArg::Imperial => Unit::Imperial,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            fixes,
            format,
            skip_lines,
            allow_location,
        } => app::run(app::RunConfig {
            fixes,
            format: format.into(),
            skip_lines,
            settings: cli.settings,
            allow_location,
        }),
        Commands::Unit { unit } => set_unit(&cli.settings, unit.into()),
    }
}

fn set_unit(settings: &PathBuf, unit: Unit) -> Result<()> {
    let store = PreferenceStore::new(settings);
    store.set_unit(unit)?;
    println!("Elevation will be displayed in {}.", unit.name());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_run() {
        let cli = Cli::try_parse_from([
            "heightmark",
            "run",
            "--fixes",
            "walk.csv",
            "--allow-location",
        ])
        .unwrap();

        match cli.command {
            Commands::Run {
                fixes,
                allow_location,
                skip_lines,
                ..
            } => {
                assert_eq!(fixes, PathBuf::from("walk.csv"));
                assert!(allow_location);
                assert_eq!(skip_lines, 1);
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn cli_parses_unit_toggle() {
        let cli = Cli::try_parse_from(["heightmark", "unit", "imperial"]).unwrap();
        match cli.command {
            Commands::Unit { unit } => assert!(matches!(unit, UnitArg::Imperial)),
            _ => panic!("expected unit command"),
        }
    }
}

//! Unit Preference Persistence
//!
//! One durable boolean: `use_metric_unit`, default true. The store is a
//! tiny JSON document on disk, read in full on every query (first-value
//! semantics — there is no watcher, the screen re-reads on launch) and
//! rewritten in full on every toggle. Writes go through a temp file and a
//! rename so a crash mid-write leaves the previous document intact.
//!
//! There is deliberately no migration and no conflict resolution: a
//! malformed document surfaces as an error on read (callers fall back to
//! the default) and is replaced wholesale on the next write.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

use crate::units::Unit;

/// Conventional settings file name
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Default when no value has been stored
const USE_METRIC_DEFAULT: bool = true;

/// On-disk shape of the settings document
///
/// The flag is optional so an absent key keeps its default rather than
/// being pinned to whatever the default was when the file was written.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsDoc {
    #[serde(skip_serializing_if = "Option::is_none")]
    use_metric_unit: Option<bool>,
}

/// Failures of the preference store
#[derive(Error, Debug)]
pub enum PrefsError {
    /// Reading or writing the settings file failed
    #[error("Settings I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file exists but is not valid JSON
    #[error("Settings store is malformed: {0}")]
    Malformed(serde_json::Error),
}

/// Durable key-value store for the display-unit preference
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    /// Store backed by the given settings file (need not exist yet)
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the unit preference; true (metric) when nothing is stored
    pub fn use_metric_unit(&self) -> Result<bool, PrefsError> {
        Ok(self.load()?.use_metric_unit.unwrap_or(USE_METRIC_DEFAULT))
    }

    /// Read the unit preference as a [`Unit`]
    pub fn unit(&self) -> Result<Unit, PrefsError> {
        Ok(Unit::from_use_metric(self.use_metric_unit()?))
    }

    /// Durably upsert the unit preference
    pub fn set_use_metric_unit(&self, use_metric: bool) -> Result<(), PrefsError> {
        // A malformed document is replaced rather than blocking the toggle
        let mut doc = match self.load() {
            Ok(doc) => doc,
            Err(PrefsError::Malformed(e)) => {
                log::warn!(
                    "replacing malformed settings store {}: {}",
                    self.path.display(),
                    e
                );
                SettingsDoc::default()
            }
            Err(e) => return Err(e),
        };

        doc.use_metric_unit = Some(use_metric);
        self.persist(&doc)
    }

    /// Durably upsert the unit preference from a [`Unit`]
    pub fn set_unit(&self, unit: Unit) -> Result<(), PrefsError> {
        self.set_use_metric_unit(unit.use_metric())
    }

    fn load(&self) -> Result<SettingsDoc, PrefsError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SettingsDoc::default());
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&contents).map_err(PrefsError::Malformed)
    }

    fn persist(&self, doc: &SettingsDoc) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write-then-rename keeps the previous document on a crash
        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            serde_json::to_writer_pretty(&mut file, doc)
                .map_err(|e| PrefsError::Io(e.into()))?;
            file.write_all(b"\n")?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;

        Ok(())
    }
}

//! Core configuration supplied by the host application.
//!
//! # Responsibility
//! - Carry the notes directory and autosave debounce delay into core.
//! - Reject values core cannot operate with before any I/O happens.
//!
//! # Invariants
//! - `notes_dir` is non-empty and absolute after `validate()`.
//! - `autosave_delay_ms` is strictly positive after `validate()`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

/// Default debounce window between the last edit and its autosave.
pub const DEFAULT_AUTOSAVE_DELAY_MS: u64 = 1_000;

/// Configuration errors raised by `CoreConfig` parsing/validation.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    EmptyNotesDir,
    RelativeNotesDir(PathBuf),
    ZeroAutosaveDelay,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid core config: {err}"),
            Self::EmptyNotesDir => write!(f, "notes_dir cannot be empty"),
            Self::RelativeNotesDir(path) => write!(
                f,
                "notes_dir must be an absolute path, got `{}`",
                path.display()
            ),
            Self::ZeroAutosaveDelay => write!(f, "autosave_delay_ms must be greater than zero"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Host-provided settings consumed at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Directory holding one file per note. Platform-specific, host supplied.
    pub notes_dir: PathBuf,
    /// Debounce window for autosave, in milliseconds.
    #[serde(default = "default_autosave_delay_ms")]
    pub autosave_delay_ms: u64,
}

impl CoreConfig {
    /// Creates a config with the default autosave delay.
    pub fn new(notes_dir: impl Into<PathBuf>) -> Self {
        Self {
            notes_dir: notes_dir.into(),
            autosave_delay_ms: DEFAULT_AUTOSAVE_DELAY_MS,
        }
    }

    pub fn with_autosave_delay(mut self, delay: Duration) -> Self {
        self.autosave_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Parses and validates a JSON config document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.notes_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyNotesDir);
        }
        if !self.notes_dir.is_absolute() {
            return Err(ConfigError::RelativeNotesDir(self.notes_dir.clone()));
        }
        if self.autosave_delay_ms == 0 {
            return Err(ConfigError::ZeroAutosaveDelay);
        }
        Ok(())
    }
}

fn default_autosave_delay_ms() -> u64 {
    DEFAULT_AUTOSAVE_DELAY_MS
}

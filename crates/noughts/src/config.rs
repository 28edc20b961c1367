//! User settings loaded from a TOML file.

use derive_getters::Getters;
use derive_more::{Display, Error};
use noughts_engine::GameMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings for a play session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Mode the first round starts in.
    mode: GameMode,

    /// Pause before the computer's reply appears, in milliseconds.
    computer_delay_ms: u64,

    /// File that receives tracing output while the UI owns the terminal.
    log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: GameMode::VsComputer,
            computer_delay_ms: 350,
            log_file: PathBuf::from("noughts.log"),
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file. A missing file yields the defaults;
    /// keys absent from the file keep their default values.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            info!("Settings file not found, using defaults");
            return Ok(Self::default());
        }

        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::new(format!("Failed to read settings file: {}", e)))?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse settings: {}", e)))?;

        info!(mode = %settings.mode, delay_ms = settings.computer_delay_ms, "Settings loaded");
        Ok(settings)
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, mode: Option<GameMode>, delay_ms: Option<u64>) -> Self {
        if let Some(mode) = mode {
            self.mode = mode;
        }
        if let Some(delay_ms) = delay_ms {
            self.computer_delay_ms = delay_ms;
        }
        self
    }

    /// The computer reply delay as a [`Duration`].
    pub fn computer_delay(&self) -> Duration {
        Duration::from_millis(self.computer_delay_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.computer_delay(), Duration::from_millis(350));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "mode = \"local\"\ncomputer_delay_ms = 0").unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(*settings.mode(), GameMode::Local);
        assert_eq!(*settings.computer_delay_ms(), 0);
        assert_eq!(settings.log_file(), &PathBuf::from("noughts.log"));
    }

    #[test]
    fn test_cpu_alias_accepted() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "mode = \"cpu\"").unwrap();
        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(*settings.mode(), GameMode::VsComputer);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "mode = \"online\"").unwrap();
        let err = Settings::load(file.path()).unwrap_err();
        assert!(err.message.starts_with("Failed to parse settings"));
    }

    #[test]
    fn test_overrides_win() {
        let settings = Settings::default().with_overrides(Some(GameMode::Local), Some(10));
        assert_eq!(*settings.mode(), GameMode::Local);
        assert_eq!(settings.computer_delay(), Duration::from_millis(10));

        let untouched = Settings::default().with_overrides(None, None);
        assert_eq!(untouched, Settings::default());
    }
}

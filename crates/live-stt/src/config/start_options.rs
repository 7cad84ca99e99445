//! Recognition start options and their on-disk form.
//!
//! Options are plain TOML. Missing fields fall back to the defaults, so a
//! file holding only `lang = "de-DE"` is valid.

use crate::{
    ConfigError,
    config::{DEFAULT_CONTINUOUS, DEFAULT_INTERIM_RESULTS, DEFAULT_LANG, OPTIONS_FILE_NAME},
};

use std::{
    fs,
    io::{ErrorKind as IoErrorKind, Write},
    panic::Location,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Options pushed to the engine on every `start()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartOptions {
    /// BCP-47 locale tag.
    pub lang: String,
    /// Keep listening across multiple utterances.
    pub continuous: bool,
    /// Emit provisional results while the user is speaking.
    pub interim_results: bool,
}

impl Default for StartOptions {
    fn default() -> Self {
        Self {
            lang: DEFAULT_LANG.to_string(),
            continuous: DEFAULT_CONTINUOUS,
            interim_results: DEFAULT_INTERIM_RESULTS,
        }
    }
}

impl StartOptions {
    /// Replace the locale tag.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    /// Replace the continuous flag.
    pub fn with_continuous(mut self, continuous: bool) -> Self {
        self.continuous = continuous;
        self
    }

    /// Replace the interim results flag.
    pub fn with_interim_results(mut self, interim_results: bool) -> Self {
        self.interim_results = interim_results;
        self
    }

    /// Parse options from a TOML document.
    #[track_caller]
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Load options from `path`.
    #[track_caller]
    #[instrument]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
            location: ErrorLocation::from(Location::caller()),
        })?;

        let options = Self::from_toml_str(&contents)?;

        info!(path = ?path, lang = %options.lang, "Start options loaded");

        Ok(options)
    }

    /// Load options from `path`, falling back to defaults when the file
    /// does not exist. Any other read or parse failure is returned.
    #[track_caller]
    #[instrument]
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                debug!(path = ?path, "No options file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    /// Save options to `path` using an atomic write.
    ///
    /// Writes to a temporary file first, then renames it over `path`.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
            reason: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let temp_path = path.with_extension("toml.tmp");
        let write_error = |source: std::io::Error| ConfigError::Write {
            path: temp_path.clone(),
            source,
            location: ErrorLocation::from(Location::caller()),
        };

        let mut temp_file = fs::File::create(&temp_path).map_err(write_error)?;
        temp_file
            .write_all(contents.as_bytes())
            .map_err(write_error)?;
        temp_file.sync_all().map_err(write_error)?;

        fs::rename(&temp_path, path).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(path = ?path, "Start options saved (atomic write)");

        Ok(())
    }

    /// Per-user options file inside the platform config directory.
    ///
    /// The directory is created if it does not exist yet.
    #[track_caller]
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let proj_dirs = ProjectDirs::from("com", "live-stt", "Live-STT").ok_or_else(|| {
            ConfigError::NoConfigDir {
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
                path: config_dir.to_path_buf(),
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join(OPTIONS_FILE_NAME))
    }
}

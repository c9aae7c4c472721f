//! Configuration management for the ella application.
//!
//! This module handles loading and validating configuration settings from environment
//! variables, with sensible defaults.
//!
//! # Environment Variables
//!
//! - `ELLA_DIR`: Path to the data directory (defaults to ~/.ella)
//! - `ELLA_PASSPHRASE`: Journal passphrase; when unset the user is prompted
//! - `ELLA_LOG_FORMAT`: `text` (default) or `json`
//! - `HOME`: Used for expanding the default data directory path

use crate::constants::{
    DEFAULT_DATA_SUBDIR, ENV_VAR_ELLA_DIR, ENV_VAR_ELLA_LOG_FORMAT, ENV_VAR_ELLA_PASSPHRASE,
    ENV_VAR_HOME, LOG_FORMAT_JSON, LOG_FORMAT_TEXT, REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Configuration for the ella application.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use ella::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     data_dir: PathBuf::from("/path/to/ella"),
///     passphrase: None,
///     log_format: "text".to_string(),
/// };
/// assert!(config.validate().is_ok());
/// ```
pub struct Config {
    /// Directory holding the entry store and settings.
    ///
    /// Loaded from `ELLA_DIR` with a fallback to `~/.ella`.
    pub data_dir: PathBuf,

    /// Passphrase supplied through `ELLA_PASSPHRASE`, if any.
    pub passphrase: Option<String>,

    /// Log output format, `text` or `json`.
    pub log_format: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("data_dir", &"[REDACTED_PATH]")
            .field(
                "passphrase",
                &self.passphrase.as_ref().map(|_| REDACTED_PLACEHOLDER),
            )
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from(""),
            passphrase: None,
            log_format: LOG_FORMAT_TEXT.to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// The data directory path is expanded with `shellexpand` to handle `~`
    /// and environment variable references.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - The data directory path expansion fails
    /// - The data directory path is empty
    /// - `ELLA_LOG_FORMAT` is neither `text` nor `json`
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use ella::Config;
    ///
    /// match Config::load() {
    ///     Ok(config) => println!("Data directory: {}", config.data_dir.display()),
    ///     Err(err) => eprintln!("Failed to load config: {}", err),
    /// }
    /// ```
    pub fn load() -> AppResult<Self> {
        let data_dir_str = env::var(ENV_VAR_ELLA_DIR).unwrap_or_else(|_| {
            let home = env::var(ENV_VAR_HOME).unwrap_or_default();
            format!("{}/{}", home, DEFAULT_DATA_SUBDIR)
        });

        let expanded_path = shellexpand::full(&data_dir_str)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
        let data_dir = PathBuf::from(expanded_path.into_owned());

        if data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        let log_format = env::var(ENV_VAR_ELLA_LOG_FORMAT)
            .map(|format| format.to_lowercase())
            .unwrap_or_else(|_| LOG_FORMAT_TEXT.to_string());
        if log_format != LOG_FORMAT_TEXT && log_format != LOG_FORMAT_JSON {
            return Err(AppError::Config(format!(
                "Unsupported log format '{}'. Use '{}' or '{}'",
                log_format, LOG_FORMAT_TEXT, LOG_FORMAT_JSON
            )));
        }

        Ok(Config {
            data_dir,
            passphrase: env::var(ENV_VAR_ELLA_PASSPHRASE).ok(),
            log_format,
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` with one of the following messages:
    /// - "Data directory path is empty"
    /// - "Data directory must be an absolute path"
    ///
    /// # Examples
    ///
    /// ```
    /// use ella::Config;
    /// use std::path::PathBuf;
    ///
    /// let invalid_config = Config {
    ///     data_dir: PathBuf::from("relative/path"),
    ///     ..Config::default()
    /// };
    /// assert!(invalid_config.validate().is_err());
    /// ```
    pub fn validate(&self) -> AppResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        if !self.data_dir.is_absolute() {
            return Err(AppError::Config(
                "Data directory must be an absolute path".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether logs should be emitted as JSON.
    pub fn json_logs(&self) -> bool {
        self.log_format == LOG_FORMAT_JSON
    }
}

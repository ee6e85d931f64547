//! Application configuration management.
//!
//! Settings are layered with figment, lowest priority first:
//!
//! 1. Built-in defaults ([`Config::default`])
//! 2. TOML config file (`--config <PATH>`, or the platform config directory)
//! 3. Environment variables prefixed with `MODELSUM_` (e.g. `MODELSUM_STRICT=true`)
//! 4. Command-line flags, applied by the caller after loading
//!
//! # Example config file
//!
//! ```toml
//! algorithm = "sha256"
//! skip_hidden = true
//! ignore_patterns = ["checkpoints/", "*.tmp.pt"]
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scanner::Algorithm;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "MODELSUM_";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// A layer could not be parsed or had a wrongly typed value.
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Digest algorithm used when no `--algorithm` flag is given.
    pub algorithm: Algorithm,
    /// Follow symbolic links while scanning.
    pub follow_symlinks: bool,
    /// Skip hidden files and directories while scanning.
    pub skip_hidden: bool,
    /// Abort a scan on the first unreadable file.
    pub strict: bool,
    /// Gitignore-style patterns always excluded from scans.
    pub ignore_patterns: Vec<String>,
    /// Show a progress spinner during scans.
    pub progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Sha256,
            follow_symlinks: false,
            skip_hidden: false,
            strict: false,
            ignore_patterns: Vec::new(),
            progress: true,
        }
    }
}

impl Config {
    /// Default platform-specific config file path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "modelsum").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Build the layered figment without extracting it.
    ///
    /// `file` is merged when given; a missing file contributes nothing.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Load configuration.
    ///
    /// With `explicit = Some(path)` the file must exist. Otherwise the
    /// platform default path is used if present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] for a missing explicit file and
    /// [`ConfigError::Invalid`] when any layer fails to deserialize.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match explicit {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|p| p.exists()),
        };

        match &file {
            Some(path) => log::debug!("Loading config from {}", path.display()),
            None => log::debug!("No config file, using defaults and environment"),
        }

        let config = Self::figment(file.as_deref())
            .extract()
            .map_err(Box::new)?;
        Ok(config)
    }
}

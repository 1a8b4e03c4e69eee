//! Configuration file support for dialite.
//!
//! Configuration is read from `config.toml` in the platform config
//! directory (e.g. `~/.config/dialite/config.toml` on Linux), then
//! environment variables override individual settings:
//!
//! - `DIALITE_BACKEND`: `auto`, `terminal` or `stub`
//! - `DIALITE_OPEN_HELP`: whether to open the help page when a required
//!   dialog cannot be shown

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::backend::{BackendPreference, LinuxTool};

/// Page explaining how to get dialogs working on an unsupported system.
pub const DEFAULT_HELP_URL: &str = "https://dialite.readthedocs.io";

/// Environment variable overriding [`DialiteConfig::backend`].
pub const BACKEND_ENV: &str = "DIALITE_BACKEND";

/// Environment variable overriding [`DialiteConfig::open_help_on_unsupported`].
pub const OPEN_HELP_ENV: &str = "DIALITE_OPEN_HELP";

/// dialite configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialiteConfig {
    /// Where the backend fallback chain starts
    pub backend: BackendPreference,

    /// Linux dialog tools, in probe order (empty = default order)
    pub linux_tools: Vec<LinuxTool>,

    /// Help page opened when a dialog is required but impossible
    pub help_url: String,

    /// Open `help_url` in a browser on that failure
    pub open_help_on_unsupported: bool,
}

impl Default for DialiteConfig {
    fn default() -> Self {
        DialiteConfig {
            backend: BackendPreference::Auto,
            linux_tools: Vec::new(),
            help_url: DEFAULT_HELP_URL.to_string(),
            open_help_on_unsupported: true,
        }
    }
}

impl DialiteConfig {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        let config: DialiteConfig = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("invalid config: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration with fallback to defaults if the file is missing
    /// or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Load the user's configuration and apply environment overrides.
    pub fn discover() -> Self {
        let mut config = match config_path() {
            Some(path) => Self::load_or_default(&path),
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create config directory: {}", parent.display())
            })?;
        }

        let contents =
            toml::to_string_pretty(self).with_context(|| "failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("failed to write config: {}", path.display()))?;

        Ok(())
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.help_url)
            .with_context(|| format!("help_url `{}` is not a valid URL", self.help_url))?;
        Ok(())
    }

    /// Apply environment overrides using `get` to read variables.
    ///
    /// Invalid values are ignored with a warning.
    pub fn apply_env(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(value) = get(BACKEND_ENV) {
            match value.parse() {
                Ok(pref) => self.backend = pref,
                Err(e) => tracing::warn!("ignoring {}: {}", BACKEND_ENV, e),
            }
        }

        if let Some(value) = get(OPEN_HELP_ENV) {
            match parse_bool(&value) {
                Some(flag) => self.open_help_on_unsupported = flag,
                None => tracing::warn!(
                    "ignoring {}: expected true or false, got `{}`",
                    OPEN_HELP_ENV,
                    value
                ),
            }
        }
    }
}

/// Path of the user configuration file, if a home directory is known.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "dialite").map(|dirs| dirs.config_dir().join("config.toml"))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

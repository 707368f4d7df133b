pub mod appearance;
pub mod logging;
pub mod store;

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use self::{appearance::Appearance, logging::Logging, store::Store};

/// Top level configuration, read from a TOML file.
///
/// Every section is optional in the file and falls back to its default:
///
/// - `appearance`: row colors.
/// - `store`: what the store is seeded with.
/// - `logging`: console stream and log file location.
///
/// Unknown sections and keys are rejected rather than ignored.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub appearance: Appearance,
    pub store: Store,
    pub logging: Logging,
}

impl Default for Config {
    #[tracing::instrument(level = "info")]
    fn default() -> Self {
        info!("Creating default config");
        Self {
            appearance: Appearance::default(),
            store: Store::default(),
            logging: Logging::default(),
        }
    }
}

impl Config {
    /// Reads a config from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML for
    /// a `Config`.
    #[tracing::instrument(level = "debug")]
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file '{}'", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Could not parse config file '{}'", path.display()))
    }

    /// Like [`Config::load`], but a missing file yields the default config.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    #[tracing::instrument(level = "debug")]
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            info!("No config found at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Writes the config as TOML, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be
    /// written.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn save(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string(self).context("Could not serialize config")?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Could not create directory '{}'", parent.display()))?;
        }
        fs::write(path, toml)
            .with_context(|| format!("Could not write config file '{}'", path.display()))?;
        Ok(())
    }
}

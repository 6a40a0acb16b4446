//! Configuration file handling for paylog.
//!
//! The configuration file is stored at `$PAYLOG_HOME/config.json`. It holds the settings for an
//! interactive session: where to get the help text and how tables are sorted initially.

use crate::help::{BundledHelp, HelpSource, RemoteHelp};
use crate::model::Sorts;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

const APP_NAME: &str = "paylog";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$PAYLOG_HOME` and from there it loads `$PAYLOG_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the home directory and an initial `config.json` with default settings.
    ///
    /// # Errors
    /// - Returns an error if any file operations fail.
    pub async fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the paylog home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        let config_file = ConfigFile::default();
        config_file.save(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    /// This will
    /// - validate that `paylog_home` and its config file exist
    /// - load and validate the config file
    /// - return the loaded configuration object
    pub async fn load(paylog_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = paylog_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("Paylog Home is missing, run 'paylog init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;
        debug!("Loaded config from {}", config_path.display());

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn help_url(&self) -> Option<&str> {
        self.config_file.help_url.as_deref()
    }

    /// The initial sort of each table.
    pub fn sorts(&self) -> Sorts {
        self.config_file.sorts.unwrap_or_default()
    }

    /// The help text comes from `help_url` when one is configured, otherwise it is bundled.
    pub fn help_source(&self) -> Arc<dyn HelpSource> {
        match self.help_url() {
            Some(url) => Arc::new(RemoteHelp::new(url)),
            None => Arc::new(BundledHelp),
        }
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "paylog",
///   "config_version": 1,
///   "help_url": "https://example.com/paylog/HELP.md",
///   "sorts": {
///     "base": { "column": "day", "order": "desc" },
///     "day": { "column": "day", "order": "asc" },
///     "month": { "column": "month", "order": "asc" },
///     "channel": { "column": "yen", "order": "desc" }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "paylog"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Where to download the help text from. The bundled text is used if not specified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    help_url: Option<String>,

    /// The initial sort of each table. The built-in defaults are used if not specified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sorts: Option<Sorts>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            help_url: None,
            sorts: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config: ConfigFile = utils::deserialize(path.as_ref()).await?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }
}

//! Configuration for taskflow.
//!
//! Settings live in `config.json` inside the platform data directory (see
//! [`DataStorage`]). The file is organised in optional modules; currently the
//! only module is `backend`, which holds the hosted backend's URL, its public
//! API key and the login email. The password is never written here; it goes
//! through [`Secret`](super::secret::Secret).
//!
//! Environment variables (also read from a `.env` file) override the file:
//!
//! - `TASKFLOW_URL`
//! - `TASKFLOW_ANON_KEY`
//! - `TASKFLOW_EMAIL`
//!
//! ```rust,no_run
//! use taskflow::libs::config::Config;
//!
//! let config = Config::read()?;
//! let backend = config.backend()?;
//! println!("{}", backend.url);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::api::supabase::BackendConfig;
use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, MultiSelect};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "config.json";

pub const ENV_URL: &str = "TASKFLOW_URL";
pub const ENV_ANON_KEY: &str = "TASKFLOW_ANON_KEY";
pub const ENV_EMAIL: &str = "TASKFLOW_EMAIL";

/// A selectable entry of the `init` wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<BackendConfig>,
}

impl Config {
    /// Reads the configuration file, or returns the default when there is none.
    pub fn read() -> Result<Config> {
        Self::read_from(&DataStorage::new().get_path(CONFIG_FILE_NAME)?)
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let config_str = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&config_str)?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&DataStorage::new().get_path(CONFIG_FILE_NAME)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    pub fn delete() -> Result<()> {
        DataStorage::new().remove(CONFIG_FILE_NAME)
    }

    /// Interactive wizard over the existing configuration.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![BackendConfig::module()];
        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .defaults(&vec![true; modules.len()])
            .interact()?;

        for &selection in &selected {
            if modules[selection].key == BackendConfig::module().key {
                config.backend = Some(BackendConfig::init(&config.backend)?);
            }
        }

        Ok(config)
    }

    /// Backend settings with environment overrides applied.
    pub fn backend(&self) -> Result<BackendConfig> {
        let overrides = EnvOverrides::from_env();
        overrides
            .apply(self.backend.clone())
            .ok_or_else(|| msg_error_anyhow!(Message::BackendNotConfigured))
    }
}

/// Backend values taken from the environment.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub url: Option<String>,
    pub anon_key: Option<String>,
    pub email: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        let read = |name: &str| env::var(name).ok().filter(|value| !value.trim().is_empty());
        Self {
            url: read(ENV_URL),
            anon_key: read(ENV_ANON_KEY),
            email: read(ENV_EMAIL),
        }
    }

    /// Layers the overrides on top of `base`.
    ///
    /// Without a file config, URL and key must both come from the
    /// environment; the email may then still be empty and is asked for at
    /// login.
    pub fn apply(&self, base: Option<BackendConfig>) -> Option<BackendConfig> {
        let mut config = match base {
            Some(config) => config,
            None => BackendConfig {
                url: self.url.clone()?,
                anon_key: self.anon_key.clone()?,
                email: String::new(),
            },
        };
        if let Some(url) = &self.url {
            config.url = url.clone();
        }
        if let Some(anon_key) = &self.anon_key {
            config.anon_key = anon_key.clone();
        }
        if let Some(email) = &self.email {
            config.email = email.clone();
        }
        Some(config)
    }
}

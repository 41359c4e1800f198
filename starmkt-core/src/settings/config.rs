use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::{env, path::Path};

use super::policy::PolicySettings;
use crate::authorization::{Authorizer, PolicyError};

#[derive(Debug, Deserialize, Clone, Default)]
#[readonly::make]
pub struct Settings {
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub policy: PolicySettings,
}

impl Settings {
    pub fn get_environment() -> Environment {
        Environment::default()
            .prefix("STARMKT")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }

    /// Load settings from `./config`
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_dir("config")
    }

    /// Layering: `default`, then `{run_mode}`, then `local`, then
    /// `STARMKT__*` environment variables. All files are optional.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load(dir, Self::get_environment())
    }

    /// Same as [`Settings::from_dir`] with an explicit environment source
    pub fn load(dir: impl AsRef<Path>, environment: Environment) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();
        let run_mode = env::var("STARMKT_RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .set_default("debug", false)?
            .add_source(File::from(dir.join("default")).required(false))
            .add_source(File::from(dir.join(&run_mode)).required(false))
            .add_source(File::from(dir.join("local")).required(false))
            .add_source(environment)
            .build()?;

        s.try_deserialize()
    }

    /// Build the shared authorizer from the configured policy
    pub fn authorizer(&self) -> Result<Authorizer, PolicyError> {
        Ok(Authorizer::new(self.policy.permission_table()?))
    }
}

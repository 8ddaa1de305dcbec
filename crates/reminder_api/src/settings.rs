//! Process settings.
//!
//! Sources, lowest to highest precedence: built-in defaults, an optional
//! `reminder.toml` file, then `REMINDER_*` environment variables.

use config::{Config, ConfigError, Environment, File};
use reminder_core::default_log_level;
use serde::Deserialize;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "reminder.toml";
pub const ENV_PREFIX: &str = "REMINDER";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_DATABASE_PATH: &str = "reminders.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub bind_addr: String,
    pub database_path: PathBuf,
    pub log_level: String,
    /// Absolute directory for rolling log files; stderr when unset.
    pub log_dir: Option<String>,
}

#[derive(Debug)]
pub enum SettingsError {
    Config(ConfigError),
    InvalidBindAddr(String),
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "failed to load settings: {err}"),
            Self::InvalidBindAddr(value) => write!(f, "invalid bind_addr `{value}`"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::InvalidBindAddr(_) => None,
        }
    }
}

impl From<ConfigError> for SettingsError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl Settings {
    /// Loads settings from `reminder.toml` in the working directory and the
    /// process environment.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(Path::new(SETTINGS_FILE), None)
    }

    /// Loads settings from an explicit file path.
    ///
    /// `env` replaces the process environment when given.
    pub fn load_from(
        file: &Path,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, SettingsError> {
        let settings: Self = Config::builder()
            .set_default("bind_addr", DEFAULT_BIND_ADDR)?
            .set_default("database_path", DEFAULT_DATABASE_PATH)?
            .set_default("log_level", default_log_level())?
            .add_source(File::from(file).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).source(env))
            .build()?
            .try_deserialize()?;

        settings.socket_addr()?;
        Ok(settings)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, SettingsError> {
        self.bind_addr
            .parse()
            .map_err(|_| SettingsError::InvalidBindAddr(self.bind_addr.clone()))
    }
}

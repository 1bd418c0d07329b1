//! Configuration management for Quit-Math
//!
//! Every section has defaults, so a missing file or a partial file is
//! valid. Example:
//!
//! ```toml
//! [ode]
//! alpha_c = 0.2
//!
//! [scheduler]
//! max_tasks_per_hour = 3
//!
//! [ui]
//! tick_rate_ms = 250
//!
//! [logging]
//! level = "debug"
//! format = "json"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::service::auth::AuthConfig;
use crate::service::eco::EcoCoefficients;
use crate::service::markov::MarkovParams;
use crate::service::ode::OdeParams;
use crate::service::scheduler::SchedulerConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ode: OdeParams,
    pub markov: MarkovParams,
    pub scheduler: SchedulerConfig,
    pub eco: EcoCoefficients,
    pub auth: AuthConfig,
    pub ui: UiConfig,
    pub logging: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Interval between tick events in the terminal UI
    pub tick_rate_ms: u64,
    pub colors: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 100,
            colors: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: String,
    pub format: String,
    /// Log file for the terminal UI; defaults to the data directory
    pub file: Option<String>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    /// Load from an explicit path when one is given, else from the default location
    ///
    /// An explicit path must exist. The default location (including a path
    /// named by `QUITMATH_CONFIG`) falls back to the defaults when missing.
    pub fn load_with(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load and validate configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Reject values the models cannot run with
    pub fn validate(&self) -> Result<()> {
        fn invalid(field: &str, reason: &str) -> ConfigError {
            ConfigError::InvalidValue {
                field: field.to_string(),
                reason: reason.to_string(),
            }
        }

        if !(self.ode.tau_r > 0.0) {
            return Err(invalid("ode.tau_r", "must be positive").into());
        }
        if !(self.scheduler.dt_minutes > 0.0) {
            return Err(invalid("scheduler.dt_minutes", "must be positive").into());
        }
        if self.scheduler.horizon_minutes == 0 {
            return Err(invalid("scheduler.horizon_minutes", "must be at least 1").into());
        }
        if !(0.0..=1.0).contains(&self.scheduler.threshold_high) {
            return Err(invalid("scheduler.threshold_high", "must be between 0 and 1").into());
        }
        if self.auth.access_token_expire_minutes <= 0 {
            return Err(invalid("auth.access_token_expire_minutes", "must be positive").into());
        }
        if self.ui.tick_rate_ms == 0 {
            return Err(invalid("ui.tick_rate_ms", "must be at least 1").into());
        }
        if self.logging.format.parse::<crate::logging::LogFormat>().is_err() {
            return Err(invalid("logging.format", "must be text, json or pretty").into());
        }
        Ok(())
    }

    /// Apply `QUITMATH_TUI_TICK_MS` and `NO_COLOR`
    pub fn apply_env_overrides(&mut self) {
        if let Some(ms) = std::env::var("QUITMATH_TUI_TICK_MS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|&ms| ms > 0)
        {
            self.ui.tick_rate_ms = ms;
        }
        if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            self.ui.colors = false;
        }
    }

    /// Log file path, with `~` expanded; defaults under the data directory
    pub fn log_path(&self) -> Result<PathBuf> {
        match &self.logging.file {
            Some(path) => Ok(PathBuf::from(shellexpand::tilde(path).to_string())),
            None => resolve_log_path(),
        }
    }
}

/// Resolve the configuration file path following XDG Base Directory conventions
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("QUITMATH_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("quitmath").join("config.toml"))
}

/// Resolve the data directory path following XDG Base Directory conventions
pub fn resolve_data_path() -> Result<PathBuf> {
    let data_dir =
        dirs::data_dir().ok_or_else(|| ConfigError::MissingField("data directory".to_string()))?;

    Ok(data_dir.join("quitmath"))
}

pub fn resolve_log_path() -> Result<PathBuf> {
    Ok(resolve_data_path()?.join("quitmath.log"))
}

use crate::billing::limits::DEFAULT_HIGH_THRESHOLD;
use crate::error::{DashboardError, Result};
use crate::format::parse_timestamp;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_ENV: &str = "SAASFLOW_CONFIG";
pub const FIXTURES_ENV: &str = "SAASFLOW_FIXTURES";
pub const LOG_ENV: &str = "SAASFLOW_LOG";
pub const SUBMIT_DELAY_ENV: &str = "SAASFLOW_SUBMIT_DELAY_MS";
pub const NOW_ENV: &str = "SAASFLOW_NOW";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset to read instead of the builtin one
    pub fixtures_path: Option<PathBuf>,
    pub log_filter: String,
    /// Meters above this percentage are flagged
    pub high_usage_threshold: u32,
    /// Simulated round trip for form submission
    pub submit_delay_ms: u64,
    pub recent_users: usize,
    pub recent_invoices: usize,
    /// The signed-in user the console renders for
    pub current_user_id: String,
    /// Pins "now" for relative times
    pub reference_time: Option<DateTime<Utc>>,
    /// File the values were read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fixtures_path: None,
            log_filter: "saasflow=info".to_string(),
            high_usage_threshold: DEFAULT_HIGH_THRESHOLD,
            submit_delay_ms: 1000,
            recent_users: 5,
            recent_invoices: 3,
            current_user_id: "usr_1".to_string(),
            reference_time: None,
            source: None,
        }
    }
}

impl Config {
    /// Defaults, then the TOML file, then `.env` and process environment
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let mut config = Self::resolve(explicit, default_config_path())?;

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// An explicitly named file must be readable; the per-user file is optional
    pub fn resolve(explicit: Option<PathBuf>, fallback: Option<PathBuf>) -> Result<Self> {
        match (explicit, fallback) {
            (Some(path), _) => Self::from_file(&path),
            (None, Some(path)) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&text)?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Apply overrides from a variable lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(FIXTURES_ENV) {
            self.fixtures_path = Some(PathBuf::from(path));
        }

        if let Some(filter) = lookup(LOG_ENV) {
            self.log_filter = filter;
        }

        if let Some(value) = lookup(SUBMIT_DELAY_ENV) {
            self.submit_delay_ms = value
                .parse()
                .map_err(|_| DashboardError::invalid("submit delay", format!("'{}' is not a number of milliseconds", value)))?;
        }

        if let Some(value) = lookup(NOW_ENV) {
            self.reference_time = Some(parse_timestamp(&value)?);
        }

        Ok(())
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.reference_time.unwrap_or_else(Utc::now)
    }
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("io", "saasflow", "saasflow").map(|dirs| dirs.config_dir().join("config.toml"))
}

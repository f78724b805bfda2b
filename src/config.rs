//! Pipeline configuration

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

const DEFAULT_BASE_URL: &str = "https://www.boxofficemojo.com/";

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0 Safari/537.36";

/// Settings for a run. Every field has a default, so a config file only
/// needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Site root; index pages live under `year/world/{year}/`
    pub base_url: Url,
    /// Bound on every page load and element lookup
    pub wait_timeout_secs: u64,
    pub user_agent: String,
    pub output_dir: PathBuf,
    pub first_year: i32,
    pub last_year: i32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            wait_timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            output_dir: PathBuf::from("."),
            first_year: 2008,
            last_year: 2027,
        }
    }
}

fn default_base_url() -> Url {
    match Url::parse(DEFAULT_BASE_URL) {
        Ok(url) => url,
        Err(e) => unreachable!("default base url is valid: {e}"),
    }
}

impl PipelineConfig {
    /// Read a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.first_year > self.last_year {
            return Err(ConfigError::Invalid(format!(
                "first_year {} is after last_year {}",
                self.first_year, self.last_year
            )));
        }
        if self.wait_timeout_secs == 0 {
            return Err(ConfigError::Invalid("wait_timeout_secs must be positive".into()));
        }
        if !matches!(self.base_url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "base_url must be http(s), got {}",
                self.base_url
            )));
        }
        Ok(())
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.first_year..=self.last_year
    }
}

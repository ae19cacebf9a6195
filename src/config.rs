// src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::demo_ranker::DEFAULT_DEMO_DELAY_MS;
use crate::core::service_client::{DEFAULT_BASE_URL, RANK_RESUMES_ENDPOINT};
use crate::workflow::DEFAULT_ACCEPT;

pub const DEFAULT_CONFIG_FILE: &str = "ranker.yaml";
pub const DEFAULT_LOG_FILE: &str = "/tmp/resume-ranker.log";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankerConfig {
    pub api_url: String,
    pub endpoint: String,
    /// None leaves the transport default in place
    pub timeout_seconds: Option<u64>,
    pub demo: bool,
    pub demo_delay_ms: u64,
    pub accept: String,
    pub log_file: PathBuf,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            endpoint: RANK_RESUMES_ENDPOINT.to_string(),
            timeout_seconds: None,
            demo: false,
            demo_delay_ms: DEFAULT_DEMO_DELAY_MS,
            accept: DEFAULT_ACCEPT.to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: Option<RankerConfig>,
    production: Option<RankerConfig>,
}

impl RankerConfig {
    /// Load configuration: file section for the current environment, then
    /// environment variable overrides. An explicit path must exist; the
    /// default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let environment = Self::environment();

        let config = match path {
            Some(path) => Self::load_from_file(path, &environment)?,
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load_from_file(&default_path, &environment)?
                } else {
                    Self::default()
                }
            }
        };

        Ok(config.apply_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Section name: `RANKER_ENV`, then `ENVIRONMENT`, else `local`
    pub fn environment() -> String {
        Self::environment_from(|key| std::env::var(key).ok())
    }

    pub fn environment_from<F>(lookup: F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup("RANKER_ENV")
            .or_else(|| lookup("ENVIRONMENT"))
            .unwrap_or_else(|| "local".to_string())
    }

    pub fn load_from_file(path: &Path, environment: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let config_file: ConfigFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        let section = match environment {
            "production" => config_file.production,
            _ => config_file.local,
        };

        Ok(section.unwrap_or_default())
    }

    /// `RANKER_API_URL` and `RANKER_DEMO` win over the file
    pub fn apply_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("RANKER_API_URL").filter(|u| !u.is_empty()) {
            self.api_url = url;
        }
        if let Some(demo) = lookup("RANKER_DEMO") {
            self.demo = matches!(demo.to_lowercase().as_str(), "1" | "true" | "yes");
        }
        self
    }

    pub fn with_api_url(mut self, url: String) -> Self {
        self.api_url = url;
        self
    }

    pub fn with_demo(mut self, demo: bool) -> Self {
        self.demo = demo;
        self
    }

    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    pub fn demo_delay(&self) -> Duration {
        Duration::from_millis(self.demo_delay_ms)
    }
}

use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::scrape::{DEFAULT_USER_AGENT, FetchConfig, MAX_CONTENT_CHARS};
use crate::transcript::DEFAULT_LANGUAGES;

/// A news site listed by `/scrape/sources`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Source {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Source {
    fn new(name: &str, url: &str, kind: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            kind: kind.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub default_languages: Vec<String>,
    pub fetch_timeout_secs: u64,
    pub provider_timeout_secs: u64,
    pub user_agent: String,
    pub max_content_chars: usize,
    pub batch_concurrency: usize,
    pub log_file: Option<PathBuf>,
    pub sources: Vec<Source>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            cors_origins: vec!["http://localhost:5173".to_string(), "http://localhost:3000".to_string()],
            default_languages: DEFAULT_LANGUAGES.iter().map(|s| s.to_string()).collect(),
            fetch_timeout_secs: 30,
            provider_timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_content_chars: MAX_CONTENT_CHARS,
            batch_concurrency: 4,
            log_file: None,
            sources: default_sources(),
        }
    }
}

fn default_sources() -> Vec<Source> {
    vec![
        Source::new("Seeking Alpha", "https://seekingalpha.com", "investment_news"),
        Source::new("Yahoo Finance", "https://finance.yahoo.com", "market_data"),
        Source::new("Reuters Markets", "https://www.reuters.com/markets/", "financial_news"),
        Source::new("Bloomberg", "https://www.bloomberg.com/markets", "financial_news"),
    ]
}

impl Config {
    /// Load config from ~/.config/sift/config.toml if it exists
    pub fn load() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from {}", path.display());
        let content =
            std::fs::read_to_string(path).wrap_err_with(|| format!("failed to read config {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).wrap_err_with(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            timeout: self.fetch_timeout_secs,
            user_agent: self.user_agent.clone(),
            max_chars: self.max_content_chars,
        }
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("sift")
        .join("config.toml")
}

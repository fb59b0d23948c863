//! Layered runtime configuration.
//!
//! Values are resolved in three layers, later layers winning:
//! 1. Built-in defaults ([`DashboardConfig::default`])
//! 2. An optional YAML file (`--config`)
//! 3. CLI flags and environment variables ([`Cli`])
//!
//! # Example
//!
//! ```yaml
//! api_url: https://newsapi.org/v2
//! api_key: 0123456789abcdef
//! key_transport: header
//! default_country: gb
//! default_category: technology
//! output: ./public/index.html
//! request_timeout_secs: 20
//! ```

use crate::cli::Cli;
use crate::news::KeyTransport;
use crate::render::DEFAULT_PLACEHOLDER_IMAGE;
use serde::Deserialize;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{info, instrument};

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub key_transport: KeyTransport,
    pub default_country: String,
    pub default_category: String,
    pub countries_source: String,
    pub categories_source: String,
    pub placeholder_image: String,
    pub output: PathBuf,
    /// No timeout when unset.
    pub request_timeout_secs: Option<u64>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: "https://newsapi.org/v2".to_string(),
            api_key: None,
            key_transport: KeyTransport::Query,
            default_country: "us".to_string(),
            default_category: "general".to_string(),
            countries_source: "data/countries.json".to_string(),
            categories_source: "data/categories.json".to_string(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            output: PathBuf::from("dashboard.html"),
            request_timeout_secs: None,
        }
    }
}

impl std::fmt::Debug for DashboardConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("key_transport", &self.key_transport)
            .field("default_country", &self.default_country)
            .field("default_category", &self.default_category)
            .field("countries_source", &self.countries_source)
            .field("categories_source", &self.categories_source)
            .field("placeholder_image", &self.placeholder_image)
            .field("output", &self.output)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl DashboardConfig {
    /// Parse a YAML document; missing keys keep their defaults.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// Read and parse a YAML config file.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let text = fs::read_to_string(path).await?;
        let config = Self::from_yaml(&text)?;
        info!("Loaded configuration file");
        Ok(config)
    }

    /// Resolve defaults, the optional config file and the CLI overrides.
    pub async fn resolve(cli: &Cli) -> Result<Self, Box<dyn Error>> {
        let config = match &cli.config {
            Some(path) => Self::load(path).await?,
            None => Self::default(),
        };
        Ok(config.with_cli(cli))
    }

    /// Apply CLI flags on top of this configuration.
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(key) = &cli.api_key {
            self.api_key = Some(key.clone());
        }
        if let Some(url) = &cli.api_url {
            self.api_url = url.clone();
        }
        if let Some(country) = &cli.country {
            self.default_country = country.clone();
        }
        if let Some(category) = &cli.category {
            self.default_category = category.clone();
        }
        if let Some(output) = &cli.output {
            self.output = output.clone();
        }
        self
    }

    /// The access key, or an error telling the user how to supply one.
    pub fn api_key(&self) -> Result<&str, Box<dyn Error>> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err("no API key configured: pass --api-key, set NEWS_API_KEY, or add api_key to the config file".into()),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

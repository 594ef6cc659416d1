//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.starla.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::agent::ClientConfig;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = ".starla.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Reasoning service settings.
    #[serde(default)]
    pub model: ModelConfig,

    /// Data sources and request defaults.
    #[serde(default)]
    pub data: DataConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Reasoning service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model name sent with every request.
    #[serde(default = "default_model")]
    pub name: String,

    /// Base URL of the OpenAI-compatible API.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Temperature for generation.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens in response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Per-agent request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model(),
            api_url: default_api_url(),
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "gpt-4-turbo-preview".to_string()
}

fn default_api_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    1500
}

fn default_timeout() -> u64 {
    30
}

/// Data sources and request defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Country used when a request names none.
    #[serde(default = "default_country")]
    pub default_country: String,

    /// Period used when a request names none.
    #[serde(default = "default_period")]
    pub default_period: String,

    /// Alternative seed file; the built-in seed is used when unset.
    #[serde(default)]
    pub seed_path: Option<PathBuf>,

    /// Share history extracted from the monthly PDF reports.
    #[serde(default = "default_extracted_data")]
    pub extracted_data: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            default_country: default_country(),
            default_period: default_period(),
            seed_path: None,
            extracted_data: default_extracted_data(),
        }
    }
}

fn default_country() -> String {
    "germany".to_string()
}

fn default_period() -> String {
    "p7-2025".to_string()
}

fn default_extracted_data() -> PathBuf {
    PathBuf::from("extracted_data.json")
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when explicitly provided.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref model) = args.model {
            self.model.name = model.clone();
        }
        if let Some(ref api_url) = args.api_url {
            self.model.api_url = api_url.clone();
        }
        if let Some(timeout) = args.timeout {
            self.model.timeout_seconds = timeout;
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Check values a config file can set but CLI validation never sees.
    pub fn validate(&self) -> Result<()> {
        if self.model.timeout_seconds == 0 {
            anyhow::bail!("model.timeout_seconds must be at least 1 second");
        }
        if !self.model.api_url.starts_with("http://") && !self.model.api_url.starts_with("https://")
        {
            anyhow::bail!("model.api_url must start with 'http://' or 'https://'");
        }
        Ok(())
    }

    /// Log level: `--quiet` wins, then `general.verbose` or `--verbose`.
    pub fn log_level(&self, args: &crate::cli::Args) -> tracing::Level {
        if self.general.verbose && !args.quiet {
            tracing::Level::DEBUG
        } else {
            args.log_level()
        }
    }

    /// Settings for the reasoning service client.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_url: self.model.api_url.clone(),
            model_name: self.model.name.clone(),
            api_key_env: self.model.api_key_env.clone(),
            temperature: self.model.temperature,
            max_tokens: self.model.max_tokens,
            timeout_seconds: self.model.timeout_seconds,
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::provider::openweather::DEFAULT_BASE_URL;

pub const DEFAULT_PORT: u16 = 5000;

pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:5500", "http://127.0.0.1:5500"];

pub const ENV_API_KEY: &str = "OPENWEATHER_API_KEY";
pub const ENV_PORT: &str = "PORT";
pub const ENV_ALLOWED_ORIGINS: &str = "WEATHER_ALLOWED_ORIGINS";
pub const ENV_UPSTREAM_URL: &str = "OPENWEATHER_BASE_URL";

/// Configuration stored on disk. Every field is optional; environment
/// variables take precedence.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// port = 5000
/// allowed_origins = ["http://localhost:5500"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub port: Option<u16>,
    pub allowed_origins: Option<Vec<String>>,
    pub upstream_url: Option<String>,
}

impl FileConfig {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: FileConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-dashboard", "weather-proxy")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }
}

/// Fully resolved proxy settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyConfig {
    pub api_key: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub upstream_url: String,
}

impl ProxyConfig {
    /// Resolve from `.env`, the process environment and the config file.
    pub fn load() -> Result<Self> {
        // A missing .env file is the normal case.
        let _ = dotenv::dotenv();
        let file = FileConfig::load()?;
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Merge a file config with an environment lookup. Environment wins.
    pub fn resolve<F>(file: FileConfig, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| env(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = env(ENV_API_KEY)
            .or_else(|| file.api_key.clone().filter(|k| !k.trim().is_empty()))
            .ok_or_else(|| {
                anyhow!(
                    "No OpenWeather API key configured.\n\
                     Hint: set {ENV_API_KEY} or run `weather-proxy configure`."
                )
            })?;

        let port = match env(ENV_PORT) {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("Invalid {ENV_PORT} value '{raw}'"))?,
            None => file.port.unwrap_or(DEFAULT_PORT),
        };

        let allowed_origins = match env(ENV_ALLOWED_ORIGINS) {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect(),
            None => file.allowed_origins.clone().unwrap_or_else(|| {
                DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect()
            }),
        };

        let upstream_url = env(ENV_UPSTREAM_URL)
            .or(file.upstream_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self { api_key, port, allowed_origins, upstream_url })
    }
}

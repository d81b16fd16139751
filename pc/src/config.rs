//! promptcatalog configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding `api.base-url`
pub const ENV_API_URL: &str = "PROMPTCATALOG_API_URL";

/// Environment variable overriding `cache.ttl-secs`
pub const ENV_CACHE_TTL: &str = "PROMPTCATALOG_CACHE_TTL_SECS";

/// Main promptcatalog configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote catalog API
    pub api: ApiConfig,

    /// Document cache
    pub cache: CacheConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Fails fast with a clear message when the catalog cannot be reached at all.
    pub fn validate(&self) -> Result<()> {
        let base = self.api.base_url.trim();
        if base.is_empty() {
            return Err(eyre::eyre!(
                "No catalog API base URL configured. Set api.base-url in the config file or the {} environment variable.",
                ENV_API_URL
            ));
        }
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(eyre::eyre!("api.base-url must start with http:// or https://, got '{}'", base));
        }
        Ok(())
    }

    /// Load configuration with fallback chain, then apply environment overrides
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Self::load_file_chain(config_path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    fn load_file_chain(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .promptcatalog.yml
        let local_config = PathBuf::from(".promptcatalog.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/promptcatalog/promptcatalog.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("promptcatalog").join("promptcatalog.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var(ENV_API_URL)
            && !url.trim().is_empty()
        {
            tracing::debug!(%url, "apply_env_overrides: base url from environment");
            self.api.base_url = url;
        }

        if let Ok(ttl) = std::env::var(ENV_CACHE_TTL) {
            self.cache.ttl_secs = ttl
                .trim()
                .parse()
                .context(format!("{} must be a whole number of seconds, got '{}'", ENV_CACHE_TTL, ttl))?;
        }

        Ok(())
    }
}

/// Remote catalog API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL; documents are fetched from `{base-url}/{name}.json`
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_ms: 30_000,
            user_agent: format!("promptcatalog/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Document cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Freshness window shared by all five documents
    #[serde(rename = "ttl-secs")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: crate::DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn clear_env() {
        // SAFETY: tests touching the environment are serialized with #[serial]
        unsafe {
            std::env::remove_var(ENV_API_URL);
            std::env::remove_var(ENV_CACHE_TTL);
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.cache.ttl(), Duration::from_secs(300));
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert!(config.api.user_agent.starts_with("promptcatalog/"));
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_load_from_explicit_file() {
        clear_env();
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pc.yml");
        fs::write(
            &path,
            "api:\n  base-url: https://catalog.test/api\n  timeout-ms: 5000\ncache:\n  ttl-secs: 60\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.api.base_url, "https://catalog.test/api");
        assert_eq!(config.api.timeout_ms, 5000);
        assert_eq!(config.cache.ttl_secs, 60);
        // Unspecified keys keep their defaults
        assert!(config.api.user_agent.starts_with("promptcatalog/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_missing_explicit_file_is_error() {
        clear_env();
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        clear_env();
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pc.yml");
        fs::write(&path, "api:\n  base-url: https://file.test\n").unwrap();

        // SAFETY: serialized test
        unsafe {
            std::env::set_var(ENV_API_URL, "https://env.test");
            std::env::set_var(ENV_CACHE_TTL, "12");
        }
        let config = Config::load(Some(&path)).unwrap();
        clear_env();

        assert_eq!(config.api.base_url, "https://env.test");
        assert_eq!(config.cache.ttl_secs, 12);
    }

    #[test]
    #[serial]
    fn test_bad_ttl_env_is_error() {
        clear_env();
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pc.yml");
        fs::write(&path, "{}\n").unwrap();

        // SAFETY: serialized test
        unsafe {
            std::env::set_var(ENV_CACHE_TTL, "soon");
        }
        let result = Config::load(Some(&path));
        clear_env();

        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let mut config = Config::default();
        config.api.base_url = "ftp://catalog.test".to_string();
        assert!(config.validate().is_err());
    }
}

//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\cover-finder\config.toml
//! - macOS: ~/Library/Application Support/cover-finder/config.toml
//! - Linux: ~/.config/cover-finder/config.toml
//!
//! Every value has a working default, so the file is optional. It exists for
//! people who need to point at a different storefront, change the user agent
//! or shorten the throttling cooldown.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetch::ThrottlePolicy;

/// Browser-like identification; the catalog rejects obvious bots.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/96.0.4664.55 Safari/537.36";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog search endpoint and artwork URL rewriting
    pub catalog: CatalogConfig,

    /// HTTP client settings
    pub http: HttpConfig,

    /// Throttling behaviour
    pub throttle: ThrottleConfig,
}

/// Catalog search settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Search endpoint (without query string)
    pub search_url: String,

    /// `media` query parameter
    pub media: String,

    /// `entity` query parameter
    pub entity: String,

    /// Resolution token in the artwork URLs the catalog returns
    pub thumbnail_token: String,

    /// Token substituted in to request the large variant
    pub artwork_token: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            search_url: "https://itunes.apple.com/search".to_string(),
            media: "music".to_string(),
            entity: "album".to_string(),
            thumbnail_token: "100x100".to_string(),
            artwork_token: "500x500".to_string(),
        }
    }
}

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Sent as `User-Agent` on every request
    pub user_agent: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Throttling settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    /// HTTP statuses that mean "slow down"
    pub status_codes: Vec<u16>,

    /// Minutes to wait before retrying a throttled request
    pub cooldown_minutes: u64,

    /// Give up after this many cooldowns (unset = retry forever)
    pub max_retries: Option<u32>,
}

impl ThrottleConfig {
    pub fn policy(&self) -> ThrottlePolicy {
        ThrottlePolicy {
            status_codes: self.status_codes.clone(),
            cooldown: Duration::from_secs(self.cooldown_minutes.saturating_mul(60)),
            max_retries: self.max_retries,
        }
    }
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            status_codes: vec![403, 429],
            cooldown_minutes: 30,
            max_retries: None,
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cover-finder"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from the default location.
///
/// Returns default config if the file doesn't exist or can't be parsed.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };
    load_from(&path)
}

/// Load configuration from an explicit path.
///
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::debug!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to `path`, creating parent directories.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),

    #[error("Config file already exists: {0}")]
    AlreadyExists(PathBuf),
}

// ============================================================================
// Tests
// ============================================================================

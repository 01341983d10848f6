//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.tripchat/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::pagination::DEFAULT_SCROLL_THRESHOLD;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TripchatConfig {
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatConfig {
    pub title: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HistoryConfig {
    pub endpoint: Option<String>,
    pub scroll_threshold: Option<u16>,
    pub request_timeout_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TITLE: &str = "Trip 1";
pub const DEFAULT_ROUTE_FROM: &str = "IGI Airport, T3";
pub const DEFAULT_ROUTE_TO: &str = "Sector 28";
pub const DEFAULT_HISTORY_ENDPOINT: &str = "http://localhost:8080/api/chats";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub title: String,
    pub route_from: String,
    pub route_to: String,
    pub self_avatar: Option<String>,
    pub history_endpoint: String,
    pub scroll_threshold: u16,
    pub request_timeout_secs: u64,
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub endpoint: Option<String>,
    pub title: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.tripchat/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tripchat").join("config.toml"))
}

/// Load config from `~/.tripchat/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `TripchatConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<TripchatConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(TripchatConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(TripchatConfig::default());
    }

    load_config_from(&path)
}

/// Parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<TripchatConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: TripchatConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Tripchat Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [chat]
# title = "Trip 1"                      # Or set TRIPCHAT_TITLE, or --title
# from = "IGI Airport, T3"
# to = "Sector 28"
# avatar = "assets/profile.png"         # Your own avatar reference

# [history]
# endpoint = "http://localhost:8080/api/chats"   # Or TRIPCHAT_HISTORY_URL, or --endpoint
# scroll_threshold = 50                 # Rows from the top that trigger loading older pages
# request_timeout_secs = 15
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &TripchatConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Title: CLI → env → config → default
    let title = cli
        .title
        .clone()
        .or_else(|| std::env::var("TRIPCHAT_TITLE").ok())
        .or_else(|| config.chat.title.clone())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    // Endpoint: CLI → env → config → default
    let history_endpoint = cli
        .endpoint
        .clone()
        .or_else(|| std::env::var("TRIPCHAT_HISTORY_URL").ok())
        .or_else(|| config.history.endpoint.clone())
        .unwrap_or_else(|| DEFAULT_HISTORY_ENDPOINT.to_string());

    ResolvedConfig {
        title,
        route_from: config
            .chat
            .from
            .clone()
            .unwrap_or_else(|| DEFAULT_ROUTE_FROM.to_string()),
        route_to: config
            .chat
            .to
            .clone()
            .unwrap_or_else(|| DEFAULT_ROUTE_TO.to_string()),
        self_avatar: config.chat.avatar.clone(),
        history_endpoint,
        scroll_threshold: config
            .history
            .scroll_threshold
            .unwrap_or(DEFAULT_SCROLL_THRESHOLD),
        request_timeout_secs: config
            .history
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
    }
}

use anyhow::{Context, Result};
use captions_extractor::extractor::platforms::youtube::{
    DEFAULT_PLAYLIST_ITEMS_URL, DEFAULT_WATCH_URL, PlayerMarkers,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "capdl";

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root folder for caption files
    pub output_dir: PathBuf,

    /// Caption language used when `--lang` is not given
    pub default_language: String,

    /// YouTube Data API key for playlist listing
    pub api_key: Option<String>,

    /// User agent string for requests
    pub user_agent: Option<String>,

    /// Overall request timeout in seconds, none by default
    pub request_timeout: Option<u64>,

    /// Jitter unit in milliseconds before each playlist member, 0 disables it
    pub jitter_unit_ms: u64,

    /// Download again even if the caption file already exists
    pub overwrite_existing: bool,

    /// Watch page prefix, the video id is appended
    pub watch_url: String,

    /// Data API `playlistItems` endpoint
    pub playlist_items_url: String,

    /// Text right before the embedded player response
    pub player_response_prefix: String,

    /// Text right after the embedded player response
    pub player_response_terminator: String,

    /// Default cookies to use
    pub default_cookies: Option<String>,

    /// Default proxy URL (supports http, https, socks5)
    pub default_proxy: Option<String>,

    /// Default proxy username (if proxy requires authentication)
    pub default_proxy_username: Option<String>,

    /// Default proxy password (if proxy requires authentication)
    pub default_proxy_password: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("captions"),
            default_language: "en".to_string(),
            api_key: None,
            user_agent: Some("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/136.0.0.0 Safari/537.36".to_string()),
            request_timeout: None,
            jitter_unit_ms: 1000,
            overwrite_existing: false,
            watch_url: DEFAULT_WATCH_URL.to_string(),
            playlist_items_url: DEFAULT_PLAYLIST_ITEMS_URL.to_string(),
            player_response_prefix: PlayerMarkers::DEFAULT_PREFIX.to_string(),
            player_response_terminator: PlayerMarkers::DEFAULT_TERMINATOR.to_string(),
            default_cookies: None,
            default_proxy: None,
            default_proxy_username: None,
            default_proxy_password: None,
        }
    }
}

// Secrets are shown only as present or absent.
fn redacted(secret: &Option<String>) -> Option<&'static str> {
    secret.as_ref().map(|_| "<redacted>")
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("output_dir", &self.output_dir)
            .field("default_language", &self.default_language)
            .field("api_key", &redacted(&self.api_key))
            .field("user_agent", &self.user_agent)
            .field("request_timeout", &self.request_timeout)
            .field("jitter_unit_ms", &self.jitter_unit_ms)
            .field("overwrite_existing", &self.overwrite_existing)
            .field("watch_url", &self.watch_url)
            .field("playlist_items_url", &self.playlist_items_url)
            .field("player_response_prefix", &self.player_response_prefix)
            .field("player_response_terminator", &self.player_response_terminator)
            .field("default_cookies", &redacted(&self.default_cookies))
            .field("default_proxy", &self.default_proxy)
            .field("default_proxy_username", &self.default_proxy_username)
            .field("default_proxy_password", &redacted(&self.default_proxy_password))
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        match config_path {
            Some(path) => {
                if path.exists() {
                    let content = std::fs::read_to_string(path)
                        .context("Failed to read configuration file")?;
                    toml::from_str(&content).context("Failed to parse configuration file")
                } else {
                    Ok(Self::default())
                }
            }
            None => {
                // Use confy for default location
                confy::load(APP_NAME, None).context("Failed to load configuration")
            }
        }
    }

    /// Get default configuration file path
    pub fn default_config_path() -> Option<PathBuf> {
        confy::get_configuration_file_path(APP_NAME, None).ok()
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_string =
            toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, toml_string).context("Failed to write configuration file")?;

        Ok(())
    }

    /// Reset configuration to defaults and save
    pub fn reset(config_path: Option<&Path>) -> Result<()> {
        let path = config_path
            .map(|p| p.to_path_buf())
            .or_else(Self::default_config_path)
            .context("No configuration path available")?;

        Self::default().save(&path)
    }

    /// Show current configuration as a formatted string
    pub fn show(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration for display")
    }

    pub fn player_markers(&self) -> PlayerMarkers {
        PlayerMarkers::new(
            self.player_response_prefix.as_str(),
            self.player_response_terminator.as_str(),
        )
    }
}

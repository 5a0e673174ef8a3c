//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::Platform;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Resolution behavior
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Platform API credentials
    #[serde(default)]
    pub credentials: Credentials,

    /// Platform API base URLs
    #[serde(default)]
    pub endpoints: Endpoints,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.browser_user_agent.trim().is_empty() {
            return Err(AppError::validation("http.browser_user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.resolver.max_concurrent == 0 {
            return Err(AppError::validation("resolver.max_concurrent must be > 0"));
        }
        for (name, value) in self.endpoints.named() {
            url::Url::parse(value).map_err(|e| {
                AppError::validation(format!("endpoints.{name} is not a valid URL: {e}"))
            })?;
        }
        Ok(())
    }
}

/// HTTP transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for API requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Desktop browser User-Agent for sites that reject bots
    #[serde(default = "defaults::browser_user_agent")]
    pub browser_user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Redirects followed before giving up
    #[serde(default = "defaults::max_redirects")]
    pub max_redirects: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            browser_user_agent: defaults::browser_user_agent(),
            timeout_secs: defaults::timeout(),
            max_redirects: defaults::max_redirects(),
        }
    }
}

/// Resolution behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Try the generic blog page signature for otherwise unknown URLs
    #[serde(default)]
    pub tistory_sites: bool,

    /// Maximum concurrent requests: URLs resolved at once by the CLI and
    /// photo size lookups in flight per Flickr album
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            tistory_sites: false,
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// API credentials. Empty values mean "not configured".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub twitter_bearer_token: String,

    #[serde(default)]
    pub imgur_client_id: String,

    #[serde(default)]
    pub flickr_api_key: String,

    #[serde(default)]
    pub google_api_key: String,
}

impl Credentials {
    /// Whether every credential the platform's adapter needs is present.
    pub fn is_configured(&self, platform: Platform) -> bool {
        match platform {
            Platform::TwitterStatus => !self.twitter_bearer_token.trim().is_empty(),
            Platform::ImgurAlbum => !self.imgur_client_id.trim().is_empty(),
            Platform::FlickrPhoto | Platform::FlickrAlbum | Platform::FlickrAlbumShort => {
                !self.flickr_api_key.trim().is_empty()
            }
            Platform::GoogleDriveFolder => !self.google_api_key.trim().is_empty(),
            _ => true,
        }
    }
}

/// Base URLs of the platform APIs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoints {
    #[serde(default = "defaults::twitter_api")]
    pub twitter_api: String,

    #[serde(default = "defaults::imgur_api")]
    pub imgur_api: String,

    #[serde(default = "defaults::flickr_api")]
    pub flickr_api: String,

    #[serde(default = "defaults::streamable_api")]
    pub streamable_api: String,

    #[serde(default = "defaults::gfycat_api")]
    pub gfycat_api: String,

    #[serde(default = "defaults::drive_api")]
    pub drive_api: String,
}

impl Endpoints {
    fn named(&self) -> [(&'static str, &str); 6] {
        [
            ("twitter_api", &self.twitter_api),
            ("imgur_api", &self.imgur_api),
            ("flickr_api", &self.flickr_api),
            ("streamable_api", &self.streamable_api),
            ("gfycat_api", &self.gfycat_api),
            ("drive_api", &self.drive_api),
        ]
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            twitter_api: defaults::twitter_api(),
            imgur_api: defaults::imgur_api(),
            flickr_api: defaults::flickr_api(),
            streamable_api: defaults::streamable_api(),
            gfycat_api: defaults::gfycat_api(),
            drive_api: defaults::drive_api(),
        }
    }
}

mod defaults {
    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; linkresolver/0.1)".into()
    }
    pub fn browser_user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/65.0.3325.181 Safari/537.36".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_redirects() -> usize {
        10
    }

    // Resolver defaults
    pub fn max_concurrent() -> usize {
        4
    }

    // Endpoint defaults
    pub fn twitter_api() -> String {
        "https://api.twitter.com".into()
    }
    pub fn imgur_api() -> String {
        "https://api.imgur.com".into()
    }
    pub fn flickr_api() -> String {
        "https://www.flickr.com/services/rest/".into()
    }
    pub fn streamable_api() -> String {
        "https://api.streamable.com".into()
    }
    pub fn gfycat_api() -> String {
        "https://api.gfycat.com".into()
    }
    pub fn drive_api() -> String {
        "https://www.googleapis.com/drive/v3".into()
    }
}

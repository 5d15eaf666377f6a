//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/meetdesk/config.toml` by default.
//!
//! Session values (`csrf_token`, `session_id`) support secret references:
//! - `pass::path/in/store`: resolved via `pass show`
//! - `env::VAR_NAME`: resolved from the environment
//! - plain text: used as-is

use std::path::{Path, PathBuf};
use std::time::Duration;

use meetdesk_core::FormatOptions;
use serde::{Deserialize, Serialize};

use crate::api::{ApiConfig, SessionCookies};
use crate::error::{ClientError, ClientResult};
use crate::secret;

/// Server origin used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/";

// ---------------------------------------------------------------------------
// ClientConfig (config.toml)
// ---------------------------------------------------------------------------

/// Configuration for the meetdesk client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// Display settings.
    pub display: DisplaySettings,

    /// Server/connection settings.
    pub server: ServerSettings,

    /// Session credentials.
    pub session: SessionSettings,
}

/// Display settings for output formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Maximum title length (truncated with ellipsis).
    pub max_title_length: Option<usize>,

    /// Text to show when there are no meetings.
    pub no_meeting_text: String,

    /// Wrap join links in terminal hyperlinks.
    pub hyperlinks: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            max_title_length: None,
            no_meeting_text: "No meetings".to_string(),
            hyperlinks: false,
        }
    }
}

impl DisplaySettings {
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            max_title_length: self.max_title_length,
            hyperlinks: self.hyperlinks,
            no_meeting_text: self.no_meeting_text.clone(),
        }
    }
}

/// Server/connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Origin of the meetings server.
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: 30,
        }
    }
}

/// Session credentials of a logged-in browser session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Value of the `csrftoken` cookie (supports `pass::` and `env::`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csrf_token: Option<String>,

    /// Value of the `sessionid` cookie (supports `pass::` and `env::`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl SessionSettings {
    /// Resolves both values, expanding secret references.
    pub fn resolve(&self) -> ClientResult<SessionCookies> {
        let csrf_token = secret::resolve_optional(self.csrf_token.as_deref())
            .map_err(|e| ClientError::secret("csrf_token", e))?;
        let session_id = secret::resolve_optional(self.session_id.as_deref())
            .map_err(|e| ClientError::secret("session_id", e))?;
        Ok(SessionCookies {
            csrf_token,
            session_id,
        })
    }

    /// A copy safe to print: literal values are masked, references kept.
    pub fn redacted(&self) -> Self {
        let mask = |value: &Option<String>| {
            value.as_ref().map(|v| {
                if secret::is_reference(v) {
                    v.clone()
                } else {
                    "********".to_string()
                }
            })
        };
        Self {
            csrf_token: mask(&self.csrf_token),
            session_id: mask(&self.session_id),
        }
    }
}

/// Overrides from the command line, applied on top of the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub csrf_token: Option<String>,
    pub timeout: Option<u64>,
    pub debug: bool,
}

impl ClientConfig {
    /// Loads configuration from the default path, or defaults if the file
    /// does not exist.
    pub fn load() -> ClientResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            ClientError::Config(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("meetdesk")
    }

    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(base_url) = overrides.base_url {
            self.server.base_url = base_url;
        }
        if let Some(token) = overrides.csrf_token {
            self.session.csrf_token = Some(token);
        }
        if let Some(timeout) = overrides.timeout {
            self.server.timeout = timeout;
        }
        self.debug |= overrides.debug;
    }

    /// Builds the HTTP client settings, resolving session secrets.
    pub fn api_config(&self) -> ClientResult<ApiConfig> {
        if self.server.timeout == 0 {
            return Err(ClientError::Config(
                "server.timeout must be at least 1 second".to_string(),
            ));
        }
        let cookies = self.session.resolve()?;
        Ok(ApiConfig::new(&self.server.base_url)?
            .with_timeout(Duration::from_secs(self.server.timeout))
            .with_cookies(cookies))
    }

    /// The configuration with session values masked.
    pub fn redacted(&self) -> Self {
        Self {
            session: self.session.redacted(),
            ..self.clone()
        }
    }
}

//! Application configuration structures.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Badge service and HTTP behavior settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Locations of persisted state and artifacts
    #[serde(default)]
    pub paths: PathsConfig,

    /// History retention and recovery settings
    #[serde(default)]
    pub history: HistoryConfig,

    /// Local badge appearance
    #[serde(default)]
    pub badge: BadgeConfig,
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
        if self.fetch.base_url.trim().is_empty() {
            return Err(AppError::validation("fetch.base_url is empty"));
        }
        url::Url::parse(&self.fetch.base_url)?;
        if self.fetch.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetch.user_agent is empty"));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(AppError::validation("fetch.timeout_secs must be > 0"));
        }
        if self.fetch.retries == 0 {
            return Err(AppError::validation("fetch.retries must be >= 1"));
        }
        if self.history.max_entries == 0 {
            return Err(AppError::validation("history.max_entries must be > 0"));
        }
        for (name, value) in [
            ("paths.snapshot", &self.paths.snapshot),
            ("paths.history", &self.paths.history),
            ("paths.raw_svg", &self.paths.raw_svg),
            ("paths.badge", &self.paths.badge),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::validation(format!("{name} is empty")));
            }
        }
        Ok(())
    }

    /// Resolve the username to fetch, preferring an explicit override.
    pub fn username(&self, cli_override: Option<&str>) -> Result<String> {
        cli_override
            .or(self.fetch.username.as_deref())
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::config("No username given (use --username or fetch.username)")
            })
    }
}

/// Badge service request settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Endpoint serving the counter badge
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Account whose views are counted
    #[serde(default)]
    pub username: Option<String>,

    /// Label requested from the badge service
    #[serde(default = "defaults::label")]
    pub label: String,

    /// Badge color requested from the badge service (hex, no `#`)
    #[serde(default = "defaults::color")]
    pub color: String,

    /// Badge style requested from the badge service
    #[serde(default = "defaults::style")]
    pub style: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Total attempts before giving up
    #[serde(default = "defaults::retries")]
    pub retries: u32,

    /// Fixed delay between attempts in milliseconds
    #[serde(default = "defaults::retry_delay")]
    pub retry_delay_ms: u64,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            username: None,
            label: defaults::label(),
            color: defaults::color(),
            style: defaults::style(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            retries: defaults::retries(),
            retry_delay_ms: defaults::retry_delay(),
        }
    }
}

/// Paths of the persisted files, relative to the storage root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "defaults::snapshot_path")]
    pub snapshot: String,

    #[serde(default = "defaults::history_path")]
    pub history: String,

    /// Badge markup exactly as fetched
    #[serde(default = "defaults::raw_svg_path")]
    pub raw_svg: String,

    /// Locally rendered badge
    #[serde(default = "defaults::badge_path")]
    pub badge: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            snapshot: defaults::snapshot_path(),
            history: defaults::history_path(),
            raw_svg: defaults::raw_svg_path(),
            badge: defaults::badge_path(),
        }
    }
}

/// What to do when a state file exists but cannot be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RecoveryPolicy {
    /// Warn and treat the state as absent
    #[default]
    SelfHeal,
    /// Abort with `MalformedState`
    FailFast,
}

/// History retention settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of per-date entries kept
    #[serde(default = "defaults::max_entries")]
    pub max_entries: usize,

    #[serde(default)]
    pub on_malformed: RecoveryPolicy,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: defaults::max_entries(),
            on_malformed: RecoveryPolicy::default(),
        }
    }
}

/// Local badge appearance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeConfig {
    #[serde(default = "defaults::label")]
    pub label: String,

    #[serde(default = "defaults::likes_label")]
    pub likes_label: String,

    #[serde(default = "defaults::label_color")]
    pub label_color: String,

    #[serde(default = "defaults::value_color")]
    pub value_color: String,

    #[serde(default = "defaults::likes_color")]
    pub likes_color: String,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            label: defaults::label(),
            likes_label: defaults::likes_label(),
            label_color: defaults::label_color(),
            value_color: defaults::value_color(),
            likes_color: defaults::likes_color(),
        }
    }
}

mod defaults {
    // Fetch defaults
    pub fn base_url() -> String {
        "https://komarev.com/ghpvc/".into()
    }
    pub fn label() -> String {
        "Profile views".into()
    }
    pub fn color() -> String {
        "0e75b6".into()
    }
    pub fn style() -> String {
        "flat".into()
    }
    pub fn user_agent() -> String {
        concat!("profile-views/", env!("CARGO_PKG_VERSION")).into()
    }
    pub fn timeout() -> u64 {
        20
    }
    pub fn retries() -> u32 {
        3
    }
    pub fn retry_delay() -> u64 {
        3000
    }

    // Path defaults
    pub fn snapshot_path() -> String {
        ".github/profile-views.json".into()
    }
    pub fn history_path() -> String {
        ".github/profile-views-history.json".into()
    }
    pub fn raw_svg_path() -> String {
        ".github/profile-views.svg".into()
    }
    pub fn badge_path() -> String {
        ".github/profile-views-badge.svg".into()
    }

    // History defaults: ten years of daily entries
    pub fn max_entries() -> usize {
        3650
    }

    // Badge defaults
    pub fn likes_label() -> String {
        "likes".into()
    }
    pub fn label_color() -> String {
        "#555".into()
    }
    pub fn value_color() -> String {
        "#0e75b6".into()
    }
    pub fn likes_color() -> String {
        "#e05d44".into()
    }
}

//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Content store connection settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Schedule query window settings
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Freshness window for the aggregated payload
    #[serde(default)]
    pub cache: CacheConfig,

    /// Translation collaborator settings
    #[serde(default)]
    pub translation: TranslationConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// The store API token is overlaid from `NOTION_API_KEY` when the
    /// environment variable is set, so the secret never has to live in the
    /// file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        if let Ok(token) = std::env::var("NOTION_API_KEY") {
            config.store.token = token;
        }
        Ok(config)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            let mut config = Self::default();
            if let Ok(token) = std::env::var("NOTION_API_KEY") {
                config.store.token = token;
            }
            config
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.store.base_url)
            .map_err(|e| AppError::config(format!("store.base_url is invalid: {e}")))?;
        if self.store.user_agent.trim().is_empty() {
            return Err(AppError::config("store.user_agent is empty"));
        }
        if self.store.timeout_secs == 0 {
            return Err(AppError::config("store.timeout_secs must be > 0"));
        }
        if self.schedule.page_size == 0 {
            return Err(AppError::config("schedule.page_size must be > 0"));
        }
        if self.schedule.window_end.parse::<chrono::NaiveDate>().is_err() {
            return Err(AppError::config(
                "schedule.window_end must be a YYYY-MM-DD date",
            ));
        }
        Ok(())
    }
}

/// Content store connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the content store REST API
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// API version header value
    #[serde(default = "defaults::api_version")]
    pub api_version: String,

    /// Bearer token; usually overlaid from the environment
    #[serde(default)]
    pub token: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// News collection identifier
    #[serde(default)]
    pub news_collection: String,

    /// Project collection identifier
    #[serde(default)]
    pub project_collection: String,

    /// Schedule collection identifier
    #[serde(default)]
    pub schedule_collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            api_version: defaults::api_version(),
            token: String::new(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            news_collection: String::new(),
            project_collection: String::new(),
            schedule_collection: String::new(),
        }
    }
}

/// Schedule query window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Fixed upper bound of the future-events query window (YYYY-MM-DD).
    /// Kept as a calendar date rather than a relative offset; pending
    /// product clarification.
    #[serde(default = "defaults::window_end")]
    pub window_end: String,

    /// Maximum events fetched per query
    #[serde(default = "defaults::page_size")]
    pub page_size: usize,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            window_end: defaults::window_end(),
            page_size: defaults::page_size(),
        }
    }
}

/// Freshness window attached to the aggregated payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Browser cache duration in seconds
    #[serde(default = "defaults::max_age")]
    pub max_age_secs: u64,

    /// Shared/edge cache duration in seconds
    #[serde(default = "defaults::s_maxage")]
    pub s_maxage_secs: u64,
}

impl CacheConfig {
    /// Render the freshness window as a Cache-Control header value.
    pub fn header_value(&self) -> String {
        format!(
            "public, max-age={}, s-maxage={}",
            self.max_age_secs, self.s_maxage_secs
        )
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_age_secs: defaults::max_age(),
            s_maxage_secs: defaults::s_maxage(),
        }
    }
}

/// Translation collaborator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Endpoint of the translation proxy
    #[serde(default = "defaults::translate_endpoint")]
    pub endpoint: String,

    /// Language glossary corrections are applied for
    #[serde(default = "defaults::default_target")]
    pub default_target: String,

    /// Ordered terminology-correction rules applied after translation
    #[serde(default = "defaults::glossary")]
    pub glossary: Vec<Replacement>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::translate_endpoint(),
            default_target: defaults::default_target(),
            glossary: defaults::glossary(),
        }
    }
}

/// A text replacement rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

mod defaults {
    use super::Replacement;

    // Store defaults
    pub fn base_url() -> String {
        "https://api.notion.com/v1".into()
    }
    pub fn api_version() -> String {
        "2022-06-28".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; sitedata/1.0)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Schedule defaults
    pub fn window_end() -> String {
        "2026-03-31".into()
    }
    pub fn page_size() -> usize {
        100
    }

    // Cache defaults
    pub fn max_age() -> u64 {
        60
    }
    pub fn s_maxage() -> u64 {
        600
    }

    // Translation defaults
    pub fn translate_endpoint() -> String {
        "http://localhost:5173/api/translate".into()
    }
    pub fn default_target() -> String {
        "en".into()
    }
    pub fn glossary() -> Vec<Replacement> {
        vec![
            Replacement {
                from: "Momoyama Gakuin University".to_string(),
                to: "St. Andrew's University".to_string(),
            },
            Replacement {
                from: "Momoyama Gakuin".to_string(),
                to: "St. Andrew's".to_string(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let mut config = Config::default();
        config.store.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_window_end() {
        let mut config = Config::default();
        config.schedule.window_end = "March 2026".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn cache_header_renders_both_windows() {
        let cache = CacheConfig::default();
        assert_eq!(cache.header_value(), "public, max-age=60, s-maxage=600");
    }

    #[test]
    fn default_glossary_is_ordered_longest_first() {
        let glossary = TranslationConfig::default().glossary;
        // The university rule must run before its prefix rule.
        assert!(glossary[0].from.len() > glossary[1].from.len());
    }
}

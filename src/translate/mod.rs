// src/translate/mod.rs

//! Translation collaborator and memoizing cache.

pub mod cache;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use crate::error::{AppError, Result};
use crate::models::TranslationConfig;

pub use cache::TranslationCache;

/// Trait for translation backends.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into the target language.
    async fn translate(&self, text: &str, target: &str) -> Result<String>;
}

/// HTTP translator talking to the site's translation proxy.
pub struct HttpTranslator {
    client: Client,
    endpoint: String,
}

impl HttpTranslator {
    /// Create a translator against the configured proxy endpoint.
    pub fn new(config: &TranslationConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(&self, text: &str, target: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({"text": text, "target": target}))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::translation(format!(
                "proxy returned {status}"
            )));
        }

        let body: Value = response.json().await?;
        body.get("translatedText")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| AppError::translation("response is missing translatedText"))
    }
}

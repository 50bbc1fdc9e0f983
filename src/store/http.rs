// src/store/http.rs

//! Notion REST implementation of the content store.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value, json};

use crate::error::{AppError, Result};
use crate::models::StoreConfig;
use crate::store::{ContentStore, Query};

/// HTTP client for the Notion API.
pub struct HttpContentStore {
    client: Client,
    base_url: String,
    api_version: String,
    token: String,
}

impl HttpContentStore {
    /// Create a configured store client.
    pub fn new(config: &StoreConfig) -> Result<Self> {
        if config.token.trim().is_empty() {
            return Err(AppError::config("store.token is empty"));
        }
        url::Url::parse(&config.base_url)?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
            token: config.token.clone(),
        })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}/{}", self.base_url, path))
            .bearer_auth(&self.token)
            .header("Notion-Version", &self.api_version)
    }

    /// Check the response status and parse the JSON body.
    async fn read_json(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AppError::api(status.as_u16(), message));
        }
        Ok(response.json().await?)
    }

    /// Pull the `results` array out of a list-shaped response.
    fn results(mut body: Value, context: &str) -> Result<Vec<Value>> {
        match body.get_mut("results").map(Value::take) {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(AppError::schema(context, "response has no results array")),
        }
    }
}

#[async_trait]
impl ContentStore for HttpContentStore {
    async fn query(&self, collection: &str, query: Query) -> Result<Vec<Value>> {
        let mut body = Map::new();
        if let Some(filter) = query.filter {
            body.insert("filter".to_string(), filter);
        }
        if let Some(sorts) = query.sorts {
            body.insert("sorts".to_string(), sorts);
        }
        if let Some(page_size) = query.page_size {
            body.insert("page_size".to_string(), json!(page_size));
        }

        let response = self
            .request(
                reqwest::Method::POST,
                &format!("databases/{collection}/query"),
            )
            .json(&Value::Object(body))
            .send()
            .await?;
        Self::results(Self::read_json(response).await?, collection)
    }

    async fn retrieve(&self, id: &str) -> Result<Value> {
        let response = self
            .request(reqwest::Method::GET, &format!("pages/{id}"))
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn list_children(&self, parent_id: &str) -> Result<Vec<Value>> {
        let response = self
            .request(reqwest::Method::GET, &format!("blocks/{parent_id}/children"))
            .send()
            .await?;
        Self::results(Self::read_json(response).await?, parent_id)
    }

    async fn describe(&self, collection: &str) -> Result<Value> {
        let response = self
            .request(reqwest::Method::GET, &format!("databases/{collection}"))
            .send()
            .await?;
        Self::read_json(response).await
    }
}

// src/store/mod.rs

//! Content store abstraction.
//!
//! The remote structured-data store exposes database-like collections of
//! loosely-typed records. Services talk to it through [`ContentStore`] so
//! tests can substitute a fake backend.

pub mod http;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

// Re-export for convenience
pub use http::HttpContentStore;

/// A query against one collection.
#[derive(Debug, Clone, Default)]
pub struct Query {
    /// Store-native filter object
    pub filter: Option<Value>,

    /// Store-native sort specification
    pub sorts: Option<Value>,

    /// Maximum number of records to return
    pub page_size: Option<usize>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Value) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn sorts(mut self, sorts: Value) -> Self {
        self.sorts = Some(sorts);
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }
}

/// Trait for content store backends.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Query a collection, returning raw records in store order.
    async fn query(&self, collection: &str, query: Query) -> Result<Vec<Value>>;

    /// Retrieve a single record by id.
    async fn retrieve(&self, id: &str) -> Result<Value>;

    /// List the child content blocks of a record.
    async fn list_children(&self, parent_id: &str) -> Result<Vec<Value>>;

    /// Retrieve a collection's own schema description.
    async fn describe(&self, collection: &str) -> Result<Value>;
}

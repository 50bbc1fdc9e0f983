//! News data structures.

use serde::{Deserialize, Serialize};

/// A single typed content block from a news record's body.
///
/// Image blocks carry `url`; every other rich-text-bearing block is
/// flattened to `text`. Blocks with neither are dropped during enrichment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentBlock {
    /// External block type name ("paragraph", "heading_1", "image", ...)
    #[serde(rename = "type")]
    pub kind: String,

    /// Plain-text content for text-bearing blocks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Resolved image URL for image blocks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ContentBlock {
    /// Build a text block.
    pub fn text(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            text: Some(text.into()),
            url: None,
        }
    }

    /// Build an image block.
    pub fn image(url: Option<String>) -> Self {
        Self {
            kind: "image".to_string(),
            text: None,
            url,
        }
    }
}

/// A normalized news item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewsItem {
    /// Record identifier
    pub id: String,

    /// News title
    pub title: String,

    /// Publication date (ISO string, may be empty)
    pub date: String,

    /// Always empty; the source collection has no summary field
    pub summary: String,

    /// Category labels (0 or 1 entries; the source field is single-select)
    pub tags: Vec<String>,

    /// Cover image URL; never empty, falls back to a placeholder keyed by id
    pub cover_url: String,

    /// Link target, explicit URL field or the record's canonical URL
    pub url: String,

    /// Enriched body blocks; empty until enrichment runs or when it fails
    #[serde(default)]
    pub content: Vec<ContentBlock>,

    /// Enriched cover image; `None` until enrichment runs or when it fails
    #[serde(default)]
    pub cover_image: Option<String>,
}

/// A news detail page: one record plus its full body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub date: String,
    pub content: Vec<ContentBlock>,
    pub cover_image: Option<String>,
}

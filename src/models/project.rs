//! Project data structure.

use serde::{Deserialize, Serialize};

/// A normalized project entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectItem {
    /// Record identifier
    pub id: String,

    /// Project title
    pub title: String,

    /// Always empty; the source collection has no description field
    pub description: String,

    /// Project category (Game, Web, ...)
    pub category: String,

    /// Cover image URL; never empty, falls back to a placeholder keyed by id
    pub cover_url: String,

    /// Additional tags (currently none in the source)
    pub tags: Vec<String>,

    /// External project URL or the record's canonical URL
    pub url: String,

    /// Creator name, resolved through the member roster relation.
    /// Empty string when the relation is absent or the lookup fails.
    pub creator: String,
}

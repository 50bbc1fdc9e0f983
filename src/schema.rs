// src/schema.rs

//! External field-name maps for each content store collection.
//!
//! The store's records carry collection-specific property names (mostly
//! Japanese). Normalizers read field names from these tables so that an
//! upstream rename is a one-line data change here, not a logic change in a
//! service. Keys must match the external schema exactly, byte for byte.

/// Bump when a normalizer's output shape changes in a way that should
/// invalidate derived caches (e.g. translated strings).
pub const SCHEMA_VERSION: &str = "v1";

/// News collection property names.
pub mod news {
    /// Title property (title type)
    pub const TITLE: &str = "タイトル";
    /// Explicit publish date (date type), preferred over creation time
    pub const PUBLISHED: &str = "公開日";
    /// Record creation timestamp (created_time type), date fallback
    pub const CREATED: &str = "作成日";
    /// External link (url type)
    pub const URL: &str = "URL";
    /// Category (select type, single value by source design)
    pub const CATEGORY: &str = "カテゴリー";
}

/// Project collection property names.
pub mod project {
    /// Title property (title type)
    pub const TITLE: &str = "名前";
    /// Category (select type)
    pub const CATEGORY: &str = "カテゴリ";
    /// Category names tried when reading the collection schema itself;
    /// older exports used the English name
    pub const CATEGORY_CANDIDATES: [&str; 2] = ["カテゴリ", "Category"];
    /// External link (url type)
    pub const URL: &str = "URL";
    /// Relation to the member roster collection
    pub const MEMBER_RELATION: &str = "部員名簿";
}

/// Member roster collection property names.
///
/// The title field appears under two names depending on when the record was
/// created; checked in declaration order.
pub mod member {
    pub const TITLE_CANDIDATES: [&str; 2] = ["名前", "Name"];
}

/// Schedule collection property names.
pub mod schedule {
    /// Title property (title type)
    pub const TITLE: &str = "名前";
    /// Event date (date type, optional `end` sub-value)
    pub const DATE: &str = "日付";
    /// Event kind (select type), surfaced as the event description
    pub const KIND: &str = "種類";
    /// Publication gate (select type)
    pub const VISIBILITY: &str = "Web公開";
    /// Value of [`VISIBILITY`] that marks an event as published
    pub const VISIBILITY_PUBLIC: &str = "公開";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_keys_are_exact() {
        // These keys mirror the live store schema; a change here must be
        // deliberate, so pin them.
        assert_eq!(news::TITLE, "タイトル");
        assert_eq!(news::PUBLISHED, "公開日");
        assert_eq!(project::MEMBER_RELATION, "部員名簿");
        assert_eq!(schedule::VISIBILITY_PUBLIC, "公開");
        assert_eq!(member::TITLE_CANDIDATES, ["名前", "Name"]);
    }
}

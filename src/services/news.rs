// src/services/news.rs

//! News fetch service.
//!
//! Queries the news collection, normalizes each raw record, and enriches
//! items with their body blocks. Every public method absorbs remote
//! failures: the caller sees an empty collection or an un-enriched item,
//! never an error.

use std::sync::Arc;

use serde_json::{Value, json};

use crate::error::Result;
use crate::extract;
use crate::models::{Article, Config, ContentBlock, NewsItem};
use crate::schema::news as fields;
use crate::store::{ContentStore, Query};

/// Service for fetching and normalizing news records.
pub struct NewsService {
    store: Arc<dyn ContentStore>,
    collection: String,
}

impl NewsService {
    /// Create a news service over the given store.
    pub fn new(store: Arc<dyn ContentStore>, config: &Config) -> Self {
        Self {
            store,
            collection: config.store.news_collection.clone(),
        }
    }

    /// Fetch up to `limit` published news items, newest first.
    ///
    /// Returns an empty list on any store failure.
    pub async fn fetch_news(&self, limit: usize) -> Vec<NewsItem> {
        let query = Query::new()
            .sorts(json!([{"property": fields::PUBLISHED, "direction": "descending"}]))
            .page_size(limit);

        match self.store.query(&self.collection, query).await {
            Ok(records) => records.iter().map(Self::normalize).collect(),
            Err(error) => {
                log::error!("Failed to fetch news: {error}");
                Vec::new()
            }
        }
    }

    /// Fetch a single news item by record id.
    pub async fn fetch_by_id(&self, id: &str) -> Option<NewsItem> {
        match self.store.retrieve(id).await {
            Ok(record) => Some(Self::normalize(&record)),
            Err(error) => {
                log::error!("Failed to fetch news item {id}: {error}");
                None
            }
        }
    }

    /// Fetch a news detail page by exact title.
    ///
    /// Returns `None` when no record matches or the store is unreachable.
    pub async fn fetch_article(&self, title: &str) -> Option<Article> {
        let query =
            Query::new().filter(json!({"property": fields::TITLE, "title": {"equals": title}}));

        let records = match self.store.query(&self.collection, query).await {
            Ok(records) => records,
            Err(error) => {
                log::error!("Failed to look up article '{title}': {error}");
                return None;
            }
        };
        let record = records.first()?;
        let id = extract::record_id(record);

        let content = match self.store.list_children(&id).await {
            Ok(blocks) => Self::parse_blocks(&blocks),
            Err(error) => {
                log::error!("Failed to fetch article body {id}: {error}");
                return None;
            }
        };

        let props_title = extract::property(record, fields::TITLE);
        let date = Self::publication_date(record);

        Some(Article {
            id,
            title: extract::plain_text(props_title.and_then(|p| p.get("title"))),
            date,
            content,
            cover_image: extract::cover_url(record),
        })
    }

    /// Enrich one item with its body blocks and full-detail cover.
    ///
    /// A failed enrichment degrades this item only: empty content, no cover
    /// image, base fields untouched.
    pub async fn enrich(&self, mut item: NewsItem) -> NewsItem {
        match self.fetch_detail(&item.id).await {
            Ok((content, cover_image)) => {
                item.content = content;
                item.cover_image = cover_image;
            }
            Err(error) => {
                log::warn!("Enrichment failed for news {}: {error}", item.id);
                item.content = Vec::new();
                item.cover_image = None;
            }
        }
        item
    }

    /// Fetch body blocks and the full record concurrently.
    async fn fetch_detail(&self, id: &str) -> Result<(Vec<ContentBlock>, Option<String>)> {
        let (blocks, record) =
            tokio::join!(self.store.list_children(id), self.store.retrieve(id));
        let content = Self::parse_blocks(&blocks?);
        let cover_image = extract::cover_url(&record?);
        Ok((content, cover_image))
    }

    /// Map one raw record to a [`NewsItem`]. All field access is defensive.
    pub(crate) fn normalize(record: &Value) -> NewsItem {
        let id = extract::record_id(record);
        let title = extract::plain_text(
            extract::property(record, fields::TITLE).and_then(|p| p.get("title")),
        );

        // Single-select category maps to at most one tag.
        let tags = extract::select_name(extract::property(record, fields::CATEGORY))
            .into_iter()
            .collect();

        let cover_url =
            extract::cover_url(record).unwrap_or_else(|| extract::fallback_image(&id));
        let url = extract::url_value(extract::property(record, fields::URL))
            .unwrap_or_else(|| extract::canonical_url(record));

        NewsItem {
            date: Self::publication_date(record),
            id,
            title,
            // The collection has no summary field; kept for wire shape.
            summary: String::new(),
            tags,
            cover_url,
            url,
            content: Vec::new(),
            cover_image: None,
        }
    }

    /// Publish date, falling back to the record creation timestamp.
    fn publication_date(record: &Value) -> String {
        extract::property(record, fields::PUBLISHED)
            .and_then(|p| p.get("date"))
            .and_then(|d| d.get("start"))
            .and_then(Value::as_str)
            .or_else(|| {
                extract::property(record, fields::CREATED)
                    .and_then(|p| p.get("created_time"))
                    .and_then(Value::as_str)
            })
            .unwrap_or_default()
            .to_string()
    }

    /// Map raw child blocks to typed content blocks.
    ///
    /// Image blocks keep their (possibly unresolved) URL; other block types
    /// are kept only when they carry rich text.
    pub(crate) fn parse_blocks(blocks: &[Value]) -> Vec<ContentBlock> {
        blocks
            .iter()
            .filter_map(|block| {
                let kind = block.get("type").and_then(Value::as_str)?;
                if kind == "image" {
                    return Some(ContentBlock::image(extract::file_url(block.get("image"))));
                }
                let rich_text = block.get(kind)?.get("rich_text")?;
                Some(ContentBlock::text(
                    kind,
                    extract::plain_text(Some(rich_text)),
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use serde_json::json;

    use crate::error::AppError;

    /// Fake store serving one news record and a one-paragraph body.
    struct FakeStore {
        fail: bool,
    }

    #[async_trait]
    impl ContentStore for FakeStore {
        async fn query(&self, _collection: &str, _query: Query) -> Result<Vec<Value>> {
            if self.fail {
                return Err(AppError::api(503, "store down"));
            }
            Ok(vec![news_record()])
        }

        async fn retrieve(&self, _id: &str) -> Result<Value> {
            Ok(news_record())
        }

        async fn list_children(&self, _parent_id: &str) -> Result<Vec<Value>> {
            Ok(vec![json!({
                "type": "paragraph",
                "paragraph": {"rich_text": [{"plain_text": "本文"}]}
            })])
        }

        async fn describe(&self, _collection: &str) -> Result<Value> {
            Ok(json!({}))
        }
    }

    fn service(fail: bool) -> NewsService {
        let mut config = Config::default();
        config.store.news_collection = "news-db".to_string();
        NewsService::new(Arc::new(FakeStore { fail }), &config)
    }

    #[tokio::test]
    async fn fetch_news_absorbs_store_failure() {
        assert!(service(true).fetch_news(10).await.is_empty());
    }

    #[tokio::test]
    async fn fetch_article_assembles_detail_page() {
        let article = service(false)
            .fetch_article("部誌を公開しました")
            .await
            .unwrap();
        assert_eq!(article.title, "部誌を公開しました");
        assert_eq!(article.date, "2026-01-10");
        assert_eq!(article.content, vec![ContentBlock::text("paragraph", "本文")]);
        assert_eq!(
            article.cover_image.as_deref(),
            Some("https://img.example/c.png")
        );
    }

    #[tokio::test]
    async fn fetch_article_absorbs_store_failure() {
        assert!(service(true).fetch_article("anything").await.is_none());
    }

    fn news_record() -> Value {
        json!({
            "id": "page-1",
            "url": "https://store.example/page-1",
            "cover": {"type": "external", "external": {"url": "https://img.example/c.png"}},
            "properties": {
                "タイトル": {"title": [{"plain_text": "部誌を公開しました"}]},
                "公開日": {"date": {"start": "2026-01-10"}},
                "作成日": {"created_time": "2026-01-08T09:00:00.000Z"},
                "カテゴリー": {"select": {"name": "お知らせ"}},
                "URL": {"url": "https://club.example/news/1"}
            }
        })
    }

    #[test]
    fn normalize_maps_all_fields() {
        let item = NewsService::normalize(&news_record());
        assert_eq!(item.id, "page-1");
        assert_eq!(item.title, "部誌を公開しました");
        assert_eq!(item.date, "2026-01-10");
        assert_eq!(item.tags, vec!["お知らせ"]);
        assert_eq!(item.cover_url, "https://img.example/c.png");
        assert_eq!(item.url, "https://club.example/news/1");
        assert_eq!(item.summary, "");
        assert!(item.content.is_empty());
        assert!(item.cover_image.is_none());
    }

    #[test]
    fn normalize_date_falls_back_to_created_time() {
        let mut record = news_record();
        record["properties"]["公開日"] = json!({"date": null});
        let item = NewsService::normalize(&record);
        assert_eq!(item.date, "2026-01-08T09:00:00.000Z");

        record["properties"]
            .as_object_mut()
            .unwrap()
            .remove("作成日");
        let item = NewsService::normalize(&record);
        assert_eq!(item.date, "");
    }

    #[test]
    fn normalize_cover_falls_back_to_placeholder() {
        let mut record = news_record();
        record.as_object_mut().unwrap().remove("cover");
        let item = NewsService::normalize(&record);
        assert_eq!(item.cover_url, extract::fallback_image("page-1"));
    }

    #[test]
    fn normalize_url_falls_back_to_canonical() {
        let mut record = news_record();
        record["properties"]
            .as_object_mut()
            .unwrap()
            .remove("URL");
        let item = NewsService::normalize(&record);
        assert_eq!(item.url, "https://store.example/page-1");
    }

    #[test]
    fn normalize_tolerates_empty_record() {
        let item = NewsService::normalize(&json!({}));
        assert_eq!(item.title, "");
        assert_eq!(item.date, "");
        assert!(item.tags.is_empty());
        // Even a shapeless record keeps the cover invariant.
        assert_eq!(item.cover_url, extract::fallback_image(""));
    }

    #[test]
    fn parse_blocks_keeps_text_and_images() {
        let blocks = vec![
            json!({"type": "paragraph", "paragraph": {"rich_text": [{"plain_text": "hello"}]}}),
            json!({"type": "image", "image": {"type": "external", "external": {"url": "https://img.example/a.png"}}}),
            json!({"type": "divider", "divider": {}}),
            json!({"no_type": true}),
        ];
        let content = NewsService::parse_blocks(&blocks);
        assert_eq!(content.len(), 2);
        assert_eq!(content[0], ContentBlock::text("paragraph", "hello"));
        assert_eq!(
            content[1],
            ContentBlock::image(Some("https://img.example/a.png".to_string()))
        );
    }

    #[test]
    fn parse_blocks_keeps_unresolved_images() {
        let blocks = vec![json!({"type": "image", "image": {"type": "emoji"}})];
        let content = NewsService::parse_blocks(&blocks);
        assert_eq!(content, vec![ContentBlock::image(None)]);
    }
}

// src/pipeline/home.rs

//! Aggregated home payload.
//!
//! Runs the four independent section fetches concurrently, then enriches
//! every news item in parallel. One item's enrichment failure degrades that
//! item alone; a section's failure degrades that section alone. The
//! orchestrator itself never fails.

use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::models::{Config, FutureSchedule, MonthGroup, NewsItem, ProjectItem};
use crate::services::{NewsService, ProjectService, ScheduleService};
use crate::store::ContentStore;

/// How many news items the home page carries.
const HOME_NEWS_LIMIT: usize = 10;

/// Everything the home page needs, plus its freshness contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomePayload {
    pub news: Vec<NewsItem>,
    pub projects: Vec<ProjectItem>,
    pub schedule: FutureSchedule,
    pub past_events: Vec<MonthGroup>,

    /// Cache-Control value the presentation layer must attach as-is
    pub cache_control: String,
}

/// Fetch and assemble the aggregated home payload.
pub async fn load_home(store: Arc<dyn ContentStore>, config: &Config) -> HomePayload {
    let news_service = NewsService::new(Arc::clone(&store), config);
    let project_service = ProjectService::new(Arc::clone(&store), config);
    let schedule_service = ScheduleService::new(store, config);

    // The four section fetches are independent; run them together. Each is
    // individually non-failing.
    let (news, mut projects, schedule, past_events) = tokio::join!(
        news_service.fetch_news(HOME_NEWS_LIMIT),
        project_service.fetch_projects(),
        schedule_service.fetch_future_schedule(),
        schedule_service.fetch_past_events_by_month(),
    );

    log::info!(
        "Home payload: {} news, {} projects, next event: {}, {} past months",
        news.len(),
        projects.len(),
        if schedule.next_event.is_some() { "yes" } else { "no" },
        past_events.len()
    );

    // Per-item enrichment fan-out; results re-associate with their item by
    // ownership, not completion order.
    let news = join_all(news.into_iter().map(|item| news_service.enrich(item))).await;

    // The home page does not show creators; strip them from the payload.
    for project in &mut projects {
        project.creator = String::new();
    }

    HomePayload {
        news,
        projects,
        schedule,
        past_events,
        cache_control: config.cache.header_value(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use serde_json::{Value, json};

    use crate::error::{AppError, Result};
    use crate::store::Query;

    /// Fake store serving canned records, with one news id whose child
    /// lookup always fails.
    struct FakeStore {
        failing_id: Option<String>,
        fail_all: bool,
    }

    fn news_record(id: &str) -> Value {
        json!({
            "id": id,
            "url": format!("https://store.example/{id}"),
            "properties": {
                "タイトル": {"title": [{"plain_text": format!("news {id}")}]},
                "公開日": {"date": {"start": "2026-01-10"}}
            }
        })
    }

    #[async_trait]
    impl ContentStore for FakeStore {
        async fn query(&self, collection: &str, _query: Query) -> Result<Vec<Value>> {
            if self.fail_all {
                return Err(AppError::api(503, "store down"));
            }
            match collection {
                "news-db" => Ok(vec![
                    news_record("n1"),
                    news_record("n2"),
                    news_record("n3"),
                ]),
                _ => Ok(Vec::new()),
            }
        }

        async fn retrieve(&self, id: &str) -> Result<Value> {
            Ok(json!({
                "id": id,
                "cover": {"type": "external", "external": {"url": format!("https://img.example/{id}.png")}}
            }))
        }

        async fn list_children(&self, parent_id: &str) -> Result<Vec<Value>> {
            if self.failing_id.as_deref() == Some(parent_id) {
                return Err(AppError::api(500, "blocks unavailable"));
            }
            Ok(vec![json!({
                "type": "paragraph",
                "paragraph": {"rich_text": [{"plain_text": "body"}]}
            })])
        }

        async fn describe(&self, _collection: &str) -> Result<Value> {
            Ok(json!({"properties": {}}))
        }
    }

    fn test_config() -> Config {
        let mut config = Config::default();
        config.store.news_collection = "news-db".to_string();
        config.store.project_collection = "project-db".to_string();
        config.store.schedule_collection = "schedule-db".to_string();
        config
    }

    #[tokio::test]
    async fn one_failed_enrichment_degrades_only_that_item() {
        let store = Arc::new(FakeStore {
            failing_id: Some("n2".to_string()),
            fail_all: false,
        });
        let payload = load_home(store, &test_config()).await;

        assert_eq!(payload.news.len(), 3);
        let by_id = |id: &str| payload.news.iter().find(|n| n.id == id).unwrap();

        let degraded = by_id("n2");
        assert!(degraded.content.is_empty());
        assert!(degraded.cover_image.is_none());
        // Base fields survive the failed enrichment.
        assert_eq!(degraded.title, "news n2");

        for id in ["n1", "n3"] {
            let enriched = by_id(id);
            assert_eq!(enriched.content.len(), 1);
            assert!(enriched.cover_image.is_some());
        }
    }

    #[tokio::test]
    async fn store_outage_yields_all_empty_sections() {
        let store = Arc::new(FakeStore {
            failing_id: None,
            fail_all: true,
        });
        let payload = load_home(store, &test_config()).await;

        assert!(payload.news.is_empty());
        assert!(payload.projects.is_empty());
        assert!(payload.schedule.next_event.is_none());
        assert!(payload.schedule.upcoming_events.is_empty());
        assert!(payload.past_events.is_empty());
    }

    #[tokio::test]
    async fn payload_carries_freshness_window() {
        let store = Arc::new(FakeStore {
            failing_id: None,
            fail_all: false,
        });
        let payload = load_home(store, &test_config()).await;
        assert_eq!(payload.cache_control, "public, max-age=60, s-maxage=600");
    }
}

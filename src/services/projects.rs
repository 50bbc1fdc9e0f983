// src/services/projects.rs

//! Project fetch service.
//!
//! Projects carry a relation to the member roster; resolving the creator
//! name needs a secondary retrieve per project. A failed lookup degrades
//! that project's `creator` to an empty string and never drops the project.

use std::sync::Arc;

use futures::future::join_all;
use serde_json::{Value, json};

use crate::extract;
use crate::models::{Config, ProjectItem};
use crate::schema::{member, project as fields};
use crate::store::{ContentStore, Query};

/// Service for fetching and normalizing project records.
pub struct ProjectService {
    store: Arc<dyn ContentStore>,
    collection: String,
}

impl ProjectService {
    /// Create a project service over the given store.
    pub fn new(store: Arc<dyn ContentStore>, config: &Config) -> Self {
        Self {
            store,
            collection: config.store.project_collection.clone(),
        }
    }

    /// Fetch all projects, newest first, with creators resolved.
    ///
    /// Returns an empty list on any store failure.
    pub async fn fetch_projects(&self) -> Vec<ProjectItem> {
        let query = Query::new()
            .sorts(json!([{"timestamp": "created_time", "direction": "descending"}]));

        let records = match self.store.query(&self.collection, query).await {
            Ok(records) => records,
            Err(error) => {
                log::error!("Failed to fetch projects: {error}");
                return Vec::new();
            }
        };

        // Creator lookups are independent per project; run them together.
        join_all(records.iter().map(|record| self.with_creator(record))).await
    }

    /// List the category options declared on the project collection itself.
    ///
    /// Returns an empty list when the schema cannot be read.
    pub async fn fetch_categories(&self) -> Vec<String> {
        let schema = match self.store.describe(&self.collection).await {
            Ok(schema) => schema,
            Err(error) => {
                log::error!("Failed to fetch project categories: {error}");
                return Vec::new();
            }
        };

        first_property(&schema, &fields::CATEGORY_CANDIDATES)
            .and_then(|prop| prop.get("select"))
            .and_then(prop_options)
            .unwrap_or_default()
    }

    /// Normalize one record and resolve its creator relation.
    async fn with_creator(&self, record: &Value) -> ProjectItem {
        let mut item = Self::normalize(record);

        let Some(member_id) = Self::first_relation_id(record) else {
            return item;
        };

        // Only the first related member is inspected; multi-creator
        // projects keep the single-value behavior of the source.
        match self.store.retrieve(&member_id).await {
            Ok(member_record) => {
                item.creator = Self::member_name(&member_record);
            }
            Err(error) => {
                log::warn!(
                    "Failed to resolve creator for project {}: {error}",
                    item.id
                );
                item.creator = String::new();
            }
        }
        item
    }

    /// Map one raw record to a [`ProjectItem`]. All field access is defensive.
    pub(crate) fn normalize(record: &Value) -> ProjectItem {
        let id = extract::record_id(record);
        let title = extract::plain_text(
            extract::property(record, fields::TITLE).and_then(|p| p.get("title")),
        );
        let category =
            extract::select_name(extract::property(record, fields::CATEGORY)).unwrap_or_default();
        let cover_url =
            extract::cover_url(record).unwrap_or_else(|| extract::fallback_image(&id));
        let url = extract::url_value(extract::property(record, fields::URL))
            .unwrap_or_else(|| extract::canonical_url(record));

        ProjectItem {
            id,
            title,
            // The collection has no description field; kept for wire shape.
            description: String::new(),
            category,
            cover_url,
            tags: Vec::new(),
            url,
            creator: String::new(),
        }
    }

    /// First member-relation id on a project record, if any.
    fn first_relation_id(record: &Value) -> Option<String> {
        extract::property(record, fields::MEMBER_RELATION)?
            .get("relation")?
            .as_array()?
            .first()?
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    /// Member display name, checked under both historical title fields.
    fn member_name(record: &Value) -> String {
        for candidate in member::TITLE_CANDIDATES {
            let name = extract::plain_text(
                extract::property(record, candidate).and_then(|p| p.get("title")),
            );
            if !name.is_empty() {
                return name;
            }
        }
        String::new()
    }
}

/// First present property among the candidates on a schema description.
fn first_property<'a>(schema: &'a Value, candidates: &[&str]) -> Option<&'a Value> {
    let properties = schema.get("properties")?;
    candidates.iter().find_map(|name| properties.get(name))
}

/// Option names of a select property description.
fn prop_options(select: &Value) -> Option<Vec<String>> {
    let options = select.get("options")?.as_array()?;
    Some(
        options
            .iter()
            .filter_map(|option| option.get("name").and_then(Value::as_str))
            .map(str::to_string)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use serde_json::json;

    use crate::error::{AppError, Result};
    use crate::store::Query;

    /// Fake store serving one project; member retrieval can be failed.
    struct FakeStore {
        fail_retrieve: bool,
    }

    #[async_trait]
    impl ContentStore for FakeStore {
        async fn query(&self, _collection: &str, _query: Query) -> Result<Vec<Value>> {
            Ok(vec![project_record()])
        }

        async fn retrieve(&self, id: &str) -> Result<Value> {
            if self.fail_retrieve {
                return Err(AppError::api(500, "member lookup failed"));
            }
            assert_eq!(id, "member-1");
            Ok(json!({"properties": {"名前": {"title": [{"plain_text": "山田"}]}}}))
        }

        async fn list_children(&self, _parent_id: &str) -> Result<Vec<Value>> {
            Ok(Vec::new())
        }

        async fn describe(&self, _collection: &str) -> Result<Value> {
            Ok(json!({}))
        }
    }

    fn service(fail_retrieve: bool) -> ProjectService {
        let mut config = Config::default();
        config.store.project_collection = "project-db".to_string();
        ProjectService::new(Arc::new(FakeStore { fail_retrieve }), &config)
    }

    #[tokio::test]
    async fn fetch_projects_resolves_creator() {
        let projects = service(false).fetch_projects().await;
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].creator, "山田");
    }

    #[tokio::test]
    async fn failed_creator_lookup_keeps_the_project() {
        let projects = service(true).fetch_projects().await;
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].creator, "");
        assert_eq!(projects[0].title, "学園祭ゲーム");
    }

    fn project_record() -> Value {
        json!({
            "id": "proj-1",
            "url": "https://store.example/proj-1",
            "properties": {
                "名前": {"title": [{"plain_text": "学園祭ゲーム"}]},
                "カテゴリ": {"select": {"name": "Game"}},
                "URL": {"url": "https://club.example/projects/ge-mu"},
                "部員名簿": {"relation": [{"id": "member-1"}, {"id": "member-2"}]}
            }
        })
    }

    #[test]
    fn normalize_maps_all_fields() {
        let item = ProjectService::normalize(&project_record());
        assert_eq!(item.id, "proj-1");
        assert_eq!(item.title, "学園祭ゲーム");
        assert_eq!(item.category, "Game");
        assert_eq!(item.url, "https://club.example/projects/ge-mu");
        assert_eq!(item.description, "");
        assert_eq!(item.creator, "");
        assert!(item.tags.is_empty());
    }

    #[test]
    fn normalize_without_description_field_yields_empty_string() {
        // The source collection has no description property at all.
        let item = ProjectService::normalize(&project_record());
        assert_eq!(item.description, "");
    }

    #[test]
    fn normalize_cover_falls_back_to_placeholder() {
        let item = ProjectService::normalize(&project_record());
        assert_eq!(item.cover_url, extract::fallback_image("proj-1"));
    }

    #[test]
    fn first_relation_id_uses_only_the_first_entry() {
        assert_eq!(
            ProjectService::first_relation_id(&project_record()).as_deref(),
            Some("member-1")
        );
        assert_eq!(ProjectService::first_relation_id(&json!({})), None);
    }

    #[test]
    fn member_name_checks_both_title_fields() {
        let japanese = json!({"properties": {"名前": {"title": [{"plain_text": "山田"}]}}});
        let english = json!({"properties": {"Name": {"title": [{"plain_text": "Yamada"}]}}});
        let neither = json!({"properties": {}});
        assert_eq!(ProjectService::member_name(&japanese), "山田");
        assert_eq!(ProjectService::member_name(&english), "Yamada");
        assert_eq!(ProjectService::member_name(&neither), "");
    }

    #[test]
    fn prop_options_reads_select_options() {
        let select = json!({"options": [{"name": "Game"}, {"name": "Web"}]});
        assert_eq!(
            prop_options(&select),
            Some(vec!["Game".to_string(), "Web".to_string()])
        );
        assert_eq!(prop_options(&json!({})), None);
    }
}

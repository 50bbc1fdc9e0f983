// src/models/mod.rs

//! Domain models for the content layer.
//!
//! Normalized entities are plain value objects with no back-references;
//! raw store records are discarded once normalization has run.

mod config;
mod news;
mod project;
mod schedule;

// Re-export all public types
pub use config::{
    CacheConfig, Config, Replacement, ScheduleConfig, StoreConfig, TranslationConfig,
};
pub use news::{Article, ContentBlock, NewsItem};
pub use project::ProjectItem;
pub use schedule::{FutureSchedule, MonthGroup, ScheduleEvent};

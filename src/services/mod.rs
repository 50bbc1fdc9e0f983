// src/services/mod.rs

//! Fetch services: one per content section.
//!
//! Each service queries its collection through the [`ContentStore`] trait,
//! normalizes raw records into the crate's value objects, and absorbs
//! remote failures into empty or degraded results.
//!
//! [`ContentStore`]: crate::store::ContentStore

pub mod news;
pub mod projects;
pub mod schedule;

pub use news::NewsService;
pub use projects::ProjectService;
pub use schedule::ScheduleService;

// src/lib.rs

//! sitedata: content aggregation and caching for the club website.
//!
//! Queries loosely-typed records from the remote content store, normalizes
//! them into stable shapes, classifies schedule events by time, and caches
//! translated display strings. Every boundary absorbs remote failures; the
//! presentation layer only ever sees empty or degraded sections.

pub mod error;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod schema;
pub mod services;
pub mod store;
pub mod translate;

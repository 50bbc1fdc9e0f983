// src/pipeline/mod.rs

//! Aggregation entry points for the presentation layer.

pub mod home;

pub use home::{HomePayload, load_home};

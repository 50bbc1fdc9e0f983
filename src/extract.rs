// src/extract.rs

//! Defensive field extraction from loosely-typed store records.
//!
//! Records arrive as dynamic JSON property bags. These helpers never fail:
//! a missing or oddly-shaped field yields an empty string or `None`, and the
//! caller decides the fallback.

use serde_json::Value;

/// Concatenate the plain-text fragments of a rich-text array.
///
/// Returns an empty string for null or non-array input.
pub fn plain_text(rich_text: Option<&Value>) -> String {
    let Some(Value::Array(fragments)) = rich_text else {
        return String::new();
    };
    fragments
        .iter()
        .filter_map(|fragment| fragment.get("plain_text").and_then(Value::as_str))
        .collect()
}

/// Resolve a file property ({external, file} tagged union) to its URL.
///
/// Returns `None` for unrecognized or missing shapes.
pub fn file_url(file_ref: Option<&Value>) -> Option<String> {
    let file_ref = file_ref?;
    let url = match file_ref.get("type").and_then(Value::as_str)? {
        "external" => file_ref.get("external")?.get("url"),
        "file" => file_ref.get("file")?.get("url"),
        _ => return None,
    };
    url.and_then(Value::as_str).map(str::to_string)
}

/// Resolve a record's cover image URL, if it has one.
pub fn cover_url(record: &Value) -> Option<String> {
    file_url(record.get("cover"))
}

/// Deterministic placeholder-image URL for records without a cover.
///
/// The same seed always yields the same URL, so renders and tests are
/// reproducible and edge caches stay warm.
pub fn fallback_image(seed: &str) -> String {
    format!("https://picsum.photos/seed/{seed}/800/600")
}

/// Read a property bag entry: `record.properties[name]`.
pub fn property<'a>(record: &'a Value, name: &str) -> Option<&'a Value> {
    record.get("properties")?.get(name)
}

/// Read a select property's chosen option name.
pub fn select_name(prop: Option<&Value>) -> Option<String> {
    prop?
        .get("select")?
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Read a url property's value.
pub fn url_value(prop: Option<&Value>) -> Option<String> {
    prop?.get("url").and_then(Value::as_str).map(str::to_string)
}

/// Read a record's `id`, empty string if absent.
pub fn record_id(record: &Value) -> String {
    record
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Read a record's canonical external URL, empty string if absent.
pub fn canonical_url(record: &Value) -> String {
    record
        .get("url")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

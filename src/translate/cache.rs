// src/translate/cache.rs

//! Process-wide memoizing cache for translated display strings.
//!
//! Entries are immutable once written and live for the process lifetime;
//! bumping [`SCHEMA_VERSION`] moves every key to a new namespace, which
//! logically invalidates old entries without deleting anything. Concurrent
//! misses for the same key each call the collaborator independently; the
//! collaborator is idempotent, so the last write winning is harmless.

use std::collections::HashMap;
use std::sync::Mutex;

use regex::Regex;

use crate::models::TranslationConfig;
use crate::schema::SCHEMA_VERSION;
use crate::translate::Translator;

/// Memoizing wrapper around a [`Translator`].
pub struct TranslationCache {
    translator: Box<dyn Translator>,
    default_target: String,
    glossary: Vec<(Regex, String)>,
    entries: Mutex<HashMap<String, String>>,
}

impl TranslationCache {
    /// Create a cache over the given translator.
    ///
    /// Glossary rules are compiled once, case-insensitively; a rule that
    /// fails to compile is skipped with a warning.
    pub fn new(translator: Box<dyn Translator>, config: &TranslationConfig) -> Self {
        let glossary = config
            .glossary
            .iter()
            .filter_map(|rule| {
                match Regex::new(&format!("(?i){}", regex::escape(&rule.from))) {
                    Ok(pattern) => Some((pattern, rule.to.clone())),
                    Err(error) => {
                        log::warn!("Skipping glossary rule '{}': {error}", rule.from);
                        None
                    }
                }
            })
            .collect();

        Self {
            translator,
            default_target: config.default_target.clone(),
            glossary,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Translate `text`, serving repeats from the cache.
    ///
    /// Never fails: if the collaborator errors, the original text comes
    /// back unchanged and the miss is not cached, so a later call retries.
    pub async fn get(&self, text: &str, target: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let key = self.key(text, target);
        if let Some(hit) = self.lookup(&key) {
            return hit;
        }

        let translated = match self.translator.translate(text, target).await {
            Ok(translated) => translated,
            Err(error) => {
                log::warn!("Translation failed, serving source text: {error}");
                return text.to_string();
            }
        };

        // Terminology repairs only apply for the site's default language.
        let translated = if target == self.default_target {
            self.apply_glossary(&translated)
        } else {
            translated
        };

        self.entries
            .lock()
            .expect("translation cache poisoned")
            .insert(key, translated.clone());
        translated
    }

    /// Drop every cached entry.
    pub fn clear(&self) {
        self.entries
            .lock()
            .expect("translation cache poisoned")
            .clear();
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .expect("translation cache poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("translation cache poisoned")
            .get(key)
            .cloned()
    }

    fn key(&self, text: &str, target: &str) -> String {
        format!("{SCHEMA_VERSION}:{text}:{target}")
    }

    /// Apply the ordered terminology-correction rules.
    fn apply_glossary(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (pattern, replacement) in &self.glossary {
            result = pattern
                .replace_all(&result, replacement.as_str())
                .into_owned();
        }
        result
    }
}

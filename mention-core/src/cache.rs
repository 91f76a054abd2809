//! Keyed cache of tokenized transcripts.
//!
//! Tokenizing is the only per-transcript cost that does not depend on the
//! keywords, so a caller that recomputes metrics over the same library can keep
//! token sequences between calls. The cache is owned and passed in by the
//! caller; the engine never holds one.
//!
//! Each entry remembers the exact text it was built from. Asking for a key
//! with different text replaces the entry, so a stale sequence can never be
//! returned.

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::analyzer::{TokenSequence, Tokenizer};

#[derive(Debug, Clone)]
struct CacheEntry {
    text: Box<str>,
    tokens: TokenSequence,
}

impl CacheEntry {
    fn build(tokenizer: &Tokenizer, text: &str) -> Self {
        Self {
            text: text.into(),
            tokens: tokenizer.tokenize(text),
        }
    }
}

/// Token sequences keyed by transcript label.
#[derive(Debug, Default, Clone)]
pub struct TokenCache {
    entries: FxHashMap<String, CacheEntry>,
    hits: u64,
    misses: u64,
}

impl TokenCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the tokens for `key`, tokenizing `text` if the entry is missing
    /// or was built from different text.
    pub fn get_or_tokenize(&mut self, tokenizer: &Tokenizer, key: &str, text: &str) -> &TokenSequence {
        let mut hit = true;
        let entry = self.entries.entry(key.to_owned()).or_insert_with(|| {
            hit = false;
            CacheEntry::build(tokenizer, text)
        });

        if hit && *entry.text != *text {
            hit = false;
            *entry = CacheEntry::build(tokenizer, text);
        }

        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        trace!(key, hit, "token cache lookup");

        &entry.tokens
    }

    /// Returns the cached tokens for `key` if they were built from `text`.
    ///
    /// Does not count as a hit or miss.
    pub fn lookup(&self, key: &str, text: &str) -> Option<&TokenSequence> {
        self.entries
            .get(key)
            .filter(|entry| *entry.text == *text)
            .map(|entry| &entry.tokens)
    }

    /// Drops the entry for `key`. Returns `true` if one existed.
    pub fn invalidate(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Drops every entry. Hit and miss counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached transcripts.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookups served from the cache.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that had to tokenize.
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Hit rate as a percentage (0.0-100.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64 * 100.0
        }
    }
}

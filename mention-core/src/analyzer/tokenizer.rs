//! Word tokenizer.
//!
//! Second stage of the analysis pipeline. Raw text goes through
//! [`TextNormalizer`] first; the tokenizer then cuts the canonical text on
//! ASCII spaces and reports each word with its position:
//!
//! ```ignore
//! ("the", 0)
//! ("fomc", 1)
//! ("met", 2)
//! ```
//!
//! ## Single source of truth
//!
//! [`Tokenizer::word_count`] is the only way word counts are produced in this
//! workspace. Stored counts, minute estimates and position percentages all go
//! through it, so the numbers a user sees can never drift apart.
//!
//! ## Usage
//!
//! ```rust
//! use mention_core::analyzer::Tokenizer;
//!
//! let tokenizer = Tokenizer::new();
//!
//! let tokens = tokenizer.tokenize("Kalshi, kalshi... KALSHI!");
//! assert_eq!(tokens.to_vec(), ["kalshi", "kalshi", "kalshi"]);
//! assert_eq!(tokenizer.word_count("Rate-hike talk, don't panic."), 4);
//! ```

use core::str;
use memchr::memchr_iter;

use super::normalizer::{TextNormalizer, WORD_SEPARATOR};
use super::tokens::{TokenSequence, TokenSpan};

/// Splits text into lowercase word tokens.
///
/// Cheap to copy; holds no buffers of its own.
#[derive(Debug, Default, Copy, Clone)]
#[repr(transparent)]
pub struct Tokenizer {
    normalizer: TextNormalizer,
}

impl Tokenizer {
    /// Creates a new tokenizer.
    #[inline]
    pub const fn new() -> Self {
        Self {
            normalizer: TextNormalizer::new(),
        }
    }

    /// Tokenizes canonical input and emits `(text, position)`.
    ///
    /// Input must come from [`TextNormalizer`]; contract violations panic in
    /// debug builds. Position is `u32`. After emitting a token at position
    /// `u32::MAX`, further emissions stop.
    #[inline(always)]
    #[allow(clippy::needless_lifetimes)]
    pub fn tokenize_canonical<'n, F>(&self, canonical: &'n str, mut emit: F)
    where
        F: FnMut(&'n str, u32),
    {
        let bytes = canonical.as_bytes();

        debug_assert!(
            TextNormalizer::is_canonical(canonical),
            "tokenizer: input is not canonical, normalizer contract violated"
        );

        if bytes.is_empty() {
            return;
        }

        let mut start = 0usize;
        let mut pos = 0u32;

        for i in memchr_iter(WORD_SEPARATOR, bytes) {
            if start < i {
                // ASCII space is never part of a multi-byte char, so both
                // ends of the slice are char boundaries.
                let Ok(text) = str::from_utf8(&bytes[start..i]) else {
                    return;
                };
                emit(text, pos);
                if pos == u32::MAX {
                    return;
                }
                pos += 1;
            }
            start = i + 1;
        }

        if start < bytes.len() {
            if let Ok(text) = str::from_utf8(&bytes[start..]) {
                emit(text, pos);
            }
        }
    }

    /// Normalizes and tokenizes raw text.
    pub fn tokenize(&self, text: &str) -> TokenSequence {
        let canonical = self.normalizer.normalize(text);
        let mut spans = Vec::with_capacity(canonical.len() / 5 + 1);
        let base = canonical.as_ptr() as usize;

        self.tokenize_canonical(&canonical, |token, _| {
            let offset = token.as_ptr() as usize - base;
            spans.push(TokenSpan::new(offset as u32, token.len() as u32));
        });

        TokenSequence::from_parts(canonical, spans)
    }

    /// Number of words in `text`.
    pub fn word_count(&self, text: &str) -> usize {
        let mut canonical = String::new();
        self.normalizer.normalize_into(text, &mut canonical);
        let mut count = 0usize;
        self.tokenize_canonical(&canonical, |_, _| count += 1);
        count
    }
}

/// Tokenizes `text` with the default tokenizer.
#[inline]
pub fn tokenize(text: &str) -> TokenSequence {
    Tokenizer::new().tokenize(text)
}

/// Counts words in `text` with the default tokenizer.
#[inline]
pub fn word_count(text: &str) -> usize {
    Tokenizer::new().word_count(text)
}

//! Keyword phrases and token-level matching.
//!
//! A keyword is tokenized with the same [`Tokenizer`] as transcripts, so
//! `"Rate Hike"`, `"rate  hike"` and `"rate hike!"` all become the phrase
//! `["rate", "hike"]`. A match is an exact element-wise run of those terms in a
//! transcript's [`TokenSequence`].
//!
//! Every start position is reported, including overlapping ones:
//!
//! ```
//! use mention_core::analyzer::{find_matches, tokenize, Phrase};
//!
//! let tokens = tokenize("a a a");
//! assert_eq!(find_matches(&tokens, &Phrase::parse("a")), [0, 1, 2]);
//! assert_eq!(find_matches(&tokens, &Phrase::parse("a a")), [0, 1]);
//! ```

use smallvec::SmallVec;

use super::tokenizer::Tokenizer;
use super::tokens::TokenSequence;

/// Phrases rarely exceed a handful of words.
pub const INLINE_TERMS: usize = 4;

/// A tokenized keyword.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Phrase {
    terms: SmallVec<[String; INLINE_TERMS]>,
}

impl Phrase {
    /// Tokenizes `keyword` into a phrase.
    ///
    /// A keyword without any word characters yields an empty phrase, which
    /// never matches.
    pub fn parse(keyword: &str) -> Self {
        Self::from_tokens(&Tokenizer::new().tokenize(keyword))
    }

    /// Builds a phrase from an already tokenized keyword.
    pub fn from_tokens(tokens: &TokenSequence) -> Self {
        Self {
            terms: tokens.iter().map(str::to_owned).collect(),
        }
    }

    /// Number of terms.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` if the keyword had no words and can never match.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The phrase terms in order.
    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.terms.iter().map(String::as_str)
    }

    /// Returns `true` if the phrase occurs at `start` in `tokens`.
    #[inline]
    pub fn matches_at(&self, tokens: &TokenSequence, start: usize) -> bool {
        !self.terms.is_empty()
            && self
                .terms
                .iter()
                .enumerate()
                .all(|(j, term)| tokens.get(start + j) == Some(term.as_str()))
    }
}

/// Calls `emit` with every start index of `phrase` in `tokens`, in order.
#[inline]
pub fn for_each_match<F>(tokens: &TokenSequence, phrase: &Phrase, mut emit: F)
where
    F: FnMut(u32),
{
    let k = phrase.len();
    if k == 0 || tokens.len() < k {
        return;
    }

    let first = phrase.terms[0].as_str();
    for (start, token) in tokens.iter().enumerate().take(tokens.len() - k + 1) {
        if token != first {
            continue;
        }
        if phrase.matches_at(tokens, start) {
            // TokenSequence never holds more than u32::MAX + 1 tokens.
            emit(start as u32);
        }
    }
}

/// Start indices of every occurrence of `phrase` in `tokens`.
pub fn find_matches(tokens: &TokenSequence, phrase: &Phrase) -> Vec<u32> {
    let mut out = Vec::new();
    for_each_match(tokens, phrase, |start| out.push(start));
    out
}

/// Start indices of every occurrence of the raw `keyword` in `tokens`.
///
/// A keyword that tokenizes to nothing returns no matches.
pub fn find_keyword_matches(tokens: &TokenSequence, keyword: &str) -> Vec<u32> {
    find_matches(tokens, &Phrase::parse(keyword))
}

/// Number of occurrences of `phrase` in `tokens`.
pub fn count_matches(tokens: &TokenSequence, phrase: &Phrase) -> usize {
    let mut n = 0usize;
    for_each_match(tokens, phrase, |_| n += 1);
    n
}

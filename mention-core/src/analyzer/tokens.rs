//! Token storage for one transcript.
//!
//! All tokens live in the transcript's canonical text. Each token is referenced
//! by an (offset, length) span into that single buffer, so a transcript of N
//! words costs one string plus N spans.
//!
//! ```text
//! Canonical:  "the quick brown fox"
//!              ^   ^     ^     ^
//! Spans:     (0,3)(4,5) (10,5)(16,3)
//! ```

use core::fmt;

/// Token reference - 8 bytes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenSpan {
    offset: u32,
    len: u32,
}

impl TokenSpan {
    /// Creates a new token span.
    #[inline(always)]
    pub const fn new(offset: u32, len: u32) -> Self {
        Self { offset, len }
    }

    /// Returns the byte offset in the canonical text.
    #[inline(always)]
    pub const fn offset(self) -> usize {
        self.offset as usize
    }

    /// Returns the byte length.
    #[inline(always)]
    pub const fn len(self) -> usize {
        self.len as usize
    }

    /// Returns `true` for a zero-length span.
    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.len == 0
    }
}

/// Ordered, lowercase word tokens of one text.
///
/// Built by [`Tokenizer::tokenize`](super::tokenizer::Tokenizer::tokenize).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TokenSequence {
    canonical: String,
    spans: Vec<TokenSpan>,
}

impl TokenSequence {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_parts(canonical: String, spans: Vec<TokenSpan>) -> Self {
        debug_assert!(spans
            .iter()
            .all(|s| s.offset() + s.len() <= canonical.len()));
        Self { canonical, spans }
    }

    /// Returns the number of tokens.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Returns `true` if the text contained no words.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Number of tokens as stored in reports.
    ///
    /// Saturates at `u32::MAX`; the tokenizer never emits more.
    #[inline(always)]
    pub fn count(&self) -> u32 {
        u32::try_from(self.spans.len()).unwrap_or(u32::MAX)
    }

    /// Gets a token by position.
    #[inline(always)]
    pub fn get(&self, index: usize) -> Option<&str> {
        let span = self.spans.get(index)?;
        let start = span.offset();
        self.canonical.get(start..start + span.len())
    }

    /// Iterates over tokens in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.spans.iter().map(move |span| {
            let start = span.offset();
            &self.canonical[start..start + span.len()]
        })
    }

    /// The canonical text the tokens were cut from.
    #[inline(always)]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Copies the tokens into owned strings.
    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_owned).collect()
    }
}

impl fmt::Debug for TokenSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

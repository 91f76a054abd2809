//! Text analysis pipeline.
//!
//! This module provides the text processing components:
//! - **Normalizer**: Rewrites raw text into canonical lowercase words
//! - **Tokenizer**: Splits canonical text into a token sequence
//! - **Phrase**: Tokenized keywords and token-level phrase matching

pub mod normalizer;
pub mod phrase;
pub mod tokenizer;
pub mod tokens;

pub use normalizer::TextNormalizer;
pub use phrase::{count_matches, find_keyword_matches, find_matches, for_each_match, Phrase};
pub use tokenizer::{tokenize, word_count, Tokenizer};
pub use tokens::{TokenSequence, TokenSpan};

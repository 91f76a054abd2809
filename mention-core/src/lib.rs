//! Keyword mention metrics over batches of plain-text transcripts.
//!
//! Text is normalized and split into words by the [`analyzer`], keywords are
//! matched as whole-word phrases, and [`MetricsEngine`] folds the matches into
//! a [`Report`]: per-keyword totals, averages, coverage and mean relative
//! position, plus word-count and duration summaries.
//!
//! ```
//! use mention_core::MetricsEngine;
//!
//! let engine = MetricsEngine::new();
//! let transcripts = [
//!     engine.transcript("jan", "The FOMC held rates. Powell spoke."),
//!     engine.transcript("feb", "CPI came in hot; rate hike odds rose."),
//! ];
//!
//! let report = engine.compute(&transcripts, &["fomc", "rate hike"]).unwrap();
//! assert_eq!(report.keywords[0].total_mentions, 1);
//! assert_eq!(report.keywords[1].pct_with_mention, 50.0);
//! ```

pub mod analyzer;
pub mod cache;
pub mod keywords;
pub mod logging;
pub mod metrics;

pub use analyzer::{tokenize, word_count, Phrase, TextNormalizer, TokenSequence, Tokenizer};
pub use cache::TokenCache;
pub use keywords::{merge_keyword_lists, parse_keyword_list};
pub use metrics::MetricsEngine;

pub use mention_types::{
    BatchSummary, KeywordMetric, MatchOccurrence, MetricsConfig, MetricsError, Report, Transcript,
    TranscriptIndex, TranscriptSummary,
};

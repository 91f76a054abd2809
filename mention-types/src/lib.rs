//! Core types for the mention metrics engine.
//!
//! This crate holds the plain data that flows in and out of
//! `mention-core`. Keeping it separate ensures:
//!
//! - **No text logic here**: tokenization and matching live in the core crate
//! - **Cross-crate compatibility**: the engine, the CLI and any caller share
//!   the same report shapes
//! - **Serializable output**: every report type derives serde traits so the
//!   surrounding tool can render or persist it

#![warn(missing_docs)]

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Index of a transcript within one metrics batch.
///
/// Only meaningful for the duration of a single computation; use
/// [`Transcript::label`] to correlate results with a persisted record.
pub type TranscriptIndex = u32;

/// One transcript as seen by the engine.
///
/// `word_count` is the stored length of the transcript's token sequence. The
/// engine uses it for the batch summary and recomputes the token sequence
/// itself for positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    /// Caller-supplied stable identifier (title, database id, file stem).
    pub label: String,
    /// Raw transcript text.
    pub text: String,
    /// Precomputed word count.
    pub word_count: u32,
}

impl Transcript {
    /// Creates a transcript with a previously stored word count.
    pub fn new(label: impl Into<String>, text: impl Into<String>, word_count: u32) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
            word_count,
        }
    }
}

/// A single keyword match inside one transcript.
///
/// Ordered by transcript, then by token position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MatchOccurrence {
    /// Transcript the match was found in.
    pub transcript: TranscriptIndex,
    /// 0-based token index of the first token of the match.
    pub start: u32,
}

impl MatchOccurrence {
    /// Creates a new occurrence.
    #[inline(always)]
    pub const fn new(transcript: TranscriptIndex, start: u32) -> Self {
        Self { transcript, start }
    }

    /// Position of the match as a percentage of `token_count`.
    ///
    /// Returns `None` for an empty transcript.
    #[inline]
    pub fn relative_position(self, token_count: u32) -> Option<f64> {
        if token_count == 0 {
            return None;
        }
        Some(f64::from(self.start) / f64::from(token_count) * 100.0)
    }
}

impl fmt::Display for MatchOccurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transcript={} token={}", self.transcript, self.start)
    }
}

/// Aggregated statistics for one keyword across a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordMetric {
    /// The keyword as supplied, trimmed.
    pub keyword: String,
    /// Mentions across all transcripts.
    pub total_mentions: u64,
    /// `total_mentions / transcript_count`, 0 for an empty batch.
    pub average_mentions: f64,
    /// Mean relative position (0-100) over every individual match.
    ///
    /// `None` when no match landed in a non-empty transcript.
    pub average_relative_position: Option<f64>,
    /// Share of transcripts with at least one mention, in percent.
    pub pct_with_mention: f64,
    /// Number of transcripts with at least one mention.
    pub transcripts_with_mention: u32,
}

impl KeywordMetric {
    /// A metric with every aggregate at zero.
    pub fn empty(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            total_mentions: 0,
            average_mentions: 0.0,
            average_relative_position: None,
            pct_with_mention: 0.0,
            transcripts_with_mention: 0,
        }
    }
}

impl fmt::Display for KeywordMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}: {} mentions ({:.2}/transcript, {:.1}% coverage",
            self.keyword, self.total_mentions, self.average_mentions, self.pct_with_mention
        )?;
        match self.average_relative_position {
            Some(pos) => write!(f, ", avg position {pos:.1}%)"),
            None => write!(f, ")"),
        }
    }
}

/// Keyword-independent statistics over the whole batch.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Number of transcripts in the batch.
    pub transcript_count: u32,
    /// Sum of the stored word counts.
    pub total_word_count: u64,
    /// Mean stored word count, 0 for an empty batch.
    pub average_word_count: f64,
    /// `average_word_count / words_per_minute`.
    pub average_minutes: f64,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} transcripts, {:.0} words avg, {:.2} min avg",
            self.transcript_count, self.average_word_count, self.average_minutes
        )
    }
}

/// Per-transcript view of a computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSummary {
    /// Label copied from the input transcript.
    pub label: String,
    /// Stored word count.
    pub word_count: u32,
    /// Number of tokens the engine scanned.
    pub token_count: u32,
    /// `word_count / words_per_minute`.
    pub estimated_minutes: f64,
    /// Mentions per keyword, aligned with [`Report::keywords`].
    pub mentions: Vec<u32>,
}

/// Complete output of one metrics computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// One metric per input keyword, in input order.
    pub keywords: Vec<KeywordMetric>,
    /// Batch-level statistics.
    pub summary: BatchSummary,
    /// One entry per input transcript, in input order.
    pub transcripts: Vec<TranscriptSummary>,
    /// Speaking rate the minute estimates were computed with.
    pub words_per_minute: f64,
}

impl Report {
    /// Keyword metrics ordered by mentions (descending), then keyword.
    ///
    /// The stored order in [`Report::keywords`] is left untouched.
    pub fn ranked(&self) -> Vec<&KeywordMetric> {
        self.ranked_order()
            .into_iter()
            .map(|i| &self.keywords[i])
            .collect()
    }

    /// Indices into [`Report::keywords`] in [`ranked`](Self::ranked) order.
    ///
    /// Ties on both mentions and keyword keep input order.
    pub fn ranked_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.keywords.len()).collect();
        order.sort_by(|&a, &b| {
            let (a, b) = (&self.keywords[a], &self.keywords[b]);
            b.total_mentions
                .cmp(&a.total_mentions)
                .then_with(|| a.keyword.cmp(&b.keyword))
        });
        order
    }

    /// A copy with keywords, and every transcript's mention counts, permuted
    /// into [`ranked`](Self::ranked) order.
    pub fn into_ranked(mut self) -> Self {
        let order = self.ranked_order();
        self.keywords = order.iter().map(|&i| self.keywords[i].clone()).collect();
        for t in &mut self.transcripts {
            t.mentions = order.iter().map(|&i| t.mentions[i]).collect();
        }
        self
    }

    /// Looks up the first metric for `keyword` (exact, trimmed spelling).
    pub fn keyword(&self, keyword: &str) -> Option<&KeywordMetric> {
        let keyword = keyword.trim();
        self.keywords.iter().find(|m| m.keyword == keyword)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary)?;
        for metric in &self.keywords {
            write!(f, "\n  {metric}")?;
        }
        Ok(())
    }
}

/// Errors returned by the metrics engine before any computation happens.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MetricsError {
    /// Words-per-minute must be a positive, finite number.
    #[error("invalid configuration: words per minute must be positive and finite, got {words_per_minute}")]
    InvalidConfiguration {
        /// The rejected value.
        words_per_minute: f64,
    },
    /// A keyword was empty or whitespace-only.
    #[error("keyword at position {index} is empty")]
    EmptyKeyword {
        /// Position of the keyword in the input list.
        index: usize,
    },
}

/// Metrics configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Speaking rate used to turn word counts into minutes.
    /// Default: 150.
    pub words_per_minute: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            words_per_minute: Self::DEFAULT_WORDS_PER_MINUTE,
        }
    }
}

impl MetricsConfig {
    /// Words per minute used when the caller does not set one.
    pub const DEFAULT_WORDS_PER_MINUTE: f64 = 150.0;

    /// Creates a configuration with the given speaking rate.
    pub const fn with_words_per_minute(words_per_minute: f64) -> Self {
        Self { words_per_minute }
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::InvalidConfiguration` if the rate is not a
    /// positive finite number.
    pub fn validate(&self) -> Result<(), MetricsError> {
        if self.words_per_minute.is_finite() && self.words_per_minute > 0.0 {
            Ok(())
        } else {
            Err(MetricsError::InvalidConfiguration {
                words_per_minute: self.words_per_minute,
            })
        }
    }
}

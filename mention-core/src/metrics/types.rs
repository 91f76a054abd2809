//! Engine type and configuration accessors.

use mention_types::{MetricsConfig, Transcript};

use crate::analyzer::Tokenizer;

/// Deterministic keyword metrics over a batch of transcripts.
///
/// The engine holds configuration only. Every call to
/// [`compute`](MetricsEngine::compute) builds its state from scratch and drops
/// it before returning, so identical inputs always produce identical reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsEngine {
    pub(crate) tokenizer: Tokenizer,
    pub(crate) config: MetricsConfig,
}

impl MetricsEngine {
    /// Creates an engine with the default configuration (150 words per minute).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with custom configuration.
    ///
    /// The configuration is checked when metrics are computed.
    pub fn with_config(config: MetricsConfig) -> Self {
        Self {
            config,
            ..Self::new()
        }
    }

    /// Returns the engine's configuration.
    #[inline(always)]
    #[must_use]
    pub fn config(&self) -> MetricsConfig {
        self.config
    }

    /// Returns the tokenizer every count and match goes through.
    #[inline(always)]
    #[must_use]
    pub fn tokenizer(&self) -> Tokenizer {
        self.tokenizer
    }

    /// Word count of `text`, as stored on a [`Transcript`].
    ///
    /// Saturates at `u32::MAX`.
    #[must_use]
    pub fn word_count(&self, text: &str) -> u32 {
        u32::try_from(self.tokenizer.word_count(text)).unwrap_or(u32::MAX)
    }

    /// Builds a transcript whose word count comes from this engine's tokenizer.
    pub fn transcript(&self, label: impl Into<String>, text: impl Into<String>) -> Transcript {
        let text = text.into();
        let word_count = self.word_count(&text);
        Transcript::new(label, text, word_count)
    }

    /// Estimated speaking time of `word_count` words, in minutes.
    #[inline]
    #[must_use]
    pub fn estimated_minutes(&self, word_count: u32) -> f64 {
        f64::from(word_count) / self.config.words_per_minute
    }
}

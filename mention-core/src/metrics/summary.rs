//! Batch and per-transcript summaries.

use mention_types::{BatchSummary, Transcript, TranscriptSummary};

use crate::analyzer::TokenSequence;
use crate::metrics::types::MetricsEngine;

impl MetricsEngine {
    /// Keyword-independent statistics over `transcripts`.
    ///
    /// Uses the stored word counts. An empty batch yields all zeros.
    pub fn batch_summary(&self, transcripts: &[Transcript]) -> BatchSummary {
        if transcripts.is_empty() {
            return BatchSummary::default();
        }

        let total_word_count: u64 = transcripts.iter().map(|t| u64::from(t.word_count)).sum();
        let average_word_count = total_word_count as f64 / transcripts.len() as f64;

        BatchSummary {
            transcript_count: u32::try_from(transcripts.len()).unwrap_or(u32::MAX),
            total_word_count,
            average_word_count,
            average_minutes: average_word_count / self.config.words_per_minute,
        }
    }

    pub(crate) fn transcript_summary(
        &self,
        transcript: &Transcript,
        tokens: &TokenSequence,
        mentions: Vec<u32>,
    ) -> TranscriptSummary {
        TranscriptSummary {
            label: transcript.label.clone(),
            word_count: transcript.word_count,
            token_count: tokens.count(),
            estimated_minutes: self.estimated_minutes(transcript.word_count),
            mentions,
        }
    }
}

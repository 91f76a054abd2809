//! Public API for computing reports.

use std::borrow::Cow;
use std::time::Instant;

use mention_types::{
    MatchOccurrence, MetricsConfig, MetricsError, Report, Transcript, TranscriptIndex,
};
use tracing::{debug, warn};

use crate::analyzer::{for_each_match, Phrase, TokenSequence};
use crate::cache::TokenCache;
use crate::metrics::accumulate::KeywordAccumulator;
use crate::metrics::types::MetricsEngine;

impl MetricsEngine {
    /// Computes keyword metrics for a batch.
    ///
    /// Keywords are reported in input order; duplicates are computed
    /// separately. An empty batch or an empty keyword list is not an error.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::InvalidConfiguration` if the configured words per
    /// minute is not positive and finite.
    /// Returns `MetricsError::EmptyKeyword` if any keyword is blank.
    pub fn compute<K>(&self, transcripts: &[Transcript], keywords: &[K]) -> Result<Report, MetricsError>
    where
        K: AsRef<str>,
    {
        self.validate(keywords)?;

        let tokens: Vec<Cow<'_, TokenSequence>> = transcripts
            .iter()
            .map(|t| Cow::Owned(self.tokenizer.tokenize(&t.text)))
            .collect();

        Ok(self.build_report(transcripts, &tokens, keywords))
    }

    /// Computes keyword metrics with an explicit speaking rate.
    ///
    /// # Errors
    ///
    /// Same as [`compute`](Self::compute).
    pub fn compute_with<K>(
        &self,
        transcripts: &[Transcript],
        keywords: &[K],
        words_per_minute: f64,
    ) -> Result<Report, MetricsError>
    where
        K: AsRef<str>,
    {
        Self {
            config: MetricsConfig::with_words_per_minute(words_per_minute),
            ..*self
        }
        .compute(transcripts, keywords)
    }

    /// Computes keyword metrics, reusing token sequences held in `cache`.
    ///
    /// Entries are keyed by transcript label and re-tokenized whenever the
    /// text changed. The report is identical to [`compute`](Self::compute).
    ///
    /// # Errors
    ///
    /// Same as [`compute`](Self::compute). The cache is untouched on error.
    pub fn compute_cached<K>(
        &self,
        cache: &mut TokenCache,
        transcripts: &[Transcript],
        keywords: &[K],
    ) -> Result<Report, MetricsError>
    where
        K: AsRef<str>,
    {
        self.validate(keywords)?;

        for t in transcripts {
            cache.get_or_tokenize(&self.tokenizer, &t.label, &t.text);
        }

        // Two transcripts sharing a label but not a text leave only the later
        // one cached; the earlier is tokenized again here.
        let cache = &*cache;
        let tokens: Vec<Cow<'_, TokenSequence>> = transcripts
            .iter()
            .map(|t| match cache.lookup(&t.label, &t.text) {
                Some(seq) => Cow::Borrowed(seq),
                None => Cow::Owned(self.tokenizer.tokenize(&t.text)),
            })
            .collect();

        Ok(self.build_report(transcripts, &tokens, keywords))
    }

    /// Every match of `keyword` across `transcripts`, ordered by transcript
    /// then position.
    ///
    /// # Errors
    ///
    /// Returns `MetricsError::EmptyKeyword` if `keyword` is blank.
    pub fn occurrences(
        &self,
        transcripts: &[Transcript],
        keyword: &str,
    ) -> Result<Vec<MatchOccurrence>, MetricsError> {
        if keyword.trim().is_empty() {
            return Err(MetricsError::EmptyKeyword { index: 0 });
        }

        let phrase = Phrase::from_tokens(&self.tokenizer.tokenize(keyword));
        let mut out = Vec::new();
        for (i, t) in transcripts.iter().enumerate() {
            let tokens = self.tokenizer.tokenize(&t.text);
            let transcript = transcript_index(i);
            for_each_match(&tokens, &phrase, |start| {
                out.push(MatchOccurrence::new(transcript, start));
            });
        }
        Ok(out)
    }

    fn validate<K: AsRef<str>>(&self, keywords: &[K]) -> Result<(), MetricsError> {
        self.config.validate()?;
        if let Some(index) = keywords.iter().position(|k| k.as_ref().trim().is_empty()) {
            return Err(MetricsError::EmptyKeyword { index });
        }
        Ok(())
    }

    fn build_report<K: AsRef<str>>(
        &self,
        transcripts: &[Transcript],
        tokens: &[Cow<'_, TokenSequence>],
        keywords: &[K],
    ) -> Report {
        let start = Instant::now();
        debug!(
            transcripts = transcripts.len(),
            keywords = keywords.len(),
            words_per_minute = self.config.words_per_minute,
            "computing keyword metrics"
        );

        for (t, seq) in transcripts.iter().zip(tokens) {
            if t.word_count != seq.count() {
                warn!(
                    label = %t.label,
                    stored = t.word_count,
                    computed = seq.count(),
                    "stored word count differs from tokenized length"
                );
            }
        }

        let mut mentions: Vec<Vec<u32>> = vec![Vec::with_capacity(keywords.len()); transcripts.len()];
        let mut metrics = Vec::with_capacity(keywords.len());

        for keyword in keywords {
            let keyword = keyword.as_ref().trim();
            let phrase = Phrase::from_tokens(&self.tokenizer.tokenize(keyword));
            if phrase.is_empty() {
                warn!(keyword, "keyword contains no words and cannot match");
            }

            let mut acc = KeywordAccumulator::new();
            for (i, seq) in tokens.iter().enumerate() {
                let count = acc.scan(transcript_index(i), seq, &phrase);
                mentions[i].push(count);
            }
            metrics.push(acc.finish(keyword, transcripts.len()));
        }

        let summaries = transcripts
            .iter()
            .zip(tokens)
            .zip(mentions)
            .map(|((t, seq), counts)| self.transcript_summary(t, seq, counts))
            .collect();

        let report = Report {
            keywords: metrics,
            summary: self.batch_summary(transcripts),
            transcripts: summaries,
            words_per_minute: self.config.words_per_minute,
        };

        debug!(elapsed = ?start.elapsed(), "keyword metrics computed");
        report
    }
}

#[inline(always)]
fn transcript_index(i: usize) -> TranscriptIndex {
    TranscriptIndex::try_from(i).unwrap_or(TranscriptIndex::MAX)
}

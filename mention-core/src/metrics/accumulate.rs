//! Per-keyword accumulation.

use mention_types::{KeywordMetric, MatchOccurrence, TranscriptIndex};

use crate::analyzer::{for_each_match, Phrase, TokenSequence};

/// Running totals for one keyword across a batch.
///
/// Relative positions are summed per individual match, so the final average
/// is the mean over all matches, not a mean of per-transcript means.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct KeywordAccumulator {
    total_mentions: u64,
    transcripts_with_mention: u32,
    position_sum: f64,
    position_count: u64,
}

impl KeywordAccumulator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Scans one transcript and returns its mention count.
    ///
    /// Matches in an empty transcript cannot occur; if the token count is
    /// zero the transcript still counts toward the batch size but never
    /// toward positions.
    pub(crate) fn scan(
        &mut self,
        transcript: TranscriptIndex,
        tokens: &TokenSequence,
        phrase: &Phrase,
    ) -> u32 {
        let token_count = tokens.count();
        let mut mentions = 0u32;

        for_each_match(tokens, phrase, |start| {
            let occurrence = MatchOccurrence::new(transcript, start);
            mentions = mentions.saturating_add(1);
            if let Some(position) = occurrence.relative_position(token_count) {
                self.position_sum += position;
                self.position_count += 1;
            }
        });

        self.total_mentions += u64::from(mentions);
        if mentions > 0 {
            self.transcripts_with_mention += 1;
        }
        mentions
    }

    /// Turns the totals into a metric for a batch of `transcript_count`.
    pub(crate) fn finish(self, keyword: &str, transcript_count: usize) -> KeywordMetric {
        if transcript_count == 0 {
            return KeywordMetric::empty(keyword);
        }

        let n = transcript_count as f64;
        let average_relative_position =
            (self.position_count > 0).then(|| self.position_sum / self.position_count as f64);

        KeywordMetric {
            keyword: keyword.to_owned(),
            total_mentions: self.total_mentions,
            average_mentions: self.total_mentions as f64 / n,
            average_relative_position,
            pct_with_mention: f64::from(self.transcripts_with_mention) / n * 100.0,
            transcripts_with_mention: self.transcripts_with_mention,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::tokenize;

    #[test]
    fn counts_and_coverage() {
        let phrase = Phrase::parse("cpi");
        let mut acc = KeywordAccumulator::new();

        assert_eq!(acc.scan(0, &tokenize("cpi cpi data"), &phrase), 2);
        assert_eq!(acc.scan(1, &tokenize("no mention here"), &phrase), 0);

        let metric = acc.finish("cpi", 2);
        assert_eq!(metric.total_mentions, 2);
        assert_eq!(metric.average_mentions, 1.0);
        assert_eq!(metric.transcripts_with_mention, 1);
        assert_eq!(metric.pct_with_mention, 50.0);
    }

    #[test]
    fn position_is_mean_of_all_matches() {
        // Transcript 0: matches at 0 and 1 of 4 tokens -> 0%, 25%
        // Transcript 1: match at 1 of 2 tokens -> 50%
        // Mean over matches: 25%. Mean of means would be 31.25%.
        let phrase = Phrase::parse("x");
        let mut acc = KeywordAccumulator::new();
        acc.scan(0, &tokenize("x x y z"), &phrase);
        acc.scan(1, &tokenize("y x"), &phrase);

        let metric = acc.finish("x", 2);
        assert_eq!(metric.average_relative_position, Some(25.0));
    }

    #[test]
    fn no_matches_leaves_position_undefined() {
        let phrase = Phrase::parse("cpi");
        let mut acc = KeywordAccumulator::new();
        acc.scan(0, &tokenize("nothing relevant"), &phrase);
        acc.scan(1, &tokenize(""), &phrase);

        let metric = acc.finish("cpi", 2);
        assert_eq!(metric.total_mentions, 0);
        assert_eq!(metric.average_relative_position, None);
        assert_eq!(metric.pct_with_mention, 0.0);
    }

    #[test]
    fn empty_batch_is_all_zero() {
        let metric = KeywordAccumulator::new().finish("anything", 0);
        assert_eq!(metric, KeywordMetric::empty("anything"));
    }
}

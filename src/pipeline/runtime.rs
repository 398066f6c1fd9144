use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::alignment::phoneme::PhonemeAligner;
use crate::alignment::tokenization::TokenLevel;
use crate::alignment::word::align_word_tokens;
use crate::alignment::zip_alignments;
use crate::error::AlignmentError;
use crate::pipeline::traits::{LexicalFeatureSource, PhonemeConverter, Tokenizer};
use crate::types::{
    AlignmentRecord, BatchOutcome, HypothesisTranscript, RecordFailure, SourceWordFeatures,
    WordAlignmentEntry, WordFeatureRow,
};

/// Turns alignment records into per-word feature rows.
///
/// Every record is aligned once at phoneme level and once per hypothesis
/// source at word level; rows are zipped by reference word position.
pub struct FeatureAggregator {
    phoneme_aligner: PhonemeAligner,
    tokenizer: Box<dyn Tokenizer>,
    phoneme_converter: Box<dyn PhonemeConverter>,
    feature_source: Box<dyn LexicalFeatureSource>,
}

pub(crate) struct FeatureAggregatorParts {
    pub phoneme_aligner: PhonemeAligner,
    pub tokenizer: Box<dyn Tokenizer>,
    pub phoneme_converter: Box<dyn PhonemeConverter>,
    pub feature_source: Box<dyn LexicalFeatureSource>,
}

impl FeatureAggregator {
    pub(crate) fn from_parts(parts: FeatureAggregatorParts) -> Self {
        Self {
            phoneme_aligner: parts.phoneme_aligner,
            tokenizer: parts.tokenizer,
            phoneme_converter: parts.phoneme_converter,
            feature_source: parts.feature_source,
        }
    }

    pub fn process_record(
        &self,
        record: &AlignmentRecord,
    ) -> Result<Vec<WordFeatureRow>, AlignmentError> {
        let reference_words = self
            .tokenizer
            .tokenize(&record.reference_text, TokenLevel::Word);
        if reference_words.is_empty() {
            return Ok(Vec::new());
        }

        let reference_phonemes = self
            .phoneme_converter
            .text_to_phonemes(&record.reference_text);
        let delimiter = self.phoneme_aligner.delimiter();
        let ref_chars = self.normalize_phonemes(reference_phonemes.split(' '));
        let hyp_chars = self.normalize_phonemes(record.hypothesis_phonemes.split(delimiter));
        let segments = self.phoneme_aligner.align(&ref_chars, &hyp_chars);
        if segments.len() != reference_words.len() {
            return Err(AlignmentError::data_consistency(
                reference_words.len(),
                segments.len(),
            ));
        }

        let mut rows: Vec<WordFeatureRow> = reference_words
            .iter()
            .zip(&segments)
            .enumerate()
            .map(|(word_index, (word, segment))| WordFeatureRow {
                record_id: record.record_id.clone(),
                word_index,
                expected_text: word.clone(),
                sources: BTreeMap::new(),
                phoneme: segment.clone(),
                lexical: self.feature_source.features(word),
            })
            .collect();

        for hypothesis in &record.hypotheses {
            let hypothesis_words = self.tokenizer.tokenize(&hypothesis.text, TokenLevel::Word);
            let entries = align_word_tokens(&reference_words, &hypothesis_words);
            let pairs = zip_alignments(&entries, &segments)?;
            for (row, (entry, _)) in rows.iter_mut().zip(pairs) {
                row.sources.insert(
                    hypothesis.source.clone(),
                    source_features(entry, hypothesis),
                );
            }
        }

        tracing::debug!(
            record_id = record.record_id.as_str(),
            words = rows.len(),
            sources = record.hypotheses.len(),
            "aggregate: record processed"
        );
        Ok(rows)
    }

    /// Process records in parallel. Rows keep record order; a failing record
    /// contributes no rows and one [`RecordFailure`].
    pub fn process_batch(&self, records: &[AlignmentRecord]) -> BatchOutcome {
        let results: Vec<Result<Vec<WordFeatureRow>, RecordFailure>> = records
            .par_iter()
            .map(|record| {
                self.process_record(record).map_err(|err| {
                    tracing::warn!(
                        record_id = record.record_id.as_str(),
                        error = %err,
                        "aggregate: record failed"
                    );
                    RecordFailure {
                        record_id: record.record_id.clone(),
                        reason: err.to_string(),
                    }
                })
            })
            .collect();

        let mut outcome = BatchOutcome {
            record_count: records.len(),
            ..BatchOutcome::default()
        };
        for result in results {
            match result {
                Ok(rows) => outcome.rows.extend(rows),
                Err(failure) => outcome.failures.push(failure),
            }
        }
        tracing::info!(
            records = records.len(),
            rows = outcome.rows.len(),
            failures = outcome.failures.len(),
            "aggregate: batch processed"
        );
        outcome
    }

    /// Character-normalize each word's phonemes and rejoin them with the
    /// configured delimiter, which the tokenizer never sees.
    fn normalize_phonemes<'a>(&self, words: impl Iterator<Item = &'a str>) -> String {
        let delimiter = self.phoneme_aligner.delimiter().to_string();
        words
            .map(|word| self.tokenizer.tokenize(word, TokenLevel::Character).concat())
            .collect::<Vec<_>>()
            .join(delimiter.as_str())
    }
}

fn source_features(
    entry: &WordAlignmentEntry,
    hypothesis: &HypothesisTranscript,
) -> SourceWordFeatures {
    let metrics = entry
        .hypo_index
        .and_then(|idx| hypothesis.word_metrics.get(idx));
    SourceWordFeatures {
        status: entry.status,
        hypo_index: entry.hypo_index,
        hypothesis_word: entry.hypothesis_word.clone(),
        confidence: metrics.and_then(|m| m.confidence),
        duration_ms: metrics.and_then(|m| m.duration_ms),
    }
}

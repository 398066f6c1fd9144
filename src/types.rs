use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::lexicon::LexicalFeatures;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WordStatus {
    Correct,
    Substituted,
    Deleted,
}

/// One reference word and the hypothesis word it was aligned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordAlignmentEntry {
    /// Position in the tokenized hypothesis; `None` for deletions.
    pub hypo_index: Option<usize>,
    pub reference_word: String,
    pub hypothesis_word: Option<String>,
    pub status: WordStatus,
}

/// Per-character status code of a flattened phoneme alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhonemeStatus {
    Correct,
    Substituted,
    Deleted,
    Inserted,
}

impl PhonemeStatus {
    pub fn as_char(self) -> char {
        match self {
            Self::Correct => 'C',
            Self::Substituted => 'S',
            Self::Deleted => 'D',
            Self::Inserted => 'I',
        }
    }
}

/// Three parallel streams of equal length produced by the character walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignedPhonemes {
    pub reference: Vec<char>,
    pub hypothesis: Vec<char>,
    pub status: Vec<PhonemeStatus>,
}

impl AlignedPhonemes {
    pub fn len(&self) -> usize {
        self.reference.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reference.is_empty()
    }

    pub fn reference_string(&self) -> String {
        self.reference.iter().collect()
    }

    pub fn hypothesis_string(&self) -> String {
        self.hypothesis.iter().collect()
    }

    pub fn status_string(&self) -> String {
        self.status.iter().map(|s| s.as_char()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhonemeSegment {
    pub ref_phoneme: String,
    pub hypo_phoneme: String,
    /// Fraction of `C` status codes in the segment, in [0, 1].
    pub correctness_rate: f32,
}

/// Per-word side data reported by an ASR system alongside its transcript.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordMetrics {
    pub confidence: Option<f32>,
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypothesisTranscript {
    /// Name of the producing system, e.g. `"kaldi"`.
    pub source: String,
    pub text: String,
    /// Indexed by hypothesis word position after tokenization.
    #[serde(default)]
    pub word_metrics: Vec<WordMetrics>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentRecord {
    pub record_id: String,
    pub reference_text: String,
    /// Space-delimited phoneme transcription of the spoken audio.
    pub hypothesis_phonemes: String,
    pub hypotheses: Vec<HypothesisTranscript>,
}

/// How one hypothesis source fared on a single reference word.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceWordFeatures {
    pub status: WordStatus,
    pub hypo_index: Option<usize>,
    pub hypothesis_word: Option<String>,
    pub confidence: Option<f32>,
    pub duration_ms: Option<u64>,
}

impl SourceWordFeatures {
    pub fn is_correct(&self) -> bool {
        self.status == WordStatus::Correct
    }

    pub fn is_substituted(&self) -> bool {
        self.status == WordStatus::Substituted
    }

    pub fn is_deleted(&self) -> bool {
        self.status == WordStatus::Deleted
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordFeatureRow {
    pub record_id: String,
    pub word_index: usize,
    pub expected_text: String,
    pub sources: BTreeMap<String, SourceWordFeatures>,
    pub phoneme: PhonemeSegment,
    pub lexical: LexicalFeatures,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFailure {
    pub record_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Records submitted, including failed ones and ones that produced no rows.
    pub record_count: usize,
    pub rows: Vec<WordFeatureRow>,
    pub failures: Vec<RecordFailure>,
}

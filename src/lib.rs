pub mod alignment;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod types;

pub use alignment::edit_trace::{EditOp, OpTag, Opcode};
pub use alignment::phoneme::{align_phonemes, PhonemeAligner};
pub use alignment::tokenization::TokenLevel;
pub use alignment::word::{align_word_tokens, align_words};
pub use alignment::zip_alignments;
pub use config::{AlignerConfig, LexiconConfig};
pub use error::AlignmentError;
pub use lexicon::{DictionaryLexicalFeatures, LexicalFeatures, PronunciationLexicon};
pub use pipeline::builder::FeatureAggregatorBuilder;
pub use pipeline::defaults::PunctuationStrippingTokenizer;
pub use pipeline::runtime::FeatureAggregator;
pub use pipeline::traits::{LexicalFeatureSource, PhonemeConverter, Tokenizer};
pub use report::{AlignmentSummary, SourceSummary};
pub use types::{
    AlignedPhonemes, AlignmentRecord, BatchOutcome, HypothesisTranscript, PhonemeSegment,
    PhonemeStatus, RecordFailure, SourceWordFeatures, WordAlignmentEntry, WordFeatureRow,
    WordMetrics, WordStatus,
};

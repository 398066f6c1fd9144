use crate::alignment::tokenization::TokenLevel;
use crate::lexicon::LexicalFeatures;

pub trait Tokenizer: Send + Sync {
    /// Normalize `text` and split it at the requested granularity.
    fn tokenize(&self, text: &str, level: TokenLevel) -> Vec<String>;
}

pub trait PhonemeConverter: Send + Sync {
    /// Space-delimited per-word phoneme encoding of `text`, with a sentinel
    /// in place of every out-of-vocabulary word.
    fn text_to_phonemes(&self, text: &str) -> String;
}

pub trait LexicalFeatureSource: Send + Sync {
    fn features(&self, word: &str) -> LexicalFeatures;
}

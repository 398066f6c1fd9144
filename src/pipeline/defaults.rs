use std::sync::Arc;

use crate::alignment::tokenization::{tokenize_normalized, TokenLevel};
use crate::lexicon::{DictionaryLexicalFeatures, LexicalFeatures, PronunciationLexicon};
use crate::pipeline::traits::{LexicalFeatureSource, PhonemeConverter, Tokenizer};

/// Strips ASCII punctuation, lowercases, then splits on whitespace or per
/// character.
pub struct PunctuationStrippingTokenizer;

impl Tokenizer for PunctuationStrippingTokenizer {
    fn tokenize(&self, text: &str, level: TokenLevel) -> Vec<String> {
        tokenize_normalized(text, level)
    }
}

impl PhonemeConverter for PronunciationLexicon {
    fn text_to_phonemes(&self, text: &str) -> String {
        PronunciationLexicon::text_to_phonemes(self, text)
    }
}

impl<T: PhonemeConverter + ?Sized> PhonemeConverter for Arc<T> {
    fn text_to_phonemes(&self, text: &str) -> String {
        (**self).text_to_phonemes(text)
    }
}

impl LexicalFeatureSource for DictionaryLexicalFeatures {
    fn features(&self, word: &str) -> LexicalFeatures {
        self.compute(word)
    }
}

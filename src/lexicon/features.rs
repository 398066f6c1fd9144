use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::pronunciation::PronunciationLexicon;

const SILENT_LETTER_PREFIXES: [&str; 5] = ["kn", "w", "b", "pn", "ps"];
const MULTIGRAPHS: [&str; 5] = ["sh", "ch", "th", "ph", "gh"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LexicalFeatures {
    pub word_length: usize,
    pub syllable_count: Option<u32>,
    /// Part-of-speech tag when the feature source provides a tagger.
    pub pos_tag: Option<String>,
    pub ortho_complexity: u32,
}

/// Count spelling patterns that make a word harder to pronounce: silent
/// leading letters plus every multigraph occurrence.
pub fn orthographic_complexity(word: &str) -> u32 {
    let lower = word.to_lowercase();
    let silent = SILENT_LETTER_PREFIXES
        .iter()
        .filter(|prefix| lower.starts_with(*prefix))
        .count();
    let multigraphs: usize = MULTIGRAPHS
        .iter()
        .map(|mg| lower.matches(mg).count())
        .sum();
    (silent + multigraphs) as u32
}

/// Features derivable from spelling and the pronunciation dictionary alone.
#[derive(Debug, Clone, Default)]
pub struct DictionaryLexicalFeatures {
    lexicon: Option<Arc<PronunciationLexicon>>,
}

impl DictionaryLexicalFeatures {
    pub fn new(lexicon: Arc<PronunciationLexicon>) -> Self {
        Self {
            lexicon: Some(lexicon),
        }
    }

    /// Without a lexicon, syllable counts are reported as unknown.
    pub fn spelling_only() -> Self {
        Self { lexicon: None }
    }

    pub fn compute(&self, word: &str) -> LexicalFeatures {
        LexicalFeatures {
            word_length: word.chars().count(),
            syllable_count: self
                .lexicon
                .as_ref()
                .and_then(|lex| lex.syllable_count(word)),
            pos_tag: None,
            ortho_complexity: orthographic_complexity(word),
        }
    }
}

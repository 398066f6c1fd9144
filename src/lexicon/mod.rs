mod features;
mod pronunciation;

pub use features::{orthographic_complexity, DictionaryLexicalFeatures, LexicalFeatures};
pub use pronunciation::{parse_dictionary, PronunciationLexicon};

use std::collections::HashMap;
use std::path::Path;

use crate::alignment::tokenization::normalize_text;
use crate::config::{AlignerConfig, LexiconConfig};
use crate::error::AlignmentError;

/// Word → phoneme lookup built from a CMU-style pronunciation dictionary and
/// a phone → symbol map.
///
/// Construct once with [`PronunciationLexicon::load`] (or
/// [`PronunciationLexicon::from_parts`] in memory) and share it; lookups do
/// not mutate.
#[derive(Debug, Clone)]
pub struct PronunciationLexicon {
    /// Uppercase word → dictionary phones (e.g. `["K", "AE1", "T"]`).
    entries: HashMap<String, Vec<String>>,
    /// Dictionary phone → output symbol(s).
    phone_map: HashMap<String, String>,
    unknown_marker: String,
}

impl Default for PronunciationLexicon {
    fn default() -> Self {
        Self::from_parts(HashMap::new(), HashMap::new())
    }
}

impl PronunciationLexicon {
    pub fn load(config: &LexiconConfig) -> Result<Self, AlignmentError> {
        let dictionary = std::fs::read_to_string(&config.dictionary_path)
            .map_err(|e| AlignmentError::io("read pronunciation dictionary", e))?;
        let entries = parse_dictionary(&dictionary)?;
        let phone_map = load_phone_map(&config.phone_map_path)?;
        tracing::info!(
            words = entries.len(),
            phones = phone_map.len(),
            dictionary = %config.dictionary_path.display(),
            "lexicon: loaded pronunciation dictionary"
        );
        Ok(Self::from_parts(entries, phone_map))
    }

    pub fn from_parts(
        entries: HashMap<String, Vec<String>>,
        phone_map: HashMap<String, String>,
    ) -> Self {
        let entries = entries
            .into_iter()
            .map(|(word, phones)| (word.to_uppercase(), phones))
            .collect();
        Self {
            entries,
            phone_map,
            unknown_marker: AlignerConfig::DEFAULT_UNKNOWN_MARKER.to_string(),
        }
    }

    pub fn with_unknown_marker(mut self, marker: impl Into<String>) -> Self {
        self.unknown_marker = marker.into();
        self
    }

    pub fn unknown_marker(&self) -> &str {
        &self.unknown_marker
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn phones(&self, word: &str) -> Option<&[String]> {
        self.entries.get(&word.to_uppercase()).map(Vec::as_slice)
    }

    /// Mapped phoneme string of one word, `None` when out of vocabulary.
    pub fn word_to_phonemes(&self, word: &str) -> Option<String> {
        let phones = self.phones(word)?;
        Some(
            phones
                .iter()
                .filter_map(|phone| self.map_phone(phone))
                .collect(),
        )
    }

    /// Space-delimited phoneme transcription; unknown words become the
    /// unknown marker.
    pub fn text_to_phonemes(&self, text: &str) -> String {
        let cleaned = normalize_text(text);
        let mut unknown = 0usize;
        let words: Vec<String> = cleaned
            .split_whitespace()
            .map(|word| {
                self.word_to_phonemes(word).unwrap_or_else(|| {
                    unknown += 1;
                    self.unknown_marker.clone()
                })
            })
            .collect();
        if unknown > 0 {
            tracing::debug!(
                unknown,
                total = words.len(),
                "lexicon: out-of-vocabulary words replaced with marker"
            );
        }
        words.join(" ")
    }

    /// Number of stressed vowels in the first pronunciation of `word`.
    pub fn syllable_count(&self, word: &str) -> Option<u32> {
        let phones = self.phones(word)?;
        let count = phones
            .iter()
            .filter(|p| p.chars().last().is_some_and(|c| c.is_ascii_digit()))
            .count();
        Some(count as u32)
    }

    fn map_phone(&self, phone: &str) -> Option<&str> {
        if let Some(symbol) = self.phone_map.get(phone) {
            return Some(symbol.as_str());
        }
        let stressless = phone.trim_end_matches(|c: char| c.is_ascii_digit());
        self.phone_map.get(stressless).map(String::as_str)
    }
}

/// Parse `WORD PH1 PH2 ...` lines. Comment lines (`;;;`) and blank lines are
/// skipped; alternate pronunciations (`WORD(2)`) and repeated words keep the
/// first entry.
pub fn parse_dictionary(data: &str) -> Result<HashMap<String, Vec<String>>, AlignmentError> {
    let mut entries = HashMap::new();
    for (idx, line) in data.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(";;;") {
            continue;
        }
        let mut parts = line.split_whitespace();
        let Some(word) = parts.next() else {
            continue;
        };
        let phones: Vec<String> = parts.map(str::to_string).collect();
        if phones.is_empty() {
            return Err(AlignmentError::lexicon(
                idx + 1,
                format!("word '{word}' has no phones"),
            ));
        }
        if word.ends_with(')') && word.contains('(') {
            continue;
        }
        entries.entry(word.to_uppercase()).or_insert(phones);
    }
    Ok(entries)
}

fn load_phone_map(path: &Path) -> Result<HashMap<String, String>, AlignmentError> {
    let data =
        std::fs::read_to_string(path).map_err(|e| AlignmentError::io("read phone map", e))?;
    serde_json::from_str(&data).map_err(|e| AlignmentError::json("parse phone map", e))
}

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::AlignmentError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlignerConfig {
    /// Filler written to the opposite stream for deleted/inserted phonemes.
    pub placeholder: char,
    /// Reference-side character that separates words in a phoneme string.
    pub word_delimiter: char,
    /// Sentinel emitted for words missing from the pronunciation dictionary.
    pub unknown_marker: String,
    pub lexicon: Option<LexiconConfig>,
}

impl AlignerConfig {
    pub const DEFAULT_PLACEHOLDER: char = '*';
    pub const DEFAULT_WORD_DELIMITER: char = ' ';
    pub const DEFAULT_UNKNOWN_MARKER: &'static str = "UNK";

    pub fn load(path: &Path) -> Result<Self, AlignmentError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| AlignmentError::io("read aligner config", e))?;
        let config: Self = serde_json::from_str(&data)
            .map_err(|e| AlignmentError::json("parse aligner config", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AlignmentError> {
        if self.placeholder == self.word_delimiter {
            return Err(AlignmentError::invalid_input(format!(
                "placeholder {:?} must differ from the word delimiter",
                self.placeholder
            )));
        }
        if self.unknown_marker.is_empty() {
            return Err(AlignmentError::invalid_input(
                "unknown-word marker must not be empty",
            ));
        }
        // The marker stands in for one word and must survive character
        // normalization unchanged.
        if !self.unknown_marker.chars().all(char::is_alphanumeric) {
            return Err(AlignmentError::invalid_input(format!(
                "unknown-word marker {:?} must be alphanumeric",
                self.unknown_marker
            )));
        }
        Ok(())
    }
}

impl Default for AlignerConfig {
    fn default() -> Self {
        Self {
            placeholder: Self::DEFAULT_PLACEHOLDER,
            word_delimiter: Self::DEFAULT_WORD_DELIMITER,
            unknown_marker: Self::DEFAULT_UNKNOWN_MARKER.to_string(),
            lexicon: None,
        }
    }
}

/// Locations of the pronunciation resources loaded by
/// [`PronunciationLexicon::load`](crate::lexicon::PronunciationLexicon::load).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LexiconConfig {
    /// CMU-style dictionary, one `WORD PH1 PH2 ...` entry per line.
    pub dictionary_path: PathBuf,
    /// JSON object mapping dictionary phones to output phoneme symbols.
    pub phone_map_path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligner_config_default() {
        let config = AlignerConfig::default();
        assert_eq!(config.placeholder, '*');
        assert_eq!(config.word_delimiter, ' ');
        assert_eq!(config.unknown_marker, "UNK");
        assert!(config.lexicon.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let json = r#"{
            "lexicon": {
                "dictionary_path": "words.dic",
                "phone_map_path": "phones.json"
            }
        }"#;
        let config: AlignerConfig = serde_json::from_str(json).expect("valid config json");
        assert_eq!(config.placeholder, AlignerConfig::DEFAULT_PLACEHOLDER);
        let lexicon = config.lexicon.expect("lexicon section");
        assert_eq!(lexicon.dictionary_path, PathBuf::from("words.dic"));
        assert_eq!(lexicon.phone_map_path, PathBuf::from("phones.json"));
    }

    #[test]
    fn placeholder_equal_to_delimiter_is_rejected() {
        let config = AlignerConfig {
            placeholder: ' ',
            ..AlignerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_marker_must_be_a_single_alphanumeric_token() {
        for marker in ["UN K", "?", "<unk>", "OOV|"] {
            let config = AlignerConfig {
                unknown_marker: marker.to_string(),
                ..AlignerConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(AlignmentError::InvalidInput { .. })),
                "marker {marker:?} should be rejected"
            );
        }
        let config = AlignerConfig {
            unknown_marker: "OOV2".to_string(),
            ..AlignerConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_reads_json_file() {
        let path = std::env::temp_dir().join("transcript_align_config_load.json");
        std::fs::write(&path, r##"{"placeholder": "#", "unknown_marker": "OOV"}"##)
            .expect("write config");
        let config = AlignerConfig::load(&path).expect("config should load");
        assert_eq!(config.placeholder, '#');
        assert_eq!(config.unknown_marker, "OOV");
        assert_eq!(config.word_delimiter, ' ');
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_fails_on_missing_file() {
        let result = AlignerConfig::load(Path::new("/nonexistent/aligner.json"));
        assert!(matches!(result, Err(AlignmentError::Io { .. })));
    }
}

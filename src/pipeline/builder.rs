use std::sync::Arc;

use crate::alignment::phoneme::PhonemeAligner;
use crate::config::AlignerConfig;
use crate::error::AlignmentError;
use crate::lexicon::{DictionaryLexicalFeatures, PronunciationLexicon};
use crate::pipeline::defaults::PunctuationStrippingTokenizer;
use crate::pipeline::runtime::{FeatureAggregator, FeatureAggregatorParts};
use crate::pipeline::traits::{LexicalFeatureSource, PhonemeConverter, Tokenizer};

pub struct FeatureAggregatorBuilder {
    config: AlignerConfig,
    tokenizer: Option<Box<dyn Tokenizer>>,
    phoneme_converter: Option<Box<dyn PhonemeConverter>>,
    feature_source: Option<Box<dyn LexicalFeatureSource>>,
}

impl FeatureAggregatorBuilder {
    pub fn new(config: AlignerConfig) -> Self {
        Self {
            config,
            tokenizer: None,
            phoneme_converter: None,
            feature_source: None,
        }
    }

    pub fn with_tokenizer(mut self, tokenizer: Box<dyn Tokenizer>) -> Self {
        self.tokenizer = Some(tokenizer);
        self
    }

    pub fn with_phoneme_converter(mut self, phoneme_converter: Box<dyn PhonemeConverter>) -> Self {
        self.phoneme_converter = Some(phoneme_converter);
        self
    }

    pub fn with_feature_source(mut self, feature_source: Box<dyn LexicalFeatureSource>) -> Self {
        self.feature_source = Some(feature_source);
        self
    }

    /// Without an injected converter, the pronunciation lexicon named in the
    /// config is loaded and shared with the default feature source.
    pub fn build(self) -> Result<FeatureAggregator, AlignmentError> {
        self.config.validate()?;

        let (phoneme_converter, lexicon) = match self.phoneme_converter {
            Some(converter) => (converter, None),
            None => {
                let lexicon_config = self.config.lexicon.as_ref().ok_or_else(|| {
                    AlignmentError::invalid_input(
                        "no phoneme converter given and no lexicon configured",
                    )
                })?;
                let lexicon = Arc::new(
                    PronunciationLexicon::load(lexicon_config)?
                        .with_unknown_marker(self.config.unknown_marker.clone()),
                );
                (
                    Box::new(lexicon.clone()) as Box<dyn PhonemeConverter>,
                    Some(lexicon),
                )
            }
        };

        let feature_source: Box<dyn LexicalFeatureSource> = match (self.feature_source, lexicon) {
            (Some(source), _) => source,
            (None, Some(lexicon)) => Box::new(DictionaryLexicalFeatures::new(lexicon)),
            (None, None) => Box::new(DictionaryLexicalFeatures::spelling_only()),
        };

        Ok(FeatureAggregator::from_parts(FeatureAggregatorParts {
            phoneme_aligner: PhonemeAligner::from_config(&self.config),
            tokenizer: self
                .tokenizer
                .unwrap_or_else(|| Box::new(PunctuationStrippingTokenizer)),
            phoneme_converter,
            feature_source,
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::alignment::tokenization::TokenLevel;
    use crate::config::LexiconConfig;
    use crate::types::AlignmentRecord;

    struct IdentityConverter;

    impl PhonemeConverter for IdentityConverter {
        fn text_to_phonemes(&self, text: &str) -> String {
            text.to_string()
        }
    }

    struct UppercaseWords;

    impl Tokenizer for UppercaseWords {
        fn tokenize(&self, text: &str, level: TokenLevel) -> Vec<String> {
            match level {
                TokenLevel::Word => text.split_whitespace().map(str::to_uppercase).collect(),
                TokenLevel::Character => text.chars().map(String::from).collect(),
            }
        }
    }

    fn temp_lexicon(name: &str) -> LexiconConfig {
        let dir = std::env::temp_dir();
        let dictionary_path = dir.join(format!("{name}.dic"));
        let phone_map_path = dir.join(format!("{name}.json"));
        std::fs::write(&dictionary_path, "DOG D AO1 G\n").expect("write dictionary");
        std::fs::write(&phone_map_path, r#"{"D": "d", "AO": "o", "G": "g"}"#)
            .expect("write phone map");
        LexiconConfig {
            dictionary_path,
            phone_map_path,
        }
    }

    fn remove_lexicon(config: &LexiconConfig) {
        let _ = std::fs::remove_file(&config.dictionary_path);
        let _ = std::fs::remove_file(&config.phone_map_path);
    }

    #[test]
    fn build_fails_without_converter_or_lexicon() {
        let result = FeatureAggregatorBuilder::new(AlignerConfig::default()).build();
        assert!(matches!(result, Err(AlignmentError::InvalidInput { .. })));
    }

    #[test]
    fn build_fails_on_invalid_config() {
        let config = AlignerConfig {
            placeholder: ' ',
            ..AlignerConfig::default()
        };
        let result = FeatureAggregatorBuilder::new(config)
            .with_phoneme_converter(Box::new(IdentityConverter))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn build_fails_on_missing_lexicon_files() {
        let config = AlignerConfig {
            lexicon: Some(LexiconConfig {
                dictionary_path: PathBuf::from("/nonexistent/words.dic"),
                phone_map_path: PathBuf::from("/nonexistent/phones.json"),
            }),
            ..AlignerConfig::default()
        };
        let result = FeatureAggregatorBuilder::new(config).build();
        assert!(matches!(result, Err(AlignmentError::Io { .. })));
    }

    #[test]
    fn build_loads_lexicon_from_config() {
        let lexicon = temp_lexicon("transcript_align_builder_lexicon");
        let config = AlignerConfig {
            unknown_marker: "OOV".to_string(),
            lexicon: Some(lexicon.clone()),
            ..AlignerConfig::default()
        };
        let aggregator = FeatureAggregatorBuilder::new(config)
            .build()
            .expect("build should succeed");
        let rows = aggregator
            .process_record(&AlignmentRecord {
                record_id: "r".to_string(),
                reference_text: "Dog cat".to_string(),
                hypothesis_phonemes: "dog oov".to_string(),
                hypotheses: Vec::new(),
            })
            .expect("record should align");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].phoneme.ref_phoneme, "dog");
        assert_eq!(rows[0].lexical.syllable_count, Some(1));
        assert_eq!(rows[1].phoneme.ref_phoneme, "oov");
        assert_eq!(rows[1].phoneme.correctness_rate, 1.0);
        remove_lexicon(&lexicon);
    }

    #[test]
    fn injected_tokenizer_is_used() {
        let aggregator = FeatureAggregatorBuilder::new(AlignerConfig::default())
            .with_tokenizer(Box::new(UppercaseWords))
            .with_phoneme_converter(Box::new(IdentityConverter))
            .build()
            .expect("build should succeed");
        let rows = aggregator
            .process_record(&AlignmentRecord {
                record_id: "r".to_string(),
                reference_text: "a b".to_string(),
                hypothesis_phonemes: "a b".to_string(),
                hypotheses: Vec::new(),
            })
            .expect("record should align");
        assert_eq!(rows[0].expected_text, "A");
        assert_eq!(rows[0].lexical.syllable_count, None);
    }

    #[test]
    fn custom_placeholder_flows_into_phoneme_aligner() {
        let config = AlignerConfig {
            placeholder: '_',
            ..AlignerConfig::default()
        };
        let aggregator = FeatureAggregatorBuilder::new(config)
            .with_phoneme_converter(Box::new(IdentityConverter))
            .build()
            .expect("build should succeed");
        let rows = aggregator
            .process_record(&AlignmentRecord {
                record_id: "r".to_string(),
                reference_text: "ab".to_string(),
                hypothesis_phonemes: "b".to_string(),
                hypotheses: Vec::new(),
            })
            .expect("record should align");
        assert_eq!(rows[0].phoneme.hypo_phoneme, "_b");
    }
}

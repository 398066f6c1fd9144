use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlignmentError {
    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parse error while {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed lexicon entry at line {line}: {message}")]
    Lexicon { line: usize, message: String },
    /// Word-level and phoneme-level alignments of the same reference cannot
    /// be zipped by position.
    #[error(
        "data consistency: {words} reference words but {segments} phoneme segments"
    )]
    DataConsistency { words: usize, segments: usize },
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl AlignmentError {
    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    pub(crate) fn json(context: &'static str, source: serde_json::Error) -> Self {
        Self::Json { context, source }
    }

    pub(crate) fn lexicon(line: usize, message: impl Into<String>) -> Self {
        Self::Lexicon {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn data_consistency(words: usize, segments: usize) -> Self {
        Self::DataConsistency { words, segments }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_consistency_message_names_both_counts() {
        let err = AlignmentError::data_consistency(3, 2);
        assert_eq!(
            err.to_string(),
            "data consistency: 3 reference words but 2 phoneme segments"
        );
    }

    #[test]
    fn lexicon_error_reports_line() {
        let err = AlignmentError::lexicon(7, "missing pronunciation");
        assert!(err.to_string().contains("line 7"));
    }
}

use super::edit_trace;
use super::walk::{walk, AlignedStep};
use crate::config::AlignerConfig;
use crate::types::{AlignedPhonemes, PhonemeSegment, PhonemeStatus};

#[cfg(test)]
mod tests;

/// Character-level aligner that reports correctness per reference word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhonemeAligner {
    placeholder: char,
    delimiter: char,
}

impl Default for PhonemeAligner {
    fn default() -> Self {
        Self {
            placeholder: AlignerConfig::DEFAULT_PLACEHOLDER,
            delimiter: AlignerConfig::DEFAULT_WORD_DELIMITER,
        }
    }
}

impl PhonemeAligner {
    pub fn new(placeholder: char, delimiter: char) -> Self {
        Self {
            placeholder,
            delimiter,
        }
    }

    pub fn from_config(config: &AlignerConfig) -> Self {
        Self::new(config.placeholder, config.word_delimiter)
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn align(&self, reference: &str, hypothesis: &str) -> Vec<PhonemeSegment> {
        let aligned = self.flatten(reference, hypothesis);
        segment(&aligned, self.delimiter)
    }

    /// Build the three parallel streams from a character-level trace.
    pub fn flatten(&self, reference: &str, hypothesis: &str) -> AlignedPhonemes {
        let ref_chars: Vec<char> = reference.chars().collect();
        let hyp_chars: Vec<char> = hypothesis.chars().collect();
        let opcodes = edit_trace::compute(&ref_chars, &hyp_chars);

        let mut out = AlignedPhonemes::default();
        for step in walk(&opcodes) {
            let (r, h, status) = match step {
                AlignedStep::Match { src, dest } => {
                    (ref_chars[src], hyp_chars[dest], PhonemeStatus::Correct)
                }
                AlignedStep::Substitute { src, dest } => {
                    (ref_chars[src], hyp_chars[dest], PhonemeStatus::Substituted)
                }
                AlignedStep::Delete { src } => {
                    (ref_chars[src], self.placeholder, PhonemeStatus::Deleted)
                }
                AlignedStep::Insert { dest } => {
                    (self.placeholder, hyp_chars[dest], PhonemeStatus::Inserted)
                }
            };
            out.reference.push(r);
            out.hypothesis.push(h);
            out.status.push(status);
        }
        out
    }
}

/// Align two phoneme strings with the default placeholder and delimiter.
pub fn align_phonemes(reference: &str, hypothesis: &str) -> Vec<PhonemeSegment> {
    PhonemeAligner::default().align(reference, hypothesis)
}

pub fn flatten_phonemes(reference: &str, hypothesis: &str) -> AlignedPhonemes {
    PhonemeAligner::default().flatten(reference, hypothesis)
}

/// Split the flattened streams into one segment per reference word.
///
/// A boundary falls on every reference-side `delimiter` and on the final
/// position. Delimiters are left out of segment content, except that the
/// last segment always runs through the final character, delimiter or not.
pub fn segment(aligned: &AlignedPhonemes, delimiter: char) -> Vec<PhonemeSegment> {
    debug_assert_eq!(aligned.reference.len(), aligned.hypothesis.len());
    debug_assert_eq!(aligned.reference.len(), aligned.status.len());

    let len = aligned.len();
    let mut segments = Vec::new();
    let mut start = 0usize;

    for (i, &r) in aligned.reference.iter().enumerate() {
        let is_last = i + 1 == len;
        if r != delimiter && !is_last {
            continue;
        }
        let end = if is_last { len } else { i };
        segments.push(build_segment(aligned, start, end));
        start = i + 1;
    }
    segments
}

fn build_segment(aligned: &AlignedPhonemes, start: usize, end: usize) -> PhonemeSegment {
    let span = end - start;
    let correctness_rate = if span == 0 {
        tracing::warn!(
            position = start,
            "phoneme segmentation: empty segment between adjacent delimiters"
        );
        1.0
    } else {
        let correct = aligned.status[start..end]
            .iter()
            .filter(|&&s| s == PhonemeStatus::Correct)
            .count();
        correct as f32 / span as f32
    };
    PhonemeSegment {
        ref_phoneme: aligned.reference[start..end].iter().collect(),
        hypo_phoneme: aligned.hypothesis[start..end].iter().collect(),
        correctness_rate,
    }
}

use super::edit_trace;
use super::tokenization::TokenLevel;
use super::walk::{walk, AlignedStep};
use crate::pipeline::traits::Tokenizer;
use crate::types::{WordAlignmentEntry, WordStatus};

/// Normalize both transcripts with `tokenizer` and align them word by word.
pub fn align_words(
    tokenizer: &dyn Tokenizer,
    reference_text: &str,
    hypothesis_text: &str,
) -> Vec<WordAlignmentEntry> {
    let reference = tokenizer.tokenize(reference_text, TokenLevel::Word);
    let hypothesis = tokenizer.tokenize(hypothesis_text, TokenLevel::Word);
    align_word_tokens(&reference, &hypothesis)
}

/// One entry per reference word, in reference order. Hypothesis insertions
/// are consumed but never reported.
pub fn align_word_tokens<S>(reference: &[S], hypothesis: &[S]) -> Vec<WordAlignmentEntry>
where
    S: AsRef<str> + PartialEq,
{
    let opcodes = edit_trace::compute(reference, hypothesis);
    let mut entries = Vec::with_capacity(reference.len());
    let mut inserted = 0usize;

    for step in walk(&opcodes) {
        let entry = match step {
            AlignedStep::Match { src, dest } => WordAlignmentEntry {
                hypo_index: Some(dest),
                reference_word: reference[src].as_ref().to_string(),
                hypothesis_word: Some(hypothesis[dest].as_ref().to_string()),
                status: WordStatus::Correct,
            },
            AlignedStep::Substitute { src, dest } => WordAlignmentEntry {
                hypo_index: Some(dest),
                reference_word: reference[src].as_ref().to_string(),
                hypothesis_word: Some(hypothesis[dest].as_ref().to_string()),
                status: WordStatus::Substituted,
            },
            AlignedStep::Delete { src } => WordAlignmentEntry {
                hypo_index: None,
                reference_word: reference[src].as_ref().to_string(),
                hypothesis_word: None,
                status: WordStatus::Deleted,
            },
            AlignedStep::Insert { .. } => {
                inserted += 1;
                continue;
            }
        };
        entries.push(entry);
    }

    debug_assert_eq!(entries.len(), reference.len());
    tracing::debug!(
        reference_words = reference.len(),
        hypothesis_words = hypothesis.len(),
        inserted,
        "word alignment: done"
    );
    entries
}

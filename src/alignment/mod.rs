pub mod edit_trace;
pub mod phoneme;
pub mod tokenization;
pub mod walk;
pub mod word;

use crate::error::AlignmentError;
use crate::types::{PhonemeSegment, WordAlignmentEntry};

/// Pair word entries with phoneme segments by reference position.
///
/// Both sides must describe the same reference words; a count mismatch
/// (e.g. the two references were normalized differently) is reported
/// rather than silently mis-paired.
pub fn zip_alignments<'a>(
    words: &'a [WordAlignmentEntry],
    segments: &'a [PhonemeSegment],
) -> Result<Vec<(&'a WordAlignmentEntry, &'a PhonemeSegment)>, AlignmentError> {
    if words.len() != segments.len() {
        return Err(AlignmentError::data_consistency(words.len(), segments.len()));
    }
    Ok(words.iter().zip(segments).collect())
}

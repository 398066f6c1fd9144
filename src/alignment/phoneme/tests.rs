use super::{align_phonemes, flatten_phonemes, segment, PhonemeAligner};
use crate::types::{AlignedPhonemes, PhonemeSegment, PhonemeStatus};

fn seg(ref_phoneme: &str, hypo_phoneme: &str, correctness_rate: f32) -> PhonemeSegment {
    PhonemeSegment {
        ref_phoneme: ref_phoneme.to_string(),
        hypo_phoneme: hypo_phoneme.to_string(),
        correctness_rate,
    }
}

#[test]
fn substitution_lowers_only_its_word() {
    let segments = align_phonemes("AB CD", "AB XD");
    assert_eq!(segments, vec![seg("AB", "AB", 1.0), seg("CD", "XD", 0.5)]);
}

#[test]
fn deletion_writes_placeholder_to_hypothesis() {
    let aligned = flatten_phonemes("AB CD", "AB D");
    assert_eq!(aligned.reference_string(), "AB CD");
    assert_eq!(aligned.hypothesis_string(), "AB *D");
    assert_eq!(aligned.status_string(), "CCCDC");

    let segments = align_phonemes("AB CD", "AB D");
    assert_eq!(segments, vec![seg("AB", "AB", 1.0), seg("CD", "*D", 0.5)]);
}

#[test]
fn insertion_writes_placeholder_to_reference() {
    let aligned = flatten_phonemes("AB", "AXB");
    assert_eq!(aligned.reference_string(), "A*B");
    assert_eq!(aligned.hypothesis_string(), "AXB");
    assert_eq!(aligned.status_string(), "CIC");

    let segments = align_phonemes("AB", "AXB");
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].ref_phoneme, "A*B");
    assert!((segments[0].correctness_rate - 2.0 / 3.0).abs() < 1e-6);
}

#[test]
fn leading_insertion_is_skipped_without_losing_hypothesis_position() {
    let aligned = flatten_phonemes("AB", "XAB");
    assert_eq!(aligned.reference_string(), "AB");
    assert_eq!(aligned.hypothesis_string(), "AB");
    assert_eq!(aligned.status_string(), "CC");
}

#[test]
fn empty_reference_yields_no_segments() {
    assert!(align_phonemes("", "").is_empty());
    assert!(align_phonemes("", "ABC").is_empty());
}

#[test]
fn empty_hypothesis_deletes_every_phoneme() {
    let segments = align_phonemes("AB C", "");
    assert_eq!(segments, vec![seg("AB", "**", 0.0), seg("C", "*", 0.0)]);
}

#[test]
fn single_character_reference() {
    assert_eq!(align_phonemes("A", "A"), vec![seg("A", "A", 1.0)]);
}

#[test]
fn trailing_delimiter_stays_in_last_segment() {
    let segments = align_phonemes("AB ", "AB ");
    assert_eq!(segments, vec![seg("AB ", "AB ", 1.0)]);
}

#[test]
fn adjacent_delimiters_produce_guarded_empty_segment() {
    let segments = align_phonemes("A  B", "A  B");
    assert_eq!(
        segments,
        vec![seg("A", "A", 1.0), seg("", "", 1.0), seg("B", "B", 1.0)]
    );
}

#[test]
fn leading_delimiter_produces_guarded_empty_segment() {
    let segments = align_phonemes(" A", " A");
    assert_eq!(segments, vec![seg("", "", 1.0), seg("A", "A", 1.0)]);
}

#[test]
fn trailing_hypothesis_insertions_join_last_segment() {
    let segments = align_phonemes("AB", "ABXY");
    assert_eq!(segments, vec![seg("AB**", "ABXY", 0.5)]);
}

#[test]
fn segment_accepts_custom_delimiter() {
    let aligned = AlignedPhonemes {
        reference: "ab|cd".chars().collect(),
        hypothesis: "ab|ce".chars().collect(),
        status: vec![
            PhonemeStatus::Correct,
            PhonemeStatus::Correct,
            PhonemeStatus::Correct,
            PhonemeStatus::Correct,
            PhonemeStatus::Substituted,
        ],
    };
    assert_eq!(
        segment(&aligned, '|'),
        vec![seg("ab", "ab", 1.0), seg("cd", "ce", 0.5)]
    );
}

#[test]
fn custom_placeholder_is_used_for_gaps() {
    let aligner = PhonemeAligner::new('#', ' ');
    let segments = aligner.align("AB", "B");
    assert_eq!(segments, vec![seg("AB", "#B", 0.5)]);
}

#[test]
fn joined_segments_rebuild_reference_without_insertions() {
    let reference = "KAT SAT ON MAT";
    let segments = align_phonemes(reference, "KAT SET MAT");
    let joined = segments
        .iter()
        .map(|s| s.ref_phoneme.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    assert_eq!(joined, reference);
    assert_eq!(segments.len(), 4);
}

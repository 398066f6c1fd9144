use super::edit_trace::{OpTag, Opcode};

/// A single aligned position yielded by [`walk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignedStep {
    Match { src: usize, dest: usize },
    Substitute { src: usize, dest: usize },
    Delete { src: usize },
    Insert { dest: usize },
}

/// Expand opcodes into per-position steps, threading one hypothesis cursor
/// through every branch.
///
/// The cursor advances once for every equal, replace and insert position and
/// never for a delete. Insert runs seen before the first anchor (the first
/// equal/replace/delete step) still advance the cursor but yield nothing;
/// later insert runs are yielded so callers can decide whether to surface
/// them.
pub fn walk(opcodes: &[Opcode]) -> Vec<AlignedStep> {
    let mut steps = Vec::new();
    let mut cursor = 0usize;
    let mut anchored = false;
    let mut dropped_leading = 0usize;

    for code in opcodes {
        match code.tag {
            OpTag::Equal => {
                for src in code.src_start..code.src_end {
                    debug_assert_eq!(cursor, code.dest_start + (src - code.src_start));
                    steps.push(AlignedStep::Match { src, dest: cursor });
                    cursor += 1;
                }
                anchored |= code.src_len() > 0;
            }
            OpTag::Replace => {
                for (src, _) in (code.src_start..code.src_end).zip(code.dest_start..code.dest_end) {
                    steps.push(AlignedStep::Substitute { src, dest: cursor });
                    cursor += 1;
                }
                anchored |= code.src_len() > 0;
            }
            OpTag::Delete => {
                for src in code.src_start..code.src_end {
                    steps.push(AlignedStep::Delete { src });
                }
                anchored |= code.src_len() > 0;
            }
            OpTag::Insert => {
                if !anchored {
                    dropped_leading += code.dest_len();
                    cursor += code.dest_len();
                    continue;
                }
                for _ in code.dest_start..code.dest_end {
                    steps.push(AlignedStep::Insert { dest: cursor });
                    cursor += 1;
                }
            }
        }
    }

    if dropped_leading > 0 {
        tracing::debug!(
            dropped = dropped_leading,
            "walk: dropped insertions before the first anchor"
        );
    }
    steps
}

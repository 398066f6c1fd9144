//! Minimum edit distance between two token sequences and its compression
//! into opcode runs.
//!
//! Costs are unit for insertion, deletion and substitution. When several
//! alignments share the minimum cost, the backtrace (which runs from the end
//! of both sequences towards the start) takes the diagonal step whenever it
//! lies on an optimal path, then a deletion, then an insertion. Equal and
//! substitution runs therefore win over delete+insert pairs of the same cost.

use serde::{Deserialize, Serialize};

/// One atomic operation. `src`/`dest` are the positions in the reference and
/// hypothesis at which it applies; equal positions are implicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditOp {
    Replace { src: usize, dest: usize },
    Delete { src: usize, dest: usize },
    Insert { src: usize, dest: usize },
}

impl EditOp {
    pub fn tag(self) -> OpTag {
        match self {
            Self::Replace { .. } => OpTag::Replace,
            Self::Delete { .. } => OpTag::Delete,
            Self::Insert { .. } => OpTag::Insert,
        }
    }

    pub fn src(self) -> usize {
        match self {
            Self::Replace { src, .. } | Self::Delete { src, .. } | Self::Insert { src, .. } => src,
        }
    }

    pub fn dest(self) -> usize {
        match self {
            Self::Replace { dest, .. } | Self::Delete { dest, .. } | Self::Insert { dest, .. } => {
                dest
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpTag {
    Equal,
    Replace,
    Delete,
    Insert,
}

/// Maximal run of same-tag operations over half-open ranges
/// `[src_start, src_end)` and `[dest_start, dest_end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opcode {
    pub tag: OpTag,
    pub src_start: usize,
    pub src_end: usize,
    pub dest_start: usize,
    pub dest_end: usize,
}

impl Opcode {
    fn new(tag: OpTag, src_start: usize, src_end: usize, dest_start: usize, dest_end: usize) -> Self {
        Self {
            tag,
            src_start,
            src_end,
            dest_start,
            dest_end,
        }
    }

    pub fn src_len(&self) -> usize {
        self.src_end - self.src_start
    }

    pub fn dest_len(&self) -> usize {
        self.dest_end - self.dest_start
    }
}

/// Full `(n+1) x (m+1)` Levenshtein matrix, row-major.
struct CostMatrix {
    cols: usize,
    cells: Vec<usize>,
}

impl CostMatrix {
    fn build<T: PartialEq>(reference: &[T], hypothesis: &[T]) -> Self {
        let rows = reference.len() + 1;
        let cols = hypothesis.len() + 1;
        let mut cells = vec![0usize; rows * cols];
        for (j, cell) in cells.iter_mut().enumerate().take(cols) {
            *cell = j;
        }
        for i in 1..rows {
            cells[i * cols] = i;
            for j in 1..cols {
                let sub = usize::from(reference[i - 1] != hypothesis[j - 1]);
                let diag = cells[(i - 1) * cols + j - 1] + sub;
                let del = cells[(i - 1) * cols + j] + 1;
                let ins = cells[i * cols + j - 1] + 1;
                cells[i * cols + j] = diag.min(del).min(ins);
            }
        }
        Self { cols, cells }
    }

    #[inline(always)]
    fn at(&self, i: usize, j: usize) -> usize {
        self.cells[i * self.cols + j]
    }
}

/// Edit cost of turning `reference` into `hypothesis`.
pub fn distance<T: PartialEq>(reference: &[T], hypothesis: &[T]) -> usize {
    if reference.is_empty() || hypothesis.is_empty() {
        return reference.len().max(hypothesis.len());
    }
    let mut prev: Vec<usize> = (0..=hypothesis.len()).collect();
    let mut curr = vec![0usize; hypothesis.len() + 1];
    for (i, r) in reference.iter().enumerate() {
        curr[0] = i + 1;
        for (j, h) in hypothesis.iter().enumerate() {
            let sub = usize::from(r != h);
            curr[j + 1] = (prev[j] + sub).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[hypothesis.len()]
}

/// Non-equal operations of a minimum-cost alignment, in ascending order.
pub fn edit_ops<T: PartialEq>(reference: &[T], hypothesis: &[T]) -> Vec<EditOp> {
    let matrix = CostMatrix::build(reference, hypothesis);
    let mut ops = Vec::with_capacity(matrix.at(reference.len(), hypothesis.len()));
    let mut i = reference.len();
    let mut j = hypothesis.len();

    while i > 0 || j > 0 {
        let here = matrix.at(i, j);
        if i > 0 && j > 0 {
            let matched = reference[i - 1] == hypothesis[j - 1];
            let diag = matrix.at(i - 1, j - 1) + usize::from(!matched);
            if diag == here {
                if !matched {
                    ops.push(EditOp::Replace {
                        src: i - 1,
                        dest: j - 1,
                    });
                }
                i -= 1;
                j -= 1;
                continue;
            }
        }
        if i > 0 && matrix.at(i - 1, j) + 1 == here {
            ops.push(EditOp::Delete { src: i - 1, dest: j });
            i -= 1;
            continue;
        }
        debug_assert!(j > 0 && matrix.at(i, j - 1) + 1 == here);
        ops.push(EditOp::Insert { src: i, dest: j - 1 });
        j -= 1;
    }

    ops.reverse();
    ops
}

/// Compress ordered edit operations into opcodes covering `[0, src_len)` and
/// `[0, dest_len)`, filling the gaps between operations with equal runs.
pub fn opcodes_from_edit_ops(ops: &[EditOp], src_len: usize, dest_len: usize) -> Vec<Opcode> {
    let mut opcodes = Vec::new();
    let mut src = 0usize;
    let mut dest = 0usize;
    let mut k = 0usize;

    while k < ops.len() {
        let head = ops[k];
        if src < head.src() || dest < head.dest() {
            debug_assert_eq!(
                head.src() - src,
                head.dest() - dest,
                "equal gap must cover the same length on both sides"
            );
            opcodes.push(Opcode::new(OpTag::Equal, src, head.src(), dest, head.dest()));
            src = head.src();
            dest = head.dest();
        }

        let tag = head.tag();
        let (src_start, dest_start) = (src, dest);
        while k < ops.len() && ops[k].tag() == tag && ops[k].src() == src && ops[k].dest() == dest {
            match tag {
                OpTag::Replace => {
                    src += 1;
                    dest += 1;
                }
                OpTag::Delete => src += 1,
                OpTag::Insert => dest += 1,
                OpTag::Equal => unreachable!("edit operations never carry the equal tag"),
            }
            k += 1;
        }
        opcodes.push(Opcode::new(tag, src_start, src, dest_start, dest));
    }

    if src < src_len || dest < dest_len {
        opcodes.push(Opcode::new(OpTag::Equal, src, src_len, dest, dest_len));
    }
    opcodes
}

/// Opcodes of a minimum-cost alignment of `reference` to `hypothesis`.
pub fn compute<T: PartialEq>(reference: &[T], hypothesis: &[T]) -> Vec<Opcode> {
    let ops = edit_ops(reference, hypothesis);
    let opcodes = opcodes_from_edit_ops(&ops, reference.len(), hypothesis.len());
    tracing::trace!(
        reference_len = reference.len(),
        hypothesis_len = hypothesis.len(),
        edit_count = ops.len(),
        opcode_count = opcodes.len(),
        "edit trace: computed opcodes"
    );
    opcodes
}

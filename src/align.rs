//! Token-level alignment of a source/target pair, used to derive an edit
//! list when a corpus supplies none.

use crate::models::M2Edit;

/// Error type given to derived edits
pub const DERIVED_ERROR_TYPE: &str = "UNK";

/// One step of a token diff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffOp {
    /// `source[i] == target[j]`
    Equal(usize, usize),
    /// `target[j]` is not in the source
    Insert(usize),
    /// `source[i]` is not in the target
    Delete(usize),
}

/// Longest-common-subsequence diff of two token sequences
pub fn diff_tokens(source: &[String], target: &[String]) -> Vec<DiffOp> {
    let n = source.len();
    let m = target.len();

    // lcs[i][j] = LCS length of source[..i] and target[..j]
    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in 1..=n {
        for j in 1..=m {
            lcs[i][j] = if source[i - 1] == target[j - 1] {
                lcs[i - 1][j - 1] + 1
            } else {
                lcs[i - 1][j].max(lcs[i][j - 1])
            };
        }
    }

    let mut ops = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (n, m);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && source[i - 1] == target[j - 1] {
            ops.push(DiffOp::Equal(i - 1, j - 1));
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || lcs[i][j - 1] >= lcs[i - 1][j]) {
            ops.push(DiffOp::Insert(j - 1));
            j -= 1;
        } else {
            ops.push(DiffOp::Delete(i - 1));
            i -= 1;
        }
    }

    ops.reverse();
    ops
}

/// Edits turning `source` into `target`: each maximal run of insertions and
/// deletions between two matched tokens becomes one edit
pub fn derive_edits(source: &[String], target: &[String]) -> Vec<M2Edit> {
    let mut edits = Vec::new();
    // (source start, inserted target tokens)
    let mut pending: Option<(usize, Vec<&str>)> = None;
    let mut cursor = 0;

    fn flush(pending: &mut Option<(usize, Vec<&str>)>, end: usize, edits: &mut Vec<M2Edit>) {
        if let Some((start, tokens)) = pending.take() {
            edits.push(M2Edit::new(start, end, DERIVED_ERROR_TYPE, &tokens.join(" ")));
        }
    }

    for op in diff_tokens(source, target) {
        match op {
            DiffOp::Equal(i, _) => {
                flush(&mut pending, cursor, &mut edits);
                cursor = i + 1;
            }
            DiffOp::Delete(i) => {
                pending.get_or_insert((i, Vec::new()));
                cursor = i + 1;
            }
            DiffOp::Insert(j) => {
                pending.get_or_insert((cursor, Vec::new())).1.push(&target[j]);
            }
        }
    }
    flush(&mut pending, cursor, &mut edits);

    edits
}

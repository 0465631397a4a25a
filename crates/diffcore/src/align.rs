use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Range;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpKind {
    Equal,
    Delete,
    Insert,
    Replace,
}

/// One contiguous relationship between the two sequences. Ranges are
/// half-open, non-overlapping, and in order; concatenated they cover both
/// sequences completely.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Opcode {
    pub kind: OpKind,
    pub left: Range<usize>,
    pub right: Range<usize>,
}

#[derive(Clone, Copy, Debug)]
struct Block {
    left: usize,
    right: usize,
    len: usize,
}

/// Aligns two token sequences by recursive longest-matching-block
/// partitioning.
///
/// The longest run of tokens present in both sequences anchors the result;
/// the stretches before and after it are aligned recursively. Among runs of
/// maximal length, the one starting earliest on the left wins, then earliest
/// on the right, so the output is fully deterministic. Every token is
/// eligible to match, no matter how often it repeats.
pub fn align<T: Eq + Hash>(left: &[T], right: &[T]) -> Vec<Opcode> {
    let mut positions: HashMap<&T, Vec<usize>> = HashMap::new();
    for (j, token) in right.iter().enumerate() {
        positions.entry(token).or_default().push(j);
    }

    let mut blocks = Vec::new();
    partition(left, &positions, 0..left.len(), 0..right.len(), &mut blocks);

    opcodes(&coalesce(blocks), left.len(), right.len())
}

fn partition<T: Eq + Hash>(
    left: &[T],
    positions: &HashMap<&T, Vec<usize>>,
    left_range: Range<usize>,
    right_range: Range<usize>,
    blocks: &mut Vec<Block>,
) {
    let Some(block) = longest_match(left, positions, &left_range, &right_range) else {
        return;
    };
    partition(
        left,
        positions,
        left_range.start..block.left,
        right_range.start..block.right,
        blocks,
    );
    blocks.push(block);
    partition(
        left,
        positions,
        block.left + block.len..left_range.end,
        block.right + block.len..right_range.end,
        blocks,
    );
}

/// Finds the longest run `left[i..i+k) == right[j..j+k)` within the given
/// window, preferring the smallest `i` and then the smallest `j` on ties.
fn longest_match<T: Eq + Hash>(
    left: &[T],
    positions: &HashMap<&T, Vec<usize>>,
    left_range: &Range<usize>,
    right_range: &Range<usize>,
) -> Option<Block> {
    let mut best = Block {
        left: left_range.start,
        right: right_range.start,
        len: 0,
    };

    // runs[j] = length of the common run ending at (i, j); rebuilt per i.
    let mut runs: HashMap<usize, usize> = HashMap::new();
    for i in left_range.clone() {
        let mut next_runs = HashMap::new();
        if let Some(indices) = positions.get(&left[i]) {
            for &j in indices {
                if j < right_range.start {
                    continue;
                }
                if j >= right_range.end {
                    break;
                }
                let len = if j > right_range.start {
                    runs.get(&(j - 1)).copied().unwrap_or(0) + 1
                } else {
                    1
                };
                next_runs.insert(j, len);
                if len > best.len {
                    best = Block {
                        left: i + 1 - len,
                        right: j + 1 - len,
                        len,
                    };
                }
            }
        }
        runs = next_runs;
    }

    (best.len > 0).then_some(best)
}

fn coalesce(blocks: Vec<Block>) -> Vec<Block> {
    let mut merged: Vec<Block> = Vec::new();
    for block in blocks {
        if let Some(last) = merged.last_mut()
            && last.left + last.len == block.left
            && last.right + last.len == block.right
        {
            last.len += block.len;
            continue;
        }
        merged.push(block);
    }
    merged
}

fn opcodes(blocks: &[Block], left_len: usize, right_len: usize) -> Vec<Opcode> {
    let sentinel = Block {
        left: left_len,
        right: right_len,
        len: 0,
    };

    let mut ops = Vec::new();
    let (mut i, mut j) = (0, 0);
    for block in blocks.iter().chain(std::iter::once(&sentinel)) {
        let gap = match (i < block.left, j < block.right) {
            (true, true) => Some(OpKind::Replace),
            (true, false) => Some(OpKind::Delete),
            (false, true) => Some(OpKind::Insert),
            (false, false) => None,
        };
        if let Some(kind) = gap {
            ops.push(Opcode {
                kind,
                left: i..block.left,
                right: j..block.right,
            });
        }
        i = block.left + block.len;
        j = block.right + block.len;
        if block.len > 0 {
            ops.push(Opcode {
                kind: OpKind::Equal,
                left: block.left..i,
                right: block.right..j,
            });
        }
    }
    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    fn align_chars(left: &str, right: &str) -> Vec<Opcode> {
        let left: Vec<char> = left.chars().collect();
        let right: Vec<char> = right.chars().collect();
        align(&left, &right)
    }

    fn op(kind: OpKind, left: Range<usize>, right: Range<usize>) -> Opcode {
        Opcode { kind, left, right }
    }

    #[test]
    fn classic_edit_sequence() {
        let ops = align_chars("qabxcd", "abycdf");
        assert_eq!(
            ops,
            vec![
                op(OpKind::Delete, 0..1, 0..0),
                op(OpKind::Equal, 1..3, 0..2),
                op(OpKind::Replace, 3..4, 2..3),
                op(OpKind::Equal, 4..6, 3..5),
                op(OpKind::Insert, 6..6, 5..6),
            ]
        );
    }

    #[test]
    fn ties_prefer_earliest_left_start() {
        // "ab" matches at left offsets 0 and 2; the earlier one anchors.
        let ops = align_chars("abab", "ab");
        assert_eq!(
            ops,
            vec![
                op(OpKind::Equal, 0..2, 0..2),
                op(OpKind::Delete, 2..4, 2..2),
            ]
        );
    }

    #[test]
    fn ties_prefer_earliest_right_start() {
        let ops = align_chars("ab", "abab");
        assert_eq!(
            ops,
            vec![
                op(OpKind::Equal, 0..2, 0..2),
                op(OpKind::Insert, 2..2, 2..4),
            ]
        );
    }

    #[test]
    fn no_common_tokens_is_one_replace() {
        let ops = align_chars("abc", "xyz");
        assert_eq!(ops, vec![op(OpKind::Replace, 0..3, 0..3)]);
    }

    #[test]
    fn empty_sequences_produce_no_opcodes() {
        assert!(align_chars("", "").is_empty());
    }

    #[test]
    fn one_empty_side_is_a_single_gap() {
        assert_eq!(
            align_chars("abc", ""),
            vec![op(OpKind::Delete, 0..3, 0..0)]
        );
        assert_eq!(
            align_chars("", "abc"),
            vec![op(OpKind::Insert, 0..0, 0..3)]
        );
    }

    #[test]
    fn identical_sequences_collapse_to_one_equal() {
        let ops = align_chars("same", "same");
        assert_eq!(ops, vec![op(OpKind::Equal, 0..4, 0..4)]);
    }

    #[test]
    fn highly_repetitive_input_still_aligns() {
        // No frequency-based exclusion: frequent tokens participate fully.
        let left: Vec<char> = "aaaaaaaaab".chars().collect();
        let right: Vec<char> = "aaaaaaaaac".chars().collect();
        let ops = align(&left, &right);
        assert_eq!(
            ops,
            vec![
                op(OpKind::Equal, 0..9, 0..9),
                op(OpKind::Replace, 9..10, 9..10),
            ]
        );
    }

    #[test]
    fn opcodes_cover_both_sequences_contiguously() {
        let ops = align_chars("the quick brown fox", "the slow brown dog");
        let (mut i, mut j) = (0, 0);
        for op in &ops {
            assert_eq!(op.left.start, i);
            assert_eq!(op.right.start, j);
            match op.kind {
                OpKind::Equal => {
                    assert_eq!(op.left.len(), op.right.len());
                    assert!(!op.left.is_empty());
                }
                OpKind::Delete => {
                    assert!(!op.left.is_empty());
                    assert!(op.right.is_empty());
                }
                OpKind::Insert => {
                    assert!(op.left.is_empty());
                    assert!(!op.right.is_empty());
                }
                OpKind::Replace => {
                    assert!(!op.left.is_empty());
                    assert!(!op.right.is_empty());
                }
            }
            i = op.left.end;
            j = op.right.end;
        }
        assert_eq!(i, "the quick brown fox".len());
        assert_eq!(j, "the slow brown dog".len());
    }

    #[test]
    fn adjacent_blocks_are_coalesced() {
        // Line tokens where the recursion could find the shared run in two
        // pieces; the result must still be one Equal opcode.
        let left = vec!["a", "b", "c", "d"];
        let right = vec!["a", "b", "c", "d"];
        let ops = align(&left, &right);
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].kind, OpKind::Equal);
    }
}

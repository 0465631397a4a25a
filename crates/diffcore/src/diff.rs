use crate::align::{OpKind, align};
use crate::document::Document;
use crate::model::{DiffOptions, DiffRow, DiffRowKind, DiffSegment, DiffSegmentKind, SideLine};
use crate::normalize::comparison_keys;

/// Compares two texts line by line and returns the aligned display rows.
///
/// Lines are matched on their comparison keys (per `options`) but rows carry
/// the raw lines, so an ignored difference still shows the original text on
/// both sides. Line numbers are 1-based and advance only on the side(s)
/// present in a row.
pub fn compute_rows(left_text: &str, right_text: &str, options: DiffOptions) -> Vec<DiffRow> {
    let left_lines = Document::from_str(left_text).lines();
    let right_lines = Document::from_str(right_text).lines();

    let left_keys = comparison_keys(&left_lines, &options);
    let right_keys = comparison_keys(&right_lines, &options);

    let mut rows = Vec::new();
    let mut left_no = 0usize;
    let mut right_no = 0usize;

    for op in align(&left_keys, &right_keys) {
        match op.kind {
            OpKind::Equal => {
                for (i, j) in op.left.clone().zip(op.right.clone()) {
                    left_no += 1;
                    right_no += 1;
                    rows.push(DiffRow {
                        kind: DiffRowKind::Equal,
                        left: Some(SideLine::plain(left_no, left_lines[i].clone())),
                        right: Some(SideLine::plain(right_no, right_lines[j].clone())),
                    });
                }
            }
            OpKind::Delete => {
                for i in op.left.clone() {
                    left_no += 1;
                    rows.push(DiffRow {
                        kind: DiffRowKind::Delete,
                        left: Some(SideLine::plain(left_no, left_lines[i].clone())),
                        right: None,
                    });
                }
            }
            OpKind::Insert => {
                for j in op.right.clone() {
                    right_no += 1;
                    rows.push(DiffRow {
                        kind: DiffRowKind::Insert,
                        left: None,
                        right: Some(SideLine::plain(right_no, right_lines[j].clone())),
                    });
                }
            }
            OpKind::Replace => {
                // Sides are paired positionally; the longer side's tail
                // becomes one-sided rows that keep the Replace kind.
                let left_len = op.left.len();
                let right_len = op.right.len();
                for k in 0..left_len.max(right_len) {
                    let left_text =
                        (k < left_len).then(|| left_lines[op.left.start + k].clone());
                    let right_text =
                        (k < right_len).then(|| right_lines[op.right.start + k].clone());
                    if left_text.is_some() {
                        left_no += 1;
                    }
                    if right_text.is_some() {
                        right_no += 1;
                    }

                    let (left_segments, right_segments) = match (&left_text, &right_text) {
                        (Some(left), Some(right)) if options.inline_highlighting => {
                            let (left_segments, right_segments) =
                                intraline_segments(left, right);
                            (Some(left_segments), Some(right_segments))
                        }
                        _ => (None, None),
                    };

                    rows.push(DiffRow {
                        kind: DiffRowKind::Replace,
                        left: left_text.map(|text| SideLine {
                            line_no: left_no,
                            text,
                            segments: left_segments,
                        }),
                        right: right_text.map(|text| SideLine {
                            line_no: right_no,
                            text,
                            segments: right_segments,
                        }),
                    });
                }
            }
        }
    }

    rows
}

/// Character-level alignment of one replaced line pair, mapped to tagged
/// spans for each side.
fn intraline_segments(left: &str, right: &str) -> (Vec<DiffSegment>, Vec<DiffSegment>) {
    let left_chars: Vec<char> = left.chars().collect();
    let right_chars: Vec<char> = right.chars().collect();

    let mut left_segments = Vec::new();
    let mut right_segments = Vec::new();

    for op in align(&left_chars, &right_chars) {
        let left_text: String = left_chars[op.left.clone()].iter().collect();
        let right_text: String = right_chars[op.right.clone()].iter().collect();
        match op.kind {
            OpKind::Equal => {
                push_segment(&mut left_segments, DiffSegmentKind::Unchanged, left_text);
                push_segment(&mut right_segments, DiffSegmentKind::Unchanged, right_text);
            }
            OpKind::Delete => {
                push_segment(&mut left_segments, DiffSegmentKind::Removed, left_text);
            }
            OpKind::Insert => {
                push_segment(&mut right_segments, DiffSegmentKind::Added, right_text);
            }
            OpKind::Replace => {
                push_segment(&mut left_segments, DiffSegmentKind::Changed, left_text);
                push_segment(&mut right_segments, DiffSegmentKind::Changed, right_text);
            }
        }
    }

    (left_segments, right_segments)
}

fn push_segment(segments: &mut Vec<DiffSegment>, kind: DiffSegmentKind, text: String) {
    if text.is_empty() {
        return;
    }

    if let Some(last) = segments.last_mut()
        && last.kind == kind
    {
        last.text.push_str(&text);
        return;
    }

    segments.push(DiffSegment { kind, text });
}

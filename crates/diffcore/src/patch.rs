use std::fmt::Write;
use std::ops::Range;

use crate::align::{OpKind, Opcode, align};

const CONTEXT_LINES: usize = 3;

/// Formats the differences between two raw texts as a unified patch with
/// three lines of context.
///
/// Comparison options never apply here: the patch always reflects byte-exact
/// differences, with original line terminators preserved, even when the
/// on-screen rows were normalized for readability. Identical inputs produce
/// an empty string.
pub fn compute_patch(
    left_text: &str,
    right_text: &str,
    left_name: &str,
    right_name: &str,
) -> String {
    let left_lines = split_keeping_endings(left_text);
    let right_lines = split_keeping_endings(right_text);

    let ops = align(&left_lines, &right_lines);
    let groups = group_opcodes(ops, CONTEXT_LINES);
    if groups.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    let _ = writeln!(out, "--- {left_name}");
    let _ = writeln!(out, "+++ {right_name}");

    for group in groups {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        let left_range = first.left.start..last.left.end;
        let right_range = first.right.start..last.right.end;
        let _ = writeln!(
            out,
            "@@ -{} +{} @@",
            format_range(&left_range),
            format_range(&right_range)
        );

        for op in &group {
            match op.kind {
                OpKind::Equal => {
                    for line in &left_lines[op.left.clone()] {
                        out.push(' ');
                        out.push_str(line);
                    }
                }
                OpKind::Delete | OpKind::Insert | OpKind::Replace => {
                    for line in &left_lines[op.left.clone()] {
                        out.push('-');
                        out.push_str(line);
                    }
                    for line in &right_lines[op.right.clone()] {
                        out.push('+');
                        out.push_str(line);
                    }
                }
            }
        }
    }

    out
}

/// Splits into lines that keep their terminators (`\n`, `\r\n`, or a lone
/// `\r`), so the patch reproduces the input bytes exactly.
fn split_keeping_endings(text: &str) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(text[start..=i].to_string());
                i += 1;
                start = i;
            }
            b'\r' => {
                let end = if bytes.get(i + 1) == Some(&b'\n') { i + 1 } else { i };
                lines.push(text[start..=end].to_string());
                i = end + 1;
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < bytes.len() {
        lines.push(text[start..].to_string());
    }
    lines
}

/// Trims opcodes down to changed regions plus `context` equal lines around
/// each, splitting groups where an equal stretch exceeds twice the context.
/// An all-equal comparison yields no groups.
fn group_opcodes(mut ops: Vec<Opcode>, context: usize) -> Vec<Vec<Opcode>> {
    if ops.is_empty() {
        return Vec::new();
    }

    if let Some(first) = ops.first_mut()
        && first.kind == OpKind::Equal
    {
        first.left.start = first.left.start.max(first.left.end.saturating_sub(context));
        first.right.start = first.right.start.max(first.right.end.saturating_sub(context));
    }
    if let Some(last) = ops.last_mut()
        && last.kind == OpKind::Equal
    {
        last.left.end = last.left.end.min(last.left.start + context);
        last.right.end = last.right.end.min(last.right.start + context);
    }

    let mut groups = Vec::new();
    let mut group: Vec<Opcode> = Vec::new();
    for mut op in ops {
        if op.kind == OpKind::Equal && op.left.len() > context * 2 {
            group.push(Opcode {
                kind: OpKind::Equal,
                left: op.left.start..op.left.end.min(op.left.start + context),
                right: op.right.start..op.right.end.min(op.right.start + context),
            });
            groups.push(std::mem::take(&mut group));
            op.left.start = op.left.start.max(op.left.end - context);
            op.right.start = op.right.start.max(op.right.end - context);
        }
        group.push(op);
    }
    if !group.is_empty() && !(group.len() == 1 && group[0].kind == OpKind::Equal) {
        groups.push(group);
    }

    groups
}

/// Unified hunk range: 1-based start, `,len` suffix unless the length is
/// exactly one, and the raw 0-based start when the range is empty.
fn format_range(range: &Range<usize>) -> String {
    let len = range.len();
    if len == 1 {
        return format!("{}", range.start + 1);
    }
    let beginning = if len == 0 { range.start } else { range.start + 1 };
    format!("{beginning},{len}")
}

use std::io::Write;

use diffcore::{DiffOptions, DiffRowKind, DiffSegmentKind, compute_patch, compute_rows};

fn main() -> anyhow::Result<()> {
    let left = r#"fn main() {
    let x = 1;
    println!("x = {}", x);
}
"#;

    let right = r#"fn main() {
    let   x = 2;
    println!( "x = {}", x);
    println!("done");
}
"#;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for ignore_whitespace in [false, true] {
        let options = DiffOptions {
            ignore_whitespace,
            ..DiffOptions::default()
        };
        let rows = compute_rows(left, right, options);

        writeln!(out, "== ignore_whitespace={ignore_whitespace} ==")?;
        for row in &rows {
            let marker = match row.kind {
                DiffRowKind::Equal => ' ',
                DiffRowKind::Insert => '+',
                DiffRowKind::Delete => '-',
                DiffRowKind::Replace => '~',
            };

            let left_no = row
                .left
                .as_ref()
                .map(|side| side.line_no.to_string())
                .unwrap_or_default();
            let right_no = row
                .right
                .as_ref()
                .map(|side| side.line_no.to_string())
                .unwrap_or_default();

            let left_text = row.left.as_ref().map(render_side).unwrap_or_default();
            let right_text = row.right.as_ref().map(render_side).unwrap_or_default();

            writeln!(
                out,
                "{marker} {left_no:>4} | {right_no:>4} | {left_text} || {right_text}"
            )?;
        }
        writeln!(out)?;
    }

    writeln!(out, "== unified patch ==")?;
    write!(out, "{}", compute_patch(left, right, "left.rs", "right.rs"))?;

    Ok(())
}

fn render_side(side: &diffcore::SideLine) -> String {
    let Some(segments) = &side.segments else {
        return side.text.clone();
    };

    let mut out = String::new();
    for segment in segments {
        match segment.kind {
            DiffSegmentKind::Unchanged => out.push_str(&segment.text),
            DiffSegmentKind::Added => {
                out.push_str("{+");
                out.push_str(&segment.text);
                out.push_str("+}");
            }
            DiffSegmentKind::Removed => {
                out.push_str("[-");
                out.push_str(&segment.text);
                out.push_str("-]");
            }
            DiffSegmentKind::Changed => {
                out.push_str("(~");
                out.push_str(&segment.text);
                out.push_str("~)");
            }
        }
    }
    out
}

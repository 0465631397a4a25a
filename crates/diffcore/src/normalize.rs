use std::borrow::Cow;

use crate::model::DiffOptions;

/// Collapses `"\r\n"` and lone `"\r"` to `"\n"`. Borrows when the text has
/// no carriage returns.
pub fn unify_line_endings(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            out.push('\n');
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

/// Derives the comparison key for one raw line: the form used for equality
/// testing only, never for display. Steps apply in a fixed order, each only
/// if enabled: line-ending unification, whitespace collapsing, case folding.
pub fn comparison_key(line: &str, options: &DiffOptions) -> String {
    let mut key = if options.normalize_line_endings {
        unify_line_endings(line).into_owned()
    } else {
        line.to_string()
    };
    if options.ignore_whitespace {
        key = key.split_whitespace().collect::<Vec<_>>().join(" ");
    }
    if options.ignore_case {
        key = key.to_lowercase();
    }
    key
}

pub fn comparison_keys(lines: &[String], options: &DiffOptions) -> Vec<String> {
    lines
        .iter()
        .map(|line| comparison_key(line, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(ignore_whitespace: bool, ignore_case: bool, normalize_line_endings: bool) -> DiffOptions {
        DiffOptions {
            ignore_whitespace,
            ignore_case,
            normalize_line_endings,
            inline_highlighting: true,
        }
    }

    #[test]
    fn all_options_off_keeps_the_line() {
        let opts = options(false, false, false);
        assert_eq!(comparison_key("  Mixed  Case \r", &opts), "  Mixed  Case \r");
    }

    #[test]
    fn whitespace_runs_collapse_and_trim() {
        let opts = options(true, false, false);
        assert_eq!(comparison_key("  a \t b  ", &opts), "a b");
        assert_eq!(comparison_key("a  b", &opts), comparison_key("a b", &opts));
    }

    #[test]
    fn case_folding_applies_last() {
        let opts = options(true, true, false);
        assert_eq!(comparison_key("  FOO   Bar ", &opts), "foo bar");
    }

    #[test]
    fn line_endings_unify_before_whitespace_handling() {
        let opts = options(false, false, true);
        assert_eq!(comparison_key("a\r\nb\rc", &opts), "a\nb\nc");
    }

    #[test]
    fn unify_line_endings_borrows_without_cr() {
        assert!(matches!(unify_line_endings("plain\ntext"), Cow::Borrowed(_)));
        assert_eq!(unify_line_endings("a\r\nb\r"), "a\nb\n");
    }

    #[test]
    fn keys_are_one_per_line() {
        let lines = vec!["A".to_string(), " b ".to_string()];
        let keys = comparison_keys(&lines, &options(true, true, true));
        assert_eq!(keys, vec!["a", "b"]);
    }
}

use ropey::LineType;
use ropey::Rope;

use crate::normalize::unify_line_endings;

/// A text buffer prepared for row comparison: line endings are unified to
/// `"\n"` on load, so lines split on `"\n"` alone and never carry a
/// carriage return. A trailing newline terminates the last line rather than
/// opening an empty one, so `"a\n"` has one line and `""` has none.
#[derive(Clone, Debug)]
pub struct Document {
    rope: Rope,
}

impl Document {
    pub fn from_str(text: &str) -> Self {
        Self {
            rope: Rope::from_str(unify_line_endings(text).as_ref()),
        }
    }

    /// Builds a document from raw bytes, replacing malformed UTF-8 sequences
    /// with U+FFFD instead of failing.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from_str(&String::from_utf8_lossy(bytes))
    }

    pub fn line_count(&self) -> usize {
        if self.rope.len() == 0 {
            return 0;
        }
        let full = self.rope.len_lines(LineType::LF);
        if self.rope.byte(self.rope.len() - 1) == b'\n' {
            full.saturating_sub(1)
        } else {
            full
        }
    }

    /// The display lines, without terminators.
    pub fn lines(&self) -> Vec<String> {
        (0..self.line_count())
            .map(|index| {
                let line = self.rope.line(index, LineType::LF);
                let text = line.as_str().unwrap_or_default();
                text.strip_suffix('\n').unwrap_or(text).to_string()
            })
            .collect()
    }
}

/// Comparison-only switches. They shape how lines are matched, never how
/// they are displayed: rows always carry the raw text of each side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiffOptions {
    pub ignore_whitespace: bool,
    pub ignore_case: bool,
    pub normalize_line_endings: bool,
    pub inline_highlighting: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            ignore_whitespace: true,
            ignore_case: false,
            normalize_line_endings: true,
            inline_highlighting: true,
        }
    }
}

/// One row of the side-by-side comparison table.
///
/// The kind is stored rather than derived from which sides are present: a
/// replace block whose sides differ in length pads the shorter side with
/// one-sided rows that still report `Replace`, so a renderer can style them
/// apart from plain inserts and deletes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffRow {
    pub kind: DiffRowKind,
    pub left: Option<SideLine>,
    pub right: Option<SideLine>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiffRowKind {
    Equal,
    Delete,
    Insert,
    Replace,
}

/// One side of a row: the 1-based line number in that side's document, the
/// raw line text, and optional character-level highlight spans.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SideLine {
    pub line_no: usize,
    pub text: String,
    pub segments: Option<Vec<DiffSegment>>,
}

impl SideLine {
    pub(crate) fn plain(line_no: usize, text: String) -> Self {
        Self {
            line_no,
            text,
            segments: None,
        }
    }
}

/// A tagged span of characters inside a changed line. Rendering (colors,
/// markup) is entirely up to the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffSegment {
    pub kind: DiffSegmentKind,
    pub text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiffSegmentKind {
    Unchanged,
    Added,
    Removed,
    Changed,
}

pub mod align;
pub mod diff;
pub mod document;
pub mod model;
pub mod normalize;
pub mod patch;

pub use align::{OpKind, Opcode, align};
pub use diff::compute_rows;
pub use document::Document;
pub use model::{DiffOptions, DiffRow, DiffRowKind, DiffSegment, DiffSegmentKind, SideLine};
pub use patch::compute_patch;

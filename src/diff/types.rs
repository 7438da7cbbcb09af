/// Opaque per-line symbol. Two lines map to the same token iff their text
/// (including the trailing newline, if any) is identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineToken(pub(super) u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Equal,
    Delete,
    Insert,
}

/// A classified block of whole lines from the line-level diff.
///
/// The text keeps each line's terminating `\n`, so concatenating the
/// `Equal` and `Delete` texts in order rebuilds the (normalized) left input
/// byte for byte, and `Equal` + `Insert` rebuilds the right one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Equal(String),
    Delete(String),
    Insert(String),
}

impl Operation {
    pub fn kind(&self) -> OpKind {
        match self {
            Operation::Equal(_) => OpKind::Equal,
            Operation::Delete(_) => OpKind::Delete,
            Operation::Insert(_) => OpKind::Insert,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Operation::Equal(t) | Operation::Delete(t) | Operation::Insert(t) => t,
        }
    }

    /// Split the block into display lines, dropping the empty tail left by a
    /// final `\n` so it does not become a phantom row.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        let text = self.text();
        text.strip_suffix('\n').unwrap_or(text).split('\n')
    }
}

/// One aligned row of the side-by-side view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub kind: OpKind,
    pub left_number: Option<usize>,
    pub left_text: String,
    pub right_number: Option<usize>,
    pub right_text: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub added: usize,
    pub deleted: usize,
}

impl DiffStats {
    pub fn is_unchanged(&self) -> bool {
        self.added == 0 && self.deleted == 0
    }
}

/// Everything one diff pass produces.
#[derive(Debug, Clone, Default)]
pub struct DiffResult {
    pub operations: Vec<Operation>,
    pub rows: Vec<DisplayRow>,
    pub stats: DiffStats,
}

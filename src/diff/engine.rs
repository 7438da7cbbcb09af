use std::time::{Duration, Instant};

use similar::{Algorithm, DiffTag};

use super::cleanup::{cleanup_merge, cleanup_semantic, Span};
use super::tokens::LineInterner;
use super::types::{DiffResult, DiffStats, DisplayRow, LineToken, OpKind, Operation};

/// Spaces substituted for each horizontal tab before diffing.
pub const TAB_WIDTH: usize = 4;

/// Past this, the diff settles for a valid but possibly non-minimal script.
const DIFF_TIMEOUT: Duration = Duration::from_secs(1);

pub struct DiffEngine;

impl DiffEngine {
    /// Run the full pipeline: operations, display rows and stats.
    pub fn compute(left: &str, right: &str) -> DiffResult {
        let operations = Self::compute_operations(left, right);
        let (rows, stats) = expand_rows(&operations);
        tracing::debug!(
            operations = operations.len(),
            rows = rows.len(),
            added = stats.added,
            deleted = stats.deleted,
            "diff computed"
        );
        DiffResult {
            operations,
            rows,
            stats,
        }
    }

    /// Line-level diff of two texts, cleaned up for human reading.
    pub fn compute_operations(left: &str, right: &str) -> Vec<Operation> {
        let left = normalize(left);
        let right = normalize(right);

        let mut interner = LineInterner::new();
        let old = interner.tokenize(&left);
        let new = interner.tokenize(&right);
        tracing::trace!(
            old_lines = old.len(),
            new_lines = new.len(),
            distinct = interner.len(),
            "tokenized"
        );

        let deadline = Instant::now() + DIFF_TIMEOUT;
        let ops =
            similar::capture_diff_slices_deadline(Algorithm::Myers, &old, &new, Some(deadline));

        let mut spans = Vec::with_capacity(ops.len());
        for op in &ops {
            let (tag, old_range, new_range) = op.as_tag_tuple();
            match tag {
                DiffTag::Equal => push_span(&mut spans, OpKind::Equal, &old[old_range]),
                DiffTag::Delete => push_span(&mut spans, OpKind::Delete, &old[old_range]),
                DiffTag::Insert => push_span(&mut spans, OpKind::Insert, &new[new_range]),
                DiffTag::Replace => {
                    push_span(&mut spans, OpKind::Delete, &old[old_range]);
                    push_span(&mut spans, OpKind::Insert, &new[new_range]);
                }
            }
        }

        cleanup_merge(&mut spans);
        cleanup_semantic(&mut spans, &interner);

        spans
            .into_iter()
            .map(|span| {
                let text = interner.text(&span.tokens);
                match span.kind {
                    OpKind::Equal => Operation::Equal(text),
                    OpKind::Delete => Operation::Delete(text),
                    OpKind::Insert => Operation::Insert(text),
                }
            })
            .collect()
    }
}

fn push_span(spans: &mut Vec<Span>, kind: OpKind, tokens: &[LineToken]) {
    if !tokens.is_empty() {
        spans.push(Span::new(kind, tokens.to_vec()));
    }
}

/// Expand tabs and drop carriage returns so rendering artifacts and line
/// ending style never register as changes.
pub fn normalize(text: &str) -> String {
    let tab = " ".repeat(TAB_WIDTH);
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\t' => out.push_str(&tab),
            '\r' => {}
            c => out.push(c),
        }
    }
    out
}

/// One row per source line, numbering each side from 1. Stats are counted
/// in the same pass.
pub fn expand_rows(operations: &[Operation]) -> (Vec<DisplayRow>, DiffStats) {
    let mut rows = Vec::new();
    let mut stats = DiffStats::default();
    let mut left = 1;
    let mut right = 1;

    for op in operations {
        let kind = op.kind();
        for line in op.lines() {
            let row = match kind {
                OpKind::Equal => {
                    let row = DisplayRow {
                        kind,
                        left_number: Some(left),
                        left_text: line.to_string(),
                        right_number: Some(right),
                        right_text: line.to_string(),
                    };
                    left += 1;
                    right += 1;
                    row
                }
                OpKind::Delete => {
                    let row = DisplayRow {
                        kind,
                        left_number: Some(left),
                        left_text: line.to_string(),
                        right_number: None,
                        right_text: String::new(),
                    };
                    left += 1;
                    stats.deleted += 1;
                    row
                }
                OpKind::Insert => {
                    let row = DisplayRow {
                        kind,
                        left_number: None,
                        left_text: String::new(),
                        right_number: Some(right),
                        right_text: line.to_string(),
                    };
                    right += 1;
                    stats.added += 1;
                    row
                }
            };
            rows.push(row);
        }
    }

    (rows, stats)
}

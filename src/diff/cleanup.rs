//! Post-processing of a raw edit script over line tokens.
//!
//! A minimal edit script is often fragmented: one unchanged line between two
//! rewritten blocks splits a single logical change in two. The passes here
//! trade minimality for readability, preferring fewer, larger blocks.

use std::mem;

use super::tokens::LineInterner;
use super::types::{LineToken, OpKind};

/// A run of tokens sharing one classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub kind: OpKind,
    pub tokens: Vec<LineToken>,
}

impl Span {
    pub fn new(kind: OpKind, tokens: Vec<LineToken>) -> Self {
        Self { kind, tokens }
    }
}

fn common_prefix(a: &[LineToken], b: &[LineToken]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix(a: &[LineToken], b: &[LineToken]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Longest run that is both a suffix of `a` and a prefix of `b`.
fn common_overlap(a: &[LineToken], b: &[LineToken]) -> usize {
    let max = a.len().min(b.len());
    (1..=max)
        .rev()
        .find(|&n| a[a.len() - n..] == b[..n])
        .unwrap_or(0)
}

fn concat(a: &[LineToken], b: &[LineToken]) -> Vec<LineToken> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    out.extend_from_slice(a);
    out.extend_from_slice(b);
    out
}

fn push_equal(out: &mut Vec<Span>, tokens: Vec<LineToken>) {
    if tokens.is_empty() {
        return;
    }
    match out.last_mut() {
        Some(last) if last.kind == OpKind::Equal => last.tokens.extend(tokens),
        _ => out.push(Span::new(OpKind::Equal, tokens)),
    }
}

/// Join adjacent spans of the same kind and drop empty ones.
fn coalesce(spans: &mut Vec<Span>) {
    let mut out: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans.drain(..) {
        if span.tokens.is_empty() {
            continue;
        }
        match out.last_mut() {
            Some(last) if last.kind == span.kind => last.tokens.extend(span.tokens),
            _ => out.push(span),
        }
    }
    *spans = out;
}

/// Collapse every run of edits between two equalities into at most one
/// `Delete` followed by one `Insert`, moving lines common to both ends of the
/// run out into the neighbouring equalities.
fn merge_runs(spans: Vec<Span>) -> Vec<Span> {
    let mut out: Vec<Span> = Vec::with_capacity(spans.len());
    let mut deleted: Vec<LineToken> = Vec::new();
    let mut inserted: Vec<LineToken> = Vec::new();

    // The trailing empty equality flushes the last run of edits.
    let sentinel = Span::new(OpKind::Equal, Vec::new());
    for span in spans.into_iter().chain(std::iter::once(sentinel)) {
        match span.kind {
            OpKind::Delete => deleted.extend(span.tokens),
            OpKind::Insert => inserted.extend(span.tokens),
            OpKind::Equal => {
                let mut trailing = span.tokens;
                if !deleted.is_empty() && !inserted.is_empty() {
                    let prefix = common_prefix(&deleted, &inserted);
                    if prefix > 0 {
                        push_equal(&mut out, deleted[..prefix].to_vec());
                        deleted.drain(..prefix);
                        inserted.drain(..prefix);
                    }
                    let suffix = common_suffix(&deleted, &inserted);
                    if suffix > 0 {
                        let shared = inserted.split_off(inserted.len() - suffix);
                        deleted.truncate(deleted.len() - suffix);
                        trailing = concat(&shared, &trailing);
                    }
                }
                if !deleted.is_empty() {
                    out.push(Span::new(OpKind::Delete, mem::take(&mut deleted)));
                }
                if !inserted.is_empty() {
                    out.push(Span::new(OpKind::Insert, mem::take(&mut inserted)));
                }
                push_equal(&mut out, trailing);
            }
        }
    }

    out
}

/// Slide a lone edit over one of its neighbouring equalities when the edit
/// starts or ends with that equality's lines, eliminating the equality:
/// `A<ins>BA</ins>C` becomes `<ins>AB</ins>AC`.
fn shift_single_edits(spans: &mut Vec<Span>) -> bool {
    let mut changed = false;
    let mut i = 1;
    while i + 1 < spans.len() {
        if spans[i - 1].kind == OpKind::Equal && spans[i + 1].kind == OpKind::Equal {
            let prev = spans[i - 1].tokens.clone();
            let next = spans[i + 1].tokens.clone();
            let edit = spans[i].tokens.clone();

            if edit.ends_with(&prev) {
                spans[i].tokens = concat(&prev, &edit[..edit.len() - prev.len()]);
                spans[i + 1].tokens = concat(&prev, &next);
                spans.remove(i - 1);
                changed = true;
            } else if edit.starts_with(&next) {
                spans[i - 1].tokens.extend_from_slice(&next);
                spans[i].tokens = concat(&edit[next.len()..], &next);
                spans.remove(i + 1);
                changed = true;
            }
        }
        i += 1;
    }
    changed
}

/// Normalize an edit script: one `Delete` then one `Insert` per changed
/// region, shared lines factored out, lone edits slid where that removes an
/// equality.
pub fn cleanup_merge(spans: &mut Vec<Span>) {
    loop {
        *spans = merge_runs(mem::take(spans));
        if !shift_single_edits(spans) {
            break;
        }
    }
}

fn weight(interner: &LineInterner<'_>, tokens: &[LineToken]) -> usize {
    tokens
        .iter()
        .map(|&t| interner.line(t).chars().count())
        .sum()
}

/// Turn every equality that is no longer than the edits on both of its sides
/// into a delete+insert pair, so the surrounding changes read as one block.
fn eliminate_small_equalities(spans: &mut Vec<Span>, interner: &LineInterner<'_>) -> bool {
    let mut changed = false;
    let mut equalities: Vec<usize> = Vec::new();
    let mut last_equality: Option<usize> = None;
    // Edit weight before (1) and after (2) the last equality.
    let (mut inserted_before, mut deleted_before) = (0usize, 0usize);
    let (mut inserted_after, mut deleted_after) = (0usize, 0usize);

    let mut i = 0;
    while i < spans.len() {
        let len = weight(interner, &spans[i].tokens);
        match spans[i].kind {
            OpKind::Equal => {
                equalities.push(i);
                inserted_before = inserted_after;
                deleted_before = deleted_after;
                inserted_after = 0;
                deleted_after = 0;
                last_equality = Some(len);
            }
            kind => {
                if kind == OpKind::Insert {
                    inserted_after += len;
                } else {
                    deleted_after += len;
                }
                let absorbed = last_equality.is_some_and(|eq| {
                    eq <= inserted_before.max(deleted_before)
                        && eq <= inserted_after.max(deleted_after)
                });
                let target = if absorbed { equalities.last().copied() } else { None };
                if let Some(at) = target {
                    let tokens = spans[at].tokens.clone();
                    spans.insert(at, Span::new(OpKind::Delete, tokens));
                    spans[at + 1].kind = OpKind::Insert;
                    // Drop the absorbed equality and re-evaluate the one before it.
                    equalities.pop();
                    equalities.pop();
                    inserted_before = 0;
                    deleted_before = 0;
                    inserted_after = 0;
                    deleted_after = 0;
                    last_equality = None;
                    changed = true;
                    i = equalities.last().map_or(0, |&e| e + 1);
                    continue;
                }
            }
        }
        i += 1;
    }

    changed
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// How good a place the seam between `before` and `after` is for an edit
/// boundary. File edges beat blank lines, which beat any other line break.
fn boundary_score(interner: &LineInterner<'_>, before: &[LineToken], after: &[LineToken]) -> u8 {
    match (before.last(), after.first()) {
        (Some(&b), Some(&a)) => {
            if is_blank(interner.line(b)) || is_blank(interner.line(a)) {
                5
            } else {
                4
            }
        }
        _ => 6,
    }
}

/// Slide each edit that sits between two equalities to the position where
/// its boundaries fall on blank lines, without changing what is edited.
fn align_edits(spans: &mut Vec<Span>, interner: &LineInterner<'_>) {
    let mut i = 1;
    while i + 1 < spans.len() {
        if spans[i - 1].kind != OpKind::Equal || spans[i + 1].kind != OpKind::Equal {
            i += 1;
            continue;
        }

        let before_len = spans[i - 1].tokens.len();
        let edit_len = spans[i].tokens.len();
        let seq = [
            spans[i - 1].tokens.as_slice(),
            &spans[i].tokens,
            &spans[i + 1].tokens,
        ]
        .concat();

        // The edit occupies seq[at..at + edit_len]. Start from the leftmost
        // equivalent position.
        let mut at = before_len - common_suffix(&spans[i - 1].tokens, &spans[i].tokens);
        let score = |at: usize| {
            let (before, rest) = seq.split_at(at);
            let (edit, after) = rest.split_at(edit_len);
            boundary_score(interner, before, edit) + boundary_score(interner, edit, after)
        };
        let mut best_score = score(at);
        let mut best = at;

        while at + edit_len < seq.len() && seq[at] == seq[at + edit_len] {
            at += 1;
            let current = score(at);
            if current >= best_score {
                best_score = current;
                best = at;
            }
        }

        if best != before_len {
            let best_before = seq[..best].to_vec();
            let best_edit = seq[best..best + edit_len].to_vec();
            let best_after = seq[best + edit_len..].to_vec();
            if best_before.is_empty() {
                spans.remove(i - 1);
                i -= 1;
            } else {
                spans[i - 1].tokens = best_before;
            }
            spans[i].tokens = best_edit;
            if best_after.is_empty() {
                spans.remove(i + 1);
                i -= 1;
            } else {
                spans[i + 1].tokens = best_after;
            }
        }
        i += 1;
    }
}

/// Split a delete/insert pair whose ends overlap by at least half of either
/// side into delete, equality, insert (or insert, equality, delete when the
/// overlap runs the other way).
fn extract_overlaps(spans: &mut Vec<Span>) {
    let mut i = 1;
    while i < spans.len() {
        if spans[i - 1].kind == OpKind::Delete && spans[i].kind == OpKind::Insert {
            let deletion = spans[i - 1].tokens.clone();
            let insertion = spans[i].tokens.clone();
            let forward = common_overlap(&deletion, &insertion);
            let backward = common_overlap(&insertion, &deletion);

            if forward >= backward {
                if 2 * forward >= deletion.len() || 2 * forward >= insertion.len() {
                    spans.insert(i, Span::new(OpKind::Equal, insertion[..forward].to_vec()));
                    spans[i - 1].tokens = deletion[..deletion.len() - forward].to_vec();
                    spans[i + 1].tokens = insertion[forward..].to_vec();
                    i += 1;
                }
            } else if 2 * backward >= deletion.len() || 2 * backward >= insertion.len() {
                spans.insert(i, Span::new(OpKind::Equal, deletion[..backward].to_vec()));
                spans[i - 1] = Span::new(
                    OpKind::Insert,
                    insertion[..insertion.len() - backward].to_vec(),
                );
                spans[i + 1] = Span::new(OpKind::Delete, deletion[backward..].to_vec());
                i += 1;
            }
            i += 1;
        }
        i += 1;
    }
}

/// Readability pass run after [`cleanup_merge`]: absorb small equalities,
/// align edits to blank lines, then pull overlapping lines out of
/// delete/insert pairs.
pub fn cleanup_semantic(spans: &mut Vec<Span>, interner: &LineInterner<'_>) {
    if eliminate_small_equalities(spans, interner) {
        cleanup_merge(spans);
    }
    align_edits(spans, interner);
    extract_overlaps(spans);
    coalesce(spans);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(ids: &[u32]) -> Vec<LineToken> {
        ids.iter().map(|&id| LineToken(id)).collect()
    }

    fn span(kind: OpKind, ids: &[u32]) -> Span {
        Span::new(kind, t(ids))
    }

    #[test]
    fn test_overlap_lengths() {
        assert_eq!(common_overlap(&t(&[1, 2, 3]), &t(&[2, 3, 4])), 2);
        assert_eq!(common_overlap(&t(&[1, 2]), &t(&[3, 4])), 0);
        assert_eq!(common_overlap(&t(&[]), &t(&[1])), 0);
    }

    #[test]
    fn test_merge_orders_delete_before_insert() {
        let mut spans = vec![
            span(OpKind::Insert, &[1]),
            span(OpKind::Delete, &[2]),
            span(OpKind::Equal, &[3]),
            span(OpKind::Equal, &[4]),
        ];
        cleanup_merge(&mut spans);
        assert_eq!(
            spans,
            vec![
                span(OpKind::Delete, &[2]),
                span(OpKind::Insert, &[1]),
                span(OpKind::Equal, &[3, 4]),
            ]
        );
    }

    #[test]
    fn test_merge_factors_common_lines() {
        let mut spans = vec![
            span(OpKind::Equal, &[1]),
            span(OpKind::Delete, &[2, 3, 9]),
            span(OpKind::Insert, &[2, 4, 9]),
            span(OpKind::Equal, &[5]),
        ];
        cleanup_merge(&mut spans);
        assert_eq!(
            spans,
            vec![
                span(OpKind::Equal, &[1, 2]),
                span(OpKind::Delete, &[3]),
                span(OpKind::Insert, &[4]),
                span(OpKind::Equal, &[9, 5]),
            ]
        );
    }

    #[test]
    fn test_merge_slides_lone_edit_over_equality() {
        let mut spans = vec![
            span(OpKind::Equal, &[1]),
            span(OpKind::Insert, &[2, 1]),
            span(OpKind::Equal, &[3]),
        ];
        cleanup_merge(&mut spans);
        assert_eq!(
            spans,
            vec![span(OpKind::Insert, &[1, 2]), span(OpKind::Equal, &[1, 3])]
        );
    }

    #[test]
    fn test_forward_overlap_becomes_equality() {
        let mut spans = vec![
            span(OpKind::Delete, &[1, 2, 3]),
            span(OpKind::Insert, &[2, 3, 4]),
        ];
        extract_overlaps(&mut spans);
        assert_eq!(
            spans,
            vec![
                span(OpKind::Delete, &[1]),
                span(OpKind::Equal, &[2, 3]),
                span(OpKind::Insert, &[4]),
            ]
        );
    }

    #[test]
    fn test_backward_overlap_swaps_sides() {
        let mut spans = vec![
            span(OpKind::Delete, &[3, 4, 5]),
            span(OpKind::Insert, &[1, 3, 4]),
        ];
        extract_overlaps(&mut spans);
        assert_eq!(
            spans,
            vec![
                span(OpKind::Insert, &[1]),
                span(OpKind::Equal, &[3, 4]),
                span(OpKind::Delete, &[5]),
            ]
        );
    }

    #[test]
    fn test_small_overlap_is_left_alone() {
        let original = vec![
            span(OpKind::Delete, &[1, 2, 3, 4, 5]),
            span(OpKind::Insert, &[5, 6, 7, 8, 9]),
        ];
        let mut spans = original.clone();
        extract_overlaps(&mut spans);
        assert_eq!(spans, original);
    }

    #[test]
    fn test_small_equality_is_absorbed() {
        let mut interner = LineInterner::new();
        let old = interner.tokenize("alpha\nx\nbeta\n");
        let new = interner.tokenize("gamma\nx\ndelta\n");
        let mut spans = vec![
            Span::new(OpKind::Delete, old[..1].to_vec()),
            Span::new(OpKind::Insert, new[..1].to_vec()),
            Span::new(OpKind::Equal, old[1..2].to_vec()),
            Span::new(OpKind::Delete, old[2..].to_vec()),
            Span::new(OpKind::Insert, new[2..].to_vec()),
        ];
        cleanup_semantic(&mut spans, &interner);
        assert_eq!(
            spans,
            vec![
                Span::new(OpKind::Delete, old.clone()),
                Span::new(OpKind::Insert, new.clone()),
            ]
        );
    }

    #[test]
    fn test_large_equality_survives() {
        let mut interner = LineInterner::new();
        let old = interner.tokenize("a\nthis line is long enough to keep\nb\n");
        let new = interner.tokenize("c\nthis line is long enough to keep\nd\n");
        let mut spans = vec![
            Span::new(OpKind::Delete, old[..1].to_vec()),
            Span::new(OpKind::Insert, new[..1].to_vec()),
            Span::new(OpKind::Equal, old[1..2].to_vec()),
            Span::new(OpKind::Delete, old[2..].to_vec()),
            Span::new(OpKind::Insert, new[2..].to_vec()),
        ];
        let before = spans.clone();
        cleanup_semantic(&mut spans, &interner);
        assert_eq!(spans, before);
    }

    #[test]
    fn test_edit_aligns_to_blank_line() {
        let mut interner = LineInterner::new();
        let lines = interner.tokenize("x\n\nz\ny\n");
        let (x, blank, z, y) = (lines[0], lines[1], lines[2], lines[3]);
        let mut spans = vec![
            Span::new(OpKind::Equal, vec![x]),
            Span::new(OpKind::Insert, vec![blank, z]),
            Span::new(OpKind::Equal, vec![blank, y]),
        ];
        cleanup_semantic(&mut spans, &interner);
        assert_eq!(
            spans,
            vec![
                Span::new(OpKind::Equal, vec![x, blank]),
                Span::new(OpKind::Insert, vec![z, blank]),
                Span::new(OpKind::Equal, vec![y]),
            ]
        );
    }

    #[test]
    fn test_edit_slides_across_long_run() {
        let mut interner = LineInterner::new();
        let lines = interner.tokenize("c\na\n\nd\n");
        let (c, a, blank, d) = (lines[0], lines[1], lines[2], lines[3]);
        let run = 20_000;

        let mut after = vec![a; run];
        after.extend([blank, d]);
        let mut spans = vec![
            Span::new(OpKind::Equal, vec![c]),
            Span::new(OpKind::Insert, vec![a]),
            Span::new(OpKind::Equal, after),
        ];
        align_edits(&mut spans, &interner);

        let mut before = vec![c];
        before.extend(vec![a; run]);
        assert_eq!(
            spans,
            vec![
                Span::new(OpKind::Equal, before),
                Span::new(OpKind::Insert, vec![a]),
                Span::new(OpKind::Equal, vec![blank, d]),
            ]
        );
    }
}

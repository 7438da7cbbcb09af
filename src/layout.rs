use std::fmt;

use unicode_width::UnicodeWidthChar;

use crate::diff::{DiffStats, DisplayRow, OpKind};

/// Columns kept free on the right edge of the terminal.
pub const OUTER_MARGIN: usize = 2;
/// Per-row chrome: two gutters plus the spacing around the divider.
pub const ROW_CHROME: usize = 15;
/// Floor applied to the working width before chrome is subtracted.
pub const MIN_WORKING_WIDTH: usize = 30;
pub const GUTTER_WIDTH: usize = 5;

pub const PLACEHOLDER: &str = "~";
/// Shown in the gutter of a side that has no line on this row.
pub const GUTTER_PLACEHOLDER: &str = "-";
pub const ELLIPSIS: char = '\u{2026}';
pub const DIVIDER: &str = "\u{2503}";
pub const NO_CHANGES: &str = "\u{2714} No changes detected between files.";

/// Width of each text pane for a terminal `terminal_width` columns wide.
pub fn pane_width(terminal_width: usize) -> usize {
    let working = terminal_width
        .saturating_sub(OUTER_MARGIN)
        .max(MIN_WORKING_WIDTH);
    (working - ROW_CHROME) / 2
}

/// Right-justify a line number in the gutter. Numbers wider than the gutter
/// keep only their leading digits; a missing number shows a dash.
pub fn gutter(number: Option<usize>) -> String {
    let digits = number.map_or_else(|| GUTTER_PLACEHOLDER.to_string(), |n| n.to_string());
    if digits.len() > GUTTER_WIDTH {
        return digits[..GUTTER_WIDTH].to_string();
    }
    format!("{digits:>GUTTER_WIDTH$}")
}

/// Display columns of `text`, counting zero for characters with no width.
pub fn display_width(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// Fit `text` into exactly `width` display columns: pad short text with
/// spaces, cut long text to `width - 1` columns and end it with an ellipsis.
pub fn fit(text: &str, width: usize) -> String {
    let current = display_width(text);
    if current <= width {
        let mut out = String::with_capacity(text.len() + width - current);
        out.push_str(text);
        out.extend(std::iter::repeat(' ').take(width - current));
        return out;
    }
    if width == 0 {
        return String::new();
    }

    let budget = width - 1;
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    // A wide character that would straddle the cut leaves a one-column hole.
    out.extend(std::iter::repeat(' ').take(budget - used));
    out.push(ELLIPSIS);
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Equal,
    Deleted,
    Inserted,
    Placeholder,
}

/// One fixed-width text cell with the role the presentation layer colors by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub style: CellStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub left_gutter: String,
    pub left: Cell,
    pub right_gutter: String,
    pub right: Cell,
}

impl fmt::Display for RenderedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {DIVIDER} {} {}",
            self.left_gutter, self.left.text, self.right_gutter, self.right.text
        )
    }
}

/// The laid-out content handed to the viewport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RenderedBlock {
    /// Both inputs are the same; a single notice replaces the panes.
    #[default]
    NoChanges,
    Panes {
        pane_width: usize,
        lines: Vec<RenderedLine>,
    },
}

impl RenderedBlock {
    pub fn line_count(&self) -> usize {
        match self {
            RenderedBlock::NoChanges => 2,
            RenderedBlock::Panes { lines, .. } => lines.len(),
        }
    }
}

impl fmt::Display for RenderedBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderedBlock::NoChanges => write!(f, "\n  {NO_CHANGES}"),
            RenderedBlock::Panes { lines, .. } => {
                for line in lines {
                    writeln!(f, "{line}")?;
                }
                Ok(())
            }
        }
    }
}

pub struct PaneLayout;

impl PaneLayout {
    pub fn render(rows: &[DisplayRow], stats: &DiffStats, terminal_width: usize) -> RenderedBlock {
        if stats.is_unchanged() {
            return RenderedBlock::NoChanges;
        }

        let width = pane_width(terminal_width);
        let lines = rows.iter().map(|row| layout_row(row, width)).collect();
        RenderedBlock::Panes {
            pane_width: width,
            lines,
        }
    }
}

fn layout_row(row: &DisplayRow, width: usize) -> RenderedLine {
    let placeholder = || Cell {
        text: fit(PLACEHOLDER, width),
        style: CellStyle::Placeholder,
    };
    let (left, right) = match row.kind {
        OpKind::Equal => (
            Cell {
                text: fit(&row.left_text, width),
                style: CellStyle::Equal,
            },
            Cell {
                text: fit(&row.right_text, width),
                style: CellStyle::Equal,
            },
        ),
        OpKind::Delete => (
            Cell {
                text: fit(&row.left_text, width),
                style: CellStyle::Deleted,
            },
            placeholder(),
        ),
        OpKind::Insert => (
            placeholder(),
            Cell {
                text: fit(&row.right_text, width),
                style: CellStyle::Inserted,
            },
        ),
    };

    RenderedLine {
        left_gutter: gutter(row.left_number),
        left,
        right_gutter: gutter(row.right_number),
        right,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffEngine;
    use unicode_width::UnicodeWidthStr;

    #[test]
    fn test_pane_width_budget() {
        assert_eq!(pane_width(80), (78 - 15) / 2);
        assert_eq!(pane_width(120), 51);
        // Narrow terminals use the floor.
        assert_eq!(pane_width(10), 7);
        assert_eq!(pane_width(0), 7);
        assert_eq!(pane_width(32), 7);
        assert_eq!(pane_width(33), 8);
    }

    #[test]
    fn test_gutter() {
        assert_eq!(gutter(Some(7)), "    7");
        assert_eq!(gutter(Some(12345)), "12345");
        assert_eq!(gutter(Some(1234567)), "12345");
        assert_eq!(gutter(None), "    -");
    }

    #[test]
    fn test_fit_pads() {
        assert_eq!(fit("abc", 6), "abc   ");
        assert_eq!(fit("", 3), "   ");
        assert_eq!(fit("exact", 5), "exact");
    }

    #[test]
    fn test_fit_truncates_with_ellipsis() {
        let out = fit("abcdefghij", 6);
        assert_eq!(out, "abcde\u{2026}");
        assert_eq!(out.width(), 6);
    }

    #[test]
    fn test_fit_wide_characters() {
        let out = fit("日本語テキスト", 6);
        assert_eq!(out, "日本 \u{2026}");
        assert_eq!(out.width(), 6);
        assert_eq!(fit("日本", 5), "日本 ");
    }

    #[test]
    fn test_every_cell_has_pane_width() {
        let long = "x".repeat(300);
        let right = format!("short\n{long}\n日本語日本語日本語日本語日本語日本語日本語\n");
        let result = DiffEngine::compute("short\n", &right);
        for terminal_width in [30, 31, 47, 80, 133, 200] {
            let block = PaneLayout::render(&result.rows, &result.stats, terminal_width);
            let RenderedBlock::Panes { pane_width, lines } = block else {
                panic!("expected panes");
            };
            assert_eq!(lines.len(), result.rows.len());
            for line in &lines {
                assert_eq!(line.left.text.width(), pane_width);
                assert_eq!(line.right.text.width(), pane_width);
                assert_eq!(line.to_string().width(), 2 * pane_width + ROW_CHROME);
            }
        }
    }

    #[test]
    fn test_unchanged_renders_notice() {
        let result = DiffEngine::compute("same\n", "same\n");
        let block = PaneLayout::render(&result.rows, &result.stats, 80);
        assert_eq!(block, RenderedBlock::NoChanges);
        assert_eq!(block.to_string(), format!("\n  {NO_CHANGES}"));

        let empty = DiffEngine::compute("", "");
        assert_eq!(
            PaneLayout::render(&empty.rows, &empty.stats, 80),
            RenderedBlock::NoChanges
        );
    }

    #[test]
    fn test_rendered_rows() {
        let result = DiffEngine::compute("a\nb\nc\n", "a\nx\nc\n");
        let block = PaneLayout::render(&result.rows, &result.stats, 32);
        let text = block.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "    1 a       \u{2503}     1 a      ",
                "    2 b       \u{2503}     - ~      ",
                "    - ~       \u{2503}     2 x      ",
                "    3 c       \u{2503}     3 c      ",
            ]
        );
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_placeholder_styles() {
        let result = DiffEngine::compute("a\n", "b\n");
        let RenderedBlock::Panes { lines, .. } = PaneLayout::render(&result.rows, &result.stats, 80)
        else {
            panic!("expected panes");
        };
        assert_eq!(lines[0].left.style, CellStyle::Deleted);
        assert_eq!(lines[0].right.style, CellStyle::Placeholder);
        assert_eq!(lines[1].left.style, CellStyle::Placeholder);
        assert_eq!(lines[1].right.style, CellStyle::Inserted);
    }
}

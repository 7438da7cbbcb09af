use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::layout::{CellStyle, RenderedBlock, RenderedLine, DIVIDER, NO_CHANGES};
use crate::state::AppState;
use crate::theme::Theme;

use super::Component;

/// The scrollable viewport over the rendered block.
pub struct DiffView;

impl Component for DiffView {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let visible = state.viewport.visible();

        let lines: Vec<Line> = match &state.block {
            RenderedBlock::NoChanges => {
                let notice = [
                    Line::raw(""),
                    Line::from(vec![
                        Span::raw("  "),
                        Span::styled(NO_CHANGES, Style::default().fg(theme.success)),
                    ]),
                ];
                notice
                    .into_iter()
                    .skip(visible.start)
                    .take(visible.len())
                    .collect()
            }
            RenderedBlock::Panes { lines, .. } => lines
                .get(visible)
                .unwrap_or_default()
                .iter()
                .map(|line| styled_line(line, theme))
                .collect(),
        };

        frame.render_widget(Paragraph::new(lines), area);
    }
}

fn cell_style(style: CellStyle, theme: &Theme) -> Style {
    let fg = match style {
        CellStyle::Equal => theme.diff_equal_fg,
        CellStyle::Deleted => theme.diff_del_fg,
        CellStyle::Inserted => theme.diff_add_fg,
        CellStyle::Placeholder => theme.placeholder,
    };
    Style::default().fg(fg)
}

fn styled_line<'a>(line: &'a RenderedLine, theme: &Theme) -> Line<'a> {
    let gutter = Style::default().fg(theme.text_muted);
    Line::from(vec![
        Span::styled(line.left_gutter.as_str(), gutter),
        Span::raw(" "),
        Span::styled(line.left.text.as_str(), cell_style(line.left.style, theme)),
        Span::raw(" "),
        Span::styled(
            DIVIDER,
            Style::default()
                .fg(theme.divider)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(line.right_gutter.as_str(), gutter),
        Span::raw(" "),
        Span::styled(line.right.text.as_str(), cell_style(line.right.style, theme)),
    ])
}

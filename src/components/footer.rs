use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::state::AppState;

use super::Component;

/// Scroll position, change counts and the quit hint.
pub struct Footer;

impl Component for Footer {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let muted = Style::default().fg(theme.text_muted);
        let stats = state.stats();
        let percent = state.viewport.scroll_percent() * 100.0;

        let line = Line::from(vec![
            Span::styled(format!(" {percent:3.0}% |"), muted),
            Span::raw(" "),
            Span::styled(
                format!("+{}", stats.added),
                Style::default().fg(theme.diff_add_fg),
            ),
            Span::raw(" "),
            Span::styled(
                format!("-{}", stats.deleted),
                Style::default().fg(theme.diff_del_fg),
            ),
            Span::raw(" "),
            Span::styled("| [q] Quit", muted),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

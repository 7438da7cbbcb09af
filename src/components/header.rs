use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::state::AppState;

use super::Component;

pub struct Header;

impl Component for Header {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let line = Line::from(vec![
            Span::styled(
                " ATLAS.DIFF ",
                Style::default()
                    .fg(theme.badge_fg)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                format!("{} <-> {}", state.left.label(), state.right.label()),
                Style::default().fg(theme.accent),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

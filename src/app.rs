use anyhow::Result;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::action::Action;
use crate::components::diff_view::DiffView;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::Component;
use crate::diff::DiffEngine;
use crate::event::{map_key_to_action, map_mouse_to_action, Event, EventReader};
use crate::input::SourceText;
use crate::layout::PaneLayout;
use crate::state::AppState;
use crate::theme::Theme;
use crate::tui::Tui;

/// Rows taken by the header, the spacer under it and the footer.
const CHROME_ROWS: u16 = 3;

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(left: SourceText, right: SourceText, theme: Theme) -> Self {
        Self {
            state: AppState::new(left, right, theme),
        }
    }

    pub async fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        let size = terminal.size()?;
        self.update(Action::Resize {
            width: size.width,
            height: size.height,
        });

        let mut events = EventReader::new();

        let header = Header;
        let diff_view = DiffView;
        let footer = Footer;

        loop {
            terminal.draw(|frame| {
                let outer = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(1),
                        Constraint::Length(1),
                        Constraint::Min(1),
                        Constraint::Length(1),
                    ])
                    .split(frame.area());

                header.render(frame, outer[0], &self.state);
                diff_view.render(frame, outer[2], &self.state);
                footer.render(frame, outer[3], &self.state);
            })?;

            // Wait for at least one event, then drain all pending events
            // so a burst of input is applied before the next draw.
            let Some(first) = events.next().await else {
                break;
            };
            let mut pending = vec![first];
            while let Some(ev) = events.try_next() {
                pending.push(ev);
            }

            self.apply_events(pending)?;

            if self.state.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Apply a burst of events. Only the last resize in the burst is laid
    /// out, before any other action.
    fn apply_events(&mut self, pending: Vec<Event>) -> Result<()> {
        let mut resize = None;
        let mut actions: Vec<Action> = Vec::new();
        for event in pending {
            let action = match event {
                Event::Key(key) => map_key_to_action(key),
                Event::Mouse(mouse) => map_mouse_to_action(mouse),
                Event::Resize(width, height) => {
                    resize = Some(Action::Resize { width, height });
                    None
                }
                Event::Error(e) => {
                    return Err(anyhow::Error::new(e).context("terminal event stream failed"));
                }
            };
            actions.extend(action);
        }

        if let Some(action) = resize {
            self.update(action);
        }
        for action in actions {
            self.update(action);
        }
        Ok(())
    }

    fn update(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.state.should_quit = true;
            }
            Action::ScrollUp => self.state.viewport.scroll_up(1),
            Action::ScrollDown => self.state.viewport.scroll_down(1),
            Action::ScrollPageUp => self.state.viewport.page_up(),
            Action::ScrollPageDown => self.state.viewport.page_down(),
            Action::ScrollHalfPageUp => self.state.viewport.half_page_up(),
            Action::ScrollHalfPageDown => self.state.viewport.half_page_down(),
            Action::ScrollToTop => self.state.viewport.to_top(),
            Action::ScrollToBottom => self.state.viewport.to_bottom(),
            Action::Resize { width, height } => self.relayout(width, height),
        }
    }

    /// Re-diff and re-layout from scratch for a terminal of the given size.
    fn relayout(&mut self, width: u16, height: u16) {
        let state = &mut self.state;
        state.diff = DiffEngine::compute(&state.left.contents, &state.right.contents);
        state.block = PaneLayout::render(&state.diff.rows, &state.diff.stats, width as usize);

        let viewport_height = height.saturating_sub(CHROME_ROWS) as usize;
        state
            .viewport
            .resize(viewport_height, state.block.line_count());
        tracing::debug!(
            width,
            height,
            operations = state.diff.operations.len(),
            lines = state.block.line_count(),
            "relayout"
        );
    }
}

use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseEvent, MouseEventKind,
};
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::action::Action;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// The terminal stopped delivering events. Nothing follows it.
    Error(std::io::Error),
}

pub struct EventReader {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventReader {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut reader = EventStream::new();
            loop {
                let event = match reader.next().await {
                    Some(Ok(CrosstermEvent::Key(key))) => Event::Key(key),
                    Some(Ok(CrosstermEvent::Mouse(mouse))) => Event::Mouse(mouse),
                    Some(Ok(CrosstermEvent::Resize(w, h))) => Event::Resize(w, h),
                    Some(Err(e)) => {
                        tracing::error!(error = %e, "terminal event stream failed");
                        let _ = tx.send(Event::Error(e));
                        break;
                    }
                    None => break,
                    _ => continue,
                };
                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Non-blocking: returns a pending event if one is available, or None.
    pub fn try_next(&mut self) -> Option<Event> {
        self.rx.try_recv().ok()
    }
}

/// Map a key event to an action. Keys without a binding are ignored.
pub fn map_key_to_action(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('d') => Some(Action::ScrollHalfPageDown),
            KeyCode::Char('u') => Some(Action::ScrollHalfPageUp),
            KeyCode::Char('f') => Some(Action::ScrollPageDown),
            KeyCode::Char('b') => Some(Action::ScrollPageUp),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollDown),
        KeyCode::PageUp | KeyCode::Char('b') => Some(Action::ScrollPageUp),
        KeyCode::PageDown | KeyCode::Char(' ') | KeyCode::Char('f') => {
            Some(Action::ScrollPageDown)
        }
        KeyCode::Char('u') => Some(Action::ScrollHalfPageUp),
        KeyCode::Char('d') => Some(Action::ScrollHalfPageDown),
        KeyCode::Home | KeyCode::Char('g') => Some(Action::ScrollToTop),
        KeyCode::End | KeyCode::Char('G') => Some(Action::ScrollToBottom),
        _ => None,
    }
}

/// Only the wheel is used; clicks and drags are ignored.
pub fn map_mouse_to_action(mouse: MouseEvent) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::ScrollUp => Some(Action::ScrollUp),
        MouseEventKind::ScrollDown => Some(Action::ScrollDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseButton};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key_to_action(key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(
            map_key_to_action(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(map_key_to_action(key(KeyCode::Char('j'))), Some(Action::ScrollDown));
        assert_eq!(map_key_to_action(key(KeyCode::Up)), Some(Action::ScrollUp));
        assert_eq!(map_key_to_action(key(KeyCode::PageDown)), Some(Action::ScrollPageDown));
        assert_eq!(map_key_to_action(key(KeyCode::Char(' '))), Some(Action::ScrollPageDown));
        assert_eq!(map_key_to_action(key(KeyCode::Char('b'))), Some(Action::ScrollPageUp));
        assert_eq!(
            map_key_to_action(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            Some(Action::ScrollHalfPageDown)
        );
        assert_eq!(map_key_to_action(key(KeyCode::Char('G'))), Some(Action::ScrollToBottom));
        assert_eq!(map_key_to_action(key(KeyCode::Home)), Some(Action::ScrollToTop));
    }

    #[test]
    fn test_unbound_and_release_are_ignored() {
        assert_eq!(map_key_to_action(key(KeyCode::Char('x'))), None);
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key_to_action(release), None);
    }

    #[test]
    fn test_mouse_wheel() {
        assert_eq!(
            map_mouse_to_action(mouse(MouseEventKind::ScrollDown)),
            Some(Action::ScrollDown)
        );
        assert_eq!(
            map_mouse_to_action(mouse(MouseEventKind::Down(MouseButton::Left))),
            None
        );
    }
}

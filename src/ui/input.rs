/// Keyboard input: drains crossterm events once per frame and turns
/// fresh presses into `Action`s.
///
/// Only Press/Repeat events count. Release events (reported by terminals
/// with keyboard enhancement) are ignored, so every action is
/// edge-triggered on the press.

use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Everything the presentation layer can ask of the core.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    Confirm,
    Back,
    /// Rate the level on screen directly (digit keys).
    Rate(u8),
    HeartLeft,
    HeartRight,
    /// Move focus between the hearts and the continue button.
    FocusNext,
    /// Shortcut for the continue button.
    Advance,
    ToggleLoop,
    /// `q`: leaves the program from Title only.
    Exit,
    /// Ctrl+C: leaves the program from anywhere.
    Quit,
}

/// Map one key press to an action.
pub fn map_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Action::Quit),
            _ => None,
        };
    }
    match code {
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Confirm),
        KeyCode::Esc | KeyCode::Backspace => Some(Action::Back),
        KeyCode::Char(c @ '1'..='5') => Some(Action::Rate(c as u8 - b'0')),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Action::HeartLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::HeartRight),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => Some(Action::FocusNext),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(Action::Advance),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(Action::ToggleLoop),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Exit),
        _ => None,
    }
}

pub struct InputState {
    /// Raw key events collected during the last drain.
    pub raw_events: Vec<KeyEvent>,
}

impl InputState {
    pub fn new() -> Self {
        InputState { raw_events: Vec::with_capacity(8) }
    }

    /// Drain all pending terminal events without blocking.
    /// Call once per frame.
    pub fn drain_events(&mut self) {
        self.raw_events.clear();

        while poll(Duration::ZERO).unwrap_or(false) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                    self.raw_events.push(key);
                }
                Ok(_) => {}
                Err(e) => {
                    log::warn!("input read failed: {e}");
                    break;
                }
            }
        }
    }

    /// Actions from this frame's presses, in arrival order.
    pub fn actions(&self) -> Vec<Action> {
        self.raw_events
            .iter()
            .filter_map(|k| map_key(k.code, k.modifiers))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Option<Action> {
        map_key(code, KeyModifiers::NONE)
    }

    #[test]
    fn digits_rate_one_through_five() {
        for d in 1..=5u8 {
            assert_eq!(key(KeyCode::Char((b'0' + d) as char)), Some(Action::Rate(d)));
        }
        assert_eq!(key(KeyCode::Char('0')), None);
        assert_eq!(key(KeyCode::Char('6')), None);
    }

    #[test]
    fn ctrl_c_quits_and_masks_other_keys() {
        assert_eq!(map_key(KeyCode::Char('c'), KeyModifiers::CONTROL), Some(Action::Quit));
        assert_eq!(map_key(KeyCode::Char('m'), KeyModifiers::CONTROL), None);
    }

    #[test]
    fn navigation_keys() {
        assert_eq!(key(KeyCode::Enter), Some(Action::Confirm));
        assert_eq!(key(KeyCode::Esc), Some(Action::Back));
        assert_eq!(key(KeyCode::Left), Some(Action::HeartLeft));
        assert_eq!(key(KeyCode::Right), Some(Action::HeartRight));
        assert_eq!(key(KeyCode::Tab), Some(Action::FocusNext));
        assert_eq!(key(KeyCode::Char('n')), Some(Action::Advance));
        assert_eq!(key(KeyCode::Char('M')), Some(Action::ToggleLoop));
        assert_eq!(key(KeyCode::Char('q')), Some(Action::Exit));
    }

    #[test]
    fn actions_follow_event_order() {
        let mut input = InputState::new();
        input.raw_events.push(KeyEvent::new(KeyCode::Char('3'), KeyModifiers::NONE));
        input.raw_events.push(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        input.raw_events.push(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(input.actions(), vec![Action::Rate(3), Action::Confirm]);
    }
}

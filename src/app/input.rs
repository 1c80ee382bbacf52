//! Key bindings per phase

use crossterm::event::{KeyCode, KeyModifiers};

use crate::lesson::Phase;

/// Actions that can be taken in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,

    // Welcome
    EnableCamera,
    StartLesson,

    // Quiz navigation
    PrevQuestion,
    NextQuestion,
    PrevOption,
    NextOption,

    // Answering
    Choose(usize),
    ChooseHighlighted,
    Submit,

    // Results
    Retake,
    Home,
}

/// Map a key press to an action for the given phase
pub fn key_to_action(phase: Phase, key: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match key {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    if key == KeyCode::Char('q') {
        return Some(Action::Quit);
    }

    match phase {
        Phase::Welcome => match key {
            KeyCode::Char('c') => Some(Action::EnableCamera),
            KeyCode::Enter | KeyCode::Char('s') => Some(Action::StartLesson),
            _ => None,
        },
        // The lesson advances on its own
        Phase::Lesson => None,
        Phase::Quiz => quiz_key(key),
        Phase::Results => match key {
            KeyCode::Char('r') => Some(Action::Retake),
            KeyCode::Char('h') | KeyCode::Esc => Some(Action::Home),
            _ => None,
        },
    }
}

fn quiz_key(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => Some(Action::NextQuestion),
        KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => Some(Action::PrevQuestion),
        KeyCode::Char('h') | KeyCode::Left => Some(Action::PrevOption),
        KeyCode::Char('l') | KeyCode::Right => Some(Action::NextOption),
        KeyCode::Char(' ') => Some(Action::ChooseHighlighted),
        KeyCode::Char(c @ '1'..='4') => Some(Action::Choose(c as usize - '1' as usize)),
        KeyCode::Char(c @ 'a'..='d') => Some(Action::Choose(c as usize - 'a' as usize)),
        KeyCode::Enter => Some(Action::Submit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(phase: Phase, code: KeyCode) -> Option<Action> {
        key_to_action(phase, code, KeyModifiers::NONE)
    }

    #[test]
    fn q_quits_everywhere() {
        for phase in [Phase::Welcome, Phase::Lesson, Phase::Quiz, Phase::Results] {
            assert_eq!(key(phase, KeyCode::Char('q')), Some(Action::Quit));
        }
    }

    #[test]
    fn ctrl_c_quits() {
        assert_eq!(
            key_to_action(Phase::Lesson, KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(Action::Quit)
        );
    }

    #[test]
    fn welcome_bindings() {
        assert_eq!(key(Phase::Welcome, KeyCode::Char('c')), Some(Action::EnableCamera));
        assert_eq!(key(Phase::Welcome, KeyCode::Enter), Some(Action::StartLesson));
    }

    #[test]
    fn lesson_ignores_input() {
        assert_eq!(key(Phase::Lesson, KeyCode::Enter), None);
        assert_eq!(key(Phase::Lesson, KeyCode::Char('j')), None);
    }

    #[test]
    fn quiz_number_and_letter_keys_choose() {
        assert_eq!(key(Phase::Quiz, KeyCode::Char('1')), Some(Action::Choose(0)));
        assert_eq!(key(Phase::Quiz, KeyCode::Char('4')), Some(Action::Choose(3)));
        assert_eq!(key(Phase::Quiz, KeyCode::Char('b')), Some(Action::Choose(1)));
        assert_eq!(key(Phase::Quiz, KeyCode::Char('5')), None);
    }

    #[test]
    fn quiz_navigation() {
        assert_eq!(key(Phase::Quiz, KeyCode::Char('j')), Some(Action::NextQuestion));
        assert_eq!(key(Phase::Quiz, KeyCode::Up), Some(Action::PrevQuestion));
        assert_eq!(key(Phase::Quiz, KeyCode::Char('l')), Some(Action::NextOption));
        assert_eq!(key(Phase::Quiz, KeyCode::Char(' ')), Some(Action::ChooseHighlighted));
        assert_eq!(key(Phase::Quiz, KeyCode::Enter), Some(Action::Submit));
    }

    #[test]
    fn results_bindings() {
        assert_eq!(key(Phase::Results, KeyCode::Char('r')), Some(Action::Retake));
        assert_eq!(key(Phase::Results, KeyCode::Esc), Some(Action::Home));
    }
}

//! Matching configured key names against terminal key events.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Whether `key` matches a binding such as `"k"`, `"enter"`, `"space"` or `"ctrl+o"`.
pub fn matches(binding: &str, key: &KeyEvent) -> bool {
    let binding = binding.trim().to_ascii_lowercase();
    let (wants_ctrl, name) = match binding.strip_prefix("ctrl+") {
        Some(rest) => (true, rest),
        None => (false, binding.as_str()),
    };
    if wants_ctrl != key.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }

    match (name, key.code) {
        ("enter", KeyCode::Enter)
        | ("esc", KeyCode::Esc)
        | ("tab", KeyCode::Tab)
        | ("backspace", KeyCode::Backspace)
        | ("up", KeyCode::Up)
        | ("down", KeyCode::Down)
        | ("left", KeyCode::Left)
        | ("right", KeyCode::Right)
        | ("space", KeyCode::Char(' ')) => true,
        (name, KeyCode::Char(ch)) => {
            let mut chars = name.chars();
            matches!((chars.next(), chars.next()), (Some(c), None) if c == ch.to_ascii_lowercase())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn named_and_character_bindings() {
        assert!(matches("enter", &key(KeyCode::Enter)));
        assert!(matches("ESC", &key(KeyCode::Esc)));
        assert!(matches("space", &key(KeyCode::Char(' '))));
        assert!(matches("k", &key(KeyCode::Char('k'))));
        assert!(!matches("k", &key(KeyCode::Char('j'))));
        assert!(!matches("kk", &key(KeyCode::Char('k'))));
    }

    #[test]
    fn control_modifier_must_agree() {
        let ctrl_o = KeyEvent::new(KeyCode::Char('o'), KeyModifiers::CONTROL);
        assert!(matches("ctrl+o", &ctrl_o));
        assert!(!matches("o", &ctrl_o));
        assert!(!matches("ctrl+o", &key(KeyCode::Char('o'))));
    }
}

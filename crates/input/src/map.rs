//! Key mapping from terminal events to engine input.
//!
//! The layout follows the cross's physical keyboard, which is AZERTY: `q` moves left
//! and `z` rotates, with the QWERTY letters accepted as well.

use crate::types::InputEdge;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keys that act for as long as they are held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeldKey {
    Left,
    Right,
    Down,
}

/// What a key does in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    Held(HeldKey),
    Edge(InputEdge),
}

/// Map a key code to its role, if any.
pub fn map_key(code: KeyCode) -> Option<KeyRole> {
    match code {
        // Movement
        KeyCode::Left
        | KeyCode::Char('q')
        | KeyCode::Char('Q')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(KeyRole::Held(HeldKey::Left)),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(KeyRole::Held(HeldKey::Right))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(KeyRole::Held(HeldKey::Down))
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('z')
        | KeyCode::Char('Z')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(KeyRole::Edge(InputEdge::Rotate)),

        // Actions
        KeyCode::Enter => Some(KeyRole::Edge(InputEdge::Restart)),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(KeyRole::Edge(InputEdge::ForceGameOver)),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        assert_eq!(map_key(KeyCode::Left), Some(KeyRole::Held(HeldKey::Left)));
        assert_eq!(map_key(KeyCode::Right), Some(KeyRole::Held(HeldKey::Right)));
        assert_eq!(map_key(KeyCode::Down), Some(KeyRole::Held(HeldKey::Down)));

        assert_eq!(map_key(KeyCode::Char('q')), Some(KeyRole::Held(HeldKey::Left)));
        assert_eq!(map_key(KeyCode::Char('A')), Some(KeyRole::Held(HeldKey::Left)));
        assert_eq!(map_key(KeyCode::Char('d')), Some(KeyRole::Held(HeldKey::Right)));
        assert_eq!(map_key(KeyCode::Char('s')), Some(KeyRole::Held(HeldKey::Down)));
    }

    #[test]
    fn test_edge_keys() {
        assert_eq!(map_key(KeyCode::Up), Some(KeyRole::Edge(InputEdge::Rotate)));
        assert_eq!(map_key(KeyCode::Char('z')), Some(KeyRole::Edge(InputEdge::Rotate)));
        assert_eq!(map_key(KeyCode::Char('W')), Some(KeyRole::Edge(InputEdge::Rotate)));
        assert_eq!(map_key(KeyCode::Enter), Some(KeyRole::Edge(InputEdge::Restart)));
        assert_eq!(
            map_key(KeyCode::Char('r')),
            Some(KeyRole::Edge(InputEdge::ForceGameOver))
        );
        assert_eq!(map_key(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }
}

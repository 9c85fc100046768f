use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A position on the game grid, x grows to the right and y downwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// Lifecycle of an episode; `Won` and `Lost` are terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodeState {
    Running,
    Won,
    Lost,
}

impl EpisodeState {
    pub fn is_terminal(self) -> bool {
        self != EpisodeState::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
        assert_eq!(pos.moved_in_direction(Direction::Left), Position::new(4, 5));
    }

    #[test]
    fn test_terminal_states() {
        assert!(!EpisodeState::Running.is_terminal());
        assert!(EpisodeState::Won.is_terminal());
        assert!(EpisodeState::Lost.is_terminal());
    }
}

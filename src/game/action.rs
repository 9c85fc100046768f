use serde::{Deserialize, Serialize};

use crate::error::SnakeError;

/// Number of discrete actions a caller can choose from
pub const ACTION_COUNT: usize = 4;

/// Direction the snake can move, doubling as the action space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in action-index order
    pub const ALL: [Direction; ACTION_COUNT] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Map an action index (0: Up, 1: Down, 2: Left, 3: Right)
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Direction::Up),
            1 => Some(Direction::Down),
            2 => Some(Direction::Left),
            3 => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Returns the delta (dx, dy) for moving in this direction, y grows downwards
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Heading after a clockwise quarter turn
    pub fn turn_right(self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    /// Heading after a counter-clockwise quarter turn
    pub fn turn_left(self) -> Self {
        self.turn_right().opposite()
    }
}

impl TryFrom<i64> for Direction {
    type Error = SnakeError;

    fn try_from(index: i64) -> Result<Self, Self::Error> {
        Direction::from_index(index).ok_or(SnakeError::InvalidAction(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Up));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_turns() {
        assert_eq!(Direction::Up.turn_right(), Direction::Right);
        assert_eq!(Direction::Up.turn_left(), Direction::Left);
        assert_eq!(Direction::Left.turn_left(), Direction::Down);
        assert_eq!(Direction::Down.turn_right(), Direction::Left);

        for dir in Direction::ALL {
            assert_eq!(dir.turn_left().turn_right(), dir);
        }
    }

    #[test]
    fn test_index_mapping() {
        for (idx, dir) in Direction::ALL.iter().enumerate() {
            assert_eq!(dir.index(), idx);
            assert_eq!(Direction::from_index(idx as i64), Some(*dir));
        }
        assert_eq!(Direction::from_index(4), None);
        assert_eq!(Direction::from_index(-1), None);
    }

    #[test]
    fn test_try_from_rejects_out_of_range() {
        assert_eq!(Direction::try_from(2), Ok(Direction::Left));
        assert_eq!(Direction::try_from(7), Err(SnakeError::InvalidAction(7)));
    }
}

use thiserror::Error;

/// Errors produced by the snake world
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnakeError {
    /// The grid cannot hold the border plus the starting snake
    #[error("world size {size} is too small, need at least {min}")]
    WorldTooSmall { size: usize, min: usize },

    /// Positions are `i32` and the cell count must fit in memory
    #[error("world size {size} is too large, at most {max} is supported")]
    WorldTooLarge { size: usize, max: usize },

    /// Action index outside 0..=3
    #[error("invalid action {0}, expected 0 (up), 1 (down), 2 (left) or 3 (right)")]
    InvalidAction(i64),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The grid tags and the snake coordinate list disagree
    #[error("world state corrupted: {0}")]
    CorruptedWorld(String),
}

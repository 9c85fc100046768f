use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::grid::Grid;
use super::state::{EpisodeState, Position};

/// Length of the boolean feature vector
pub const FEATURE_COUNT: usize = 11;

/// Snapshot returned to the caller after `reset` and `step`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Cell codes column by column (index = x * size + y)
    pub world: Vec<u8>,
    pub snake_head: Position,
    pub snake_tail: Position,
    /// `None` once the board is full
    pub food: Option<Position>,
}

/// Full state for renderers and debugging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldInfo {
    pub grid: Grid,
    /// Snake coordinates, head first
    pub snake: Vec<Position>,
    pub food: Option<Position>,
    pub score: i32,
    pub frame_index: u64,
    pub state: EpisodeState,
}

/// Result of a single `step`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    pub observation: Observation,
    /// Score delta of this step: -1, 0 or +1
    pub reward: i32,
    pub terminated: bool,
    /// Always false, the core applies no time limit
    pub truncated: bool,
    pub info: WorldInfo,
}

/// Boolean feature view relative to the current heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Features {
    pub danger_straight: bool,
    pub danger_right: bool,
    pub danger_left: bool,
    pub heading_up: bool,
    pub heading_down: bool,
    pub heading_left: bool,
    pub heading_right: bool,
    pub food_left: bool,
    pub food_right: bool,
    pub food_above: bool,
    pub food_below: bool,
}

impl Features {
    /// Build the feature view from the head, heading, food and a collision check
    pub fn compute(
        head: Position,
        heading: Direction,
        food: Option<Position>,
        is_deadly: impl Fn(Position) -> bool,
    ) -> Self {
        let mut features = Features {
            danger_straight: is_deadly(head.moved_in_direction(heading)),
            danger_right: is_deadly(head.moved_in_direction(heading.turn_right())),
            danger_left: is_deadly(head.moved_in_direction(heading.turn_left())),
            heading_up: heading == Direction::Up,
            heading_down: heading == Direction::Down,
            heading_left: heading == Direction::Left,
            heading_right: heading == Direction::Right,
            ..Default::default()
        };

        if let Some(food) = food {
            features.food_left = food.x < head.x;
            features.food_right = food.x > head.x;
            features.food_above = food.y < head.y;
            features.food_below = food.y > head.y;
        }

        features
    }

    pub fn to_array(&self) -> [bool; FEATURE_COUNT] {
        [
            self.danger_straight,
            self.danger_right,
            self.danger_left,
            self.heading_up,
            self.heading_down,
            self.heading_left,
            self.heading_right,
            self.food_left,
            self.food_right,
            self.food_above,
            self.food_below,
        ]
    }

    /// Features as 0.0 / 1.0 values
    pub fn to_f32_vec(&self) -> Vec<f32> {
        self.to_array()
            .iter()
            .map(|&flag| if flag { 1.0 } else { 0.0 })
            .collect()
    }
}

use std::collections::VecDeque;
use std::fmt;

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use super::action::Direction;
use super::config::WorldConfig;
use super::grid::{Cell, Grid};
use super::observation::{Features, Observation, StepResult, WorldInfo};
use super::state::{EpisodeState, Position};
use crate::error::SnakeError;

/// Length of the snake at the start of every episode
pub const INITIAL_SNAKE_LENGTH: usize = 4;

/// The snake grid world
///
/// The grid holds the cell tags and the snake list holds the body order
/// (head first). During an episode both change together only through
/// `push_head` and `pop_tail`; `place_food` tags the grid alone and
/// `reset` rebuilds both from scratch.
pub struct SnakeWorld {
    config: WorldConfig,
    rng: Box<dyn RngCore + Send>,
    grid: Grid,
    snake: VecDeque<Position>,
    heading: Direction,
    food: Option<Position>,
    state: EpisodeState,
    score: i32,
    frame_index: u64,
    stall_frames: usize,
}

impl SnakeWorld {
    /// Create a world and start its first episode
    ///
    /// Food placement is seeded from `config.seed`, or from entropy when absent.
    pub fn new(config: WorldConfig) -> Result<Self, SnakeError> {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Create a world drawing food positions from the given generator
    pub fn with_rng<R>(config: WorldConfig, rng: R) -> Result<Self, SnakeError>
    where
        R: RngCore + Send + 'static,
    {
        config.validate()?;

        let mut world = Self {
            grid: Grid::new(config.world_size),
            config,
            rng: Box::new(rng),
            snake: VecDeque::new(),
            heading: Direction::Up,
            food: None,
            state: EpisodeState::Running,
            score: 0,
            frame_index: 0,
            stall_frames: 0,
        };
        world.reset(None);
        Ok(world)
    }

    /// Start a new episode
    ///
    /// A seed replaces the food generator with a fresh `ChaCha8Rng`;
    /// without one the current generator keeps its stream.
    pub fn reset(&mut self, seed: Option<u64>) -> (Observation, WorldInfo) {
        if let Some(seed) = seed {
            self.rng = Box::new(ChaCha8Rng::seed_from_u64(seed));
        }

        self.grid = Grid::new(self.config.world_size);
        self.snake.clear();
        self.food = None;
        self.heading = Direction::Up;
        self.state = EpisodeState::Running;
        self.score = 0;
        self.frame_index = 0;
        self.stall_frames = 0;

        // Head in the centre, body trailing downwards; pushed tail first
        let half = (self.config.world_size / 2) as i32;
        for offset in (0..INITIAL_SNAKE_LENGTH as i32).rev() {
            self.push_head(Position::new(half, half + offset));
        }

        if !self.place_food() {
            self.state = EpisodeState::Won;
        }

        (self.observation(), self.info())
    }

    /// Advance the simulation by one move
    ///
    /// Reversing into the body is absorbed as continuing straight. Once the
    /// episode is over the call changes nothing and reports a zero reward.
    pub fn step(&mut self, action: Direction) -> StepResult {
        if self.state.is_terminal() {
            return self.step_result(0);
        }

        let score_before = self.score;
        let direction = if action.is_opposite(self.heading) {
            self.heading
        } else {
            action
        };

        self.frame_index += 1;
        let next = self.head().moved_in_direction(direction);

        if self.is_deadly(next) {
            self.state = EpisodeState::Lost;
            debug!(
                score = self.score,
                frame_index = self.frame_index,
                length = self.snake.len(),
                "snake crashed"
            );
        } else if self.grid.get(next) == Some(Cell::Food) {
            self.food = None;
            self.push_head(next);
            self.heading = direction;
            self.score += 1;
            self.stall_frames = 0;

            if !self.place_food() {
                self.state = EpisodeState::Won;
                debug!(
                    score = self.score,
                    frame_index = self.frame_index,
                    "board filled"
                );
            }
        } else {
            self.pop_tail();
            self.push_head(next);
            self.heading = direction;
            self.stall_frames += 1;

            if self.stall_frames >= self.config.stall_limit() {
                self.score -= 1;
                self.stall_frames = 0;
                debug!(
                    score = self.score,
                    frame_index = self.frame_index,
                    "stall penalty applied"
                );
            }
        }

        self.step_result(self.score - score_before)
    }

    /// Step with an integer action (0: Up, 1: Down, 2: Left, 3: Right)
    pub fn step_index(&mut self, action: i64) -> Result<StepResult, SnakeError> {
        let direction = Direction::try_from(action)?;
        Ok(self.step(direction))
    }

    pub fn observation(&self) -> Observation {
        Observation {
            world: self.grid.cells().iter().map(|cell| cell.code()).collect(),
            snake_head: self.head(),
            snake_tail: self.tail(),
            food: self.food,
        }
    }

    pub fn info(&self) -> WorldInfo {
        WorldInfo {
            grid: self.grid.clone(),
            snake: self.snake.iter().copied().collect(),
            food: self.food,
            score: self.score,
            frame_index: self.frame_index,
            state: self.state,
        }
    }

    /// Danger, heading and food-direction flags for the current state
    pub fn features(&self) -> Features {
        Features::compute(self.head(), self.heading, self.food, |pos| {
            self.is_deadly(pos)
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Snake coordinates, head first
    pub fn snake(&self) -> &VecDeque<Position> {
        &self.snake
    }

    pub fn head(&self) -> Position {
        self.snake[0]
    }

    pub fn tail(&self) -> Position {
        self.snake[self.snake.len() - 1]
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn state(&self) -> EpisodeState {
        self.state
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    /// Moves accepted since the last reset
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// Plain moves since food was last eaten or the last stall penalty
    pub fn stall_frames(&self) -> usize {
        self.stall_frames
    }

    /// Check that the grid tags and the snake list describe the same snake
    pub fn verify_invariants(&self) -> Result<(), SnakeError> {
        let corrupted = |msg: String| Err(SnakeError::CorruptedWorld(msg));

        for (idx, &pos) in self.snake.iter().enumerate() {
            let expected = if idx == 0 {
                Cell::SnakeHead
            } else {
                Cell::SnakeBody
            };
            if self.grid.get(pos) != Some(expected) {
                return corrupted(format!(
                    "segment {idx} at ({}, {}) is tagged {:?}",
                    pos.x,
                    pos.y,
                    self.grid.get(pos)
                ));
            }
        }

        let heads = self.grid.count(Cell::SnakeHead);
        let bodies = self.grid.count(Cell::SnakeBody);
        if heads != 1 || heads + bodies != self.snake.len() {
            return corrupted(format!(
                "{heads} head and {bodies} body cells for a snake of length {}",
                self.snake.len()
            ));
        }

        let foods = self.grid.count(Cell::Food);
        match self.food {
            Some(food) if foods == 1 && self.grid.get(food) == Some(Cell::Food) => {}
            None if foods == 0 => {}
            _ => {
                return corrupted(format!(
                    "food {:?} does not match {foods} food cells",
                    self.food
                ));
            }
        }

        if self.state == EpisodeState::Running
            && self.food.is_none()
            && self.grid.count(Cell::Empty) > 0
        {
            return corrupted("running without food while empty cells remain".to_string());
        }

        Ok(())
    }

    /// Would moving the head onto `pos` end the episode
    ///
    /// The tail is not an obstacle since it vacates on a plain move, and the
    /// growing move only ever lands on food.
    fn is_deadly(&self, pos: Position) -> bool {
        match self.grid.get(pos) {
            None | Some(Cell::Wall) => true,
            Some(Cell::SnakeHead) | Some(Cell::SnakeBody) => pos != self.tail(),
            Some(Cell::Empty) | Some(Cell::Food) => false,
        }
    }

    fn push_head(&mut self, pos: Position) {
        if let Some(&old_head) = self.snake.front() {
            self.grid.set(old_head, Cell::SnakeBody);
        }
        self.grid.set(pos, Cell::SnakeHead);
        self.snake.push_front(pos);
    }

    fn pop_tail(&mut self) {
        if let Some(tail) = self.snake.pop_back() {
            self.grid.set(tail, Cell::Empty);
        }
    }

    /// Put food on the first empty cell at or after a random start index.
    /// Returns false when no empty cell is left.
    fn place_food(&mut self) -> bool {
        let start = self.rng.gen_range(0..self.config.cell_count());
        match self.grid.find_empty_from(start) {
            Some(pos) => {
                self.grid.set(pos, Cell::Food);
                self.food = Some(pos);
                trace!(x = pos.x, y = pos.y, start, "food placed");
                true
            }
            None => false,
        }
    }

    fn step_result(&self, reward: i32) -> StepResult {
        StepResult {
            observation: self.observation(),
            reward,
            terminated: self.state.is_terminal(),
            truncated: false,
            info: self.info(),
        }
    }
}

impl fmt::Debug for SnakeWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnakeWorld")
            .field("config", &self.config)
            .field("snake", &self.snake)
            .field("heading", &self.heading)
            .field("food", &self.food)
            .field("state", &self.state)
            .field("score", &self.score)
            .field("frame_index", &self.frame_index)
            .field("stall_frames", &self.stall_frames)
            .finish_non_exhaustive()
    }
}

//! Core simulation for the greedy snake world
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! An external agent drives it through `reset` and `step`.

pub mod action;
pub mod config;
pub mod grid;
pub mod observation;
pub mod state;
pub mod world;

// Re-export commonly used types
pub use action::{ACTION_COUNT, Direction};
pub use config::{MAX_WORLD_SIZE, MIN_WORLD_SIZE, RenderMode, WorldConfig};
pub use grid::{CELL_KINDS, Cell, Grid};
pub use observation::{FEATURE_COUNT, Features, Observation, StepResult, WorldInfo};
pub use state::{EpisodeState, Position};
pub use world::{INITIAL_SNAKE_LENGTH, SnakeWorld};

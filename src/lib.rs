//! Greedy Snake - a snake grid world for reinforcement learning
//!
//! This library provides:
//! - Core simulation (game module)
//! - Tensor observations and a gym-style environment (rl module)
//! - Rolling episode statistics (metrics module)
//! - A random-action driver (modes module)

pub mod error;
pub mod game;
pub mod metrics;
pub mod modes;
pub mod rl;

pub use error::SnakeError;
pub use game::{Direction, SnakeWorld, WorldConfig};

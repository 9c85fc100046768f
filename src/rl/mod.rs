//! Reinforcement learning adapter for the snake world
//!
//! Provides:
//! - Feature-vector observations (danger, heading, food direction)
//! - One-hot grid and stacked-frame tensors
//! - Burn-compatible RL environment interface

pub mod backend;
pub mod environment;
pub mod observation;

pub use backend::{InferenceBackend, default_device};
pub use environment::{EnvStep, SnakeEnvironment};
pub use observation::{FRAME_DEPTH, FrameStack, features_tensor, grid_tensor};

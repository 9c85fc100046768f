use burn::tensor::{Tensor, backend::Backend};

use super::observation::{FrameStack, features_tensor, grid_tensor};
use crate::error::SnakeError;
use crate::game::{SnakeWorld, WorldConfig, WorldInfo};

/// Tensor view of one environment step
#[derive(Debug, Clone)]
pub struct EnvStep<B: Backend> {
    /// Feature vector, shape [11]
    pub observation: Tensor<B, 1>,
    /// Score delta as a float: -1.0, 0.0 or 1.0
    pub reward: f32,
    pub terminated: bool,
    pub truncated: bool,
    pub info: WorldInfo,
}

/// Snake environment for reinforcement learning
///
/// Wraps the snake world and provides a Burn-compatible RL interface with:
/// - Feature-vector observations (danger, heading, food direction)
/// - Discrete action space (4 actions: Up, Down, Left, Right)
/// - Stacked grid frames for convolutional learners
pub struct SnakeEnvironment<B: Backend> {
    world: SnakeWorld,
    frames: FrameStack,
    device: B::Device,
}

impl<B: Backend> SnakeEnvironment<B> {
    /// Create a new Snake environment, failing if the config is invalid
    pub fn new(config: WorldConfig, device: B::Device) -> Result<Self, SnakeError> {
        Ok(Self::from_world(SnakeWorld::new(config)?, device))
    }

    /// Wrap an existing world, e.g. one built with an injected generator
    pub fn from_world(world: SnakeWorld, device: B::Device) -> Self {
        let frames = FrameStack::new(world.grid());
        Self {
            world,
            frames,
            device,
        }
    }

    /// Reset the environment and return the initial observation
    pub fn reset(&mut self, seed: Option<u64>) -> (Tensor<B, 1>, WorldInfo) {
        let (_, info) = self.world.reset(seed);
        self.frames.reset(self.world.grid());
        (self.get_observation(), info)
    }

    /// Step the environment with a discrete action
    ///
    /// Actions:
    /// - 0: Move Up
    /// - 1: Move Down
    /// - 2: Move Left
    /// - 3: Move Right
    ///
    /// Any other index is rejected with `SnakeError::InvalidAction`.
    pub fn step(&mut self, action_idx: i64) -> Result<EnvStep<B>, SnakeError> {
        let result = self.world.step_index(action_idx)?;
        self.frames.push(self.world.grid());

        Ok(EnvStep {
            observation: self.get_observation(),
            reward: result.reward as f32,
            terminated: result.terminated,
            truncated: result.truncated,
            info: result.info,
        })
    }

    /// Get current feature observation without stepping
    ///
    /// Returns: Tensor<B, 1> with shape [11]
    pub fn get_observation(&self) -> Tensor<B, 1> {
        features_tensor(&self.world.features(), &self.device)
    }

    /// Returns: Tensor<B, 3> with shape [5, size, size]
    pub fn grid_observation(&self) -> Tensor<B, 3> {
        grid_tensor(self.world.grid(), &self.device)
    }

    /// Returns: Tensor<B, 3> with shape [4, size, size]
    pub fn stacked_frames(&self) -> Tensor<B, 3> {
        self.frames.to_tensor(&self.device)
    }

    /// Get the device used by this environment
    pub fn device(&self) -> &B::Device {
        &self.device
    }

    /// Get reference to the underlying world (for testing/debugging)
    pub fn world(&self) -> &SnakeWorld {
        &self.world
    }
}

use std::collections::VecDeque;

use burn::tensor::{Tensor, TensorData, backend::Backend};

use crate::game::{CELL_KINDS, FEATURE_COUNT, Features, Grid};

/// Number of grids kept by a `FrameStack`
pub const FRAME_DEPTH: usize = 4;

/// Encode the boolean features as a 1D tensor of 0.0 / 1.0
///
/// Returns: Tensor<B, 1> with shape [11]
pub fn features_tensor<B: Backend>(features: &Features, device: &B::Device) -> Tensor<B, 1> {
    let data = TensorData::new(features.to_f32_vec(), [FEATURE_COUNT]);
    Tensor::<B, 1>::from_data(data, device)
}

/// One-hot encode every cell tag into its own channel
///
/// Channels follow `Cell::code`: empty, wall, food, head, body.
///
/// Returns: Tensor<B, 3> with shape [5, size, size], indexed `[channel, x, y]`
pub fn grid_tensor<B: Backend>(grid: &Grid, device: &B::Device) -> Tensor<B, 3> {
    let size = grid.size();
    let plane = size * size;
    let mut data = vec![0.0f32; CELL_KINDS * plane];

    for (idx, cell) in grid.cells().iter().enumerate() {
        data[cell.code() as usize * plane + idx] = 1.0;
    }

    Tensor::<B, 3>::from_data(TensorData::new(data, [CELL_KINDS, size, size]), device)
}

/// Grid with every cell scaled to `code / CELL_KINDS`
fn normalized_frame(grid: &Grid) -> Vec<f32> {
    grid.cells()
        .iter()
        .map(|cell| f32::from(cell.code()) / CELL_KINDS as f32)
        .collect()
}

/// The last `FRAME_DEPTH` grids, newest first
#[derive(Debug, Clone)]
pub struct FrameStack {
    size: usize,
    frames: VecDeque<Vec<f32>>,
}

impl FrameStack {
    /// Start a stack with every slot holding the same grid
    pub fn new(grid: &Grid) -> Self {
        let frame = normalized_frame(grid);
        Self {
            size: grid.size(),
            frames: std::iter::repeat(frame).take(FRAME_DEPTH).collect(),
        }
    }

    /// Refill every slot with the grid, used at episode start
    pub fn reset(&mut self, grid: &Grid) {
        *self = Self::new(grid);
    }

    /// Shift older frames back and make the grid the newest frame
    pub fn push(&mut self, grid: &Grid) {
        self.frames.pop_back();
        self.frames.push_front(normalized_frame(grid));
    }

    /// Returns: Tensor<B, 3> with shape [4, size, size], indexed `[frame, x, y]`
    pub fn to_tensor<B: Backend>(&self, device: &B::Device) -> Tensor<B, 3> {
        let data: Vec<f32> = self.frames.iter().flatten().copied().collect();
        Tensor::<B, 3>::from_data(
            TensorData::new(data, [FRAME_DEPTH, self.size, self.size]),
            device,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Direction, SnakeWorld, WorldConfig};
    use crate::rl::{InferenceBackend, default_device};

    fn world() -> SnakeWorld {
        SnakeWorld::new(WorldConfig::small().with_seed(5)).unwrap()
    }

    #[test]
    fn test_features_tensor() {
        let device = default_device();
        let world = world();

        let tensor = features_tensor::<InferenceBackend>(&world.features(), &device);
        assert_eq!(tensor.shape().dims, [FEATURE_COUNT]);

        let data = tensor.to_data();
        let values = data.as_slice::<f32>().unwrap();
        assert_eq!(values, world.features().to_f32_vec().as_slice());
    }

    #[test]
    fn test_grid_tensor_is_one_hot() {
        let device = default_device();
        let world = world();

        let tensor = grid_tensor::<InferenceBackend>(world.grid(), &device);
        assert_eq!(tensor.shape().dims, [CELL_KINDS, 10, 10]);

        let data = tensor.to_data();
        let values = data.as_slice::<f32>().unwrap();
        let sum: f32 = values.iter().sum();
        assert_eq!(sum, 100.0);

        // Head channel has exactly one hot cell, at the head
        let head = world.head();
        let plane = 100;
        let head_channel = &values[Cell::SnakeHead.code() as usize * plane..][..plane];
        assert_eq!(head_channel.iter().sum::<f32>(), 1.0);
        assert_eq!(head_channel[(head.x * 10 + head.y) as usize], 1.0);

        let wall_channel = &values[Cell::Wall.code() as usize * plane..][..plane];
        assert_eq!(wall_channel.iter().sum::<f32>(), 36.0);
    }

    #[test]
    fn test_frame_stack_starts_uniform() {
        let device = default_device();
        let world = world();

        let stack = FrameStack::new(world.grid());
        let tensor = stack.to_tensor::<InferenceBackend>(&device);
        assert_eq!(tensor.shape().dims, [FRAME_DEPTH, 10, 10]);

        let data = tensor.to_data();
        let values = data.as_slice::<f32>().unwrap();
        for frame in values.chunks(100) {
            assert_eq!(frame, &values[..100]);
        }
        assert!(values.iter().all(|&v| (0.0..1.0).contains(&v)));
    }

    #[test]
    fn test_frame_stack_shifts() {
        let device = default_device();
        let mut world = world();
        let mut stack = FrameStack::new(world.grid());
        let initial = normalized_frame(world.grid());

        world.step(Direction::Left);
        stack.push(world.grid());
        let moved = normalized_frame(world.grid());

        let tensor = stack.to_tensor::<InferenceBackend>(&device);
        let data = tensor.to_data();
        let values = data.as_slice::<f32>().unwrap();
        assert_eq!(&values[..100], moved.as_slice());
        assert_eq!(&values[100..200], initial.as_slice());
        assert_eq!(&values[300..], initial.as_slice());

        stack.reset(world.grid());
        let tensor = stack.to_tensor::<InferenceBackend>(&device);
        let data = tensor.to_data();
        let values = data.as_slice::<f32>().unwrap();
        assert_eq!(&values[300..], moved.as_slice());
    }
}

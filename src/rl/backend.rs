//! Backend type alias and device helper
//!
//! The snake world only produces observations, so a plain NdArray backend
//! is enough. Learners that need autodiff wrap their own backend around it.

use burn::backend::ndarray::{NdArray, NdArrayDevice};

/// Backend used for observation tensors (CPU)
pub type InferenceBackend = NdArray<f32>;

/// Get the default device for computation
pub fn default_device() -> NdArrayDevice {
    NdArrayDevice::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{SnakeWorld, WorldConfig};
    use crate::rl::grid_tensor;

    #[test]
    fn test_tensors_land_on_default_device() {
        let world = SnakeWorld::new(WorldConfig::small().with_seed(1)).unwrap();
        let tensor = grid_tensor::<InferenceBackend>(world.grid(), &default_device());

        assert_eq!(tensor.device(), default_device());
        assert_eq!(tensor.shape().dims, [5, 10, 10]);
    }
}

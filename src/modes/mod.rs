pub mod random;

pub use random::{RandomConfig, RandomMode};

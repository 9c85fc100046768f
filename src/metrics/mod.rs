pub mod episode_stats;

pub use episode_stats::{DEFAULT_WINDOW, EpisodeStats};

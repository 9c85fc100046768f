//! Random-action driver
//!
//! Plays whole episodes choosing uniformly random actions. It is the
//! simplest possible external agent and doubles as a smoke test of the
//! world under long runs.
//!
//! # Example
//!
//! ```rust
//! use greedy_snake::game::WorldConfig;
//! use greedy_snake::modes::{RandomConfig, RandomMode};
//!
//! let config = RandomConfig {
//!     episodes: 3,
//!     ..RandomConfig::new(WorldConfig::small().with_seed(1))
//! };
//! let mut mode = RandomMode::new(config).unwrap();
//! let stats = mode.run();
//! assert_eq!(stats.total_episodes(), 3);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::error::SnakeError;
use crate::game::{ACTION_COUNT, Direction, EpisodeState, SnakeWorld, WorldConfig};
use crate::metrics::{DEFAULT_WINDOW, EpisodeStats};

/// Configuration for the random driver
#[derive(Debug, Clone)]
pub struct RandomConfig {
    /// Number of episodes to play
    pub episodes: usize,

    /// Stop an episode after this many steps if it has not ended
    pub max_steps_per_episode: u64,

    /// Log progress every N episodes
    pub log_frequency: usize,

    /// World configuration; its seed also seeds the action sampler
    pub world_config: WorldConfig,
}

impl RandomConfig {
    pub fn new(world_config: WorldConfig) -> Self {
        Self {
            episodes: 100,
            max_steps_per_episode: 10_000,
            log_frequency: 10,
            world_config,
        }
    }
}

/// Plays episodes with uniformly random actions
pub struct RandomMode {
    world: SnakeWorld,
    action_rng: ChaCha8Rng,
    stats: EpisodeStats,
    config: RandomConfig,
}

impl RandomMode {
    pub fn new(config: RandomConfig) -> Result<Self, SnakeError> {
        let world = SnakeWorld::new(config.world_config.clone())?;
        let action_rng = match config.world_config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)),
            None => ChaCha8Rng::from_entropy(),
        };

        Ok(Self {
            world,
            action_rng,
            stats: EpisodeStats::new(DEFAULT_WINDOW),
            config,
        })
    }

    /// Play every configured episode and return the collected statistics
    pub fn run(&mut self) -> &EpisodeStats {
        info!(
            episodes = self.config.episodes,
            world_size = self.config.world_config.world_size,
            max_steps = self.config.max_steps_per_episode,
            "starting random play"
        );

        for episode in 0..self.config.episodes {
            let outcome = self.run_episode(episode);

            if self.config.log_frequency > 0 && (episode + 1) % self.config.log_frequency == 0 {
                info!(
                    episode = episode + 1,
                    last_outcome = ?outcome,
                    mean_reward = self.stats.mean_episode_reward(),
                    high_score = ?self.stats.high_score(),
                    "progress"
                );
            }
        }

        &self.stats
    }

    /// Play one episode and record it; returns how it ended
    fn run_episode(&mut self, episode: usize) -> EpisodeState {
        let seed = self
            .config
            .world_config
            .seed
            .map(|seed| seed.wrapping_add(episode as u64));
        self.world.reset(seed);

        let mut episode_reward = 0.0f32;
        let mut steps = 0u64;

        while steps < self.config.max_steps_per_episode {
            let action = Direction::ALL[self.action_rng.gen_range(0..ACTION_COUNT)];
            let result = self.world.step(action);

            episode_reward += result.reward as f32;
            steps += 1;

            if result.terminated {
                break;
            }
        }

        let outcome = self.world.state();
        debug!(
            episode,
            ?outcome,
            score = self.world.score(),
            steps,
            "episode finished"
        );
        self.stats
            .record_episode(episode_reward, steps, self.world.score(), outcome);
        outcome
    }

    pub fn world(&self) -> &SnakeWorld {
        &self.world
    }

    pub fn stats(&self) -> &EpisodeStats {
        &self.stats
    }
}

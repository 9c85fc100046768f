//! Episode statistics with rolling averages
//!
//! Tracks rewards, lengths and scores of finished episodes over a rolling
//! window, plus lifetime totals and outcome counts.

use std::collections::VecDeque;

use crate::game::EpisodeState;

/// Window used for the running averages unless told otherwise
pub const DEFAULT_WINDOW: usize = 100;

/// Statistics tracker with rolling averages
///
/// # Example
///
/// ```rust
/// use greedy_snake::game::EpisodeState;
/// use greedy_snake::metrics::EpisodeStats;
///
/// let mut stats = EpisodeStats::new(100);
/// stats.record_episode(3.0, 150, 3, EpisodeState::Lost);
///
/// assert_eq!(stats.total_episodes(), 1);
/// assert_eq!(stats.high_score(), Some(3));
/// ```
#[derive(Debug, Clone)]
pub struct EpisodeStats {
    /// Episode rewards (rolling window)
    episode_rewards: VecDeque<f32>,

    /// Episode lengths in frames (rolling window)
    episode_lengths: VecDeque<u64>,

    /// Final scores (rolling window)
    episode_scores: VecDeque<i32>,

    total_episodes: usize,
    total_steps: u64,
    wins: usize,
    losses: usize,
    high_score: Option<i32>,

    window_size: usize,
}

impl EpisodeStats {
    /// Create a tracker keeping the last `window_size` episodes
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(1);
        Self {
            episode_rewards: VecDeque::with_capacity(window_size),
            episode_lengths: VecDeque::with_capacity(window_size),
            episode_scores: VecDeque::with_capacity(window_size),
            total_episodes: 0,
            total_steps: 0,
            wins: 0,
            losses: 0,
            high_score: None,
            window_size,
        }
    }

    /// Record the end of an episode
    ///
    /// `outcome` is `Running` when the driver cut the episode short.
    pub fn record_episode(&mut self, reward: f32, length: u64, score: i32, outcome: EpisodeState) {
        Self::push_deque(&mut self.episode_rewards, reward, self.window_size);
        Self::push_deque(&mut self.episode_lengths, length, self.window_size);
        Self::push_deque(&mut self.episode_scores, score, self.window_size);

        self.total_episodes += 1;
        self.total_steps += length;
        match outcome {
            EpisodeState::Won => self.wins += 1,
            EpisodeState::Lost => self.losses += 1,
            EpisodeState::Running => {}
        }
        self.high_score = Some(self.high_score.map_or(score, |best| best.max(score)));
    }

    /// Mean episode reward over the rolling window, 0.0 when empty
    pub fn mean_episode_reward(&self) -> f32 {
        if self.episode_rewards.is_empty() {
            return 0.0;
        }
        self.episode_rewards.iter().sum::<f32>() / self.episode_rewards.len() as f32
    }

    pub fn mean_episode_length(&self) -> f32 {
        if self.episode_lengths.is_empty() {
            return 0.0;
        }
        self.episode_lengths.iter().sum::<u64>() as f32 / self.episode_lengths.len() as f32
    }

    pub fn mean_episode_score(&self) -> f32 {
        if self.episode_scores.is_empty() {
            return 0.0;
        }
        self.episode_scores.iter().sum::<i32>() as f32 / self.episode_scores.len() as f32
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    pub fn wins(&self) -> usize {
        self.wins
    }

    pub fn losses(&self) -> usize {
        self.losses
    }

    /// Episodes stopped by the driver before reaching a terminal state
    pub fn truncations(&self) -> usize {
        self.total_episodes - self.wins - self.losses
    }

    pub fn high_score(&self) -> Option<i32> {
        self.high_score
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Multi-line human readable summary
    pub fn format_summary(&self) -> String {
        format!(
            "Episodes: {} (won {}, lost {}, truncated {})\n\
             Total steps: {}\n\
             High score: {}\n\
             Mean reward (last {}): {:.2}\n\
             Mean score (last {}): {:.2}\n\
             Mean length (last {}): {:.1}",
            self.total_episodes,
            self.wins,
            self.losses,
            self.truncations(),
            self.total_steps,
            self.high_score
                .map_or_else(|| "-".to_string(), |score| score.to_string()),
            self.episode_rewards.len(),
            self.mean_episode_reward(),
            self.episode_scores.len(),
            self.mean_episode_score(),
            self.episode_lengths.len(),
            self.mean_episode_length(),
        )
    }

    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, max_size: usize) {
        if deque.len() >= max_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}

impl Default for EpisodeStats {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats() {
        let stats = EpisodeStats::default();
        assert_eq!(stats.window_size(), DEFAULT_WINDOW);
        assert_eq!(stats.mean_episode_reward(), 0.0);
        assert_eq!(stats.mean_episode_length(), 0.0);
        assert_eq!(stats.high_score(), None);
        assert!(stats.format_summary().contains("High score: -"));
    }

    #[test]
    fn test_outcome_counts() {
        let mut stats = EpisodeStats::new(10);
        stats.record_episode(2.0, 40, 2, EpisodeState::Lost);
        stats.record_episode(-1.0, 200, -1, EpisodeState::Running);
        stats.record_episode(49.0, 900, 49, EpisodeState::Won);

        assert_eq!(stats.total_episodes(), 3);
        assert_eq!(stats.total_steps(), 1140);
        assert_eq!(stats.wins(), 1);
        assert_eq!(stats.losses(), 1);
        assert_eq!(stats.truncations(), 1);
        assert_eq!(stats.high_score(), Some(49));
    }

    #[test]
    fn test_high_score_can_be_negative() {
        let mut stats = EpisodeStats::new(10);
        stats.record_episode(-2.0, 500, -2, EpisodeState::Lost);
        assert_eq!(stats.high_score(), Some(-2));

        stats.record_episode(-5.0, 900, -5, EpisodeState::Lost);
        assert_eq!(stats.high_score(), Some(-2));
    }

    #[test]
    fn test_rolling_window() {
        let mut stats = EpisodeStats::new(3);
        for score in 1..=5 {
            stats.record_episode(score as f32, 10 * score as u64, score, EpisodeState::Lost);
        }

        // Only 3, 4 and 5 remain in the window
        assert!((stats.mean_episode_reward() - 4.0).abs() < 1e-5);
        assert!((stats.mean_episode_score() - 4.0).abs() < 1e-5);
        assert!((stats.mean_episode_length() - 40.0).abs() < 1e-5);
        assert_eq!(stats.total_episodes(), 5);
        assert_eq!(stats.total_steps(), 150);
    }

    #[test]
    fn test_summary_mentions_totals() {
        let mut stats = EpisodeStats::new(5);
        stats.record_episode(1.0, 12, 1, EpisodeState::Lost);

        let summary = stats.format_summary();
        assert!(summary.contains("Episodes: 1 (won 0, lost 1, truncated 0)"));
        assert!(summary.contains("Total steps: 12"));
        assert!(summary.contains("High score: 1"));
    }
}

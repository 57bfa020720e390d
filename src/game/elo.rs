use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;

pub const DEFAULT_K_FACTOR: i32 = 32;
pub const DEFAULT_SCALE: i32 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EloResult {
    pub winner_rating: i32,
    pub loser_rating: i32,
    pub winner_change: i32,
    pub loser_change: i32,
}

/// Two-player rating update. Changes are whole points and always sum to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EloCalculator {
    k_factor: i32,
    scale: i32,
}

impl Default for EloCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_K_FACTOR, DEFAULT_SCALE)
    }
}

impl EloCalculator {
    pub fn new(k_factor: i32, scale: i32) -> Self {
        Self { k_factor, scale }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.elo_k_factor, config.elo_scale)
    }

    /// Probability that a player rated `rating` beats one rated `opponent`
    pub fn expected_score(&self, rating: i32, opponent: i32) -> f64 {
        1.0 / (1.0 + 10f64.powf((opponent - rating) as f64 / self.scale as f64))
    }

    pub fn calculate(&self, winner_rating: i32, loser_rating: i32) -> EloResult {
        self.adjust(winner_rating, loser_rating, 1.0)
    }

    /// Ratings after a drawn game; `first` plays the winner's role in the result
    pub fn calculate_draw(&self, first: i32, second: i32) -> EloResult {
        self.adjust(first, second, 0.5)
    }

    fn adjust(&self, first: i32, second: i32, actual: f64) -> EloResult {
        let expected = self.expected_score(first, second);
        let change = (self.k_factor as f64 * (actual - expected)).round() as i32;

        EloResult {
            winner_rating: first + change,
            loser_rating: second - change,
            winner_change: change,
            loser_change: -change,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_ratings() {
        let result = EloCalculator::default().calculate(1200, 1200);
        assert_eq!(result.winner_rating, 1216);
        assert_eq!(result.loser_rating, 1184);
        assert_eq!(result.winner_change, 16);
        assert_eq!(result.loser_change, -16);
    }

    #[test]
    fn test_upset_moves_more_points() {
        let elo = EloCalculator::default();
        let favourite = elo.calculate(1600, 1200);
        let upset = elo.calculate(1200, 1600);
        assert!(upset.winner_change > favourite.winner_change);
        assert_eq!(favourite.winner_change, 3);
        assert_eq!(upset.winner_change, 29);
    }

    #[test]
    fn test_draw_between_equals_changes_nothing() {
        let result = EloCalculator::default().calculate_draw(1500, 1500);
        assert_eq!(result.winner_change, 0);
        assert_eq!(result.loser_rating, 1500);
    }

    #[test]
    fn test_changes_are_zero_sum() {
        let elo = EloCalculator::default();
        for a in (800..=2400).step_by(137) {
            for b in (800..=2400).step_by(211) {
                let r = elo.calculate(a, b);
                assert_eq!(r.winner_change + r.loser_change, 0);
                assert_eq!(r.winner_rating + r.loser_rating, a + b);
            }
        }
    }

    #[test]
    fn test_config_drives_k_factor() {
        let config = EngineConfig {
            elo_k_factor: 16,
            ..EngineConfig::default()
        };
        let result = EloCalculator::from_config(&config).calculate(1200, 1200);
        assert_eq!(result.winner_change, 8);
        assert_eq!(result.loser_rating, 1192);
    }
}

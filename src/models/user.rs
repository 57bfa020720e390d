use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Persisted per-user counters read by achievement predicates.
///
/// The host keeps these up to date after each game; predicates add the
/// outcome of the game being evaluated on top of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStatistics {
    pub user_id: i64,
    pub username: String,
    pub total_games: i32,
    pub total_wins: i32,
    pub total_score: i64,
    pub total_words_played: i32,
    pub highest_word_score: i32,
    pub highest_word: Option<String>,
    /// Wins in a row before the game being evaluated
    pub current_win_streak: i32,
    pub longest_win_streak: i32,
    /// Consecutive calendar days with at least one game, including the latest
    pub consecutive_days_played: i32,
    pub last_played_on: Option<NaiveDate>,
    /// Ids of per-user achievements already unlocked
    pub unlocked_achievements: HashSet<String>,
}

impl UserStatistics {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            ..Default::default()
        }
    }

    pub fn has_unlocked(&self, achievement_id: &str) -> bool {
        self.unlocked_achievements.contains(achievement_id)
    }

    pub fn win_rate(&self) -> f32 {
        if self.total_games == 0 {
            0.0
        } else {
            (self.total_wins as f32 / self.total_games as f32) * 100.0
        }
    }

    /// Update the day streak for a game played on `day`
    pub fn record_play_day(&mut self, day: NaiveDate) {
        self.consecutive_days_played = match self.last_played_on {
            Some(last) if last == day => self.consecutive_days_played.max(1),
            Some(last) if last.succ_opt() == Some(day) => self.consecutive_days_played + 1,
            _ => 1,
        };
        self.last_played_on = Some(day);
    }
}

/// Read access to the statistics read model
pub trait StatisticsSource {
    fn user_statistics(&self, user_id: i64) -> Option<UserStatistics>;

    fn statistics_or_default(&self, user_id: i64) -> UserStatistics {
        self.user_statistics(user_id)
            .unwrap_or_else(|| UserStatistics::new(user_id))
    }
}

impl StatisticsSource for HashMap<i64, UserStatistics> {
    fn user_statistics(&self, user_id: i64) -> Option<UserStatistics> {
        self.get(&user_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_win_rate() {
        let mut stats = UserStatistics::new(1);
        assert_eq!(stats.win_rate(), 0.0);
        stats.total_games = 4;
        stats.total_wins = 1;
        assert_eq!(stats.win_rate(), 25.0);
    }

    #[test]
    fn test_day_streak() {
        let mut stats = UserStatistics::new(1);
        stats.record_play_day(day(1));
        stats.record_play_day(day(1));
        stats.record_play_day(day(2));
        assert_eq!(stats.consecutive_days_played, 2);

        stats.record_play_day(day(5));
        assert_eq!(stats.consecutive_days_played, 1);
    }

    #[test]
    fn test_statistics_source_default() {
        let source: HashMap<i64, UserStatistics> = HashMap::new();
        assert_eq!(source.statistics_or_default(9).user_id, 9);
    }
}

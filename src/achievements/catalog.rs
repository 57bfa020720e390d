use serde_json::{json, Value};
use std::collections::HashMap;

use crate::{
    achievements::{Achievement, GameEndAchievement, MoveAchievement},
    game::ScoringResult,
    models::{
        AchievementCategory, AchievementContext, AchievementDefinition, AchievementScope, Game,
        GameStatus, Move, MoveType, UserStatistics,
    },
};

fn context(value: Value) -> AchievementContext {
    match value {
        Value::Object(map) => map,
        _ => AchievementContext::new(),
    }
}

fn won(user: &UserStatistics, game: &Game) -> bool {
    game.status == GameStatus::Finished && game.winner == Some(user.user_id)
}

macro_rules! definition {
    (
        $name:ident,
        $id:literal,
        $title:literal,
        $description:literal,
        $icon:literal,
        $category:ident,
        $scope:ident $(,)?
    ) => {
        static $name: AchievementDefinition = AchievementDefinition {
            id: $id,
            name: $title,
            description: $description,
            icon: $icon,
            category: AchievementCategory::$category,
            scope: AchievementScope::$scope,
        };
    };
}

definition!(
    FIRST_WIN,
    "first_win",
    "First Victory",
    "Win your first game",
    "trophy",
    Milestone,
    PerUser,
);
definition!(VETERAN, "veteran", "Veteran", "Win 10 games", "medal", Milestone, PerUser);
definition!(WORDSMITH, "wordsmith", "Wordsmith", "Play 100 words", "quill", Milestone, PerUser);
definition!(
    HOT_STREAK,
    "hot_streak",
    "Hot Streak",
    "Win 3 games in a row",
    "flame",
    Streak,
    PerUser,
);
definition!(
    DAILY_PLAYER,
    "daily_player",
    "Daily Player",
    "Play on 7 consecutive days",
    "calendar",
    Streak,
    PerUser,
);
definition!(
    LONG_WORD,
    "long_word",
    "Long Word",
    "Play a word of 7 or more letters",
    "ruler",
    Skill,
    PerUser,
);
definition!(
    BIG_MOVE,
    "big_move",
    "Big Move",
    "Score 50 points in a single move",
    "rocket",
    Skill,
    PerUser,
);
definition!(
    BINGO,
    "bingo",
    "Bingo!",
    "Use all seven tiles in one move",
    "sparkles",
    Skill,
    PerUser,
);
definition!(
    RARE_WORD,
    "rare_word",
    "Lexicographer",
    "Play a rarely used word",
    "book",
    Vocabulary,
    PerUser,
);
definition!(
    HIGH_SCORER,
    "high_scorer",
    "High Scorer",
    "Finish a game with 400 points",
    "crown",
    Skill,
    PerGame,
);

pub struct FirstWinAchievement;

impl Achievement for FirstWinAchievement {
    fn definition(&self) -> &AchievementDefinition {
        &FIRST_WIN
    }
}

impl GameEndAchievement for FirstWinAchievement {
    fn check_game_end(&self, user: &UserStatistics, game: &Game) -> Option<AchievementContext> {
        (won(user, game) && user.total_wins == 0)
            .then(|| context(json!({ "game_id": game.game_id })))
    }
}

/// Cumulative wins, counting the game just finished
pub struct VeteranAchievement {
    wins: i32,
}

impl VeteranAchievement {
    pub fn new(wins: i32) -> Self {
        Self { wins }
    }
}

impl Achievement for VeteranAchievement {
    fn definition(&self) -> &AchievementDefinition {
        &VETERAN
    }
}

impl GameEndAchievement for VeteranAchievement {
    fn check_game_end(&self, user: &UserStatistics, game: &Game) -> Option<AchievementContext> {
        if !won(user, game) {
            return None;
        }
        let total = user.total_wins + 1;
        (total >= self.wins).then(|| context(json!({ "total_wins": total })))
    }
}

/// Words played across all games, including every word of this game so far
pub struct WordsmithAchievement {
    words: i32,
}

impl WordsmithAchievement {
    pub fn new(words: i32) -> Self {
        Self { words }
    }
}

impl Achievement for WordsmithAchievement {
    fn definition(&self) -> &AchievementDefinition {
        &WORDSMITH
    }
}

impl MoveAchievement for WordsmithAchievement {
    fn check_move(
        &self,
        user: &UserStatistics,
        mv: &Move,
        game: &Game,
        _scoring: Option<&ScoringResult>,
    ) -> Option<AchievementContext> {
        if mv.move_type != MoveType::Play {
            return None;
        }
        let this_game = game
            .moves
            .iter()
            .filter(|m| m.user_id == user.user_id)
            .map(|m| m.words.len() as i32)
            .sum::<i32>();
        let total = user.total_words_played + this_game;
        (total >= self.words).then(|| context(json!({ "total_words": total })))
    }
}

pub struct HotStreakAchievement {
    streak: i32,
}

impl HotStreakAchievement {
    pub fn new(streak: i32) -> Self {
        Self { streak }
    }
}

impl Achievement for HotStreakAchievement {
    fn definition(&self) -> &AchievementDefinition {
        &HOT_STREAK
    }
}

impl GameEndAchievement for HotStreakAchievement {
    fn check_game_end(&self, user: &UserStatistics, game: &Game) -> Option<AchievementContext> {
        if !won(user, game) {
            return None;
        }
        let streak = user.current_win_streak + 1;
        (streak >= self.streak).then(|| context(json!({ "streak": streak })))
    }
}

/// Day streak as recorded by the host, which counts today's game
pub struct DailyPlayerAchievement {
    days: i32,
}

impl DailyPlayerAchievement {
    pub fn new(days: i32) -> Self {
        Self { days }
    }
}

impl Achievement for DailyPlayerAchievement {
    fn definition(&self) -> &AchievementDefinition {
        &DAILY_PLAYER
    }
}

impl GameEndAchievement for DailyPlayerAchievement {
    fn check_game_end(&self, user: &UserStatistics, _game: &Game) -> Option<AchievementContext> {
        (user.consecutive_days_played >= self.days).then(|| {
            context(json!({
                "days": user.consecutive_days_played,
                "last_played_on": user.last_played_on,
            }))
        })
    }
}

pub struct LongWordAchievement {
    min_letters: usize,
}

impl LongWordAchievement {
    pub fn new(min_letters: usize) -> Self {
        Self { min_letters }
    }
}

impl Achievement for LongWordAchievement {
    fn definition(&self) -> &AchievementDefinition {
        &LONG_WORD
    }
}

impl MoveAchievement for LongWordAchievement {
    fn check_move(
        &self,
        _user: &UserStatistics,
        mv: &Move,
        _game: &Game,
        _scoring: Option<&ScoringResult>,
    ) -> Option<AchievementContext> {
        mv.words
            .iter()
            .filter(|w| w.chars().count() >= self.min_letters)
            .max_by_key(|w| w.chars().count())
            .map(|word| context(json!({ "word": word, "length": word.chars().count() })))
    }
}

pub struct BigMoveAchievement {
    points: i32,
}

impl BigMoveAchievement {
    pub fn new(points: i32) -> Self {
        Self { points }
    }
}

impl Achievement for BigMoveAchievement {
    fn definition(&self) -> &AchievementDefinition {
        &BIG_MOVE
    }
}

impl MoveAchievement for BigMoveAchievement {
    fn check_move(
        &self,
        _user: &UserStatistics,
        mv: &Move,
        _game: &Game,
        _scoring: Option<&ScoringResult>,
    ) -> Option<AchievementContext> {
        (mv.move_type == MoveType::Play && mv.score >= self.points)
            .then(|| context(json!({ "score": mv.score, "words": mv.words })))
    }
}

pub struct BingoAchievement;

impl Achievement for BingoAchievement {
    fn definition(&self) -> &AchievementDefinition {
        &BINGO
    }
}

impl MoveAchievement for BingoAchievement {
    fn check_move(
        &self,
        _user: &UserStatistics,
        mv: &Move,
        _game: &Game,
        scoring: Option<&ScoringResult>,
    ) -> Option<AchievementContext> {
        let scoring = scoring?;
        scoring.is_bingo().then(|| {
            context(json!({
                "bonus": scoring.bingo_bonus,
                "score": mv.score,
                "words": mv.words,
            }))
        })
    }
}

/// A played word whose corpus frequency is at or below `max_frequency`.
/// Words missing from the corpus are not judged.
pub struct RareWordAchievement {
    frequencies: HashMap<String, u64>,
    max_frequency: u64,
}

impl RareWordAchievement {
    pub fn new(frequencies: HashMap<String, u64>, max_frequency: u64) -> Self {
        let frequencies = frequencies
            .into_iter()
            .map(|(word, count)| (word.to_uppercase(), count))
            .collect();
        Self {
            frequencies,
            max_frequency,
        }
    }
}

impl Achievement for RareWordAchievement {
    fn definition(&self) -> &AchievementDefinition {
        &RARE_WORD
    }
}

impl MoveAchievement for RareWordAchievement {
    fn check_move(
        &self,
        _user: &UserStatistics,
        mv: &Move,
        _game: &Game,
        _scoring: Option<&ScoringResult>,
    ) -> Option<AchievementContext> {
        mv.words
            .iter()
            .filter_map(|w| self.frequencies.get(w.as_str()).map(|&f| (w, f)))
            .filter(|&(_, f)| f <= self.max_frequency)
            .min_by_key(|&(_, f)| f)
            .map(|(word, frequency)| context(json!({ "word": word, "frequency": frequency })))
    }
}

/// Final score threshold, recorded once per game
pub struct HighScorerAchievement {
    points: i32,
}

impl HighScorerAchievement {
    pub fn new(points: i32) -> Self {
        Self { points }
    }
}

impl Achievement for HighScorerAchievement {
    fn definition(&self) -> &AchievementDefinition {
        &HIGH_SCORER
    }
}

impl GameEndAchievement for HighScorerAchievement {
    fn check_game_end(&self, user: &UserStatistics, game: &Game) -> Option<AchievementContext> {
        let score = game.score_of(user.user_id)?;
        (score >= self.points).then(|| context(json!({ "score": score })))
    }
}

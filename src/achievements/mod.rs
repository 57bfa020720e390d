//! Achievement orchestration. Each achievement is an opaque predicate over a
//! move or a finished game; the registry decides which ones to run and which
//! are already unlocked.

pub mod catalog;

use std::{collections::HashMap, sync::Arc};
use uuid::Uuid;

use crate::{
    game::ScoringResult,
    models::{
        AchievementContext, AchievementDefinition, AchievementScope, Game, Move,
        UnlockedAchievement, UserStatistics,
    },
};

pub use catalog::{
    BigMoveAchievement, BingoAchievement, DailyPlayerAchievement, FirstWinAchievement,
    HighScorerAchievement, HotStreakAchievement, LongWordAchievement, RareWordAchievement,
    VeteranAchievement, WordsmithAchievement,
};

pub trait Achievement: Send + Sync {
    fn definition(&self) -> &AchievementDefinition;
}

/// Checked after every accepted move by the acting player
pub trait MoveAchievement: Achievement {
    fn check_move(
        &self,
        user: &UserStatistics,
        mv: &Move,
        game: &Game,
        scoring: Option<&ScoringResult>,
    ) -> Option<AchievementContext>;
}

/// Checked for every seated player once the game finishes
pub trait GameEndAchievement: Achievement {
    fn check_game_end(&self, user: &UserStatistics, game: &Game) -> Option<AchievementContext>;
}

#[derive(Debug, Clone, Copy)]
pub enum Trigger<'a> {
    Move {
        mv: &'a Move,
        game: &'a Game,
        scoring: Option<&'a ScoringResult>,
    },
    GameEnd {
        game: &'a Game,
    },
}

impl Trigger<'_> {
    fn game(&self) -> &Game {
        match self {
            Trigger::Move { game, .. } | Trigger::GameEnd { game } => game,
        }
    }
}

/// Key under which a per-game achievement is recorded in the statistics read model
pub fn game_scoped_key(achievement_id: &str, game_id: Uuid) -> String {
    format!("{}:{}", achievement_id, game_id)
}

/// Catalog split by trigger at registration time
#[derive(Default, Clone)]
pub struct AchievementRegistry {
    definitions: HashMap<&'static str, AchievementDefinition>,
    move_triggered: Vec<Arc<dyn MoveAchievement>>,
    game_end_triggered: Vec<Arc<dyn GameEndAchievement>>,
}

impl AchievementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in catalog, minus the corpus-backed rare word trophy
    pub fn standard() -> Self {
        Self::new()
            .with_game_end(FirstWinAchievement)
            .with_game_end(VeteranAchievement::new(10))
            .with_game_end(HotStreakAchievement::new(3))
            .with_game_end(DailyPlayerAchievement::new(7))
            .with_game_end(HighScorerAchievement::new(400))
            .with_move(WordsmithAchievement::new(100))
            .with_move(LongWordAchievement::new(7))
            .with_move(BigMoveAchievement::new(50))
            .with_move(BingoAchievement)
    }

    pub fn with_move(mut self, achievement: impl MoveAchievement + 'static) -> Self {
        self.remember(achievement.definition());
        self.move_triggered.push(Arc::new(achievement));
        self
    }

    pub fn with_game_end(mut self, achievement: impl GameEndAchievement + 'static) -> Self {
        self.remember(achievement.definition());
        self.game_end_triggered.push(Arc::new(achievement));
        self
    }

    /// Register an achievement under both triggers
    pub fn with_both<A>(mut self, achievement: A) -> Self
    where
        A: MoveAchievement + GameEndAchievement + 'static,
    {
        self.remember(achievement.definition());
        let shared = Arc::new(achievement);
        self.move_triggered.push(shared.clone());
        self.game_end_triggered.push(shared);
        self
    }

    fn remember(&mut self, definition: &AchievementDefinition) {
        self.definitions.insert(definition.id, definition.clone());
    }

    pub fn definition(&self, id: &str) -> Option<&AchievementDefinition> {
        self.definitions.get(id)
    }

    pub fn definitions(&self) -> impl Iterator<Item = &AchievementDefinition> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Run every achievement registered for `trigger` and return the new unlocks
    pub fn evaluate(
        &self,
        user: &UserStatistics,
        trigger: Trigger<'_>,
    ) -> Vec<UnlockedAchievement> {
        let game = trigger.game();

        let candidates: Vec<(&AchievementDefinition, Option<AchievementContext>)> = match trigger {
            Trigger::Move { mv, game, scoring } => self
                .move_triggered
                .iter()
                .filter(|a| !Self::already_unlocked(a.definition(), user, game.game_id))
                .map(|a| (a.definition(), a.check_move(user, mv, game, scoring)))
                .collect(),
            Trigger::GameEnd { game } => self
                .game_end_triggered
                .iter()
                .filter(|a| !Self::already_unlocked(a.definition(), user, game.game_id))
                .map(|a| (a.definition(), a.check_game_end(user, game)))
                .collect(),
        };

        candidates
            .into_iter()
            .filter_map(|(definition, context)| {
                let context = context?;
                tracing::info!(
                    "User {} unlocked achievement {} in game {}",
                    user.user_id,
                    definition.id,
                    game.game_id
                );
                Some(UnlockedAchievement {
                    achievement_id: definition.id.to_string(),
                    user_id: user.user_id,
                    game_id: match definition.scope {
                        AchievementScope::PerGame => Some(game.game_id),
                        AchievementScope::PerUser => None,
                    },
                    context,
                })
            })
            .collect()
    }

    fn already_unlocked(
        definition: &AchievementDefinition,
        user: &UserStatistics,
        game_id: Uuid,
    ) -> bool {
        match definition.scope {
            AchievementScope::PerUser => user.has_unlocked(definition.id),
            AchievementScope::PerGame => {
                user.has_unlocked(&game_scoped_key(definition.id, game_id))
            }
        }
    }
}

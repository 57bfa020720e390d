use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementCategory {
    Milestone,
    Streak,
    Skill,
    Vocabulary,
}

/// Whether an achievement unlocks once per user or once per user and game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementScope {
    PerUser,
    PerGame,
}

/// Static catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AchievementDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: AchievementCategory,
    pub scope: AchievementScope,
}

/// Key-value data explaining why an achievement unlocked
pub type AchievementContext = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlockedAchievement {
    pub achievement_id: String,
    pub user_id: i64,
    /// Set for per-game achievements, the secondary uniqueness key
    pub game_id: Option<Uuid>,
    pub context: AchievementContext,
}

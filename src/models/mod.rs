pub mod achievement;
pub mod game;
pub mod tile;
pub mod user;

pub use achievement::{
    AchievementCategory, AchievementContext, AchievementDefinition, AchievementScope,
    UnlockedAchievement,
};
pub use game::{
    // Aggregate
    Game, GamePlayer, GameStatus, Move, MoveType, Rack, RACK_SIZE,
    // Board squares
    Square, SquareType,
};
pub use tile::{Language, PlacedTile, Position, Tile, BLANK_LETTER};
pub use user::{StatisticsSource, UserStatistics};

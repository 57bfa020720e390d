//! Rules and scoring engine for a multiplayer crossword tile game.
//!
//! The host owns persistence and transport. It hands a [`Game`] and a
//! [`PlayerAction`] to [`GameStateMachine::apply`] and persists whatever comes back.

pub mod achievements;
pub mod config;
pub mod dictionary;
pub mod error;
pub mod game;
pub mod logging;
pub mod models;
pub mod rules;
pub mod utils;

pub use achievements::{AchievementRegistry, GameEndAchievement, MoveAchievement, Trigger};
pub use config::EngineConfig;
pub use dictionary::{Dictionary, WordOracle};
pub use error::GameError;
pub use game::{
    ActionOutcome, Board, Collaborators, EloCalculator, GameOverSummary, GameStateMachine,
    PlayerAction, Scorer, ScoringResult, TileBag, TileSet,
};
pub use models::{Game, Language, Move, MoveType, PlacedTile, Tile, UserStatistics};
pub use rules::{RuleEngine, RuleResult};

// Board, scoring and turn orchestration

pub mod board;
pub mod elo;
pub mod scorer;
pub mod state_machine;
pub mod tile_bag;
pub mod tileset;

#[cfg(test)]
mod tests_props;

pub use board::{Board, FormedWord, BOARD_SIZE, CENTER};
pub use elo::{EloCalculator, EloResult};
pub use scorer::{AppliedMultiplier, Scorer, ScoringResult, WordScore, BINGO_BONUS};
pub use state_machine::{
    ActionOutcome, Collaborators, GameOverSummary, GameStateMachine, PlayerAction, PlayerScore,
};
pub use tile_bag::TileBag;
pub use tileset::TileSet;

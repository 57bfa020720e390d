use crate::{
    models::Game,
    rules::{derive_identifier, END_GAME_CATEGORY},
};

/// Polled after every accepted action
pub trait EndGameRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn identifier(&self) -> String {
        derive_identifier(END_GAME_CATEGORY, self.name())
    }

    fn should_end_game(&self, game: &Game) -> bool;
}

/// The bag is empty and someone has played out their rack
pub struct TilesExhaustedRule;

impl EndGameRule for TilesExhaustedRule {
    fn name(&self) -> &'static str {
        "TilesExhaustedRule"
    }

    fn should_end_game(&self, game: &Game) -> bool {
        game.tile_bag.is_empty() && game.active_players().any(|p| p.rack.is_empty())
    }
}

/// Every remaining player passed `passes_per_player` times in a row
pub struct ConsecutivePassesRule {
    passes_per_player: u32,
}

impl ConsecutivePassesRule {
    pub fn new(passes_per_player: u32) -> Self {
        Self { passes_per_player }
    }
}

impl EndGameRule for ConsecutivePassesRule {
    fn name(&self) -> &'static str {
        "ConsecutivePassesRule"
    }

    fn should_end_game(&self, game: &Game) -> bool {
        let players = game.active_players().count() as u32;
        players > 0 && game.consecutive_passes >= players * self.passes_per_player
    }
}

pub struct ResignationRule;

impl EndGameRule for ResignationRule {
    fn name(&self) -> &'static str {
        "ResignationRule"
    }

    fn should_end_game(&self, game: &Game) -> bool {
        game.players.iter().any(|p| p.resigned)
    }
}

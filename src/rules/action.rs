use crate::{
    models::{Game, GameStatus, MoveType},
    rules::{derive_identifier, RuleResult, GAME_CATEGORY},
};

/// Decides whether an action type is allowed in the current game and turn state
pub trait GameRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn identifier(&self) -> String {
        derive_identifier(GAME_CATEGORY, self.name())
    }

    fn validate(&self, game: &Game, user_id: i64, action: MoveType) -> RuleResult;
}

pub struct GameActiveRule;

impl GameRule for GameActiveRule {
    fn name(&self) -> &'static str {
        "GameActiveRule"
    }

    fn validate(&self, game: &Game, _user_id: i64, _action: MoveType) -> RuleResult {
        let message = match game.status {
            GameStatus::Pending => "Game has not started yet",
            GameStatus::Finished => "Game is already finished",
            GameStatus::Active => "",
        };
        RuleResult::check(self.identifier(), game.status == GameStatus::Active, message)
    }
}

/// Only the current player may act, except that anyone seated may resign
pub struct TurnOrderRule;

impl GameRule for TurnOrderRule {
    fn name(&self) -> &'static str {
        "TurnOrderRule"
    }

    fn validate(&self, game: &Game, user_id: i64, action: MoveType) -> RuleResult {
        let ok = action == MoveType::Resign || game.current_turn_player == Some(user_id);
        RuleResult::check(self.identifier(), ok, "It is not your turn")
    }
}

/// Swapping needs a minimum number of tiles left in the bag
pub struct SwapLimitRule {
    minimum_bag: usize,
}

impl SwapLimitRule {
    pub fn new(minimum_bag: usize) -> Self {
        Self { minimum_bag }
    }
}

impl GameRule for SwapLimitRule {
    fn name(&self) -> &'static str {
        "SwapLimitRule"
    }

    fn validate(&self, game: &Game, _user_id: i64, action: MoveType) -> RuleResult {
        let ok = action != MoveType::Swap || game.tile_bag.len() >= self.minimum_bag;
        RuleResult::check(
            self.identifier(),
            ok,
            format!(
                "Swapping requires at least {} tiles in the bag ({} left)",
                self.minimum_bag,
                game.tile_bag.len()
            ),
        )
    }
}

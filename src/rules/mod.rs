//! Rule engine: turn rules validate a placement, game rules gate an action
//! type, end-game rules decide when a game is over.

pub mod action;
pub mod end_game;
pub mod turn;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{
    config::EngineConfig,
    error::GameError,
    models::{Game, MoveType},
};

pub use action::{GameActiveRule, GameRule, SwapLimitRule, TurnOrderRule};
pub use end_game::{ConsecutivePassesRule, EndGameRule, ResignationRule, TilesExhaustedRule};
pub use turn::{
    CenterSquareRule, ConnectedPlacementRule, ContiguousPlacementRule, DictionaryRule,
    MoveContext, SingleLineRule, TurnRule, UnoccupiedSquareRule, WordFormedRule,
};

pub const TURN_CATEGORY: &str = "turn";
pub const GAME_CATEGORY: &str = "game";
pub const END_GAME_CATEGORY: &str = "end_game";

/// Outcome of evaluating one rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResult {
    pub passed: bool,
    pub message: String,
    pub rule_identifier: String,
}

impl RuleResult {
    pub fn pass(rule_identifier: impl Into<String>) -> Self {
        Self {
            passed: true,
            message: String::new(),
            rule_identifier: rule_identifier.into(),
        }
    }

    pub fn fail(rule_identifier: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
            rule_identifier: rule_identifier.into(),
        }
    }

    /// Pass or fail with `message` depending on `ok`
    pub fn check(rule_identifier: impl Into<String>, ok: bool, message: impl Into<String>) -> Self {
        if ok {
            Self::pass(rule_identifier)
        } else {
            Self::fail(rule_identifier, message)
        }
    }
}

/// Build `<category>.<snake_case_name>` from a rule type name, dropping a trailing `Rule`.
///
/// These ids are API error codes; renaming a rule type changes its id.
pub fn derive_identifier(category: &str, type_name: &str) -> String {
    let base = type_name.strip_suffix("Rule").unwrap_or(type_name);
    let mut id = String::with_capacity(category.len() + base.len() + 4);
    id.push_str(category);
    id.push('.');
    for (i, ch) in base.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                id.push('_');
            }
            id.push(ch.to_ascii_lowercase());
        } else {
            id.push(ch);
        }
    }
    id
}

/// Ordered rule registrations for one game
#[derive(Default)]
pub struct RuleEngine {
    turn_rules: Vec<Box<dyn TurnRule>>,
    game_rules: Vec<Box<dyn GameRule>>,
    end_game_rules: Vec<Box<dyn EndGameRule>>,
    disabled: HashSet<String>,
}

impl RuleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard rule set in its canonical order
    pub fn standard(config: &EngineConfig) -> Self {
        Self::new()
            .with_game_rule(GameActiveRule)
            .with_game_rule(TurnOrderRule)
            .with_game_rule(SwapLimitRule::new(config.swap_minimum_bag))
            .with_turn_rule(UnoccupiedSquareRule)
            .with_turn_rule(SingleLineRule)
            .with_turn_rule(ContiguousPlacementRule)
            .with_turn_rule(CenterSquareRule)
            .with_turn_rule(ConnectedPlacementRule)
            .with_turn_rule(WordFormedRule)
            .with_turn_rule(DictionaryRule)
            .with_end_game_rule(TilesExhaustedRule)
            .with_end_game_rule(ConsecutivePassesRule::new(config.passes_per_player))
            .with_end_game_rule(ResignationRule)
    }

    pub fn with_turn_rule(mut self, rule: impl TurnRule + 'static) -> Self {
        self.turn_rules.push(Box::new(rule));
        self
    }

    pub fn with_game_rule(mut self, rule: impl GameRule + 'static) -> Self {
        self.game_rules.push(Box::new(rule));
        self
    }

    pub fn with_end_game_rule(mut self, rule: impl EndGameRule + 'static) -> Self {
        self.end_game_rules.push(Box::new(rule));
        self
    }

    /// Skip the rule with this identifier in every category
    pub fn disable(&mut self, identifier: impl Into<String>) {
        self.disabled.insert(identifier.into());
    }

    pub fn is_enabled(&self, identifier: &str) -> bool {
        !self.disabled.contains(identifier)
    }

    /// Identifiers of every enabled rule, in registration order
    pub fn identifiers(&self) -> Vec<String> {
        self.turn_rules
            .iter()
            .map(|r| r.identifier())
            .chain(self.game_rules.iter().map(|r| r.identifier()))
            .chain(self.end_game_rules.iter().map(|r| r.identifier()))
            .filter(|id| self.is_enabled(id))
            .collect()
    }

    /// Run every enabled turn rule and return the failures in registration order
    pub fn validate_move(&self, ctx: &MoveContext<'_>) -> Vec<RuleResult> {
        let failures: Vec<RuleResult> = self
            .turn_rules
            .iter()
            .filter(|rule| self.is_enabled(&rule.identifier()))
            .map(|rule| rule.validate(ctx))
            .filter(|result| !result.passed)
            .collect();

        if !failures.is_empty() {
            tracing::debug!(
                "Move by {} in game {} failed {} turn rule(s)",
                ctx.user_id,
                ctx.game.game_id,
                failures.len()
            );
        }
        failures
    }

    /// Run every enabled game rule for an action and return all failures
    pub fn validate_action(&self, game: &Game, user_id: i64, action: MoveType) -> Vec<RuleResult> {
        self.game_rules
            .iter()
            .filter(|rule| self.is_enabled(&rule.identifier()))
            .map(|rule| rule.validate(game, user_id, action))
            .filter(|result| !result.passed)
            .collect()
    }

    /// Stop at the first failing game rule
    pub fn validate_action_or_fail(
        &self,
        game: &Game,
        user_id: i64,
        action: MoveType,
    ) -> Result<(), GameError> {
        for rule in &self.game_rules {
            if !self.is_enabled(&rule.identifier()) {
                continue;
            }
            let result = rule.validate(game, user_id, action);
            if !result.passed {
                tracing::debug!(
                    "Action {:?} by {} rejected by {}: {}",
                    action,
                    user_id,
                    result.rule_identifier,
                    result.message
                );
                return Err(GameError::ActionRejected(result));
            }
        }
        Ok(())
    }

    /// The first end-game rule, in registration order, that fires
    pub fn check_end_game(&self, game: &Game) -> Option<&dyn EndGameRule> {
        self.end_game_rules
            .iter()
            .filter(|rule| self.is_enabled(&rule.identifier()))
            .find(|rule| rule.should_end_game(game))
            .map(|rule| rule.as_ref())
    }
}

use thiserror::Error;

use crate::rules::RuleResult;

/// Caller-visible failures of the rules engine. None of them leave state mutated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    /// One or more turn rules failed; every failure is reported
    #[error("{}", first_message(.failures))]
    Validation { failures: Vec<RuleResult> },

    /// The action is not allowed in the current game or turn state
    #[error("{}", .0.message)]
    ActionRejected(RuleResult),

    /// Malformed move payload, rejected before any rule runs
    #[error("malformed move: {0}")]
    DataIntegrity(String),

    #[error("user {0} is not seated in this game")]
    UnknownPlayer(i64),

    #[error("tile bag cannot hold more than {capacity} tiles")]
    BagOverflow { capacity: usize },
}

fn first_message(failures: &[RuleResult]) -> &str {
    failures
        .first()
        .map(|f| f.message.as_str())
        .unwrap_or("move rejected")
}

impl GameError {
    /// Stable machine-readable code for API clients
    pub fn rule_identifier(&self) -> &str {
        match self {
            GameError::Validation { failures } => failures
                .first()
                .map(|f| f.rule_identifier.as_str())
                .unwrap_or("turn.unknown"),
            GameError::ActionRejected(result) => &result.rule_identifier,
            GameError::DataIntegrity(_) => "integrity.malformed_move",
            GameError::UnknownPlayer(_) => "integrity.unknown_player",
            GameError::BagOverflow { .. } => "integrity.bag_overflow",
        }
    }
}

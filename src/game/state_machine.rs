use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{
    achievements::{AchievementRegistry, Trigger},
    config::EngineConfig,
    dictionary::WordOracle,
    error::GameError,
    game::{
        board::Board,
        scorer::{Scorer, ScoringResult},
        tileset::TileSet,
    },
    models::{
        Game, GameStatus, Move, MoveType, PlacedTile, StatisticsSource, Tile, UnlockedAchievement,
    },
    rules::{MoveContext, RuleEngine},
};

/// What the acting player asked for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerAction {
    Play { tiles: Vec<PlacedTile> },
    Pass,
    Swap { tiles: Vec<Tile> },
    Resign,
}

impl PlayerAction {
    pub fn move_type(&self) -> MoveType {
        match self {
            PlayerAction::Play { .. } => MoveType::Play,
            PlayerAction::Pass => MoveType::Pass,
            PlayerAction::Swap { .. } => MoveType::Swap,
            PlayerAction::Resign => MoveType::Resign,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub user_id: i64,
    pub score: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverSummary {
    /// Identifier of the end-game rule that fired
    pub rule_identifier: String,
    pub winner: Option<i64>,
    pub final_scores: Vec<PlayerScore>,
    /// Points added or removed for unplayed tiles
    pub rack_adjustments: Vec<PlayerScore>,
}

/// Everything the host needs to persist and broadcast after an action
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    pub move_record: Move,
    pub scoring: Option<ScoringResult>,
    pub game_over: Option<GameOverSummary>,
    pub achievements: Vec<UnlockedAchievement>,
}

/// Read-only services supplied by the host
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub dictionary: &'a dyn WordOracle,
    pub statistics: &'a dyn StatisticsSource,
}

/// Applies one player action to a game: validate everything, then commit
pub struct GameStateMachine {
    config: EngineConfig,
    rules: RuleEngine,
    scorer: Scorer,
    achievements: AchievementRegistry,
}

impl GameStateMachine {
    pub fn new(config: EngineConfig, rules: RuleEngine, achievements: AchievementRegistry) -> Self {
        let scorer = Scorer::new(config.bingo_bonus, config.rack_size);
        Self {
            config,
            rules,
            scorer,
            achievements,
        }
    }

    /// Standard rules and the built-in achievement catalog
    pub fn standard(config: EngineConfig) -> Self {
        let rules = RuleEngine::standard(&config);
        Self::new(config, rules, AchievementRegistry::standard())
    }

    pub fn rules(&self) -> &RuleEngine {
        &self.rules
    }

    pub fn achievements(&self) -> &AchievementRegistry {
        &self.achievements
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Apply `action` by `user_id`. On error the game is left exactly as it was.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        game: &mut Game,
        user_id: i64,
        action: PlayerAction,
        collaborators: &Collaborators<'_>,
        rng: &mut R,
    ) -> Result<ActionOutcome, GameError> {
        if game.player(user_id).is_none() {
            return Err(GameError::UnknownPlayer(user_id));
        }
        let action = self.check_integrity(game, user_id, action)?;
        self.rules
            .validate_action_or_fail(game, user_id, action.move_type())?;

        let (move_record, scoring) = match action {
            PlayerAction::Play { tiles } => {
                let (board_after, words, scoring) =
                    self.validate_play(game, user_id, &tiles, collaborators)?;
                let mv = self.commit_play(game, user_id, tiles, board_after, words, &scoring);
                (mv, Some(scoring))
            }
            PlayerAction::Pass => {
                game.consecutive_passes += 1;
                (Self::record(game, Move::without_tiles(MoveType::Pass, user_id)), None)
            }
            PlayerAction::Swap { tiles } => {
                self.commit_swap(game, user_id, &tiles, rng)?;
                game.consecutive_passes = 0;
                let mv = Move {
                    swapped: tiles.len(),
                    ..Move::without_tiles(MoveType::Swap, user_id)
                };
                (Self::record(game, mv), None)
            }
            PlayerAction::Resign => {
                if let Some(player) = game.player_mut(user_id) {
                    player.resigned = true;
                }
                (Self::record(game, Move::without_tiles(MoveType::Resign, user_id)), None)
            }
        };

        if game.current_turn_player == Some(user_id) {
            game.current_turn_player = game.next_player_after(user_id);
            game.turn_expires_at = None;
        }

        tracing::debug!(
            "Game {}: user {} {:?} for {} points",
            game.game_id,
            user_id,
            move_record.move_type,
            move_record.score
        );

        let game_over = self
            .rules
            .check_end_game(game)
            .map(|rule| rule.identifier())
            .map(|rule_identifier| Self::finish(game, rule_identifier));

        let achievements = self.evaluate_achievements(
            game,
            user_id,
            &move_record,
            scoring.as_ref(),
            collaborators.statistics,
        );

        Ok(ActionOutcome {
            move_record,
            scoring,
            game_over,
            achievements,
        })
    }

    /// Reject malformed payloads and normalise tile values from the tile set
    fn check_integrity(
        &self,
        game: &Game,
        user_id: i64,
        action: PlayerAction,
    ) -> Result<PlayerAction, GameError> {
        let rack = &game
            .player(user_id)
            .ok_or(GameError::UnknownPlayer(user_id))?
            .rack;
        let tile_set = TileSet::for_language(game.language);

        match action {
            PlayerAction::Play { tiles } => {
                self.check_tile_count(tiles.len())?;

                let mut seen = HashSet::with_capacity(tiles.len());
                let mut normalised = Vec::with_capacity(tiles.len());
                for placed in tiles {
                    if !Board::in_bounds(placed.x, placed.y) {
                        return Err(GameError::DataIntegrity(format!(
                            "square {} is off the board",
                            placed.position()
                        )));
                    }
                    if !seen.insert(placed.position()) {
                        return Err(GameError::DataIntegrity(format!(
                            "square {} is used twice",
                            placed.position()
                        )));
                    }
                    let letter = placed.tile.letter.to_ascii_uppercase();
                    if !letter.is_alphabetic() {
                        return Err(GameError::DataIntegrity(format!(
                            "tile at {} has no letter",
                            placed.position()
                        )));
                    }
                    let tile = if placed.tile.is_blank {
                        Tile::assigned_blank(letter)
                    } else {
                        tile_set.tile_for(letter)
                    };
                    normalised.push(PlacedTile::new(tile, placed.x, placed.y));
                }

                let wanted: Vec<Tile> = normalised.iter().map(|p| p.tile).collect();
                if !rack.contains_all(&wanted) {
                    return Err(GameError::DataIntegrity(
                        "played tiles are not on the rack".to_string(),
                    ));
                }
                Ok(PlayerAction::Play { tiles: normalised })
            }
            PlayerAction::Swap { tiles } => {
                self.check_tile_count(tiles.len())?;
                if !rack.contains_all(&tiles) {
                    return Err(GameError::DataIntegrity(
                        "swapped tiles are not on the rack".to_string(),
                    ));
                }
                Ok(PlayerAction::Swap { tiles })
            }
            other => Ok(other),
        }
    }

    fn check_tile_count(&self, count: usize) -> Result<(), GameError> {
        if count == 0 || count > self.config.rack_size {
            return Err(GameError::DataIntegrity(format!(
                "expected between 1 and {} tiles, got {}",
                self.config.rack_size, count
            )));
        }
        Ok(())
    }

    /// Run the turn rules against a tentative board and score the result
    fn validate_play(
        &self,
        game: &Game,
        user_id: i64,
        tiles: &[PlacedTile],
        collaborators: &Collaborators<'_>,
    ) -> Result<(Board, Vec<String>, ScoringResult), GameError> {
        let board_after = game.board.with_placements(tiles);
        let words = board_after.find_formed_words(tiles);

        let ctx = MoveContext {
            game,
            user_id,
            placed: tiles,
            board_before: &game.board,
            board_after: &board_after,
            words: &words,
            dictionary: collaborators.dictionary,
        };
        let failures = self.rules.validate_move(&ctx);
        if !failures.is_empty() {
            return Err(GameError::Validation { failures });
        }

        let scoring = self.scorer.score(&words, tiles, &board_after);
        let words = words.into_iter().map(|w| w.word).collect();
        Ok((board_after, words, scoring))
    }

    fn commit_play(
        &self,
        game: &mut Game,
        user_id: i64,
        tiles: Vec<PlacedTile>,
        board_after: Board,
        words: Vec<String>,
        scoring: &ScoringResult,
    ) -> Move {
        let wanted: Vec<Tile> = tiles.iter().map(|p| p.tile).collect();
        let held = match game.player_mut(user_id) {
            Some(player) => {
                player.rack.remove_matching(&wanted);
                player.score += scoring.total;
                player.rack.len()
            }
            None => 0,
        };

        let drawn = game.tile_bag.draw(self.config.rack_size.saturating_sub(held));
        if let Some(player) = game.player_mut(user_id) {
            player.rack.add(drawn);
        }
        game.board = board_after;
        game.consecutive_passes = 0;

        Self::record(
            game,
            Move {
                tiles,
                words,
                score: scoring.total,
                ..Move::without_tiles(MoveType::Play, user_id)
            },
        )
    }

    fn commit_swap<R: Rng + ?Sized>(
        &self,
        game: &mut Game,
        user_id: i64,
        tiles: &[Tile],
        rng: &mut R,
    ) -> Result<(), GameError> {
        let drawn = game.tile_bag.draw(tiles.len());
        let returned = match game.player_mut(user_id) {
            Some(player) => {
                let removed = player.rack.remove_matching(tiles).unwrap_or_default();
                player.rack.add(drawn);
                removed
            }
            None => return Err(GameError::UnknownPlayer(user_id)),
        };
        // Tiles only move between rack and bag, so capacity holds
        game.tile_bag.return_tiles(returned, rng)
    }

    fn record(game: &mut Game, mv: Move) -> Move {
        game.moves.push(mv.clone());
        mv
    }

    /// Close the game: settle unplayed tiles and pick the winner
    fn finish(game: &mut Game, rule_identifier: String) -> GameOverSummary {
        let resigned = game.players.iter().any(|p| p.resigned);
        let mut rack_adjustments = Vec::new();

        if !resigned {
            let penalties: Vec<PlayerScore> = game
                .players
                .iter()
                .map(|p| PlayerScore {
                    user_id: p.user_id,
                    score: -p.rack.value(),
                })
                .collect();
            let collected: i32 = penalties.iter().map(|p| -p.score).sum();

            for (player, penalty) in game.players.iter_mut().zip(&penalties) {
                let adjustment = if player.rack.is_empty() {
                    collected
                } else {
                    penalty.score
                };
                player.score += adjustment;
                rack_adjustments.push(PlayerScore {
                    user_id: player.user_id,
                    score: adjustment,
                });
            }
        }

        let best = game.active_players().map(|p| p.score).max();
        let leaders: Vec<i64> = game
            .active_players()
            .filter(|p| Some(p.score) == best)
            .map(|p| p.user_id)
            .collect();
        let winner = match leaders.as_slice() {
            [only] => Some(*only),
            _ => None,
        };

        game.status = GameStatus::Finished;
        game.winner = winner;
        game.current_turn_player = None;
        game.turn_expires_at = None;

        tracing::info!(
            "Game {} finished by {} (winner: {:?})",
            game.game_id,
            rule_identifier,
            winner
        );

        GameOverSummary {
            rule_identifier,
            winner,
            final_scores: game
                .players
                .iter()
                .map(|p| PlayerScore {
                    user_id: p.user_id,
                    score: p.score,
                })
                .collect(),
            rack_adjustments,
        }
    }

    fn evaluate_achievements(
        &self,
        game: &Game,
        user_id: i64,
        move_record: &Move,
        scoring: Option<&ScoringResult>,
        statistics: &dyn StatisticsSource,
    ) -> Vec<UnlockedAchievement> {
        let acting = statistics.statistics_or_default(user_id);
        let mut unlocked = self.achievements.evaluate(
            &acting,
            Trigger::Move {
                mv: move_record,
                game,
                scoring,
            },
        );

        if game.status == GameStatus::Finished {
            for player in &game.players {
                let stats = statistics.statistics_or_default(player.user_id);
                unlocked.extend(self.achievements.evaluate(&stats, Trigger::GameEnd { game }));
            }
        }

        // An achievement registered under both triggers may fire twice on a game-ending move
        let mut granted = HashSet::with_capacity(unlocked.len());
        unlocked.retain(|a| granted.insert((a.achievement_id.clone(), a.user_id, a.game_id)));
        unlocked
    }
}

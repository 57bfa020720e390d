use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    game::{Board, TileBag, TileSet},
    models::{Language, PlacedTile, Tile},
};

/// Number of tiles a rack holds under standard rules
pub const RACK_SIZE: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Pending,
    Active,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SquareType {
    #[serde(rename = "TW")]
    TripleWord,
    #[serde(rename = "DW")]
    DoubleWord,
    #[serde(rename = "TL")]
    TripleLetter,
    #[serde(rename = "DL")]
    DoubleLetter,
    #[serde(rename = "ST")]
    Star,
    #[serde(rename = "N")]
    Normal,
}

impl SquareType {
    pub fn letter_multiplier(self) -> i32 {
        match self {
            SquareType::TripleLetter => 3,
            SquareType::DoubleLetter => 2,
            _ => 1,
        }
    }

    /// The center star doubles the word like a double-word square
    pub fn word_multiplier(self) -> i32 {
        match self {
            SquareType::TripleWord => 3,
            SquareType::DoubleWord | SquareType::Star => 2,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Square {
    pub square_type: SquareType,
    pub tile: Option<Tile>,
}

impl Square {
    pub fn is_occupied(&self) -> bool {
        self.tile.is_some()
    }
}

/// A player's private tiles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rack {
    tiles: Vec<Tile>,
}

impl Rack {
    pub fn new(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn add(&mut self, tiles: impl IntoIterator<Item = Tile>) {
        self.tiles.extend(tiles);
    }

    /// Check that every requested tile can be taken from the rack, each rack tile used once
    pub fn contains_all(&self, wanted: &[Tile]) -> bool {
        let mut available = self.tiles.clone();
        wanted.iter().all(|tile| {
            match available.iter().position(|held| held.can_play_as(tile)) {
                Some(idx) => {
                    available.swap_remove(idx);
                    true
                }
                None => false,
            }
        })
    }

    /// Remove the rack tiles matching `wanted`. Leaves the rack untouched if any is missing.
    pub fn remove_matching(&mut self, wanted: &[Tile]) -> Option<Vec<Tile>> {
        if !self.contains_all(wanted) {
            return None;
        }

        let mut removed = Vec::with_capacity(wanted.len());
        for tile in wanted {
            let idx = self.tiles.iter().position(|held| held.can_play_as(tile))?;
            removed.push(self.tiles.remove(idx));
        }
        Some(removed)
    }

    /// Face value of the tiles still held
    pub fn value(&self) -> i32 {
        self.tiles.iter().map(|t| t.points as i32).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamePlayer {
    pub user_id: i64,
    pub turn_order: u8,
    pub score: i32,
    pub rack: Rack,
    pub resigned: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveType {
    Play,
    Pass,
    Swap,
    Resign,
}

/// Immutable record of one accepted action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub move_type: MoveType,
    pub user_id: i64,
    pub tiles: Vec<PlacedTile>,
    pub words: Vec<String>,
    pub score: i32,
    /// Number of tiles exchanged, only non-zero for swaps
    pub swapped: usize,
}

impl Move {
    /// A scoreless record for passes, swaps and resignations
    pub fn without_tiles(move_type: MoveType, user_id: i64) -> Self {
        Self {
            move_type,
            user_id,
            tiles: Vec::new(),
            words: Vec::new(),
            score: 0,
            swapped: 0,
        }
    }

    pub fn is_bingo(&self, rack_size: usize) -> bool {
        self.move_type == MoveType::Play && self.tiles.len() == rack_size
    }
}

/// Aggregate root for one game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub game_id: Uuid,
    pub language: Language,
    pub status: GameStatus,
    pub board: Board,
    pub tile_bag: TileBag,
    /// Seated players, ordered by `turn_order`
    pub players: Vec<GamePlayer>,
    pub current_turn_player: Option<i64>,
    pub consecutive_passes: u32,
    pub winner: Option<i64>,
    pub rack_size: usize,
    pub moves: Vec<Move>,
    /// Deadline for the current turn, managed by the host
    pub turn_expires_at: Option<DateTime<Utc>>,
}

impl Game {
    /// Create a pending game with a freshly shuffled bag and the creator seated
    pub fn new<R: Rng + ?Sized>(
        game_id: Uuid,
        language: Language,
        creator: i64,
        rack_size: usize,
        rng: &mut R,
    ) -> Self {
        let tile_bag = TileBag::new(TileSet::for_language(language).all_tiles(), rng);

        let mut game = Self {
            game_id,
            language,
            status: GameStatus::Pending,
            board: Board::create_empty_board(),
            tile_bag,
            players: Vec::new(),
            current_turn_player: None,
            consecutive_passes: 0,
            winner: None,
            rack_size,
            moves: Vec::new(),
            turn_expires_at: None,
        };
        game.seat(creator);
        game
    }

    /// Seat another player. The game becomes active once two players are seated.
    pub fn add_player(&mut self, user_id: i64) -> bool {
        if self.status == GameStatus::Finished || self.player(user_id).is_some() {
            return false;
        }

        self.seat(user_id);
        if self.status == GameStatus::Pending && self.players.len() >= 2 {
            self.status = GameStatus::Active;
            self.current_turn_player = self.players.first().map(|p| p.user_id);
            tracing::info!(
                "Game {} is active with {} players",
                self.game_id,
                self.players.len()
            );
        }
        true
    }

    fn seat(&mut self, user_id: i64) {
        let rack = Rack::new(self.tile_bag.draw(self.rack_size));
        self.players.push(GamePlayer {
            user_id,
            turn_order: self.players.len() as u8,
            score: 0,
            rack,
            resigned: false,
        });
    }

    pub fn player(&self, user_id: i64) -> Option<&GamePlayer> {
        self.players.iter().find(|p| p.user_id == user_id)
    }

    pub fn player_mut(&mut self, user_id: i64) -> Option<&mut GamePlayer> {
        self.players.iter_mut().find(|p| p.user_id == user_id)
    }

    pub fn current_player(&self) -> Option<&GamePlayer> {
        self.current_turn_player.and_then(|id| self.player(id))
    }

    pub fn is_first_move(&self) -> bool {
        self.board.is_empty()
    }

    /// Players still in the game, in turn order
    pub fn active_players(&self) -> impl Iterator<Item = &GamePlayer> {
        self.players.iter().filter(|p| !p.resigned)
    }

    /// The next non-resigned player after `user_id` in turn order
    pub fn next_player_after(&self, user_id: i64) -> Option<i64> {
        let idx = self.players.iter().position(|p| p.user_id == user_id)?;
        let count = self.players.len();
        (1..=count)
            .map(|offset| &self.players[(idx + offset) % count])
            .find(|p| !p.resigned)
            .map(|p| p.user_id)
    }

    pub fn is_turn_expired(&self, now: DateTime<Utc>) -> bool {
        self.status == GameStatus::Active
            && self.turn_expires_at.is_some_and(|deadline| now >= deadline)
    }

    pub fn score_of(&self, user_id: i64) -> Option<i32> {
        self.player(user_id).map(|p| p.score)
    }

    /// Face value of the tiles `user_id` still holds
    pub fn rack_value(&self, user_id: i64) -> Option<i32> {
        self.player(user_id).map(|p| p.rack.value())
    }
}

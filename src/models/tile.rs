use serde::{Deserialize, Serialize};
use std::fmt;

/// Letter carried by a blank tile that has not been assigned yet
pub const BLANK_LETTER: char = '?';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Dutch,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::English => write!(f, "en"),
            Language::Dutch => write!(f, "nl"),
        }
    }
}

/// A single letter tile. Blanks score nothing and take their letter at play time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub letter: char,
    pub points: u8,
    pub is_blank: bool,
}

impl Tile {
    pub fn new(letter: char, points: u8) -> Self {
        Self {
            letter: letter.to_ascii_uppercase(),
            points,
            is_blank: false,
        }
    }

    /// An unassigned blank as it sits in the bag or on a rack
    pub fn blank() -> Self {
        Self {
            letter: BLANK_LETTER,
            points: 0,
            is_blank: true,
        }
    }

    /// A blank played as `letter`
    pub fn assigned_blank(letter: char) -> Self {
        Self {
            letter: letter.to_ascii_uppercase(),
            points: 0,
            is_blank: true,
        }
    }

    /// Whether this tile, as held on a rack, can be used to play `placed`
    pub fn can_play_as(&self, placed: &Tile) -> bool {
        if placed.is_blank {
            self.is_blank
        } else {
            !self.is_blank && self.letter == placed.letter
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A tile placed at a board coordinate as part of a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedTile {
    pub tile: Tile,
    pub x: usize,
    pub y: usize,
}

impl PlacedTile {
    pub fn new(tile: Tile, x: usize, y: usize) -> Self {
        Self { tile, x, y }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

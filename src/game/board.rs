use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::models::{PlacedTile, Position, Square, SquareType, Tile};

pub const BOARD_SIZE: usize = 15;
pub const CENTER: usize = 7;

// Premium squares for the top-left quadrant as (x, y); mirrored into the other three
const TRIPLE_WORD: &[(usize, usize)] = &[(0, 0), (7, 0), (0, 7)];
const DOUBLE_WORD: &[(usize, usize)] = &[(1, 1), (2, 2), (3, 3), (4, 4)];
const TRIPLE_LETTER: &[(usize, usize)] = &[(5, 1), (1, 5), (5, 5)];
const DOUBLE_LETTER: &[(usize, usize)] = &[
    (3, 0),
    (0, 3),
    (6, 2),
    (2, 6),
    (7, 3),
    (3, 7),
    (6, 6),
];

/// A word discovered after a placement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormedWord {
    pub word: String,
    pub horizontal: bool,
    pub cells: Vec<Position>,
}

impl FormedWord {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// The 15x15 grid. Squares only ever gain tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    squares: Vec<Vec<Square>>,
}

impl Board {
    /// Build an empty board with the fixed premium layout
    pub fn create_empty_board() -> Self {
        let mut squares = vec![
            vec![
                Square {
                    square_type: SquareType::Normal,
                    tile: None,
                };
                BOARD_SIZE
            ];
            BOARD_SIZE
        ];

        let layout = [
            (TRIPLE_WORD, SquareType::TripleWord),
            (DOUBLE_WORD, SquareType::DoubleWord),
            (TRIPLE_LETTER, SquareType::TripleLetter),
            (DOUBLE_LETTER, SquareType::DoubleLetter),
        ];
        for (coords, square_type) in layout {
            for &(x, y) in coords {
                for (mx, my) in Self::mirrored(x, y) {
                    squares[my][mx].square_type = square_type;
                }
            }
        }
        squares[CENTER][CENTER].square_type = SquareType::Star;

        Self { squares }
    }

    fn mirrored(x: usize, y: usize) -> [(usize, usize); 4] {
        let last = BOARD_SIZE - 1;
        [(x, y), (last - x, y), (x, last - y), (last - x, last - y)]
    }

    pub fn in_bounds(x: usize, y: usize) -> bool {
        x < BOARD_SIZE && y < BOARD_SIZE
    }

    pub fn square(&self, x: usize, y: usize) -> Option<&Square> {
        self.squares.get(y).and_then(|row| row.get(x))
    }

    pub fn square_type(&self, x: usize, y: usize) -> SquareType {
        self.square(x, y)
            .map(|s| s.square_type)
            .unwrap_or(SquareType::Normal)
    }

    pub fn tile_at(&self, x: usize, y: usize) -> Option<Tile> {
        self.square(x, y).and_then(|s| s.tile)
    }

    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.tile_at(x, y).is_some()
    }

    /// True when no tile has been played yet
    pub fn is_empty(&self) -> bool {
        self.squares.iter().flatten().all(|s| s.tile.is_none())
    }

    pub fn tile_count(&self) -> usize {
        self.squares.iter().flatten().filter(|s| s.is_occupied()).count()
    }

    /// Whether any orthogonal neighbour of (x, y) holds a tile
    pub fn has_occupied_neighbor(&self, x: usize, y: usize) -> bool {
        let left = x.checked_sub(1).map(|nx| (nx, y));
        let up = y.checked_sub(1).map(|ny| (x, ny));
        [left, up, Some((x + 1, y)), Some((x, y + 1))]
            .into_iter()
            .flatten()
            .any(|(nx, ny)| self.is_occupied(nx, ny))
    }

    /// Put a tile on an empty square. Occupied or off-board squares are left alone.
    pub fn place(&mut self, placed: &PlacedTile) -> bool {
        match self
            .squares
            .get_mut(placed.y)
            .and_then(|row| row.get_mut(placed.x))
        {
            Some(square) if square.tile.is_none() => {
                square.tile = Some(placed.tile);
                true
            }
            _ => false,
        }
    }

    /// A copy of the board with the move's tiles tentatively placed
    pub fn with_placements(&self, placed: &[PlacedTile]) -> Board {
        let mut tentative = self.clone();
        for tile in placed {
            tentative.place(tile);
        }
        tentative
    }

    /// Find every word of two or more letters that runs through a placed tile.
    ///
    /// `self` must already contain the placed tiles. Words along the line of
    /// play come first, followed by cross words; each span is reported once
    /// no matter how many placed tiles it contains.
    pub fn find_formed_words(&self, placed: &[PlacedTile]) -> Vec<FormedWord> {
        let mut seen: HashSet<(bool, usize, usize, usize)> = HashSet::new();
        let mut horizontal = Vec::new();
        let mut vertical = Vec::new();

        for tile in placed {
            if let Some(word) = self.scan(tile.x, tile.y, true, &mut seen) {
                horizontal.push(word);
            }
            if let Some(word) = self.scan(tile.x, tile.y, false, &mut seen) {
                vertical.push(word);
            }
        }

        let vertical_line = placed.len() > 1 && placed.iter().all(|t| t.x == placed[0].x);
        if vertical_line {
            vertical.extend(horizontal);
            vertical
        } else {
            horizontal.extend(vertical);
            horizontal
        }
    }

    /// Walk the maximal occupied run through (x, y) along one axis
    fn scan(
        &self,
        x: usize,
        y: usize,
        horizontal: bool,
        seen: &mut HashSet<(bool, usize, usize, usize)>,
    ) -> Option<FormedWord> {
        if !self.is_occupied(x, y) {
            return None;
        }

        let (line, fixed) = if horizontal { (x, y) } else { (y, x) };
        let at = |i: usize| {
            if horizontal {
                (i, fixed)
            } else {
                (fixed, i)
            }
        };

        let mut start = line;
        while start > 0 {
            let (cx, cy) = at(start - 1);
            if !self.is_occupied(cx, cy) {
                break;
            }
            start -= 1;
        }
        let mut end = line;
        while end + 1 < BOARD_SIZE {
            let (cx, cy) = at(end + 1);
            if !self.is_occupied(cx, cy) {
                break;
            }
            end += 1;
        }

        if end == start || !seen.insert((horizontal, fixed, start, end)) {
            return None;
        }

        let cells: Vec<Position> = (start..=end)
            .map(|i| {
                let (cx, cy) = at(i);
                Position::new(cx, cy)
            })
            .collect();
        let word = cells
            .iter()
            .filter_map(|p| self.tile_at(p.x, p.y))
            .map(|t| t.letter)
            .collect();

        Some(FormedWord {
            word,
            horizontal,
            cells,
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::create_empty_board()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(letter: char, x: usize, y: usize) -> PlacedTile {
        PlacedTile::new(Tile::new(letter, 1), x, y)
    }

    fn board_with(tiles: &[PlacedTile]) -> Board {
        let mut board = Board::create_empty_board();
        for t in tiles {
            board.place(t);
        }
        board
    }

    #[test]
    fn test_layout() {
        let board = Board::create_empty_board();
        assert_eq!(board.square_type(7, 7), SquareType::Star);
        assert_eq!(board.square_type(0, 0), SquareType::TripleWord);
        assert_eq!(board.square_type(14, 7), SquareType::TripleWord);
        assert_eq!(board.square_type(13, 13), SquareType::DoubleWord);
        assert_eq!(board.square_type(9, 13), SquareType::TripleLetter);
        assert_eq!(board.square_type(11, 14), SquareType::DoubleLetter);
        assert_eq!(board.square_type(7, 8), SquareType::Normal);
        assert!(board.is_empty());
    }

    #[test]
    fn test_premium_square_counts() {
        let board = Board::create_empty_board();
        let count = |kind: SquareType| {
            (0..BOARD_SIZE)
                .flat_map(|y| (0..BOARD_SIZE).map(move |x| (x, y)))
                .filter(|&(x, y)| board.square_type(x, y) == kind)
                .count()
        };
        assert_eq!(count(SquareType::TripleWord), 8);
        assert_eq!(count(SquareType::DoubleWord), 16);
        assert_eq!(count(SquareType::TripleLetter), 12);
        assert_eq!(count(SquareType::DoubleLetter), 24);
        assert_eq!(count(SquareType::Star), 1);
    }

    #[test]
    fn test_layout_is_symmetric() {
        let board = Board::create_empty_board();
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                assert_eq!(board.square_type(x, y), board.square_type(y, x));
            }
        }
    }

    #[test]
    fn test_place_never_overwrites() {
        let mut board = Board::create_empty_board();
        assert!(board.place(&tile('A', 7, 7)));
        assert!(!board.place(&tile('B', 7, 7)));
        assert!(!board.place(&tile('B', 15, 7)));
        assert_eq!(board.tile_at(7, 7).unwrap().letter, 'A');
        assert_eq!(board.tile_count(), 1);
    }

    #[test]
    fn test_isolated_placement_forms_one_word() {
        let placed = vec![tile('C', 6, 7), tile('A', 7, 7), tile('T', 8, 7)];
        let board = board_with(&placed);

        let words = board.find_formed_words(&placed);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].word, "CAT");
        assert!(words[0].horizontal);
        assert_eq!(words[0].cells[0], Position::new(6, 7));
    }

    #[test]
    fn test_vertical_main_word_comes_first() {
        let existing = vec![tile('A', 6, 8)];
        let placed = vec![tile('C', 7, 7), tile('A', 7, 8), tile('T', 7, 9)];
        let mut all = existing.clone();
        all.extend(placed.iter().copied());
        let board = board_with(&all);

        let words = board.find_formed_words(&placed);
        let found: Vec<(&str, bool)> = words
            .iter()
            .map(|w| (w.word.as_str(), w.horizontal))
            .collect();
        assert_eq!(found, vec![("CAT", false), ("AA", true)]);
    }

    #[test]
    fn test_single_tile_between_neighbours_forms_two_words() {
        // E to the right at (2,4), E below at (1,5); H goes to (1,4)
        let existing = vec![tile('E', 2, 4), tile('E', 1, 5)];
        let placed = vec![tile('H', 1, 4)];
        let mut all = existing.clone();
        all.extend(placed.iter().copied());
        let board = board_with(&all);

        let words = board.find_formed_words(&placed);
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].word, "HE");
        assert!(words[0].horizontal);
        assert!(words[0].cells.iter().all(|c| c.y == 4));
        assert_eq!(words[1].word, "HE");
        assert!(!words[1].horizontal);
        assert!(words[1].cells.iter().all(|c| c.x == 1));
    }

    #[test]
    fn test_vertical_pair_beside_placement_forms_one_word() {
        // Both E tiles in column 2; nothing above or below the H
        let existing = vec![tile('E', 2, 4), tile('E', 2, 5)];
        let placed = vec![tile('H', 1, 4)];
        let mut all = existing.clone();
        all.extend(placed.iter().copied());
        let board = board_with(&all);

        let words = board.find_formed_words(&placed);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].word, "HE");
        assert!(words[0].horizontal);
        assert_eq!(words[0].cells, vec![Position::new(1, 4), Position::new(2, 4)]);
    }

    #[test]
    fn test_extension_includes_existing_tiles() {
        let existing = vec![tile('C', 7, 7), tile('A', 8, 7), tile('T', 9, 7)];
        let placed = vec![tile('S', 10, 7)];
        let mut all = existing.clone();
        all.extend(placed.iter().copied());
        let board = board_with(&all);

        let words = board.find_formed_words(&placed);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].word, "CATS");
    }

    #[test]
    fn test_gap_filled_by_existing_tile() {
        let existing = vec![tile('A', 8, 7)];
        let placed = vec![tile('C', 7, 7), tile('T', 9, 7)];
        let mut all = existing.clone();
        all.extend(placed.iter().copied());
        let board = board_with(&all);

        let words = board.find_formed_words(&placed);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].word, "CAT");
    }

    #[test]
    fn test_single_letter_is_not_a_word() {
        let placed = vec![tile('A', 7, 7)];
        let board = board_with(&placed);
        assert!(board.find_formed_words(&placed).is_empty());
    }

    #[test]
    fn test_edge_of_board() {
        let placed = vec![tile('O', 13, 0), tile('X', 14, 0)];
        let board = board_with(&placed);
        let words = board.find_formed_words(&placed);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].word, "OX");
    }

    #[test]
    fn test_neighbour_detection() {
        let board = board_with(&[tile('A', 0, 0)]);
        assert!(board.has_occupied_neighbor(1, 0));
        assert!(board.has_occupied_neighbor(0, 1));
        assert!(!board.has_occupied_neighbor(1, 1));
    }
}

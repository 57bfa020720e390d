use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::{
    game::board::{Board, FormedWord},
    models::{PlacedTile, Position, SquareType, RACK_SIZE},
};

/// Bonus for playing a full rack in one move
pub const BINGO_BONUS: i32 = 50;

/// A premium square that counted towards a word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedMultiplier {
    pub position: Position,
    pub square_type: SquareType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordScore {
    pub word: String,
    pub horizontal: bool,
    /// Letter sum after letter multipliers
    pub base_score: i32,
    /// Product of the word multipliers applied
    pub word_multiplier: i32,
    pub score: i32,
    pub multipliers: Vec<AppliedMultiplier>,
}

/// Breakdown of one move's score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub words: Vec<WordScore>,
    pub bingo_bonus: i32,
    pub total: i32,
}

impl ScoringResult {
    pub fn is_bingo(&self) -> bool {
        self.bingo_bonus > 0
    }

    pub fn best_word(&self) -> Option<&WordScore> {
        self.words.iter().max_by_key(|w| w.score)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scorer {
    bingo_bonus: i32,
    rack_size: usize,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(BINGO_BONUS, RACK_SIZE)
    }
}

impl Scorer {
    pub fn new(bingo_bonus: i32, rack_size: usize) -> Self {
        Self {
            bingo_bonus,
            rack_size,
        }
    }

    /// Score the words formed by a placement.
    ///
    /// Scoring rules:
    /// - Each letter scores its tile value; blanks score 0
    /// - DL/TL multiply a letter only on squares covered by this move
    /// - DW/TW/star multiply the whole word, only on squares covered by this
    ///   move, and stack multiplicatively
    /// - A premium square covered by this move counts for every word through it
    /// - Playing the full rack adds the bingo bonus once, outside any multiplier
    ///
    /// `board` must already hold the placed tiles.
    pub fn score(
        &self,
        words: &[FormedWord],
        placed: &[PlacedTile],
        board: &Board,
    ) -> ScoringResult {
        let fresh: HashSet<Position> = placed.iter().map(|t| t.position()).collect();

        let words: Vec<WordScore> = words
            .iter()
            .map(|word| Self::score_word(word, &fresh, board))
            .collect();

        let bingo_bonus = if placed.len() == self.rack_size {
            self.bingo_bonus
        } else {
            0
        };
        let total = words.iter().map(|w| w.score).sum::<i32>() + bingo_bonus;

        ScoringResult {
            words,
            bingo_bonus,
            total,
        }
    }

    fn score_word(word: &FormedWord, fresh: &HashSet<Position>, board: &Board) -> WordScore {
        let mut base_score = 0;
        let mut word_multiplier = 1;
        let mut multipliers = Vec::new();

        for cell in &word.cells {
            let points = board
                .tile_at(cell.x, cell.y)
                .map(|t| t.points as i32)
                .unwrap_or(0);

            if !fresh.contains(cell) {
                base_score += points;
                continue;
            }

            let square_type = board.square_type(cell.x, cell.y);
            base_score += points * square_type.letter_multiplier();
            word_multiplier *= square_type.word_multiplier();
            if square_type != SquareType::Normal {
                multipliers.push(AppliedMultiplier {
                    position: *cell,
                    square_type,
                });
            }
        }

        WordScore {
            word: word.word.clone(),
            horizontal: word.horizontal,
            base_score,
            word_multiplier,
            score: base_score * word_multiplier,
            multipliers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tile;

    fn tile(letter: char, points: u8, x: usize, y: usize) -> PlacedTile {
        PlacedTile::new(Tile::new(letter, points), x, y)
    }

    fn play(board: &mut Board, placed: &[PlacedTile]) -> ScoringResult {
        for t in placed {
            board.place(t);
        }
        let words = board.find_formed_words(placed);
        Scorer::default().score(&words, placed, board)
    }

    #[test]
    fn test_opening_move_doubles_on_star() {
        let mut board = Board::create_empty_board();
        // C(3) A(1) T(1) across the star
        let result = play(
            &mut board,
            &[tile('C', 3, 6, 7), tile('A', 1, 7, 7), tile('T', 1, 8, 7)],
        );
        assert_eq!(result.words.len(), 1);
        assert_eq!(result.words[0].base_score, 5);
        assert_eq!(result.words[0].word_multiplier, 2);
        assert_eq!(result.total, 10);
        assert_eq!(result.bingo_bonus, 0);
    }

    #[test]
    fn test_letter_multiplier_only_on_new_tiles() {
        let mut board = Board::create_empty_board();
        // Existing Z on the double letter at (3,0)
        board.place(&tile('Z', 10, 3, 0));

        // A at (4,0) is normal: ZA = 10 + 1, the DL under Z does not count again
        let result = play(&mut board, &[tile('A', 1, 4, 0)]);
        assert_eq!(result.total, 11);
        assert!(result.words[0].multipliers.is_empty());
    }

    #[test]
    fn test_word_multipliers_stack() {
        let mut board = Board::create_empty_board();
        // Row 0 from TW (0,0) to TW (7,0), all new tiles, DL at (3,0)
        let placed: Vec<PlacedTile> = "ABCDEFGH"
            .chars()
            .enumerate()
            .map(|(i, c)| tile(c, 1, i, 0))
            .collect();
        // Eight tiles so no bingo at rack size 7
        let result = play(&mut board, &placed);
        // letters 8 + 1 extra from DL = 9, times 3 * 3
        assert_eq!(result.words[0].base_score, 9);
        assert_eq!(result.words[0].word_multiplier, 9);
        assert_eq!(result.total, 81);
        assert_eq!(result.words[0].multipliers.len(), 3);
    }

    #[test]
    fn test_shared_premium_counts_for_both_words() {
        let mut board = Board::create_empty_board();
        board.place(&tile('A', 1, 6, 5));
        board.place(&tile('B', 3, 5, 6));

        // X on the triple letter at (5,5) forms XA across and XB down
        let result = play(&mut board, &[tile('X', 8, 5, 5)]);
        assert_eq!(result.words.len(), 2);
        assert_eq!(result.words[0].score, 24 + 1);
        assert_eq!(result.words[1].score, 24 + 3);
        assert_eq!(result.total, 52);
    }

    #[test]
    fn test_bingo_bonus() {
        let mut board = Board::create_empty_board();
        let placed: Vec<PlacedTile> = "RETAINS"
            .chars()
            .enumerate()
            .map(|(i, c)| tile(c, 1, 4 + i, 7))
            .collect();
        let result = play(&mut board, &placed);
        // Seven 1-point letters doubled by the star, DL squares at (3,7) and (11,7) untouched
        assert_eq!(result.words[0].score, 14);
        assert_eq!(result.bingo_bonus, BINGO_BONUS);
        assert_eq!(result.total, 64);
        assert!(result.is_bingo());
    }

    #[test]
    fn test_blank_scores_nothing() {
        let mut board = Board::create_empty_board();
        let placed = vec![
            PlacedTile::new(Tile::assigned_blank('Q'), 7, 7),
            tile('I', 1, 8, 7),
        ];
        let result = play(&mut board, &placed);
        assert_eq!(result.total, 2);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let mut board = Board::create_empty_board();
        let placed = vec![tile('H', 4, 7, 7), tile('I', 1, 8, 7)];
        for t in &placed {
            board.place(t);
        }
        let words = board.find_formed_words(&placed);
        let scorer = Scorer::default();

        let first = scorer.score(&words, &placed, &board);
        let second = scorer.score(&words, &placed, &board);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

//! Property-based tests for board, scoring and bookkeeping invariants

use std::collections::HashSet;

use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    game::{Board, EloCalculator, Scorer, TileBag, TileSet, BOARD_SIZE},
    models::{Language, PlacedTile, Rack, Tile, RACK_SIZE},
};

fn letter() -> impl Strategy<Value = char> {
    proptest::char::range('A', 'Z')
}

fn existing_tiles() -> impl Strategy<Value = Vec<(usize, usize, char)>> {
    proptest::collection::vec((0..BOARD_SIZE, 0..BOARD_SIZE, letter()), 0..24)
}

/// Seed a board and lay a run of tiles along row or column `line`, skipping occupied squares
fn setup(
    existing: &[(usize, usize, char)],
    vertical: bool,
    line: usize,
    start: usize,
    run: &[char],
) -> (Board, Vec<PlacedTile>) {
    let set = TileSet::for_language(Language::English);
    let mut board = Board::create_empty_board();
    for &(x, y, c) in existing {
        board.place(&PlacedTile::new(set.tile_for(c), x, y));
    }

    let placed = run
        .iter()
        .enumerate()
        .map(|(i, &c)| (start + i, c))
        .filter(|&(along, _)| along < BOARD_SIZE)
        .map(|(along, c)| {
            let (x, y) = if vertical { (line, along) } else { (along, line) };
            PlacedTile::new(set.tile_for(c), x, y)
        })
        .filter(|p| !board.is_occupied(p.x, p.y))
        .collect();
    (board, placed)
}

proptest! {
    /// Property: every formed word has at least two letters, spells what is on
    /// the board and runs through at least one newly placed tile
    #[test]
    fn prop_formed_words_are_well_formed(
        existing in existing_tiles(),
        vertical in any::<bool>(),
        line in 0..BOARD_SIZE,
        start in 0..BOARD_SIZE,
        run in proptest::collection::vec(letter(), 1..=RACK_SIZE),
    ) {
        let (board, placed) = setup(&existing, vertical, line, start, &run);
        let after = board.with_placements(&placed);
        let words = after.find_formed_words(&placed);

        for word in &words {
            prop_assert!(word.word.chars().count() >= 2, "short word {:?}", word);
            prop_assert_eq!(word.cells.len(), word.word.chars().count());

            let spelled: String = word
                .cells
                .iter()
                .filter_map(|c| after.tile_at(c.x, c.y))
                .map(|t| t.letter)
                .collect();
            prop_assert_eq!(&spelled, &word.word);

            prop_assert!(
                word.cells.iter().any(|c| placed.iter().any(|p| p.position() == *c)),
                "word {:?} does not touch the placement", word
            );
        }

        // A run of two or more lands in one line, so every placed tile is in some word
        if placed.len() >= 2 {
            prop_assert_eq!(words[0].horizontal, !vertical, "main word must come first");
            for tile in &placed {
                prop_assert!(
                    words.iter().any(|w| w.cells.contains(&tile.position())),
                    "placed tile {:?} missing from formed words", tile
                );
            }
        }

        let distinct: HashSet<_> = words.iter().map(|w| (w.horizontal, w.cells.clone())).collect();
        prop_assert_eq!(distinct.len(), words.len(), "duplicate words reported");
    }

    /// Property: scoring is a pure function and the total is the sum of its parts
    #[test]
    fn prop_scoring_is_deterministic(
        existing in existing_tiles(),
        vertical in any::<bool>(),
        line in 0..BOARD_SIZE,
        start in 0..BOARD_SIZE,
        run in proptest::collection::vec(letter(), 1..=RACK_SIZE),
    ) {
        let (board, placed) = setup(&existing, vertical, line, start, &run);
        let after = board.with_placements(&placed);
        let words = after.find_formed_words(&placed);
        let scorer = Scorer::default();

        let first = scorer.score(&words, &placed, &after);
        let second = scorer.score(&words, &placed, &after);
        prop_assert_eq!(&first, &second);

        let word_total: i32 = first.words.iter().map(|w| w.score).sum();
        prop_assert_eq!(first.total, word_total + first.bingo_bonus);
        prop_assert_eq!(first.is_bingo(), placed.len() == RACK_SIZE);
    }

    /// Property: rating changes are zero-sum and never punish the winner
    #[test]
    fn prop_elo_is_zero_sum(winner in 100i32..3000, loser in 100i32..3000) {
        let elo = EloCalculator::default();

        let result = elo.calculate(winner, loser);
        prop_assert_eq!(result.winner_change + result.loser_change, 0);
        prop_assert!(result.winner_change >= 0);
        prop_assert_eq!(result.winner_rating, winner + result.winner_change);

        let draw = elo.calculate_draw(winner, loser);
        prop_assert_eq!(draw.winner_change + draw.loser_change, 0);
    }

    /// Property: taking tiles from a rack is all-or-nothing
    #[test]
    fn prop_rack_removal_is_atomic(
        held in proptest::collection::vec(letter(), 0..=RACK_SIZE),
        wanted in proptest::collection::vec(letter(), 1..=RACK_SIZE),
    ) {
        let set = TileSet::for_language(Language::English);
        let mut rack = Rack::new(held.iter().map(|&c| set.tile_for(c)).collect());
        let wanted: Vec<Tile> = wanted.iter().map(|&c| set.tile_for(c)).collect();
        let before = rack.clone();

        match rack.remove_matching(&wanted) {
            Some(removed) => {
                prop_assert_eq!(removed.len(), wanted.len());
                prop_assert_eq!(rack.len() + wanted.len(), before.len());
            }
            None => {
                prop_assert_eq!(rack, before);
            }
        }
    }

    /// Property: drawing and returning tiles never loses or invents any
    #[test]
    fn prop_bag_conserves_tiles(seed in any::<u64>(), count in 0usize..=RACK_SIZE) {
        let mut rng = StdRng::seed_from_u64(seed);
        let set = TileSet::for_language(Language::Dutch);
        let mut bag = TileBag::new(set.all_tiles(), &mut rng);

        let drawn = bag.draw(count);
        prop_assert_eq!(bag.len() + drawn.len(), set.total_tiles());

        bag.return_tiles(drawn, &mut rng).unwrap();
        prop_assert_eq!(bag.len(), set.total_tiles());

        let mut letters: Vec<char> = bag.tiles().iter().map(|t| t.letter).collect();
        let mut expected: Vec<char> = set.all_tiles().iter().map(|t| t.letter).collect();
        letters.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(letters, expected);
    }
}

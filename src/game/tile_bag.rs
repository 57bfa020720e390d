use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

use crate::{error::GameError, models::Tile};

/// Undrawn tiles of one game. Never holds more than it was seeded with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileBag {
    tiles: Vec<Tile>,
    capacity: usize,
}

impl TileBag {
    /// Seed a bag with a uniformly shuffled copy of `tiles`
    pub fn new<R: Rng + ?Sized>(mut tiles: Vec<Tile>, rng: &mut R) -> Self {
        tiles.shuffle(rng);
        let capacity = tiles.len();
        Self { tiles, capacity }
    }

    /// Draw up to `count` tiles from the front of the bag
    pub fn draw(&mut self, count: usize) -> Vec<Tile> {
        let take = count.min(self.tiles.len());
        self.tiles.drain(..take).collect()
    }

    /// Put swapped tiles back and reshuffle
    pub fn return_tiles<R: Rng + ?Sized>(
        &mut self,
        tiles: Vec<Tile>,
        rng: &mut R,
    ) -> Result<(), GameError> {
        if self.tiles.len() + tiles.len() > self.capacity {
            return Err(GameError::BagOverflow {
                capacity: self.capacity,
            });
        }

        // Returned blanks go back unassigned
        self.tiles.extend(
            tiles
                .into_iter()
                .map(|t| if t.is_blank { Tile::blank() } else { t }),
        );
        self.tiles.shuffle(rng);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Size of the initial distribution
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn letters(n: usize) -> Vec<Tile> {
        (0..n)
            .map(|i| Tile::new((b'A' + (i % 26) as u8) as char, 1))
            .collect()
    }

    #[test]
    fn test_shuffle_keeps_every_tile() {
        let mut rng = StdRng::seed_from_u64(42);
        let source = letters(26);
        let bag = TileBag::new(source.clone(), &mut rng);

        let mut drawn: Vec<char> = bag.tiles().iter().map(|t| t.letter).collect();
        drawn.sort();
        let expected: Vec<char> = source.iter().map(|t| t.letter).collect();
        assert_eq!(drawn, expected);
        assert_eq!(bag.capacity(), 26);
    }

    #[test]
    fn test_draw_stops_at_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut bag = TileBag::new(letters(5), &mut rng);

        assert_eq!(bag.draw(3).len(), 3);
        assert_eq!(bag.draw(7).len(), 2);
        assert!(bag.is_empty());
        assert!(bag.draw(1).is_empty());
    }

    #[test]
    fn test_return_cannot_exceed_capacity() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut bag = TileBag::new(letters(10), &mut rng);
        let drawn = bag.draw(4);

        assert!(bag.return_tiles(drawn, &mut rng).is_ok());
        assert_eq!(bag.len(), 10);

        let err = bag.return_tiles(letters(1), &mut rng).unwrap_err();
        assert_eq!(err, GameError::BagOverflow { capacity: 10 });
        assert_eq!(bag.len(), 10);
    }

    #[test]
    fn test_returned_blank_is_unassigned() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut bag = TileBag::new(vec![Tile::blank()], &mut rng);
        bag.draw(1);

        bag.return_tiles(vec![Tile::assigned_blank('K')], &mut rng)
            .unwrap();
        assert_eq!(bag.tiles(), &[Tile::blank()]);
    }
}

use crate::{
    models::{Language, Tile},
    utils::letters::{get_letter_value, letter_table, BLANK_COUNT},
};

/// Letter inventory and point values for one language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSet {
    language: Language,
}

impl TileSet {
    pub fn for_language(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Expand the distribution table into concrete tiles, blanks excluded
    pub fn tiles(&self) -> Vec<Tile> {
        letter_table(self.language)
            .iter()
            .flat_map(|&(letter, count, points)| {
                std::iter::repeat(Tile::new(letter, points)).take(count as usize)
            })
            .collect()
    }

    pub fn blanks(&self) -> Vec<Tile> {
        vec![Tile::blank(); BLANK_COUNT as usize]
    }

    /// Every tile that seeds a new bag
    pub fn all_tiles(&self) -> Vec<Tile> {
        let mut tiles = self.tiles();
        tiles.extend(self.blanks());
        tiles
    }

    pub fn total_tiles(&self) -> usize {
        letter_table(self.language)
            .iter()
            .map(|&(_, count, _)| count as usize)
            .sum::<usize>()
            + BLANK_COUNT as usize
    }

    pub fn get_points_for_letter(&self, letter: char) -> u8 {
        get_letter_value(self.language, letter)
    }

    /// Build the tile a player means when placing `letter` from the rack
    pub fn tile_for(&self, letter: char) -> Tile {
        Tile::new(letter, self.get_points_for_letter(letter))
    }
}

use std::collections::HashMap;
use once_cell::sync::Lazy;

use crate::models::Language;

/// How many copies of a letter go into the bag, and what each is worth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterSpec {
    pub count: u8,
    pub points: u8,
}

/// Number of blank tiles per language
pub const BLANK_COUNT: u8 = 2;

/// English distribution: (letter, count, points)
const ENGLISH_TABLE: &[(char, u8, u8)] = &[
    ('A', 9, 1),
    ('B', 2, 3),
    ('C', 2, 3),
    ('D', 4, 2),
    ('E', 12, 1),
    ('F', 2, 4),
    ('G', 3, 2),
    ('H', 2, 4),
    ('I', 9, 1),
    ('J', 1, 8),
    ('K', 1, 5),
    ('L', 4, 1),
    ('M', 2, 3),
    ('N', 6, 1),
    ('O', 8, 1),
    ('P', 2, 3),
    ('Q', 1, 10),
    ('R', 6, 1),
    ('S', 4, 1),
    ('T', 6, 1),
    ('U', 4, 1),
    ('V', 2, 4),
    ('W', 2, 4),
    ('X', 1, 8),
    ('Y', 2, 4),
    ('Z', 1, 10),
];

/// Dutch distribution: (letter, count, points)
const DUTCH_TABLE: &[(char, u8, u8)] = &[
    ('A', 6, 1),
    ('B', 2, 3),
    ('C', 2, 5),
    ('D', 5, 2),
    ('E', 18, 1),
    ('F', 2, 4),
    ('G', 3, 3),
    ('H', 2, 4),
    ('I', 4, 1),
    ('J', 2, 4),
    ('K', 3, 3),
    ('L', 3, 3),
    ('M', 3, 3),
    ('N', 10, 1),
    ('O', 6, 1),
    ('P', 2, 3),
    ('Q', 1, 10),
    ('R', 5, 2),
    ('S', 5, 2),
    ('T', 5, 2),
    ('U', 3, 4),
    ('V', 2, 4),
    ('W', 2, 5),
    ('X', 1, 8),
    ('Y', 1, 8),
    ('Z', 2, 4),
];

pub static ENGLISH_LETTERS: Lazy<HashMap<char, LetterSpec>> =
    Lazy::new(|| build_lookup(ENGLISH_TABLE));

pub static DUTCH_LETTERS: Lazy<HashMap<char, LetterSpec>> =
    Lazy::new(|| build_lookup(DUTCH_TABLE));

fn build_lookup(table: &[(char, u8, u8)]) -> HashMap<char, LetterSpec> {
    let mut map = HashMap::with_capacity(table.len());
    for &(letter, count, points) in table {
        map.insert(letter, LetterSpec { count, points });
    }
    map
}

/// The raw table in alphabetical order
pub fn letter_table(language: Language) -> &'static [(char, u8, u8)] {
    match language {
        Language::English => ENGLISH_TABLE,
        Language::Dutch => DUTCH_TABLE,
    }
}

pub fn letter_lookup(language: Language) -> &'static HashMap<char, LetterSpec> {
    match language {
        Language::English => &ENGLISH_LETTERS,
        Language::Dutch => &DUTCH_LETTERS,
    }
}

/// Get the point value for a letter, 0 for unknown letters and blanks
pub fn get_letter_value(language: Language, letter: char) -> u8 {
    let upper = letter.to_ascii_uppercase();
    letter_lookup(language)
        .get(&upper)
        .map(|spec| spec.points)
        .unwrap_or(0)
}

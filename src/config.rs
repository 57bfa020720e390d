use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;

use crate::{
    game::{elo, scorer::BINGO_BONUS},
    models::RACK_SIZE,
};

/// Tunable rule constants. `Default` gives the standard game.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    pub bingo_bonus: i32,
    pub rack_size: usize,
    /// Tiles that must remain in the bag for a swap
    pub swap_minimum_bag: usize,
    /// Passes in a row each player must make before the game ends
    pub passes_per_player: u32,
    pub elo_k_factor: i32,
    pub elo_scale: i32,
    pub dictionary_path: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bingo_bonus: BINGO_BONUS,
            rack_size: RACK_SIZE,
            swap_minimum_bag: 7,
            passes_per_player: 2,
            elo_k_factor: elo::DEFAULT_K_FACTOR,
            elo_scale: elo::DEFAULT_SCALE,
            dictionary_path: "./dictionary.txt".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        Ok(EngineConfig {
            bingo_bonus: parse_var("BINGO_BONUS", defaults.bingo_bonus)?,
            rack_size: parse_var("RACK_SIZE", defaults.rack_size)?,
            swap_minimum_bag: parse_var("SWAP_MINIMUM_BAG", defaults.swap_minimum_bag)?,
            passes_per_player: parse_var("PASSES_PER_PLAYER", defaults.passes_per_player)?,
            elo_k_factor: parse_var("ELO_K_FACTOR", defaults.elo_k_factor)?,
            elo_scale: parse_var("ELO_SCALE", defaults.elo_scale)?,
            dictionary_path: env::var("DICTIONARY_PATH").unwrap_or(defaults.dictionary_path),
        })
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number", name)),
        Err(_) => Ok(default),
    }
}

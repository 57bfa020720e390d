use crate::{
    dictionary::WordOracle,
    game::board::{Board, FormedWord, CENTER},
    models::{Game, PlacedTile},
    rules::{derive_identifier, RuleResult, TURN_CATEGORY},
};

/// Everything a turn rule may look at. `board_after` is a tentative copy.
pub struct MoveContext<'a> {
    pub game: &'a Game,
    pub user_id: i64,
    pub placed: &'a [PlacedTile],
    pub board_before: &'a Board,
    pub board_after: &'a Board,
    pub words: &'a [FormedWord],
    pub dictionary: &'a dyn WordOracle,
}

impl MoveContext<'_> {
    pub fn is_first_move(&self) -> bool {
        self.board_before.is_empty()
    }

    fn same_row(&self) -> bool {
        self.placed.iter().all(|t| t.y == self.placed[0].y)
    }

    fn same_column(&self) -> bool {
        self.placed.iter().all(|t| t.x == self.placed[0].x)
    }
}

/// Validates the geometry and vocabulary of a placement
pub trait TurnRule: Send + Sync {
    /// Type name the identifier is derived from
    fn name(&self) -> &'static str;

    fn identifier(&self) -> String {
        derive_identifier(TURN_CATEGORY, self.name())
    }

    fn validate(&self, ctx: &MoveContext<'_>) -> RuleResult;
}

pub struct UnoccupiedSquareRule;

impl TurnRule for UnoccupiedSquareRule {
    fn name(&self) -> &'static str {
        "UnoccupiedSquareRule"
    }

    fn validate(&self, ctx: &MoveContext<'_>) -> RuleResult {
        let taken: Vec<String> = ctx
            .placed
            .iter()
            .filter(|t| ctx.board_before.is_occupied(t.x, t.y))
            .map(|t| t.position().to_string())
            .collect();

        RuleResult::check(
            self.identifier(),
            taken.is_empty(),
            format!("Square already occupied: {}", taken.join(", ")),
        )
    }
}

pub struct SingleLineRule;

impl TurnRule for SingleLineRule {
    fn name(&self) -> &'static str {
        "SingleLineRule"
    }

    fn validate(&self, ctx: &MoveContext<'_>) -> RuleResult {
        let ok = ctx.placed.is_empty() || ctx.same_row() || ctx.same_column();
        RuleResult::check(
            self.identifier(),
            ok,
            "All tiles must be placed in a single row or column",
        )
    }
}

/// No empty squares between the first and last placed tile. Existing tiles may fill gaps.
pub struct ContiguousPlacementRule;

impl TurnRule for ContiguousPlacementRule {
    fn name(&self) -> &'static str {
        "ContiguousPlacementRule"
    }

    fn validate(&self, ctx: &MoveContext<'_>) -> RuleResult {
        if ctx.placed.len() < 2 {
            return RuleResult::pass(self.identifier());
        }

        let contiguous = if ctx.same_row() {
            let y = ctx.placed[0].y;
            let min = ctx.placed.iter().map(|t| t.x).min().unwrap_or(0);
            let max = ctx.placed.iter().map(|t| t.x).max().unwrap_or(0);
            (min..=max).all(|x| ctx.board_after.is_occupied(x, y))
        } else if ctx.same_column() {
            let x = ctx.placed[0].x;
            let min = ctx.placed.iter().map(|t| t.y).min().unwrap_or(0);
            let max = ctx.placed.iter().map(|t| t.y).max().unwrap_or(0);
            (min..=max).all(|y| ctx.board_after.is_occupied(x, y))
        } else {
            // Reported by SingleLineRule
            true
        };

        RuleResult::check(
            self.identifier(),
            contiguous,
            "Placed tiles must not leave gaps",
        )
    }
}

pub struct CenterSquareRule;

impl TurnRule for CenterSquareRule {
    fn name(&self) -> &'static str {
        "CenterSquareRule"
    }

    fn validate(&self, ctx: &MoveContext<'_>) -> RuleResult {
        let ok = !ctx.is_first_move()
            || ctx.placed.iter().any(|t| t.x == CENTER && t.y == CENTER);
        RuleResult::check(
            self.identifier(),
            ok,
            "The first word must cover the center square",
        )
    }
}

pub struct ConnectedPlacementRule;

impl TurnRule for ConnectedPlacementRule {
    fn name(&self) -> &'static str {
        "ConnectedPlacementRule"
    }

    fn validate(&self, ctx: &MoveContext<'_>) -> RuleResult {
        let ok = ctx.is_first_move()
            || ctx
                .placed
                .iter()
                .any(|t| ctx.board_before.has_occupied_neighbor(t.x, t.y));
        RuleResult::check(
            self.identifier(),
            ok,
            "Tiles must connect to a word already on the board",
        )
    }
}

pub struct WordFormedRule;

impl TurnRule for WordFormedRule {
    fn name(&self) -> &'static str {
        "WordFormedRule"
    }

    fn validate(&self, ctx: &MoveContext<'_>) -> RuleResult {
        RuleResult::check(
            self.identifier(),
            !ctx.words.is_empty(),
            "A play must form a word of at least two letters",
        )
    }
}

/// Every formed word, main and cross, must be in the dictionary
pub struct DictionaryRule;

impl TurnRule for DictionaryRule {
    fn name(&self) -> &'static str {
        "DictionaryRule"
    }

    fn validate(&self, ctx: &MoveContext<'_>) -> RuleResult {
        let invalid: Vec<&str> = ctx
            .words
            .iter()
            .map(|w| w.word.as_str())
            .filter(|w| !ctx.dictionary.is_valid_word(w, ctx.game.language))
            .collect();

        RuleResult::check(
            self.identifier(),
            invalid.is_empty(),
            format!("Invalid word: {}", invalid.join(", ")),
        )
    }
}

// Puzzle session state: live board, move budget, retry
use crate::PuzzleError;
use crate::board::Board;
use crate::flood::apply_flood;
use crate::generator::Puzzle;

/// What a submitted move amounted to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move recolored cells and consumed one unit of budget.
    Applied {
        changed: Vec<(usize, usize)>,
        won: bool,
    },
    /// Blocker origin or same-color target; nothing changed and the
    /// budget was not touched.
    NoOp,
    /// The budget is spent; the caller decides between Retry and a new
    /// generation request.
    OutOfMoves,
}

/// One puzzle being played. Owns the frozen seed board (for Retry) and
/// the live board, which is replaced wholesale by each accepted move.
pub struct Game {
    puzzle: Puzzle,
    live: Board,
    moves_left: usize,
}

impl Game {
    pub fn new(puzzle: Puzzle) -> Game {
        let live = puzzle.board.clone();
        let moves_left = puzzle.move_budget;
        Game {
            puzzle,
            live,
            moves_left,
        }
    }

    pub fn board(&self) -> &Board {
        &self.live
    }

    pub fn seed_board(&self) -> &Board {
        &self.puzzle.board
    }

    pub fn goal(&self) -> u8 {
        self.puzzle.goal
    }

    pub fn moves_left(&self) -> usize {
        self.moves_left
    }

    pub fn is_won(&self) -> bool {
        self.live.is_uniform_to(self.puzzle.goal)
    }

    /// Submit one flood move. Out-of-bounds origins and out-of-palette
    /// colors are hard errors and leave the session untouched; no-ops are
    /// free; everything else costs one move.
    pub fn apply(
        &mut self,
        origin: (usize, usize),
        color: u8,
    ) -> Result<MoveOutcome, PuzzleError> {
        if self.moves_left == 0 {
            return Ok(MoveOutcome::OutOfMoves);
        }
        let outcome = apply_flood(&self.live, origin, color)?;
        if outcome.changed.is_empty() {
            return Ok(MoveOutcome::NoOp);
        }
        self.live = outcome.board;
        self.moves_left -= 1;
        Ok(MoveOutcome::Applied {
            changed: outcome.changed,
            won: self.is_won(),
        })
    }

    /// Reset the live board to the retained seed and refill the budget.
    pub fn retry(&mut self) {
        self.live = self.puzzle.board.clone();
        self.moves_left = self.puzzle.move_budget;
    }
}

// Puzzle generation: biased random sampling with verification, plus
// constructive reverse-generation that is solvable by construction
use std::str::FromStr;

use rand::rngs::ThreadRng;
use rand::{Rng, thread_rng};

use crate::PuzzleError;
use crate::board::{Board, Cell};
use crate::flood::apply_flood;
use crate::region::majority_color;
use crate::solver::{greedy_solves, is_solvable};

/// Fixed palette size of generated boards (blue, red, yellow, green).
pub const PALETTE_SIZE: u8 = 4;

/// How many sample-and-verify attempts before giving up and returning the
/// last sample unverified.
pub const MAX_ATTEMPTS: usize = 250;

/// Probability that a sampled cell takes the per-board bias color instead
/// of a uniform draw; the bias keeps random boards solvable often enough.
pub const BIAS_PCT: f64 = 0.55;

pub const MIN_ROWS: usize = 5;
pub const MAX_ROWS: usize = 14;
pub const MIN_COLS: usize = 5;
pub const MAX_COLS: usize = 18;

/// Rerolls allowed per constructive origin before falling back to the
/// board center.
const ORIGIN_RETRIES: usize = 200;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn params(self) -> DifficultyParams {
        match self {
            Difficulty::Easy => DifficultyParams {
                move_budget: 3,
                blocker_pct: 0.0,
            },
            Difficulty::Medium => DifficultyParams {
                move_budget: 4,
                blocker_pct: 0.0,
            },
            // only the hardest tier mixes in blockers
            Difficulty::Hard => DifficultyParams {
                move_budget: 5,
                blocker_pct: 0.08,
            },
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty {other:?} (easy|medium|hard)")),
        }
    }
}

/// Knobs a difficulty tier maps to. Public so tests and callers with
/// their own tiers can drive the generator directly.
#[derive(Clone, Copy, Debug)]
pub struct DifficultyParams {
    pub move_budget: usize,
    pub blocker_pct: f64,
}

/// A generated puzzle. `board` is the seed board, frozen at creation.
/// `verified == false` marks the attempt-cap fallback: the board was
/// accepted unconditionally and may not be solvable within the budget.
#[derive(Clone, Debug)]
pub struct Puzzle {
    pub board: Board,
    pub goal: u8,
    pub move_budget: usize,
    pub verified: bool,
}

/// A constructively generated puzzle plus the reverse origins that were
/// de-solved, in order. Replaying the origins forward, flooding each to
/// `goal`, restores a uniform board within the budget.
#[derive(Clone, Debug)]
pub struct Construction {
    pub puzzle: Puzzle,
    pub origins: Vec<(usize, usize)>,
}

pub fn validate_dimensions(rows: usize, cols: usize) -> Result<(), PuzzleError> {
    // policy: out-of-range dimensions are rejected, not clamped
    if (MIN_ROWS..=MAX_ROWS).contains(&rows) && (MIN_COLS..=MAX_COLS).contains(&cols) {
        Ok(())
    } else {
        Err(PuzzleError::InvalidDimensions { rows, cols })
    }
}

/// One sample-and-verify generation attempt per `step()` call, so a host
/// can interleave attempts with other work instead of blocking on the
/// whole search. Dropping the task cancels it; a superseded task's
/// partial work is simply discarded with it.
pub struct GenerationTask<R: Rng> {
    params: DifficultyParams,
    rows: usize,
    cols: usize,
    rng: R,
    attempts: usize,
}

impl GenerationTask<ThreadRng> {
    pub fn new(
        difficulty: Difficulty,
        rows: usize,
        cols: usize,
    ) -> Result<GenerationTask<ThreadRng>, PuzzleError> {
        GenerationTask::with_rng(difficulty.params(), rows, cols, thread_rng())
    }
}

impl<R: Rng> GenerationTask<R> {
    pub fn with_rng(
        params: DifficultyParams,
        rows: usize,
        cols: usize,
        rng: R,
    ) -> Result<GenerationTask<R>, PuzzleError> {
        validate_dimensions(rows, cols)?;
        Ok(GenerationTask {
            params,
            rows,
            cols,
            rng,
            attempts: 0,
        })
    }

    /// Attempts performed so far; doubles as the in-progress signal for a
    /// host that renders a busy indicator between steps.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Run one attempt. `None` means the sample was rejected and another
    /// step is needed; `Some` carries the finished puzzle, either verified
    /// or the unverified cap fallback.
    pub fn step(&mut self) -> Option<Puzzle> {
        self.attempts += 1;
        let board = random_board(&mut self.rng, self.params, self.rows, self.cols);
        // a board with no colored cell is unplayable no matter what the
        // solver would say about it
        let Some(goal) = majority_color(&board) else {
            return None;
        };
        let k = self.params.move_budget;
        if greedy_solves(&board, goal, k) || is_solvable(&board, goal, k) {
            return Some(Puzzle {
                board,
                goal,
                move_budget: k,
                verified: true,
            });
        }
        if self.attempts >= MAX_ATTEMPTS {
            // degraded fallback: hand out the last sample rather than
            // spin forever, and let the caller see that through the flag
            return Some(Puzzle {
                board,
                goal,
                move_budget: k,
                verified: false,
            });
        }
        None
    }
}

/// Sample boards until one verifies as solvable within the difficulty's
/// budget, or the attempt cap degrades to the last sample (observable via
/// `Puzzle::verified`). Runs all attempts back to back; use
/// `GenerationTask` directly to interleave them.
pub fn generate(difficulty: Difficulty, rows: usize, cols: usize) -> Result<Puzzle, PuzzleError> {
    let mut task = GenerationTask::new(difficulty, rows, cols)?;
    loop {
        if let Some(puzzle) = task.step() {
            return Ok(puzzle);
        }
    }
}

/// Reverse-generate a puzzle that is solvable by construction: start
/// uniform in a random goal, optionally sprinkle blockers, then de-solve
/// with `move_budget` flood moves away from the goal. No search needed.
pub fn generate_constructive(
    difficulty: Difficulty,
    rows: usize,
    cols: usize,
) -> Result<Construction, PuzzleError> {
    generate_constructive_with_rng(difficulty.params(), rows, cols, &mut thread_rng())
}

pub fn generate_constructive_with_rng<R: Rng>(
    params: DifficultyParams,
    rows: usize,
    cols: usize,
    rng: &mut R,
) -> Result<Construction, PuzzleError> {
    validate_dimensions(rows, cols)?;
    let goal = rng.gen_range(0..PALETTE_SIZE);
    let mut board = Board::uniform(rows, cols, PALETTE_SIZE, Cell::Color(goal));

    // blockers go in first so the reverse steps already respect them;
    // the center stays colored by generation policy
    if params.blocker_pct > 0.0 {
        let center = board.center();
        for r in 0..rows {
            for c in 0..cols {
                if (r, c) != center && rng.gen_bool(params.blocker_pct) {
                    board.set(r, c, Cell::Blocker);
                }
            }
        }
    }

    let k = params.move_budget;
    let mut origins = Vec::with_capacity(k);
    for _ in 0..k {
        let mut origin = board.center();
        for _ in 0..ORIGIN_RETRIES {
            let candidate = (rng.gen_range(0..rows), rng.gen_range(0..cols));
            if !board.get(candidate.0, candidate.1).is_blocker() {
                origin = candidate;
                break;
            }
        }
        origins.push(origin);
    }

    // de-solve one step at a time; each reverse step is a single valid
    // flood move, so replaying the origins forward to `goal` restores the
    // uniform board in at most k moves
    for &origin in &origins {
        let color = off_goal_color(rng, goal);
        board = apply_flood(&board, origin, color)?.board;
    }

    Ok(Construction {
        puzzle: Puzzle {
            board,
            goal,
            move_budget: k,
            verified: true,
        },
        origins,
    })
}

fn random_board<R: Rng>(
    rng: &mut R,
    params: DifficultyParams,
    rows: usize,
    cols: usize,
) -> Board {
    let bias = rng.gen_range(0..PALETTE_SIZE);
    let mut cells = Vec::with_capacity(rows * cols);
    for _ in 0..rows * cols {
        let cell = if params.blocker_pct > 0.0 && rng.gen_bool(params.blocker_pct) {
            Cell::Blocker
        } else if rng.gen_bool(BIAS_PCT) {
            Cell::Color(bias)
        } else {
            Cell::Color(rng.gen_range(0..PALETTE_SIZE))
        };
        cells.push(cell);
    }
    let mut board = Board::from_cells(rows, cols, PALETTE_SIZE, cells);
    // the center cell is never a blocker, by generation policy
    let center = board.center();
    if board.get(center.0, center.1).is_blocker() {
        board.set(center.0, center.1, Cell::Color(bias));
    }
    board
}

/// Uniform draw over the palette excluding `goal`.
fn off_goal_color<R: Rng>(rng: &mut R, goal: u8) -> u8 {
    let c = rng.gen_range(0..PALETTE_SIZE - 1);
    if c >= goal { c + 1 } else { c }
}

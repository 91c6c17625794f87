//! Core engine for "Overflowing Palette", a flood-fill color puzzle.
//!
//! The library covers the board model, the flood move primitive,
//! connected-region analysis, depth-bounded solvability search and the
//! puzzle generator. Presentation concerns (rendering, animation, input)
//! live with the caller; it consumes boards, goal colors, move budgets
//! and per-move changed-cell sets through the types exported here.

use std::error::Error;
use std::fmt;

pub mod board;
pub mod flood;
pub mod game;
pub mod generator;
pub mod region;
pub mod solver;

pub use board::{Board, Cell};
pub use flood::{FloodOutcome, apply_flood};
pub use game::{Game, MoveOutcome};
pub use generator::{Difficulty, GenerationTask, Puzzle, generate, generate_constructive};
pub use solver::{greedy_solves, is_solvable};

/// Hard-failure conditions. Expected game situations (no-op moves,
/// generation falling back to an unverified board) are ordinary results,
/// not errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PuzzleError {
    /// Requested board dimensions outside the supported range.
    InvalidDimensions { rows: usize, cols: usize },
    /// Move origin outside the board.
    InvalidMove { origin: (usize, usize), rows: usize, cols: usize },
    /// Color index outside the board's palette.
    InvalidColor { color: u8, colors: u8 },
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PuzzleError::InvalidDimensions { rows, cols } => write!(
                f,
                "board dimensions {rows}x{cols} outside supported range {}..={} x {}..={}",
                generator::MIN_ROWS,
                generator::MAX_ROWS,
                generator::MIN_COLS,
                generator::MAX_COLS,
            ),
            PuzzleError::InvalidMove { origin, rows, cols } => write!(
                f,
                "move origin ({}, {}) outside {rows}x{cols} board",
                origin.0, origin.1
            ),
            PuzzleError::InvalidColor { color, colors } => {
                write!(f, "color index {color} outside palette of {colors} colors")
            }
        }
    }
}

impl Error for PuzzleError {}

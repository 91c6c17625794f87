// CLI harness around the core engine: generate puzzles, apply single moves
use std::env;
use std::error::Error;
use std::io::Read;

use serde::Serialize;

use overflowing_palette::board::{Board, Cell};
use overflowing_palette::flood::apply_flood;
use overflowing_palette::generator::{self, Difficulty};

const COLOR_NAMES: [&str; 4] = ["blue", "red", "yellow", "green"];

const USAGE: &str = "\
usage: overflowing-palette <command>
  generate <easy|medium|hard> <rows> <cols> [--constructive] [--json]
      generate a puzzle; prints the board, goal color, move budget and
      whether solvability was verified
  apply <row> <col> <color> [--json]
      read a board from stdin (one line per row, digits for colors, # for
      blockers), apply one flood move, print the new board and the
      changed cells";

#[derive(Serialize)]
struct PuzzleOutput {
    board: Vec<Vec<i16>>,
    goal: u8,
    goal_name: &'static str,
    move_budget: usize,
    verified: bool,
}

#[derive(Serialize)]
struct MoveOutput {
    board: Vec<Vec<i16>>,
    changed: Vec<(usize, usize)>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut json = false;
    let mut constructive = false;
    let mut positional: Vec<&str> = Vec::new();
    for arg in &args {
        match arg.as_str() {
            "--json" => json = true,
            "--constructive" => constructive = true,
            flag if flag.starts_with("--") => {
                return Err(format!("unknown flag {flag}\n{USAGE}").into());
            }
            value => positional.push(value),
        }
    }

    match positional.as_slice() {
        &["generate", difficulty, rows, cols] => {
            cmd_generate(difficulty, rows, cols, constructive, json)
        }
        &["apply", row, col, color] => cmd_apply(row, col, color, json),
        _ => Err(USAGE.into()),
    }
}

fn cmd_generate(
    difficulty: &str,
    rows: &str,
    cols: &str,
    constructive: bool,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let difficulty: Difficulty = difficulty.parse()?;
    let rows: usize = rows.parse()?;
    let cols: usize = cols.parse()?;

    let puzzle = if constructive {
        generator::generate_constructive(difficulty, rows, cols)?.puzzle
    } else {
        generator::generate(difficulty, rows, cols)?
    };

    if json {
        let output = PuzzleOutput {
            board: board_rows(&puzzle.board),
            goal: puzzle.goal,
            goal_name: COLOR_NAMES[puzzle.goal as usize],
            move_budget: puzzle.move_budget,
            verified: puzzle.verified,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        print!("{}", puzzle.board);
        println!(
            "goal: {} ({})",
            COLOR_NAMES[puzzle.goal as usize], puzzle.goal
        );
        println!("moves: {}", puzzle.move_budget);
        println!("verified: {}", puzzle.verified);
    }
    Ok(())
}

fn cmd_apply(row: &str, col: &str, color: &str, json: bool) -> Result<(), Box<dyn Error>> {
    let origin = (row.parse::<usize>()?, col.parse::<usize>()?);
    let color: u8 = color.parse()?;

    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    let board = Board::parse(&text, generator::PALETTE_SIZE)?;

    let outcome = apply_flood(&board, origin, color)?;

    if json {
        let output = MoveOutput {
            board: board_rows(&outcome.board),
            changed: outcome.changed,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        print!("{}", outcome.board);
        if outcome.changed.is_empty() {
            println!("changed: (none)");
        } else {
            let list: Vec<String> = outcome
                .changed
                .iter()
                .map(|&(r, c)| format!("({r},{c})"))
                .collect();
            println!("changed: {}", list.join(" "));
        }
    }
    Ok(())
}

/// Board as rows of palette indices with -1 for blockers, the shape the
/// presentation layer consumes.
fn board_rows(board: &Board) -> Vec<Vec<i16>> {
    (0..board.rows())
        .map(|r| {
            (0..board.cols())
                .map(|c| match board.get(r, c) {
                    Cell::Color(idx) => i16::from(idx),
                    Cell::Blocker => -1,
                })
                .collect()
        })
        .collect()
}

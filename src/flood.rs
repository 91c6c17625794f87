// Flood move primitive: recolor the connected monochrome region at an origin
use std::collections::VecDeque;

use crate::PuzzleError;
use crate::board::{Board, Cell};

/// Result of one flood application: the successor board and the
/// coordinates whose color changed, in visitation order.
#[derive(Clone, Debug)]
pub struct FloodOutcome {
    pub board: Board,
    pub changed: Vec<(usize, usize)>,
}

/// Recolor the maximal 4-connected region of the origin's color to
/// `target`, returning a new board; the input board is never touched.
///
/// An out-of-bounds origin or out-of-palette color is a hard error. A
/// blocker origin, or a target equal to the origin's current color, is a
/// semantic no-op: the returned board is an unchanged copy and `changed`
/// is empty. Callers must not charge a move for a no-op.
pub fn apply_flood(
    board: &Board,
    origin: (usize, usize),
    target: u8,
) -> Result<FloodOutcome, PuzzleError> {
    if !board.in_bounds(origin.0, origin.1) {
        return Err(PuzzleError::InvalidMove {
            origin,
            rows: board.rows(),
            cols: board.cols(),
        });
    }
    if target >= board.colors() {
        return Err(PuzzleError::InvalidColor {
            color: target,
            colors: board.colors(),
        });
    }

    let mut next = board.clone();
    // Capture the origin's color before any recoloring; it defines the
    // region boundary for the whole traversal.
    let base = match board.get(origin.0, origin.1).color() {
        Some(c) if c != target => c,
        _ => {
            return Ok(FloodOutcome {
                board: next,
                changed: Vec::new(),
            });
        }
    };

    let mut visited = vec![false; board.rows() * board.cols()];
    let mut changed = Vec::new();
    let mut queue = VecDeque::new();
    visited[origin.0 * board.cols() + origin.1] = true;
    queue.push_back(origin);

    while let Some((r, c)) = queue.pop_front() {
        next.set(r, c, Cell::Color(target));
        changed.push((r, c));
        for (nr, nc) in board.neighbors(r, c) {
            let idx = nr * board.cols() + nc;
            if !visited[idx] && board.get(nr, nc) == Cell::Color(base) {
                visited[idx] = true;
                queue.push_back((nr, nc));
            }
        }
    }

    Ok(FloodOutcome {
        board: next,
        changed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(text: &str) -> Board {
        Board::parse(text, 4).unwrap()
    }

    #[test]
    fn recolors_exactly_the_connected_region() {
        // colors: 0 in an L, 1 in the corner
        let start = board("00\n10\n");
        let out = apply_flood(&start, (1, 0), 0).unwrap();
        assert_eq!(out.board, board("00\n00\n"));
        assert_eq!(out.changed, vec![(1, 0)]);
        assert!(out.board.is_uniform_to(0));
    }

    #[test]
    fn different_color_is_a_hard_boundary() {
        let start = board("001\n011\n111\n");
        let out = apply_flood(&start, (0, 0), 2).unwrap();
        assert_eq!(out.board, board("221\n211\n111\n"));
        let mut changed = out.changed.clone();
        changed.sort();
        assert_eq!(changed, vec![(0, 0), (0, 1), (1, 0)]);
    }

    #[test]
    fn blockers_are_never_recolored_or_reported() {
        let start = board("0#0\n000\n");
        let out = apply_flood(&start, (0, 0), 3).unwrap();
        assert!(out.changed.iter().all(|&(r, c)| !start.get(r, c).is_blocker()));
        assert_eq!(out.board.get(0, 1), Cell::Blocker);
        // the far 0 is reachable around the blocker
        assert_eq!(out.board, board("3#3\n333\n"));
    }

    #[test]
    fn blocker_origin_is_a_no_op() {
        let start = board("0#\n00\n");
        let out = apply_flood(&start, (0, 1), 2).unwrap();
        assert_eq!(out.board, start);
        assert!(out.changed.is_empty());
    }

    #[test]
    fn same_color_target_is_a_no_op() {
        let start = board("01\n01\n");
        let out = apply_flood(&start, (0, 0), 0).unwrap();
        assert_eq!(out.board, start);
        assert!(out.changed.is_empty());
    }

    #[test]
    fn second_application_is_idempotent() {
        let start = board("012\n112\n");
        let first = apply_flood(&start, (1, 0), 3).unwrap();
        assert!(!first.changed.is_empty());
        let second = apply_flood(&first.board, (1, 0), 3).unwrap();
        assert_eq!(second.board, first.board);
        assert!(second.changed.is_empty());
    }

    #[test]
    fn input_board_is_left_untouched() {
        let start = board("00\n00\n");
        let copy = start.clone();
        let _ = apply_flood(&start, (0, 0), 1).unwrap();
        assert_eq!(start, copy);
    }

    #[test]
    fn out_of_bounds_origin_is_rejected() {
        let start = board("00\n00\n");
        assert_eq!(
            apply_flood(&start, (2, 0), 1).unwrap_err(),
            PuzzleError::InvalidMove {
                origin: (2, 0),
                rows: 2,
                cols: 2
            }
        );
    }

    #[test]
    fn out_of_palette_color_is_rejected() {
        let start = board("00\n00\n");
        assert_eq!(
            apply_flood(&start, (0, 0), 4).unwrap_err(),
            PuzzleError::InvalidColor { color: 4, colors: 4 }
        );
    }
}

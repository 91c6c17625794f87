// Depth-bounded solvability search over flood moves
use std::collections::HashSet;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::board::Board;
use crate::flood::apply_flood;
use crate::region::{largest_component_size, non_goal_components, region_seeds};

/// Branching cap: only the most promising candidate moves survive at each
/// node. Keeps the search tractable; completeness under the cap is not
/// asserted anywhere.
const MAX_BRANCH: usize = 18;

/// True iff some sequence of at most `max_depth` flood moves drives every
/// non-blocker cell to `goal`. Deterministic for a given board; contains
/// no randomness.
///
/// `max_depth == 0` reduces to the uniformity check, which an all-blocker
/// board passes vacuously.
pub fn is_solvable(board: &Board, goal: u8, max_depth: usize) -> bool {
    let mut seen = HashSet::new();
    dfs(board, goal, max_depth, 0, &mut seen)
}

fn dfs(
    board: &Board,
    goal: u8,
    max_depth: usize,
    depth: usize,
    seen: &mut HashSet<(u64, usize)>,
) -> bool {
    if board.is_uniform_to(goal) {
        return true;
    }
    if depth >= max_depth {
        return false;
    }
    // Optimistic lower bound: one move absorbs at most one whole foreign
    // component.
    if non_goal_components(board, goal) > max_depth - depth {
        return false;
    }
    // The same board can succeed at a shallower depth after failing at a
    // deeper one, so the depth is part of the key.
    if !seen.insert((board_key(board), depth)) {
        return false;
    }

    let mut candidates = candidate_moves(board, goal);
    candidates.sort_by(|a, b| b.1.cmp(&a.1));
    candidates.truncate(MAX_BRANCH);
    for (next, _gain) in candidates {
        if dfs(&next, goal, max_depth, depth + 1, seen) {
            return true;
        }
    }
    false
}

/// Greedy single-path check: repeatedly take the move that grows the
/// largest goal-colored component the most, without backtracking. Cheaper
/// than the DFS and sound on success (the path taken is itself a witness
/// sequence), but it can report false negatives.
pub fn greedy_solves(board: &Board, goal: u8, max_depth: usize) -> bool {
    let mut current = board.clone();
    for _ in 0..max_depth {
        if current.is_uniform_to(goal) {
            return true;
        }
        let mut best: Option<(Board, usize)> = None;
        for (next, gain) in candidate_moves(&current, goal) {
            if best.as_ref().is_none_or(|&(_, g)| gain > g) {
                best = Some((next, gain));
            }
        }
        match best {
            Some((next, _)) => current = next,
            None => break,
        }
    }
    current.is_uniform_to(goal)
}

/// Candidate successor boards: one seed per region crossed with every
/// color other than the seed cell's own, scored by the largest
/// goal-colored component they produce. No-change moves are dropped.
fn candidate_moves(board: &Board, goal: u8) -> Vec<(Board, usize)> {
    let mut moves = Vec::new();
    for seed in region_seeds(board) {
        // a centroid can land on a blocker of a neighboring shape
        let Some(base) = board.get(seed.0, seed.1).color() else {
            continue;
        };
        for color in 0..board.colors() {
            if color == base {
                continue;
            }
            let Ok(outcome) = apply_flood(board, seed, color) else {
                continue;
            };
            if outcome.changed.is_empty() {
                continue;
            }
            let gain = largest_component_size(&outcome.board, goal);
            moves.push((outcome.board, gain));
        }
    }
    moves
}

/// Structural content hash of the cell matrix, used as the memo key
/// together with the depth.
fn board_key(board: &Board) -> u64 {
    let mut hasher = DefaultHasher::new();
    board.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(text: &str) -> Board {
        Board::parse(text, 4).unwrap()
    }

    #[test]
    fn uniform_board_is_solvable_in_zero_moves() {
        let b = board("11\n11\n");
        assert!(is_solvable(&b, 1, 0));
        assert!(!is_solvable(&b, 0, 0));
    }

    #[test]
    fn all_blocker_board_is_vacuously_solvable() {
        let b = board("#");
        assert!(is_solvable(&b, 2, 0));
    }

    #[test]
    fn one_region_to_absorb_takes_one_move() {
        let b = board("00\n10\n");
        assert!(is_solvable(&b, 0, 1));
        assert!(!is_solvable(&b, 0, 0));
    }

    #[test]
    fn checkerboard_is_not_solvable_in_one_move() {
        let b = Board::parse("0101\n1010\n0101\n1010\n", 2).unwrap();
        assert!(!is_solvable(&b, 0, 1));
        assert!(!is_solvable(&b, 1, 1));
    }

    #[test]
    fn nested_rings_need_one_move_per_layer() {
        let b = board("111\n101\n111\n");
        assert!(is_solvable(&b, 1, 1));
        // turning everything to 0 takes flooding the ring, then the whole
        assert!(is_solvable(&b, 0, 2));
        assert!(!is_solvable(&b, 0, 0));
    }

    #[test]
    fn blockers_split_the_board_into_independent_parts() {
        let b = board("1#2\n1#2\n");
        // each side needs its own move toward goal 0
        assert!(is_solvable(&b, 0, 2));
        assert!(!is_solvable(&b, 0, 1));
    }

    #[test]
    fn greedy_succeeds_on_straightforward_boards() {
        let b = board("000\n010\n000\n");
        assert!(greedy_solves(&b, 0, 1));
    }

    #[test]
    fn greedy_never_claims_more_than_the_budget_allows() {
        let b = Board::parse("0101\n1010\n0101\n1010\n", 2).unwrap();
        assert!(!greedy_solves(&b, 0, 1));
        assert!(!greedy_solves(&b, 1, 1));
    }

    #[test]
    fn search_is_deterministic() {
        let b = board("0123\n3210\n0123\n");
        let first = is_solvable(&b, 2, 3);
        for _ in 0..3 {
            assert_eq!(is_solvable(&b, 2, 3), first);
        }
    }
}

// Connected-component analysis over the board
use std::collections::VecDeque;

use crate::board::Board;

/// Maximal 4-connected set of non-blocker cells sharing one color.
#[derive(Clone, Debug)]
pub struct Region {
    pub color: u8,
    pub cells: Vec<(usize, usize)>,
    /// Rounded mean coordinate of the members. On irregular shapes it can
    /// fall outside the member set (even on a blocker); it is used as-is,
    /// without re-clamping to a member cell.
    pub centroid: (usize, usize),
}

impl Region {
    pub fn size(&self) -> usize {
        self.cells.len()
    }
}

/// Partition all non-blocker cells into maximal same-color components.
pub fn connected_regions(board: &Board) -> Vec<Region> {
    let mut seen = vec![false; board.rows() * board.cols()];
    let mut regions = Vec::new();

    for (r, c) in board.coords() {
        let idx = r * board.cols() + c;
        if seen[idx] {
            continue;
        }
        let Some(color) = board.get(r, c).color() else {
            continue;
        };
        seen[idx] = true;

        let mut cells = Vec::new();
        let mut row_sum = 0usize;
        let mut col_sum = 0usize;
        let mut queue = VecDeque::new();
        queue.push_back((r, c));
        while let Some((cr, cc)) = queue.pop_front() {
            cells.push((cr, cc));
            row_sum += cr;
            col_sum += cc;
            for (nr, nc) in board.neighbors(cr, cc) {
                let nidx = nr * board.cols() + nc;
                if !seen[nidx] && board.get(nr, nc).color() == Some(color) {
                    seen[nidx] = true;
                    queue.push_back((nr, nc));
                }
            }
        }

        let n = cells.len() as f64;
        let centroid = (
            (row_sum as f64 / n).round() as usize,
            (col_sum as f64 / n).round() as usize,
        );
        regions.push(Region {
            color,
            cells,
            centroid,
        });
    }

    regions
}

/// One representative coordinate per region (the centroid). Bounds the
/// solver's move-origin candidates to one seed per region instead of
/// every cell.
pub fn region_seeds(board: &Board) -> Vec<(usize, usize)> {
    connected_regions(board)
        .into_iter()
        .map(|region| region.centroid)
        .collect()
}

/// Size of the largest connected component of `color`.
pub fn largest_component_size(board: &Board, color: u8) -> usize {
    connected_regions(board)
        .iter()
        .filter(|region| region.color == color)
        .map(Region::size)
        .max()
        .unwrap_or(0)
}

/// Non-blocker color with the highest cell count; ties go to the lowest
/// color index. `None` when the board holds no colored cell.
pub fn majority_color(board: &Board) -> Option<u8> {
    let mut counts = vec![0usize; board.colors() as usize];
    for (r, c) in board.coords() {
        if let Some(color) = board.get(r, c).color() {
            counts[color as usize] += 1;
        }
    }
    let mut best: Option<u8> = None;
    for (color, &count) in counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        if best.is_none_or(|b| count > counts[b as usize]) {
            best = Some(color as u8);
        }
    }
    best
}

/// Count of components whose color is neither `goal` nor blocker. An
/// optimistic lower bound on the moves still needed (each move can absorb
/// at most one whole foreign component in the best case).
pub fn non_goal_components(board: &Board, goal: u8) -> usize {
    connected_regions(board)
        .iter()
        .filter(|region| region.color != goal)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(text: &str) -> Board {
        Board::parse(text, 4).unwrap()
    }

    #[test]
    fn regions_partition_the_non_blocker_cells() {
        let b = board("001\n0#1\n221\n");
        let regions = connected_regions(&b);
        let mut covered: Vec<(usize, usize)> = regions
            .iter()
            .flat_map(|region| region.cells.iter().copied())
            .collect();
        covered.sort();
        let mut expected: Vec<(usize, usize)> = b
            .coords()
            .filter(|&(r, c)| !b.get(r, c).is_blocker())
            .collect();
        expected.sort();
        // no omission
        assert_eq!(covered, expected);
        // no overlap
        covered.dedup();
        assert_eq!(covered.len(), b.non_blocker_count());
        // every region is monochrome
        for region in &regions {
            assert!(
                region
                    .cells
                    .iter()
                    .all(|&(r, c)| b.get(r, c).color() == Some(region.color))
            );
        }
    }

    #[test]
    fn region_count_matches_structure() {
        let b = board("001\n0#1\n221\n");
        // three 0s, three 1s, two 2s
        assert_eq!(connected_regions(&b).len(), 3);
    }

    #[test]
    fn centroid_may_fall_outside_the_region() {
        // a ring of 0s around a single 1; the ring's mean rounds to the center
        let b = board("000\n010\n000\n");
        let regions = connected_regions(&b);
        let ring = regions.iter().find(|region| region.color == 0).unwrap();
        assert_eq!(ring.centroid, (1, 1));
        assert!(!ring.cells.contains(&ring.centroid));
    }

    #[test]
    fn seeds_give_one_coordinate_per_region() {
        let b = board("01\n23\n");
        assert_eq!(region_seeds(&b).len(), 4);
    }

    #[test]
    fn largest_component_size_picks_the_biggest() {
        let b = board("010\n010\n020\n");
        // color 0 splits into a left column of 3 and a right column of 3
        assert_eq!(largest_component_size(&b, 0), 3);
        assert_eq!(largest_component_size(&b, 1), 2);
        assert_eq!(largest_component_size(&b, 2), 1);
        assert_eq!(largest_component_size(&b, 3), 0);
    }

    #[test]
    fn majority_breaks_ties_toward_the_lowest_index() {
        let b = board("01\n10\n");
        assert_eq!(majority_color(&b), Some(0));
        let c = board("11\n10\n");
        assert_eq!(majority_color(&c), Some(1));
    }

    #[test]
    fn majority_of_all_blocker_board_is_none() {
        let b = board("##\n##\n");
        assert_eq!(majority_color(&b), None);
    }

    #[test]
    fn non_goal_components_skips_goal_and_blockers() {
        let b = board("001\n0#1\n221\n");
        assert_eq!(non_goal_components(&b, 0), 2);
        assert_eq!(non_goal_components(&b, 1), 2);
        assert_eq!(non_goal_components(&b, 3), 3);
    }
}

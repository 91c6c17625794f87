// Board and cell model for the flood puzzle
use std::fmt;

/// One grid cell: a palette color index, or an inert blocker. Blockers
/// never match any color, are never recolored and are excluded from win
/// checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Color(u8),
    Blocker,
}

impl Cell {
    pub fn color(self) -> Option<u8> {
        match self {
            Cell::Color(c) => Some(c),
            Cell::Blocker => None,
        }
    }

    pub fn is_blocker(self) -> bool {
        matches!(self, Cell::Blocker)
    }
}

/// Rows x cols grid of cells with value semantics: every operation that
/// would change a cell returns a new `Board`, and no mutable reference to
/// the storage ever escapes. `colors` is the palette size the board was
/// built against.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    colors: u8,
    cells: Vec<Cell>,
}

impl Board {
    /// Board with every cell set to `fill`.
    pub fn uniform(rows: usize, cols: usize, colors: u8, fill: Cell) -> Board {
        assert!(rows > 0 && cols > 0, "board must have at least one cell");
        assert!(colors >= 2, "palette needs at least two colors");
        Board {
            rows,
            cols,
            colors,
            cells: vec![fill; rows * cols],
        }
    }

    /// Board from row-major cells. Panics when `cells` does not match the
    /// dimensions; construction sites own that invariant.
    pub fn from_cells(rows: usize, cols: usize, colors: u8, cells: Vec<Cell>) -> Board {
        assert_eq!(cells.len(), rows * cols, "cell count must match dimensions");
        assert!(colors >= 2, "palette needs at least two colors");
        Board {
            rows,
            cols,
            colors,
            cells,
        }
    }

    /// Parse the text form: one line per row, a digit per color index,
    /// `#` for a blocker.
    pub fn parse(text: &str, colors: u8) -> Result<Board, String> {
        let mut cells = Vec::new();
        let mut cols = 0usize;
        let mut rows = 0usize;
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut width = 0usize;
            for ch in line.chars() {
                let cell = match ch {
                    '#' => Cell::Blocker,
                    '0'..='9' => {
                        let idx = ch as u8 - b'0';
                        if idx >= colors {
                            return Err(format!(
                                "color index {idx} outside palette of {colors} colors"
                            ));
                        }
                        Cell::Color(idx)
                    }
                    _ => return Err(format!("unexpected character {ch:?} in board text")),
                };
                cells.push(cell);
                width += 1;
            }
            if rows == 0 {
                cols = width;
            } else if width != cols {
                return Err(format!("row {rows} has {width} cells, expected {cols}"));
            }
            rows += 1;
        }
        if rows == 0 || cols == 0 {
            return Err("board text is empty".to_string());
        }
        Ok(Board::from_cells(rows, cols, colors, cells))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn colors(&self) -> u8 {
        self.colors
    }

    pub fn in_bounds(&self, r: usize, c: usize) -> bool {
        r < self.rows && c < self.cols
    }

    pub fn get(&self, r: usize, c: usize) -> Cell {
        debug_assert!(self.in_bounds(r, c));
        self.cells[r * self.cols + c]
    }

    pub(crate) fn set(&mut self, r: usize, c: usize, cell: Cell) {
        debug_assert!(self.in_bounds(r, c));
        self.cells[r * self.cols + c] = cell;
    }

    pub fn center(&self) -> (usize, usize) {
        (self.rows / 2, self.cols / 2)
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.rows).flat_map(move |r| (0..self.cols).map(move |c| (r, c)))
    }

    /// In-bounds 4-connected neighbors of (r, c).
    pub fn neighbors(&self, r: usize, c: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        const DELTAS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        DELTAS.into_iter().filter_map(move |(dr, dc)| {
            let nr = r.checked_add_signed(dr)?;
            let nc = c.checked_add_signed(dc)?;
            (nr < self.rows && nc < self.cols).then_some((nr, nc))
        })
    }

    /// True when every non-blocker cell carries `goal`. An all-blocker
    /// board is vacuously uniform to every color.
    pub fn is_uniform_to(&self, goal: u8) -> bool {
        self.cells
            .iter()
            .all(|cell| cell.color().is_none_or(|c| c == goal))
    }

    pub fn non_blocker_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_blocker()).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            for c in 0..self.cols {
                match self.get(r, c) {
                    Cell::Color(idx) => write!(f, "{idx}")?,
                    Cell::Blocker => write!(f, "#")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_round_trip() {
        let text = "0123\n#230\n1111\n";
        let board = Board::parse(text, 4).unwrap();
        assert_eq!(board.rows(), 3);
        assert_eq!(board.cols(), 4);
        assert_eq!(board.get(0, 0), Cell::Color(0));
        assert_eq!(board.get(1, 0), Cell::Blocker);
        assert_eq!(board.to_string(), text);
    }

    #[test]
    fn parse_rejects_out_of_palette_color() {
        assert!(Board::parse("03\n00\n", 3).is_err());
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        assert!(Board::parse("00\n000\n", 4).is_err());
    }

    #[test]
    fn uniformity_ignores_blockers() {
        let board = Board::parse("22\n#2\n", 4).unwrap();
        assert!(board.is_uniform_to(2));
        assert!(!board.is_uniform_to(1));
    }

    #[test]
    fn all_blocker_board_is_vacuously_uniform() {
        let board = Board::parse("#", 4).unwrap();
        assert!(board.is_uniform_to(0));
        assert!(board.is_uniform_to(3));
        assert_eq!(board.non_blocker_count(), 0);
    }

    #[test]
    fn neighbors_respect_bounds() {
        let board = Board::uniform(2, 2, 4, Cell::Color(0));
        let mut corner: Vec<_> = board.neighbors(0, 0).collect();
        corner.sort();
        assert_eq!(corner, vec![(0, 1), (1, 0)]);
    }
}

use std::fmt;
use std::str::FromStr;

use super::types::Mark;

pub const CELL_COUNT: usize = 9;
pub const CENTER: usize = 4;
pub const CORNERS: [usize; 4] = [0, 2, 6, 8];

/// 3x3 board, row-major: index `row * 3 + col`.
///
/// `Board` is `Copy`, so strategies try moves on copies via [`Board::with_mark`]
/// and the caller's board is never touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Mark; CELL_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Mark::Empty; CELL_COUNT],
        }
    }

    pub fn from_cells(cells: [Mark; CELL_COUNT]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Mark; CELL_COUNT] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    pub fn is_empty_at(&self, index: usize) -> bool {
        self.get(index) == Some(Mark::Empty)
    }

    /// Empty cell indices in ascending order. Call again to restart.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Mark::Empty)
            .map(|(index, _)| index)
    }

    pub fn has_empty_cell(&self) -> bool {
        self.empty_cells().next().is_some()
    }

    pub fn is_full(&self) -> bool {
        !self.has_empty_cell()
    }

    pub fn move_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell != Mark::Empty).count()
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|cell| **cell == mark).count()
    }

    /// Copy with `mark` at `index`; an index off the board leaves the copy unchanged.
    pub fn with_mark(&self, index: usize, mark: Mark) -> Board {
        let mut next = *self;
        if let Some(cell) = next.cells.get_mut(index) {
            *cell = mark;
        }
        next
    }

    pub(crate) fn set(&mut self, index: usize, mark: Mark) {
        self.cells[index] = mark;
    }

    pub fn clear(&mut self) {
        self.cells = [Mark::Empty; CELL_COUNT];
    }
}

impl FromStr for Board {
    type Err = String;

    /// Accepts exactly nine cell symbols, e.g. `"xx.o....."`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s.chars().collect();
        if symbols.len() != CELL_COUNT {
            return Err(format!(
                "Board must have {} cells, got {}",
                CELL_COUNT,
                symbols.len()
            ));
        }

        let mut cells = [Mark::Empty; CELL_COUNT];
        for (index, symbol) in symbols.into_iter().enumerate() {
            cells[index] = Mark::from_symbol(symbol)
                .ok_or_else(|| format!("Invalid cell symbol '{}' at index {}", symbol, index))?;
        }

        let x_count = cells.iter().filter(|m| **m == Mark::X).count();
        let o_count = cells.iter().filter(|m| **m == Mark::O).count();
        if x_count.abs_diff(o_count) > 1 {
            return Err(format!(
                "Board has {} X and {} O marks, which no game can reach",
                x_count, o_count
            ));
        }

        Ok(Self { cells })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(3) {
            let line: String = row.iter().map(|m| m.symbol()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

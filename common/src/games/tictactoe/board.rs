use std::fmt;

use derive_more::{Display, Error};

use super::types::{BOARD_SIZE, CELL_COUNT, Mark, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    #[display("Cell index {index} is outside 0..=8")]
    OutOfRange { index: usize },
}

/// 3x3 grid stored row-major, cells indexed 0..=8.
///
/// The board is `Copy`: search code works on its own copies and never
/// touches the board owned by a game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Mark; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Mark; CELL_COUNT]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Mark; CELL_COUNT] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Result<Mark, BoardError> {
        self.cells
            .get(index)
            .copied()
            .ok_or(BoardError::OutOfRange { index })
    }

    pub fn is_empty(&self, index: usize) -> Result<bool, BoardError> {
        self.get(index).map(|mark| mark.is_empty())
    }

    /// Writes `symbol` at `index`. The caller checks that the cell is empty
    /// and in range beforehand.
    pub fn place(&mut self, index: usize, symbol: Symbol) {
        debug_assert!(
            self.cells[index].is_empty(),
            "cell {} is already taken",
            index
        );
        self.cells[index] = symbol.into();
    }

    pub fn with_move(&self, index: usize, symbol: Symbol) -> Board {
        let mut next = *self;
        next.place(index, symbol);
        next
    }

    pub fn clear(&mut self) {
        self.cells = [Mark::Empty; CELL_COUNT];
    }

    /// Empty cells in ascending order. Search relies on this order for
    /// tie-breaking.
    pub fn empty_indices(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn moves_made(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.chunks(BOARD_SIZE).enumerate() {
            if row > 0 {
                writeln!(f, "---+---+---")?;
            }
            writeln!(f, " {} | {} | {} ", cells[0], cells[1], cells[2])?;
        }
        Ok(())
    }
}

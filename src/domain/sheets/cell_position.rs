use super::{column::Column, row::RowIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPosition {
    pub col: Column,
    pub row: RowIndex,
}

impl CellPosition {
    pub fn new(col: Column, row: RowIndex) -> Self {
        CellPosition { col, row }
    }

    /// `A1`, the top-left cell of a tab.
    pub fn origin() -> Self {
        CellPosition::new(Column::from_index(0), RowIndex::FIRST)
    }

    pub fn first_cell_of(row: RowIndex) -> Self {
        CellPosition::new(Column::from_index(0), row)
    }
}

impl Default for CellPosition {
    fn default() -> Self {
        Self::origin()
    }
}

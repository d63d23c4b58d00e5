use std::{fmt::Formatter, num::ParseIntError, str::FromStr};

/// Position of a row in a tab. Stored zero-based, displayed one-based as in A1 notation.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowIndex {
    index: u32,
}

impl RowIndex {
    pub const FIRST: RowIndex = RowIndex { index: 0 };

    pub fn from_index(index: u32) -> Self {
        RowIndex { index }
    }

    /// Builds a row from its one-based number. Zero saturates to the first row.
    pub fn from_row(row: u32) -> Self {
        RowIndex::from_index(row.saturating_sub(1))
    }

    /// Returns the row number as a 1-based index.
    /// # Examples
    /// ```
    /// use csv_sheet_sync::domain::sheets::row::RowIndex;
    /// assert_eq!(RowIndex::from_index(0).row(), 1);
    /// assert_eq!(RowIndex::from_index(4).row(), 5);
    /// ```
    pub fn row(&self) -> u32 {
        self.index.saturating_add(1)
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

impl std::fmt::Display for RowIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.row())
    }
}

impl std::fmt::Debug for RowIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "RowIndex(index: {}, row: {})", self.index, self.row())
    }
}

impl FromStr for RowIndex {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RowIndex::from_row(s.parse::<u32>()?))
    }
}

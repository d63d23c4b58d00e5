/// A row of text cells. Cells carry no type information.
pub type Row = Vec<String>;

/// Contents of a CSV file: the first row is the header, the rest are data rows in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    header: Row,
    data: Vec<Row>,
}

impl Table {
    pub fn new(header: Row, data: Vec<Row>) -> Self {
        Table { header, data }
    }

    /// Splits `rows` into header and data. No rows gives an empty table.
    pub fn from_rows(rows: impl IntoIterator<Item = Row>) -> Self {
        let mut rows = rows.into_iter();
        match rows.next() {
            Some(header) => Table {
                header,
                data: rows.collect(),
            },
            None => Table::default(),
        }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn data(&self) -> &[Row] {
        &self.data
    }

    /// True when there is nothing to sync.
    pub fn is_empty(&self) -> bool {
        self.header.is_empty()
    }

    pub fn width(&self) -> usize {
        self.header.len()
    }

    /// Header followed by every data row, as written by a full replace.
    pub fn to_block(&self) -> Vec<Row> {
        std::iter::once(self.header.clone())
            .chain(self.data.iter().cloned())
            .collect()
    }
}

/// Comparison form of a row: every cell trimmed, trailing empty cells dropped.
pub fn normalize_row<S: AsRef<str>>(row: &[S]) -> Vec<&str> {
    let mut normalized: Vec<&str> = row.iter().map(|cell| cell.as_ref().trim()).collect();
    while normalized.last().is_some_and(|cell| cell.is_empty()) {
        normalized.pop();
    }
    normalized
}

/// True when every cell is empty after trimming. A row with no cells is blank.
pub fn is_blank_row<S: AsRef<str>>(row: &[S]) -> bool {
    row.iter().all(|cell| cell.as_ref().trim().is_empty())
}

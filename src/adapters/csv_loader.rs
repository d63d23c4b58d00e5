use std::{fs::File, io::Read, path::Path};

use error_stack::{Report, ResultExt};
use thiserror::Error;
use tracing::instrument;

use crate::domain::table::{Row, Table};

#[derive(Error, Debug)]
pub enum CsvLoadError {
    #[error("Failed to open CSV file")]
    Open,
    #[error("Failed to parse CSV record {0}")]
    Parse(usize),
}

/// Reads `path` into a [`Table`]. An empty file gives an empty table.
#[instrument]
pub fn load(path: &Path) -> error_stack::Result<Table, CsvLoadError> {
    let file = File::open(path)
        .change_context(CsvLoadError::Open)
        .attach_printable_lazy(|| format!("Path: {}", path.display()))?;

    let table = read(file)?;
    tracing::debug!(
        columns = table.width(),
        data_rows = table.data().len(),
        "Loaded CSV"
    );
    Ok(table)
}

/// Every record is kept verbatim: no header handling by the parser, ragged rows allowed.
pub fn read<R: Read>(reader: R) -> error_stack::Result<Table, CsvLoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let rows = csv_reader
        .records()
        .enumerate()
        .map(|(index, record)| {
            record
                .map(|record| record.iter().map(str::to_owned).collect::<Row>())
                .map_err(|err| Report::new(err).change_context(CsvLoadError::Parse(index + 1)))
        })
        .collect::<error_stack::Result<Vec<Row>, CsvLoadError>>()?;

    Ok(Table::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|cell| cell.to_string()).collect()
    }

    #[test]
    fn test_read_header_and_data() {
        let table = read("id,name\n1,alice\n2,bob\n".as_bytes()).unwrap();
        assert_eq!(table.header(), row(&["id", "name"]).as_slice());
        assert_eq!(table.data(), &[row(&["1", "alice"]), row(&["2", "bob"])]);
    }

    #[test]
    fn test_read_empty_input() {
        let table = read("".as_bytes()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_read_header_only() {
        let table = read("id,name\n".as_bytes()).unwrap();
        assert_eq!(table.header(), row(&["id", "name"]).as_slice());
        assert!(table.data().is_empty());
    }

    #[test]
    fn test_cells_are_not_coerced() {
        let table = read("n,when\n007,=SUM(A1)\n 1.50 ,2024-01-01\n".as_bytes()).unwrap();
        assert_eq!(
            table.data(),
            &[row(&["007", "=SUM(A1)"]), row(&[" 1.50 ", "2024-01-01"])]
        );
    }

    #[test]
    fn test_ragged_rows_are_kept() {
        let table = read("a,b,c\n1\n1,2,3,4\n".as_bytes()).unwrap();
        assert_eq!(table.data(), &[row(&["1"]), row(&["1", "2", "3", "4"])]);
    }

    #[test]
    fn test_row_order_and_duplicates_preserved() {
        let table = read("k\nb\na\nb\n".as_bytes()).unwrap();
        assert_eq!(table.data(), &[row(&["b"]), row(&["a"]), row(&["b"])]);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let report = load(&dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(report.current_context(), CsvLoadError::Open));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "id,name\n1,\"a, b\"\n").unwrap();
        let table = load(&path).unwrap();
        assert_eq!(table.data(), &[row(&["1", "a, b"])]);
    }
}

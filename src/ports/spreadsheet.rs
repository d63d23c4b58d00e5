use thiserror::Error;

use crate::domain::sheets::{a1_notation::A1Notation, cell_position::CellPosition, row::RowIndex};
use crate::domain::table::Row;

#[derive(Error, Debug)]
pub enum SpreadsheetError {
    #[error("Failed to set up the HTTPS connection")]
    Connection,
    #[error("Failed to authenticate with the spreadsheet service")]
    Authentication,
    #[error("Failed to fetch spreadsheet {0}")]
    FetchSpreadsheet(String),
    #[error("Failed to create tab {0}")]
    CreateTab(String),
    #[error("Failed to read tab contents")]
    Read,
    #[error("Failed to write tab contents")]
    Write,
    #[error("Injected failure on call #{0}")]
    InjectedFailure(usize),
}

pub type SpreadsheetResult<T> = error_stack::Result<T, SpreadsheetError>;

/// Entry point to a spreadsheet service.
#[async_trait::async_trait]
pub trait SpreadsheetBackend: Send + Sync {
    async fn open(&self, spreadsheet_id: &str) -> SpreadsheetResult<Box<dyn Spreadsheet>>;
}

#[async_trait::async_trait]
pub trait Spreadsheet: Send + Sync {
    fn id(&self) -> &str;

    /// Returns the tab titled `title`, creating it when absent. `columns_hint` sizes a new tab.
    async fn get_or_create_tab(
        &self,
        title: &str,
        columns_hint: usize,
    ) -> SpreadsheetResult<Box<dyn RemoteTab>>;
}

/// A single tab. Every call goes to the backend; nothing is cached between calls.
#[async_trait::async_trait]
pub trait RemoteTab: Send + Sync {
    fn title(&self) -> &str;

    async fn clear(&self) -> SpreadsheetResult<()>;

    async fn read_all_rows(&self) -> SpreadsheetResult<Vec<Row>>;

    /// Writes `rows` as one contiguous block whose top-left cell is `origin`.
    async fn write_block(&self, origin: CellPosition, rows: &[Row]) -> SpreadsheetResult<()>;

    async fn set_range(&self, range: &A1Notation, rows: &[Row]) -> SpreadsheetResult<()>;

    /// Appends after the last row with content. Values are stored raw.
    async fn append_rows(&self, rows: &[Row]) -> SpreadsheetResult<()>;

    /// Inserts `row` so that it ends up at `position`, shifting later rows down.
    async fn insert_row(&self, row: &[String], position: RowIndex) -> SpreadsheetResult<()>;
}

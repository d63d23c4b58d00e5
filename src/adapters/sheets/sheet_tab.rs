use std::{fmt::Debug, sync::Arc};

use error_stack::ResultExt;
use google_sheets4::api::{
    BatchUpdateSpreadsheetRequest, ClearValuesRequest, DimensionRange, InsertDimensionRequest,
    Request, Scope, ValueRange,
};
use tracing::instrument;

use crate::domain::sheets::{
    a1_notation::{A1Notation, ToA1Notation},
    cell_position::CellPosition,
    row::RowIndex,
};
use crate::domain::table::Row;
use crate::ports::spreadsheet::{RemoteTab, SpreadsheetError, SpreadsheetResult};

use super::{
    http_client::SheetsHub,
    value_range_factory::{IntoRows, ValueRangeFactory},
};

const RAW: &str = "RAW";

pub struct SheetTab {
    hub: Arc<SheetsHub>,
    spreadsheet_id: String,
    sheet_id: i32,
    title: String,
}

impl Debug for SheetTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SheetTab {{ spreadsheet_id: {}, sheet_id: {}, title: {:?} }}",
            self.spreadsheet_id, self.sheet_id, self.title
        )
    }
}

impl SheetTab {
    pub fn new(hub: Arc<SheetsHub>, spreadsheet_id: String, sheet_id: i32, title: String) -> Self {
        SheetTab {
            hub,
            spreadsheet_id,
            sheet_id,
            title,
        }
    }

    fn whole_tab(&self) -> A1Notation {
        A1Notation::whole_sheet(&self.title)
    }

    async fn update_values(
        &self,
        range: &A1Notation,
        value_range: ValueRange,
    ) -> SpreadsheetResult<()> {
        self.hub
            .spreadsheets()
            .values_update(value_range, &self.spreadsheet_id, range.as_ref())
            .value_input_option(RAW)
            .add_scope(Scope::Spreadsheet)
            .add_scope(Scope::Drive)
            .doit()
            .await
            .map(|_| ())
            .change_context(SpreadsheetError::Write)
            .attach_printable_lazy(|| format!("Failed to write to range {}", range))
    }
}

#[async_trait::async_trait]
impl RemoteTab for SheetTab {
    fn title(&self) -> &str {
        &self.title
    }

    #[instrument]
    async fn clear(&self) -> SpreadsheetResult<()> {
        let range = self.whole_tab();
        self.hub
            .spreadsheets()
            .values_clear(ClearValuesRequest::default(), &self.spreadsheet_id, range.as_ref())
            .add_scope(Scope::Spreadsheet)
            .add_scope(Scope::Drive)
            .doit()
            .await
            .map(|_| ())
            .change_context(SpreadsheetError::Write)
            .attach_printable_lazy(|| format!("Failed to clear {}", range))
    }

    #[instrument]
    async fn read_all_rows(&self) -> SpreadsheetResult<Vec<Row>> {
        let range = self.whole_tab();
        let response = self
            .hub
            .spreadsheets()
            .values_get(&self.spreadsheet_id, range.as_ref())
            .add_scope(Scope::Spreadsheet)
            .add_scope(Scope::Drive)
            .doit()
            .await
            .change_context(SpreadsheetError::Read)
            .attach_printable_lazy(|| format!("Failed to fetch values for range {}", range))?;

        Ok(response.1.into_rows())
    }

    #[instrument(skip(rows), fields(row_count = rows.len()))]
    async fn write_block(&self, origin: CellPosition, rows: &[Row]) -> SpreadsheetResult<()> {
        let range = origin.to_a1_notation(Some(self.title.as_str()));
        self.update_values(&range, ValueRange::from_rows(rows)).await
    }

    #[instrument(skip(rows), fields(row_count = rows.len()))]
    async fn set_range(&self, range: &A1Notation, rows: &[Row]) -> SpreadsheetResult<()> {
        self.update_values(range, ValueRange::from_rows(rows)).await
    }

    #[instrument(skip(rows), fields(row_count = rows.len()))]
    async fn append_rows(&self, rows: &[Row]) -> SpreadsheetResult<()> {
        let range = self.whole_tab();
        self.hub
            .spreadsheets()
            .values_append(ValueRange::from_rows(rows), &self.spreadsheet_id, range.as_ref())
            .value_input_option(RAW)
            .add_scope(Scope::Spreadsheet)
            .add_scope(Scope::Drive)
            .doit()
            .await
            .map(|_| ())
            .change_context(SpreadsheetError::Write)
            .attach_printable_lazy(|| format!("Failed to append {} rows to {}", rows.len(), range))
    }

    #[instrument(skip(row))]
    async fn insert_row(&self, row: &[String], position: RowIndex) -> SpreadsheetResult<()> {
        let start_index = i32::try_from(position.index()).unwrap_or(i32::MAX);
        let request = BatchUpdateSpreadsheetRequest {
            requests: Some(vec![Request {
                insert_dimension: Some(InsertDimensionRequest {
                    inherit_from_before: Some(false),
                    range: Some(DimensionRange {
                        dimension: Some("ROWS".to_string()),
                        sheet_id: Some(self.sheet_id),
                        start_index: Some(start_index),
                        end_index: Some(start_index.saturating_add(1)),
                        ..Default::default()
                    }),
                    ..Default::default()
                }),
                ..Default::default()
            }]),
            ..Default::default()
        };

        self.hub
            .spreadsheets()
            .batch_update(request, &self.spreadsheet_id)
            .add_scope(Scope::Spreadsheet)
            .add_scope(Scope::Drive)
            .doit()
            .await
            .change_context(SpreadsheetError::Write)
            .attach_printable_lazy(|| format!("Failed to insert a row at {}", position))?;

        let range = CellPosition::first_cell_of(position).to_a1_notation(Some(self.title.as_str()));
        self.update_values(&range, ValueRange::from_row(row)).await
    }
}

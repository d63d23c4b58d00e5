//! Spreadsheet backend kept in process memory.
//!
//! Tabs are plain grids of rows. Every call made through the port is recorded, and a call can be
//! made to fail on purpose to observe what an interrupted run leaves behind.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use error_stack::{report, ResultExt};

use crate::domain::sheets::{
    a1_notation::{A1Notation, FromA1Notation, ToA1Notation},
    cell_position::CellPosition,
    row::RowIndex,
};
use crate::domain::table::{is_blank_row, Row};
use crate::ports::spreadsheet::{
    RemoteTab, Spreadsheet, SpreadsheetBackend, SpreadsheetError, SpreadsheetResult,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    Open(String),
    GetOrCreateTab { title: String, columns_hint: usize },
    Clear(String),
    ReadAllRows(String),
    WriteBlock { range: String, rows: usize },
    SetRange { range: String, rows: usize },
    AppendRows { tab: String, rows: usize },
    InsertRow { tab: String, row: u32 },
}

impl RemoteCall {
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            RemoteCall::Clear(_)
                | RemoteCall::WriteBlock { .. }
                | RemoteCall::SetRange { .. }
                | RemoteCall::AppendRows { .. }
                | RemoteCall::InsertRow { .. }
        )
    }
}

#[derive(Debug, Default)]
struct State {
    tabs: HashMap<String, Vec<Row>>,
    calls: Vec<RemoteCall>,
    fail_on_call: Option<usize>,
}

impl State {
    /// Records `call` and fails it when it is the call chosen by `fail_on_call`.
    fn record(&mut self, call: RemoteCall) -> SpreadsheetResult<()> {
        self.calls.push(call);
        let number = self.calls.len();
        if self.fail_on_call == Some(number) {
            return Err(report!(SpreadsheetError::InjectedFailure(number)))
                .attach_printable_lazy(|| format!("Call: {:?}", self.calls.last()));
        }
        Ok(())
    }

    fn grid(&mut self, title: &str) -> &mut Vec<Row> {
        self.tabs.entry(title.to_string()).or_default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemorySpreadsheet {
    id: String,
    state: Arc<Mutex<State>>,
}

impl InMemorySpreadsheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a tab with `rows`. Seeding is not recorded as a call.
    pub fn with_tab(self, title: &str, rows: Vec<Row>) -> Self {
        self.lock().tabs.insert(title.to_string(), rows);
        self
    }

    /// Makes the `call_number`-th call (1-based, counting every call) fail without side effects.
    pub fn fail_on_call(self, call_number: usize) -> Self {
        self.lock().fail_on_call = Some(call_number);
        self
    }

    pub fn tab_rows(&self, title: &str) -> Option<Vec<Row>> {
        self.lock().tabs.get(title).cloned()
    }

    pub fn calls(&self) -> Vec<RemoteCall> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl SpreadsheetBackend for InMemorySpreadsheet {
    async fn open(&self, spreadsheet_id: &str) -> SpreadsheetResult<Box<dyn Spreadsheet>> {
        self.lock()
            .record(RemoteCall::Open(spreadsheet_id.to_string()))
            .change_context_lazy(|| SpreadsheetError::FetchSpreadsheet(spreadsheet_id.to_string()))?;

        Ok(Box::new(InMemorySpreadsheet {
            id: spreadsheet_id.to_string(),
            state: Arc::clone(&self.state),
        }))
    }
}

#[async_trait::async_trait]
impl Spreadsheet for InMemorySpreadsheet {
    fn id(&self) -> &str {
        &self.id
    }

    async fn get_or_create_tab(
        &self,
        title: &str,
        columns_hint: usize,
    ) -> SpreadsheetResult<Box<dyn RemoteTab>> {
        let mut state = self.lock();
        state
            .record(RemoteCall::GetOrCreateTab {
                title: title.to_string(),
                columns_hint,
            })
            .change_context_lazy(|| SpreadsheetError::CreateTab(title.to_string()))?;
        state.grid(title);

        Ok(Box::new(InMemoryTab {
            title: title.to_string(),
            state: Arc::clone(&self.state),
        }))
    }
}

#[derive(Debug)]
pub struct InMemoryTab {
    title: String,
    state: Arc<Mutex<State>>,
}

impl InMemoryTab {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Writes `rows` with their top-left cell at `origin`, growing the grid as needed.
fn write_at(grid: &mut Vec<Row>, origin: CellPosition, rows: &[Row]) {
    let top = origin.row.index() as usize;
    let left = origin.col.index() as usize;

    for (offset, row) in rows.iter().enumerate() {
        let target_index = top + offset;
        if grid.len() <= target_index {
            grid.resize(target_index + 1, Vec::new());
        }

        let target = &mut grid[target_index];
        if target.len() < left + row.len() {
            target.resize(left + row.len(), String::new());
        }
        target[left..left + row.len()].clone_from_slice(row);
    }
}

#[async_trait::async_trait]
impl RemoteTab for InMemoryTab {
    fn title(&self) -> &str {
        &self.title
    }

    async fn clear(&self) -> SpreadsheetResult<()> {
        let mut state = self.lock();
        state.record(RemoteCall::Clear(self.title.clone()))?;
        state.grid(&self.title).clear();
        Ok(())
    }

    async fn read_all_rows(&self) -> SpreadsheetResult<Vec<Row>> {
        let mut state = self.lock();
        state
            .record(RemoteCall::ReadAllRows(self.title.clone()))
            .change_context(SpreadsheetError::Read)?;
        Ok(state.grid(&self.title).clone())
    }

    async fn write_block(&self, origin: CellPosition, rows: &[Row]) -> SpreadsheetResult<()> {
        let mut state = self.lock();
        state.record(RemoteCall::WriteBlock {
            range: origin.to_a1_notation(Some(self.title.as_str())).into(),
            rows: rows.len(),
        })?;
        write_at(state.grid(&self.title), origin, rows);
        Ok(())
    }

    async fn set_range(&self, range: &A1Notation, rows: &[Row]) -> SpreadsheetResult<()> {
        let mut state = self.lock();
        state.record(RemoteCall::SetRange {
            range: range.to_string(),
            rows: rows.len(),
        })?;

        if let Some(sheet_title) = range.split().sheet_title {
            if sheet_title != self.title {
                return Err(report!(SpreadsheetError::Write)).attach_printable_lazy(|| {
                    format!("Range {} does not belong to tab '{}'", range, self.title)
                });
            }
        }

        let origin = CellPosition::from_a1_notation(range).change_context(SpreadsheetError::Write)?;
        write_at(state.grid(&self.title), origin, rows);
        Ok(())
    }

    async fn append_rows(&self, rows: &[Row]) -> SpreadsheetResult<()> {
        let mut state = self.lock();
        state.record(RemoteCall::AppendRows {
            tab: self.title.clone(),
            rows: rows.len(),
        })?;

        // Rows land in the first row after the last non-blank one; trailing blank rows are
        // written over, never removed.
        let grid = state.grid(&self.title);
        let end = grid
            .iter()
            .rposition(|row| !is_blank_row(row))
            .map_or(0, |last| last + 1);
        let start = RowIndex::from_index(u32::try_from(end).unwrap_or(u32::MAX));
        write_at(grid, CellPosition::first_cell_of(start), rows);
        Ok(())
    }

    async fn insert_row(&self, row: &[String], position: RowIndex) -> SpreadsheetResult<()> {
        let mut state = self.lock();
        state.record(RemoteCall::InsertRow {
            tab: self.title.clone(),
            row: position.row(),
        })?;

        let grid = state.grid(&self.title);
        let index = position.index() as usize;
        if grid.len() < index {
            grid.resize(index, Vec::new());
        }
        grid.insert(index, row.to_vec());
        Ok(())
    }
}

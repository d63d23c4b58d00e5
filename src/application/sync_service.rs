use std::{path::PathBuf, sync::Arc};

use error_stack::ResultExt;
use thiserror::Error;
use tracing::{info, instrument};

use crate::adapters::csv_loader;
use crate::domain::sync_mode::SyncMode;
use crate::domain::sync_report::SyncReport;
use crate::ports::spreadsheet::SpreadsheetBackend;

use super::reconciler;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Configuration error")]
    Config,
    #[error("Failed to read CSV file '{}'", .0.display())]
    Io(PathBuf),
    #[error("Spreadsheet service request failed")]
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    pub csv_path: PathBuf,
    pub spreadsheet_id: String,
    pub tab: String,
    pub mode: SyncMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The CSV had no rows; the spreadsheet was not contacted.
    SkippedEmptyCsv,
    Synced(SyncReport),
}

impl std::fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncOutcome::SkippedEmptyCsv => write!(f, "CSV is empty; nothing to write."),
            SyncOutcome::Synced(report) => write!(f, "{}", report),
        }
    }
}

/// Runs one CSV to tab synchronisation against a spreadsheet backend.
pub struct CsvSyncService {
    backend: Arc<dyn SpreadsheetBackend>,
}

impl std::fmt::Debug for CsvSyncService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvSyncService")
            .field("backend", &"<SpreadsheetBackend>")
            .finish()
    }
}

impl CsvSyncService {
    pub fn new(backend: Arc<dyn SpreadsheetBackend>) -> Self {
        Self { backend }
    }

    /// Load, short-circuit on an empty file, open the tab (creating it if needed), reconcile.
    #[instrument(skip(self))]
    pub async fn run(&self, request: &SyncRequest) -> error_stack::Result<SyncOutcome, SyncError> {
        let table = csv_loader::load(&request.csv_path)
            .change_context_lazy(|| SyncError::Io(request.csv_path.clone()))?;

        if table.is_empty() {
            info!("CSV is empty; nothing to write.");
            return Ok(SyncOutcome::SkippedEmptyCsv);
        }

        let spreadsheet = self
            .backend
            .open(&request.spreadsheet_id)
            .await
            .change_context(SyncError::Remote)?;
        tracing::debug!(spreadsheet = spreadsheet.id(), "Opened spreadsheet");

        let tab = spreadsheet
            .get_or_create_tab(&request.tab, table.width())
            .await
            .change_context(SyncError::Remote)
            .attach_printable_lazy(|| format!("Spreadsheet: {}", spreadsheet.id()))?;

        let report = reconciler::reconcile(tab.as_ref(), &table, request.mode)
            .await
            .change_context(SyncError::Remote)
            .attach_printable_lazy(|| {
                format!(
                    "Earlier writes to '{}' are not rolled back",
                    request.tab
                )
            })?;

        Ok(SyncOutcome::Synced(report))
    }
}

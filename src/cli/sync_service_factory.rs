use std::sync::Arc;

use error_stack::ResultExt;
use tracing::{info, instrument};

use crate::adapters::sheets::spreadsheet_manager::SpreadsheetManager;
use crate::application::sync_service::{CsvSyncService, SyncError};
use crate::config::{app_config::AppConfig, credentials::ServiceAccountCredentials};
use crate::ports::spreadsheet::SpreadsheetError;

pub struct SyncServiceFactory;

impl SyncServiceFactory {
    /// Wires the Google Sheets backend into a [`CsvSyncService`].
    ///
    /// Credentials are checked here, so a missing or malformed key fails the run before the CSV
    /// is read.
    #[instrument(skip_all)]
    pub async fn create(config: &AppConfig) -> error_stack::Result<CsvSyncService, SyncError> {
        let credentials = ServiceAccountCredentials::from_env(&config.sheets.credentials_env)
            .change_context(SyncError::Config)?;
        info!("Using service account {}", credentials.client_email());

        // The authenticator rejects key material it cannot load, which is a configuration problem.
        let manager = SpreadsheetManager::new(config.sheets.clone(), &credentials)
            .await
            .map_err(|report| {
                let context = match report.current_context() {
                    SpreadsheetError::Authentication => SyncError::Config,
                    _ => SyncError::Remote,
                };
                report
                    .change_context(context)
                    .attach_printable(format!("Key read from {}", config.sheets.credentials_env))
            })?;

        Ok(CsvSyncService::new(Arc::new(manager)))
    }
}

use std::process::ExitCode;

use tracing::{error, info, instrument};

use crate::application::sync_service::{CsvSyncService, SyncOutcome, SyncRequest};
use crate::config::app_config::AppConfig;

use super::args::Cli;
use super::sync_service_factory::SyncServiceFactory;

pub struct CliAdapter {
    config: AppConfig,
}

impl std::fmt::Debug for CliAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliAdapter")
            .field("config", &self.config)
            .finish()
    }
}

impl CliAdapter {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Runs the sync described by `cli`. Failures are logged here, once, and only the exit code
    /// is handed back.
    #[instrument(skip(cli))]
    pub async fn run(&self, cli: Cli) -> ExitCode {
        let request = SyncRequest::from(cli);

        let service = match SyncServiceFactory::create(&self.config).await {
            Ok(service) => service,
            Err(report) => {
                error!("Setup failed: {:?}", report);
                return ExitCode::FAILURE;
            }
        };

        match Self::sync(&service, &request).await {
            Ok(_) => ExitCode::SUCCESS,
            Err(_) => ExitCode::FAILURE,
        }
    }

    /// Runs `request` through `service` and logs the outcome.
    pub async fn sync(
        service: &CsvSyncService,
        request: &SyncRequest,
    ) -> Result<SyncOutcome, Box<dyn std::error::Error>> {
        match service.run(request).await {
            Ok(outcome) => {
                info!("{}", outcome);
                Ok(outcome)
            }
            Err(report) => {
                error!("Sync failed: {:?}", report);
                Err(format!("Sync failed: {:?}", report).into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::adapters::in_memory_spreadsheet::InMemorySpreadsheet;
    use crate::config::sheets_config::SpreadsheetConfig;
    use crate::domain::sync_mode::SyncMode;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        (logs, tracing::subscriber::set_default(subscriber))
    }

    #[tokio::test]
    async fn test_sync_returns_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.csv");
        std::fs::write(&path, "h\nv\n").unwrap();
        let backend = InMemorySpreadsheet::new();
        let service = CsvSyncService::new(Arc::new(backend.clone()));
        let request = SyncRequest {
            csv_path: path,
            spreadsheet_id: "id".to_string(),
            tab: "T".to_string(),
            mode: SyncMode::Replace,
        };

        let outcome = CliAdapter::sync(&service, &request).await.unwrap();

        assert_eq!(outcome.to_string(), "Replaced tab 'T' with 1 rows (+ header).");
    }

    #[tokio::test]
    async fn test_sync_error_mentions_failure() {
        let backend = InMemorySpreadsheet::new();
        let service = CsvSyncService::new(Arc::new(backend));
        let request = SyncRequest {
            csv_path: PathBuf::from("/definitely/not/here.csv"),
            spreadsheet_id: "id".to_string(),
            tab: "T".to_string(),
            mode: SyncMode::Append,
        };

        let error = CliAdapter::sync(&service, &request).await.unwrap_err();

        assert!(error.to_string().starts_with("Sync failed"));
    }

    #[tokio::test]
    async fn test_failed_sync_is_logged_once() {
        let (logs, _guard) = capture_logs();
        let service = CsvSyncService::new(Arc::new(InMemorySpreadsheet::new()));
        let request = SyncRequest {
            csv_path: PathBuf::from("/definitely/not/here.csv"),
            spreadsheet_id: "id".to_string(),
            tab: "T".to_string(),
            mode: SyncMode::Replace,
        };

        assert!(CliAdapter::sync(&service, &request).await.is_err());

        assert_eq!(logs.contents().matches("Sync failed").count(), 1);
    }

    #[tokio::test]
    async fn test_run_without_credentials_fails_and_logs_once() {
        let (logs, _guard) = capture_logs();
        let adapter = CliAdapter::new(AppConfig {
            sheets: SpreadsheetConfig {
                credentials_env: "SHEET_SYNC_CLI_TEST_UNSET".to_string(),
                ..Default::default()
            },
            ..Default::default()
        });
        let cli = Cli {
            csv: PathBuf::from("in.csv"),
            sheet_id: "id".to_string(),
            tab: "T".to_string(),
            mode: SyncMode::Replace,
        };

        let code = adapter.run(cli).await;

        assert_eq!(format!("{:?}", code), format!("{:?}", ExitCode::FAILURE));
        assert_eq!(logs.contents().matches("Setup failed").count(), 1);
    }
}

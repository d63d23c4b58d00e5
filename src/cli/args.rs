use std::path::PathBuf;

use clap::Parser;

use crate::application::sync_service::SyncRequest;
use crate::domain::sync_mode::SyncMode;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    author,
    version,
    about = "Push a CSV file into a Google Sheets tab.",
    long_about = "Push a CSV file into a Google Sheets tab.\n\n\
        Credentials are read from the GOOGLE_SERVICE_ACCOUNT_JSON environment variable."
)]
pub struct Cli {
    /// Source CSV file.
    #[arg(long)]
    pub csv: PathBuf,

    /// Destination spreadsheet id.
    #[arg(long = "sheet_id")]
    pub sheet_id: String,

    /// Destination tab title. Created when missing.
    #[arg(long)]
    pub tab: String,

    /// `replace` clears the tab first; `append` keeps existing rows and reconciles the header.
    #[arg(long, default_value_t = SyncMode::Replace)]
    pub mode: SyncMode,
}

impl From<Cli> for SyncRequest {
    fn from(cli: Cli) -> Self {
        SyncRequest {
            csv_path: cli.csv,
            spreadsheet_id: cli.sheet_id,
            tab: cli.tab,
            mode: cli.mode,
        }
    }
}

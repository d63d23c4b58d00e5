use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};

use csv_sheet_sync::cli::{args::Cli, cli_adapter::CliAdapter};
use csv_sheet_sync::config::{app_config::AppConfig, log_config::LogConfig};
use csv_sheet_sync::prettyprint::PrettyFormatter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(report) => {
            eprintln!("Configuration error: {:?}", report);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = setup_tracing(&config.log) {
        eprintln!("Failed to set up logging: {e}");
        return ExitCode::FAILURE;
    }
    setup_panic_hook();

    info!("Starting csv-sheet-sync");

    CliAdapter::new(config).run(cli).await
}

fn setup_tracing(log: &LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(true))
        .with_writer(std::io::stderr);

    let log_file_layer = match &log.file {
        Some(path) => Some(
            tracing_subscriber::fmt::layer()
                .event_format(PrettyFormatter::new(false))
                .with_writer(std::sync::Mutex::new(std::fs::File::create(path)?))
                .with_ansi(false),
        ),
        None => None,
    };

    Registry::default()
        .with(
            tracing_subscriber::filter::Targets::new()
                .with_target("csv_sheet_sync", log.level())
                .with_default(tracing::Level::WARN),
        )
        .with(log_file_layer)
        .with(stderr_layer)
        .init();

    Ok(())
}

fn setup_panic_hook() {
    tracing::trace!("Setting panic hook");
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));
}

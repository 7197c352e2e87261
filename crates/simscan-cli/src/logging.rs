use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize tracing with a pretty stdout layer and a plain-text file
/// layer. Returns the appender guard; dropping it flushes the file.
pub fn init_logger() -> impl Drop {
    let filter_layer = EnvFilter::new(env::var("TRACING_LEVEL").unwrap_or_else(|_| "info".into()));

    let log_path = PathBuf::from(
        env::var("LOG_FILE_PATH").unwrap_or_else(|_| "./logs/simscan.log".to_string()),
    );
    let log_dir = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let log_file = log_path
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("simscan.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stdout)
                .pretty()
                .with_file(false)
                .without_time()
                .with_ansi(true),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .with(filter_layer)
        .init();

    info!("Tracing is configured for stdout and file logging.");

    guard
}

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::Rotation;

/// Application data directory (database and logs). Created on first use.
pub fn data_dir() -> Option<PathBuf> {
    let dir = dirs::data_local_dir()?.join("timetally");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Logs go to daily files under `<data dir>/logs`, never to the terminal the widget draws on.
pub fn enable_logging(application_data_path: &Path, log_level: Option<LevelFilter>) -> Result<()> {
    let appender = tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(5)
        .filename_prefix("timetally")
        .filename_suffix("log")
        .build(application_data_path.join("logs"))?;

    let level = log_level
        .map(|v| v.to_string())
        .unwrap_or_else(|| std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()));

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(format!(
            "{}={level}",
            env!("CARGO_PKG_NAME").replace("-", "_"),
        )))
        .with_ansi(false)
        .with_writer(appender)
        .init();
    Ok(())
}

#[cfg(test)]
pub static TEST_LOGGING: std::sync::LazyLock<()> = std::sync::LazyLock::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .try_init();
});

mod app;
mod cli;
mod clock;
mod color;
mod config;
mod db;
mod event;
mod format;
mod logging;
mod tracker;
mod tui;
mod types;
mod ui;

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use crate::clock::SystemClock;
use crate::config::Config;

fn main() -> Result<()> {
    let cli_opts = cli::Cli::parse();
    if let Some(data_dir) = logging::data_dir() {
        logging::enable_logging(&data_dir, cli_opts.log_level)?;
    }
    info!(version = env!("CARGO_PKG_VERSION"), "Starting timetally");

    let config = Config::load(cli_opts.config.as_deref())?;
    let db_path = cli_opts.db.unwrap_or_else(db::default_db_path);
    let conn = db::init(&db_path)?;

    if let Some(command) = cli_opts.command {
        return cli::run(command, conn, SystemClock, &config, io::stdin().lock(), io::stdout());
    }

    let mut app = app::App::new(conn, SystemClock, &config)?;
    let mut terminal = tui::init()?;
    let result = event::run(&mut app, &mut terminal);

    app.tracker.shutdown();
    tui::restore()?;

    if let Err(err) = &result {
        error!(err = format!("{err:#}"), "Event loop failed");
    }
    result
}

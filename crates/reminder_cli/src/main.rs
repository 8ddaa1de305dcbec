//! Reminder API server entry point.
//!
//! # Responsibility
//! - Load settings, initialize logging and open the database.
//! - Serve the HTTP API until ctrl-c.

use log::{error, info};
use reminder_api::{AppState, Settings};
use reminder_core::db::open_db;
use reminder_core::{core_version, init_logging};
use std::error::Error;
use std::process::ExitCode;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is the normal case outside development.
    let _ = dotenvy::dotenv();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("reminder-server: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(&settings.log_level, settings.log_dir.as_deref()) {
        eprintln!("reminder-server: failed to initialize logging: {err}");
        return ExitCode::FAILURE;
    }

    match run(settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_exit module=cli status=error error={err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(settings: Settings) -> Result<(), Box<dyn Error>> {
    info!(
        "event=server_start module=cli status=start version={} database={}",
        core_version(),
        settings.database_path.display()
    );

    let addr = settings.socket_addr()?;
    let conn = open_db(&settings.database_path)?;
    let listener = TcpListener::bind(addr).await?;
    reminder_api::serve(listener, AppState::new(conn)).await?;
    Ok(())
}

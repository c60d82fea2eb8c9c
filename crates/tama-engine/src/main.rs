//! Terminal host for a Tama virtual pet session.
//!
//! Wires a session loop to stdin: each line is a command, notices are
//! printed as they happen, and `status` dumps the current snapshot as JSON.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `tama-config.yaml` (or `$TAMA_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Spawn the session loop
//! 4. Forward stdin commands until `quit` or end of input
//! 5. Stop the session and log the summary

mod commands;
mod error;
mod log_sink;

use std::path::PathBuf;

use tama_runtime::{Command, LOG_LEVEL_ENV, SessionSnapshot, TamaConfig, run_session};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::commands::{HELP, Input};
use crate::error::EngineError;
use crate::log_sink::LogSink;

/// Environment variable naming the configuration file.
const CONFIG_ENV: &str = "TAMA_CONFIG";

/// Configuration file looked up in the working directory.
const DEFAULT_CONFIG_PATH: &str = "tama-config.yaml";

/// Capacity of the command channel.
const COMMAND_BUFFER: usize = 32;

#[tokio::main]
async fn main() -> Result<(), EngineError> {
    // 1. Load configuration. The log level lives in it.
    let (config, source) = load_config()?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(
        config = source.as_ref().map(|path| path.display().to_string()),
        log_level = config.logging.level,
        health_check_interval_ms = config.scheduler.health_check_interval_ms,
        "tama-engine starting"
    );
    if source.is_none() {
        info!("Config file not found, using defaults");
    }

    run(config).await
}

/// Load configuration from `$TAMA_CONFIG` or the working directory.
///
/// Returns the config together with the file it came from, or `None` when
/// no file exists and defaults are used.
fn load_config() -> Result<(TamaConfig, Option<PathBuf>), EngineError> {
    let path = std::env::var_os(CONFIG_ENV)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);

    if path.exists() {
        let config = TamaConfig::from_file(&path)?;
        Ok((config, Some(path)))
    } else {
        let mut config = TamaConfig::default();
        config
            .logging
            .apply_level_override(std::env::var(LOG_LEVEL_ENV).ok());
        Ok((config, None))
    }
}

/// Run the session and feed it stdin until the user quits.
async fn run(config: TamaConfig) -> Result<(), EngineError> {
    let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
    let session = tokio::spawn(async move {
        let mut rx = rx;
        let mut sink = LogSink;
        run_session(&config, &mut rx, &mut sink).await
    });

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match commands::parse(&line) {
            Ok(None) => {}
            Ok(Some(Input::Perform(action))) => send(&tx, Command::Perform(action)).await?,
            Ok(Some(Input::Status)) => {
                let snapshot = request_snapshot(&tx).await?;
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            }
            Ok(Some(Input::Help)) => println!("{HELP}"),
            Ok(Some(Input::Quit)) => break,
            Err(err) => println!("{err}"),
        }
    }

    if tx.send(Command::Stop).await.is_err() {
        warn!("Session already stopped");
    }
    drop(tx);

    let summary = session.await.map_err(|err| EngineError::Session {
        message: err.to_string(),
    })??;
    println!(
        "Goodbye! Your pet lived to age {} over {} events.",
        summary.age, summary.events_applied
    );
    Ok(())
}

async fn send(tx: &mpsc::Sender<Command>, command: Command) -> Result<(), EngineError> {
    tx.send(command).await.map_err(|err| EngineError::Session {
        message: err.to_string(),
    })
}

async fn request_snapshot(tx: &mpsc::Sender<Command>) -> Result<SessionSnapshot, EngineError> {
    let (reply, response) = oneshot::channel();
    send(tx, Command::Snapshot(reply)).await?;
    response.await.map_err(|err| EngineError::Session {
        message: err.to_string(),
    })
}

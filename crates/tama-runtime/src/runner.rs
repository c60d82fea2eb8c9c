//! Session loop.
//!
//! This module provides [`run_session`], the async loop that serializes
//! the two sources of change for one pet into its [`Session`]:
//!
//! - **Commands** from the presentation layer arrive on an `mpsc` channel
//! - **Timers** fire when the scheduler's next deadline passes
//!
//! Both are handled on the same task, so no two transitions ever race.
//! The loop ends on [`Command::Stop`] or when every command sender is
//! dropped.

use tama_types::{ActionType, Notice, TamaState};
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

use crate::clock::SessionClock;
use crate::config::{ConfigError, TamaConfig};
use crate::session::{Session, SessionSnapshot};

/// Errors that can occur during the session run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The configuration was rejected before the session started.
    #[error("config error: {source}")]
    Config {
        /// The underlying configuration error.
        #[from]
        source: ConfigError,
    },
}

/// A request from the presentation layer.
#[derive(Debug)]
pub enum Command {
    /// The user pressed an action button.
    Perform(ActionType),
    /// Send back a snapshot of the session.
    Snapshot(oneshot::Sender<SessionSnapshot>),
    /// End the session.
    Stop,
}

/// Reason why the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// A [`Command::Stop`] was received.
    Stopped,
    /// Every command sender was dropped.
    ChannelClosed,
}

/// Result of a session run.
#[derive(Debug)]
pub struct SessionSummary {
    /// The reason the session ended.
    pub end_reason: EndReason,
    /// Total number of events applied, timers included.
    pub events_applied: u64,
    /// Age of the pet when the session ended.
    pub age: u32,
    /// The last committed state.
    pub final_state: TamaState,
}

/// Receiver of the notices produced by the session.
///
/// Implementations render snackbars, schedule push notifications, and so
/// on. Called only when a batch is non-empty, with the state committed
/// after that batch.
pub trait NoticeSink: Send {
    /// Called after a command or a batch of timers produced notices.
    fn on_notices(&mut self, notices: &[Notice], state: &TamaState);
}

/// A sink that drops every notice.
pub struct NoOpSink;

impl NoticeSink for NoOpSink {
    fn on_notices(&mut self, _notices: &[Notice], _state: &TamaState) {}
}

/// Run one pet session until stopped.
///
/// # Errors
///
/// Returns [`RunnerError::Config`] if `config` fails validation.
pub async fn run_session(
    config: &TamaConfig,
    commands: &mut mpsc::Receiver<Command>,
    sink: &mut dyn NoticeSink,
) -> Result<SessionSummary, RunnerError> {
    config.validate()?;

    let clock = SessionClock::start();
    let mut session = Session::new(config, clock.now_ms(), clock.started_at());

    info!(
        started_at = %clock.started_at(),
        health_check_interval_ms = config.scheduler.health_check_interval_ms,
        block_duration_ms = config.policy.abuse.block_duration_ms,
        "Session starting"
    );

    let end_reason = loop {
        let deadline = session.next_deadline().map(|ms| clock.instant_at(ms));

        tokio::select! {
            command = commands.recv() => {
                let now = clock.now_ms();
                emit(sink, &session.advance(now), session.state());

                match command {
                    None => break EndReason::ChannelClosed,
                    Some(Command::Stop) => break EndReason::Stopped,
                    Some(Command::Perform(action)) => {
                        emit(sink, &session.perform(action, now), session.state());
                    }
                    Some(Command::Snapshot(reply)) => {
                        if reply.send(session.snapshot(now)).is_err() {
                            warn!("Snapshot requester went away");
                        }
                    }
                }
            }
            () = sleep_until(deadline) => {
                emit(sink, &session.advance(clock.now_ms()), session.state());
            }
        }
    };

    let summary = SessionSummary {
        end_reason,
        events_applied: session.events_applied(),
        age: session.age(),
        final_state: session.state().clone(),
    };
    log_session_end(&summary);
    Ok(summary)
}

async fn sleep_until(deadline: Option<tokio::time::Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

fn emit(sink: &mut dyn NoticeSink, notices: &[Notice], state: &TamaState) {
    if !notices.is_empty() {
        sink.on_notices(notices, state);
    }
}

/// Log the end of a session.
pub fn log_session_end(summary: &SessionSummary) {
    info!(
        reason = ?summary.end_reason,
        events_applied = summary.events_applied,
        age = summary.age,
        is_sick = summary.final_state.health.is_sick,
        "Session ended"
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn stop_ends_the_session() {
        let (tx, mut rx) = mpsc::channel(8);
        tx.send(Command::Stop).await.unwrap();

        let summary = run_session(&TamaConfig::default(), &mut rx, &mut NoOpSink)
            .await
            .unwrap();
        assert_eq!(summary.end_reason, EndReason::Stopped);
        assert_eq!(summary.events_applied, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn closed_channel_ends_the_session() {
        let (tx, mut rx) = mpsc::channel(8);
        tx.send(Command::Perform(ActionType::Feed)).await.unwrap();
        drop(tx);

        let summary = run_session(&TamaConfig::default(), &mut rx, &mut NoOpSink)
            .await
            .unwrap();
        assert_eq!(summary.end_reason, EndReason::ChannelClosed);
        assert_eq!(summary.events_applied, 1);
        assert_eq!(summary.final_state.stats.hunger, 60);
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_config_is_rejected() {
        let (_tx, mut rx) = mpsc::channel(8);
        let mut config = TamaConfig::default();
        config.scheduler.age_interval_ms = 0;

        let result = run_session(&config, &mut rx, &mut NoOpSink).await;
        assert!(matches!(result, Err(RunnerError::Config { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn timers_fire_while_idle() {
        let (tx, mut rx) = mpsc::channel(8);
        let config = TamaConfig::default();
        let mut sink = NoOpSink;

        let driver = async {
            tokio::time::sleep(Duration::from_millis(95_000)).await;
            let (reply, snapshot) = oneshot::channel();
            tx.send(Command::Snapshot(reply)).await.unwrap();
            let snapshot = snapshot.await.unwrap();
            tx.send(Command::Stop).await.unwrap();
            snapshot
        };

        let (summary, snapshot) = tokio::join!(run_session(&config, &mut rx, &mut sink), driver);
        assert_eq!(snapshot.state.stats.hunger, 44);
        assert_eq!(snapshot.state.stats.energy, 50);
        assert!(snapshot.now >= 95_000);
        assert_eq!(summary.unwrap().end_reason, EndReason::Stopped);
    }
}

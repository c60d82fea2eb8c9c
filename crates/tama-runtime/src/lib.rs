//! Configuration, timers, and the single-owner session loop for the Tama
//! virtual pet.
//!
//! `tama-core` decides what a transition does; this crate decides when
//! transitions happen and who sees the result. It owns the only committed
//! pet state and feeds it user commands and timer events one at a time.
//!
//! # Modules
//!
//! - [`alerts`] -- Throttled low-stat alerts ([`AlertThrottle`])
//! - [`clock`] -- Monotonic session clock ([`SessionClock`])
//! - [`config`] -- YAML configuration loading ([`TamaConfig`])
//! - [`runner`] -- Async session loop ([`run_session`])
//! - [`scheduler`] -- Decay, health, unblock, and age deadlines ([`Scheduler`])
//! - [`session`] -- The authoritative pet state ([`Session`])

pub mod alerts;
pub mod clock;
pub mod config;
pub mod runner;
pub mod scheduler;
pub mod session;

// Re-export primary types at crate root for convenience.
pub use alerts::AlertThrottle;
pub use clock::SessionClock;
pub use config::{
    AlertConfig, ConfigError, LOG_LEVEL_ENV, LoggingConfig, SchedulerConfig, TamaConfig,
};
pub use runner::{
    Command, EndReason, NoOpSink, NoticeSink, RunnerError, SessionSummary, log_session_end,
    run_session,
};
pub use scheduler::{Due, Scheduler, Timer};
pub use session::{Session, SessionSnapshot};

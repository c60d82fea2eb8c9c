//! Session clock.
//!
//! The reducer and the scheduler only ever see plain millisecond
//! timestamps. This clock is where those come from: milliseconds elapsed
//! since the session started, read from tokio's monotonic clock so that
//! paused-time tests drive it deterministically.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tama_types::Timestamp;
use tokio::time::Instant;

/// Roughly thirty years; used when a deadline cannot be represented.
const FAR_FUTURE: Duration = Duration::from_secs(946_080_000);

/// Monotonic millisecond clock anchored at session start.
#[derive(Debug, Clone, Copy)]
pub struct SessionClock {
    start: Instant,
    started_at: DateTime<Utc>,
}

impl SessionClock {
    /// Start a clock at the current instant.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
            started_at: Utc::now(),
        }
    }

    /// Milliseconds elapsed since the clock started.
    pub fn now_ms(&self) -> Timestamp {
        Timestamp::try_from(self.start.elapsed().as_millis()).unwrap_or(Timestamp::MAX)
    }

    /// The instant at which the clock reads `ms`.
    pub fn instant_at(&self, ms: Timestamp) -> Instant {
        self.start
            .checked_add(Duration::from_millis(ms))
            .or_else(|| Instant::now().checked_add(FAR_FUTURE))
            .unwrap_or(self.start)
    }

    /// Wall-clock time at which the session started.
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

//! Events consumed by the transition engine.
//!
//! The wire form is adjacently tagged so it reads the same as the action
//! objects the presentation layer dispatches:
//!
//! ```json
//! { "type": "PERFORM_ACTION", "payload": { "action": "feed", "timestamp": 1000 } }
//! { "type": "UPDATE_HEALTH" }
//! ```
//!
//! A tag the engine does not know decodes to [`Event::Unknown`], which the
//! reducer treats as a no-op.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ActionType, StatKind};
use crate::state::Timestamp;

/// One input to the transition engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum Event {
    /// The user pressed an action button.
    PerformAction {
        /// Which action was requested.
        action: ActionType,
        /// When it was requested.
        timestamp: Timestamp,
    },
    /// A scheduled decay tick for a single stat.
    DecayStat {
        /// The stat to decrease.
        stat: StatKind,
        /// How much to subtract before clamping.
        amount: u32,
    },
    /// A scheduled health check.
    UpdateHealth,
    /// The block on an action has expired.
    UnblockAction {
        /// The action to accept again.
        action: ActionType,
    },
    /// An event kind this engine version does not recognize.
    #[serde(other)]
    Unknown,
}

impl Event {
    /// Build a [`Event::PerformAction`].
    pub const fn perform(action: ActionType, timestamp: Timestamp) -> Self {
        Self::PerformAction { action, timestamp }
    }

    /// Build a [`Event::DecayStat`].
    pub const fn decay(stat: StatKind, amount: u32) -> Self {
        Self::DecayStat { stat, amount }
    }

    /// Build a [`Event::UnblockAction`].
    pub const fn unblock(action: ActionType) -> Self {
        Self::UnblockAction { action }
    }

    /// Short name of the event kind, used in logs.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::PerformAction { .. } => "perform_action",
            Self::DecayStat { .. } => "decay_stat",
            Self::UpdateHealth => "update_health",
            Self::UnblockAction { .. } => "unblock_action",
            Self::Unknown => "unknown",
        }
    }
}

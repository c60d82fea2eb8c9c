//! User-visible facts derived from state transitions.
//!
//! The engine never talks to the presentation layer. Instead the runtime
//! compares the state before and after each event and hands the resulting
//! [`Notice`] values to whoever renders toasts, snackbars, or push
//! notifications.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ActionType, StatKind};

/// Something the user should be told about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Notice {
    /// The sickness latch was set.
    BecameSick,
    /// The pet recovered from sickness.
    Recovered,
    /// An action was used too often and is now refused.
    ActionBlocked {
        /// The blocked action.
        action: ActionType,
    },
    /// A previously blocked action is accepted again.
    ActionUnblocked {
        /// The released action.
        action: ActionType,
    },
    /// The user tried an action that is currently blocked.
    ActionRefused {
        /// The refused action.
        action: ActionType,
    },
    /// A vital stat is at or below its critical level.
    StatCritical {
        /// The critical stat.
        stat: StatKind,
    },
    /// A stat is low enough to warrant a (throttled) push alert.
    StatLow {
        /// The low stat.
        stat: StatKind,
    },
    /// Play was requested while both hungry and exhausted.
    TooTiredToPlay,
    /// Clean was requested while the pet is filthy.
    TooDirtyToCooperate,
    /// Rest was requested in a dirty environment; sleep will be poor.
    PoorSleep,
}

impl Notice {
    /// Whether this notice warrants a push notification rather than an
    /// in-app snackbar only.
    pub const fn is_alert(&self) -> bool {
        matches!(
            self,
            Self::BecameSick | Self::StatCritical { .. } | Self::StatLow { .. }
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BecameSick => f.write_str("your pet fell sick"),
            Self::Recovered => f.write_str("your pet has recovered"),
            Self::ActionBlocked { action } => {
                write!(f, "\"{action}\" was used too often, wait a little")
            }
            Self::ActionUnblocked { action } => write!(f, "\"{action}\" is available again"),
            Self::ActionRefused { action } => {
                write!(f, "\"{action}\" is blocked for now, wait a little")
            }
            Self::StatCritical { stat } => match stat {
                StatKind::Hunger => f.write_str("your pet is starving"),
                StatKind::Energy => f.write_str("your pet is exhausted"),
                StatKind::Cleanliness => f.write_str("your pet is filthy"),
                StatKind::Happiness => f.write_str("your pet is miserable"),
            },
            Self::StatLow { stat } => match stat {
                StatKind::Hunger => f.write_str("your pet is hungry, feed it soon"),
                StatKind::Energy => f.write_str("your pet is tired, it needs to sleep"),
                StatKind::Cleanliness => f.write_str("your pet is dirty, a bath is due"),
                StatKind::Happiness => f.write_str("your pet is sad, play with it"),
            },
            Self::TooTiredToPlay => f.write_str("your pet is too tired and hungry to play"),
            Self::TooDirtyToCooperate => {
                f.write_str("your pet refuses to do anything until it is clean")
            }
            Self::PoorSleep => f.write_str("it is filthy in here, your pet sleeps badly"),
        }
    }
}

// ---------------------------------------------------------------------------
// Stat bands
// ---------------------------------------------------------------------------

/// Upper bound (inclusive) of the [`StatBand::Low`] band.
pub const LOW_BAND_MAX: u32 = 20;

/// Upper bound (inclusive) of the [`StatBand::Medium`] band.
pub const MEDIUM_BAND_MAX: u32 = 80;

/// Coarse classification of a stat value, used to color gauges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum StatBand {
    /// 0 to 20.
    Low,
    /// 21 to 80.
    Medium,
    /// Above 80.
    High,
}

impl StatBand {
    /// Classify a stat value.
    pub const fn of(value: u32) -> Self {
        if value <= LOW_BAND_MAX {
            Self::Low
        } else if value <= MEDIUM_BAND_MAX {
            Self::Medium
        } else {
            Self::High
        }
    }
}

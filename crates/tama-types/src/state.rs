//! The pet state aggregate and its parts.
//!
//! [`TamaState`] is a value type. The engine never mutates a committed
//! state; every transition builds a new one from the previous value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ActionType, StatKind};

/// Milliseconds read from a monotonic clock.
///
/// The origin is chosen by the caller (usually the session start). Only
/// differences between two timestamps are meaningful.
pub type Timestamp = u64;

/// Value every stat starts at in a fresh state.
pub const DEFAULT_STAT_VALUE: u32 = 50;

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// The four bounded stats of the pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Stats {
    /// Mood (0--100).
    pub happiness: u32,
    /// Satiety (0--100). Low means starving.
    pub hunger: u32,
    /// Hygiene (0--100).
    pub cleanliness: u32,
    /// Rest level (0--100).
    pub energy: u32,
}

impl Stats {
    /// All four stats at the same value.
    pub const fn uniform(value: u32) -> Self {
        Self {
            happiness: value,
            hunger: value,
            cleanliness: value,
            energy: value,
        }
    }

    /// Read one stat.
    pub const fn get(&self, stat: StatKind) -> u32 {
        match stat {
            StatKind::Happiness => self.happiness,
            StatKind::Hunger => self.hunger,
            StatKind::Cleanliness => self.cleanliness,
            StatKind::Energy => self.energy,
        }
    }

    /// Return a copy with one stat replaced.
    #[must_use]
    pub const fn with(mut self, stat: StatKind, value: u32) -> Self {
        match stat {
            StatKind::Happiness => self.happiness = value,
            StatKind::Hunger => self.hunger = value,
            StatKind::Cleanliness => self.cleanliness = value,
            StatKind::Energy => self.energy = value,
        }
        self
    }

    /// Iterate `(stat, value)` pairs in [`StatKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (StatKind, u32)> + '_ {
        StatKind::ALL.into_iter().map(|stat| (stat, self.get(stat)))
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::uniform(DEFAULT_STAT_VALUE)
    }
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

/// Sickness latch and the counter that guards it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HealthState {
    /// Whether the pet is currently sick.
    pub is_sick: bool,
    /// Consecutive health checks with at least one vital stat at or below
    /// its critical level.
    pub sick_counter: u32,
}

// ---------------------------------------------------------------------------
// Root aggregate
// ---------------------------------------------------------------------------

/// The full state of one pet.
///
/// Invariants (maintained by the reducer in `tama-core`):
///
/// - every stat lies within the configured limits;
/// - `health.is_sick` is only true after `sick_counter` reached the sick
///   threshold since the last recovery;
/// - `action_history[a]` only holds timestamps inside the abuse window of
///   the latest accepted attempt on `a`;
/// - `blocked_actions[a]` only becomes true on an abuse-triggering attempt
///   and only becomes false on an explicit unblock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TamaState {
    /// Current stats.
    pub stats: Stats,
    /// Current sickness state.
    pub health: HealthState,
    /// Timestamp of the most recent accepted use of each action. Actions
    /// never used have no entry.
    pub last_actions: BTreeMap<ActionType, Timestamp>,
    /// Recent accepted uses per action, oldest first.
    pub action_history: BTreeMap<ActionType, Vec<Timestamp>>,
    /// Whether each action is currently refused.
    pub blocked_actions: BTreeMap<ActionType, bool>,
}

impl TamaState {
    /// A fresh pet with every stat at `initial`.
    ///
    /// The pet is healthy, has no history, and every action is present in
    /// the history and block tables (empty and unblocked).
    pub fn new(initial: u32) -> Self {
        Self::with_stats(Stats::uniform(initial))
    }

    /// A fresh pet with the given stats.
    pub fn with_stats(stats: Stats) -> Self {
        Self {
            stats,
            health: HealthState::default(),
            last_actions: BTreeMap::new(),
            action_history: ActionType::ALL
                .into_iter()
                .map(|action| (action, Vec::new()))
                .collect(),
            blocked_actions: ActionType::ALL
                .into_iter()
                .map(|action| (action, false))
                .collect(),
        }
    }

    /// Whether `action` is currently refused.
    pub fn is_blocked(&self, action: ActionType) -> bool {
        self.blocked_actions.get(&action).copied().unwrap_or(false)
    }

    /// Timestamp of the last accepted use of `action`, if any.
    pub fn last_action(&self, action: ActionType) -> Option<Timestamp> {
        self.last_actions.get(&action).copied()
    }

    /// Recent accepted uses of `action`, oldest first.
    pub fn history(&self, action: ActionType) -> &[Timestamp] {
        self.action_history.get(&action).map_or(&[], Vec::as_slice)
    }

    /// Actions currently refused, in [`ActionType::ALL`] order.
    pub fn blocked(&self) -> impl Iterator<Item = ActionType> + '_ {
        ActionType::ALL
            .into_iter()
            .filter(|&action| self.is_blocked(action))
    }
}

impl Default for TamaState {
    fn default() -> Self {
        Self::new(DEFAULT_STAT_VALUE)
    }
}

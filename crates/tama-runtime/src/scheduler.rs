//! Deadline table for everything that happens without user input.
//!
//! Each stat decays on its own interval, the health check runs on another,
//! the pet ages on a third, and every blocked action has at most one
//! pending release. The scheduler only stores deadlines in session
//! milliseconds; it never sleeps and never reads a clock. The runner asks
//! for [`Scheduler::next_deadline`], waits, then calls [`Scheduler::poll`].
//!
//! When the caller falls behind, `poll` returns one entry per elapsed
//! period, in deadline order, so decay compounds exactly as if every timer
//! had fired on time.

use std::collections::BTreeMap;

use tama_core::PolicyConfig;
use tama_types::{ActionType, StatKind, Timestamp};

use crate::config::SchedulerConfig;

/// A scheduled job.
///
/// Variant order is the tie-break when two deadlines coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Timer {
    /// Periodic decay of one stat.
    Decay(StatKind),
    /// Periodic health check.
    Health,
    /// One-shot release of a blocked action.
    Unblock(ActionType),
    /// Periodic age increment.
    Age,
}

/// A timer that came due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Due {
    /// The deadline that passed.
    pub at: Timestamp,
    /// Which timer it belongs to.
    pub timer: Timer,
}

/// Deadline table for decay, health, unblock, and age timers.
#[derive(Debug, Clone)]
pub struct Scheduler {
    deadlines: BTreeMap<Timer, Timestamp>,
    intervals: BTreeMap<Timer, u64>,
    block_duration_ms: u64,
}

impl Scheduler {
    /// Arm every periodic timer relative to `start`.
    pub fn new(policy: &PolicyConfig, config: &SchedulerConfig, start: Timestamp) -> Self {
        let mut intervals = BTreeMap::new();
        for stat in StatKind::ALL {
            intervals.insert(Timer::Decay(stat), policy.decay.rule(stat).interval_ms);
        }
        intervals.insert(Timer::Health, config.health_check_interval_ms);
        intervals.insert(Timer::Age, config.age_interval_ms);

        // A zero interval would never advance past `now`.
        for interval in intervals.values_mut() {
            *interval = (*interval).max(1);
        }

        let deadlines = intervals
            .iter()
            .map(|(&timer, &interval)| (timer, start.saturating_add(interval)))
            .collect();

        Self {
            deadlines,
            intervals,
            block_duration_ms: policy.abuse.block_duration_ms,
        }
    }

    /// Schedule the release of `action` one block duration after `now`.
    ///
    /// Replaces any release already pending for the action.
    pub fn arm_unblock(&mut self, action: ActionType, now: Timestamp) -> Timestamp {
        let at = now.saturating_add(self.block_duration_ms);
        self.deadlines.insert(Timer::Unblock(action), at);
        at
    }

    /// Drop a pending release. Returns whether one was pending.
    pub fn cancel_unblock(&mut self, action: ActionType) -> bool {
        self.deadlines.remove(&Timer::Unblock(action)).is_some()
    }

    /// When the release of `action` is due, if one is pending.
    pub fn pending_unblock(&self, action: ActionType) -> Option<Timestamp> {
        self.deadlines.get(&Timer::Unblock(action)).copied()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.deadlines.values().copied().min()
    }

    /// Every deadline at or before `now`, in deadline order.
    ///
    /// Periodic timers are re-armed one interval after the deadline that
    /// fired, not after `now`. One-shot timers are removed.
    pub fn poll(&mut self, now: Timestamp) -> Vec<Due> {
        let mut due = Vec::new();
        while let Some((timer, at)) = self.earliest_due(now) {
            due.push(Due { at, timer });
            match self.intervals.get(&timer) {
                Some(&interval) => {
                    self.deadlines.insert(timer, at.saturating_add(interval));
                }
                None => {
                    self.deadlines.remove(&timer);
                }
            }
            // Saturated deadlines cannot advance further.
            if at == Timestamp::MAX {
                break;
            }
        }
        due
    }

    fn earliest_due(&self, now: Timestamp) -> Option<(Timer, Timestamp)> {
        self.deadlines
            .iter()
            .filter(|&(_, &at)| at <= now)
            .min_by_key(|&(&timer, &at)| (at, timer))
            .map(|(&timer, &at)| (timer, at))
    }
}

//! The single authoritative copy of a pet.
//!
//! A [`Session`] owns the committed [`TamaState`] and is the only place it
//! is ever replaced. User actions and timer events are funnelled through
//! [`Session::dispatch`] one at a time, so every transition sees the
//! result of the previous one. Callers bring the time: [`Session::advance`]
//! must be called with the current session time before acting on a user
//! command, so that due timers land first.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tama_core::{Attempt, Reducer, diff, preflight};
use tama_types::{ActionType, Event, Notice, StatBand, StatKind, TamaState, Timestamp};
use tracing::{debug, info};

use crate::alerts::AlertThrottle;
use crate::config::TamaConfig;
use crate::scheduler::{Scheduler, Timer};

/// Read-only view of a session at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    /// The committed state.
    pub state: TamaState,
    /// Age in years.
    pub age: u32,
    /// Gauge band of each stat.
    pub bands: BTreeMap<StatKind, StatBand>,
    /// When each blocked action will be released.
    pub blocked_until: BTreeMap<ActionType, Timestamp>,
    /// Session time the snapshot was taken at.
    pub now: Timestamp,
    /// Wall-clock start of the session.
    pub started_at: DateTime<Utc>,
}

/// Owner of one pet's state, timers, and alert memory.
#[derive(Debug, Clone)]
pub struct Session {
    reducer: Reducer,
    state: TamaState,
    scheduler: Scheduler,
    alerts: AlertThrottle,
    age: u32,
    events_applied: u64,
    started_at: DateTime<Utc>,
}

impl Session {
    /// Start a session for a fresh pet at session time `start`.
    pub fn new(config: &TamaConfig, start: Timestamp, started_at: DateTime<Utc>) -> Self {
        let reducer = Reducer::new(config.policy.clone());
        let state = reducer.initial_state();
        Self {
            scheduler: Scheduler::new(&config.policy, &config.scheduler, start),
            alerts: AlertThrottle::new(config.alerts),
            reducer,
            state,
            age: 0,
            events_applied: 0,
            started_at,
        }
    }

    /// Perform a user action at `now`.
    ///
    /// Returns the pre-dispatch hints followed by the notices of the
    /// transition itself.
    pub fn perform(&mut self, action: ActionType, now: Timestamp) -> Vec<Notice> {
        let mut notices = preflight(&self.state, action, self.reducer.policy());
        let (outcome, next) = self.reducer.attempt(&self.state, action, now);

        match outcome {
            Attempt::Accepted(efficiency) => {
                let stat = action.primary_stat();
                debug!(
                    action = %action,
                    stat = %stat,
                    efficiency = efficiency.percent(),
                    before = self.state.stats.get(stat),
                    after = next.stats.get(stat),
                    "Action accepted"
                );
            }
            Attempt::Blocked => debug!(action = %action, "Action trips abuse block"),
            Attempt::Refused => debug!(action = %action, "Action refused while blocked"),
        }

        notices.extend(self.commit(&Event::perform(action, now), next, now));
        notices
    }

    /// Apply one event and commit the result.
    ///
    /// Newly blocked actions get a release timer; actions unblocked by the
    /// event lose theirs. The returned notices are the transition diff
    /// followed by any throttled low-stat alerts.
    pub fn dispatch(&mut self, event: &Event, now: Timestamp) -> Vec<Notice> {
        let next = self.reducer.apply(&self.state, event);
        self.commit(event, next, now)
    }

    fn commit(&mut self, event: &Event, next: TamaState, now: Timestamp) -> Vec<Notice> {
        let mut notices = diff(&self.state, &next, self.reducer.policy());

        for notice in &notices {
            match *notice {
                Notice::ActionBlocked { action } => {
                    let until = self.scheduler.arm_unblock(action, now);
                    debug!(action = %action, until, "Release scheduled");
                }
                Notice::ActionUnblocked { action } => {
                    self.scheduler.cancel_unblock(action);
                }
                _ => {}
            }
        }

        self.state = next;
        self.events_applied = self.events_applied.saturating_add(1);
        debug!(event = event.kind(), at = now, "Event applied");

        notices.extend(self.alerts.check(&self.state.stats, now));
        log_notices(&notices, now);
        notices
    }

    /// Fire every timer due at or before `now`.
    pub fn advance(&mut self, now: Timestamp) -> Vec<Notice> {
        let mut notices = Vec::new();
        for due in self.scheduler.poll(now) {
            let event = match due.timer {
                Timer::Decay(stat) => {
                    Event::decay(stat, self.reducer.policy().decay.rule(stat).amount)
                }
                Timer::Health => Event::UpdateHealth,
                Timer::Unblock(action) => Event::unblock(action),
                Timer::Age => {
                    self.age = self.age.saturating_add(1);
                    debug!(age = self.age, at = due.at, "Pet aged");
                    continue;
                }
            };
            notices.extend(self.dispatch(&event, due.at));
        }
        notices
    }

    /// The committed state.
    pub const fn state(&self) -> &TamaState {
        &self.state
    }

    /// Age in years.
    pub const fn age(&self) -> u32 {
        self.age
    }

    /// Events applied since the session started, timers included.
    pub const fn events_applied(&self) -> u64 {
        self.events_applied
    }

    /// Earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.scheduler.next_deadline()
    }

    /// Read-only view of the session at `now`.
    pub fn snapshot(&self, now: Timestamp) -> SessionSnapshot {
        let bands = self
            .state
            .stats
            .iter()
            .map(|(stat, value)| (stat, StatBand::of(value)))
            .collect();
        let blocked_until = self
            .state
            .blocked()
            .filter_map(|action| {
                self.scheduler
                    .pending_unblock(action)
                    .map(|until| (action, until))
            })
            .collect();

        SessionSnapshot {
            state: self.state.clone(),
            age: self.age,
            bands,
            blocked_until,
            now,
            started_at: self.started_at,
        }
    }
}

fn log_notices(notices: &[Notice], now: Timestamp) {
    for notice in notices {
        match notice {
            Notice::BecameSick
            | Notice::Recovered
            | Notice::ActionBlocked { .. }
            | Notice::ActionUnblocked { .. } => {
                info!(notice = %notice, at = now, "Pet status changed");
            }
            _ => debug!(notice = %notice, at = now, "Notice"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(&TamaConfig::default(), 0, Utc::now())
    }

    #[test]
    fn fresh_session() {
        let s = session();
        assert_eq!(s.state(), &TamaState::default());
        assert_eq!(s.age(), 0);
        assert_eq!(s.events_applied(), 0);
        assert_eq!(s.next_deadline(), Some(5_000));
    }

    #[test]
    fn perform_commits_the_new_state() {
        let mut s = session();
        let notices = s.perform(ActionType::Feed, 100);
        assert!(notices.is_empty());
        assert_eq!(s.state().stats.hunger, 60);
        assert_eq!(s.events_applied(), 1);
    }

    #[test]
    fn perform_matches_dispatching_the_event() {
        let mut performed = session();
        let mut dispatched = session();
        for at in [0, 1_000, 2_000, 2_500, 2_600] {
            let _ = performed.perform(ActionType::Feed, at);
            let _ = dispatched.dispatch(&Event::perform(ActionType::Feed, at), at);
            assert_eq!(performed.state(), dispatched.state());
        }
        assert!(performed.state().is_blocked(ActionType::Feed));
        assert_eq!(performed.events_applied(), 5);
    }

    #[test]
    fn block_arms_and_timer_releases() {
        let mut s = session();
        for at in [0, 1_000, 2_000] {
            let _ = s.perform(ActionType::Play, at);
        }
        let notices = s.perform(ActionType::Play, 3_000);
        assert_eq!(
            notices,
            vec![Notice::ActionBlocked {
                action: ActionType::Play
            }]
        );
        assert_eq!(
            s.snapshot(3_000).blocked_until.get(&ActionType::Play),
            Some(&18_000)
        );

        let refused = s.perform(ActionType::Play, 4_000);
        assert_eq!(
            refused,
            vec![Notice::ActionRefused {
                action: ActionType::Play
            }]
        );

        let released = s.advance(18_000);
        assert!(released.contains(&Notice::ActionUnblocked {
            action: ActionType::Play
        }));
        assert!(!s.state().is_blocked(ActionType::Play));
        assert!(s.snapshot(18_000).blocked_until.is_empty());
    }

    #[test]
    fn external_unblock_cancels_the_timer() {
        let mut s = session();
        for at in [0, 1_000, 2_000, 3_000] {
            let _ = s.perform(ActionType::Clean, at);
        }
        assert!(s.state().is_blocked(ActionType::Clean));
        let _ = s.dispatch(&Event::unblock(ActionType::Clean), 5_000);
        assert!(s.snapshot(5_000).blocked_until.is_empty());
        // The old deadline no longer produces an unblock.
        let later = s.advance(18_000);
        assert!(!later.contains(&Notice::ActionUnblocked {
            action: ActionType::Clean
        }));
    }

    #[test]
    fn advance_applies_decay_and_age() {
        let mut s = session();
        let _ = s.advance(240_000);
        // Hunger decays at 90s and 180s.
        assert_eq!(s.state().stats.hunger, 38);
        // Energy at 100s and 200s.
        assert_eq!(s.state().stats.energy, 40);
        // Happiness at 120s and 240s.
        assert_eq!(s.state().stats.happiness, 42);
        // Cleanliness at 150s.
        assert_eq!(s.state().stats.cleanliness, 47);
        assert_eq!(s.age(), 2);
    }

    #[test]
    fn neglect_leads_to_sickness() {
        let mut s = session();
        // Hunger hits 8 at 630s; the third check after that makes it sick.
        let notices = s.advance(800_000);
        assert!(notices.contains(&Notice::BecameSick));
        assert!(notices.contains(&Notice::StatCritical {
            stat: StatKind::Hunger
        }));
        assert!(notices.contains(&Notice::StatLow {
            stat: StatKind::Hunger
        }));
        assert!(s.state().health.is_sick);
    }

    #[test]
    fn snapshot_reports_bands() {
        let s = session();
        let snapshot = s.snapshot(0);
        assert_eq!(snapshot.bands.len(), 4);
        assert!(snapshot.bands.values().all(|band| *band == StatBand::Medium));
    }

    #[test]
    fn snapshot_serializes_for_the_presentation_layer() {
        let mut s = session();
        let _ = s.perform(ActionType::Feed, 0);
        let json = serde_json::to_value(s.snapshot(10)).unwrap_or_default();
        assert_eq!(json["state"]["stats"]["hunger"], 60);
        assert_eq!(json["bands"]["hunger"], "medium");
        assert_eq!(json["age"], 0);
        assert_eq!(json["now"], 10);
    }

    #[test]
    fn preflight_hints_come_first() {
        let mut s = session();
        let _ = s.advance(5_000_000);
        let notices = s.perform(ActionType::Rest, 5_000_000);
        assert_eq!(notices.first(), Some(&Notice::PoorSleep));
    }
}

//! The transition engine.
//!
//! [`reduce`] maps a state and one [`Event`] to the next state. It is a pure
//! function: it reads no clock (timestamps travel inside the event), keeps
//! no hidden state, performs no I/O, and never modifies its input. Callers
//! keep exactly one committed state and replace it with the return value.
//!
//! # `PerformAction` order of operations
//!
//! 1. A blocked action is refused: the state is returned unchanged.
//! 2. If the abuse window already holds `threshold` accepted uses, the
//!    action becomes blocked and nothing else happens.
//! 3. Otherwise the use is recorded (history pruned to the window,
//!    last-use timestamp updated).
//! 4. Efficiency comes from the *previous* last-use timestamp.
//! 5. The action's effect is applied and clamped.

use tama_types::{ActionType, Event, TamaState, Timestamp};

use crate::abuse::{is_abusive, record_use};
use crate::actions::apply_effect;
use crate::config::PolicyConfig;
use crate::effectiveness::{Efficiency, efficiency};
use crate::health::update_health;
use crate::stats::lower;

/// How a `PerformAction` attempt will be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    /// The action is currently blocked; nothing changes.
    Refused,
    /// This attempt trips the abuse block; the action is not applied.
    Blocked,
    /// The action is applied with the given efficiency.
    Accepted(Efficiency),
}

/// Decide how an attempt at `action` at `timestamp` will be handled.
pub fn assess(
    policy: &PolicyConfig,
    state: &TamaState,
    action: ActionType,
    timestamp: Timestamp,
) -> Attempt {
    if state.is_blocked(action) {
        return Attempt::Refused;
    }
    if is_abusive(state.history(action), timestamp, &policy.abuse) {
        return Attempt::Blocked;
    }
    Attempt::Accepted(efficiency(
        state.last_action(action),
        timestamp,
        policy.cooldowns.cooldown(action),
    ))
}

/// Apply one event to `state` under `policy`.
#[must_use]
pub fn reduce(policy: &PolicyConfig, state: &TamaState, event: &Event) -> TamaState {
    match *event {
        Event::PerformAction { action, timestamp } => attempt(policy, state, action, timestamp).1,
        Event::DecayStat { stat, amount } => TamaState {
            stats: lower(state.stats, stat, amount, &policy.limits),
            ..state.clone()
        },
        Event::UpdateHealth => TamaState {
            health: update_health(state.health, &state.stats, &policy.critical),
            ..state.clone()
        },
        Event::UnblockAction { action } => {
            let mut blocked_actions = state.blocked_actions.clone();
            blocked_actions.insert(action, false);
            TamaState {
                blocked_actions,
                ..state.clone()
            }
        }
        Event::Unknown => state.clone(),
    }
}

/// Perform `action` at `timestamp`, returning how it was handled along with
/// the next state.
#[must_use]
pub fn attempt(
    policy: &PolicyConfig,
    state: &TamaState,
    action: ActionType,
    timestamp: Timestamp,
) -> (Attempt, TamaState) {
    let outcome = assess(policy, state, action, timestamp);
    let next = match outcome {
        Attempt::Refused => state.clone(),
        Attempt::Blocked => {
            let mut blocked_actions = state.blocked_actions.clone();
            blocked_actions.insert(action, true);
            TamaState {
                blocked_actions,
                ..state.clone()
            }
        }
        Attempt::Accepted(efficiency) => {
            let mut action_history = state.action_history.clone();
            action_history.insert(
                action,
                record_use(state.history(action), timestamp, &policy.abuse),
            );
            let mut last_actions = state.last_actions.clone();
            last_actions.insert(action, timestamp);

            TamaState {
                stats: apply_effect(state.stats, action, efficiency, state.health.is_sick, policy),
                health: state.health,
                last_actions,
                action_history,
                blocked_actions: state.blocked_actions.clone(),
            }
        }
    };
    (outcome, next)
}

/// A reducer bound to one policy.
#[derive(Debug, Clone, Default)]
pub struct Reducer {
    policy: PolicyConfig,
}

impl Reducer {
    /// Bind a reducer to `policy`.
    pub const fn new(policy: PolicyConfig) -> Self {
        Self { policy }
    }

    /// The policy this reducer applies.
    pub const fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// A fresh pet under this policy.
    pub fn initial_state(&self) -> TamaState {
        TamaState::with_stats(self.policy.initial_stats())
    }

    /// Apply one event. See [`reduce`].
    #[must_use]
    pub fn apply(&self, state: &TamaState, event: &Event) -> TamaState {
        reduce(&self.policy, state, event)
    }

    /// Apply a sequence of events in order.
    #[must_use]
    pub fn apply_all<'a, I>(&self, state: &TamaState, events: I) -> TamaState
    where
        I: IntoIterator<Item = &'a Event>,
    {
        events
            .into_iter()
            .fold(state.clone(), |current, event| self.apply(&current, event))
    }

    /// Perform an action and report how it was handled. See [`attempt`].
    #[must_use]
    pub fn attempt(
        &self,
        state: &TamaState,
        action: ActionType,
        timestamp: Timestamp,
    ) -> (Attempt, TamaState) {
        attempt(&self.policy, state, action, timestamp)
    }
}

//! Notices derived from state transitions.
//!
//! The reducer never reports anything. [`diff`] compares the committed state
//! with the reducer's output and lists what changed in user terms, and
//! [`preflight`] lists hints about an action before it is dispatched. Neither
//! influences the transition itself.

use tama_types::{ActionType, Notice, StatKind, TamaState};

use crate::config::PolicyConfig;

/// Notices implied by the transition from `prev` to `next`.
///
/// Order: health changes, then block changes (in action order), then vital
/// stats that dropped into or moved within their critical range.
pub fn diff(prev: &TamaState, next: &TamaState, policy: &PolicyConfig) -> Vec<Notice> {
    let mut notices = Vec::new();

    match (prev.health.is_sick, next.health.is_sick) {
        (false, true) => notices.push(Notice::BecameSick),
        (true, false) => notices.push(Notice::Recovered),
        _ => {}
    }

    for action in ActionType::ALL {
        match (prev.is_blocked(action), next.is_blocked(action)) {
            (false, true) => notices.push(Notice::ActionBlocked { action }),
            (true, false) => notices.push(Notice::ActionUnblocked { action }),
            _ => {}
        }
    }

    for stat in StatKind::VITAL {
        let changed = prev.stats.get(stat) != next.stats.get(stat);
        if changed && policy.critical.is_critical(&next.stats, stat) {
            notices.push(Notice::StatCritical { stat });
        }
    }

    notices
}

/// Hints about performing `action` on `state`, before dispatch.
pub fn preflight(state: &TamaState, action: ActionType, policy: &PolicyConfig) -> Vec<Notice> {
    if state.is_blocked(action) {
        return vec![Notice::ActionRefused { action }];
    }

    let effects = &policy.effects;
    let stats = &state.stats;
    let hint = match action {
        ActionType::Play
            if stats.hunger < effects.exhaustion_below && stats.energy < effects.exhaustion_below =>
        {
            Some(Notice::TooTiredToPlay)
        }
        ActionType::Clean if stats.cleanliness < effects.filthy_below => {
            Some(Notice::TooDirtyToCooperate)
        }
        ActionType::Rest if stats.cleanliness < effects.dirty_below => Some(Notice::PoorSleep),
        _ => None,
    };

    hint.into_iter().collect()
}

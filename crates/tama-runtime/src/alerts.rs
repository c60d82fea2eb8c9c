//! Throttled low-stat alerts.
//!
//! A stat that drops below the low threshold raises [`Notice::StatLow`] once,
//! then again only after more than the cooldown has passed. Climbing back to the reset threshold forgets the
//! last alert, so the next drop alerts immediately.

use std::collections::BTreeMap;

use tama_types::{Notice, StatKind, Stats, Timestamp};

use crate::config::AlertConfig;

/// Per-stat memory of the last alert raised.
#[derive(Debug, Clone, Default)]
pub struct AlertThrottle {
    config: AlertConfig,
    last_alert: BTreeMap<StatKind, Timestamp>,
}

impl AlertThrottle {
    /// Create a throttle with no alert history.
    pub const fn new(config: AlertConfig) -> Self {
        Self {
            config,
            last_alert: BTreeMap::new(),
        }
    }

    /// Alerts warranted by `stats` at `now`.
    pub fn check(&mut self, stats: &Stats, now: Timestamp) -> Vec<Notice> {
        let mut notices = Vec::new();
        for (stat, value) in stats.iter() {
            if value >= self.config.reset_threshold {
                self.last_alert.remove(&stat);
                continue;
            }
            if value >= self.config.low_threshold {
                continue;
            }
            let cooled_down = self
                .last_alert
                .get(&stat)
                .is_none_or(|&last| now.saturating_sub(last) > self.config.cooldown_ms);
            if cooled_down {
                self.last_alert.insert(stat, now);
                notices.push(Notice::StatLow { stat });
            }
        }
        notices
    }
}

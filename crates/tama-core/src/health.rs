//! Sickness latch driven by periodic health checks.
//!
//! ```text
//!              any vital critical, counter < threshold
//!            +------------------+
//!            v                  |
//!  Healthy --+-- counter reaches threshold --> Sick
//!     ^                                         |
//!     +---- hunger, energy, cleanliness all ----+
//!           above the recovery threshold
//! ```
//!
//! The counter resets to 0 whenever no vital stat is critical, whether the
//! pet is sick or not. Once the latch is set it stays set until recovery,
//! and the counter stops growing at the threshold.

use tama_types::{HealthState, Stats};

use crate::config::CriticalLevels;

/// Run one health check against the current stats.
#[must_use]
pub fn update_health(health: HealthState, stats: &Stats, critical: &CriticalLevels) -> HealthState {
    let sick_counter = if critical.any_critical(stats) {
        health
            .sick_counter
            .saturating_add(1)
            .min(critical.sick_threshold)
    } else {
        0
    };

    let is_sick = health.is_sick || sick_counter >= critical.sick_threshold;

    if is_sick && critical.can_recover(stats) {
        return HealthState::default();
    }

    HealthState {
        is_sick,
        sick_counter,
    }
}

#[cfg(test)]
mod tests {
    use tama_types::StatKind;

    use super::*;

    fn check(health: HealthState, stats: &Stats) -> HealthState {
        update_health(health, stats, &CriticalLevels::default())
    }

    #[test]
    fn healthy_stats_reset_counter() {
        let health = HealthState {
            is_sick: false,
            sick_counter: 2,
        };
        let after = check(health, &Stats::default());
        assert_eq!(after, HealthState::default());
    }

    #[test]
    fn falls_sick_on_third_critical_check() {
        let stats = Stats::default().with(StatKind::Hunger, 5);
        let first = check(HealthState::default(), &stats);
        assert_eq!(first.sick_counter, 1);
        assert!(!first.is_sick);
        let second = check(first, &stats);
        assert_eq!(second.sick_counter, 2);
        assert!(!second.is_sick);
        let third = check(second, &stats);
        assert_eq!(third.sick_counter, 3);
        assert!(third.is_sick);
    }

    #[test]
    fn counter_stops_at_threshold_once_sick() {
        let stats = Stats::default().with(StatKind::Energy, 0);
        let mut health = HealthState::default();
        for _ in 0..10 {
            health = check(health, &stats);
        }
        assert!(health.is_sick);
        assert_eq!(health.sick_counter, 3);
    }

    #[test]
    fn critical_boundary_is_inclusive() {
        let at_level = Stats::default().with(StatKind::Cleanliness, 5);
        assert_eq!(check(HealthState::default(), &at_level).sick_counter, 1);
        let above = Stats::default().with(StatKind::Cleanliness, 6);
        assert_eq!(check(HealthState::default(), &above).sick_counter, 0);
    }

    #[test]
    fn sick_pet_stays_sick_between_thresholds() {
        let sick = HealthState {
            is_sick: true,
            sick_counter: 3,
        };
        // Nothing critical, but energy is not above 30 yet.
        let stats = Stats::default().with(StatKind::Energy, 25);
        let after = check(sick, &stats);
        assert!(after.is_sick);
        assert_eq!(after.sick_counter, 0);
    }

    #[test]
    fn recovers_when_all_vitals_above_threshold() {
        let sick = HealthState {
            is_sick: true,
            sick_counter: 3,
        };
        let after = check(sick, &Stats::uniform(31));
        assert_eq!(after, HealthState::default());
    }

    #[test]
    fn recovery_ignores_happiness() {
        let sick = HealthState {
            is_sick: true,
            sick_counter: 0,
        };
        let stats = Stats::uniform(40).with(StatKind::Happiness, 0);
        assert!(!check(sick, &stats).is_sick);
    }
}

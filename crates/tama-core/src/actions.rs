//! Per-action stat effects.
//!
//! Gains are scaled by the cooldown [`Efficiency`]; penalties never are.
//! Feed, Play and Clean use the sick gain while the pet is sick. Rest has
//! its own sick gain, except in a dirty environment where sleep is poor
//! and the poor-sleep gain applies regardless of sickness.
//!
//! | Action | Gain | Extra rule |
//! |--------|------|------------|
//! | Feed   | hunger      | hunger above the overfeed line costs happiness |
//! | Play   | happiness   | hungry and exhausted: no gain, lose happiness; dirty: lose happiness after the gain |
//! | Clean  | cleanliness | -- |
//! | Rest   | energy      | dirty: poor-sleep gain |

use tama_types::{ActionType, StatKind, Stats};

use crate::config::PolicyConfig;
use crate::effectiveness::Efficiency;
use crate::stats::{lower, raise};

/// Apply the effect of an accepted action to `stats`.
#[must_use]
pub fn apply_effect(
    stats: Stats,
    action: ActionType,
    efficiency: Efficiency,
    is_sick: bool,
    policy: &PolicyConfig,
) -> Stats {
    match action {
        ActionType::Feed => feed(stats, efficiency, is_sick, policy),
        ActionType::Play => play(stats, efficiency, is_sick, policy),
        ActionType::Clean => clean(stats, efficiency, is_sick, policy),
        ActionType::Rest => rest(stats, efficiency, is_sick, policy),
    }
}

fn feed(stats: Stats, efficiency: Efficiency, is_sick: bool, policy: &PolicyConfig) -> Stats {
    let effects = &policy.effects;
    let limits = &policy.limits;
    let gain = efficiency.scale(effects.base(is_sick));
    let fed = raise(stats, StatKind::Hunger, gain, limits);
    if fed.hunger > effects.overfeed_above {
        lower(fed, StatKind::Happiness, effects.penalty, limits)
    } else {
        fed
    }
}

fn play(stats: Stats, efficiency: Efficiency, is_sick: bool, policy: &PolicyConfig) -> Stats {
    let effects = &policy.effects;
    let limits = &policy.limits;
    if stats.hunger < effects.exhaustion_below && stats.energy < effects.exhaustion_below {
        return lower(stats, StatKind::Happiness, effects.penalty, limits);
    }

    let gain = efficiency.scale(effects.base(is_sick));
    let played = raise(stats, StatKind::Happiness, gain, limits);
    if played.cleanliness < effects.dirty_below {
        lower(played, StatKind::Happiness, effects.penalty, limits)
    } else {
        played
    }
}

fn clean(stats: Stats, efficiency: Efficiency, is_sick: bool, policy: &PolicyConfig) -> Stats {
    let gain = efficiency.scale(policy.effects.base(is_sick));
    raise(stats, StatKind::Cleanliness, gain, &policy.limits)
}

fn rest(stats: Stats, efficiency: Efficiency, is_sick: bool, policy: &PolicyConfig) -> Stats {
    let effects = &policy.effects;
    let base = if stats.cleanliness < effects.dirty_below {
        effects.poor_sleep_gain
    } else {
        effects.rest_base(is_sick)
    };
    raise(stats, StatKind::Energy, efficiency.scale(base), &policy.limits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full(stats: Stats, action: ActionType) -> Stats {
        apply_effect(stats, action, Efficiency::Full, false, &PolicyConfig::default())
    }

    #[test]
    fn feed_raises_hunger() {
        let after = full(Stats::default(), ActionType::Feed);
        assert_eq!(after.hunger, 60);
        assert_eq!(after.happiness, 50);
    }

    #[test]
    fn overfeeding_costs_happiness() {
        let stats = Stats::default().with(StatKind::Hunger, 85);
        let after = full(stats, ActionType::Feed);
        assert_eq!(after.hunger, 95);
        assert_eq!(after.happiness, 45);
    }

    #[test]
    fn feeding_to_exactly_ninety_is_fine() {
        let stats = Stats::default().with(StatKind::Hunger, 80);
        let after = full(stats, ActionType::Feed);
        assert_eq!(after.hunger, 90);
        assert_eq!(after.happiness, 50);
    }

    #[test]
    fn sick_feed_is_halved() {
        let after = apply_effect(
            Stats::default(),
            ActionType::Feed,
            Efficiency::Full,
            true,
            &PolicyConfig::default(),
        );
        assert_eq!(after.hunger, 55);
    }

    #[test]
    fn exhausted_play_loses_happiness_only() {
        let stats = Stats {
            happiness: 50,
            hunger: 10,
            cleanliness: 50,
            energy: 10,
        };
        let after = full(stats, ActionType::Play);
        assert_eq!(after.happiness, 45);
        assert_eq!(after.hunger, 10);
        assert_eq!(after.energy, 10);
    }

    #[test]
    fn hungry_but_rested_pet_still_plays() {
        let stats = Stats::default().with(StatKind::Hunger, 10);
        let after = full(stats, ActionType::Play);
        assert_eq!(after.happiness, 60);
    }

    #[test]
    fn dirty_play_gains_then_loses() {
        let stats = Stats::default().with(StatKind::Cleanliness, 15);
        let after = full(stats, ActionType::Play);
        assert_eq!(after.happiness, 55);
    }

    #[test]
    fn clean_raises_cleanliness() {
        let after = apply_effect(
            Stats::default(),
            ActionType::Clean,
            Efficiency::Reduced,
            false,
            &PolicyConfig::default(),
        );
        assert_eq!(after.cleanliness, 55);
    }

    #[test]
    fn rest_in_clean_room() {
        assert_eq!(full(Stats::default(), ActionType::Rest).energy, 70);
        let sick = apply_effect(
            Stats::default(),
            ActionType::Rest,
            Efficiency::Full,
            true,
            &PolicyConfig::default(),
        );
        assert_eq!(sick.energy, 60);
    }

    #[test]
    fn poor_sleep_ignores_sickness() {
        let stats = Stats::default().with(StatKind::Cleanliness, 15);
        for is_sick in [false, true] {
            let after = apply_effect(
                stats,
                ActionType::Rest,
                Efficiency::Full,
                is_sick,
                &PolicyConfig::default(),
            );
            assert_eq!(after.energy, 60);
        }
    }

    #[test]
    fn gains_clamp_at_max() {
        let after = full(Stats::uniform(98), ActionType::Rest);
        assert_eq!(after.energy, 100);
    }
}

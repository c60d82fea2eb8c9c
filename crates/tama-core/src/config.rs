//! Policy constants that parameterize the transition engine.
//!
//! Every tunable number the reducer reads lives here: stat bounds, decay
//! cadence, per-action cooldowns, the sickness thresholds, the anti-spam
//! window, and the magnitudes of each action's effect. The reducer receives
//! a [`PolicyConfig`] at construction and never hard-codes any of them.
//!
//! All structs deserialize with per-field defaults, so a configuration file
//! only needs to mention the values it overrides.

use serde::Deserialize;
use tama_types::{ActionType, StatKind, Stats, Timestamp};

use crate::error::PolicyError;

/// Complete policy for one pet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PolicyConfig {
    /// Stat bounds and the starting value.
    #[serde(default)]
    pub limits: StatLimits,

    /// Critical levels and sickness thresholds.
    #[serde(default)]
    pub critical: CriticalLevels,

    /// Per-stat decay cadence.
    #[serde(default)]
    pub decay: DecayConfig,

    /// Per-action cooldowns for full effectiveness.
    #[serde(default)]
    pub cooldowns: ActionCooldowns,

    /// Anti-spam detection.
    #[serde(default)]
    pub abuse: AbuseDetection,

    /// Magnitudes and conditions of each action's effect.
    #[serde(default)]
    pub effects: EffectConfig,
}

impl PolicyConfig {
    /// Check the policy for internally inconsistent values.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), PolicyError> {
        let limits = &self.limits;
        if limits.min > limits.max {
            return Err(PolicyError::invalid(format!(
                "limits.min ({}) exceeds limits.max ({})",
                limits.min, limits.max
            )));
        }
        if !limits.contains(limits.initial) {
            return Err(PolicyError::invalid(format!(
                "limits.initial ({}) lies outside [{}, {}]",
                limits.initial, limits.min, limits.max
            )));
        }

        for stat in StatKind::VITAL {
            let level = self.critical.level(stat).unwrap_or(limits.min);
            if !limits.contains(level) {
                return Err(PolicyError::invalid(format!(
                    "critical level for {stat} ({level}) lies outside the stat limits"
                )));
            }
        }
        if self.critical.sick_threshold == 0 {
            return Err(PolicyError::invalid(
                "critical.sick_threshold must be at least 1",
            ));
        }

        for stat in StatKind::ALL {
            if self.decay.rule(stat).interval_ms == 0 {
                return Err(PolicyError::invalid(format!(
                    "decay interval for {stat} must be at least 1ms"
                )));
            }
        }

        if self.abuse.threshold == 0 {
            return Err(PolicyError::invalid("abuse.threshold must be at least 1"));
        }
        if self.abuse.window_ms == 0 {
            return Err(PolicyError::invalid("abuse.window_ms must be at least 1ms"));
        }

        Ok(())
    }

    /// A fresh state with every stat at `limits.initial`.
    pub const fn initial_stats(&self) -> Stats {
        Stats::uniform(self.limits.initial)
    }
}

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Inclusive bounds every stat is clamped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StatLimits {
    /// Lowest value a stat can hold.
    #[serde(default = "default_min_stat")]
    pub min: u32,

    /// Highest value a stat can hold.
    #[serde(default = "default_max_stat")]
    pub max: u32,

    /// Value every stat starts at.
    #[serde(default = "default_initial_stat")]
    pub initial: u32,
}

impl StatLimits {
    /// Whether `value` lies within the bounds.
    pub const fn contains(&self, value: u32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp a signed intermediate result into the bounds.
    pub fn clamp(&self, value: i64) -> u32 {
        let clamped = value.clamp(i64::from(self.min), i64::from(self.max));
        u32::try_from(clamped).unwrap_or(self.max)
    }
}

impl Default for StatLimits {
    fn default() -> Self {
        Self {
            min: default_min_stat(),
            max: default_max_stat(),
            initial: default_initial_stat(),
        }
    }
}

// ---------------------------------------------------------------------------
// Sickness
// ---------------------------------------------------------------------------

/// Critical stat levels and the sickness latch thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CriticalLevels {
    /// Hunger at or below this is critical.
    #[serde(default = "default_critical_hunger")]
    pub hunger: u32,

    /// Energy at or below this is critical.
    #[serde(default = "default_critical_energy")]
    pub energy: u32,

    /// Cleanliness at or below this is critical.
    #[serde(default = "default_critical_cleanliness")]
    pub cleanliness: u32,

    /// Consecutive critical health checks before the pet falls sick.
    #[serde(default = "default_sick_threshold")]
    pub sick_threshold: u32,

    /// Hunger, energy and cleanliness must all be strictly above this for
    /// a sick pet to recover.
    #[serde(default = "default_recovery_threshold")]
    pub recovery_threshold: u32,
}

impl CriticalLevels {
    /// Critical level of a vital stat. Happiness has none.
    pub const fn level(&self, stat: StatKind) -> Option<u32> {
        match stat {
            StatKind::Hunger => Some(self.hunger),
            StatKind::Energy => Some(self.energy),
            StatKind::Cleanliness => Some(self.cleanliness),
            StatKind::Happiness => None,
        }
    }

    /// Whether `stat` is at or below its critical level in `stats`.
    pub const fn is_critical(&self, stats: &Stats, stat: StatKind) -> bool {
        match self.level(stat) {
            Some(level) => stats.get(stat) <= level,
            None => false,
        }
    }

    /// Whether any vital stat is critical.
    pub fn any_critical(&self, stats: &Stats) -> bool {
        StatKind::VITAL
            .into_iter()
            .any(|stat| self.is_critical(stats, stat))
    }

    /// Whether every vital stat is strictly above the recovery threshold.
    pub fn can_recover(&self, stats: &Stats) -> bool {
        StatKind::VITAL
            .into_iter()
            .all(|stat| stats.get(stat) > self.recovery_threshold)
    }
}

impl Default for CriticalLevels {
    fn default() -> Self {
        Self {
            hunger: default_critical_hunger(),
            energy: default_critical_energy(),
            cleanliness: default_critical_cleanliness(),
            sick_threshold: default_sick_threshold(),
            recovery_threshold: default_recovery_threshold(),
        }
    }
}

// ---------------------------------------------------------------------------
// Decay
// ---------------------------------------------------------------------------

/// How often one stat decays and by how much.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DecayRule {
    /// Milliseconds between two decay events for the stat.
    pub interval_ms: u64,
    /// Amount subtracted per decay event.
    pub amount: u32,
}

/// Decay cadence for each stat. Intervals differ, so each stat runs on its
/// own timer in the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DecayConfig {
    /// Happiness decay (default: 4 every 120s).
    #[serde(default = "default_happiness_decay")]
    pub happiness: DecayRule,

    /// Hunger decay (default: 6 every 90s).
    #[serde(default = "default_hunger_decay")]
    pub hunger: DecayRule,

    /// Cleanliness decay (default: 3 every 150s).
    #[serde(default = "default_cleanliness_decay")]
    pub cleanliness: DecayRule,

    /// Energy decay (default: 5 every 100s).
    #[serde(default = "default_energy_decay")]
    pub energy: DecayRule,
}

impl DecayConfig {
    /// Decay rule for one stat.
    pub const fn rule(&self, stat: StatKind) -> DecayRule {
        match stat {
            StatKind::Happiness => self.happiness,
            StatKind::Hunger => self.hunger,
            StatKind::Cleanliness => self.cleanliness,
            StatKind::Energy => self.energy,
        }
    }
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            happiness: default_happiness_decay(),
            hunger: default_hunger_decay(),
            cleanliness: default_cleanliness_decay(),
            energy: default_energy_decay(),
        }
    }
}

// ---------------------------------------------------------------------------
// Cooldowns and abuse
// ---------------------------------------------------------------------------

/// Minimum spacing in milliseconds between two uses of the same action for
/// the second one to be fully effective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ActionCooldowns {
    /// Feed cooldown (default: 30s).
    #[serde(default = "default_feed_cooldown")]
    pub feed: u64,

    /// Play cooldown (default: 45s).
    #[serde(default = "default_play_cooldown")]
    pub play: u64,

    /// Clean cooldown (default: 60s).
    #[serde(default = "default_clean_cooldown")]
    pub clean: u64,

    /// Rest cooldown (default: 90s).
    #[serde(default = "default_rest_cooldown")]
    pub rest: u64,
}

impl ActionCooldowns {
    /// Cooldown of one action in milliseconds.
    pub const fn cooldown(&self, action: ActionType) -> u64 {
        match action {
            ActionType::Feed => self.feed,
            ActionType::Play => self.play,
            ActionType::Clean => self.clean,
            ActionType::Rest => self.rest,
        }
    }
}

impl Default for ActionCooldowns {
    fn default() -> Self {
        Self {
            feed: default_feed_cooldown(),
            play: default_play_cooldown(),
            clean: default_clean_cooldown(),
            rest: default_rest_cooldown(),
        }
    }
}

/// Sliding-window spam detection.
///
/// Attempting an action when it already has `threshold` accepted uses
/// inside the last `window_ms` blocks it for `block_duration_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AbuseDetection {
    /// Accepted uses inside the window that trigger a block.
    #[serde(default = "default_abuse_threshold")]
    pub threshold: u32,

    /// Width of the sliding window in milliseconds.
    #[serde(default = "default_abuse_window")]
    pub window_ms: u64,

    /// How long a block lasts before the scheduler releases it.
    #[serde(default = "default_block_duration")]
    pub block_duration_ms: u64,
}

impl AbuseDetection {
    /// Whether a use at `entry` still counts at time `now`.
    pub const fn in_window(&self, entry: Timestamp, now: Timestamp) -> bool {
        now.saturating_sub(entry) < self.window_ms
    }
}

impl Default for AbuseDetection {
    fn default() -> Self {
        Self {
            threshold: default_abuse_threshold(),
            window_ms: default_abuse_window(),
            block_duration_ms: default_block_duration(),
        }
    }
}

// ---------------------------------------------------------------------------
// Action effects
// ---------------------------------------------------------------------------

/// Magnitudes and conditions used by the action effects.
///
/// Gains are the full-efficiency amounts; the reducer halves them when the
/// action is repeated inside its cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EffectConfig {
    /// Feed/Play/Clean gain for a healthy pet.
    #[serde(default = "default_base_gain")]
    pub base_gain: u32,

    /// Feed/Play/Clean gain for a sick pet.
    #[serde(default = "default_sick_base_gain")]
    pub sick_base_gain: u32,

    /// Rest gain for a healthy pet in a clean environment.
    #[serde(default = "default_rest_gain")]
    pub rest_gain: u32,

    /// Rest gain for a sick pet in a clean environment.
    #[serde(default = "default_sick_rest_gain")]
    pub sick_rest_gain: u32,

    /// Rest gain in a dirty environment, sick or not.
    #[serde(default = "default_poor_sleep_gain")]
    pub poor_sleep_gain: u32,

    /// Happiness lost to overfeeding, exhausted play, or dirty play.
    #[serde(default = "default_penalty")]
    pub penalty: u32,

    /// Hunger strictly above this after feeding costs happiness.
    #[serde(default = "default_overfeed_above")]
    pub overfeed_above: u32,

    /// Hunger and energy both strictly below this make the pet too
    /// exhausted to play.
    #[serde(default = "default_exhaustion_below")]
    pub exhaustion_below: u32,

    /// Cleanliness strictly below this spoils play and sleep.
    #[serde(default = "default_dirty_below")]
    pub dirty_below: u32,

    /// Cleanliness strictly below this makes the pet refuse to cooperate
    /// while being cleaned. Informational only.
    #[serde(default = "default_filthy_below")]
    pub filthy_below: u32,
}

impl EffectConfig {
    /// Feed/Play/Clean gain for the given sickness state.
    pub const fn base(&self, is_sick: bool) -> u32 {
        if is_sick {
            self.sick_base_gain
        } else {
            self.base_gain
        }
    }

    /// Rest gain in a clean environment for the given sickness state.
    pub const fn rest_base(&self, is_sick: bool) -> u32 {
        if is_sick {
            self.sick_rest_gain
        } else {
            self.rest_gain
        }
    }
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            base_gain: default_base_gain(),
            sick_base_gain: default_sick_base_gain(),
            rest_gain: default_rest_gain(),
            sick_rest_gain: default_sick_rest_gain(),
            poor_sleep_gain: default_poor_sleep_gain(),
            penalty: default_penalty(),
            overfeed_above: default_overfeed_above(),
            exhaustion_below: default_exhaustion_below(),
            dirty_below: default_dirty_below(),
            filthy_below: default_filthy_below(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_min_stat() -> u32 {
    0
}

const fn default_max_stat() -> u32 {
    100
}

const fn default_initial_stat() -> u32 {
    tama_types::DEFAULT_STAT_VALUE
}

const fn default_critical_hunger() -> u32 {
    10
}

const fn default_critical_energy() -> u32 {
    10
}

const fn default_critical_cleanliness() -> u32 {
    5
}

const fn default_sick_threshold() -> u32 {
    3
}

const fn default_recovery_threshold() -> u32 {
    30
}

const fn default_happiness_decay() -> DecayRule {
    DecayRule {
        interval_ms: 120_000,
        amount: 4,
    }
}

const fn default_hunger_decay() -> DecayRule {
    DecayRule {
        interval_ms: 90_000,
        amount: 6,
    }
}

const fn default_cleanliness_decay() -> DecayRule {
    DecayRule {
        interval_ms: 150_000,
        amount: 3,
    }
}

const fn default_energy_decay() -> DecayRule {
    DecayRule {
        interval_ms: 100_000,
        amount: 5,
    }
}

const fn default_feed_cooldown() -> u64 {
    30_000
}

const fn default_play_cooldown() -> u64 {
    45_000
}

const fn default_clean_cooldown() -> u64 {
    60_000
}

const fn default_rest_cooldown() -> u64 {
    90_000
}

const fn default_abuse_threshold() -> u32 {
    3
}

const fn default_abuse_window() -> u64 {
    10_000
}

const fn default_block_duration() -> u64 {
    15_000
}

const fn default_base_gain() -> u32 {
    10
}

const fn default_sick_base_gain() -> u32 {
    5
}

const fn default_rest_gain() -> u32 {
    20
}

const fn default_sick_rest_gain() -> u32 {
    10
}

const fn default_poor_sleep_gain() -> u32 {
    10
}

const fn default_penalty() -> u32 {
    5
}

const fn default_overfeed_above() -> u32 {
    90
}

const fn default_exhaustion_below() -> u32 {
    20
}

const fn default_dirty_below() -> u32 {
    20
}

const fn default_filthy_below() -> u32 {
    10
}

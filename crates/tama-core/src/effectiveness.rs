//! Cooldown-based effectiveness of repeated actions.
//!
//! Repeating an action before its cooldown has elapsed since the previous
//! accepted use still works, but only at half strength. The cooldown only
//! looks at the previous accepted use of the same action; it is independent
//! of the abuse window.

use tama_types::Timestamp;

/// Multiplier applied to an action's gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Efficiency {
    /// 1.0 -- the action was spaced out properly (or never used before).
    Full,
    /// 0.5 -- the action was repeated inside its cooldown.
    Reduced,
}

impl Efficiency {
    /// Apply the multiplier to a gain.
    ///
    /// Stats are integers, so the halved gain rounds up: a reduced gain of
    /// 5 becomes 3, never 2.
    pub const fn scale(self, amount: u32) -> u32 {
        match self {
            Self::Full => amount,
            Self::Reduced => amount.div_ceil(2),
        }
    }

    /// Multiplier as a percentage, for logs.
    pub const fn percent(self) -> u32 {
        match self {
            Self::Full => 100,
            Self::Reduced => 50,
        }
    }
}

/// Effectiveness of a use at `now` given the previous accepted use.
pub const fn efficiency(previous: Option<Timestamp>, now: Timestamp, cooldown_ms: u64) -> Efficiency {
    match previous {
        Some(last) if now.saturating_sub(last) < cooldown_ms => Efficiency::Reduced,
        _ => Efficiency::Full,
    }
}

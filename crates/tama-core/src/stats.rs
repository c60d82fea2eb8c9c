//! Clamped stat arithmetic.
//!
//! All stat changes go through [`adjust`], which works in `i64` and clamps
//! into the configured limits, so no sequence of events can push a stat out
//! of range or overflow.

use tama_types::{StatKind, Stats};

use crate::config::StatLimits;

/// Return `stats` with `delta` added to `stat`, clamped into `limits`.
#[must_use]
pub fn adjust(stats: Stats, stat: StatKind, delta: i64, limits: &StatLimits) -> Stats {
    let value = i64::from(stats.get(stat)).saturating_add(delta);
    stats.with(stat, limits.clamp(value))
}

/// Raise `stat` by `amount`.
#[must_use]
pub fn raise(stats: Stats, stat: StatKind, amount: u32, limits: &StatLimits) -> Stats {
    adjust(stats, stat, i64::from(amount), limits)
}

/// Lower `stat` by `amount`.
#[must_use]
pub fn lower(stats: Stats, stat: StatKind, amount: u32, limits: &StatLimits) -> Stats {
    adjust(stats, stat, i64::from(amount).saturating_neg(), limits)
}

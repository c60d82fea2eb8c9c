//! Sliding-window spam detection.

use tama_types::Timestamp;

use crate::config::AbuseDetection;

/// Entries of `history` that still fall inside the abuse window at `now`.
pub fn recent_uses(history: &[Timestamp], now: Timestamp, abuse: &AbuseDetection) -> Vec<Timestamp> {
    history
        .iter()
        .copied()
        .filter(|&entry| abuse.in_window(entry, now))
        .collect()
}

/// Whether an attempt at `now` should trip the block.
///
/// The attempt itself is not counted: the block trips when the window
/// already holds `threshold` accepted uses.
pub fn is_abusive(history: &[Timestamp], now: Timestamp, abuse: &AbuseDetection) -> bool {
    let recent = history
        .iter()
        .filter(|&&entry| abuse.in_window(entry, now))
        .count();
    recent >= usize::try_from(abuse.threshold).unwrap_or(usize::MAX)
}

/// History after accepting a use at `now`: the recent entries plus `now`.
pub fn record_use(history: &[Timestamp], now: Timestamp, abuse: &AbuseDetection) -> Vec<Timestamp> {
    let mut recent = recent_uses(history, now, abuse);
    recent.push(now);
    recent
}

//! Enumeration types for the Tama engine.
//!
//! Both enumerations are closed: the four care actions a user can take and
//! the four stats that describe the pet's condition.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// A care action the user can perform on the pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ActionType {
    /// Give the pet food. Raises hunger (satiety).
    Feed,
    /// Play with the pet. Raises happiness.
    Play,
    /// Wash the pet. Raises cleanliness.
    Clean,
    /// Put the pet to sleep. Raises energy.
    Rest,
}

impl ActionType {
    /// Every action, in declaration order.
    pub const ALL: [Self; 4] = [Self::Feed, Self::Play, Self::Clean, Self::Rest];

    /// Stable lowercase name, identical to the serialized form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Play => "play",
            Self::Clean => "clean",
            Self::Rest => "rest",
        }
    }

    /// The stat this action primarily restores.
    pub const fn primary_stat(self) -> StatKind {
        match self {
            Self::Feed => StatKind::Hunger,
            Self::Play => StatKind::Happiness,
            Self::Clean => StatKind::Cleanliness,
            Self::Rest => StatKind::Energy,
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// One of the four bounded stats of the pet.
///
/// Hunger is expressed as satiety: a high value means a well-fed pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum StatKind {
    /// Mood of the pet.
    Happiness,
    /// Satiety of the pet (low means starving).
    Hunger,
    /// Hygiene of the pet.
    Cleanliness,
    /// Rest level of the pet.
    Energy,
}

impl StatKind {
    /// Every stat, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Happiness,
        Self::Hunger,
        Self::Cleanliness,
        Self::Energy,
    ];

    /// The stats that feed the sickness check. Happiness never makes the
    /// pet sick.
    pub const VITAL: [Self; 3] = [Self::Hunger, Self::Energy, Self::Cleanliness];

    /// Stable lowercase name, identical to the serialized form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Happiness => "happiness",
            Self::Hunger => "hunger",
            Self::Cleanliness => "cleanliness",
            Self::Energy => "energy",
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_names_match_serde() {
        for action in ActionType::ALL {
            let json = serde_json::to_string(&action).unwrap_or_default();
            assert_eq!(json, format!("\"{}\"", action.as_str()));
        }
    }

    #[test]
    fn stat_names_match_serde() {
        for stat in StatKind::ALL {
            let json = serde_json::to_string(&stat).unwrap_or_default();
            assert_eq!(json, format!("\"{stat}\""));
        }
    }

    #[test]
    fn vital_stats_exclude_happiness() {
        assert!(!StatKind::VITAL.contains(&StatKind::Happiness));
        assert_eq!(StatKind::VITAL.len(), 3);
    }

    #[test]
    fn primary_stats() {
        assert_eq!(ActionType::Feed.primary_stat(), StatKind::Hunger);
        assert_eq!(ActionType::Play.primary_stat(), StatKind::Happiness);
        assert_eq!(ActionType::Clean.primary_stat(), StatKind::Cleanliness);
        assert_eq!(ActionType::Rest.primary_stat(), StatKind::Energy);
    }
}

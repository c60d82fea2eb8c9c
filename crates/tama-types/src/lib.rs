//! Shared type definitions for the Tama virtual pet engine.
//!
//! This crate is the single source of truth for the data that crosses the
//! boundary between the transition engine and its collaborators. Types flow
//! downstream to `TypeScript` via `ts-rs` for the presentation layer.
//!
//! # Modules
//!
//! - [`enums`] -- Care actions and stat kinds
//! - [`state`] -- [`TamaState`] root aggregate, [`Stats`], [`HealthState`]
//! - [`events`] -- [`Event`] inputs consumed by the reducer
//! - [`notice`] -- [`Notice`] facts for the presentation layer, [`StatBand`]

pub mod enums;
pub mod events;
pub mod notice;
pub mod state;

// Re-export all public types at crate root for convenience.
pub use enums::{ActionType, StatKind};
pub use events::Event;
pub use notice::{Notice, StatBand};
pub use state::{DEFAULT_STAT_VALUE, HealthState, Stats, TamaState, Timestamp};

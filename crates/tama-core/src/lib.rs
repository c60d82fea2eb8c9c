//! Policy model and pure transition engine for the Tama virtual pet.
//!
//! This crate holds everything that operates on pet state without touching
//! a clock or any I/O. It sits between `tama-types` (which defines the data
//! structures) and `tama-runtime` (which owns timers and the session).
//!
//! # Modules
//!
//! - [`abuse`] -- Sliding-window spam detection
//! - [`actions`] -- Per-action stat effects
//! - [`config`] -- Policy constants ([`PolicyConfig`])
//! - [`effectiveness`] -- Cooldown multiplier ([`Efficiency`])
//! - [`error`] -- Policy validation errors ([`PolicyError`])
//! - [`health`] -- Sickness latch
//! - [`notices`] -- User-visible facts derived from transitions
//! - [`reducer`] -- The transition engine ([`Reducer`], [`reduce`])
//! - [`stats`] -- Clamped stat arithmetic

pub mod abuse;
pub mod actions;
pub mod config;
pub mod effectiveness;
pub mod error;
pub mod health;
pub mod notices;
pub mod reducer;
pub mod stats;

// Re-export primary types at crate root for convenience.
pub use config::{
    AbuseDetection, ActionCooldowns, CriticalLevels, DecayConfig, DecayRule, EffectConfig,
    PolicyConfig, StatLimits,
};
pub use effectiveness::{Efficiency, efficiency};
pub use error::PolicyError;
pub use health::update_health;
pub use notices::{diff, preflight};
pub use reducer::{Attempt, Reducer, assess, attempt, reduce};

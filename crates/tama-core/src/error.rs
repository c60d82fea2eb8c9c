//! Error types for the tama-core crate.
//!
//! The reducer itself is infallible: unknown events are no-ops and every
//! arithmetic result is clamped. The only fallible operation in this crate
//! is policy validation.

/// Errors raised while checking a [`PolicyConfig`](crate::config::PolicyConfig).
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// The policy contains values that contradict each other.
    #[error("invalid policy: {reason}")]
    Invalid {
        /// Description of what is wrong.
        reason: String,
    },
}

impl PolicyError {
    /// Build an [`PolicyError::Invalid`] from any message.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid {
            reason: reason.into(),
        }
    }
}

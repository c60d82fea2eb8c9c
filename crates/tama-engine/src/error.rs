//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during startup and the session run.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: tama_runtime::ConfigError,
    },

    /// The session loop failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: tama_runtime::RunnerError,
    },

    /// Reading commands from stdin failed.
    #[error("input error: {source}")]
    Input {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The session task stopped before the engine asked it to.
    #[error("session task error: {message}")]
    Session {
        /// Description of the failure.
        message: String,
    },

    /// A snapshot could not be rendered.
    #[error("failed to render snapshot: {source}")]
    Render {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

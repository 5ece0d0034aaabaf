use thiserror::Error;

use crate::pipeline::PipelineStatus;
use crate::pipeline::status::ParseStatusError;

#[derive(Debug, Error)]
pub enum CarteraError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Update error: {0}")]
    Update(#[from] UpdateError),

    #[error("Status parse error: {0}")]
    Status(#[from] ParseStatusError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Failures of a single status-change attempt. Rejection and backend
/// unavailability both roll back the optimistic write; a re-entrant request
/// is refused before any write happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateError {
    #[error("Transition not allowed: from {from} to {to}")]
    TransitionRejected {
        from: PipelineStatus,
        to: PipelineStatus,
    },

    #[error("Backend unavailable, the change was rolled back")]
    BackendUnavailable,

    #[error("An update for associate {0} is already in flight")]
    AttemptInFlight(u64),
}

//! Confirmation step of the update protocol.
//!
//! The protocol talks to a [`ConfirmBackend`] so tests can supply a
//! deterministic implementation. [`SimulatedBackend`] is the production one:
//! it enforces the transition policy, waits a fixed latency and fails a
//! configurable fraction of attempts, standing in for a real persistence
//! layer.

use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;

use crate::config::CarteraConfig;
use crate::error::UpdateError;
use crate::pipeline::{self, PipelineStatus};

/// Confirms a single status change after the optimistic write has been
/// applied. `previous` is the status before that write.
pub trait ConfirmBackend {
    async fn confirm(
        &self,
        id: u64,
        previous: PipelineStatus,
        next: PipelineStatus,
    ) -> Result<(), UpdateError>;
}

/// Simulated persistence backend: policy check, fixed delay, random failure.
pub struct SimulatedBackend {
    delay: Duration,
    failure_rate: f64,
}

impl SimulatedBackend {
    pub fn new(delay: Duration, failure_rate: f64) -> Self {
        Self {
            delay,
            failure_rate,
        }
    }

    pub fn from_config(config: &CarteraConfig) -> Self {
        Self::new(
            Duration::from_millis(config.confirm_delay_ms),
            config.failure_rate,
        )
    }
}

impl ConfirmBackend for SimulatedBackend {
    async fn confirm(
        &self,
        id: u64,
        previous: PipelineStatus,
        next: PipelineStatus,
    ) -> Result<(), UpdateError> {
        eprintln!("[backend] asociado {id}: solicitando cambio de {previous} a {next}");

        // Policy is checked against the pre-optimistic status, before any
        // simulated latency.
        if !pipeline::transition_allowed(previous, next) {
            return Err(UpdateError::TransitionRejected {
                from: previous,
                to: next,
            });
        }

        sleep(self.delay).await;

        if self.failure_rate > 0.0 && rand::rng().random::<f64>() < self.failure_rate {
            return Err(UpdateError::BackendUnavailable);
        }
        Ok(())
    }
}

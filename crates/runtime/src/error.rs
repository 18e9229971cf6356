//! Errors surfaced by the preview service.
//!
//! Illegal attacks are not errors: they come back as records. These variants
//! cover malformed declarations and failures of the service machinery itself.
use thiserror::Error;

use tactics_core::AttackError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Attack(#[from] AttackError),

    #[error("failed to encode snapshot for digest")]
    Encode(#[source] bincode::Error),

    #[error("preview worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("preview concurrency limiter closed")]
    LimiterClosed,
}

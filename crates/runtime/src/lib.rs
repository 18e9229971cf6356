//! In-process attack preview runtime.
//!
//! [`PreviewService`] serves one published [`BattlefieldSnapshot`] at a time
//! and answers "what would this attack need?" for single declarations or
//! whole batches. Evaluation itself is delegated to `tactics-core`; this
//! crate adds snapshot publication, a digest-keyed record cache, concurrent
//! batch evaluation on the blocking pool, and logging.
//!
//! Modules are organized by responsibility:
//! - [`service`] hosts the preview service
//! - [`digest`] identifies snapshots by content
//! - [`config`] and [`error`] hold the service configuration and error types
//!
//! [`BattlefieldSnapshot`]: tactics_core::BattlefieldSnapshot
pub mod config;
pub mod digest;
pub mod error;
pub mod service;

pub use config::ServiceConfig;
pub use digest::SnapshotDigest;
pub use error::{Result, RuntimeError};
pub use service::{PreviewService, candidate_orders};

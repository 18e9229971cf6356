//! Data-driven battlefield content and loaders.
//!
//! This crate reads the files a preview session is built from:
//! - Rule options (data-driven via TOML)
//! - Scenarios: board, units, ECM and line-of-sight overrides (RON)
//! - Orders: attack declarations to evaluate against a scenario (RON)
//!
//! All loaders use tactics-core types directly with serde for RON/TOML
//! deserialization.

pub mod loaders;

pub use loaders::{ContentFactory, LoadResult, OptionsLoader, OrdersLoader, ScenarioLoader};

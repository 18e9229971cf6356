//! Common error infrastructure for tactics-core.
//!
//! This module provides shared types and traits used across all error types in tactics-core.
//! Domain-specific errors (e.g., `AttackError`, `OracleError`) are defined in their
//! respective modules alongside the code that raises them.
//!
//! Legality outcomes ("this attack is impossible") are never errors. They are
//! carried by [`crate::attack::TerminalStatus`]. Errors are reserved for contract
//! violations by the caller or a misconfigured environment.

use crate::state::{EntityId, HexCoord};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Validation**: Malformed input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: The engine cannot run at all (missing oracle)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: attacker not found, weapon index out of range
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: unit positioned on a hex outside the board
    Internal,

    /// Fatal error - environment misconfigured, cannot continue.
    ///
    /// Examples: missing required oracle
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information attached to errors for debugging and diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Unit that declared the attack (if applicable).
    pub attacker: Option<EntityId>,

    /// Hex where the error occurred (if applicable).
    pub position: Option<HexCoord>,

    /// Optional static message providing additional context.
    pub message: Option<&'static str>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            attacker: None,
            position: None,
            message: None,
        }
    }

    /// Attaches an attacker to this context (builder pattern).
    #[must_use]
    pub const fn with_attacker(mut self, attacker: EntityId) -> Self {
        self.attacker = Some(attacker);
        self
    }

    /// Attaches a position to this context (builder pattern).
    #[must_use]
    pub const fn with_position(mut self, position: HexCoord) -> Self {
        self.position = Some(position);
        self
    }

    /// Attaches a static message to this context (builder pattern).
    #[must_use]
    pub const fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }
}

/// Common trait for all tactics-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on who must fix the problem, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for error categorization, metrics, and testing.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_builder_sets_fields() {
        let context = ErrorContext::new()
            .with_attacker(EntityId(7))
            .with_position(HexCoord::new(3, 4))
            .with_message("weapon lookup");

        assert_eq!(context.attacker, Some(EntityId(7)));
        assert_eq!(context.position, Some(HexCoord::new(3, 4)));
        assert_eq!(context.message, Some("weapon lookup"));
    }

    #[test]
    fn fatal_and_internal_are_internal() {
        assert!(ErrorSeverity::Fatal.is_internal());
        assert!(ErrorSeverity::Internal.is_internal());
        assert!(!ErrorSeverity::Validation.is_internal());
    }
}

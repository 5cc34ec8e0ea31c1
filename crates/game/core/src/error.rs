//! Common error infrastructure for game-core.
//!
//! This module provides shared types and traits used across all error types in
//! game-core. Domain-specific errors (`ConfigError`, `MoveError`, `TurnError`)
//! are defined in their respective modules alongside the operations they
//! validate.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each concern has its own error type with specific variants
//! - **Severity Classification**: Errors are categorized for recovery strategies;
//!   the turn engine absorbs `Recoverable` errors and propagates the rest

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the command is rejected and state is unchanged.
    ///
    /// Examples: destination blocked, destination out of bounds
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: scripted placement on a wall
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: actor missing from the roster, actor without a faction.
    /// These indicate bugs and should be investigated.
    Internal,

    /// Fatal error - the session cannot start or continue.
    ///
    /// Examples: map too small, no floor to place actors on
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for structured logging and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

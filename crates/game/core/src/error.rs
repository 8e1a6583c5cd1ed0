//! Common error infrastructure for delve-core.
//!
//! Domain-specific errors (`MoveError`, `ToolError`, ...) are defined in their
//! respective modules alongside the actions they validate. Every one of them
//! is a rejected player action: none leaves the world half-mutated.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The caller may retry with a different target or after refreshing state.
    ///
    /// Examples: destination blocked, stale action key, incompatible tool
    Recoverable,

    /// Invalid input that should not be retried unchanged.
    ///
    /// Examples: unknown actor, unknown item
    Validation,

    /// Unexpected state inconsistency. These indicate bugs.
    ///
    /// Examples: inventory location desync after a move
    Internal,
}

impl ErrorSeverity {
    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all delve-core errors.
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
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

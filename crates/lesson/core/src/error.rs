//! Common error infrastructure for lesson-core.
//!
//! Domain-specific errors (`EngineError`, `OracleError`) are defined next to the
//! components that raise them. This module provides the shared classification
//! and context types.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each boundary has its own error type with specific variants
//! - **Rich Context**: Errors carry the turn number and result index they occurred at
//! - **No Retries**: Every operation is deterministic, so no error is retryable
//! - **Structural Clamping**: Clamped values are reported on updates (`actual` vs
//!   `max`), never as errors

/// Severity level of an error.
///
/// - **Validation**: The caller invoked a transition in the wrong lifecycle state
/// - **Internal**: The update log folded into an inconsistent lesson
/// - **Fatal**: Static data is missing or malformed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Precondition violation caused by caller misuse.
    ///
    /// Examples: playing a card before `start_turn`, acting after the lesson ended
    Validation,

    /// Unexpected state inconsistency.
    ///
    /// Examples: a hand entry that is missing from the card pool
    Internal,

    /// Data or configuration defect.
    ///
    /// Examples: a card definition id with no matching static definition
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

    /// Returns true if this error indicates a bug or a data defect.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information attached to errors for diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Turn number of the lesson when the error was raised.
    pub turn_number: u32,

    /// Result index the next update would have received.
    ///
    /// Identifies the exact position in the update log, which is enough to
    /// reproduce the failing state by folding the prefix.
    pub result_index: u32,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(turn_number: u32, result_index: u32) -> Self {
        Self {
            turn_number,
            result_index,
        }
    }
}

/// Common trait for all lesson-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity by who is at fault (caller, engine, data)
pub trait LessonError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

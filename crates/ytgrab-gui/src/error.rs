//! Semantic error types for GUI operations.
//!
//! These errors are domain-focused, not transport-focused. Adapters map
//! `GuiError` to whatever their shell expects (desktop dialog, HTTP
//! status, CLI exit code).

use std::fmt;

use ytgrab_core::command::CommandError;

/// Semantic errors for GUI backend operations.
///
/// Only synchronous rejections surface here. Once a run has been
/// accepted, its fate is reported through `DownloadEvent`s and the
/// console stream, never through this type.
#[derive(Debug, Clone)]
pub enum GuiError {
    /// Request validation failed (bad field value, empty URL).
    ValidationFailed(String),

    /// Operation conflicts with the single-run discipline: something is
    /// already occupying the pipeline slot.
    Conflict(String),

    /// The requested operation cannot work on this platform or in this
    /// environment (e.g. no prebuilt ffmpeg archive exists here).
    Unavailable(String),

    /// Unexpected internal error - should be refined over time.
    Internal(String),
}

impl fmt::Display for GuiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
            Self::Conflict(msg) => write!(f, "conflict: {msg}"),
            Self::Unavailable(msg) => write!(f, "unavailable: {msg}"),
            Self::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for GuiError {}

// ============================================================================
// Conversions from core errors
// ============================================================================

impl From<CommandError> for GuiError {
    fn from(err: CommandError) -> Self {
        Self::ValidationFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_maps_to_validation() {
        let err = GuiError::from(CommandError::EmptyUrl);
        assert!(matches!(err, GuiError::ValidationFailed(_)));
        assert_eq!(err.to_string(), "validation failed: no URL provided");
    }
}

//! Error types for external-tool management.
//!
//! One unified error type for detection and bootstrap operations, keeping
//! error plumbing out of the install orchestration.

use thiserror::Error;

/// Result alias for tool management operations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Errors that can occur while detecting or installing the external tools.
#[derive(Debug, Error)]
pub enum ToolError {
    // === Availability ===
    /// No prebuilt archive is published for this platform
    #[error("{tool} bootstrap not available: {reason}")]
    NotAvailable { tool: &'static str, reason: String },

    // === Downloader install ===
    /// No Python interpreter on the search path
    #[error("No Python interpreter found. Install Python, or install yt-dlp manually (pip install yt-dlp).")]
    PythonNotFound,

    /// The pip invocation ran but exited nonzero
    #[error("Installer exited with code {code}")]
    InstallFailed { code: i32 },

    /// The pip invocation could not run at all
    #[error("Installer could not run: {0}")]
    InstallErrored(String),

    // === Transcoder install ===
    /// Failed to download the release archive
    #[error("Download failed: {0}")]
    DownloadFailed(String),

    /// The fetched archive could not be read
    #[error("Failed to read archive: {0}")]
    ArchiveInvalid(String),

    /// The archive did not contain the binaries we stage
    #[error("Archive missing required binaries: {}", .missing.join(", "))]
    BinariesMissing { missing: Vec<String> },

    // === Path & IO ===
    /// Path resolution failed
    #[error("Path error: {0}")]
    PathError(#[from] ytgrab_core::paths::PathError),

    /// IO operation failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

//! Download lifecycle events for UI adapters.
//!
//! Events are emitted by the backend and consumed by the embedding shell
//! to keep its view of the download state synchronized. The shell should
//! treat these events as the sole source of truth for run lifecycle; the
//! console stream carries the raw tool output separately.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal outcome of one supervised external-process run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RunOutcome {
    /// The process exited with code 0.
    Succeeded,
    /// The process exited with a nonzero code.
    Failed {
        /// Exit code surfaced verbatim; -1 when the process terminated
        /// without one (e.g. by signal).
        #[serde(rename = "exitCode")]
        exit_code: i32,
    },
    /// The process could not be spawned or its output stream broke.
    Errored {
        /// Human-readable description of what went wrong.
        message: String,
    },
}

impl RunOutcome {
    /// Build the outcome for a process that exited with `code`.
    pub fn from_exit_code(code: i32) -> Self {
        if code == 0 {
            Self::Succeeded
        } else {
            Self::Failed { exit_code: code }
        }
    }

    /// Build an errored outcome from any displayable failure.
    pub fn errored(message: impl fmt::Display) -> Self {
        Self::Errored {
            message: message.to_string(),
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded => write!(f, "completed successfully"),
            Self::Failed { exit_code } => write!(f, "failed with exit code {exit_code}"),
            Self::Errored { message } => write!(f, "error: {message}"),
        }
    }
}

/// Phase of the facade's single download slot.
///
/// `Idle` before the first run; afterwards the slot holds either
/// `Running` or the last terminal outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum DownloadState {
    /// No run has been started yet.
    Idle,
    /// A run is active.
    Running,
    /// The last run exited cleanly.
    Succeeded,
    /// The last run exited with a nonzero code.
    Failed {
        #[serde(rename = "exitCode")]
        exit_code: i32,
    },
    /// The last run could not be executed.
    Errored { message: String },
}

impl From<RunOutcome> for DownloadState {
    fn from(outcome: RunOutcome) -> Self {
        match outcome {
            RunOutcome::Succeeded => Self::Succeeded,
            RunOutcome::Failed { exit_code } => Self::Failed { exit_code },
            RunOutcome::Errored { message } => Self::Errored { message },
        }
    }
}

/// Event payload for the embedding UI.
///
/// Serialized with a `type` tag for adapter compatibility:
///
/// ```json
/// { "type": "finished", "outcome": { "status": "failed", "exitCode": 1 } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DownloadEvent {
    /// A download run has been accepted and spawned.
    Started {
        /// The rendered command line, as echoed to the console.
        command: String,
    },
    /// The active download reached a terminal outcome.
    Finished { outcome: RunOutcome },
    /// A tool bootstrap has begun.
    ToolInstallStarted { tool: String },
    /// A tool bootstrap finished.
    ToolInstallFinished { tool: String, ok: bool },
}

impl DownloadEvent {
    /// Create a started event carrying the rendered command line.
    pub fn started(command: impl Into<String>) -> Self {
        Self::Started {
            command: command.into(),
        }
    }

    /// Create a finished event for a terminal outcome.
    pub fn finished(outcome: RunOutcome) -> Self {
        Self::Finished { outcome }
    }

    /// Create a tool-install started event.
    pub fn tool_install_started(tool: impl Into<String>) -> Self {
        Self::ToolInstallStarted { tool: tool.into() }
    }

    /// Create a tool-install finished event.
    pub fn tool_install_finished(tool: impl Into<String>, ok: bool) -> Self {
        Self::ToolInstallFinished {
            tool: tool.into(),
            ok,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_exit_code() {
        assert_eq!(RunOutcome::from_exit_code(0), RunOutcome::Succeeded);
        assert_eq!(
            RunOutcome::from_exit_code(2),
            RunOutcome::Failed { exit_code: 2 }
        );
    }

    #[test]
    fn test_started_event_serialization() {
        let event = DownloadEvent::started("yt-dlp -f best url");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"started\""));
        assert!(json.contains("\"command\":\"yt-dlp -f best url\""));
    }

    #[test]
    fn test_finished_event_serialization() {
        let event = DownloadEvent::finished(RunOutcome::Failed { exit_code: 1 });
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"finished\""));
        assert!(json.contains("\"status\":\"failed\""));
        assert!(json.contains("\"exitCode\":1"));
    }

    #[test]
    fn test_tool_install_event_serialization() {
        let event = DownloadEvent::tool_install_finished("ffmpeg", true);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"toolInstallFinished\""));
        assert!(json.contains("\"tool\":\"ffmpeg\""));
        assert!(json.contains("\"ok\":true"));
    }

    #[test]
    fn test_state_from_outcome() {
        assert_eq!(
            DownloadState::from(RunOutcome::Succeeded),
            DownloadState::Succeeded
        );
        assert_eq!(
            DownloadState::from(RunOutcome::errored("spawn failed")),
            DownloadState::Errored {
                message: "spawn failed".to_string()
            }
        );
    }

    #[test]
    fn test_outcome_display_for_status_line() {
        assert_eq!(RunOutcome::Succeeded.to_string(), "completed successfully");
        assert_eq!(
            RunOutcome::Failed { exit_code: 101 }.to_string(),
            "failed with exit code 101"
        );
    }
}

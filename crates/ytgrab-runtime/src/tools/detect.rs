//! Presence probes for the external tools.
//!
//! Version probes run the tool with its version flag and capture the
//! first output line. Staged-copy detection is a filesystem existence
//! check only; compile-time resolution must stay cheap because it runs
//! once per download.

use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;
use ytgrab_core::command::{DEFAULT_DOWNLOADER, ToolLocations};
use ytgrab_core::paths;

/// Probe result for one external tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolStatus {
    /// Tool name as invoked.
    pub name: String,
    /// Reported version, `None` when the tool could not be run.
    pub version: Option<String>,
    /// Whether a staged copy exists in the application-data directory.
    pub staged: bool,
}

/// Run `program flag` and return the first trimmed stdout line.
fn capture_first_line(program: impl AsRef<OsStr>, flag: &str) -> Option<String> {
    let output = Command::new(program).arg(flag).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout);
    text.lines()
        .next()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
}

/// Version of the download tool, when it is on the search path.
///
/// yt-dlp prints its version as the whole first line.
pub fn downloader_version() -> Option<String> {
    capture_first_line(DEFAULT_DOWNLOADER, "--version")
}

/// Version of the transcoding tool, preferring a staged copy.
///
/// ffmpeg's first line reads `ffmpeg version X ...`; the version token is
/// extracted when the line has that shape.
pub fn ffmpeg_version() -> Option<String> {
    let line = match staged_ffmpeg_binary() {
        Some(binary) => capture_first_line(&binary, "-version"),
        None => capture_first_line("ffmpeg", "-version"),
    }?;

    let mut words = line.split_whitespace();
    match (words.next(), words.next(), words.next()) {
        (Some("ffmpeg"), Some("version"), Some(version)) => Some(version.to_string()),
        _ => Some(line),
    }
}

/// Path of the staged ffmpeg binary, when one exists.
pub fn staged_ffmpeg_binary() -> Option<PathBuf> {
    let path = paths::ffmpeg_binary_path().ok()?;
    path.exists().then_some(path)
}

/// Directory of the staged ffmpeg build, when one exists.
pub fn staged_ffmpeg_dir() -> Option<PathBuf> {
    staged_ffmpeg_binary().and_then(|binary| binary.parent().map(Path::to_path_buf))
}

/// Resolve tool locations for one compile.
///
/// Existence check only, no capability probe: a staged ffmpeg directory
/// is attached when present so the compiler can emit the location
/// override flag.
pub fn resolve_tool_locations() -> ToolLocations {
    let ffmpeg_dir = staged_ffmpeg_dir();
    debug!(staged = ffmpeg_dir.is_some(), "resolved tool locations");
    ToolLocations {
        downloader: DEFAULT_DOWNLOADER.to_string(),
        ffmpeg_dir,
    }
}

/// Probe the download tool.
pub fn downloader_status() -> ToolStatus {
    ToolStatus {
        name: DEFAULT_DOWNLOADER.to_string(),
        version: downloader_version(),
        staged: false,
    }
}

/// Probe the transcoding tool.
pub fn ffmpeg_status() -> ToolStatus {
    ToolStatus {
        name: "ffmpeg".to_string(),
        version: ffmpeg_version(),
        staged: staged_ffmpeg_binary().is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_returns_none_for_missing_program() {
        assert_eq!(
            capture_first_line("ytgrab-test-no-such-binary-4417", "--version"),
            None
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_capture_returns_first_line() {
        assert_eq!(
            capture_first_line("echo", "hello"),
            Some("hello".to_string())
        );
    }

    #[test]
    fn test_status_serialization_is_camel_case() {
        let status = ToolStatus {
            name: "ffmpeg".to_string(),
            version: Some("7.1".to_string()),
            staged: true,
        };
        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"name\":\"ffmpeg\""));
        assert!(json.contains("\"version\":\"7.1\""));
        assert!(json.contains("\"staged\":true"));
    }
}

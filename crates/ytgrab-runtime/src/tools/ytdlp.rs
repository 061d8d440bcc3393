//! First-run bootstrap of the download tool.
//!
//! Installs yt-dlp with pip, streaming the installer's output through the
//! same supervisor the downloads use. The interpreter is located on the
//! search path; a missing interpreter is the user's cue to install the
//! tool manually.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;
use which::which;
use ytgrab_core::ports::ConsoleSinkPort;
use ytgrab_core::{CommandLine, RunOutcome};

use super::error::{ToolError, ToolResult};
use crate::process::run_to_completion;

/// Locate a Python interpreter for pip.
fn python_interpreter() -> Option<PathBuf> {
    which("python3").or_else(|_| which("python")).ok()
}

/// Build the pip invocation used to install the downloader.
fn pip_install_command(python: &Path) -> CommandLine {
    let mut command = CommandLine::new(python.to_string_lossy().into_owned());
    command.arg("-m").arg("pip").arg("install").arg("yt-dlp");
    command
}

/// Install the download tool with pip, streaming installer output into
/// `sink`.
pub async fn install_downloader(sink: Arc<dyn ConsoleSinkPort>) -> ToolResult<()> {
    let python = python_interpreter().ok_or(ToolError::PythonNotFound)?;
    let command = pip_install_command(&python);

    info!(python = %python.display(), "installing yt-dlp via pip");
    sink.append("Installing yt-dlp...".to_string());
    sink.append(format!("Executing: {command}"));

    match run_to_completion(&command, sink.clone()).await {
        RunOutcome::Succeeded => {
            sink.append("yt-dlp installed successfully.".to_string());
            Ok(())
        }
        RunOutcome::Failed { exit_code } => Err(ToolError::InstallFailed { code: exit_code }),
        RunOutcome::Errored { message } => Err(ToolError::InstallErrored(message)),
    }
}

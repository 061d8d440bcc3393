//! Download command handler.
//!
//! Runs one download in the foreground, streaming the tool's output to
//! stdout and mapping the outcome to the process exit status.

use std::sync::Arc;

use anyhow::{bail, Result};
use tracing::debug;

use ytgrab_core::command::build_download_command;
use ytgrab_core::events::RunOutcome;
use ytgrab_core::ports::ConsoleSinkPort;
use ytgrab_runtime::process::run_to_completion;
use ytgrab_runtime::tools::resolve_tool_locations;

use super::StdoutSink;
use crate::commands::DownloadArgs;

/// Execute the download command.
pub async fn execute(args: DownloadArgs) -> Result<()> {
    let options = args.into_options()?;
    let tools = resolve_tool_locations();
    let command = build_download_command(&options, &tools)?;
    debug!(%command, "compiled download command");

    println!("Executing: {command}");
    let sink: Arc<dyn ConsoleSinkPort> = Arc::new(StdoutSink);
    let outcome = run_to_completion(&command, sink).await;

    match outcome {
        RunOutcome::Succeeded => {
            println!("Download completed successfully.");
            Ok(())
        }
        RunOutcome::Failed { exit_code } => bail!("download failed with exit code {exit_code}"),
        RunOutcome::Errored { message } => bail!("could not run the downloader: {message}"),
    }
}

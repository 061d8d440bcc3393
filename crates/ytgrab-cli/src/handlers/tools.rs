//! Tool management handlers: status report and bootstrap installers.

use std::sync::Arc;

use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};

use ytgrab_core::ports::{ConsoleSinkPort, NoopEmitter};
use ytgrab_gui::{BootstrapAvailability, GuiBackend, GuiDeps, ToolStatus};

use super::StdoutSink;

/// Execute `tools status`.
pub async fn status(json: bool) -> Result<()> {
    let backend = GuiBackend::new(GuiDeps::new(Arc::new(NoopEmitter::new())));
    let report = backend.tools_report().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_tool(&report.downloader);
    print_tool(&report.ffmpeg);

    if report.ffmpeg.version.is_none() {
        match backend.ffmpeg_bootstrap_availability() {
            BootstrapAvailability::Available { .. } => {
                println!("Run `ytgrab tools install-ffmpeg` to stage a copy.");
            }
            BootstrapAvailability::NotAvailable { reason } => {
                println!("Note: {reason}.");
            }
        }
    }

    Ok(())
}

fn print_tool(status: &ToolStatus) {
    match &status.version {
        Some(version) => {
            let staged = if status.staged { " (staged)" } else { "" };
            println!("{:<8} {version}{staged}", status.name);
        }
        None => println!("{:<8} not found", status.name),
    }
}

/// Execute `tools install-ytdlp`.
pub async fn install_ytdlp() -> Result<()> {
    let sink: Arc<dyn ConsoleSinkPort> = Arc::new(StdoutSink);
    ytgrab_runtime::tools::install_downloader(sink).await?;
    Ok(())
}

/// Execute `tools install-ffmpeg`.
///
/// Shows a byte progress bar during the archive fetch; milestone lines
/// from the installer are printed above the bar.
pub async fn install_ffmpeg() -> Result<()> {
    if let BootstrapAvailability::NotAvailable { reason } =
        ytgrab_runtime::tools::check_bootstrap_availability()
    {
        bail!("cannot install ffmpeg here: {reason}");
    }

    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})")
            .unwrap()
            .progress_chars("█▓░"),
    );

    let sink: Arc<dyn ConsoleSinkPort> = Arc::new(BarSink(bar.clone()));
    let progress = |downloaded: u64, total: u64| {
        if total > 0 {
            bar.set_length(total);
        }
        bar.set_position(downloaded);
    };

    // Staged paths and the success line arrive through the sink
    let result = ytgrab_runtime::tools::install_ffmpeg(sink, Some(&progress)).await;
    bar.finish_and_clear();
    result?;
    Ok(())
}

/// Console sink that prints above an active progress bar.
struct BarSink(ProgressBar);

impl ConsoleSinkPort for BarSink {
    fn append(&self, line: String) {
        self.0.println(line);
    }
}

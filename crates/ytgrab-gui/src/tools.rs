//! Tool probe and bootstrap operations for the GUI backend.

use std::sync::Arc;

use tracing::warn;

use ytgrab_core::events::DownloadEvent;
use ytgrab_core::ports::ConsoleSinkPort;
use ytgrab_runtime::tools::{
    check_bootstrap_availability, downloader_status, ffmpeg_status, install_downloader,
    install_ffmpeg, BootstrapAvailability,
};

use crate::deps::GuiDeps;
use crate::downloads::RunSlot;
use crate::error::GuiError;
use crate::types::ToolsReport;

/// Tool management operations handler.
///
/// Installs occupy the same run slot as downloads, so a bootstrap can
/// never race the pipeline for the console or the staging directory.
pub struct ToolOps<'a> {
    deps: &'a GuiDeps,
    slot: &'a Arc<RunSlot>,
}

impl<'a> ToolOps<'a> {
    pub(crate) fn new(deps: &'a GuiDeps, slot: &'a Arc<RunSlot>) -> Self {
        Self { deps, slot }
    }

    /// Probe both external tools.
    ///
    /// Version probes spawn a subprocess each, so they run off the async
    /// threads.
    pub async fn report(&self) -> Result<ToolsReport, GuiError> {
        let downloader = tokio::task::spawn_blocking(downloader_status);
        let ffmpeg = tokio::task::spawn_blocking(ffmpeg_status);

        Ok(ToolsReport {
            downloader: downloader
                .await
                .map_err(|e| GuiError::Internal(e.to_string()))?,
            ffmpeg: ffmpeg.await.map_err(|e| GuiError::Internal(e.to_string()))?,
        })
    }

    /// Whether the fixed-URL ffmpeg bootstrap can run on this platform.
    pub fn ffmpeg_bootstrap_availability(&self) -> BootstrapAvailability {
        check_bootstrap_availability()
    }

    /// Install the downloader through pip, streaming into the console.
    pub async fn install_downloader(&self) -> Result<(), GuiError> {
        if !self.slot.try_acquire() {
            return Err(GuiError::Conflict(
                "a download or install is already running".to_string(),
            ));
        }

        self.deps
            .emitter
            .emit(DownloadEvent::tool_install_started("yt-dlp"));

        let console = Arc::clone(&self.deps.console);
        let emitter = Arc::clone(&self.deps.emitter);
        let slot = Arc::clone(self.slot);
        let handle = tokio::spawn(async move {
            let sink: Arc<dyn ConsoleSinkPort> = console.clone();
            let result = install_downloader(sink).await;
            let ok = result.is_ok();
            if let Err(error) = result {
                warn!(%error, "yt-dlp install failed");
                console.add_line(&format!("yt-dlp install failed: {error}"));
            }
            emitter.emit(DownloadEvent::tool_install_finished("yt-dlp", ok));
            slot.release();
        });
        self.slot.track(handle);

        Ok(())
    }

    /// Fetch and stage ffmpeg from the fixed release archive.
    ///
    /// Availability is checked before the slot is claimed, so platforms
    /// without a prebuilt archive get a synchronous `Unavailable` and
    /// nothing else happens.
    pub async fn install_ffmpeg(&self) -> Result<(), GuiError> {
        if let BootstrapAvailability::NotAvailable { reason } = check_bootstrap_availability() {
            return Err(GuiError::Unavailable(reason));
        }

        if !self.slot.try_acquire() {
            return Err(GuiError::Conflict(
                "a download or install is already running".to_string(),
            ));
        }

        self.deps
            .emitter
            .emit(DownloadEvent::tool_install_started("ffmpeg"));

        let console = Arc::clone(&self.deps.console);
        let emitter = Arc::clone(&self.deps.emitter);
        let slot = Arc::clone(self.slot);
        let handle = tokio::spawn(async move {
            let sink: Arc<dyn ConsoleSinkPort> = console.clone();
            let result = install_ffmpeg(sink, None).await;
            let ok = result.is_ok();
            if let Err(error) = result {
                warn!(%error, "ffmpeg install failed");
                console.add_line(&format!("ffmpeg install failed: {error}"));
            }
            emitter.emit(DownloadEvent::tool_install_finished("ffmpeg", ok));
            slot.release();
        });
        self.slot.track(handle);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ytgrab_core::ports::NoopEmitter;
    use ytgrab_runtime::process::ConsoleLog;

    fn isolated() -> (GuiDeps, Arc<RunSlot>) {
        let deps = GuiDeps::with_console(Arc::new(NoopEmitter::new()), Arc::new(ConsoleLog::new()));
        (deps, Arc::new(RunSlot::new()))
    }

    #[test]
    fn test_install_conflicts_while_slot_held() {
        let (deps, slot) = isolated();
        assert!(slot.try_acquire());

        let ops = ToolOps::new(&deps, &slot);
        let result = tokio_test::block_on(ops.install_downloader());
        assert!(matches!(result, Err(GuiError::Conflict(_))));
        assert!(slot.is_busy(), "conflicting install must not release the holder");
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn test_ffmpeg_install_unavailable_off_windows() {
        let (deps, slot) = isolated();
        let ops = ToolOps::new(&deps, &slot);

        let result = tokio_test::block_on(ops.install_ffmpeg());
        assert!(matches!(result, Err(GuiError::Unavailable(_))));
        assert!(!slot.is_busy(), "unavailable bootstrap must not claim the slot");
    }
}

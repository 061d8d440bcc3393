//! GuiBackend - the unified GUI orchestration facade.
//!
//! This is the main entry point for all GUI operations. Desktop shells
//! and the CLI's interactive paths delegate here instead of touching
//! the supervisor directly.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::warn;

use ytgrab_core::events::DownloadState;
use ytgrab_runtime::process::ConsoleEntry;
use ytgrab_runtime::tools::BootstrapAvailability;

use crate::deps::GuiDeps;
use crate::downloads::{DownloadOps, RunSlot};
use crate::error::GuiError;
use crate::tools::ToolOps;
use crate::types::{DownloadRequest, ToolsReport};

/// Unified GUI backend facade.
///
/// Owns the single run slot, so at most one download or install is in
/// flight per backend regardless of how many adapter calls race.
///
/// # Construction
///
/// ```ignore
/// let deps = GuiDeps::new(emitter);
/// let backend = GuiBackend::new(deps);
/// ```
pub struct GuiBackend {
    deps: GuiDeps,
    slot: Arc<RunSlot>,
}

impl GuiBackend {
    /// Create a new GUI backend with the provided dependencies.
    pub fn new(deps: GuiDeps) -> Self {
        Self {
            deps,
            slot: Arc::new(RunSlot::new()),
        }
    }

    // Accessors for ops modules - created on demand
    fn download_ops(&self) -> DownloadOps<'_> {
        DownloadOps::new(&self.deps, &self.slot)
    }

    fn tool_ops(&self) -> ToolOps<'_> {
        ToolOps::new(&self.deps, &self.slot)
    }

    // =========================================================================
    // Download operations
    // =========================================================================

    /// Start one download run from a front-end request.
    pub async fn start_download(&self, request: DownloadRequest) -> Result<(), GuiError> {
        self.download_ops().start(request).await
    }

    /// The current phase of the download slot.
    pub fn download_state(&self) -> DownloadState {
        self.slot.state()
    }

    /// Whether a download or install currently holds the slot.
    pub fn is_busy(&self) -> bool {
        self.slot.is_busy()
    }

    // =========================================================================
    // Console operations
    // =========================================================================

    /// All retained console lines, oldest first.
    pub fn console_snapshot(&self) -> Vec<ConsoleEntry> {
        self.deps.console.snapshot()
    }

    /// Subscribe to console lines as they arrive.
    pub fn subscribe_console(&self) -> broadcast::Receiver<ConsoleEntry> {
        self.deps.console.subscribe()
    }

    /// Drop all retained console lines.
    pub fn clear_console(&self) {
        self.deps.console.clear();
    }

    // =========================================================================
    // Tool operations
    // =========================================================================

    /// Probe both external tools.
    pub async fn tools_report(&self) -> Result<ToolsReport, GuiError> {
        self.tool_ops().report().await
    }

    /// Whether the ffmpeg bootstrap can run on this platform.
    pub fn ffmpeg_bootstrap_availability(&self) -> BootstrapAvailability {
        self.tool_ops().ffmpeg_bootstrap_availability()
    }

    /// Install the downloader through pip.
    pub async fn install_downloader(&self) -> Result<(), GuiError> {
        self.tool_ops().install_downloader().await
    }

    /// Fetch and stage ffmpeg from the fixed release archive.
    pub async fn install_ffmpeg(&self) -> Result<(), GuiError> {
        self.tool_ops().install_ffmpeg().await
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Release backend-held resources on shell shutdown.
    ///
    /// An in-flight run is abandoned, not killed: the worker task is
    /// detached and the child process stays with the OS. This matches
    /// the desktop-shell behavior of closing the window mid-download.
    pub fn shutdown(&self) {
        if let Some(worker) = self.slot.take_worker() {
            if self.slot.is_busy() {
                warn!("shutting down with a run in flight; abandoning it");
            }
            drop(worker);
        }
    }
}

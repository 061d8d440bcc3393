//! Download operations and the single pipeline slot.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;
use tracing::info;

use ytgrab_core::command::build_download_command;
use ytgrab_core::events::{DownloadEvent, DownloadState, RunOutcome};
use ytgrab_core::ports::ConsoleSinkPort;
use ytgrab_runtime::process::run_to_completion;

use crate::deps::GuiDeps;
use crate::error::GuiError;
use crate::types::DownloadRequest;

/// The single run slot shared by downloads and tool installs.
///
/// Whoever wins `try_acquire` owns the pipeline until their worker
/// releases it. The slot also remembers the last observed state and the
/// worker handle, which shutdown abandons rather than awaits.
pub(crate) struct RunSlot {
    busy: AtomicBool,
    state: Mutex<DownloadState>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl RunSlot {
    pub(crate) fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
            state: Mutex::new(DownloadState::Idle),
            worker: Mutex::new(None),
        }
    }

    /// Claim the slot. Returns false when something already holds it.
    pub(crate) fn try_acquire(&self) -> bool {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub(crate) fn release(&self) {
        self.busy.store(false, Ordering::Release);
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub(crate) fn set_state(&self, state: DownloadState) {
        *self.state.lock().unwrap() = state;
    }

    pub(crate) fn state(&self) -> DownloadState {
        self.state.lock().unwrap().clone()
    }

    pub(crate) fn track(&self, handle: JoinHandle<()>) {
        *self.worker.lock().unwrap() = Some(handle);
    }

    pub(crate) fn take_worker(&self) -> Option<JoinHandle<()>> {
        self.worker.lock().unwrap().take()
    }
}

/// Download pipeline operations handler.
pub struct DownloadOps<'a> {
    deps: &'a GuiDeps,
    slot: &'a Arc<RunSlot>,
}

impl<'a> DownloadOps<'a> {
    pub(crate) fn new(deps: &'a GuiDeps, slot: &'a Arc<RunSlot>) -> Self {
        Self { deps, slot }
    }

    /// Validate, compile, and spawn one download run.
    ///
    /// Returns as soon as the supervisor worker is spawned; completion
    /// is reported through a `Finished` event and the console stream.
    pub async fn start(&self, request: DownloadRequest) -> Result<(), GuiError> {
        // Compilation is pure, so all validation happens before the slot
        // is claimed; a rejected request never blocks anyone.
        let options = request.into_options()?;
        let tools = self.deps.tool_locations();
        let command = build_download_command(&options, &tools)?;

        if !self.slot.try_acquire() {
            return Err(GuiError::Conflict(
                "a download or install is already running".to_string(),
            ));
        }

        let console = Arc::clone(&self.deps.console);
        console.clear();
        console.add_line(&format!("Executing: {command}"));

        self.slot.set_state(DownloadState::Running);
        self.deps
            .emitter
            .emit(DownloadEvent::started(command.to_string()));
        info!(command = %command, "download run accepted");

        let emitter = Arc::clone(&self.deps.emitter);
        let slot = Arc::clone(self.slot);
        let handle = tokio::spawn(async move {
            let sink: Arc<dyn ConsoleSinkPort> = console.clone();
            let outcome = run_to_completion(&command, sink).await;

            console.add_line(&status_line(&outcome));
            slot.set_state(DownloadState::from(outcome.clone()));
            emitter.emit(DownloadEvent::finished(outcome));
            slot.release();
        });
        self.slot.track(handle);

        Ok(())
    }
}

/// Final console line for a terminal outcome.
fn status_line(outcome: &RunOutcome) -> String {
    match outcome {
        RunOutcome::Succeeded => "Download completed successfully.".to_string(),
        RunOutcome::Failed { exit_code } => {
            format!("Download failed with exit code {exit_code}.")
        }
        RunOutcome::Errored { message } => format!("Download error: {message}"),
    }
}

//! Dependency injection for GuiBackend.
//!
//! Dependencies are injected as trait objects where adapters differ
//! (event transport) and shared concretes where they do not (the
//! process-wide console).

use std::sync::Arc;

use ytgrab_core::command::ToolLocations;
use ytgrab_core::ports::EventEmitter;
use ytgrab_runtime::process::{console, ConsoleLog};
use ytgrab_runtime::tools::resolve_tool_locations;

/// Dependencies required to construct a `GuiBackend`.
///
/// Fields are private to enforce construction via the constructors,
/// which prevents partial injection.
pub struct GuiDeps {
    /// Event emitter for download lifecycle events.
    pub(crate) emitter: Arc<dyn EventEmitter>,
    /// Console the supervisor streams into and shells read from.
    pub(crate) console: Arc<ConsoleLog>,
    /// Fixed tool locations; `None` re-resolves per run.
    pub(crate) locations: Option<ToolLocations>,
}

impl GuiDeps {
    /// Create deps wired to the process-wide console.
    ///
    /// This is the constructor adapters use; the console is shared so
    /// every shell observes the same stream.
    pub fn new(emitter: Arc<dyn EventEmitter>) -> Self {
        Self {
            emitter,
            console: console(),
            locations: None,
        }
    }

    /// Create deps with an explicit console instance.
    ///
    /// Tests use this to avoid sharing the global console across cases.
    pub fn with_console(emitter: Arc<dyn EventEmitter>, console: Arc<ConsoleLog>) -> Self {
        Self {
            emitter,
            console,
            locations: None,
        }
    }

    /// Pin tool locations instead of re-resolving them per run.
    ///
    /// Embedders use this to force a specific downloader binary; tests
    /// use it to substitute fixtures.
    pub fn override_tool_locations(mut self, locations: ToolLocations) -> Self {
        self.locations = Some(locations);
        self
    }

    /// Tool locations for the next run.
    ///
    /// Re-resolved on every call unless pinned, so a bootstrap that
    /// staged ffmpeg mid-session is picked up by the next download.
    pub(crate) fn tool_locations(&self) -> ToolLocations {
        self.locations
            .clone()
            .unwrap_or_else(resolve_tool_locations)
    }

    /// Access the event emitter.
    pub fn emitter(&self) -> &Arc<dyn EventEmitter> {
        &self.emitter
    }

    /// Access the console.
    pub fn console(&self) -> &Arc<ConsoleLog> {
        &self.console
    }
}

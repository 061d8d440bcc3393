//! Shared GUI backend facade for ytgrab adapters.
//!
//! This crate provides `GuiBackend`, a shell-agnostic orchestration layer
//! that desktop adapters and the CLI delegate to. It ensures every shell
//! gets the same single-run discipline, console stream, and event flow.
//!
//! # Architecture
//!
//! ```text
//! Shells:      desktop adapter      ytgrab-cli
//!                    |                   |
//! Facade:            +--- ytgrab-gui ----+
//!                         GuiBackend
//!                        /          \
//! Below:         ytgrab-core    ytgrab-runtime
//! ```
//!
//! # Rules
//!
//! 1. **No adapter dependencies** - must not depend on any shell toolkit
//! 2. **Pure orchestration** - all deps injected via `GuiDeps`
//! 3. **Semantic errors** - returns `GuiError`, adapters map to their own
//! 4. **One run at a time** - downloads and installs share one slot

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// tempfile only backs the unix-only process fixtures
#[cfg(all(test, not(unix)))]
use tempfile as _;

mod backend;
mod deps;
mod downloads;
mod error;
mod tools;
pub mod types;

// Primary exports
pub use backend::GuiBackend;
pub use deps::GuiDeps;
pub use error::GuiError;

// Re-export operation modules for direct access if needed
pub use downloads::DownloadOps;
pub use tools::ToolOps;

// Re-export commonly used types from the lower crates for convenience
pub use ytgrab_core::events::{DownloadEvent, DownloadState, RunOutcome};
pub use ytgrab_runtime::process::ConsoleEntry;
pub use ytgrab_runtime::tools::{BootstrapAvailability, ToolStatus};

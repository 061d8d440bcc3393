//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call core, runtime, or backend operations
//!   3. Format output for the terminal
//!
//! Handlers should NOT contain compilation or supervision logic; that
//! lives below them.

use ytgrab_core::ports::ConsoleSinkPort;

pub mod download;
pub mod paths;
pub mod tools;

/// Console sink that forwards lines straight to stdout.
///
/// Used by all foreground operations so the downloader's output appears
/// exactly as it would in a terminal.
pub(crate) struct StdoutSink;

impl ConsoleSinkPort for StdoutSink {
    fn append(&self, line: String) {
        println!("{line}");
    }
}

//! Supervised external-process execution and console streaming.
//!
//! # Structure
//!
//! - `run_to_completion` - spawn one command, stream its merged output,
//!   report the terminal outcome
//! - `ConsoleLog` - bounded ring buffer plus broadcast feed backing the
//!   log view; a process-wide instance is reachable through [`console`]

mod logs;
mod supervisor;

// Re-export commonly used types
pub use logs::{ConsoleEntry, ConsoleLog, console};
pub use supervisor::run_to_completion;

//! Process supervision and OS-level concerns for ytgrab.
//!
//! This crate owns everything that touches the operating system: spawning
//! the downloader, streaming its merged output into the shared console,
//! probing for installed tools, and bootstrapping missing ones. The core
//! crate stays pure; adapters reach the OS only through here.

#![deny(unsafe_code)]

pub mod process;
pub mod tools;

// Re-export the supervisor entry point and console accessors
pub use process::{console, run_to_completion, ConsoleEntry, ConsoleLog};

// Re-export tool management for adapters
pub use tools::{
    check_bootstrap_availability, downloader_status, ffmpeg_status, install_downloader,
    install_ffmpeg, resolve_tool_locations, BootstrapAvailability, ToolError, ToolResult,
    ToolStatus,
};

#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod command;
pub mod events;
pub mod options;
pub mod paths;
pub mod ports;

// Re-export commonly used types for convenience
pub use command::{
    CommandError, CommandLine, DEFAULT_DOWNLOADER, OUTPUT_TEMPLATE, ToolLocations,
    build_download_command,
};
pub use events::{DownloadEvent, DownloadState, RunOutcome};
pub use options::{DownloadOptions, FormatSelector, Quality};
pub use paths::{
    DATA_DIR_ENV, PathError, data_root, ensure_directory, ffmpeg_binary_path, ffmpeg_dir,
    ffmpeg_receipt_path, ffprobe_binary_path,
};
pub use ports::{ConsoleSinkPort, EventEmitter, NoopEmitter};

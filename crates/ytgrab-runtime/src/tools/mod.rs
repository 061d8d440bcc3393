//! External tool management: detection, version probes, and bootstrap
//! installers for the downloader and the transcoder.

pub mod detect;
pub mod error;
pub mod ffmpeg;
pub mod ytdlp;

pub use detect::{downloader_status, ffmpeg_status, resolve_tool_locations, ToolStatus};
pub use error::{ToolError, ToolResult};
pub use ffmpeg::{check_bootstrap_availability, install_ffmpeg, BootstrapAvailability};
pub use ytdlp::install_downloader;

//! Paths command handler.
//!
//! Displays all resolved paths for diagnostics. This is the first thing
//! to check when a staged tool is not being picked up.

use anyhow::Result;

use ytgrab_core::paths;

/// Execute the paths command.
///
/// Resolves and displays every ytgrab path in `key = value` form.
pub fn execute() -> Result<()> {
    println!("data_root = {}", paths::data_root()?.display());
    println!("ffmpeg_dir = {}", paths::ffmpeg_dir()?.display());
    println!("ffmpeg_binary = {}", paths::ffmpeg_binary_path()?.display());
    println!("ffprobe_binary = {}", paths::ffprobe_binary_path()?.display());
    println!("ffmpeg_receipt = {}", paths::ffmpeg_receipt_path()?.display());
    Ok(())
}

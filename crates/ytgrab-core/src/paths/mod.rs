//! Path resolution for ytgrab data directories.
//!
//! Canonical location logic for everything ytgrab stages on disk: the
//! per-user application-data root and the staged ffmpeg binaries inside
//! it.
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError`; no interactive I/O here
//! - Resolution is pure; directory creation is a separate, explicit call
//! - OS-specific binary names are confined to this module

mod error;

pub use error::PathError;

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the application-data root.
pub const DATA_DIR_ENV: &str = "YTGRAB_DATA_DIR";

/// Get the root directory for application data.
///
/// Resolution order:
/// 1. `YTGRAB_DATA_DIR` environment variable
/// 2. System data directory joined with `ytgrab`
///    (e.g. `~/.local/share/ytgrab`, `%APPDATA%\ytgrab`)
///
/// The directory is not created here; call [`ensure_directory`] before
/// writing into it.
pub fn data_root() -> Result<PathBuf, PathError> {
    resolve_data_root(env::var_os(DATA_DIR_ENV))
}

fn resolve_data_root(override_dir: Option<OsString>) -> Result<PathBuf, PathError> {
    if let Some(dir) = override_dir {
        return Ok(PathBuf::from(dir));
    }
    let data_dir = dirs::data_dir().ok_or(PathError::NoDataDir)?;
    Ok(data_dir.join("ytgrab"))
}

/// Ensure the provided directory exists, creating it (and parents) when
/// missing.
pub fn ensure_directory(path: &Path) -> Result<(), PathError> {
    if path.exists() {
        if !path.is_dir() {
            return Err(PathError::NotADirectory(path.to_path_buf()));
        }
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|e| PathError::CreateFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Directory holding the staged ffmpeg build.
pub fn ffmpeg_dir() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join("ffmpeg"))
}

/// Path of the staged ffmpeg binary.
pub fn ffmpeg_binary_path() -> Result<PathBuf, PathError> {
    #[cfg(target_os = "windows")]
    let binary_name = "ffmpeg.exe";

    #[cfg(not(target_os = "windows"))]
    let binary_name = "ffmpeg";

    Ok(ffmpeg_dir()?.join(binary_name))
}

/// Path of the staged ffprobe binary.
pub fn ffprobe_binary_path() -> Result<PathBuf, PathError> {
    #[cfg(target_os = "windows")]
    let binary_name = "ffprobe.exe";

    #[cfg(not(target_os = "windows"))]
    let binary_name = "ffprobe";

    Ok(ffmpeg_dir()?.join(binary_name))
}

/// Path of the JSON receipt written after a successful ffmpeg bootstrap.
pub fn ffmpeg_receipt_path() -> Result<PathBuf, PathError> {
    Ok(ffmpeg_dir()?.join("ffmpeg-receipt.json"))
}

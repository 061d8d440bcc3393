//! First-run bootstrap of the transcoding tool.
//!
//! Fetches the fixed release archive, extracts the two binaries we need,
//! and stages them in the application-data directory where the command
//! compiler's location override will find them. The fixed URL publishes
//! Windows builds only; other platforms are pointed at their package
//! manager instead.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use futures_util::StreamExt;
use serde_json::json;
use tracing::{debug, info};
use ytgrab_core::paths;
use ytgrab_core::ports::ConsoleSinkPort;

use super::error::{ToolError, ToolResult};

/// Fixed release archive for the Windows ffmpeg build.
pub const FFMPEG_RELEASE_URL: &str = "https://github.com/BtbN/FFmpeg-Builds/releases/download/latest/ffmpeg-master-latest-win64-gpl.zip";

/// Binaries the archive must provide, by final path segment.
#[cfg(target_os = "windows")]
const REQUIRED_BINARIES: [&str; 2] = ["ffmpeg.exe", "ffprobe.exe"];

#[cfg(not(target_os = "windows"))]
const REQUIRED_BINARIES: [&str; 2] = ["ffmpeg", "ffprobe"];

/// Progress callback for the archive fetch: (bytes downloaded, total).
/// Total is 0 when the server does not report a content length.
pub type FetchProgress<'a> = &'a (dyn Fn(u64, u64) + Send + Sync);

/// Whether a prebuilt archive exists for the current platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapAvailability {
    /// A prebuilt archive can be fetched from the fixed URL.
    Available { url: &'static str },
    /// No archive for this platform; manual install required.
    NotAvailable { reason: String },
}

/// Report whether the fixed-URL bootstrap can run here.
pub fn check_bootstrap_availability() -> BootstrapAvailability {
    match std::env::consts::OS {
        "windows" => BootstrapAvailability::Available {
            url: FFMPEG_RELEASE_URL,
        },
        other => BootstrapAvailability::NotAvailable {
            reason: format!(
                "no prebuilt ffmpeg archive for {other}; install ffmpeg with your system package manager"
            ),
        },
    }
}

/// Download, extract, and stage the transcoding tool.
///
/// Streams human-readable milestones into `sink`; `progress`, when
/// given, receives byte counts during the fetch. Returns the staged
/// binary paths.
pub async fn install_ffmpeg(
    sink: Arc<dyn ConsoleSinkPort>,
    progress: Option<FetchProgress<'_>>,
) -> ToolResult<Vec<PathBuf>> {
    let url = match check_bootstrap_availability() {
        BootstrapAvailability::Available { url } => url,
        BootstrapAvailability::NotAvailable { reason } => {
            return Err(ToolError::NotAvailable {
                tool: "ffmpeg",
                reason,
            });
        }
    };

    let staging_dir = paths::ffmpeg_dir()?;
    paths::ensure_directory(&staging_dir)?;

    sink.append("Downloading ffmpeg archive...".to_string());
    info!(url, "fetching ffmpeg release archive");

    let temp = tempfile::tempdir()?;
    let archive_path = temp.path().join("ffmpeg-release.zip");
    fetch_archive(url, &archive_path, progress).await?;
    sink.append("Download complete, extracting...".to_string());

    let staged = extract_binaries(&archive_path, &staging_dir, &REQUIRED_BINARIES)?;
    for path in &staged {
        sink.append(format!("Staged {}", path.display()));
    }

    write_receipt(url)?;
    sink.append("ffmpeg installed successfully.".to_string());
    info!(dir = %staging_dir.display(), "ffmpeg bootstrap finished");

    Ok(staged)
}

/// Stream the archive to `dest`, reporting progress as bytes arrive.
async fn fetch_archive(
    url: &str,
    dest: &Path,
    progress: Option<FetchProgress<'_>>,
) -> ToolResult<()> {
    let client = reqwest::Client::new();
    let response = client
        .get(url)
        .header("User-Agent", "ytgrab")
        .send()
        .await
        .map_err(|e| ToolError::DownloadFailed(e.to_string()))?;

    if !response.status().is_success() {
        return Err(ToolError::DownloadFailed(format!(
            "HTTP {} from release server",
            response.status()
        )));
    }

    let total = response.content_length().unwrap_or(0);
    let mut file = File::create(dest)?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| ToolError::DownloadFailed(e.to_string()))?;
        file.write_all(&chunk)?;
        downloaded += chunk.len() as u64;
        if let Some(callback) = progress {
            callback(downloaded, total);
        }
    }

    debug!(bytes = downloaded, "archive fetch complete");
    Ok(())
}

/// Pull the required binaries out of the archive by final path segment.
///
/// Directory entries and everything else (licenses, docs) are skipped.
/// Extracted files get the executable bit on Unix-family targets.
fn extract_binaries(
    archive: &Path,
    dest_dir: &Path,
    required: &[&str],
) -> ToolResult<Vec<PathBuf>> {
    let file = File::open(archive)?;
    let mut zip =
        zip::ZipArchive::new(file).map_err(|e| ToolError::ArchiveInvalid(e.to_string()))?;

    let mut staged = Vec::new();
    for index in 0..zip.len() {
        let mut entry = zip
            .by_index(index)
            .map_err(|e| ToolError::ArchiveInvalid(e.to_string()))?;
        if entry.is_dir() {
            continue;
        }

        let name = entry.name().to_string();
        let Some(file_name) = name.rsplit('/').next() else {
            continue;
        };
        if !required.contains(&file_name) {
            continue;
        }

        let dest = dest_dir.join(file_name);
        debug!(entry = %name, dest = %dest.display(), "extracting binary");
        let mut out = File::create(&dest)?;
        io::copy(&mut entry, &mut out)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&dest)?.permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&dest, perms)?;
        }

        staged.push(dest);
    }

    let staged_names: Vec<&str> = staged
        .iter()
        .filter_map(|path| path.file_name().and_then(|n| n.to_str()))
        .collect();
    let missing: Vec<String> = required
        .iter()
        .filter(|name| !staged_names.contains(*name))
        .map(|name| (*name).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ToolError::BinariesMissing { missing });
    }

    Ok(staged)
}

/// Record what was staged and when, next to the binaries.
fn write_receipt(url: &str) -> ToolResult<()> {
    let receipt = json!({
        "source": url,
        "installedAt": Utc::now().to_rfc3339(),
    });
    let body = serde_json::to_string_pretty(&receipt).map_err(io::Error::other)?;
    let path = paths::ffmpeg_receipt_path()?;
    fs::write(&path, body)?;
    debug!(path = %path.display(), "wrote install receipt");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(target_os = "windows"))]
    struct NullSink;

    #[cfg(not(target_os = "windows"))]
    impl ConsoleSinkPort for NullSink {
        fn append(&self, _line: String) {}
    }

    fn fixture_zip(dir: &Path, entries: &[(&str, &[u8])]) -> PathBuf {
        let path = dir.join("fixture.zip");
        let file = File::create(&path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);

        for (name, body) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(body).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    #[test]
    fn test_availability_matches_platform() {
        match check_bootstrap_availability() {
            BootstrapAvailability::Available { url } => {
                assert_eq!(std::env::consts::OS, "windows");
                assert_eq!(url, FFMPEG_RELEASE_URL);
            }
            BootstrapAvailability::NotAvailable { reason } => {
                assert!(reason.contains(std::env::consts::OS));
            }
        }
    }

    #[test]
    fn test_extract_stages_required_binaries() {
        let tmp = tempfile::tempdir().unwrap();
        let ffmpeg_entry = format!("pkg/bin/{}", REQUIRED_BINARIES[0]);
        let ffprobe_entry = format!("pkg/bin/{}", REQUIRED_BINARIES[1]);
        let archive = fixture_zip(
            tmp.path(),
            &[
                ("pkg/LICENSE.txt", b"license text".as_slice()),
                (ffmpeg_entry.as_str(), b"fake ffmpeg"),
                (ffprobe_entry.as_str(), b"fake ffprobe"),
            ],
        );

        let dest = tmp.path().join("staged");
        fs::create_dir_all(&dest).unwrap();
        let staged = extract_binaries(&archive, &dest, &REQUIRED_BINARIES).unwrap();

        assert_eq!(staged.len(), 2);
        for path in &staged {
            assert!(path.exists());
        }
        assert_eq!(
            fs::read(dest.join(REQUIRED_BINARIES[0])).unwrap(),
            b"fake ffmpeg"
        );

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&staged[0]).unwrap().permissions().mode();
            assert_ne!(mode & 0o111, 0, "extracted binary must be executable");
        }
    }

    #[test]
    fn test_extract_reports_missing_binaries() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = fixture_zip(tmp.path(), &[("pkg/README.md", b"docs".as_slice())]);

        let dest = tmp.path().join("staged");
        fs::create_dir_all(&dest).unwrap();
        let error = extract_binaries(&archive, &dest, &REQUIRED_BINARIES).unwrap_err();

        match error {
            ToolError::BinariesMissing { missing } => {
                assert_eq!(missing.len(), 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(not(target_os = "windows"))]
    #[tokio::test]
    async fn test_install_reports_unavailable_off_windows() {
        let error = install_ffmpeg(Arc::new(NullSink), None).await.unwrap_err();
        assert!(matches!(error, ToolError::NotAvailable { tool: "ffmpeg", .. }));
    }
}

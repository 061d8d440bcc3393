//! Compilation of download options into an ordered argument list.
//!
//! [`build_download_command`] is a pure function from option state plus
//! resolved tool locations to a [`CommandLine`]. Emission order is fixed
//! because the downstream tool is order-sensitive for repeated flags; the
//! only validation performed here is the non-empty URL check. Everything
//! else passes through for the external tool's own parser to judge.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use crate::options::DownloadOptions;

/// Default invocation name of the external download tool.
pub const DEFAULT_DOWNLOADER: &str = "yt-dlp";

/// Filename template handed to the downloader; placeholders are resolved
/// by the tool, not by this program.
pub const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Errors produced while compiling download options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The URL field was empty or whitespace-only.
    #[error("no URL provided")]
    EmptyUrl,
}

/// Where the external tools live for one invocation.
///
/// Resolved by the caller before compiling: the compiler itself performs
/// no filesystem checks. `ffmpeg_dir` is `Some` only when a staged copy
/// of the transcoding tool exists at the application-data location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolLocations {
    /// Invocation name or path of the downloader binary.
    pub downloader: String,
    /// Directory holding a staged ffmpeg build, when one exists.
    pub ffmpeg_dir: Option<PathBuf>,
}

impl Default for ToolLocations {
    fn default() -> Self {
        Self {
            downloader: DEFAULT_DOWNLOADER.to_string(),
            ffmpeg_dir: None,
        }
    }
}

/// An ordered, immutable command line for one external invocation.
///
/// Built fresh per invocation and consumed exactly once by the process
/// supervisor. `Display` renders the space-joined form used for the
/// console echo line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    /// Start a command line for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument token.
    pub fn arg(&mut self, value: impl Into<String>) -> &mut Self {
        self.args.push(value.into());
        self
    }

    /// The program token.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The argument tokens, in emission order.
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Compile the current options into a downloader command line.
///
/// Token order: program, ffmpeg location override, format selection,
/// output template, subtitle flags, audio extraction, format-probe skip,
/// thumbnail embedding, verbatim extra tokens, URL last.
pub fn build_download_command(
    options: &DownloadOptions,
    tools: &ToolLocations,
) -> Result<CommandLine, CommandError> {
    let url = options.url.trim();
    if url.is_empty() {
        return Err(CommandError::EmptyUrl);
    }

    let mut command = CommandLine::new(tools.downloader.as_str());

    if let Some(dir) = &tools.ffmpeg_dir {
        command.arg("--ffmpeg-location");
        command.arg(dir.to_string_lossy().into_owned());
    }

    // Strict precedence: audio-only beats video-only beats the dropdown.
    if options.audio_only {
        command.arg("-f").arg("bestaudio").arg("-x");
    } else if options.video_only {
        command
            .arg("-f")
            .arg(format!("bestvideo[height<={}]", options.max_quality.height()));
    } else {
        let height = options.max_quality.height();
        command.arg("-f").arg(format!(
            "{selector}[height<={height}]/best[height<={height}]",
            selector = options.format_selector.expression(),
        ));
    }

    if !options.output_directory.is_empty() {
        let template = Path::new(&options.output_directory).join(OUTPUT_TEMPLATE);
        command.arg("-o");
        command.arg(template.to_string_lossy().into_owned());
    }

    if options.download_subtitles {
        command.arg("--write-subs");
    }
    if options.download_auto_subtitles {
        command.arg("--write-auto-subs");
    }

    if options.extract_audio {
        if options.audio_only {
            // Both toggles emit -x; the duplicate is harmless and kept so
            // the emitted line matches what the user asked for.
            warn!("audio_only already extracts audio; emitting duplicate -x flags");
        }
        command.arg("-x").arg("--audio-format").arg("mp3");
    }

    if options.skip_dash_probe {
        command.arg("--no-check-formats");
    }
    if options.embed_thumbnail {
        command.arg("--embed-thumbnail");
    }

    for token in options.extra_arguments.split_whitespace() {
        command.arg(token);
    }

    command.arg(url);
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{FormatSelector, Quality};
    use std::path::MAIN_SEPARATOR;

    fn options_with_url(url: &str) -> DownloadOptions {
        DownloadOptions {
            url: url.to_string(),
            ..DownloadOptions::default()
        }
    }

    #[test]
    fn test_empty_url_rejected() {
        let result = build_download_command(&DownloadOptions::default(), &ToolLocations::default());
        assert_eq!(result.unwrap_err(), CommandError::EmptyUrl);

        let result = build_download_command(&options_with_url("   \t"), &ToolLocations::default());
        assert_eq!(result.unwrap_err(), CommandError::EmptyUrl);
    }

    #[test]
    fn test_url_is_always_last_token() {
        let mut options = options_with_url("  https://example.com/watch?v=abc  ");
        options.extra_arguments = "--playlist-items 1".to_string();
        options.embed_thumbnail = true;

        let command = build_download_command(&options, &ToolLocations::default()).unwrap();
        assert_eq!(
            command.args().last().map(String::as_str),
            Some("https://example.com/watch?v=abc")
        );
    }

    #[test]
    fn test_default_options_emit_bounded_selector_with_fallback() {
        let command =
            build_download_command(&options_with_url("https://example.com/v"), &ToolLocations::default())
                .unwrap();
        assert_eq!(command.program(), "yt-dlp");
        assert_eq!(
            command.args(),
            &[
                "-f",
                "bestvideo+bestaudio/best[height<=1080]/best[height<=1080]",
                "https://example.com/v",
            ]
        );
    }

    #[test]
    fn test_audio_only_wins_over_video_only_and_selector() {
        let mut options = options_with_url("https://example.com/v");
        options.audio_only = true;
        options.video_only = true;
        options.format_selector = FormatSelector::BestVideo;
        options.max_quality = Quality::P2160;

        let command = build_download_command(&options, &ToolLocations::default()).unwrap();
        assert_eq!(command.args()[..3], ["-f", "bestaudio", "-x"]);
        assert!(
            !command
                .args()
                .iter()
                .any(|token| token.contains("bestvideo[height<=")),
            "audio-only must suppress every video selector"
        );
    }

    #[test]
    fn test_video_only_bounded_by_max_quality() {
        let mut options = options_with_url("https://example.com/v");
        options.video_only = true;
        options.max_quality = Quality::P720;

        let command = build_download_command(&options, &ToolLocations::default()).unwrap();
        assert_eq!(command.args()[..2], ["-f", "bestvideo[height<=720]"]);
    }

    #[test]
    fn test_output_template_joined_with_platform_separator() {
        let mut options = options_with_url("https://example.com/v");
        options.output_directory = "D".to_string();

        let command = build_download_command(&options, &ToolLocations::default()).unwrap();
        let position = command.args().iter().position(|t| t == "-o").unwrap();
        assert_eq!(
            command.args()[position + 1],
            format!("D{MAIN_SEPARATOR}%(title)s.%(ext)s")
        );
    }

    #[test]
    fn test_ffmpeg_location_emitted_first_when_staged() {
        let tools = ToolLocations {
            downloader: DEFAULT_DOWNLOADER.to_string(),
            ffmpeg_dir: Some(PathBuf::from("/opt/stage/ffmpeg")),
        };
        let command = build_download_command(&options_with_url("https://example.com/v"), &tools).unwrap();
        assert_eq!(command.args()[..2], ["--ffmpeg-location", "/opt/stage/ffmpeg"]);
    }

    #[test]
    fn test_extra_arguments_tokenized_immediately_before_url() {
        let mut options = options_with_url("https://example.com/v");
        options.extra_arguments = "--playlist-items 1,2,5 --age-limit 18".to_string();

        let command = build_download_command(&options, &ToolLocations::default()).unwrap();
        let tail: Vec<&str> = command
            .args()
            .iter()
            .rev()
            .take(5)
            .rev()
            .map(String::as_str)
            .collect();
        assert_eq!(
            tail,
            [
                "--playlist-items",
                "1,2,5",
                "--age-limit",
                "18",
                "https://example.com/v",
            ]
        );
    }

    #[test]
    fn test_full_flag_order_is_stable() {
        let options = DownloadOptions {
            url: "https://example.com/v".to_string(),
            output_directory: "out".to_string(),
            format_selector: FormatSelector::Best,
            max_quality: Quality::P480,
            video_only: false,
            audio_only: false,
            download_subtitles: true,
            download_auto_subtitles: true,
            extract_audio: true,
            skip_dash_probe: true,
            embed_thumbnail: true,
            extra_arguments: "--age-limit 18".to_string(),
        };
        let tools = ToolLocations {
            downloader: DEFAULT_DOWNLOADER.to_string(),
            ffmpeg_dir: Some(PathBuf::from("stage")),
        };

        let command = build_download_command(&options, &tools).unwrap();
        let template = format!("out{MAIN_SEPARATOR}%(title)s.%(ext)s");
        assert_eq!(
            command.args(),
            &[
                "--ffmpeg-location",
                "stage",
                "-f",
                "best[height<=480]/best[height<=480]",
                "-o",
                template.as_str(),
                "--write-subs",
                "--write-auto-subs",
                "-x",
                "--audio-format",
                "mp3",
                "--no-check-formats",
                "--embed-thumbnail",
                "--age-limit",
                "18",
                "https://example.com/v",
            ]
        );
    }

    #[test]
    fn test_redundant_audio_flags_are_preserved() {
        let mut options = options_with_url("https://example.com/v");
        options.audio_only = true;
        options.extract_audio = true;

        let command = build_download_command(&options, &ToolLocations::default()).unwrap();
        let extraction_flags = command.args().iter().filter(|t| *t == "-x").count();
        assert_eq!(extraction_flags, 2);
        assert!(command.args().iter().any(|t| t == "--audio-format"));
    }

    #[test]
    fn test_display_renders_space_joined_tokens() {
        let mut command = CommandLine::new("yt-dlp");
        command.arg("-f").arg("best").arg("https://example.com/v");
        assert_eq!(command.to_string(), "yt-dlp -f best https://example.com/v");
    }
}

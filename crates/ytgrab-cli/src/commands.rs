//! Main commands enum and primary subcommands.
//!
//! This module defines the available commands for the download tool.

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand, ValueEnum};

use ytgrab_core::options::{DownloadOptions, FormatSelector, Quality};

/// Available commands for the download tool.
#[derive(Subcommand)]
pub enum Commands {
    /// Download a video or audio stream from a URL
    Download(DownloadArgs),

    /// Inspect and install the external tools
    Tools {
        #[command(subcommand)]
        command: ToolsCommand,
    },

    /// Show resolved paths for all ytgrab directories
    Paths,
}

/// Tool management subcommands.
#[derive(Subcommand)]
pub enum ToolsCommand {
    /// Show detected versions of the external tools
    Status {
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Install yt-dlp through pip
    InstallYtdlp,

    /// Download and stage ffmpeg from the fixed release archive
    InstallFfmpeg,
}

/// Stream selection strategy, mirroring the GUI format dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Best video and best audio merged, falling back to best combined
    MergedBest,
    /// Best pre-merged format
    Best,
    /// Best video stream only
    BestVideo,
    /// Best audio stream only
    BestAudio,
    /// Worst available format
    Worst,
}

impl From<FormatArg> for FormatSelector {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::MergedBest => Self::MergedBest,
            FormatArg::Best => Self::Best,
            FormatArg::BestVideo => Self::BestVideo,
            FormatArg::BestAudio => Self::BestAudio,
            FormatArg::Worst => Self::Worst,
        }
    }
}

/// Arguments for the download command.
#[derive(Args)]
pub struct DownloadArgs {
    /// The video URL to download
    pub url: String,

    /// Destination directory for the output file
    #[arg(short, long, env = "YTGRAB_OUTPUT_DIR")]
    pub output_dir: Option<String>,

    /// Stream selection strategy
    #[arg(short, long, value_enum, default_value_t = FormatArg::MergedBest)]
    pub format: FormatArg,

    /// Maximum stream height in pixels
    #[arg(long, default_value_t = 1080)]
    pub max_height: u16,

    /// Download the best audio stream only
    #[arg(long)]
    pub audio_only: bool,

    /// Download a video-only stream
    #[arg(long)]
    pub video_only: bool,

    /// Write subtitle files
    #[arg(long)]
    pub subs: bool,

    /// Write auto-generated subtitle files
    #[arg(long)]
    pub auto_subs: bool,

    /// Convert the result to mp3
    #[arg(long)]
    pub extract_audio: bool,

    /// Embed the thumbnail in the output container
    #[arg(long)]
    pub embed_thumbnail: bool,

    /// Skip the downloader's format probing pass
    #[arg(long)]
    pub skip_dash_probe: bool,

    /// Extra tokens passed through to the downloader verbatim
    #[arg(long, default_value = "")]
    pub extra: String,
}

impl DownloadArgs {
    /// Convert parsed arguments into domain options.
    ///
    /// The height is validated against the fixed quality menu so the
    /// CLI and the GUI accept exactly the same bounds.
    pub fn into_options(self) -> Result<DownloadOptions> {
        let max_quality = Quality::from_height(self.max_height).ok_or_else(|| {
            anyhow!(
                "--max-height must be one of 144, 240, 360, 480, 720, 1080, 1440, 2160 (got {})",
                self.max_height
            )
        })?;

        Ok(DownloadOptions {
            url: self.url,
            output_directory: self.output_dir.unwrap_or_default(),
            format_selector: self.format.into(),
            max_quality,
            video_only: self.video_only,
            audio_only: self.audio_only,
            download_subtitles: self.subs,
            download_auto_subtitles: self.auto_subs,
            extract_audio: self.extract_audio,
            skip_dash_probe: self.skip_dash_probe,
            embed_thumbnail: self.embed_thumbnail,
            extra_arguments: self.extra,
        })
    }
}

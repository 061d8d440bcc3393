//! User-selected download options.
//!
//! One [`DownloadOptions`] value mirrors the front-end form: a target URL,
//! an output directory, the format/quality dropdowns, the feature toggles,
//! and a free-form extra-arguments field. Options live in memory only;
//! they are never persisted across runs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stream-selection expression offered by the format dropdown.
///
/// Each variant maps to a literal yt-dlp format expression; the compiler
/// appends the quality bound and fallback around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormatSelector {
    /// Best video and best audio merged, falling back to best combined.
    #[default]
    MergedBest,
    /// Best pre-merged format.
    Best,
    /// Best video stream only.
    BestVideo,
    /// Best audio stream only.
    BestAudio,
    /// Worst available format.
    Worst,
}

impl FormatSelector {
    /// The yt-dlp format expression for this selector, without bounds.
    pub const fn expression(self) -> &'static str {
        match self {
            Self::MergedBest => "bestvideo+bestaudio/best",
            Self::Best => "best",
            Self::BestVideo => "bestvideo",
            Self::BestAudio => "bestaudio",
            Self::Worst => "worst",
        }
    }
}

/// Maximum stream height accepted by the quality dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Quality {
    P144,
    P240,
    P360,
    P480,
    P720,
    #[default]
    P1080,
    P1440,
    P2160,
}

impl Quality {
    /// All selectable qualities, lowest first.
    pub const ALL: [Self; 8] = [
        Self::P144,
        Self::P240,
        Self::P360,
        Self::P480,
        Self::P720,
        Self::P1080,
        Self::P1440,
        Self::P2160,
    ];

    /// The height in pixels used in `height<=` bounds.
    pub const fn height(self) -> u16 {
        match self {
            Self::P144 => 144,
            Self::P240 => 240,
            Self::P360 => 360,
            Self::P480 => 480,
            Self::P720 => 720,
            Self::P1080 => 1080,
            Self::P1440 => 1440,
            Self::P2160 => 2160,
        }
    }

    /// Look up a quality by its height. `None` for heights not in the menu.
    pub fn from_height(height: u16) -> Option<Self> {
        Self::ALL.iter().copied().find(|q| q.height() == height)
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.height())
    }
}

/// The full set of user-selected options for one download.
///
/// Defaults match the front-end's initial widget state: merged-best
/// format, 1080p bound, every toggle off, empty text fields. An empty
/// `output_directory` leaves the tool's own working-directory default in
/// effect.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DownloadOptions {
    /// Target URL. Trimmed before use; the only validated field.
    pub url: String,
    /// Destination directory for the output template; empty = tool default.
    pub output_directory: String,
    /// Format dropdown selection.
    pub format_selector: FormatSelector,
    /// Quality dropdown selection, used as a `height<=` bound.
    pub max_quality: Quality,
    /// Restrict to a video-only stream.
    pub video_only: bool,
    /// Restrict to the best audio stream. Overrides `video_only` and the
    /// format selector when set.
    pub audio_only: bool,
    /// Request subtitle files.
    pub download_subtitles: bool,
    /// Request auto-generated subtitle files.
    pub download_auto_subtitles: bool,
    /// Convert the result to mp3 after download.
    pub extract_audio: bool,
    /// Skip the tool's format probing pass.
    pub skip_dash_probe: bool,
    /// Embed the thumbnail into the output container.
    pub embed_thumbnail: bool,
    /// Raw extra tokens for power users, split on whitespace. Arguments
    /// containing embedded spaces cannot be expressed here.
    pub extra_arguments: String,
}

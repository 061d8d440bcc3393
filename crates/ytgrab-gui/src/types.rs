//! GUI-specific DTOs for frontend communication.
//!
//! These types are cross-adapter: any shell embedding the backend
//! exchanges them as JSON. They map between wire-friendly field shapes
//! and the domain option types.

use serde::{Deserialize, Serialize};

use ytgrab_core::options::{DownloadOptions, FormatSelector, Quality};
use ytgrab_runtime::tools::ToolStatus;

use crate::error::GuiError;

/// One download request as submitted by the front-end form.
///
/// Field defaults mirror the form's initial widget state, so a request
/// body of `{"url": "..."}` behaves exactly like filling in only the
/// URL box.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRequest {
    /// Target URL, the only required field.
    pub url: String,
    /// Destination directory; empty keeps the tool's working-directory default.
    #[serde(default)]
    pub output_directory: String,
    /// Format dropdown selection.
    #[serde(default)]
    pub format: FormatSelector,
    /// Quality bound in pixels; must be one of the menu heights.
    #[serde(default = "default_max_height")]
    pub max_height: u16,
    #[serde(default)]
    pub video_only: bool,
    #[serde(default)]
    pub audio_only: bool,
    #[serde(default)]
    pub download_subtitles: bool,
    #[serde(default)]
    pub download_auto_subtitles: bool,
    #[serde(default)]
    pub extract_audio: bool,
    #[serde(default)]
    pub skip_dash_probe: bool,
    #[serde(default)]
    pub embed_thumbnail: bool,
    /// Whitespace-separated extra tokens appended before the URL.
    #[serde(default)]
    pub extra_arguments: String,
}

fn default_max_height() -> u16 {
    Quality::default().height()
}

impl DownloadRequest {
    /// Start a request with only the URL filled in.
    pub fn for_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            output_directory: String::new(),
            format: FormatSelector::default(),
            max_height: default_max_height(),
            video_only: false,
            audio_only: false,
            download_subtitles: false,
            download_auto_subtitles: false,
            extract_audio: false,
            skip_dash_probe: false,
            embed_thumbnail: false,
            extra_arguments: String::new(),
        }
    }

    /// Convert into domain options, validating the quality bound against
    /// the fixed menu.
    pub fn into_options(self) -> Result<DownloadOptions, GuiError> {
        let max_quality = Quality::from_height(self.max_height).ok_or_else(|| {
            GuiError::ValidationFailed(format!(
                "unsupported quality bound: {}p",
                self.max_height
            ))
        })?;

        Ok(DownloadOptions {
            url: self.url,
            output_directory: self.output_directory,
            format_selector: self.format,
            max_quality,
            video_only: self.video_only,
            audio_only: self.audio_only,
            download_subtitles: self.download_subtitles,
            download_auto_subtitles: self.download_auto_subtitles,
            extract_audio: self.extract_audio,
            skip_dash_probe: self.skip_dash_probe,
            embed_thumbnail: self.embed_thumbnail,
            extra_arguments: self.extra_arguments,
        })
    }
}

/// Combined probe result for both external tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsReport {
    pub downloader: ToolStatus,
    pub ffmpeg: ToolStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_only_body_uses_form_defaults() {
        let request: DownloadRequest =
            serde_json::from_str(r#"{"url": "https://example.com/v"}"#).unwrap();
        assert_eq!(request.max_height, 1080);
        assert_eq!(request.format, FormatSelector::MergedBest);
        assert!(!request.audio_only);

        let options = request.into_options().unwrap();
        assert_eq!(options.max_quality, Quality::P1080);
        assert_eq!(options.url, "https://example.com/v");
    }

    #[test]
    fn test_off_menu_height_rejected() {
        let mut request = DownloadRequest::for_url("https://example.com/v");
        request.max_height = 999;
        let err = request.into_options().unwrap_err();
        assert!(matches!(err, GuiError::ValidationFailed(_)));
        assert!(err.to_string().contains("999p"));
    }

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let request = DownloadRequest::for_url("https://example.com/v");
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"maxHeight\":1080"));
        assert!(json.contains("\"extraArguments\":\"\""));
        assert!(!json.contains("max_height"));
    }
}

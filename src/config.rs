//! Run configuration.
//!
//! Every field except the API key is optional; a missing value is asked for
//! interactively when the run reaches it.

use crate::image::AspectRatio;
use std::path::PathBuf;

/// Directory, relative to the working directory, that receives all outputs.
pub const OUTPUT_DIR_NAME: &str = "generated-images";

/// Aspect ratio used for every image and video.
pub const ASPECT_RATIO: AspectRatio = AspectRatio::Portrait;

/// Image count when none (or garbage) is given.
pub const DEFAULT_COUNT: i32 = 1;

/// Video duration used when none is given or the value is out of range.
pub const DEFAULT_DURATION_SECS: u32 = 6;

/// Shortest accepted video duration.
pub const MIN_DURATION_SECS: u32 = 1;

/// Longest accepted video duration.
pub const MAX_DURATION_SECS: u32 = 15;

/// Values gathered once at startup from flags, the environment and `.env`.
#[derive(Debug, Clone)]
pub struct Config {
    /// xAI API key.
    pub api_key: String,
    /// `PROMPT`
    pub prompt: Option<String>,
    /// `MODE`
    pub mode: Option<String>,
    /// `COUNT`
    pub count: Option<String>,
    /// `VIDEO_IMAGE_SOURCE`
    pub video_image_source: Option<String>,
    /// `DURATION`
    pub duration: Option<String>,
    /// Where generated files are written.
    pub output_dir: PathBuf,
}

impl Config {
    /// Creates a config with no pre-filled inputs.
    pub fn new(api_key: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            api_key: api_key.into(),
            prompt: None,
            mode: None,
            count: None,
            video_image_source: None,
            duration: None,
            output_dir: output_dir.into(),
        }
    }

    /// Sets the prompt.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = non_empty(prompt.into());
        self
    }

    /// Sets the mode.
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = non_empty(mode.into());
        self
    }

    /// Sets the raw image count.
    pub fn with_count(mut self, count: impl Into<String>) -> Self {
        self.count = non_empty(count.into());
        self
    }

    /// Sets the source image path for video mode.
    pub fn with_video_image_source(mut self, path: impl Into<String>) -> Self {
        self.video_image_source = non_empty(path.into());
        self
    }

    /// Sets the raw video duration.
    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = non_empty(duration.into());
        self
    }
}

/// The API key, unless it is missing or blank.
pub fn require_api_key(key: Option<String>) -> Option<String> {
    key.filter(|k| !k.trim().is_empty())
}

/// An empty variable counts as unset.
pub(crate) fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values_are_unset() {
        let config = Config::new("xai-test", "out")
            .with_prompt("")
            .with_mode("video")
            .with_count("");

        assert!(config.prompt.is_none());
        assert_eq!(config.mode.as_deref(), Some("video"));
        assert!(config.count.is_none());
    }

    #[test]
    fn test_require_api_key() {
        assert_eq!(
            require_api_key(Some("xai-test".into())).as_deref(),
            Some("xai-test")
        );
        assert!(require_api_key(None).is_none());
        assert!(require_api_key(Some(String::new())).is_none());
        assert!(require_api_key(Some(" \t ".into())).is_none());
    }

    #[test]
    fn test_duration_bounds_contain_default() {
        assert!((MIN_DURATION_SECS..=MAX_DURATION_SECS).contains(&DEFAULT_DURATION_SECS));
        assert_eq!(ASPECT_RATIO.as_str(), "9:16");
    }
}

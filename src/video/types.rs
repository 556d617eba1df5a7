//! Core types for video generation.

use crate::image::{AspectRatio, ImageFormat};

/// Metadata about the video generation process.
#[derive(Debug, Clone, Default)]
pub struct VideoMetadata {
    /// Model used for generation.
    pub model: Option<String>,
    /// Generation duration in milliseconds.
    pub duration_ms: Option<u64>,
}

/// A request to animate a source image into a short video.
#[derive(Debug, Clone)]
pub struct VideoGenerationRequest {
    /// The text prompt describing the desired motion.
    pub prompt: String,
    /// Raw bytes of the source image.
    pub source_image: Vec<u8>,
    /// Desired video duration in seconds.
    pub duration_secs: u32,
    /// Aspect ratio of the output video.
    pub aspect_ratio: Option<AspectRatio>,
}

impl VideoGenerationRequest {
    /// Creates a new request from a prompt, source image bytes and duration.
    pub fn new(prompt: impl Into<String>, source_image: Vec<u8>, duration_secs: u32) -> Self {
        Self {
            prompt: prompt.into(),
            source_image,
            duration_secs,
            aspect_ratio: None,
        }
    }

    /// Sets the aspect ratio.
    pub fn with_aspect_ratio(mut self, ratio: AspectRatio) -> Self {
        self.aspect_ratio = Some(ratio);
        self
    }

    /// Encodes the source image as a `data:` URI, sniffing the MIME type.
    pub fn source_data_uri(&self) -> String {
        use base64::Engine;
        let mime = ImageFormat::from_magic_bytes(&self.source_image)
            .map(|f| f.mime_type())
            .unwrap_or("image/png");
        let b64 = base64::engine::general_purpose::STANDARD.encode(&self.source_image);
        format!("data:{mime};base64,{b64}")
    }
}

/// A generated video, either inline or behind a temporary download URL.
#[derive(Debug, Clone, Default)]
pub struct GeneratedVideo {
    /// Raw video bytes, when returned inline.
    pub data: Option<Vec<u8>>,
    /// Temporary download URL, when the bytes live elsewhere.
    pub url: Option<String>,
    /// Generation metadata.
    pub metadata: VideoMetadata,
}

impl GeneratedVideo {
    /// A video whose bytes came back inline.
    pub fn from_bytes(data: Vec<u8>, metadata: VideoMetadata) -> Self {
        Self {
            data: Some(data),
            url: None,
            metadata,
        }
    }

    /// A video that must be fetched from `url`.
    pub fn from_url(url: impl Into<String>, metadata: VideoMetadata) -> Self {
        Self {
            data: None,
            url: Some(url.into()),
            metadata,
        }
    }
}

//! Core types for image generation.

/// Extension used when a generated image carries no MIME type.
pub const DEFAULT_IMAGE_EXTENSION: &str = "png";

/// Image formats recognised from magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// PNG format (lossless).
    Png,
    /// JPEG format (lossy).
    Jpeg,
    /// WebP format.
    WebP,
}

impl ImageFormat {
    /// Returns the MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
        }
    }

    /// Detects image format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 12 {
            return None;
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(Self::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        // WebP: RIFF....WEBP
        if data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some(Self::WebP);
        }

        None
    }
}

/// Aspect ratios sent to Grok Imagine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectRatio {
    /// 9:16 portrait (tall) aspect ratio.
    Portrait,
}

impl AspectRatio {
    /// Returns the aspect ratio as a string (e.g., "9:16").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Portrait => "9:16",
        }
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Metadata about the generation process.
#[derive(Debug, Clone, Default)]
pub struct GenerationMetadata {
    /// Model used for generation.
    pub model: Option<String>,
    /// Wall-clock time of the API call in milliseconds.
    pub duration_ms: Option<u64>,
}

/// A request to generate one or more images.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// The text prompt describing the desired image.
    pub prompt: String,
    /// Number of images to generate in one batch. Not validated here.
    pub count: i32,
    /// Aspect ratio of every image in the batch.
    pub aspect_ratio: Option<AspectRatio>,
}

impl GenerationRequest {
    /// Creates a request for a single image with the given prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            count: 1,
            aspect_ratio: None,
        }
    }

    /// Sets the number of images.
    pub fn with_count(mut self, count: i32) -> Self {
        self.count = count;
        self
    }

    /// Sets the aspect ratio.
    pub fn with_aspect_ratio(mut self, ratio: AspectRatio) -> Self {
        self.aspect_ratio = Some(ratio);
        self
    }
}

/// A generated image with its data and metadata.
#[derive(Debug, Clone)]
#[must_use = "generated image should be saved or processed"]
pub struct GeneratedImage {
    /// Raw image bytes.
    pub data: Vec<u8>,
    /// MIME type, when known (e.g. "image/jpeg").
    pub mime_type: Option<String>,
    /// Generation metadata.
    pub metadata: GenerationMetadata,
}

impl GeneratedImage {
    /// Creates a new generated image.
    pub fn new(data: Vec<u8>, mime_type: Option<String>, metadata: GenerationMetadata) -> Self {
        Self {
            data,
            mime_type,
            metadata,
        }
    }

    /// Creates a new generated image, taking the MIME type from magic bytes.
    pub fn from_bytes(data: Vec<u8>, metadata: GenerationMetadata) -> Self {
        let mime_type = ImageFormat::from_magic_bytes(&data).map(|f| f.mime_type().to_string());
        Self::new(data, mime_type, metadata)
    }

    /// File extension derived from the MIME subtype, `png` when unknown.
    pub fn extension(&self) -> &str {
        self.mime_type
            .as_deref()
            .and_then(|m| m.split('/').nth(1))
            .filter(|ext| !ext.is_empty())
            .unwrap_or(DEFAULT_IMAGE_EXTENSION)
    }

    /// Encodes the image data as base64.
    pub fn to_base64(&self) -> String {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode(&self.data)
    }

    /// First `len` characters of the base64 encoding.
    pub fn base64_preview(&self, len: usize) -> String {
        self.to_base64().chars().take(len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 12] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
    const JPEG_MAGIC: [u8; 12] = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0, 0, 0, 0, 0];
    const WEBP_MAGIC: [u8; 12] = *b"RIFF\x00\x00\x00\x00WEBP";

    #[test]
    fn test_format_from_magic_bytes() {
        assert_eq!(
            ImageFormat::from_magic_bytes(&PNG_MAGIC),
            Some(ImageFormat::Png)
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(&JPEG_MAGIC),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_magic_bytes(&WEBP_MAGIC),
            Some(ImageFormat::WebP)
        );
        assert_eq!(ImageFormat::from_magic_bytes(b"short"), None);
    }

    #[test]
    fn test_extension_from_mime() {
        let png = GeneratedImage::new(vec![], Some("image/png".into()), Default::default());
        let jpeg = GeneratedImage::new(vec![], Some("image/jpeg".into()), Default::default());
        let unknown = GeneratedImage::new(vec![], None, Default::default());
        let malformed = GeneratedImage::new(vec![], Some("image".into()), Default::default());

        assert_eq!(png.extension(), "png");
        assert_eq!(jpeg.extension(), "jpeg");
        assert_eq!(unknown.extension(), "png");
        assert_eq!(malformed.extension(), "png");
    }

    #[test]
    fn test_from_bytes_detects_mime() {
        let img = GeneratedImage::from_bytes(JPEG_MAGIC.to_vec(), Default::default());
        assert_eq!(img.mime_type.as_deref(), Some("image/jpeg"));

        let img = GeneratedImage::from_bytes(vec![1, 2, 3], Default::default());
        assert!(img.mime_type.is_none());
        assert_eq!(img.extension(), "png");
    }

    #[test]
    fn test_base64_preview() {
        let img = GeneratedImage::new(vec![0u8; 60], None, Default::default());
        assert_eq!(img.base64_preview(50).len(), 50);
        assert_eq!(img.base64_preview(4), "AAAA");
    }

    #[test]
    fn test_aspect_ratio_as_str() {
        assert_eq!(AspectRatio::Portrait.as_str(), "9:16");
        assert_eq!(AspectRatio::Portrait.to_string(), "9:16");
    }
}

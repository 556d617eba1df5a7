//! Video provider trait.

use crate::error::Result;
use crate::video::types::{GeneratedVideo, VideoGenerationRequest};
use async_trait::async_trait;

/// Trait for image-to-video generation providers.
#[async_trait]
pub trait VideoProvider: Send + Sync {
    /// Generates a video. The result may carry bytes, a temporary URL, or (on a bad
    /// response) neither.
    async fn generate(&self, request: &VideoGenerationRequest) -> Result<GeneratedVideo>;

    /// Fetches the bytes behind a temporary video URL.
    async fn download(&self, url: &str) -> Result<Vec<u8>>;

    /// Returns the name of this provider for display.
    fn name(&self) -> &str;
}
